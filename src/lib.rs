//! `poly-curves` library crate.
//!
//! The binary (`poly`) is a thin wrapper around this library so that:
//!
//! - fitting, camera and transform logic is testable without a terminal
//! - the interactive and batch front-ends share one session model

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod math;
pub mod plot;
pub mod report;
pub mod tui;
pub mod view;
