//! Generated point data.

pub mod sample;

pub use sample::*;
