//! Polynomial fitting.
//!
//! Responsibilities:
//!
//! - assemble and solve the normal equations (`normal`)
//! - own the target/current coefficient pair and animate between them (`regression`)

pub mod normal;
pub mod regression;

pub use normal::*;
pub use regression::*;
