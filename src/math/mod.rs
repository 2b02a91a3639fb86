//! Mathematical utilities: the linear solver, the smoothing law, and
//! polynomial evaluation.

pub mod gauss;
pub mod lerp;
pub mod poly;

pub use gauss::*;
pub use lerp::*;
pub use poly::*;
