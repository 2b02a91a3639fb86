//! Viewport: camera, coordinate transforms and pointer interaction.

pub mod camera;
pub mod interaction;
pub mod transform;

pub use camera::*;
pub use interaction::*;
pub use transform::*;
