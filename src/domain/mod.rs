//! Domain types: the 2D primitive, typed coordinate spaces, the point set, and
//! session settings.

pub mod points;
pub mod settings;
pub mod space;
pub mod types;

pub use points::*;
pub use settings::*;
pub use space::*;
pub use types::*;
