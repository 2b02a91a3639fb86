//! Coordinate spaces.
//!
//! Every position and size is tagged with the space it lives in:
//!
//! - **Screen**: viewport units, origin top-left, y increasing downward
//! - **World**: camera-relative continuous space, scaled by zoom on screen
//! - **Point**: world divided by the point spacing, the unit grid the user edits
//!
//! The tags are zero-sized, so a `WorldPos` has the same layout as a `Vec2`, but
//! passing a `ScreenPos` where a `WorldPos` is expected does not compile. The
//! only way across spaces is [`crate::view::Transformer`].

use std::fmt;
use std::marker::PhantomData;
use std::ops::{Add, Div, Mul, Sub};

use crate::domain::types::{Axis, Vec2};

/// Viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {}

/// Camera-relative units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum World {}

/// The user-facing unit grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointSpace {}

/// An absolute location in space `S`.
pub struct Pos<S> {
    v: Vec2,
    space: PhantomData<S>,
}

/// A displacement or extent in space `S`.
pub struct Size<S> {
    v: Vec2,
    space: PhantomData<S>,
}

pub type ScreenPos = Pos<Screen>;
pub type WorldPos = Pos<World>;
pub type PointPos = Pos<PointSpace>;

pub type ScreenSize = Size<Screen>;
pub type WorldSize = Size<World>;
pub type PointSize = Size<PointSpace>;

// The derives would demand `S: Clone` etc. on the uninhabited tags, so the
// common traits are spelled out once for both wrappers.
macro_rules! tagged_vector {
    ($name:ident) => {
        impl<S> $name<S> {
            pub const fn new(x: f64, y: f64) -> Self {
                Self {
                    v: Vec2::new(x, y),
                    space: PhantomData,
                }
            }

            pub const fn from_vec(v: Vec2) -> Self {
                Self {
                    v,
                    space: PhantomData,
                }
            }

            pub const fn zero() -> Self {
                Self::new(0.0, 0.0)
            }

            pub fn vec(self) -> Vec2 {
                self.v
            }

            pub fn x(self) -> f64 {
                self.v.x
            }

            pub fn y(self) -> f64 {
                self.v.y
            }

            pub fn get(self, axis: Axis) -> f64 {
                self.v.get(axis)
            }

            pub fn with(self, axis: Axis, value: f64) -> Self {
                Self::from_vec(self.v.with(axis, value))
            }

            pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
                Self::from_vec(self.v.map(f))
            }

            pub fn is_finite(self) -> bool {
                self.v.is_finite()
            }
        }

        impl<S> Clone for $name<S> {
            fn clone(&self) -> Self {
                *self
            }
        }

        impl<S> Copy for $name<S> {}

        impl<S> PartialEq for $name<S> {
            fn eq(&self, other: &Self) -> bool {
                self.v == other.v
            }
        }

        impl<S> Default for $name<S> {
            fn default() -> Self {
                Self::zero()
            }
        }

        impl<S> fmt::Debug for $name<S> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}<{}>({}, {})",
                    stringify!($name),
                    space_name::<S>(),
                    self.v.x,
                    self.v.y
                )
            }
        }

        impl<S> From<(f64, f64)> for $name<S> {
            fn from((x, y): (f64, f64)) -> Self {
                Self::new(x, y)
            }
        }
    };
}

tagged_vector!(Pos);
tagged_vector!(Size);

fn space_name<S>() -> &'static str {
    let full = std::any::type_name::<S>();
    full.rsplit("::").next().unwrap_or(full)
}

impl<S> Pos<S> {
    pub fn distance_to(self, other: Pos<S>) -> f64 {
        self.v.distance_to(other.v)
    }
}

impl<S> Size<S> {
    pub fn flipped(self) -> Self {
        Self::from_vec(self.v.flipped())
    }
}

/// `b - a` is the displacement from `a` to `b`.
impl<S> Sub for Pos<S> {
    type Output = Size<S>;

    fn sub(self, rhs: Pos<S>) -> Size<S> {
        Size::from_vec(self.v - rhs.v)
    }
}

impl<S> Add<Size<S>> for Pos<S> {
    type Output = Pos<S>;

    fn add(self, rhs: Size<S>) -> Pos<S> {
        Pos::from_vec(self.v + rhs.v)
    }
}

impl<S> Sub<Size<S>> for Pos<S> {
    type Output = Pos<S>;

    fn sub(self, rhs: Size<S>) -> Pos<S> {
        Pos::from_vec(self.v - rhs.v)
    }
}

impl<S> Add for Size<S> {
    type Output = Size<S>;

    fn add(self, rhs: Size<S>) -> Size<S> {
        Size::from_vec(self.v + rhs.v)
    }
}

impl<S> Mul<f64> for Size<S> {
    type Output = Size<S>;

    fn mul(self, rhs: f64) -> Size<S> {
        Size::from_vec(self.v * rhs)
    }
}

impl<S> Div<f64> for Size<S> {
    type Output = Size<S>;

    fn div(self, rhs: f64) -> Size<S> {
        Size::from_vec(self.v / rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn position_difference_is_a_size() {
        let a = WorldPos::new(10.0, 20.0);
        let b = WorldPos::new(13.0, 24.0);
        let d: WorldSize = b - a;
        assert_eq!(d, WorldSize::new(3.0, 4.0));
        assert_eq!(a + d, b);
        assert_eq!(b - d, a);
        assert!((a.distance_to(b) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn debug_names_the_space() {
        let p = PointPos::new(1.0, 2.0);
        assert_eq!(format!("{p:?}"), "Pos<PointSpace>(1, 2)");
    }
}
