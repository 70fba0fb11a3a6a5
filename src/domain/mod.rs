//! Domain models for polygons
//!
//! Contains the shape types and their validation rules without any I/O concerns.

mod id;
mod shape;
mod rectangle;
mod square;

pub use id::{IdError, IdGenerator};
pub use shape::{as_integer, Shape, ShapeDict, ShapeError, ShapeField};
pub use rectangle::{Rectangle, RectangleField};
pub use square::{Square, SquareField};
