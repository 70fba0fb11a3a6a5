//! polygons - validated rectangles and squares
//!
//! Shapes carry an integer id and validated geometry. They can be bulk-updated
//! from positional or named values, rendered as text, and persisted as JSON or
//! CSV collections, one file per shape type.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{IdError, IdGenerator, Rectangle, Shape, ShapeError, Square};
pub use storage::{CodecError, ShapeStore};
