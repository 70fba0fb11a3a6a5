//! Rectangle domain model
//!
//! Width and height are strictly positive, the x/y offsets non-negative.
//! Every write goes through a validating setter, construction included, so a
//! `Rectangle` can never be observed in an invalid state.

use std::fmt;

use super::id::IdGenerator;
use super::shape::{non_negative, positive, Shape, ShapeError, ShapeField};

/// Fields of a [`Rectangle`] in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RectangleField {
    Id,
    Width,
    Height,
    X,
    Y,
}

impl ShapeField for RectangleField {
    const ALL: &'static [Self] = &[
        RectangleField::Id,
        RectangleField::Width,
        RectangleField::Height,
        RectangleField::X,
        RectangleField::Y,
    ];

    fn name(self) -> &'static str {
        match self {
            RectangleField::Id => "id",
            RectangleField::Width => "width",
            RectangleField::Height => "height",
            RectangleField::X => "x",
            RectangleField::Y => "y",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rectangle {
    id: i64,
    width: i64,
    height: i64,
    x: i64,
    y: i64,
}

impl Rectangle {
    /// Creates a rectangle with the next id from `ids`
    ///
    /// The id is drawn before validation, so a rejected construction still
    /// consumes one.
    pub fn new(
        ids: &IdGenerator,
        width: i64,
        height: i64,
        x: i64,
        y: i64,
    ) -> Result<Self, ShapeError> {
        Self::with_id(ids.next_id()?, width, height, x, y)
    }

    /// Creates a rectangle with an explicit id
    pub fn with_id(id: i64, width: i64, height: i64, x: i64, y: i64) -> Result<Self, ShapeError> {
        let mut rect = Self::unit(id, 0);
        rect.set_width(width)?;
        rect.set_height(height)?;
        rect.set_x(x)?;
        rect.set_y(y)?;
        Ok(rect)
    }

    /// 1x1 rectangle at `(x, 0)`
    pub(super) fn unit(id: i64, x: i64) -> Self {
        Self {
            id,
            width: 1,
            height: 1,
            x,
            y: 0,
        }
    }

    pub fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    pub fn set_width(&mut self, width: i64) -> Result<(), ShapeError> {
        self.width = positive("width", width)?;
        Ok(())
    }

    pub fn set_height(&mut self, height: i64) -> Result<(), ShapeError> {
        self.height = positive("height", height)?;
        Ok(())
    }

    pub fn set_x(&mut self, x: i64) -> Result<(), ShapeError> {
        self.x = non_negative("x", x)?;
        Ok(())
    }

    pub fn set_y(&mut self, y: i64) -> Result<(), ShapeError> {
        self.y = non_negative("y", y)?;
        Ok(())
    }
}

impl Shape for Rectangle {
    type Field = RectangleField;

    const TYPE_NAME: &'static str = "Rectangle";

    fn template(ids: &IdGenerator) -> Result<Self, ShapeError> {
        Ok(Self::unit(ids.next_id()?, 1))
    }

    fn id(&self) -> i64 {
        self.id
    }

    fn width(&self) -> i64 {
        self.width
    }

    fn height(&self) -> i64 {
        self.height
    }

    fn x(&self) -> i64 {
        self.x
    }

    fn y(&self) -> i64 {
        self.y
    }

    fn get(&self, field: RectangleField) -> i64 {
        match field {
            RectangleField::Id => self.id,
            RectangleField::Width => self.width,
            RectangleField::Height => self.height,
            RectangleField::X => self.x,
            RectangleField::Y => self.y,
        }
    }

    fn set(&mut self, field: RectangleField, value: i64) -> Result<(), ShapeError> {
        match field {
            RectangleField::Id => {
                self.set_id(value);
                Ok(())
            }
            RectangleField::Width => self.set_width(value),
            RectangleField::Height => self.set_height(value),
            RectangleField::X => self.set_x(value),
            RectangleField::Y => self.set_y(value),
        }
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {}/{} - {}/{}",
            Self::TYPE_NAME,
            self.id,
            self.x,
            self.y,
            self.width,
            self.height
        )
    }
}
