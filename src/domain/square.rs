//! Square domain model
//!
//! A square wraps a [`Rectangle`] and only ever writes width and height
//! together, through `size`.

use std::fmt;

use super::id::IdGenerator;
use super::rectangle::Rectangle;
use super::shape::{positive, Shape, ShapeError, ShapeField};

/// Fields of a [`Square`] in canonical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareField {
    Id,
    Size,
    X,
    Y,
}

impl ShapeField for SquareField {
    const ALL: &'static [Self] = &[
        SquareField::Id,
        SquareField::Size,
        SquareField::X,
        SquareField::Y,
    ];

    fn name(self) -> &'static str {
        match self {
            SquareField::Id => "id",
            SquareField::Size => "size",
            SquareField::X => "x",
            SquareField::Y => "y",
        }
    }

    fn error_name(self) -> &'static str {
        match self {
            SquareField::Size => "width",
            other => other.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    rect: Rectangle,
}

impl Square {
    /// Creates a square with the next id from `ids`
    pub fn new(ids: &IdGenerator, size: i64, x: i64, y: i64) -> Result<Self, ShapeError> {
        Self::with_id(ids.next_id()?, size, x, y)
    }

    /// Creates a square with an explicit id
    pub fn with_id(id: i64, size: i64, x: i64, y: i64) -> Result<Self, ShapeError> {
        Ok(Self {
            rect: Rectangle::with_id(id, size, size, x, y)?,
        })
    }

    pub fn size(&self) -> i64 {
        self.rect.width()
    }

    /// Sets width and height together
    ///
    /// Validated as a width, so errors read `width must be > 0` and
    /// `width must be an integer`.
    pub fn set_size(&mut self, size: i64) -> Result<(), ShapeError> {
        let size = positive("width", size)?;
        self.rect.set_width(size)?;
        self.rect.set_height(size)
    }

    pub fn set_id(&mut self, id: i64) {
        self.rect.set_id(id);
    }

    pub fn set_x(&mut self, x: i64) -> Result<(), ShapeError> {
        self.rect.set_x(x)
    }

    pub fn set_y(&mut self, y: i64) -> Result<(), ShapeError> {
        self.rect.set_y(y)
    }
}

impl Shape for Square {
    type Field = SquareField;

    const TYPE_NAME: &'static str = "Square";

    fn template(ids: &IdGenerator) -> Result<Self, ShapeError> {
        Ok(Self {
            rect: Rectangle::unit(ids.next_id()?, 0),
        })
    }

    fn id(&self) -> i64 {
        self.rect.id()
    }

    fn width(&self) -> i64 {
        self.rect.width()
    }

    fn height(&self) -> i64 {
        self.rect.height()
    }

    fn x(&self) -> i64 {
        self.rect.x()
    }

    fn y(&self) -> i64 {
        self.rect.y()
    }

    fn get(&self, field: SquareField) -> i64 {
        match field {
            SquareField::Id => self.id(),
            SquareField::Size => self.size(),
            SquareField::X => self.x(),
            SquareField::Y => self.y(),
        }
    }

    fn set(&mut self, field: SquareField, value: i64) -> Result<(), ShapeError> {
        match field {
            SquareField::Id => {
                self.set_id(value);
                Ok(())
            }
            SquareField::Size => self.set_size(value),
            SquareField::X => self.set_x(value),
            SquareField::Y => self.set_y(value),
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ({}) {}/{} - {}",
            Self::TYPE_NAME,
            self.id(),
            self.x(),
            self.y(),
            self.size()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::domain::ShapeDict;

    fn dict(value: serde_json::Value) -> ShapeDict {
        value.as_object().unwrap().clone()
    }

    #[test]
    fn text_form_with_defaults() {
        let ids = IdGenerator::new();
        let square = Square::new(&ids, 5, 0, 0).unwrap();
        assert_eq!(square.to_string(), "[Square] (1) 0/0 - 5");
    }

    #[test]
    fn text_form_with_offsets() {
        let square = Square::with_id(7, 3, 1, 3).unwrap();
        assert_eq!(square.to_string(), "[Square] (7) 1/3 - 3");
    }

    #[test]
    fn shares_id_counter_with_rectangles() {
        let ids = IdGenerator::new();
        let r = Rectangle::new(&ids, 2, 3, 0, 0).unwrap();
        let s = Square::new(&ids, 2, 0, 0).unwrap();

        assert_eq!(r.id(), 1);
        assert_eq!(s.id(), 2);
    }

    #[test]
    fn size_writes_width_and_height() {
        let mut square = Square::with_id(1, 5, 0, 0).unwrap();
        square.set_size(10).unwrap();

        assert_eq!(square.size(), 10);
        assert_eq!(square.width(), 10);
        assert_eq!(square.height(), 10);
        assert_eq!(square.area(), 100);
    }

    #[test]
    fn size_validated_as_width() {
        let mut square = Square::with_id(1, 5, 0, 0).unwrap();

        let err = square.set_size(0).unwrap_err();
        assert_eq!(err.to_string(), "width must be > 0");
        assert_eq!(square.size(), 5);

        assert_eq!(
            Square::with_id(1, -1, 0, 0),
            Err(ShapeError::MustBePositive { field: "width" })
        );
    }

    #[test]
    fn non_integer_size_is_reported_as_width() {
        let mut square = Square::with_id(1, 5, 0, 0).unwrap();
        let err = square.update_named(&dict(json!({"size": "9"}))).unwrap_err();

        assert_eq!(err, ShapeError::NotInteger { field: "width" });
        assert_eq!(err.to_string(), "width must be an integer");
        assert_eq!(square.size(), 5);
    }

    #[test]
    fn render() {
        let square = Square::with_id(1, 2, 1, 1).unwrap();
        assert_eq!(square.render().unwrap(), "\n ##\n ##\n");
    }

    #[test]
    fn positional_update_uses_four_slots() {
        let mut square = Square::with_id(1, 5, 0, 0).unwrap();
        square.update(&[10, 2, 3, 4, 99], &ShapeDict::new()).unwrap();

        assert_eq!(square.to_string(), "[Square] (10) 3/4 - 2");
    }

    #[test]
    fn partial_positional_update() {
        let mut square = Square::with_id(1, 5, 2, 2).unwrap();
        square.update(&[8, 4], &ShapeDict::new()).unwrap();

        assert_eq!(square.to_string(), "[Square] (8) 2/2 - 4");
    }

    #[test]
    fn named_update() {
        let mut square = Square::with_id(1, 5, 0, 0).unwrap();
        square
            .update(&[], &dict(json!({"x": 12, "size": 7, "y": 1})))
            .unwrap();

        assert_eq!(square.to_string(), "[Square] (1) 12/1 - 7");
    }

    #[test]
    fn named_update_rejects_rectangle_only_fields() {
        let mut square = Square::with_id(1, 5, 0, 0).unwrap();
        let err = square.update_named(&dict(json!({"width": 3}))).unwrap_err();

        assert_eq!(
            err,
            ShapeError::UnknownField {
                shape: "Square",
                field: "width".to_string()
            }
        );
        assert_eq!(square.width(), square.height());
    }

    #[test]
    fn to_dict() {
        let square = Square::with_id(1, 10, 2, 1).unwrap();
        let d = square.to_dict();

        let keys: Vec<_> = d.keys().map(String::as_str).collect();
        assert_eq!(keys, ["id", "size", "x", "y"]);
        assert_eq!(
            serde_json::Value::Object(d),
            json!({"id": 1, "size": 10, "x": 2, "y": 1})
        );
    }

    #[test]
    fn create_from_dict_roundtrip() {
        let ids = IdGenerator::new();
        let square = Square::with_id(4, 6, 3, 1).unwrap();
        assert_eq!(Square::create(&ids, &square.to_dict()).unwrap(), square);
    }

    #[test]
    fn template_sits_at_origin() {
        let ids = IdGenerator::new();
        let square = Square::template(&ids).unwrap();
        assert_eq!(square.to_string(), "[Square] (1) 0/0 - 1");
    }

    #[test]
    fn csv_record() {
        let square = Square::with_id(3, 10, 0, 8).unwrap();
        assert_eq!(square.to_csv_record(), "3,10,0,8");
    }
}
