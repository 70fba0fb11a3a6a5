//! Behaviour shared by every shape type
//!
//! A shape is an identified, axis-aligned box on a character grid. Concrete
//! types declare a closed set of fields ([`ShapeField`]) and how to read and
//! validate-then-write each one. Everything else (area, rendering, bulk update,
//! dictionary and CSV forms) is derived from that in [`Shape`].

use std::fmt;

use serde_json::{Map, Value};
use thiserror::Error;

use super::id::{IdError, IdGenerator};

/// Flat attribute-name → value mapping used as the serialization intermediate
pub type ShapeDict = Map<String, Value>;

/// Upper bound on the size of a rendering, in bytes
pub const MAX_RENDER_BYTES: u64 = 1 << 26;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("{field} must be an integer")]
    NotInteger { field: &'static str },

    #[error("{field} must be > 0")]
    MustBePositive { field: &'static str },

    #[error("{field} must be >= 0")]
    MustBeNonNegative { field: &'static str },

    #[error("{shape} has no attribute '{field}'")]
    UnknownField { shape: &'static str, field: String },

    #[error("{shape} ({id}) is too large to render")]
    TooLargeToRender { shape: &'static str, id: i64 },

    #[error(transparent)]
    Id(#[from] IdError),
}

impl ShapeError {
    /// Returns true for errors caused by a value of the wrong type
    pub fn is_type_error(&self) -> bool {
        matches!(self, ShapeError::NotInteger { .. })
    }

    /// Returns true for errors caused by an integer outside its allowed range
    pub fn is_range_error(&self) -> bool {
        matches!(
            self,
            ShapeError::MustBePositive { .. } | ShapeError::MustBeNonNegative { .. }
        )
    }
}

/// Validates a dimension (width, height, size): must be > 0
pub(crate) fn positive(field: &'static str, value: i64) -> Result<i64, ShapeError> {
    if value <= 0 {
        return Err(ShapeError::MustBePositive { field });
    }
    Ok(value)
}

/// Validates an offset (x, y): must be >= 0
pub(crate) fn non_negative(field: &'static str, value: i64) -> Result<i64, ShapeError> {
    if value < 0 {
        return Err(ShapeError::MustBeNonNegative { field });
    }
    Ok(value)
}

/// Extracts an integer from a dynamic value
///
/// Floats, strings, booleans and null are all rejected, even `2.0`.
pub fn as_integer(field: &'static str, value: &Value) -> Result<i64, ShapeError> {
    value.as_i64().ok_or(ShapeError::NotInteger { field })
}

/// A named attribute of a shape type
///
/// `ALL` is the canonical order: positional bulk update, dictionary keys and
/// CSV columns all follow it.
pub trait ShapeField: Copy + Eq + fmt::Debug + 'static {
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    /// Field name reported by validation errors
    ///
    /// Defaults to [`ShapeField::name`]; a field that is validated as another
    /// one (a square's `size` as `width`) reports that one instead.
    fn error_name(self) -> &'static str {
        self.name()
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }
}

/// An identified shape with validated geometry
pub trait Shape: Clone + fmt::Display {
    type Field: ShapeField;

    /// Type name used in text form and as the persistence file stem
    const TYPE_NAME: &'static str;

    /// Fresh instance that [`Shape::create`] applies a mapping onto
    fn template(ids: &IdGenerator) -> Result<Self, ShapeError>;

    fn id(&self) -> i64;
    fn width(&self) -> i64;
    fn height(&self) -> i64;
    fn x(&self) -> i64;
    fn y(&self) -> i64;

    /// Reads a field
    fn get(&self, field: Self::Field) -> i64;

    /// Validates and writes a field; on error the shape is unchanged
    fn set(&mut self, field: Self::Field, value: i64) -> Result<(), ShapeError>;

    /// Width times height, widened so that no valid shape overflows
    fn area(&self) -> i128 {
        i128::from(self.width()) * i128::from(self.height())
    }

    /// Character-grid rendering using `#`
    fn render(&self) -> Result<String, ShapeError> {
        self.render_with('#')
    }

    /// Character-grid rendering: `y` empty lines, then `height` rows of `x`
    /// spaces followed by `width` marks
    ///
    /// Renderings larger than [`MAX_RENDER_BYTES`] are refused.
    fn render_with(&self, mark: char) -> Result<String, ShapeError> {
        let too_large = || ShapeError::TooLargeToRender {
            shape: Self::TYPE_NAME,
            id: self.id(),
        };

        let row_bytes = (self.width() as u64)
            .checked_mul(mark.len_utf8() as u64)
            .and_then(|marks| marks.checked_add(self.x() as u64 + 1))
            .ok_or_else(too_large)?;
        let total = row_bytes
            .checked_mul(self.height() as u64)
            .and_then(|rows| rows.checked_add(self.y() as u64))
            .filter(|&total| total <= MAX_RENDER_BYTES)
            .ok_or_else(too_large)?;

        let offset = " ".repeat(self.x() as usize);
        let row = mark.to_string().repeat(self.width() as usize);

        let mut out = String::with_capacity(total as usize);
        out.push_str(&"\n".repeat(self.y() as usize));
        for _ in 0..self.height() {
            out.push_str(&offset);
            out.push_str(&row);
            out.push('\n');
        }
        Ok(out)
    }

    /// Prints [`Shape::render`] to stdout
    fn display(&self) -> Result<(), ShapeError> {
        print!("{}", self.render()?);
        Ok(())
    }

    /// Assigns `args` to the fields in canonical order
    ///
    /// Extra values are ignored; missing ones leave their fields untouched.
    /// Either every assignment succeeds or the shape is left as it was.
    fn update_positional(&mut self, args: &[i64]) -> Result<(), ShapeError> {
        let mut staged = self.clone();
        for (field, value) in Self::Field::ALL.iter().zip(args) {
            staged.set(*field, *value)?;
        }
        *self = staged;
        Ok(())
    }

    /// Assigns each entry of `named` to the field with the same name
    ///
    /// Unknown names are rejected. Either every assignment succeeds or the
    /// shape is left as it was.
    fn update_named(&mut self, named: &ShapeDict) -> Result<(), ShapeError> {
        let mut staged = self.clone();
        for (key, value) in named {
            let field = Self::Field::from_name(key).ok_or_else(|| ShapeError::UnknownField {
                shape: Self::TYPE_NAME,
                field: key.clone(),
            })?;
            staged.set(field, as_integer(field.error_name(), value)?)?;
        }
        *self = staged;
        Ok(())
    }

    /// Bulk update: positional arguments win when any are given, otherwise
    /// the named ones are applied
    fn update(&mut self, args: &[i64], named: &ShapeDict) -> Result<(), ShapeError> {
        if !args.is_empty() {
            self.update_positional(args)
        } else {
            self.update_named(named)
        }
    }

    /// Dictionary form, keys in canonical field order
    fn to_dict(&self) -> ShapeDict {
        Self::Field::ALL
            .iter()
            .map(|f| (f.name().to_string(), Value::from(self.get(*f))))
            .collect()
    }

    /// Builds a shape by applying `dict` onto [`Shape::template`]
    ///
    /// The template's id is drawn from `ids` and kept when `dict` has no `id`.
    fn create(ids: &IdGenerator, dict: &ShapeDict) -> Result<Self, ShapeError> {
        let mut shape = Self::template(ids)?;
        shape.update_named(dict)?;
        Ok(shape)
    }

    /// Comma-joined field values in canonical order
    fn to_csv_record(&self) -> String {
        Self::Field::ALL
            .iter()
            .map(|f| self.get(*f).to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}
