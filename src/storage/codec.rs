//! Text codecs for shape collections
//!
//! Shapes travel through their dictionary form ([`ShapeDict`]):
//!
//! - JSON: an array of objects, one per shape, keys as produced by
//!   [`Shape::to_dict`]
//! - CSV: one line per shape, values in the type's field order, no header
//!
//! Turning dictionaries back into shapes always goes through [`Shape::create`],
//! so restored shapes are validated exactly like hand-built ones.

use serde_json::Value;
use thiserror::Error;

use crate::domain::{IdGenerator, Shape, ShapeDict, ShapeError, ShapeField};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Malformed JSON")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON array of objects")]
    NotAnArray,

    #[error("Entry {index} is not a JSON object")]
    NotAnObject { index: usize },

    #[error("Line {line}: {message}")]
    Csv { line: usize, message: String },

    #[error("Entry {index} is not a valid shape")]
    Shape {
        index: usize,
        #[source]
        source: ShapeError,
    },
}

/// Serializes a list of dictionaries as a JSON array
///
/// Absent and empty input both give `"[]"`.
pub fn to_json_string(dicts: Option<&[ShapeDict]>) -> Result<String, CodecError> {
    match dicts {
        None | Some([]) => Ok("[]".to_string()),
        Some(dicts) => Ok(serde_json::to_string(dicts)?),
    }
}

/// Parses a JSON array of objects
///
/// Absent, empty and whitespace-only text all give an empty list.
pub fn from_json_string(text: Option<&str>) -> Result<Vec<ShapeDict>, CodecError> {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return Ok(Vec::new()),
    };

    let value: Value = serde_json::from_str(text)?;
    let Value::Array(items) = value else {
        return Err(CodecError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(map) => Ok(map),
            _ => Err(CodecError::NotAnObject { index }),
        })
        .collect()
}

/// Dictionary form of every shape, order preserved
pub fn to_dicts<S: Shape>(shapes: &[S]) -> Vec<ShapeDict> {
    shapes.iter().map(Shape::to_dict).collect()
}

/// Builds one shape per dictionary via [`Shape::create`]
pub fn from_dicts<S: Shape>(ids: &IdGenerator, dicts: &[ShapeDict]) -> Result<Vec<S>, CodecError> {
    dicts
        .iter()
        .enumerate()
        .map(|(index, dict)| {
            S::create(ids, dict).map_err(|source| CodecError::Shape { index, source })
        })
        .collect()
}

/// One CSV line per shape, each terminated by `\n`
pub fn to_csv_string<S: Shape>(shapes: &[S]) -> String {
    shapes
        .iter()
        .map(|s| format!("{}\n", s.to_csv_record()))
        .collect()
}

/// Parses CSV text written by [`to_csv_string`] into dictionaries
///
/// Blank lines are skipped. Line numbers in errors are 1-based.
pub fn from_csv_string<S: Shape>(text: &str) -> Result<Vec<ShapeDict>, CodecError> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| parse_csv_record::<S>(i + 1, line))
        .collect()
}

fn parse_csv_record<S: Shape>(line: usize, record: &str) -> Result<ShapeDict, CodecError> {
    let fields = S::Field::ALL;
    let cells: Vec<&str> = record.split(',').map(str::trim).collect();

    if cells.len() != fields.len() {
        return Err(CodecError::Csv {
            line,
            message: format!(
                "expected {} values for {}, got {}",
                fields.len(),
                S::TYPE_NAME,
                cells.len()
            ),
        });
    }

    fields
        .iter()
        .zip(cells)
        .map(|(field, cell)| {
            let value: i64 = cell.parse().map_err(|_| CodecError::Csv {
                line,
                message: format!("{} must be an integer, got '{}'", field.error_name(), cell),
            })?;
            Ok((field.name().to_string(), Value::from(value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Rectangle, Square};
    use serde_json::json;

    fn sample_rectangles() -> Vec<Rectangle> {
        vec![
            Rectangle::with_id(1, 10, 7, 2, 8).unwrap(),
            Rectangle::with_id(2, 2, 4, 0, 0).unwrap(),
        ]
    }

    #[test]
    fn empty_and_absent_lists_encode_as_empty_array() {
        assert_eq!(to_json_string(None).unwrap(), "[]");
        assert_eq!(to_json_string(Some(&[])).unwrap(), "[]");
    }

    #[test]
    fn encodes_dicts_in_order() {
        let dicts = to_dicts(&sample_rectangles());
        let text = to_json_string(Some(&dicts)).unwrap();

        assert_eq!(
            text,
            r#"[{"id":1,"width":10,"height":7,"x":2,"y":8},{"id":2,"width":2,"height":4,"x":0,"y":0}]"#
        );
    }

    #[test]
    fn empty_and_absent_text_decode_as_empty_list() {
        assert!(from_json_string(None).unwrap().is_empty());
        assert!(from_json_string(Some("")).unwrap().is_empty());
        assert!(from_json_string(Some("  \n")).unwrap().is_empty());
        assert!(from_json_string(Some("[]")).unwrap().is_empty());
    }

    #[test]
    fn json_roundtrip() {
        let dicts = to_dicts(&sample_rectangles());
        let text = to_json_string(Some(&dicts)).unwrap();

        assert_eq!(from_json_string(Some(&text)).unwrap(), dicts);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = from_json_string(Some("[{\"id\": 1,")).unwrap_err();
        assert!(matches!(err, CodecError::Json(_)));
    }

    #[test]
    fn non_array_json_is_an_error() {
        let err = from_json_string(Some(r#"{"id": 1}"#)).unwrap_err();
        assert!(matches!(err, CodecError::NotAnArray));

        let err = from_json_string(Some(r#"[{"id": 1}, 2]"#)).unwrap_err();
        assert!(matches!(err, CodecError::NotAnObject { index: 1 }));
    }

    #[test]
    fn from_dicts_builds_shapes() {
        let ids = IdGenerator::new();
        let dicts = vec![json!({"id": 9, "size": 3}).as_object().unwrap().clone()];
        let squares: Vec<Square> = from_dicts(&ids, &dicts).unwrap();

        assert_eq!(squares, vec![Square::with_id(9, 3, 0, 0).unwrap()]);
    }

    #[test]
    fn from_dicts_reports_failing_entry() {
        let ids = IdGenerator::new();
        let dicts = vec![
            json!({"id": 1, "size": 3}).as_object().unwrap().clone(),
            json!({"id": 2, "size": 0}).as_object().unwrap().clone(),
        ];
        let err = from_dicts::<Square>(&ids, &dicts).unwrap_err();

        assert!(matches!(
            err,
            CodecError::Shape {
                index: 1,
                source: ShapeError::MustBePositive { field: "width" }
            }
        ));
    }

    #[test]
    fn csv_lines_follow_field_order() {
        let squares = vec![
            Square::with_id(1, 5, 0, 0).unwrap(),
            Square::with_id(2, 7, 9, 1).unwrap(),
        ];
        assert_eq!(to_csv_string(&squares), "1,5,0,0\n2,7,9,1\n");
        assert_eq!(to_csv_string::<Square>(&[]), "");
    }

    #[test]
    fn csv_roundtrip() {
        let ids = IdGenerator::new();
        let rects = sample_rectangles();

        let dicts = from_csv_string::<Rectangle>(&to_csv_string(&rects)).unwrap();
        let restored: Vec<Rectangle> = from_dicts(&ids, &dicts).unwrap();

        assert_eq!(restored, rects);
    }

    #[test]
    fn csv_skips_blank_lines_and_trims_cells() {
        let dicts = from_csv_string::<Square>("\n 1, 5 ,0,0\n\n2,3,1,1\n").unwrap();
        assert_eq!(dicts.len(), 2);
        assert_eq!(dicts[0].get("size"), Some(&json!(5)));
    }

    #[test]
    fn csv_wrong_column_count_is_an_error() {
        let err = from_csv_string::<Rectangle>("1,2,3,4,5\n1,2,3,4\n").unwrap_err();
        match err {
            CodecError::Csv { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("expected 5 values"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn csv_non_integer_cell_is_an_error() {
        let err = from_csv_string::<Square>("1,big,0,0").unwrap_err();
        assert_eq!(err.to_string(), "Line 1: width must be an integer, got 'big'");
    }
}
