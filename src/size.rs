//! Size-argument normalization.
//!
//! A resize target can be given in three shapes, all reduced to one canonical
//! [`Size`]:
//!
//! | Shape | Example (JSON) | Canonical size |
//! |---|---|---|
//! | Mapping | `{"width": 200, "height": 150}` | `200 × 150` |
//! | Pair | `[200, 150]` | `200 × 150` |
//! | Square | `200` | `200 × 200` |
//!
//! Resolution only checks *shape* and *type*. A size that resolves to zero or
//! negative dimensions is still a valid [`Size`]; positivity is a precondition
//! checked later by [`check`](crate::check), so "could not resolve" and
//! "resolved but unusable" stay distinguishable.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizeError {
    /// The argument is not a mapping, a pair, or an integer.
    #[error("Size must be a mapping, a pair or an integer, got {0}")]
    BadSizeType(Value),
    /// The argument has the right shape but the wrong contents.
    #[error("Invalid size: {0}")]
    InvalidSize(String),
    /// A mapping without one of the required keys.
    #[error("Cannot determine image size: missing '{0}'")]
    SizeResolution(&'static str),
}

/// Canonical target size. Values are not guaranteed positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: i64,
    pub height: i64,
}

impl Size {
    pub fn new(width: i64, height: i64) -> Self {
        Self { width, height }
    }

    pub fn square(side: i64) -> Self {
        Self::new(side, side)
    }

    /// True when both dimensions are strictly positive.
    pub fn is_positive(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A size argument in one of the three accepted shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeArg {
    /// Keys `width` and `height`; other keys are ignored.
    Mapping(Map<String, Value>),
    /// Exactly two integers, `[width, height]`.
    Pair(Vec<Value>),
    /// One integer used for both sides.
    Square(i64),
}

impl SizeArg {
    /// Classify a loosely typed value by shape.
    ///
    /// Only the outer shape is inspected here; element types are checked by
    /// [`resolve`](Self::resolve).
    pub fn from_value(value: Value) -> Result<Self, SizeError> {
        match value {
            Value::Object(map) => Ok(Self::Mapping(map)),
            Value::Array(items) => Ok(Self::Pair(items)),
            Value::Number(ref n) => match n.as_i64() {
                Some(side) => Ok(Self::Square(side)),
                None => Err(SizeError::BadSizeType(value)),
            },
            other => Err(SizeError::BadSizeType(other)),
        }
    }

    /// Reduce to the canonical `(width, height)` pair.
    pub fn resolve(&self) -> Result<Size, SizeError> {
        match self {
            Self::Mapping(map) => resolve_mapping(map),
            Self::Pair(items) => resolve_pair(items),
            Self::Square(side) => Ok(Size::square(*side)),
        }
    }
}

impl From<(i64, i64)> for SizeArg {
    fn from((width, height): (i64, i64)) -> Self {
        Self::Pair(vec![Value::from(width), Value::from(height)])
    }
}

impl From<i64> for SizeArg {
    fn from(side: i64) -> Self {
        Self::Square(side)
    }
}

fn resolve_mapping(map: &Map<String, Value>) -> Result<Size, SizeError> {
    let width = map.get("width").ok_or(SizeError::SizeResolution("width"))?;
    let height = map.get("height").ok_or(SizeError::SizeResolution("height"))?;
    Ok(Size::new(
        integer(width, "width")?,
        integer(height, "height")?,
    ))
}

fn resolve_pair(items: &[Value]) -> Result<Size, SizeError> {
    match items {
        [width, height] => Ok(Size::new(
            integer(width, "width")?,
            integer(height, "height")?,
        )),
        _ => Err(SizeError::InvalidSize(format!(
            "a size pair needs exactly two integers, got {} elements",
            items.len()
        ))),
    }
}

fn integer(value: &Value, field: &str) -> Result<i64, SizeError> {
    value
        .as_i64()
        .ok_or_else(|| SizeError::InvalidSize(format!("'{field}' must be an integer, got {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn resolve(value: Value) -> Result<Size, SizeError> {
        SizeArg::from_value(value)?.resolve()
    }

    #[test]
    fn mapping_resolves_to_width_and_height() {
        let size = resolve(json!({"width": 200, "height": 150})).unwrap();
        assert_eq!(size, Size::new(200, 150));
    }

    #[test]
    fn mapping_ignores_extra_keys() {
        let size = resolve(json!({"width": 20, "height": 10, "quality": 80})).unwrap();
        assert_eq!(size, Size::new(20, 10));
    }

    #[test]
    fn pair_resolves_in_order() {
        assert_eq!(resolve(json!([200, 150])).unwrap(), Size::new(200, 150));
    }

    #[test]
    fn scalar_resolves_to_square() {
        assert_eq!(resolve(json!(200)).unwrap(), Size::new(200, 200));
    }

    #[test]
    fn tuple_and_integer_conversions() {
        assert_eq!(SizeArg::from((5, 7)).resolve().unwrap(), Size::new(5, 7));
        assert_eq!(SizeArg::Square(9).resolve().unwrap(), Size::square(9));
    }

    #[test]
    fn missing_height_is_resolution_error() {
        let err = resolve(json!({"width": 200})).unwrap_err();
        assert_eq!(err, SizeError::SizeResolution("height"));
    }

    #[test]
    fn missing_width_is_resolution_error() {
        let err = resolve(json!({"height": 200})).unwrap_err();
        assert_eq!(err, SizeError::SizeResolution("width"));
    }

    #[test]
    fn non_integer_mapping_value_is_invalid() {
        let err = resolve(json!({"width": "200", "height": 150})).unwrap_err();
        assert!(matches!(err, SizeError::InvalidSize(_)));
    }

    #[test]
    fn pair_of_wrong_length_is_invalid() {
        assert!(matches!(
            resolve(json!([1, 2, 3])).unwrap_err(),
            SizeError::InvalidSize(_)
        ));
        assert!(matches!(
            resolve(json!([1])).unwrap_err(),
            SizeError::InvalidSize(_)
        ));
    }

    #[test]
    fn pair_with_float_is_invalid() {
        let err = resolve(json!([1.5, 2])).unwrap_err();
        assert!(matches!(err, SizeError::InvalidSize(_)));
    }

    #[test]
    fn string_is_bad_type_and_keeps_value() {
        let err = resolve(json!("200x150")).unwrap_err();
        assert_eq!(err, SizeError::BadSizeType(json!("200x150")));
    }

    #[test]
    fn float_scalar_is_bad_type() {
        let err = resolve(json!(200.5)).unwrap_err();
        assert_eq!(err, SizeError::BadSizeType(json!(200.5)));
    }

    #[test]
    fn null_and_bool_are_bad_types() {
        assert!(matches!(resolve(Value::Null), Err(SizeError::BadSizeType(_))));
        assert!(matches!(resolve(json!(true)), Err(SizeError::BadSizeType(_))));
    }

    #[test]
    fn non_positive_values_still_resolve() {
        assert_eq!(resolve(json!([-1, 5])).unwrap(), Size::new(-1, 5));
        assert!(!Size::new(-1, 5).is_positive());
        assert!(!Size::square(0).is_positive());
        assert!(Size::new(1, 1).is_positive());
    }

    #[test]
    fn display_is_width_x_height() {
        assert_eq!(Size::new(200, 150).to_string(), "200x150");
    }
}
