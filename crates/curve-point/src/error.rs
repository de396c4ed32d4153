use thiserror::Error;

/// Errors raised while constructing a [`crate::Point`] from untyped input.
///
/// Query and conversion operations on already-constructed points never fail;
/// this type only guards the ingestion boundary (§4.1, §7 of the design).
#[derive(Debug, Error, PartialEq)]
pub enum PointError {
    #[error("point tuple has arity {arity}, expected 3 or 4")]
    InvalidArity { arity: usize },

    #[error("frame value is not an integer: {value}")]
    NonIntegerFrame { value: f64 },

    #[error("coordinate field {field} is not numeric")]
    NonNumericCoordinate { field: &'static str },
}
