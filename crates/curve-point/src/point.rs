use crate::error::PointError;
use crate::status::{LegacyStatus, Status};

/// A single untyped field as it arrives from the legacy tuple boundary —
/// callers pass point lists as sequences of 3- or 4-arity tuples whose
/// elements are not statically typed on their side.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyField {
    Int(i64),
    Float(f64),
    Status(LegacyStatus),
}

impl From<i64> for LegacyField {
    fn from(value: i64) -> Self {
        LegacyField::Int(value)
    }
}

impl From<f64> for LegacyField {
    fn from(value: f64) -> Self {
        LegacyField::Float(value)
    }
}

/// The canonicalized legacy tuple shape produced by [`Point::to_legacy`]:
/// 3-arity when status is `Normal`, 4-arity (with canonical status text)
/// otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyTuple {
    Triple(i32, f64, f64),
    Quad(i32, f64, f64, &'static str),
}

/// An immutable per-sample record: frame, position, and status tag.
///
/// Mutation means replacement — `with_status`/`with_coordinates`/
/// `with_frame` each return a new `Point`, leaving `self` untouched.
/// Equality is structural.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub frame: i32,
    pub x: f64,
    pub y: f64,
    pub status: Status,
}

impl Point {
    pub fn new(frame: i32, x: f64, y: f64, status: Status) -> Self {
        Self { frame, x, y, status }
    }

    /// Builds a point from a raw field list of arity 3 or 4 — the boundary
    /// representation for data arriving as untyped tuples. A missing status
    /// field defaults to `Normal`; arity outside `3..=4` is rejected.
    pub fn from_legacy(fields: &[LegacyField]) -> Result<Self, PointError> {
        if fields.len() < 3 || fields.len() > 4 {
            return Err(PointError::InvalidArity { arity: fields.len() });
        }

        let frame = as_integer_frame(&fields[0])?;
        let x = as_coordinate(&fields[1], "x")?;
        let y = as_coordinate(&fields[2], "y")?;
        let status = match fields.get(3) {
            Some(LegacyField::Status(legacy)) => Status::from_legacy(legacy.clone()),
            Some(other) => {
                return Err(PointError::NonNumericCoordinate {
                    field: legacy_field_kind(other),
                });
            }
            None => Status::Normal,
        };

        Ok(Point::new(frame, x, y, status))
    }

    /// Produces the 3-tuple form when status is `Normal`, the 4-tuple form
    /// (status as canonical text) otherwise.
    pub fn to_legacy(&self) -> LegacyTuple {
        if self.status == Status::Normal {
            LegacyTuple::Triple(self.frame, self.x, self.y)
        } else {
            LegacyTuple::Quad(self.frame, self.x, self.y, self.status.to_legacy_string())
        }
    }

    pub fn with_status(&self, status: Status) -> Self {
        Self { status, ..*self }
    }

    pub fn with_coordinates(&self, x: f64, y: f64) -> Self {
        Self { x, y, ..*self }
    }

    pub fn with_frame(&self, frame: i32) -> Self {
        Self { frame, ..*self }
    }

    /// Euclidean distance in sample space.
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }

    pub fn is_interpolated(&self) -> bool {
        self.status == Status::Interpolated
    }

    pub fn is_keyframe(&self) -> bool {
        self.status == Status::Keyframe
    }

    pub fn is_endframe(&self) -> bool {
        self.status == Status::Endframe
    }

    /// True iff this point is a startframe: strictly `Keyframe`, with no
    /// intervening `Keyframe` between it and the last preceding terminator
    /// in `all_points` (which must be sorted by frame). The first point in
    /// a sequence is a startframe iff its status is `Keyframe` or `Tracked`.
    ///
    /// `all_points` is the full sorted sequence this point was drawn from;
    /// passed explicitly rather than held as shared state (no globals).
    pub fn is_startframe(&self, all_points: &[Point]) -> bool {
        let Some(my_index) = all_points.iter().position(|p| p == self) else {
            return false;
        };

        if my_index == 0 {
            return matches!(self.status, Status::Keyframe | Status::Tracked);
        }

        if self.status != Status::Keyframe {
            return false;
        }

        let preceding = &all_points[..my_index];
        let Some(terminator_idx) = preceding.iter().rposition(|p| p.status == Status::Endframe)
        else {
            return false;
        };

        !preceding[terminator_idx + 1..]
            .iter()
            .any(|p| p.status == Status::Keyframe)
    }
}

fn as_integer_frame(field: &LegacyField) -> Result<i32, PointError> {
    match field {
        LegacyField::Int(n) => i32::try_from(*n).map_err(|_| PointError::NonIntegerFrame {
            value: *n as f64,
        }),
        LegacyField::Float(f) if f.fract() == 0.0 => Ok(*f as i32),
        LegacyField::Float(f) => Err(PointError::NonIntegerFrame { value: *f }),
        LegacyField::Status(_) => Err(PointError::NonIntegerFrame { value: f64::NAN }),
    }
}

fn as_coordinate(field: &LegacyField, name: &'static str) -> Result<f64, PointError> {
    match field {
        LegacyField::Int(n) => Ok(*n as f64),
        LegacyField::Float(f) => Ok(*f),
        LegacyField::Status(_) => Err(PointError::NonNumericCoordinate { field: name }),
    }
}

fn legacy_field_kind(field: &LegacyField) -> &'static str {
    match field {
        LegacyField::Int(_) => "int",
        LegacyField::Float(_) => "float",
        LegacyField::Status(_) => "status",
    }
}
