//! Segmentation engine (component B): builds active/inactive segments from
//! a point list and answers position queries against them.
//!
//! [`SegmentedCurve::build`] is a pure function: a curve is always rebuilt
//! from the full edited point list rather than patched in place. The
//! mutation-driven reactivation contract (toggling a point's status
//! reopening or closing a gap) falls directly out of this — it is a
//! property of rebuilding, not a second code path, and is covered by the
//! property tests in `tests/`.

mod curve;
mod segment;

pub use curve::SegmentedCurve;
pub use segment::Segment;
