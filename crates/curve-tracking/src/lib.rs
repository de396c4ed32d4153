//! Tracking-direction update rules and the endframe/keyframe toggle used by
//! interactive edits. Both operate on plain `&[Point]` slices and return new
//! `Vec<Point>`s — neither depends on `curve-segments`, since the resulting
//! change in segment activity is a consequence of rebuilding a
//! `SegmentedCurve` from the result, not something this crate computes.

mod direction;
mod rules;
mod toggle;

pub use direction::TrackingDirection;
pub use rules::{apply_backward, apply_bidirectional, apply_forward, has_valid_position, update_for_direction};
pub use toggle::toggle_status;
