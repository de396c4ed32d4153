use curve_point::{Point, Status};
use tracing::debug;

use crate::direction::TrackingDirection;

/// A position is valid when it isn't the `(-1, -1)` sentinel for "no
/// tracking data". Out-of-range indices are never valid.
pub fn has_valid_position(points: &[Point], index: usize) -> bool {
    match points.get(index) {
        Some(p) => p.x != -1.0 || p.y != -1.0,
        None => false,
    }
}

/// Applies the forward-tracking rules to every `Keyframe`/`Normal`/`Endframe`
/// point with a valid position of its own: an `Endframe` followed by valid
/// data becomes a `Keyframe`; a `Keyframe` or `Normal` point followed by
/// invalid data becomes an `Endframe`. `Normal` is keyframe-eligible here
/// because a point that ingested from a bare 3-tuple (no status field) is
/// indistinguishable from a genuine `Normal` point, and both are meant to
/// take part in the sweep. `Interpolated` points, or any point with an
/// invalid position of its own, are left untouched.
pub fn apply_forward(points: &[Point]) -> Vec<Point> {
    apply_directional(points, |i| i + 1)
}

/// Symmetric to [`apply_forward`], checking the previous index instead.
pub fn apply_backward(points: &[Point]) -> Vec<Point> {
    apply_directional(points, |i| i.checked_sub(1).unwrap_or(usize::MAX))
}

/// No change unless `previous_direction` was `Backward`, in which case the
/// forward rules are applied once. Transitioning from `Forward` to
/// `Bidirectional` is a no-op.
pub fn apply_bidirectional(points: &[Point], previous_direction: TrackingDirection) -> Vec<Point> {
    if previous_direction != TrackingDirection::Backward {
        debug!(target: "curve_tracking::rules", "bidirectional: no previous-direction trigger, no-op");
        return points.to_vec();
    }
    apply_forward(points)
}

/// Dispatches to the rule set for `new_direction`. `previous_direction` is
/// only consulted for `Bidirectional`.
pub fn update_for_direction(
    points: &[Point],
    new_direction: TrackingDirection,
    previous_direction: Option<TrackingDirection>,
) -> Vec<Point> {
    match new_direction {
        TrackingDirection::Forward => apply_forward(points),
        TrackingDirection::Backward => apply_backward(points),
        TrackingDirection::Bidirectional => {
            apply_bidirectional(points, previous_direction.unwrap_or(TrackingDirection::Forward))
        }
    }
}

fn apply_directional(points: &[Point], neighbor: impl Fn(usize) -> usize) -> Vec<Point> {
    let mut updated = points.to_vec();
    let mut changes = 0usize;

    for i in 0..points.len() {
        let p = points[i];
        if !matches!(p.status, Status::Keyframe | Status::Normal | Status::Endframe) {
            continue;
        }
        if !has_valid_position(points, i) {
            continue;
        }

        let neighbor_valid = has_valid_position(points, neighbor(i));

        let new_status = match p.status {
            Status::Endframe if neighbor_valid => Some(Status::Keyframe),
            Status::Keyframe | Status::Normal if !neighbor_valid => Some(Status::Endframe),
            _ => None,
        };

        if let Some(status) = new_status {
            updated[i] = p.with_status(status);
            changes += 1;
        }
    }

    debug!(target: "curve_tracking::rules", changes, "tracking direction update applied");
    updated
}
