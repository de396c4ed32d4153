use curve_point::{Point, Status};

/// Replaces the status of `points[index]`, preserving its frame and
/// coordinates. This is the only primitive interactive edits need for the
/// endframe↔keyframe toggle described in §4.3 — the resulting change in
/// segment activity is a consequence of rebuilding a `SegmentedCurve` from
/// the returned list, not something this crate computes itself (kept
/// deliberately independent of the segmentation engine).
///
/// Out-of-range indices are a caller bug, not a recoverable condition —
/// this returns `None` rather than panicking so callers driven by
/// untrusted indices (e.g. a UI selection that raced an edit) can report
/// it instead of crashing.
pub fn toggle_status(points: &[Point], index: usize, new_status: Status) -> Option<Vec<Point>> {
    if index >= points.len() {
        return None;
    }
    let mut updated = points.to_vec();
    updated[index] = updated[index].with_status(new_status);
    Some(updated)
}
