use curve_point::{Point, Status};
use tracing::trace;

use crate::segment::Segment;

/// An immutable segmentation of a point list into active/inactive runs,
/// plus the query operations defined over it.
///
/// Built once from a sorted point list by [`SegmentedCurve::build`]; any
/// edit to the underlying points produces a brand new `SegmentedCurve`
/// rather than patching this one in place (§9: "pure builder ... edit
/// layer that rebuilds").
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentedCurve {
    segments: Vec<Segment>,
    all_points: Vec<Point>,
}

impl SegmentedCurve {
    /// Builds a segmented curve from an unsorted point list.
    ///
    /// Stably sorts by frame ascending, then scans left-to-right tracking
    /// whether we are inside a gap (`in_gap`). A terminator (`Endframe`)
    /// always closes the current segment and opens the gap. The gap closes
    /// the moment a genuine startframe is encountered — a strictly
    /// `Keyframe` point with no `Keyframe` between it and the terminator
    /// that opened the gap (`Point::is_startframe`) — which may be the very
    /// next point or may arrive several `Tracked`/`Normal` points later; a
    /// `Tracked` point never reopens a gap by itself, only the first true
    /// `Keyframe` does. A segment that ends with a second terminator while
    /// still inside a gap remains inactive — the "second endframe inside a
    /// gap is still inside the gap" rule.
    pub fn build(points: &[Point]) -> Self {
        let mut all_points = points.to_vec();
        all_points.sort_by_key(|p| p.frame);

        let mut segments: Vec<Segment> = Vec::new();
        let mut current: Vec<Point> = Vec::new();
        let mut in_gap = false;

        for &p in &all_points {
            if in_gap && p.is_startframe(&all_points) {
                if !current.is_empty() {
                    segments.push(Segment::close(std::mem::take(&mut current), false));
                }
                in_gap = false;
            }

            current.push(p);

            if p.status == Status::Endframe {
                segments.push(Segment::close(std::mem::take(&mut current), !in_gap));
                in_gap = true;
            }
        }

        if !current.is_empty() {
            segments.push(Segment::close(current, !in_gap));
        }

        trace!(
            target: "curve_segments::build",
            points = all_points.len(),
            segments = segments.len(),
            "segmented curve built"
        );

        Self { segments, all_points }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn all_points(&self) -> &[Point] {
        &self.all_points
    }

    pub fn active_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| s.active)
    }

    pub fn inactive_segments(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|s| !s.active)
    }

    pub fn frame_range(&self) -> Option<(i32, i32)> {
        let first = self.segments.first()?;
        let last = self.segments.last()?;
        Some((first.start_frame, last.end_frame))
    }

    pub fn segment_at(&self, frame: i32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.contains_frame(frame))
    }

    /// Previous/next keyframe-like (`Keyframe | Tracked | Normal`)
    /// boundaries strictly bracketing `frame`, within the active segment
    /// containing it. `Interpolated` and `Endframe` never qualify. A point
    /// exactly at `frame` is not itself returned as a boundary — callers
    /// wanting the exact-frame value should check for it separately.
    pub fn interpolation_boundaries(&self, frame: i32) -> (Option<Point>, Option<Point>) {
        let Some(segment) = self.segment_at(frame) else {
            return (None, None);
        };
        if !segment.active {
            return (None, None);
        }
        let prev = segment
            .points
            .iter()
            .filter(|p| p.status.is_keyframe_like() && p.frame < frame)
            .next_back()
            .copied();
        let next = segment
            .points
            .iter()
            .filter(|p| p.status.is_keyframe_like() && p.frame > frame)
            .next()
            .copied();
        (prev, next)
    }

    /// Position at `frame`, per the rules in §4.2:
    /// 1. An exact point at `frame` is always visible at its stored
    ///    coordinates, regardless of its segment's activity.
    /// 2. Inside an active segment: linear interpolation between
    ///    bracketing keyframe-like points (or the lone available side).
    /// 3. Inside an inactive segment: the coordinates of the terminator
    ///    that opened the gap.
    /// 4. Outside every segment: the most recent terminator not since
    ///    reopened by a later startframe, else the last point in the
    ///    list if it isn't itself a terminator, else `None`.
    pub fn position_at(&self, frame: i32) -> Option<(f64, f64)> {
        if let Some(p) = self.all_points.iter().find(|p| p.frame == frame) {
            return Some((p.x, p.y));
        }

        if let Some(segment) = self.segment_at(frame) {
            return if segment.active {
                self.interpolate_within(frame)
            } else {
                self.hold_from_opening_terminator(segment)
            };
        }

        self.hold_from_last_terminator(frame)
    }

    fn interpolate_within(&self, frame: i32) -> Option<(f64, f64)> {
        match self.interpolation_boundaries(frame) {
            (Some(a), Some(b)) if a.frame != b.frame => {
                let t = (frame - a.frame) as f64 / (b.frame - a.frame) as f64;
                Some((a.x + t * (b.x - a.x), a.y + t * (b.y - a.y)))
            }
            (Some(a), Some(_)) => Some((a.x, a.y)),
            (Some(a), None) => Some((a.x, a.y)),
            (None, Some(b)) => Some((b.x, b.y)),
            (None, None) => None,
        }
    }

    fn hold_from_opening_terminator(&self, inactive_segment: &Segment) -> Option<(f64, f64)> {
        let index = self.segments.iter().position(|s| s == inactive_segment)?;
        let opening = self.segments[..index]
            .iter()
            .rev()
            .find_map(|s| s.points.last().filter(|p| p.status == Status::Endframe))?;
        Some((opening.x, opening.y))
    }

    fn hold_from_last_terminator(&self, frame: i32) -> Option<(f64, f64)> {
        let terminator = self
            .all_points
            .iter()
            .rev()
            .find(|p| p.status == Status::Endframe && p.frame <= frame);

        if let Some(term) = terminator {
            // An active segment starting after `term` and no later than
            // `frame` means the curve genuinely reopened in between; only
            // a real startframe produces an active segment there (see
            // `build`), so checking `active` alone is sufficient.
            let reopened = self
                .segments
                .iter()
                .any(|s| s.active && s.start_frame > term.frame && s.start_frame <= frame);
            if !reopened {
                return Some((term.x, term.y));
            }
        }

        match self.all_points.last() {
            Some(last) if last.status != Status::Endframe => Some((last.x, last.y)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve_point::Point;
    use pretty_assertions::assert_eq;

    fn pt(frame: i32, x: f64, y: f64, status: Status) -> Point {
        Point::new(frame, x, y, status)
    }

    #[test]
    fn no_segment_is_empty_and_ranges_are_contiguous() {
        let points = vec![
            pt(1, 0.0, 0.0, Status::Keyframe),
            pt(5, 0.0, 0.0, Status::Endframe),
            pt(10, 0.0, 0.0, Status::Tracked),
        ];
        let curve = SegmentedCurve::build(&points);
        assert!(curve.segments().iter().all(|s| !s.points.is_empty()));
        let mut last_end = i32::MIN;
        for s in curve.segments() {
            assert!(s.start_frame > last_end || last_end == i32::MIN);
            last_end = s.end_frame;
        }
    }

    #[test]
    fn scenario_1_gap_creation_via_endframe_toggle() {
        let points = vec![
            pt(1, 100.0, 100.0, Status::Keyframe),
            pt(5, 140.0, 120.0, Status::Endframe),
            pt(10, 200.0, 200.0, Status::Keyframe),
        ];
        let curve = SegmentedCurve::build(&points);
        assert_eq!(curve.position_at(6), Some((140.0, 120.0)));
        assert_eq!(curve.position_at(9), Some((140.0, 120.0)));
        assert_eq!(curve.position_at(10), Some((200.0, 200.0)));
    }

    #[test]
    fn scenario_2_interpolation_inside_active_segment() {
        let points = vec![
            pt(1, 100.0, 100.0, Status::Keyframe),
            pt(5, 200.0, 200.0, Status::Keyframe),
            pt(7, 250.0, 250.0, Status::Endframe),
        ];
        let curve = SegmentedCurve::build(&points);
        assert_eq!(curve.position_at(3), Some((150.0, 150.0)));
        assert_eq!(curve.position_at(10), Some((250.0, 250.0)));
    }

    #[test]
    fn scenario_3_gap_extends_beyond_original_data() {
        let points = vec![
            pt(10, 100.0, 100.0, Status::Keyframe),
            pt(20, 200.0, 200.0, Status::Endframe),
            pt(30, 300.0, 300.0, Status::Tracked),
        ];
        let curve = SegmentedCurve::build(&points);
        assert_eq!(curve.position_at(30), Some((300.0, 300.0)));
        assert_eq!(curve.position_at(40), Some((200.0, 200.0)));
        assert_eq!(curve.position_at(100), Some((200.0, 200.0)));
    }

    #[test]
    fn scenario_4_multiple_endframes_in_a_gap_stay_visible_but_inactive() {
        let points = vec![
            pt(1, 0.0, 0.0, Status::Keyframe),
            pt(9, 0.0, 0.0, Status::Endframe),
            pt(10, 0.0, 0.0, Status::Tracked),
            pt(14, 0.0, 0.0, Status::Tracked),
            pt(18, 0.0, 0.0, Status::Endframe),
            pt(19, 0.0, 0.0, Status::Tracked),
            pt(25, 0.0, 0.0, Status::Tracked),
            pt(26, 0.0, 0.0, Status::Keyframe),
        ];
        let curve = SegmentedCurve::build(&points);

        let seg_with_9 = curve.segment_at(9).unwrap();
        assert!(seg_with_9.active);

        let seg_with_18 = curve.segment_at(18).unwrap();
        assert!(!seg_with_18.active);

        let seg_with_26 = curve.segment_at(26).unwrap();
        assert!(seg_with_26.active);
    }

    #[test]
    fn query_law_every_point_is_visible_at_its_own_frame() {
        let points = vec![
            pt(1, 1.0, 1.0, Status::Keyframe),
            pt(4, 4.0, 4.0, Status::Endframe),
            pt(9, 9.0, 9.0, Status::Tracked),
        ];
        let curve = SegmentedCurve::build(&points);
        for p in &points {
            assert_eq!(curve.position_at(p.frame), Some((p.x, p.y)));
        }
    }

    #[test]
    fn interpolation_boundaries_are_strict_at_an_exact_keyframe() {
        let points = vec![
            pt(1, 0.0, 0.0, Status::Keyframe),
            pt(5, 50.0, 50.0, Status::Keyframe),
            pt(10, 100.0, 100.0, Status::Endframe),
        ];
        let curve = SegmentedCurve::build(&points);
        let (prev, next) = curve.interpolation_boundaries(5);
        assert_eq!(prev, Some(points[0]));
        assert_eq!(next, None, "frame 5 is inside the active segment but strictly ahead of no other keyframe-like point");
    }

    #[test]
    fn empty_curve_returns_none_for_every_query() {
        let curve = SegmentedCurve::build(&[]);
        assert_eq!(curve.position_at(0), None);
        assert_eq!(curve.frame_range(), None);
        assert_eq!(curve.segment_at(0), None);
    }

    #[test]
    fn round_trip_law_segments_contain_every_input_point_exactly_once() {
        let points = vec![
            pt(1, 0.0, 0.0, Status::Keyframe),
            pt(2, 0.0, 0.0, Status::Endframe),
            pt(3, 0.0, 0.0, Status::Normal),
            pt(3, 1.0, 1.0, Status::Normal),
        ];
        let curve = SegmentedCurve::build(&points);
        let mut rebuilt: Vec<Point> = curve.segments().iter().flat_map(|s| s.points.clone()).collect();
        let mut expected = points.clone();
        rebuilt.sort_by(|a, b| a.frame.cmp(&b.frame).then(a.x.total_cmp(&b.x)));
        expected.sort_by(|a, b| a.frame.cmp(&b.frame).then(a.x.total_cmp(&b.x)));
        assert_eq!(rebuilt, expected);
    }
}
