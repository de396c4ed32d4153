use curve_point::Point;

/// A contiguous, frame-ordered run of points. `active` segments are part of
/// the rendered/queried curve; `inactive` segments live inside a gap opened
/// by a terminator.
///
/// `originally_active` records whether this segment's first point is a
/// startframe (see [`Point::is_startframe`]) — the post-pass flag the
/// builder computes once the full point sequence is known, analogous to
/// the source's `starts_with_startframe`. Because this crate always
/// recomputes the full segment list on edit (no incremental patching, see
/// crate docs), `originally_active` and `active` happen to coincide for
/// every segment except the very first; it is retained on the type because
/// `spec.md`'s data model names it as a distinct field, and it is the seam
/// an incremental builder would diverge through.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub start_frame: i32,
    pub end_frame: i32,
    pub points: Vec<Point>,
    pub active: bool,
    pub originally_active: bool,
}

impl Segment {
    pub(crate) fn close(points: Vec<Point>, active: bool) -> Self {
        let start_frame = points.first().expect("segment must be non-empty").frame;
        let end_frame = points.last().expect("segment must be non-empty").frame;
        Self {
            start_frame,
            end_frame,
            points,
            active,
            originally_active: active,
        }
    }

    pub fn frame_range(&self) -> (i32, i32) {
        (self.start_frame, self.end_frame)
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn has_keyframes(&self) -> bool {
        self.points
            .iter()
            .any(|p| matches!(p.status, curve_point::Status::Keyframe | curve_point::Status::Tracked))
    }

    pub fn contains_frame(&self, frame: i32) -> bool {
        frame >= self.start_frame && frame <= self.end_frame
    }

    pub fn get_point_at_frame(&self, frame: i32) -> Option<&Point> {
        self.points.iter().find(|p| p.frame == frame)
    }
}
