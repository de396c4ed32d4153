use curve_point::{Point, Status};
use curve_segments::SegmentedCurve;
use pretty_assertions::assert_eq;

fn pt(frame: i32, status: Status) -> Point {
    Point::new(frame, frame as f64, frame as f64, status)
}

/// Toggling a `Keyframe` to `Endframe` must deactivate all segments
/// strictly between that point and the next startframe.
#[test]
fn toggling_keyframe_to_endframe_deactivates_the_following_run() {
    let before = vec![
        pt(1, Status::Keyframe),
        pt(5, Status::Keyframe),
        pt(7, Status::Tracked),
        pt(10, Status::Keyframe),
    ];
    let before_curve = SegmentedCurve::build(&before);
    assert!(before_curve.segment_at(7).unwrap().active);

    let mut after = before.clone();
    after[1] = after[1].with_status(Status::Endframe);
    let after_curve = SegmentedCurve::build(&after);

    assert!(after_curve.segment_at(5).unwrap().active, "segment ending in the new endframe stays active");
    assert!(!after_curve.segment_at(7).unwrap().active, "a Tracked point between the new gap and the next startframe is inactive");
    assert!(after_curve.segment_at(10).unwrap().active, "the next startframe reopens");
}

/// Toggling an `Endframe` back to a non-terminator status must reactivate
/// whichever segments become reachable from the preceding startframe.
#[test]
fn toggling_endframe_back_reactivates_the_gap() {
    let before = vec![
        pt(1, Status::Keyframe),
        pt(5, Status::Endframe),
        pt(7, Status::Tracked),
        pt(10, Status::Keyframe),
    ];
    let before_curve = SegmentedCurve::build(&before);
    assert!(!before_curve.segment_at(7).unwrap().active);

    let mut after = before.clone();
    after[1] = after[1].with_status(Status::Tracked);
    let after_curve = SegmentedCurve::build(&after);

    assert!(after_curve.segment_at(7).unwrap().active, "no terminator left means no gap");
}

/// Deleting a `Keyframe` that was acting as a startframe after a
/// terminator must extend the gap forward until the next startframe.
#[test]
fn deleting_a_startframe_extends_the_gap_to_the_next_one() {
    let before = vec![
        pt(1, Status::Keyframe),
        pt(5, Status::Endframe),
        pt(10, Status::Keyframe), // startframe, reopens
        pt(15, Status::Tracked),
        pt(20, Status::Endframe),
        pt(25, Status::Keyframe), // next startframe
    ];
    let before_curve = SegmentedCurve::build(&before);
    assert!(before_curve.segment_at(12).unwrap().active);

    let after: Vec<Point> = before
        .iter()
        .copied()
        .filter(|p| p.frame != 10)
        .collect();
    let after_curve = SegmentedCurve::build(&after);

    assert!(!after_curve.segment_at(15).unwrap().active, "gap now extends past the deleted startframe");
    assert!(after_curve.segment_at(25).unwrap().active, "the next startframe still reopens");
}

/// Deleting a terminator must collapse its gap; subsequent frames become
/// interpolated within the enclosing segment.
#[test]
fn deleting_a_terminator_collapses_its_gap() {
    let before = vec![
        pt(1, Status::Keyframe),
        pt(5, Status::Endframe),
        pt(10, Status::Keyframe),
    ];
    let before_curve = SegmentedCurve::build(&before);
    assert_eq!(before_curve.segments().len(), 2);

    let after: Vec<Point> = before.iter().copied().filter(|p| p.frame != 5).collect();
    let after_curve = SegmentedCurve::build(&after);

    assert_eq!(after_curve.segments().len(), 1);
    assert!(after_curve.segment_at(3).unwrap().active);
    // frame 3 interpolates linearly between (1, 1) and (10, 10).
    assert_eq!(after_curve.position_at(3), Some((3.0, 3.0)));
}
