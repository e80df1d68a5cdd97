use super::*;

#[test]
fn zero_length_segment_yields_one_sample() {
    let p = Point::new(3.5, 7.0);
    let samples: Vec<Point> = interpolate(p, p, 20).collect();
    assert_eq!(samples, vec![p]);
}

#[test]
fn endpoints_are_inclusive_and_step_count_is_ceil() {
    let from = Point::new(0.0, 0.0);
    let to = Point::new(12.0, 0.0);
    // spacing 20/4 = 5 -> ceil(12 / 5) = 3 steps, 4 samples
    let s = interpolate(from, to, 20);
    assert_eq!(s.steps(), 3);
    assert_eq!(s.len(), 4);
    let pts: Vec<Point> = s.collect();
    assert_eq!(pts.first(), Some(&from));
    assert_eq!(pts.last(), Some(&to));
    assert!(pts[1].distance(Point::new(4.0, 0.0)) < 1e-9);
}

#[test]
fn spacing_never_exceeds_quarter_radius() {
    let cases = [
        (Point::new(0.0, 0.0), Point::new(1000.0, 3.0), 5),
        (Point::new(-20.0, 50.0), Point::new(33.3, -71.1), 17),
        (Point::new(10.0, 10.0), Point::new(10.1, 10.0), 100),
    ];
    for (from, to, radius) in cases {
        let pts: Vec<Point> = interpolate(from, to, radius).collect();
        let limit = f64::from(radius) / 4.0 + 1e-9;
        for w in pts.windows(2) {
            assert!(w[0].distance(w[1]) <= limit);
        }
    }
}

#[test]
fn stroke_state_tracks_activity_and_stamps() {
    let mut s = StrokeState::default();
    assert!(!s.is_active());
    assert!(s.extend(Point::new(1.0, 1.0), 20).is_none());
    assert_eq!(s.end(), None);

    s.begin(Point::new(0.0, 0.0));
    assert!(s.is_active());
    let n = s.extend(Point::new(10.0, 0.0), 20).unwrap().count();
    assert_eq!(n, 3);
    assert_eq!(s.end(), Some(4));
    assert!(!s.is_active());
}

#[test]
fn huge_segments_do_not_overflow_the_sample_count() {
    let s = interpolate(Point::new(0.0, 0.0), Point::new(1e30, 0.0), 5);
    assert_eq!(s.steps(), u64::MAX);
    assert!(s.len() > 0);

    let mut state = StrokeState::default();
    state.begin(Point::new(0.0, 0.0));
    assert!(state.extend(Point::new(1e30, 0.0), 5).is_some());
    assert!(state.extend(Point::new(-1e30, 0.0), 5).is_some());
    assert_eq!(state.end(), Some(u64::MAX));
}

#[test]
fn extend_within_samples_only_the_clipped_part() {
    let bounds = Rect::new(-6.0, -6.0, 106.0, 106.0);
    let mut state = StrokeState::default();
    state.begin(Point::new(50.0, 50.0));
    let pts: Vec<Point> = state
        .extend_within(Point::new(1e30, 50.0), 20, bounds)
        .unwrap()
        .collect();
    assert_eq!(pts.first(), Some(&Point::new(50.0, 50.0)));
    assert!(pts.last().unwrap().distance(Point::new(106.0, 50.0)) < 1e-6);
    assert!(pts.len() <= 14);

    // Segment entirely outside: nothing to stamp, but the stroke continues from the new point.
    let outside: Vec<Point> = state
        .extend_within(Point::new(1e30, 1e30), 20, bounds)
        .unwrap()
        .collect();
    assert!(outside.is_empty());
    let back: Vec<Point> = state
        .extend_within(Point::new(50.0, 50.0), 20, bounds)
        .unwrap()
        .collect();
    assert_eq!(back.last(), Some(&Point::new(50.0, 50.0)));
}

#[test]
fn clip_segment_cases() {
    let b = Rect::new(0.0, 0.0, 10.0, 10.0);
    let inside = (Point::new(1.0, 1.0), Point::new(9.0, 2.0));
    assert_eq!(clip_segment(inside.0, inside.1, b), Some(inside));
    let (start, end) = clip_segment(Point::new(-10.0, 5.0), Point::new(20.0, 5.0), b).unwrap();
    assert!(start.distance(Point::new(0.0, 5.0)) < 1e-9);
    assert!(end.distance(Point::new(10.0, 5.0)) < 1e-9);
    assert_eq!(
        clip_segment(Point::new(-5.0, -5.0), Point::new(-1.0, 20.0), b),
        None
    );
    assert_eq!(
        clip_segment(Point::new(20.0, 20.0), Point::new(20.0, 20.0), b),
        None
    );
}
