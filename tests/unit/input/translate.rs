use super::*;

#[test]
fn identity_passes_points_through() {
    let t = InputTranslator::identity();
    assert_eq!(t.to_image_space(Point::new(12.5, 3.0)), Point::new(12.5, 3.0));
}

#[test]
fn downscaled_display_maps_to_native_pixels() {
    let native = Canvas::new(1000, 500).unwrap();
    let display = DisplayRect {
        origin: Point::new(100.0, 40.0),
        size: Size::new(500.0, 250.0),
    };
    let t = InputTranslator::new(display, native).unwrap();
    assert_eq!(t.scale(), Vec2::new(2.0, 2.0));
    assert_eq!(t.to_image_space(Point::new(100.0, 40.0)), Point::ORIGIN);
    assert_eq!(
        t.to_image_space(Point::new(350.0, 165.0)),
        Point::new(500.0, 250.0)
    );
}

#[test]
fn axes_scale_independently_and_are_not_clamped() {
    let native = Canvas::new(200, 100).unwrap();
    let t = InputTranslator::new(DisplayRect::from_size(100.0, 100.0), native).unwrap();
    assert_eq!(t.scale(), Vec2::new(2.0, 1.0));
    assert_eq!(
        t.to_image_space(Point::new(-10.0, 150.0)),
        Point::new(-20.0, 150.0)
    );
}

#[test]
fn degenerate_display_is_rejected() {
    let native = Canvas::new(10, 10).unwrap();
    assert!(InputTranslator::new(DisplayRect::from_size(0.0, 10.0), native).is_err());
    assert!(InputTranslator::new(DisplayRect::from_size(10.0, -1.0), native).is_err());
    assert!(InputTranslator::new(DisplayRect::from_size(f64::NAN, 10.0), native).is_err());
}

#[test]
fn display_too_small_for_a_finite_scale_is_rejected() {
    let native = Canvas::new(10, 10).unwrap();
    let tiny = DisplayRect::from_size(1e-320, 1e-320);
    assert!(tiny.validate().is_ok());
    assert!(InputTranslator::new(tiny, native).is_err());
}
