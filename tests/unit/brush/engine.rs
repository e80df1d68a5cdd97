use super::*;
use crate::foundation::core::Canvas;

fn mask(w: u32, h: u32) -> MaskBuffer {
    MaskBuffer::new(Canvas::new(w, h).unwrap())
}

fn paint(radius: u32) -> BrushConfig {
    BrushConfig::new(radius, BrushMode::Paint).unwrap()
}

#[test]
fn stamp_center_is_full_strength_and_far_cells_untouched() {
    let mut m = mask(100, 100);
    let mut engine = BrushEngine::default();
    engine.stamp(&mut m, Point::new(50.0, 50.0), &paint(20));
    assert_eq!(m.get(50, 50), Some(255));
    assert_eq!(m.get(0, 0), Some(0));
    assert_eq!(m.get(71, 50), Some(0));
}

#[test]
fn stamp_falloff_along_axis() {
    let mut m = mask(100, 100);
    let mut engine = BrushEngine::default();
    engine.stamp(&mut m, Point::new(50.0, 50.0), &paint(20));
    let row: Vec<u8> = (62..=70).map(|x| m.get(x, 50).unwrap()).collect();
    assert_eq!(row, vec![255, 223, 191, 159, 128, 96, 64, 32, 0]);
}

#[test]
fn stamp_is_clipped_at_edges() {
    let mut m = mask(10, 10);
    let mut engine = BrushEngine::default();
    engine.stamp(&mut m, Point::new(0.0, 0.0), &paint(5));
    assert_eq!(m.get(0, 0), Some(255));
    assert!(m.coverage() > 0);

    let mut far = mask(10, 10);
    engine.stamp(&mut far, Point::new(-50.0, 500.0), &paint(5));
    assert!(far.is_blank());
}

#[test]
fn fractional_points_floor_onto_the_grid() {
    let mut a = mask(40, 40);
    let mut b = mask(40, 40);
    let mut engine = BrushEngine::default();
    engine.stamp(&mut a, Point::new(20.0, 20.0), &paint(8));
    engine.stamp(&mut b, Point::new(20.7, 20.2), &paint(8));
    assert_eq!(a, b);
}

#[test]
fn non_finite_points_are_ignored() {
    let mut m = mask(10, 10);
    let mut engine = BrushEngine::default();
    engine.stamp(&mut m, Point::new(f64::NAN, 3.0), &paint(5));
    engine.stamp(&mut m, Point::new(3.0, f64::INFINITY), &paint(5));
    assert!(m.is_blank());
}

#[test]
fn erase_subtracts_and_never_underflows() {
    let mut m = mask(60, 60);
    let mut engine = BrushEngine::default();
    let erase = BrushConfig::new(10, BrushMode::Erase).unwrap();
    engine.stamp(&mut m, Point::new(30.0, 30.0), &erase);
    assert!(m.is_blank());

    engine.stamp(&mut m, Point::new(30.0, 30.0), &paint(10));
    engine.stamp(&mut m, Point::new(30.0, 30.0), &erase);
    assert!(m.is_blank());
}

#[test]
fn kernel_follows_radius_and_falloff_changes() {
    let mut engine = BrushEngine::default();
    let mut small = mask(100, 100);
    engine.stamp(&mut small, Point::new(50.0, 50.0), &paint(5));
    let mut large = mask(100, 100);
    engine.stamp(&mut large, Point::new(50.0, 50.0), &paint(10));
    assert!(large.coverage() > small.coverage());

    engine.set_falloff(FalloffProfile { inner_ratio: 0.0 });
    let mut soft = mask(100, 100);
    engine.stamp(&mut soft, Point::new(50.0, 50.0), &paint(10));
    assert!(soft.get(55, 50).unwrap() < large.get(55, 50).unwrap());
}

#[test]
fn blend_rules() {
    assert_eq!(blend(100, 50, BrushMode::Paint), 100);
    assert_eq!(blend(100, 200, BrushMode::Paint), 200);
    assert_eq!(blend(100, 50, BrushMode::Erase), 50);
    assert_eq!(blend(10, 200, BrushMode::Erase), 0);
}
