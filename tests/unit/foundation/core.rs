use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 4).is_err());
    assert!(Canvas::new(4, 0).is_err());
    let c = Canvas::new(4, 3).unwrap();
    assert_eq!(c.pixel_count(), 12);
}

#[test]
fn canvas_contains_boundaries() {
    let c = Canvas::new(4, 3).unwrap();
    assert!(c.contains(0, 0));
    assert!(c.contains(3, 2));
    assert!(!c.contains(4, 2));
    assert!(!c.contains(3, 3));
    assert!(!c.contains(-1, 0));
}

#[test]
fn canvas_index_is_row_major() {
    let c = Canvas::new(4, 3).unwrap();
    assert_eq!(c.index(0, 0), 0);
    assert_eq!(c.index(3, 0), 3);
    assert_eq!(c.index(0, 1), 4);
    assert_eq!(c.index(3, 2), 11);
}

#[test]
fn rgb8_serde_is_a_triple() {
    let json = serde_json::to_string(&Rgb8::new(0, 255, 0)).unwrap();
    assert_eq!(json, "[0,255,0]");
    let back: Rgb8 = serde_json::from_str("[1,2,3]").unwrap();
    assert_eq!(back, Rgb8::new(1, 2, 3));
}
