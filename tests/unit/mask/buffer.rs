use super::*;

#[test]
fn new_mask_is_blank_and_sized_to_canvas() {
    let m = MaskBuffer::new(Canvas::new(5, 3).unwrap());
    assert_eq!(m.as_slice().len(), 15);
    assert!(m.is_blank());
    assert_eq!(m.coverage(), 0);
    assert_eq!((m.width(), m.height()), (5, 3));
}

#[test]
fn get_is_bounds_checked() {
    let mut m = MaskBuffer::new(Canvas::new(2, 2).unwrap());
    m.data_mut()[3] = 42;
    assert_eq!(m.get(1, 1), Some(42));
    assert_eq!(m.get(2, 0), None);
    assert_eq!(m.get(0, 2), None);
    assert!(!m.is_blank());
    assert_eq!(m.coverage(), 1);
}
