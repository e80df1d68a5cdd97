use super::*;
use crate::foundation::core::Canvas;

fn solid(w: u32, h: u32, px: [u8; 4]) -> ImageSource {
    ImageSource::from_rgba8(w, h, px.repeat((w * h) as usize)).unwrap()
}

fn masked(w: u32, h: u32, cells: &[(usize, u8)]) -> MaskBuffer {
    let mut m = MaskBuffer::new(Canvas::new(w, h).unwrap());
    for &(i, v) in cells {
        m.data_mut()[i] = v;
    }
    m
}

#[test]
fn unmasked_pixels_are_copied() {
    let img = solid(3, 2, [10, 20, 30, 200]);
    let mask = masked(3, 2, &[]);
    let out = Compositor::default().render(&img, &mask).unwrap();
    assert_eq!(out.data, img.rgba8());
}

#[test]
fn full_mask_blends_toward_tint_and_keeps_alpha() {
    let img = solid(2, 1, [100, 100, 100, 77]);
    let mask = masked(2, 1, &[(0, 255), (1, 0)]);
    let out = Compositor::default().render(&img, &mask).unwrap();
    // blend = 0.4 -> r: 100*0.6 = 60, g: 60 + 102 = 162, b: 60
    assert_eq!(&out.data[..4], &[60, 162, 60, 77]);
    assert_eq!(&out.data[4..], &[100, 100, 100, 77]);
}

#[test]
fn partial_mask_scales_the_blend() {
    let img = solid(1, 1, [0, 0, 0, 255]);
    let mask = masked(1, 1, &[(0, 128)]);
    let style = OverlayStyle {
        tint: Rgb8::new(255, 255, 255),
        alpha: 1.0,
    };
    let out = Compositor::new(style, CompositeThreading::default())
        .render(&img, &mask)
        .unwrap();
    assert_eq!(out.data, vec![128, 128, 128, 255]);
}

#[test]
fn parallel_and_serial_paths_agree() {
    let w = 64;
    let h = 48;
    let rgba: Vec<u8> = (0..w * h * 4).map(|i| (i * 7 % 251) as u8).collect();
    let img = ImageSource::from_rgba8(w, h, rgba).unwrap();
    let mut mask = MaskBuffer::new(img.canvas());
    for (i, v) in mask.data_mut().iter_mut().enumerate() {
        *v = (i * 13 % 256) as u8;
    }

    let serial = Compositor::new(
        OverlayStyle::default(),
        CompositeThreading {
            parallel: false,
            min_parallel_pixels: 0,
        },
    );
    let parallel = Compositor::new(
        OverlayStyle::default(),
        CompositeThreading {
            parallel: true,
            min_parallel_pixels: 0,
        },
    );
    assert_eq!(
        serial.render(&img, &mask).unwrap(),
        parallel.render(&img, &mask).unwrap()
    );
}

#[test]
fn mismatched_dimensions_are_rejected() {
    let img = solid(2, 2, [0, 0, 0, 255]);
    let mask = masked(3, 2, &[]);
    assert!(Compositor::default().render(&img, &mask).is_err());
}

#[test]
fn overlay_alpha_is_validated() {
    let mut s = OverlayStyle::default();
    assert!(s.validate().is_ok());
    s.alpha = 1.5;
    assert!(s.validate().is_err());
    s.alpha = f64::NAN;
    assert!(s.validate().is_err());
}
