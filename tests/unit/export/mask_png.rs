use super::*;
use crate::foundation::core::Canvas;

#[test]
fn no_mask_exports_none() {
    assert!(export_mask(None).unwrap().is_none());
}

#[test]
fn rgba_expansion_is_gray_and_opaque() {
    let mut m = MaskBuffer::new(Canvas::new(2, 1).unwrap());
    m.data_mut()[1] = 200;
    assert_eq!(mask_to_rgba8(&m), vec![0, 0, 0, 255, 200, 200, 200, 255]);
}

#[test]
fn exported_png_decodes_to_the_same_intensities() {
    let mut m = MaskBuffer::new(Canvas::new(7, 5).unwrap());
    for (i, v) in m.data_mut().iter_mut().enumerate() {
        *v = (i * 37 % 256) as u8;
    }
    let encoded = export_mask(Some(&m)).unwrap().unwrap();
    assert_eq!((encoded.width, encoded.height), (7, 5));

    let img = image::load_from_memory(&encoded.png).unwrap().to_rgba8();
    assert_eq!(img.dimensions(), (7, 5));
    for (p, &v) in img.pixels().zip(m.as_slice()) {
        assert_eq!(p.0, [v, v, v, 255]);
    }

    let (w, h, values) = decode_mask_png(&encoded.png).unwrap();
    assert_eq!((w, h), (7, 5));
    assert_eq!(values, m.as_slice());
}

#[test]
fn data_uri_prefix() {
    let m = MaskBuffer::new(Canvas::new(1, 1).unwrap());
    let encoded = export_mask(Some(&m)).unwrap().unwrap();
    assert!(encoded.to_data_uri().starts_with("data:image/png;base64,"));
}

#[test]
fn frame_png_encodes() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 255, 4, 5, 6, 255],
    };
    let png = encode_frame_png(&frame).unwrap();
    let back = image::load_from_memory(&png).unwrap().to_rgba8();
    assert_eq!(back.into_raw(), frame.data);

    let bad = FrameRGBA {
        width: 3,
        height: 3,
        data: vec![0; 4],
    };
    assert!(matches!(
        encode_frame_png(&bad),
        Err(MaskpaintError::Encode(_))
    ));
}
