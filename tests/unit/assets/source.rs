use super::*;

struct StaticFetcher(Vec<u8>);

impl ImageFetcher for StaticFetcher {
    fn fetch(&self, _url: &str) -> anyhow::Result<Vec<u8>> {
        Ok(self.0.clone())
    }
}

#[test]
fn parse_classifies_sources() {
    assert!(matches!(
        ImageRef::parse("data:image/png;base64,AAAA"),
        ImageRef::DataUri(_)
    ));
    assert!(matches!(
        ImageRef::parse("https://example.com/a.png"),
        ImageRef::Url(_)
    ));
    assert_eq!(
        ImageRef::parse("file:///tmp/a.png"),
        ImageRef::Path(PathBuf::from("/tmp/a.png"))
    );
    assert_eq!(
        ImageRef::parse("photos/a.png"),
        ImageRef::Path(PathBuf::from("photos/a.png"))
    );
}

#[test]
fn data_uri_roundtrip_keeps_mime_and_bytes() {
    let uri = encode_data_uri("image/png", &[1, 2, 3, 250]);
    assert!(uri.starts_with("data:image/png;base64,"));
    let (mime, bytes) = decode_data_uri(&uri).unwrap();
    assert_eq!(mime, "image/png");
    assert_eq!(bytes, vec![1, 2, 3, 250]);
}

#[test]
fn data_uri_rejects_non_base64_and_garbage() {
    assert!(decode_data_uri("data:text/plain,hello").is_err());
    assert!(decode_data_uri("data:image/png;base64").is_err());
    assert!(decode_data_uri("data:image/png;base64,@@@").is_err());
    assert!(decode_data_uri("image/png;base64,AAAA").is_err());
}

#[test]
fn remote_url_requires_fetcher() {
    let url = ImageRef::Url("https://example.com/a.png".to_string());
    let err = load_image_bytes(&url, None).unwrap_err();
    assert!(matches!(err, MaskpaintError::Decode(_)));

    let fetcher = StaticFetcher(vec![9, 9]);
    assert_eq!(load_image_bytes(&url, Some(&fetcher)).unwrap(), vec![9, 9]);
}

#[test]
fn missing_path_is_a_decode_error() {
    let p = ImageRef::Path(PathBuf::from("target/definitely/not/here.png"));
    assert!(matches!(
        load_image_bytes(&p, None),
        Err(MaskpaintError::Decode(_))
    ));
}

#[test]
fn image_source_checks_buffer_length() {
    assert!(ImageSource::from_rgba8(2, 2, vec![0; 15]).is_err());
    assert!(ImageSource::from_rgba8(0, 2, vec![]).is_err());
    let img = ImageSource::from_rgba8(2, 2, vec![7; 16]).unwrap();
    assert_eq!(img.canvas(), Canvas::new(2, 2).unwrap());
    assert_eq!(img.rgba8().len(), 16);
}
