//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status, expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a valid PNG image
pub fn assert_png(response: &TestResponse) {
    assert_ok(response);
    assert!(
        response.is_png(),
        "Expected PNG image, got {} bytes starting with {:?}",
        response.body.len(),
        &response.body[..8.min(response.body.len())]
    );
    assert_eq!(
        response.header("content-type"),
        Some("image/png"),
        "Expected Content-Type: image/png"
    );
}

/// Assert response is a JSON error with the given status and message
pub fn assert_json_error(response: &TestResponse, expected: StatusCode, message: &str) {
    assert_status(response, expected);
    assert!(!response.is_png(), "Error responses must not carry image bytes");

    let json: serde_json::Value = response.json();
    assert_eq!(json, serde_json::json!({ "error": message }));
}

/// A decoded PNG as tightly packed RGB pixels
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

impl DecodedImage {
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let i = ((y * self.width + x) * 3) as usize;
        [self.rgb[i], self.rgb[i + 1], self.rgb[i + 2]]
    }
}

/// Decode PNG bytes, expanding palette and low bit depth images to RGB
pub fn decode_png(bytes: &[u8]) -> DecodedImage {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().expect("Invalid PNG header");
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).expect("Invalid PNG data");
    buf.truncate(info.buffer_size());

    let rgb = match info.color_type {
        png::ColorType::Rgb => buf,
        png::ColorType::Rgba => buf
            .chunks_exact(4)
            .flat_map(|p| {
                assert_eq!(p[3], 255, "Image should be fully opaque");
                [p[0], p[1], p[2]]
            })
            .collect(),
        other => panic!("Unexpected PNG color type {other:?}"),
    };

    DecodedImage {
        width: info.width,
        height: info.height,
        rgb,
    }
}
