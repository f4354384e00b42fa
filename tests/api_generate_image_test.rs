//! Tests for the /api/generate-image endpoint.

mod common;

use axum::http::StatusCode;
use common::TestApp;

const BACKGROUND: [u8; 3] = [0x1a, 0x20, 0x2c];

#[tokio::test]
async fn test_generate_image_success() {
    let app = TestApp::new();

    let response = app.generate_image("America/New_York").await;

    common::assert_png(&response);
    let image = common::decode_png(&response.body);
    assert_eq!((image.width, image.height), (600, 200));
}

#[tokio::test]
async fn test_generate_image_background_pixel() {
    let app = TestApp::new();

    let response = app.generate_image("Europe/London").await;

    common::assert_png(&response);
    let image = common::decode_png(&response.body);
    assert_eq!(image.pixel(0, 0), BACKGROUND);
    assert_eq!(image.pixel(599, 199), BACKGROUND);
}

#[tokio::test]
async fn test_generate_image_all_preset_timezones() {
    let app = TestApp::new();

    for preset in tzimage::models::AppConfig::default().timezones {
        let response = app.generate_image(&preset.value).await;
        common::assert_png(&response);
    }
}

#[tokio::test]
async fn test_generate_image_url_encoded_timezone() {
    let app = TestApp::new();

    let response = app.generate_image("America%2FArgentina%2FBuenos_Aires").await;

    common::assert_png(&response);
}

#[tokio::test]
async fn test_generate_image_missing_timezone() {
    let app = TestApp::new();

    let response = app.get("/api/generate-image").await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST, "Timezone is required");
}

#[tokio::test]
async fn test_generate_image_empty_timezone() {
    let app = TestApp::new();

    let response = app.get("/api/generate-image?timezone=").await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST, "Timezone is required");
}

#[tokio::test]
async fn test_generate_image_unknown_timezone() {
    let app = TestApp::new();

    let response = app.generate_image("Mars%2FOlympus_Mons").await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST, "Invalid timezone");
}

#[tokio::test]
async fn test_generate_image_is_not_cached() {
    let app = TestApp::new();

    let response = app.generate_image("Asia%2FTokyo").await;

    common::assert_png(&response);
    assert_eq!(response.header("cache-control"), Some("no-store"));
}

#[tokio::test]
async fn test_generate_image_content_length() {
    let app = TestApp::new();

    let response = app.generate_image("Asia%2FDubai").await;

    let content_length = response
        .header("content-length")
        .and_then(|v| v.parse::<usize>().ok());
    assert_eq!(content_length, Some(response.body.len()));
}

#[tokio::test]
async fn test_generate_image_repeated_requests_have_same_dimensions() {
    let app = TestApp::new();

    let first = app.generate_image("Australia%2FSydney").await;
    let second = app.generate_image("Australia%2FSydney").await;

    let a = common::decode_png(&first.body);
    let b = common::decode_png(&second.body);
    assert_eq!((a.width, a.height), (b.width, b.height));
}

#[tokio::test]
async fn test_generate_image_with_custom_font_family() {
    let config = tzimage::models::AppConfig {
        font_family: "Definitely Not Installed".to_string(),
        ..Default::default()
    };
    let app = TestApp::with_config(config);

    let response = app.generate_image("Europe%2FParis").await;

    common::assert_png(&response);
}

#[tokio::test]
async fn test_generate_image_repeated_timezone_uses_first() {
    let app = TestApp::new();

    let response = app
        .get("/api/generate-image?timezone=Europe%2FLondon&timezone=Asia%2FTokyo")
        .await;

    common::assert_png(&response);
}

#[tokio::test]
async fn test_generate_image_repeated_timezone_with_empty_first() {
    let app = TestApp::new();

    let response = app
        .get("/api/generate-image?timezone=&timezone=Asia%2FTokyo")
        .await;

    common::assert_json_error(&response, StatusCode::BAD_REQUEST, "Timezone is required");
}

#[tokio::test]
async fn test_generate_image_draws_text() {
    let fonts_available = tzimage::rendering::ImageRenderer::new()
        .map(|r| r.face_count() > 0)
        .unwrap_or(false);
    if !fonts_available {
        return;
    }
    let app = TestApp::new();

    let response = app.generate_image("UTC").await;

    common::assert_png(&response);
    let image = common::decode_png(&response.body);
    let bright = (0..image.height)
        .flat_map(|y| (0..image.width).map(move |x| (x, y)))
        .filter(|&(x, y)| image.pixel(x, y).iter().all(|&c| c > 160))
        .count();
    assert!(bright > 0, "image contains no visible text");
}
