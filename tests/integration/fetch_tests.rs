//! Page fetching, direct and through the relay

use crate::common::{product_page, product_png, test_config, test_generator};
use product_poster::config::FetchConfig;
use product_poster::fetcher::{build_asset_client, build_http_client, fetch_image, fetch_page};
use product_poster::url::route_for;
use product_poster::PosterError;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_direct_fetch_uses_final_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/products/fish-oil"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("/img/fish-oil.png"))
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let target = url::Url::parse(&format!("{}/products/fish-oil", mock_server.uri()))
        .expect("Failed to parse target URL");
    let client = build_http_client(&test_config(None).fetch).expect("Failed to build client");
    let route = route_for(&target, None).expect("Failed to build route");

    let page = fetch_page(&client, &route).await.expect("Fetch failed");
    assert_eq!(page.url, target);
    assert!(page.html.contains("Deep Sea Fish Oil"));
}

#[tokio::test]
async fn test_relay_fetch_passes_encoded_target() {
    let mock_server = MockServer::start().await;
    let target = "https://shop.example/products/fish-oil?variant=2";

    Mock::given(method("GET"))
        .and(path("/api/fetch"))
        .and(query_param("url", target))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(product_page("/img/fish-oil.png"))
                .insert_header("content-type", "text/html; charset=utf-8"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let generator = test_generator(Some(format!("{}/api/fetch", mock_server.uri())));
    let record = generator.extract(target).await.expect("Extraction failed");

    assert_eq!(record.name, "Deep Sea Fish Oil");
    assert_eq!(record.price.as_deref(), Some("$29.99"));
    // relative references resolve against the target, not the relay
    assert_eq!(
        record.image.as_deref(),
        Some("https://shop.example/img/fish-oil.png")
    );
    assert_eq!(record.url, target);
}

#[tokio::test]
async fn test_relay_error_message_is_surfaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/fetch"))
        .respond_with(ResponseTemplate::new(502).set_body_json(serde_json::json!({
            "error": "Upstream returned 503",
            "url": "https://shop.example/p1",
            "timestamp": "2024-05-01T10:00:00Z"
        })))
        .mount(&mock_server)
        .await;

    let generator = test_generator(Some(format!("{}/api/fetch", mock_server.uri())));
    let result = generator.extract("https://shop.example/p1").await;

    match result {
        Err(PosterError::Status {
            url,
            status,
            message,
        }) => {
            assert_eq!(url, "https://shop.example/p1");
            assert_eq!(status, 502);
            assert_eq!(message, "Upstream returned 503");
        }
        other => panic!("expected status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_page_not_found_aborts_generation() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("<html>gone</html>"))
        .mount(&mock_server)
        .await;

    let generator = test_generator(None);
    let result = generator
        .generate(product_poster::GenerateRequest::new(format!(
            "{}/missing",
            mock_server.uri()
        )))
        .await;

    match result {
        Err(PosterError::Status { status, message, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected status error, got {:?}", other.map(|p| p.filename)),
    }
    assert!(generator.last_generated().is_none());
}

#[tokio::test]
async fn test_slow_page_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html></html>")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&mock_server)
        .await;

    let config = FetchConfig {
        timeout_secs: 1,
        allow_insecure: true,
        ..FetchConfig::default()
    };
    let client = build_http_client(&config).expect("Failed to build client");
    let target = url::Url::parse(&mock_server.uri()).expect("Failed to parse target URL");
    let route = route_for(&target, None).expect("Failed to build route");

    let result = fetch_page(&client, &route).await;
    assert!(matches!(result, Err(PosterError::Timeout { .. })));
}

#[tokio::test]
async fn test_plain_http_image_loads_with_https_only_pages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/img/p1.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(product_png())
                .insert_header("content-type", "image/png"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // default settings: page requests are HTTPS-only
    let config = FetchConfig::default();
    assert!(!config.allow_insecure);
    let client = build_asset_client(&config).expect("Failed to build client");

    let image_url = format!("{}/img/p1.png", mock_server.uri());
    assert!(image_url.starts_with("http://"));
    let image = fetch_image(&client, &image_url).await.expect("Image fetch failed");
    assert_eq!(image.dimensions(), (300, 450));
}
