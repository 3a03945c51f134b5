//! End-to-end generation

use crate::common::{product_page, product_png, test_generator};
use product_poster::config::ImageFitMode;
use product_poster::render::decode_image;
use product_poster::{GenerateRequest, GenerationWarning, PosterError, RecordOverrides};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn mount_page(mock_server: &MockServer, page_path: &str, body: String, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_delay(delay),
        )
        .mount(mock_server)
        .await;
}

#[tokio::test]
async fn test_generate_full_poster() {
    let mock_server = MockServer::start().await;
    let image_url = format!("{}/img/fish-oil.png", mock_server.uri());

    mount_page(&mock_server, "/products/fish-oil", product_page(&image_url), Duration::ZERO).await;
    Mock::given(method("GET"))
        .and(path("/img/fish-oil.png"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(product_png())
                .insert_header("content-type", "image/png"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let generator = test_generator(None);
    let page_url = format!("{}/products/fish-oil", mock_server.uri());
    let poster = generator
        .generate(GenerateRequest::new(page_url.clone()))
        .await
        .expect("Generation failed");

    assert_eq!(poster.record.name, "Deep Sea Fish Oil");
    assert_eq!(poster.record.price.as_deref(), Some("$29.99"));
    assert_eq!(poster.record.image.as_deref(), Some(image_url.as_str()));
    assert_eq!(poster.record.highlights.len(), 3);
    assert_eq!(
        poster.record.usage,
        vec!["Take two softgels daily with food".to_string()]
    );
    assert_eq!(poster.record.url, page_url);
    assert!(poster.warnings.is_empty(), "warnings: {:?}", poster.warnings);

    assert_eq!(poster.filename, "Deep Sea Fish Oil_poster.png");
    assert_eq!((poster.width, poster.height), (1080, 1440));
    let decoded = decode_image(&poster.png).expect("Poster is not a valid image");
    assert_eq!(decoded.dimensions(), (1080, 1440));
}

#[tokio::test]
async fn test_missing_image_degrades_to_warning() {
    let mock_server = MockServer::start().await;
    let image_url = format!("{}/img/gone.jpg", mock_server.uri());

    mount_page(&mock_server, "/p1", product_page(&image_url), Duration::ZERO).await;
    Mock::given(method("GET"))
        .and(path("/img/gone.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let generator = test_generator(None);
    let poster = generator
        .generate(GenerateRequest::new(format!("{}/p1", mock_server.uri())))
        .await
        .expect("Generation should survive a missing image");

    assert_eq!(poster.warnings.len(), 1);
    match &poster.warnings[0] {
        GenerationWarning::ProductImage { url, message } => {
            assert_eq!(url, &image_url);
            assert!(message.contains("404"), "message: {}", message);
        }
        other => panic!("unexpected warning {:?}", other),
    }
    assert!(!poster.png.is_empty());
}

#[tokio::test]
async fn test_undecodable_image_degrades_to_warning() {
    let mock_server = MockServer::start().await;
    let image_url = format!("{}/img/broken.png", mock_server.uri());

    mount_page(&mock_server, "/p1", product_page(&image_url), Duration::ZERO).await;
    Mock::given(method("GET"))
        .and(path("/img/broken.png"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not an image"))
        .mount(&mock_server)
        .await;

    let generator = test_generator(None);
    let poster = generator
        .generate(GenerateRequest::new(format!("{}/p1", mock_server.uri())))
        .await
        .expect("Generation should survive a broken image");

    assert!(matches!(
        poster.warnings.as_slice(),
        [GenerationWarning::ProductImage { .. }]
    ));
}

#[tokio::test]
async fn test_overrides_and_card_layout() {
    let mock_server = MockServer::start().await;
    let page = r#"<html><head><title></title></head><body><p>Nothing useful</p></body></html>"#;
    mount_page(&mock_server, "/bare", page.to_string(), Duration::ZERO).await;

    let generator = test_generator(None);
    let page_url = format!("{}/bare", mock_server.uri());

    let bare = generator
        .generate(GenerateRequest::new(page_url.clone()))
        .await
        .expect("Generation failed");
    assert!(bare.record.has_placeholder_name());
    assert!(bare.warnings.contains(&GenerationWarning::PlaceholderName));

    let request = GenerateRequest {
        url: page_url,
        overrides: RecordOverrides {
            title: Some("Calcium + D3".to_string()),
            subtitle: Some("Bone support formula".to_string()),
            highlights: vec!["Easy to swallow".to_string()],
            usage: vec![],
        },
        image_fit: Some(ImageFitMode::Cover),
    };
    let poster = generator.generate(request).await.expect("Generation failed");

    assert_eq!(poster.record.name, "Calcium + D3");
    assert_eq!(poster.record.subtitle.as_deref(), Some("Bone support formula"));
    assert_eq!(poster.record.highlights, vec!["Easy to swallow".to_string()]);
    assert!(poster.warnings.is_empty());
    assert_eq!(poster.filename, "Calcium + D3_poster.png");
}

#[tokio::test]
async fn test_second_request_while_busy_is_rejected() {
    let mock_server = MockServer::start().await;
    let image_url = format!("{}/img/none.png", mock_server.uri());
    mount_page(
        &mock_server,
        "/slow",
        product_page(&image_url),
        Duration::from_millis(500),
    )
    .await;

    let generator = test_generator(None);
    let page_url = format!("{}/slow", mock_server.uri());

    let (first, second) = tokio::join!(
        generator.generate(GenerateRequest::new(page_url.clone())),
        generator.generate(GenerateRequest::new(page_url.clone())),
    );

    assert!(first.is_ok(), "first request failed: {:?}", first.err());
    assert!(matches!(second, Err(PosterError::Busy)));

    // the permit is released once the first request finishes
    let third = generator.extract(&page_url).await;
    assert!(third.is_ok());
}

#[tokio::test]
async fn test_last_generated_keeps_latest_success() {
    let mock_server = MockServer::start().await;
    let image_url = format!("{}/img/none.png", mock_server.uri());
    mount_page(&mock_server, "/p1", product_page(&image_url), Duration::ZERO).await;
    Mock::given(method("GET"))
        .and(path("/p2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let generator = test_generator(None);
    assert!(generator.last_generated().is_none());

    let poster = generator
        .generate(GenerateRequest::new(format!("{}/p1", mock_server.uri())))
        .await
        .expect("Generation failed");

    let failed = generator
        .generate(GenerateRequest::new(format!("{}/p2", mock_server.uri())))
        .await;
    assert!(failed.is_err());

    let last = generator.last_generated().expect("No poster cached");
    assert_eq!(last.filename, poster.filename);
    assert_eq!(last.png, poster.png);
    assert_eq!(last.generated_at, poster.generated_at);
}
