//! Shared fixtures

use image::{Rgba, RgbaImage};
use product_poster::config::{Config, FetchConfig};
use product_poster::render::{encode_png, FontBook};
use product_poster::PosterGenerator;

/// A configuration that talks plain HTTP to the mock server
pub fn test_config(relay_base: Option<String>) -> Config {
    Config {
        fetch: FetchConfig {
            relay_base,
            timeout_secs: 5,
            allow_insecure: true,
            ..FetchConfig::default()
        },
        ..Config::default()
    }
}

/// A generator without font files; text is laid out but not painted
pub fn test_generator(relay_base: Option<String>) -> PosterGenerator {
    PosterGenerator::with_fonts(test_config(relay_base), FontBook::empty())
        .expect("Failed to build generator")
}

/// A product page whose photo lives at `image_src`
pub fn product_page(image_src: &str) -> String {
    format!(
        r#"<html><head>
        <title>Deep Sea Fish Oil | Example Shop</title>
        <meta name="description" content="Molecularly distilled fish oil softgels for daily heart support.">
        </head><body>
        <h1 class="product-title">Deep Sea Fish Oil</h1>
        <span class="price">$29.99</span>
        <img class="product-image" src="{}" alt="Deep Sea Fish Oil">
        <h2>Key Benefits</h2>
        <ul>
          <li>Supports heart health</li>
          <li>Rich in omega-3 fatty acids</li>
          <li>Third-party tested for purity</li>
        </ul>
        <h2>Directions</h2>
        <ul><li>Take two softgels daily with food</li></ul>
        </body></html>"#,
        image_src
    )
}

/// A small PNG photo
pub fn product_png() -> Vec<u8> {
    let image = RgbaImage::from_pixel(300, 450, Rgba([200, 40, 40, 255]));
    encode_png(&image).expect("Failed to encode fixture")
}
