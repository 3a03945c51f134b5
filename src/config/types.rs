use serde::Deserialize;

/// Main configuration structure for the poster generator
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasConfig,
    pub brand: BrandConfig,
    pub layout: LayoutConfig,
    pub colors: ColorConfig,
    pub labels: LabelConfig,
    pub fetch: FetchConfig,
    pub fonts: FontConfig,
}

/// Output canvas dimensions in pixels
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1440,
        }
    }
}

/// Brand text drawn in the header and footer
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrandConfig {
    /// Brand name shown in the header
    pub name: String,

    /// Website shown bottom-left in the footer
    pub website: String,

    /// Call to action shown under the QR code
    pub tagline: String,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "Select Picks".to_string(),
            website: String::new(),
            tagline: "Scan for details".to_string(),
        }
    }
}

/// How the product photo is placed into its reserved box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImageFitMode {
    /// Whole image visible, letterboxed (simple layout)
    Contain,
    /// Box filled, overflow cropped (card layout)
    Cover,
}

/// Layout geometry in pixels
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub padding: u32,

    #[serde(rename = "header-height")]
    pub header_height: u32,

    #[serde(rename = "product-image-height")]
    pub product_image_height: u32,

    #[serde(rename = "section-gap")]
    pub section_gap: u32,

    #[serde(rename = "qr-size")]
    pub qr_size: u32,

    #[serde(rename = "image-fit")]
    pub image_fit: ImageFitMode,

    #[serde(rename = "title-max-lines")]
    pub title_max_lines: usize,

    #[serde(rename = "description-max-lines")]
    pub description_max_lines: usize,

    /// Line budget for each highlight/usage row
    #[serde(rename = "item-max-lines")]
    pub item_max_lines: usize,

    /// Rows starting below `height - reserve` are dropped
    #[serde(rename = "highlights-footer-reserve")]
    pub highlights_footer_reserve: u32,

    #[serde(rename = "usage-footer-reserve")]
    pub usage_footer_reserve: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 60,
            header_height: 100,
            product_image_height: 500,
            section_gap: 40,
            qr_size: 160,
            image_fit: ImageFitMode::Contain,
            title_max_lines: 2,
            description_max_lines: 3,
            item_max_lines: 2,
            highlights_footer_reserve: 300,
            usage_footer_reserve: 250,
        }
    }
}

/// Color scheme, each value a `#rrggbb` string
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    pub background: String,
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub gold: String,

    #[serde(rename = "light-bg")]
    pub light_bg: String,

    pub border: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            background: "#ffffff".to_string(),
            primary: "#1a1a1a".to_string(),
            secondary: "#666666".to_string(),
            accent: "#c8102e".to_string(),
            gold: "#d4af37".to_string(),
            light_bg: "#f8f9fa".to_string(),
            border: "#e5e5e5".to_string(),
        }
    }
}

/// Section headings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    pub highlights: String,
    pub usage: String,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            highlights: "Highlights".to_string(),
            usage: "How to Use".to_string(),
        }
    }
}

/// Page fetching behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Relay endpoint; when set, pages are fetched as `<relay-base>?url=<target>`
    #[serde(rename = "relay-base")]
    pub relay_base: Option<String>,

    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Accept plain `http://` targets (local testing only)
    #[serde(rename = "allow-insecure")]
    pub allow_insecure: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            relay_base: None,
            timeout_secs: 10,
            user_agent: concat!("product-poster/", env!("CARGO_PKG_VERSION")).to_string(),
            allow_insecure: false,
        }
    }
}

/// Font faces used for measuring and painting text
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    /// Path to the regular TrueType/OpenType face
    pub regular: Option<String>,

    /// Path to the bold face; the regular face is used when absent
    pub bold: Option<String>,
}
