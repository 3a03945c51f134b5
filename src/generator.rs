//! Poster generation pipeline
//!
//! One request runs: validate → fetch → extract → merge overrides → load
//! assets → compose → rasterize → encode. The product photo download and
//! the QR render run concurrently; composition waits for both.
//!
//! A generator runs at most one request at a time. A second `generate`
//! while one is in flight fails immediately with [`PosterError::Busy`].

use crate::config::{Config, ImageFitMode};
use crate::extract::extract_product;
use crate::fetcher::{build_asset_client, build_http_client, fetch_image, fetch_page};
use crate::layout::{AssetSet, AssetState, CanvasSize, Composer, Style};
use crate::output::poster_filename;
use crate::record::{ProductRecord, RecordOverrides};
use crate::render::{encode_png, paint, render_qr, AssetError, FontBook, ImageSources, RasterSurface};
use crate::url::{normalize_target_url, route_for};
use crate::{PosterError, Result};
use chrono::{DateTime, Utc};
use image::RgbaImage;
use reqwest::Client;
use std::fmt;
use std::sync::{Mutex, PoisonError};
use tokio::sync::Semaphore;

/// One generation request
#[derive(Debug, Clone, Default)]
pub struct GenerateRequest {
    /// Product page URL as typed by the user
    pub url: String,
    /// Manual values merged over the extracted record
    pub overrides: RecordOverrides,
    /// Overrides the configured image fit (simple vs card layout)
    pub image_fit: Option<ImageFitMode>,
}

impl GenerateRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }
}

/// A degraded part of an otherwise successful poster
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationWarning {
    /// The product photo could not be loaded; its box was left empty
    ProductImage { url: String, message: String },
    /// The QR code could not be rendered; its frame was left empty
    QrCode { message: String },
    /// No extraction tier found a product name
    PlaceholderName,
}

impl fmt::Display for GenerationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ProductImage { url, message } => {
                write!(f, "product image {} was not drawn: {}", url, message)
            }
            Self::QrCode { message } => write!(f, "QR code was not drawn: {}", message),
            Self::PlaceholderName => f.write_str("no product name found, placeholder used"),
        }
    }
}

/// A finished poster
#[derive(Debug, Clone)]
pub struct Poster {
    pub record: ProductRecord,
    /// PNG-encoded image
    pub png: Vec<u8>,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    pub warnings: Vec<GenerationWarning>,
    pub generated_at: DateTime<Utc>,
}

/// Runs generation requests against one configuration
pub struct PosterGenerator {
    config: Config,
    style: Style,
    client: Client,
    /// Image downloads, which may use plain HTTP
    asset_client: Client,
    fonts: FontBook,
    gate: Semaphore,
    last: Mutex<Option<Poster>>,
}

impl PosterGenerator {
    /// Creates a generator, loading the configured fonts
    pub fn new(config: Config) -> Result<Self> {
        let fonts = FontBook::load(&config.fonts)?;
        Self::with_fonts(config, fonts)
    }

    /// Creates a generator with an already loaded font book
    pub fn with_fonts(config: Config, fonts: FontBook) -> Result<Self> {
        crate::config::validate(&config)?;
        let style = Style::from_config(&config)?;
        let client_error = |e: reqwest::Error| PosterError::Http {
            url: String::new(),
            source: e,
        };
        let client = build_http_client(&config.fetch).map_err(client_error)?;
        let asset_client = build_asset_client(&config.fetch).map_err(client_error)?;

        Ok(Self {
            config,
            style,
            client,
            asset_client,
            fonts,
            gate: Semaphore::new(1),
            last: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetches a page and returns its record without rendering
    pub async fn extract(&self, url: &str) -> Result<ProductRecord> {
        let _permit = self.gate.try_acquire().map_err(|_| PosterError::Busy)?;
        self.fetch_record(url).await
    }

    /// Generates a poster for `request`
    ///
    /// # Errors
    ///
    /// * `PosterError::Busy` - Another request is in flight
    /// * `PosterError::InvalidInput` - Missing, malformed or non-HTTPS URL
    /// * `PosterError::Http` / `Status` / `Timeout` - The page could not be fetched
    /// * `PosterError::Render` - PNG encoding failed
    ///
    /// Image and QR failures are not errors; they show up in
    /// [`Poster::warnings`].
    pub async fn generate(&self, request: GenerateRequest) -> Result<Poster> {
        let _permit = self.gate.try_acquire().map_err(|_| PosterError::Busy)?;

        let record = self
            .fetch_record(&request.url)
            .await?
            .with_overrides(&request.overrides);
        let mut warnings = Vec::new();
        if record.has_placeholder_name() {
            tracing::warn!("No product name found on {}", record.url);
            warnings.push(GenerationWarning::PlaceholderName);
        }

        let (product, qr) = tokio::join!(self.load_product_image(&record), self.load_qr(&record));

        let product = match product {
            Some(Ok(image)) => Some(image),
            Some(Err(e)) => {
                tracing::warn!("{}", e);
                warnings.push(GenerationWarning::ProductImage {
                    url: record.image.clone().unwrap_or_default(),
                    message: e.to_string(),
                });
                None
            }
            None => None,
        };
        let qr = match qr {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::warn!("QR render failed: {}", e);
                warnings.push(GenerationWarning::QrCode {
                    message: e.to_string(),
                });
                None
            }
        };

        let assets = AssetSet {
            product: asset_state(record.image.is_some(), product.as_ref()),
            qr: asset_state(true, qr.as_ref()),
        };

        let style = match request.image_fit {
            Some(fit) => self.style.clone().with_image_fit(fit),
            None => self.style.clone(),
        };
        let canvas = CanvasSize::from(&self.config.canvas);
        let png = self.rasterize(&record, canvas, &style, &assets, product.as_ref(), qr.as_ref())?;

        let poster = Poster {
            filename: poster_filename(&record.name),
            record,
            png,
            width: canvas.width,
            height: canvas.height,
            warnings,
            generated_at: Utc::now(),
        };
        tracing::info!(
            "Generated {} ({} bytes, {} warnings)",
            poster.filename,
            poster.png.len(),
            poster.warnings.len()
        );

        *self.last.lock().unwrap_or_else(PoisonError::into_inner) = Some(poster.clone());
        Ok(poster)
    }

    /// The most recent successful poster, kept for re-download
    pub fn last_generated(&self) -> Option<Poster> {
        self.last
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn fetch_record(&self, url: &str) -> Result<ProductRecord> {
        let fetch = &self.config.fetch;
        let target = normalize_target_url(url, fetch.allow_insecure)?;
        let route = route_for(&target, fetch.relay_base.as_deref())?;

        let page = fetch_page(&self.client, &route).await?;
        let record = extract_product(&page.html, &page.url);
        tracing::info!("Extracted product '{}'", record.name);
        Ok(record)
    }

    async fn load_product_image(&self, record: &ProductRecord) -> Option<std::result::Result<RgbaImage, AssetError>> {
        let url = record.image.as_deref()?;
        Some(fetch_image(&self.asset_client, url).await)
    }

    async fn load_qr(&self, record: &ProductRecord) -> std::result::Result<RgbaImage, AssetError> {
        Ok(render_qr(&record.url, self.config.layout.qr_size)?)
    }

    fn rasterize(
        &self,
        record: &ProductRecord,
        canvas: CanvasSize,
        style: &Style,
        assets: &AssetSet,
        product: Option<&RgbaImage>,
        qr: Option<&RgbaImage>,
    ) -> Result<Vec<u8>> {
        let composer = Composer::new(canvas, style, &self.fonts);
        let commands = composer.compose(record, assets);
        tracing::debug!("Composed {} draw commands", commands.len());

        let mut surface = RasterSurface::new(canvas.width, canvas.height, &self.fonts);
        paint(&commands, &mut surface, ImageSources { product, qr });

        encode_png(surface.image()).map_err(|e| PosterError::Render(e.to_string()))
    }
}

fn asset_state(expected: bool, image: Option<&RgbaImage>) -> AssetState {
    match (expected, image) {
        (_, Some(image)) => AssetState::Loaded {
            width: image.width(),
            height: image.height(),
        },
        (true, None) => AssetState::Failed,
        (false, None) => AssetState::Missing,
    }
}
