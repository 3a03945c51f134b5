//! Product Poster: turns an e-commerce product page into a promotional image
//!
//! This crate fetches a product page, extracts a canonical [`ProductRecord`]
//! through a tiered strategy table, lays the record out on a fixed-size
//! canvas as a list of draw commands, and rasterizes those commands to PNG.

pub mod config;
pub mod extract;
pub mod fetcher;
pub mod fit;
pub mod generator;
pub mod layout;
pub mod output;
pub mod record;
pub mod render;
pub mod text_flow;
pub mod url;

use thiserror::Error;

/// Main error type for poster generation
#[derive(Debug, Error)]
pub enum PosterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] UrlError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}: {message}")]
    Status {
        url: String,
        status: u16,
        message: String,
    },

    #[error("A poster generation is already in progress")]
    Busy,

    #[error("Render error: {0}")]
    Render(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid color '{0}': expected #rrggbb")]
    InvalidColor(String),

    #[error("Failed to load font {path}: {message}")]
    Font { path: String, message: String },
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("No URL was provided")]
    Missing,

    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Only HTTPS URLs are supported, got: {0}")]
    InsecureScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for poster operations
pub type Result<T> = std::result::Result<T, PosterError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use extract::extract_product;
pub use generator::{GenerateRequest, GenerationWarning, Poster, PosterGenerator};
pub use layout::{Composer, DrawCommand, Style};
pub use record::{ProductRecord, RecordOverrides};
