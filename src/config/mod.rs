//! Configuration module for the poster generator
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file) yields the stock
//! 1080x1440 layout.
//!
//! # Example
//!
//! ```no_run
//! use product_poster::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("poster.toml")).unwrap();
//! println!("QR size: {}", config.layout.qr_size);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    BrandConfig, CanvasConfig, ColorConfig, Config, FetchConfig, FontConfig, ImageFitMode,
    LabelConfig, LayoutConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
