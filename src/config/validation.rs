use crate::config::types::{CanvasConfig, ColorConfig, Config, FetchConfig, LayoutConfig};
use crate::layout::Color;
use crate::ConfigError;
use url::Url;

const MAX_CANVAS_SIDE: u32 = 8192;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_canvas_config(&config.canvas)?;
    validate_layout_config(&config.layout, &config.canvas)?;
    validate_color_config(&config.colors)?;
    validate_fetch_config(&config.fetch)?;
    Ok(())
}

/// Validates canvas dimensions
fn validate_canvas_config(canvas: &CanvasConfig) -> Result<(), ConfigError> {
    for (name, value) in [("width", canvas.width), ("height", canvas.height)] {
        if value == 0 || value > MAX_CANVAS_SIDE {
            return Err(ConfigError::Validation(format!(
                "canvas {} must be between 1 and {}, got {}",
                name, MAX_CANVAS_SIDE, value
            )));
        }
    }
    Ok(())
}

/// Validates layout geometry against the canvas it will be drawn on
fn validate_layout_config(layout: &LayoutConfig, canvas: &CanvasConfig) -> Result<(), ConfigError> {
    if layout.padding * 2 >= canvas.width {
        return Err(ConfigError::Validation(format!(
            "padding {} leaves no content width on a {}px canvas",
            layout.padding, canvas.width
        )));
    }

    if layout.qr_size == 0 || layout.qr_size + layout.padding * 2 > canvas.width {
        return Err(ConfigError::Validation(format!(
            "qr_size must be between 1 and {}, got {}",
            canvas.width.saturating_sub(layout.padding * 2),
            layout.qr_size
        )));
    }

    if layout.qr_size + layout.padding * 2 > canvas.height {
        return Err(ConfigError::Validation(format!(
            "qr_size {} does not fit a {}px tall canvas",
            layout.qr_size, canvas.height
        )));
    }

    if layout.title_max_lines == 0 || layout.item_max_lines == 0 {
        return Err(ConfigError::Validation(
            "title_max_lines and item_max_lines must be at least 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates that every color parses as `#rrggbb`
fn validate_color_config(colors: &ColorConfig) -> Result<(), ConfigError> {
    for value in [
        &colors.background,
        &colors.primary,
        &colors.secondary,
        &colors.accent,
        &colors.gold,
        &colors.light_bg,
        &colors.border,
    ] {
        Color::from_hex(value)?;
    }
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(fetch: &FetchConfig) -> Result<(), ConfigError> {
    if fetch.timeout_secs == 0 || fetch.timeout_secs > 120 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 120, got {}",
            fetch.timeout_secs
        )));
    }

    if fetch.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if let Some(relay) = &fetch.relay_base {
        let url = Url::parse(relay)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid relay_base: {}", e)))?;

        let scheme_ok = url.scheme() == "https" || (fetch.allow_insecure && url.scheme() == "http");
        if !scheme_ok {
            return Err(ConfigError::Validation(format!(
                "relay_base '{}' must use HTTPS scheme",
                relay
            )));
        }
    }

    Ok(())
}
