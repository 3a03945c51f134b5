//! Poster output
//!
//! Derives the download filename from the product name and writes finished
//! posters to disk.

use crate::generator::Poster;
use crate::Result;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appended to every poster filename
pub const FILENAME_SUFFIX: &str = "_poster.png";

/// Used when the product name yields nothing usable
pub const FALLBACK_FILENAME: &str = "product_poster.png";

/// Characters kept from the product name
const NAME_CHARS: usize = 20;

/// Builds the download filename for a product name
///
/// Keeps the first 20 characters, replaces anything a filesystem might
/// reject with `_`, and appends [`FILENAME_SUFFIX`].
///
/// # Example
///
/// ```
/// use product_poster::output::poster_filename;
///
/// assert_eq!(poster_filename("Fish Oil 1000mg"), "Fish Oil 1000mg_poster.png");
/// assert_eq!(poster_filename("A/B: C?"), "A_B_ C__poster.png");
/// ```
pub fn poster_filename(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .take(NAME_CHARS)
        .map(|c| if is_path_hostile(c) { '_' } else { c })
        .collect();
    let stem = stem.trim();

    if stem.is_empty() || stem.chars().all(|c| c == '_' || c == '.') {
        return FALLBACK_FILENAME.to_string();
    }
    format!("{}{}", stem, FILENAME_SUFFIX)
}

fn is_path_hostile(c: char) -> bool {
    matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control()
}

/// Writes `poster` into `dir` under its filename
///
/// # Arguments
///
/// * `dir` - Output directory, created if missing
/// * `poster` - The generated poster
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(PosterError::Io)` - Failed to create the directory or write the file
pub fn write_poster(dir: &Path, poster: &Poster) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(&poster.filename);

    let mut file = File::create(&path)?;
    file.write_all(&poster.png)?;
    tracing::info!("Wrote {} ({} bytes)", path.display(), poster.png.len());

    Ok(path)
}

/// Formats a short plain-text report of a generated poster
pub fn format_report(poster: &Poster, path: &Path) -> String {
    let record = &poster.record;
    let mut out = String::new();

    out.push_str(&format!("Poster: {}\n", path.display()));
    out.push_str(&format!("  Size: {}x{}\n", poster.width, poster.height));
    out.push_str(&format!("  Product: {}\n", record.name));
    if let Some(price) = &record.price {
        out.push_str(&format!("  Price: {}\n", price));
    }
    out.push_str(&format!(
        "  Highlights: {}, Usage: {}\n",
        record.highlights.len(),
        record.usage.len()
    ));
    for warning in &poster.warnings {
        out.push_str(&format!("  Warning: {}\n", warning));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::GenerationWarning;
    use crate::record::ProductRecord;
    use chrono::Utc;
    use tempfile::TempDir;

    fn sample_poster() -> Poster {
        let record = ProductRecord::builder("https://shop.example/p/1")
            .name("Deep Sea Fish Oil")
            .price("$29.99")
            .highlights(["Rich in omega-3", "Third-party tested"])
            .build();
        Poster {
            filename: poster_filename(&record.name),
            record,
            png: vec![0x89, b'P', b'N', b'G'],
            width: 1080,
            height: 1440,
            warnings: vec![GenerationWarning::PlaceholderName],
            generated_at: Utc::now(),
        }
    }

    #[test]
    fn test_poster_filename_truncates() {
        let name = "Ultra Premium Triple Strength Omega-3";
        assert_eq!(poster_filename(name), "Ultra Premium Triple_poster.png");
    }

    #[test]
    fn test_poster_filename_counts_chars_not_bytes() {
        let name = "深海鱼油软胶囊深海鱼油软胶囊深海鱼油软胶囊";
        let filename = poster_filename(name);
        assert_eq!(filename.trim_end_matches(FILENAME_SUFFIX).chars().count(), 20);
    }

    #[test]
    fn test_poster_filename_fallback() {
        assert_eq!(poster_filename(""), FALLBACK_FILENAME);
        assert_eq!(poster_filename("   "), FALLBACK_FILENAME);
        assert_eq!(poster_filename("///"), FALLBACK_FILENAME);
        assert_eq!(poster_filename(".."), FALLBACK_FILENAME);
    }

    #[test]
    fn test_write_poster() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("posters");
        let poster = sample_poster();

        let path = write_poster(&out, &poster).unwrap();
        assert_eq!(path, out.join("Deep Sea Fish Oil_poster.png"));
        assert_eq!(fs::read(&path).unwrap(), poster.png);
    }

    #[test]
    fn test_format_report() {
        let poster = sample_poster();
        let report = format_report(&poster, Path::new("out/p.png"));
        assert!(report.contains("Size: 1080x1440"));
        assert!(report.contains("Price: $29.99"));
        assert!(report.contains("Highlights: 2, Usage: 0"));
        assert!(report.contains("Warning: no product name found"));
    }
}
