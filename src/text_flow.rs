//! Greedy line wrapping and clamping against a width measure
//!
//! Wrapping works character by character so scripts without spaces
//! (Chinese product names, for instance) break as naturally as Latin text.
//! The concatenation of the wrapped lines always equals the input.

/// Suffix appended to the last line of clamped text
pub const ELLIPSIS: &str = "…";

/// Font request used for measuring and drawing a run of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    /// Pixel size
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub const fn regular(size: f32) -> Self {
        Self { size, bold: false }
    }

    pub const fn bold(size: f32) -> Self {
        Self { size, bold: true }
    }
}

/// Horizontal extent of rendered text
pub trait TextMeasure {
    /// Width in pixels of `text` set in `font`
    fn width(&self, text: &str, font: FontSpec) -> f32;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn width(&self, text: &str, font: FontSpec) -> f32 {
        (**self).width(text, font)
    }
}

/// Breaks `text` into lines no wider than `max_width`
///
/// A line only exceeds `max_width` when it holds a single character that is
/// wider than the limit on its own.
///
/// # Example
///
/// ```
/// use product_poster::text_flow::wrap;
///
/// let lines = wrap("abcdef", |s: &str| s.chars().count() as f32 * 10.0, 30.0);
/// assert_eq!(lines, vec!["abc", "def"]);
/// ```
pub fn wrap(text: &str, measure: impl Fn(&str) -> f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for c in text.chars() {
        let mut candidate = line.clone();
        candidate.push(c);
        if !line.is_empty() && measure(&candidate) > max_width {
            lines.push(std::mem::take(&mut line));
            line.push(c);
        } else {
            line = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Limits `lines` to `max_lines`, ending the last kept line with an ellipsis
///
/// Returns the kept lines and whether anything was cut. Lines already within
/// the limit are returned unchanged, which makes clamping idempotent.
pub fn clamp(
    mut lines: Vec<String>,
    max_lines: usize,
    measure: impl Fn(&str) -> f32,
    max_width: f32,
) -> (Vec<String>, bool) {
    if lines.len() <= max_lines {
        return (lines, false);
    }
    lines.truncate(max_lines);

    if let Some(last) = lines.last_mut() {
        while !last.is_empty() && measure(&format!("{}{}", last, ELLIPSIS)) > max_width {
            last.pop();
        }
        let trimmed_len = last.trim_end().len();
        last.truncate(trimmed_len);
        last.push_str(ELLIPSIS);
    }
    (lines, true)
}

/// [`wrap`] followed by [`clamp`]
pub fn wrap_clamped(
    text: &str,
    measure: impl Fn(&str) -> f32,
    max_width: f32,
    max_lines: usize,
) -> (Vec<String>, bool) {
    let lines = wrap(text, &measure, max_width);
    clamp(lines, max_lines, &measure, max_width)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn per_char(width: f32) -> impl Fn(&str) -> f32 {
        move |s: &str| s.chars().count() as f32 * width
    }

    #[test]
    fn test_wrap_concatenation_round_trip() {
        let samples = [
            "Omega-3 Fish Oil with high EPA and DHA concentration",
            "深海鱼油软胶囊 支持心脑血管健康",
            "a",
            "   spaced   out   ",
        ];
        for text in samples {
            let lines = wrap(text, per_char(10.0), 70.0);
            assert_eq!(lines.concat(), text);
            for line in &lines {
                assert!(line.chars().count() <= 7);
            }
        }
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap("", per_char(10.0), 100.0).is_empty());
    }

    #[test]
    fn test_single_wide_char_may_overflow() {
        let measure = |s: &str| {
            s.chars()
                .map(|c| if c == 'W' { 50.0 } else { 10.0 })
                .sum::<f32>()
        };
        let lines = wrap("aWb", measure, 30.0);
        assert_eq!(lines, vec!["a", "W", "b"]);
    }

    #[test]
    fn test_wrap_respects_variable_widths() {
        let measure = |s: &str| s.chars().map(|c| if c.is_ascii() { 10.0 } else { 20.0 }).sum::<f32>();
        let lines = wrap("ab鱼油cd", measure, 40.0);
        assert_eq!(lines, vec!["ab鱼", "油cd"]);
    }

    #[test]
    fn test_clamp_within_limit_is_unchanged() {
        let lines = vec!["one".to_string(), "two".to_string()];
        let (out, cut) = clamp(lines.clone(), 2, per_char(10.0), 50.0);
        assert_eq!(out, lines);
        assert!(!cut);
    }

    #[test]
    fn test_clamp_appends_ellipsis_within_width() {
        let lines = wrap("abcdefghijklmnop", per_char(10.0), 50.0);
        assert_eq!(lines.len(), 4);
        let (out, cut) = clamp(lines, 2, per_char(10.0), 50.0);
        assert!(cut);
        assert_eq!(out, vec!["abcde", "fghi…"]);
        assert!(per_char(10.0)(&out[1]) <= 50.0);
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let measure = per_char(12.0);
        let lines = wrap("The quick brown fox jumps over the lazy dog", &measure, 100.0);
        let (once, _) = clamp(lines, 3, &measure, 100.0);
        let (twice, cut) = clamp(once.clone(), 3, &measure, 100.0);
        assert_eq!(once, twice);
        assert!(!cut);
    }

    #[test]
    fn test_clamp_to_zero_lines() {
        let lines = vec!["a".to_string()];
        let (out, cut) = clamp(lines, 0, per_char(10.0), 50.0);
        assert!(out.is_empty());
        assert!(cut);
    }

    #[test]
    fn test_wrap_clamped() {
        let (lines, cut) = wrap_clamped("深海鱼油软胶囊一百二十粒装", per_char(20.0), 100.0, 2);
        assert!(cut);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "深海鱼油软");
        assert!(lines[1].ends_with(ELLIPSIS));
    }
}
