use crate::UrlError;
use url::Url;

/// Validates and normalizes a user-supplied product page URL
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace; reject if empty
/// 2. Protocol-relative input (`//host/path`) is given the `https:` scheme
/// 3. Parse the URL; reject if malformed
/// 4. Require HTTPS (plain HTTP only when `allow_insecure` is set)
/// 5. Require a host
/// 6. Remove the fragment
///
/// # Arguments
///
/// * `input` - The raw URL string as typed by the user
/// * `allow_insecure` - Accept `http://` targets (local testing)
///
/// # Returns
///
/// * `Ok(Url)` - Normalized absolute URL
/// * `Err(UrlError)` - Missing, malformed, or non-HTTPS input
///
/// # Examples
///
/// ```
/// use product_poster::url::normalize_target_url;
///
/// let url = normalize_target_url("  //shop.example/p1#reviews ", false).unwrap();
/// assert_eq!(url.as_str(), "https://shop.example/p1");
/// ```
pub fn normalize_target_url(input: &str, allow_insecure: bool) -> Result<Url, UrlError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UrlError::Missing);
    }

    let candidate = if trimmed.starts_with("//") {
        format!("https:{}", trimmed)
    } else {
        trimmed.to_string()
    };

    let mut url = Url::parse(&candidate).map_err(|e| UrlError::Parse(e.to_string()))?;

    match url.scheme() {
        "https" => {}
        "http" if allow_insecure => {}
        other => return Err(UrlError::InsecureScheme(other.to_string())),
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    url.set_fragment(None);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_https() {
        let url = normalize_target_url("https://shop.example/p1", false).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/p1");
    }

    #[test]
    fn test_trims_whitespace() {
        let url = normalize_target_url("  https://shop.example/p1\n", false).unwrap();
        assert_eq!(url.as_str(), "https://shop.example/p1");
    }

    #[test]
    fn test_protocol_relative_gets_https() {
        let url = normalize_target_url("//shop.example/p1", false).unwrap();
        assert_eq!(url.scheme(), "https");
    }

    #[test]
    fn test_empty_is_missing() {
        assert!(matches!(
            normalize_target_url("   ", false),
            Err(UrlError::Missing)
        ));
    }

    #[test]
    fn test_relative_is_parse_error() {
        assert!(matches!(
            normalize_target_url("/p1", false),
            Err(UrlError::Parse(_))
        ));
    }

    #[test]
    fn test_http_rejected_by_default() {
        assert!(matches!(
            normalize_target_url("http://shop.example/p1", false),
            Err(UrlError::InsecureScheme(s)) if s == "http"
        ));
    }

    #[test]
    fn test_http_allowed_when_insecure() {
        assert!(normalize_target_url("http://127.0.0.1:8080/p1", true).is_ok());
    }

    #[test]
    fn test_other_schemes_rejected() {
        assert!(normalize_target_url("ftp://shop.example/p1", true).is_err());
        assert!(normalize_target_url("javascript:alert(1)", true).is_err());
    }

    #[test]
    fn test_fragment_removed() {
        let url = normalize_target_url("https://shop.example/p1#tab-2", false).unwrap();
        assert_eq!(url.fragment(), None);
    }
}
