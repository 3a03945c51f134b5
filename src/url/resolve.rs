use url::Url;

/// Resolves an asset reference found in page markup to an absolute URL
///
/// Relative (`img/p1.jpg`), path-only (`/img/p1.jpg`) and protocol-relative
/// (`//cdn.example/p1.jpg`) forms are joined against the page URL. Already
/// absolute HTTP(S) URLs come back unchanged.
///
/// Returns None if the reference should be dropped:
/// - empty or whitespace-only
/// - `data:`, `javascript:`, `blob:` and other non-HTTP(S) schemes
/// - references that fail to resolve
pub fn resolve_asset_url(raw: &str, page_url: &Url) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    match page_url.join(raw) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute.to_string())
        }
        _ => None,
    }
}
