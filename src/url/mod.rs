//! URL handling module
//!
//! This module provides target URL validation, asset URL resolution against
//! the source page, and relay request construction.

mod normalize;
mod resolve;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use normalize::normalize_target_url;
pub use resolve::resolve_asset_url;

/// How a page request reaches its target
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRoute {
    /// Request the target URL itself
    Direct(Url),
    /// Request the target through a CORS relay
    Relay { request: Url, target: Url },
}

impl FetchRoute {
    /// The URL actually sent over the wire
    pub fn request_url(&self) -> &Url {
        match self {
            Self::Direct(url) => url,
            Self::Relay { request, .. } => request,
        }
    }

    /// The product page being fetched
    pub fn target_url(&self) -> &Url {
        match self {
            Self::Direct(url) => url,
            Self::Relay { target, .. } => target,
        }
    }
}

/// Builds the route for fetching `target`
///
/// With a relay base configured the request becomes
/// `<relay_base>?url=<percent-encoded target>`; any query already present
/// on the relay base is kept.
///
/// # Examples
///
/// ```
/// use product_poster::url::{route_for, FetchRoute};
/// use url::Url;
///
/// let target = Url::parse("https://shop.example/p1?id=7").unwrap();
/// let route = route_for(&target, Some("https://relay.example/api/fetch")).unwrap();
/// assert_eq!(
///     route.request_url().as_str(),
///     "https://relay.example/api/fetch?url=https%3A%2F%2Fshop.example%2Fp1%3Fid%3D7"
/// );
/// ```
pub fn route_for(target: &Url, relay_base: Option<&str>) -> Result<FetchRoute, UrlError> {
    let Some(base) = relay_base else {
        return Ok(FetchRoute::Direct(target.clone()));
    };

    let mut request = Url::parse(base).map_err(|e| UrlError::Parse(e.to_string()))?;
    request
        .query_pairs_mut()
        .append_pair("url", target.as_str());

    Ok(FetchRoute::Relay {
        request,
        target: target.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> Url {
        Url::parse("https://shop.example/p1").unwrap()
    }

    #[test]
    fn test_direct_route() {
        let route = route_for(&target(), None).unwrap();
        assert_eq!(route, FetchRoute::Direct(target()));
        assert_eq!(route.request_url(), route.target_url());
    }

    #[test]
    fn test_relay_route_encodes_target() {
        let route = route_for(&target(), Some("https://relay.example/api/fetch")).unwrap();
        assert_eq!(
            route.request_url().as_str(),
            "https://relay.example/api/fetch?url=https%3A%2F%2Fshop.example%2Fp1"
        );
        assert_eq!(route.target_url(), &target());
    }

    #[test]
    fn test_relay_route_keeps_existing_query() {
        let route = route_for(&target(), Some("https://relay.example/fetch?key=abc")).unwrap();
        let pairs: Vec<(String, String)> = route
            .request_url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("key".to_string(), "abc".to_string()),
                ("url".to_string(), "https://shop.example/p1".to_string()),
            ]
        );
    }

    #[test]
    fn test_relay_route_rejects_bad_base() {
        assert!(route_for(&target(), Some("::nope")).is_err());
    }
}
