use http::header::HOST;
use http::{HeaderMap, Uri};

/// Builds the `https://` URL a plain-text request should be redirected to.
///
/// The host comes from the Host header, falling back to the authority of the request
/// target (HTTP/2 requests carry it there). Returns `None` when neither is present.
pub fn create_ssl_redirect_path(headers: &HeaderMap, uri: &Uri) -> Option<String> {
    let host = headers
        .get(HOST)
        .and_then(|host| host.to_str().ok())
        .filter(|host| !host.is_empty())
        .or_else(|| uri.authority().map(|authority| authority.as_str()))?;

    let path = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    Some(format!("https://{host}{path}"))
}
