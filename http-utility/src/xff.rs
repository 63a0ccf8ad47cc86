use http::header::{HeaderMap, HeaderName, HeaderValue};

use crate::address::PeerAddress;

pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Joins every X-Forwarded-For line, in received order, into a single chain.
///
/// Lines that are not visible ASCII are dropped. Returns `None` if nothing is left.
pub fn xff_chain(headers: &HeaderMap) -> Option<String> {
    let lines: Vec<&str> = headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|value| match value.to_str() {
            Ok(line) => Some(line),
            Err(_) => {
                tracing::debug!("Dropping non-visible-ASCII X-Forwarded-For line");
                None
            }
        })
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(", "))
    }
}

/// Appends the peer to X-Forwarded-For, creating the header if needed.
///
/// Repeated X-Forwarded-For lines are folded into one. Pipe peers have no address worth
/// forwarding, so the headers are left untouched.
pub fn append_xff(headers: &mut HeaderMap, peer: &PeerAddress) {
    let Some(ip) = peer.ip() else {
        tracing::trace!(peer = %peer, "Skipping X-Forwarded-For for non-IP peer");
        return;
    };

    let combined = match xff_chain(headers) {
        Some(chain) => format!("{chain}, {ip}"),
        None => ip.to_string(),
    };

    if let Ok(value) = HeaderValue::from_str(&combined) {
        headers.insert(X_FORWARDED_FOR, value);
    }
}

/// Returns the last address of the X-Forwarded-For chain, i.e. the hop appended most
/// recently. Empty if the header is missing or carries no addresses.
pub fn last_address_from_xff(headers: &HeaderMap) -> String {
    let Some(chain) = xff_chain(headers) else {
        return String::new();
    };

    chain
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .next_back()
        .unwrap_or_default()
        .to_string()
}
