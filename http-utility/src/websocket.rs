use http::HeaderMap;
use http::header::{CONNECTION, HeaderName, UPGRADE};

/// True when the request carries `Connection: upgrade` and `Upgrade: websocket`.
///
/// Both values are compared as a whole, ignoring ASCII case.
pub fn is_websocket_upgrade_request(headers: &HeaderMap) -> bool {
    let header_is = |name: HeaderName, expected: &str| {
        headers
            .get(name)
            .is_some_and(|value| value.as_bytes().eq_ignore_ascii_case(expected.as_bytes()))
    };

    header_is(CONNECTION, "upgrade") && header_is(UPGRADE, "websocket")
}
