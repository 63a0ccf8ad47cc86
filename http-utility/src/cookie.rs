use http::HeaderMap;
use http::header::COOKIE;

/// One `key=value` segment of a cookie header.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CookiePair<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

/// Iterates the `key=value` segments of a single cookie header value.
///
/// Segments that are empty, have no `=`, or have an empty key are skipped. The value is
/// unwrapped from one pair of double quotes only when both quotes are present, so
/// `"foobar` comes back as-is.
pub fn cookie_pairs(header_value: &str) -> impl Iterator<Item = CookiePair<'_>> {
    header_value.split(';').filter_map(|segment| {
        let (key, value) = segment.trim().split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }

        Some(CookiePair {
            key,
            value: unquote(value),
        })
    })
}

fn unquote(value: &str) -> &str {
    if value.len() >= 2 && value.starts_with('"') && value.ends_with('"') {
        &value[1..value.len() - 1]
    } else {
        value
    }
}

/// Returns the value of the cookie named `key`, or an empty string if no cookie header has it.
///
/// Repeated cookie headers are searched in the order they were received; the first match
/// wins. Key comparison is case-sensitive.
pub fn parse_cookie_value(headers: &HeaderMap, key: &str) -> String {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(cookie_pairs)
        .find(|pair| pair.key == key)
        .map(|pair| pair.value.to_string())
        .unwrap_or_default()
}
