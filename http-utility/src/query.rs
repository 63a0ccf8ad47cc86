/// Query parameters in the order they appear in the request target. Repeated keys are kept
/// as separate entries.
pub type QueryParams = Vec<(String, String)>;

/// Splits the query component of `path_and_query` into key/value pairs.
///
/// A key without `=` gets an empty value. Empty segments (`a=1&&b=2`, `a=&`) are skipped.
/// Keys and values are returned as they appear, without percent-decoding.
pub fn parse_query_string(path_and_query: &str) -> QueryParams {
    let Some((_, query)) = path_and_query.split_once('?') else {
        return QueryParams::new();
    };

    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
            (key.to_string(), value.to_string())
        })
        .collect()
}
