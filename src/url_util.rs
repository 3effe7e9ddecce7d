use url::Url;

/// Derives the publisher identifier from a location string.
///
/// The identifier is the URL with its scheme stripped: host plus path, with
/// no trailing slash. Any input yields a defined identifier; strings that do
/// not parse as URLs fall back to the trimmed input so lookups simply miss
/// instead of erroring.
pub fn publisher_id(location: &str) -> String {
    match Url::parse(location) {
        Ok(parsed) if parsed.has_host() => {
            let host = parsed.host_str().unwrap_or_default();
            let path = parsed.path().trim_end_matches('/');
            match parsed.port() {
                Some(port) => format!("{host}:{port}{path}"),
                None => format!("{host}{path}"),
            }
        }
        _ => location.trim().to_string(),
    }
}

/// Normalizes a publisher identifier into the host pattern used to key
/// per-site overrides: the portion before the first `/`, lowercased.
pub fn host_pattern(publisher_id: &str) -> String {
    publisher_id
        .split('/')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

/// Returns true if the location parses as a URL with an http or https scheme.
pub fn is_http_or_https(location: &str) -> bool {
    match Url::parse(location) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https"),
        Err(_) => false,
    }
}
