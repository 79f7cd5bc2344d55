use std::collections::BTreeMap;

/// Custom request headers, name to value.
pub type HeaderMap = BTreeMap<String, String>;

/// Parses freeform `key: value` lines into a header map.
///
/// Lines without a colon, or with a blank key or value, are dropped silently.
/// The first colon splits key from value, so values may contain colons.
/// A repeated key keeps its last value.
pub fn parse_header_lines(text: &str) -> HeaderMap {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let (key, value) = line.split_once(':')?;
            let (key, value) = (key.trim(), value.trim());
            if key.is_empty() || value.is_empty() {
                None
            } else {
                Some((key.to_string(), value.to_string()))
            }
        })
        .collect()
}

/// Renders a header map back into `key: value` lines.
pub fn format_header_lines(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}
