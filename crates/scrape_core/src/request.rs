use thiserror::Error;

use crate::{parse_header_lines, FormState, ScrapeRequest};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no URLs provided")]
    NoUrls,
}

/// Builds the backend request from the current form.
///
/// URLs are trimmed and blanks dropped, keeping order and duplicates.
/// `rate_limit` is passed through as-is; its range is enforced by the input
/// channel that sets it.
pub fn build_request(form: &FormState) -> Result<ScrapeRequest, ValidationError> {
    let urls: Vec<String> = form
        .urls
        .slots()
        .iter()
        .map(|url| url.trim())
        .filter(|url| !url.is_empty())
        .map(ToOwned::to_owned)
        .collect();
    if urls.is_empty() {
        return Err(ValidationError::NoUrls);
    }

    let headers = parse_header_lines(&form.headers_text);

    Ok(ScrapeRequest {
        urls,
        rate_limit: form.rate_limit,
        headers: (!headers.is_empty()).then_some(headers),
        proxy: non_blank(&form.proxy),
        user_agent: non_blank(&form.user_agent),
    })
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
