use crate::{export_filename, ResultOutcome, ScrapeResult};

pub const NO_RESULTS_MESSAGE: &str = "No results found.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormView {
    pub url_slots: Vec<String>,
    pub rate_limit: u32,
    pub headers_text: String,
    pub proxy: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub form: FormView,
    /// Rendered `[timestamp] message` lines, oldest first.
    pub log_lines: Vec<String>,
    pub submitting: bool,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCardView {
    /// 1-based position in the stored result set.
    pub number: usize,
    pub url: String,
    pub success: bool,
    pub status_label: &'static str,
    /// The snippet on success, the error text otherwise.
    pub body: String,
    pub can_copy: bool,
    pub export_filename: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResultsViewModel {
    pub cards: Vec<ResultCardView>,
    pub empty_message: Option<&'static str>,
}

pub fn results_view(results: &[ScrapeResult]) -> ResultsViewModel {
    let cards: Vec<ResultCardView> = results
        .iter()
        .enumerate()
        .map(|(index, result)| {
            let (success, body) = match result.outcome() {
                ResultOutcome::Snippet(snippet) => (true, snippet),
                ResultOutcome::Error(error) => (false, error),
            };
            ResultCardView {
                number: index + 1,
                url: result.url.clone(),
                success,
                status_label: if success { "Success" } else { "Error" },
                body: body.to_string(),
                can_copy: success,
                export_filename: export_filename(index),
            }
        })
        .collect();
    let empty_message = cards.is_empty().then_some(NO_RESULTS_MESSAGE);
    ResultsViewModel {
        cards,
        empty_message,
    }
}
