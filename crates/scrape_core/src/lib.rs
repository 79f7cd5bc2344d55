//! Scrape client core: pure state machine, request building and view models.
mod effect;
mod headers;
mod model;
mod msg;
mod request;
mod state;
mod update;
mod url_list;
mod view_model;

pub use effect::Effect;
pub use headers::{format_header_lines, parse_header_lines, HeaderMap};
pub use model::{
    export_filename, LogEntry, ResultOutcome, ScrapeRequest, ScrapeResult, DEFAULT_RATE_LIMIT,
    MAX_RATE_LIMIT, MIN_RATE_LIMIT, SCRAPE_ENDPOINT,
};
pub use msg::{BackendOutcome, Msg};
pub use request::{build_request, ValidationError};
pub use state::{AppState, FormState, SubmissionPhase};
pub use update::update;
pub use url_list::UrlList;
pub use view_model::{
    results_view, AppViewModel, FormView, ResultCardView, ResultsViewModel, NO_RESULTS_MESSAGE,
};
