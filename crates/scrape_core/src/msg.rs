use crate::ScrapeResult;

/// Messages carrying a `timestamp` may append to the live log; the timestamp
/// is the display time of those entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User added an empty URL slot.
    UrlAdded,
    /// User edited the URL slot at `index`.
    UrlEdited { index: usize, value: String },
    /// User removed the URL slot at `index`.
    UrlRemoved { index: usize },
    RateLimitChanged(u32),
    HeadersChanged(String),
    ProxyChanged(String),
    UserAgentChanged(String),
    /// User asked to scrape the current form.
    SubmitClicked { timestamp: String },
    /// The backend call finished.
    BackendResponded {
        timestamp: String,
        outcome: BackendOutcome,
    },
    /// Results were written to the handoff store.
    ResultsStored { timestamp: String },
    /// Writing results to the handoff store failed.
    ResultsStoreFailed { timestamp: String, reason: String },
    /// The results view was opened, or refused with a reason.
    ResultsPresented {
        timestamp: String,
        refused: Option<String>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}

/// Classified result of one backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendOutcome {
    /// 2xx with a well-formed result array.
    Received {
        status: u16,
        results: Vec<ScrapeResult>,
    },
    /// No response was received.
    Transport { reason: String },
    /// Non-2xx status.
    Server { status: u16, body: String },
    /// 2xx but the body was not a result array.
    Decode { status: u16, reason: String },
}
