use client_logging::{client_debug, client_info};

use crate::{
    build_request, AppState, BackendOutcome, Effect, Msg, ResultOutcome, ScrapeResult,
    SubmissionPhase, ValidationError, SCRAPE_ENDPOINT,
};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::UrlAdded => {
            state.form_mut().urls.append_slot();
            Vec::new()
        }
        Msg::UrlEdited { index, value } => {
            state.form_mut().urls.update_slot(index, value);
            Vec::new()
        }
        Msg::UrlRemoved { index } => {
            state.form_mut().urls.remove_slot(index);
            Vec::new()
        }
        Msg::RateLimitChanged(rate_limit) => {
            state.form_mut().rate_limit = rate_limit;
            Vec::new()
        }
        Msg::HeadersChanged(text) => {
            state.form_mut().headers_text = text;
            Vec::new()
        }
        Msg::ProxyChanged(proxy) => {
            state.form_mut().proxy = proxy;
            Vec::new()
        }
        Msg::UserAgentChanged(user_agent) => {
            state.form_mut().user_agent = user_agent;
            Vec::new()
        }
        Msg::SubmitClicked { timestamp } => {
            // A submission in flight is never replaced or queued behind.
            if state.phase() != SubmissionPhase::Idle {
                client_debug!("Submit ignored; phase={:?}", state.phase());
                return (state, Vec::new());
            }
            state.clear_log();
            match build_request(state.form()) {
                Err(ValidationError::NoUrls) => {
                    state.append_log(&timestamp, "No URLs provided.");
                    Vec::new()
                }
                Ok(request) => {
                    client_info!("Submitting {} url(s)", request.urls.len());
                    state.append_log(
                        &timestamp,
                        format!("Starting scrape for {} URL(s)", request.urls.len()),
                    );
                    state.append_log(&timestamp, format!("Sending POST {SCRAPE_ENDPOINT}"));
                    state.set_phase(SubmissionPhase::AwaitingBackend);
                    vec![Effect::SendScrape(request)]
                }
            }
        }
        Msg::BackendResponded { timestamp, outcome } => {
            if state.phase() != SubmissionPhase::AwaitingBackend {
                client_debug!("Stale backend reply ignored; phase={:?}", state.phase());
                return (state, Vec::new());
            }
            apply_backend_outcome(&mut state, &timestamp, outcome)
        }
        Msg::ResultsStored { .. } => {
            if state.phase() == SubmissionPhase::StoringResults {
                state.set_phase(SubmissionPhase::PresentingResults);
                vec![Effect::PresentResults]
            } else {
                Vec::new()
            }
        }
        Msg::ResultsStoreFailed { timestamp, reason } => {
            if state.phase() == SubmissionPhase::StoringResults {
                state.append_log(&timestamp, format!("Failed to store results: {reason}"));
                state.set_phase(SubmissionPhase::Idle);
            }
            Vec::new()
        }
        Msg::ResultsPresented { timestamp, refused } => {
            if state.phase() == SubmissionPhase::PresentingResults {
                if let Some(reason) = refused {
                    state.append_log(
                        &timestamp,
                        format!("Could not open results view: {reason}"),
                    );
                }
                state.set_phase(SubmissionPhase::Idle);
            }
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn apply_backend_outcome(
    state: &mut AppState,
    timestamp: &str,
    outcome: BackendOutcome,
) -> Vec<Effect> {
    match outcome {
        BackendOutcome::Transport { reason } => {
            state.append_log(timestamp, format!("Network error: {reason}"));
            state.set_phase(SubmissionPhase::Idle);
            Vec::new()
        }
        BackendOutcome::Server { status, body } => {
            state.append_log(timestamp, format!("HTTP {status}"));
            state.append_log(timestamp, format!("Server error {status}: {body}"));
            state.set_phase(SubmissionPhase::Idle);
            Vec::new()
        }
        BackendOutcome::Decode { status, reason } => {
            state.append_log(timestamp, format!("HTTP {status}"));
            state.append_log(timestamp, format!("JSON parse error: {reason}"));
            state.set_phase(SubmissionPhase::Idle);
            Vec::new()
        }
        BackendOutcome::Received { status, results } => {
            state.append_log(timestamp, format!("HTTP {status}"));
            state.append_log(timestamp, format!("Received {} item(s)", results.len()));
            for result in &results {
                state.append_log(timestamp, result_line(result));
            }
            state.append_log(timestamp, "Scrape complete");
            state.set_phase(SubmissionPhase::StoringResults);
            vec![Effect::StoreResults(results)]
        }
    }
}

fn result_line(result: &ScrapeResult) -> String {
    match result.outcome() {
        ResultOutcome::Snippet(_) => format!("[OK] {}", result.url),
        ResultOutcome::Error(error) => format!("[ERR] {} -> {}", result.url, error),
    }
}
