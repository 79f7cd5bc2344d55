use std::sync::Once;

use scrape_core::{
    update, AppState, BackendOutcome, Effect, Msg, ScrapeRequest, ScrapeResult, SubmissionPhase,
};

const T: &str = "10:00:00";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn with_urls(urls: &[&str]) -> AppState {
    let mut state = AppState::new();
    for (index, url) in urls.iter().enumerate() {
        if index > 0 {
            state = update(state, Msg::UrlAdded).0;
        }
        state = update(
            state,
            Msg::UrlEdited {
                index,
                value: url.to_string(),
            },
        )
        .0;
    }
    state
}

fn submit(state: AppState) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SubmitClicked {
            timestamp: T.to_string(),
        },
    )
}

fn respond(state: AppState, outcome: BackendOutcome) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::BackendResponded {
            timestamp: T.to_string(),
            outcome,
        },
    )
}

fn messages(state: &AppState) -> Vec<String> {
    state.log().iter().map(|e| e.message.clone()).collect()
}

fn sent_request(effects: &[Effect]) -> &ScrapeRequest {
    match effects {
        [Effect::SendScrape(request)] => request,
        other => panic!("expected one SendScrape effect, got {other:?}"),
    }
}

#[test]
fn blank_urls_are_dropped_preserving_order() {
    init_logging();
    let state = with_urls(&["https://a.test", "  ", "https://b.test"]);
    let (state, effects) = submit(state);

    let request = sent_request(&effects);
    assert_eq!(request.urls, vec!["https://a.test", "https://b.test"]);
    assert_eq!(request.rate_limit, 5);
    assert_eq!(request.headers, None);
    assert_eq!(request.proxy, None);
    assert_eq!(request.user_agent, None);
    assert_eq!(state.phase(), SubmissionPhase::AwaitingBackend);
    assert_eq!(
        messages(&state),
        vec!["Starting scrape for 2 URL(s)", "Sending POST /api/scrape"]
    );
}

#[test]
fn urls_are_trimmed_and_duplicates_kept() {
    init_logging();
    let state = with_urls(&["  https://a.test\t", "", "https://a.test", " https://c.test "]);
    let (_state, effects) = submit(state);
    assert_eq!(
        sent_request(&effects).urls,
        vec!["https://a.test", "https://a.test", "https://c.test"]
    );
}

#[test]
fn all_blank_urls_log_one_warning_and_send_nothing() {
    init_logging();
    for slots in [vec![""], vec!["   ", "\t", ""], vec![]] {
        let mut state = with_urls(&slots);
        if slots.is_empty() {
            state = update(state, Msg::UrlRemoved { index: 0 }).0;
        }
        let (state, effects) = submit(state);
        assert!(effects.is_empty());
        assert_eq!(messages(&state), vec!["No URLs provided."]);
        assert_eq!(state.log()[0].timestamp, T);
        assert_eq!(state.phase(), SubmissionPhase::Idle);
    }
}

#[test]
fn optional_fields_included_only_when_present() {
    init_logging();
    let state = with_urls(&["https://a.test"]);
    let (state, _) = update(state, Msg::RateLimitChanged(17));
    let (state, _) = update(
        state,
        Msg::HeadersChanged("Accept: */*\nbadline\nX: \n: value".to_string()),
    );
    let (state, _) = update(state, Msg::ProxyChanged("  http://p:1  ".to_string()));
    let (state, _) = update(state, Msg::UserAgentChanged("   ".to_string()));
    let (_state, effects) = submit(state);

    let request = sent_request(&effects);
    assert_eq!(request.rate_limit, 17);
    let headers = request.headers.as_ref().expect("headers present");
    assert_eq!(headers.len(), 1);
    assert_eq!(headers.get("Accept").map(String::as_str), Some("*/*"));
    assert_eq!(request.proxy.as_deref(), Some("http://p:1"));
    assert_eq!(request.user_agent, None);
}

#[test]
fn new_submission_clears_previous_log() {
    init_logging();
    let (state, _) = submit(with_urls(&["https://a.test"]));
    let (state, _) = respond(
        state,
        BackendOutcome::Transport {
            reason: "connection refused".to_string(),
        },
    );
    assert_eq!(state.log().len(), 3);

    let (state, _) = update(
        state,
        Msg::UrlEdited {
            index: 0,
            value: String::new(),
        },
    );
    let epoch = state.log_epoch();
    let (state, _) = submit(state);
    assert_eq!(messages(&state), vec!["No URLs provided."]);
    assert_eq!(state.log_epoch(), epoch + 1);
}

#[test]
fn second_submit_while_in_flight_is_ignored() {
    init_logging();
    let (state, effects) = submit(with_urls(&["https://a.test"]));
    assert_eq!(effects.len(), 1);
    let log_before = state.log().to_vec();

    let (state, effects) = submit(state);
    assert!(effects.is_empty());
    assert_eq!(state.log(), log_before.as_slice());
    assert_eq!(state.phase(), SubmissionPhase::AwaitingBackend);
}

#[test]
fn transport_failure_aborts() {
    init_logging();
    let (state, _) = submit(with_urls(&["https://a.test"]));
    let (state, effects) = respond(
        state,
        BackendOutcome::Transport {
            reason: "connection refused".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SubmissionPhase::Idle);
    assert_eq!(
        messages(&state).last().map(String::as_str),
        Some("Network error: connection refused")
    );
}

#[test]
fn server_error_logs_status_and_body_without_storing() {
    init_logging();
    let (state, _) = submit(with_urls(&["https://a.test"]));
    let (state, effects) = respond(
        state,
        BackendOutcome::Server {
            status: 500,
            body: "internal error".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SubmissionPhase::Idle);
    let log = messages(&state);
    assert_eq!(log[2..], ["HTTP 500", "Server error 500: internal error"]);
}

#[test]
fn decode_failure_aborts() {
    init_logging();
    let (state, _) = submit(with_urls(&["https://a.test"]));
    let (state, effects) = respond(
        state,
        BackendOutcome::Decode {
            status: 200,
            reason: "expected value at line 1 column 1".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SubmissionPhase::Idle);
    assert!(messages(&state)
        .last()
        .unwrap()
        .starts_with("JSON parse error: "));
}

#[test]
fn received_results_are_logged_in_backend_order_then_stored() {
    init_logging();
    let (state, _) = submit(with_urls(&["https://a.test", "https://b.test"]));
    // Reversed on purpose: the backend's order is what gets logged.
    let results = vec![
        ScrapeResult::failed("https://b.test", "timeout"),
        ScrapeResult::succeeded("https://a.test", "<html/>"),
    ];
    let (state, effects) = respond(
        state,
        BackendOutcome::Received {
            status: 200,
            results: results.clone(),
        },
    );

    assert_eq!(effects, vec![Effect::StoreResults(results)]);
    assert_eq!(state.phase(), SubmissionPhase::StoringResults);
    assert_eq!(
        messages(&state)[2..],
        [
            "HTTP 200",
            "Received 2 item(s)",
            "[ERR] https://b.test -> timeout",
            "[OK] https://a.test",
            "Scrape complete",
        ]
    );
}

#[test]
fn stored_results_trigger_presentation_and_refusal_is_a_warning() {
    init_logging();
    let (state, _) = submit(with_urls(&["https://a.test"]));
    let (state, _) = respond(
        state,
        BackendOutcome::Received {
            status: 200,
            results: vec![ScrapeResult::succeeded("https://a.test", "ok")],
        },
    );
    let (state, effects) = update(
        state,
        Msg::ResultsStored {
            timestamp: T.to_string(),
        },
    );
    assert_eq!(effects, vec![Effect::PresentResults]);
    assert_eq!(state.phase(), SubmissionPhase::PresentingResults);
    assert!(state.view().submitting);

    let (state, effects) = update(
        state,
        Msg::ResultsPresented {
            timestamp: T.to_string(),
            refused: Some("popup blocked".to_string()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SubmissionPhase::Idle);
    assert_eq!(
        messages(&state).last().map(String::as_str),
        Some("Could not open results view: popup blocked")
    );
}

#[test]
fn store_failure_ends_submission_without_presenting() {
    init_logging();
    let (state, _) = submit(with_urls(&["https://a.test"]));
    let (state, _) = respond(
        state,
        BackendOutcome::Received {
            status: 200,
            results: Vec::new(),
        },
    );
    let (state, effects) = update(
        state,
        Msg::ResultsStoreFailed {
            timestamp: T.to_string(),
            reason: "disk full".to_string(),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state.phase(), SubmissionPhase::Idle);
    assert_eq!(
        messages(&state).last().map(String::as_str),
        Some("Failed to store results: disk full")
    );
}

#[test]
fn backend_reply_without_submission_is_ignored() {
    init_logging();
    let state = AppState::new();
    let (next, effects) = respond(
        state.clone(),
        BackendOutcome::Received {
            status: 200,
            results: vec![ScrapeResult::succeeded("https://a.test", "ok")],
        },
    );
    assert!(effects.is_empty());
    assert_eq!(next, state);
}
