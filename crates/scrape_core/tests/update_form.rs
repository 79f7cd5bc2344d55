use std::sync::Once;

use scrape_core::{update, AppState, Msg, DEFAULT_RATE_LIMIT};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn apply(state: AppState, msgs: Vec<Msg>) -> AppState {
    msgs.into_iter().fold(state, |state, msg| update(state, msg).0)
}

#[test]
fn fresh_form_shows_one_blank_slot_and_default_rate() {
    init_logging();
    let view = AppState::new().view();
    assert_eq!(view.form.url_slots, vec![String::new()]);
    assert_eq!(view.form.rate_limit, DEFAULT_RATE_LIMIT);
    assert!(view.log_lines.is_empty());
    assert!(!view.submitting);
}

#[test]
fn url_edits_are_structural_and_ordered() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![
            Msg::UrlEdited {
                index: 0,
                value: " https://a.test ".to_string(),
            },
            Msg::UrlAdded,
            Msg::UrlEdited {
                index: 1,
                value: "not a url".to_string(),
            },
            Msg::UrlAdded,
            Msg::UrlEdited {
                index: 2,
                value: " https://a.test ".to_string(),
            },
            Msg::UrlRemoved { index: 1 },
        ],
    );

    // Raw values are kept verbatim; trimming happens at submit time.
    assert_eq!(
        state.view().form.url_slots,
        vec![" https://a.test ".to_string(), " https://a.test ".to_string()]
    );
}

#[test]
fn removing_every_slot_still_shows_one() {
    init_logging();
    let (mut state, effects) = update(AppState::new(), Msg::UrlRemoved { index: 0 });
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
    assert!(state.form().urls.slots().is_empty());
    assert_eq!(state.view().form.url_slots, vec![String::new()]);
}

#[test]
fn scalar_fields_update_and_mark_dirty() {
    init_logging();
    let state = AppState::new();
    let (state, _) = update(state, Msg::RateLimitChanged(12));
    let (state, _) = update(state, Msg::HeadersChanged("Accept: */*".to_string()));
    let (state, _) = update(state, Msg::ProxyChanged("http://proxy:8080".to_string()));
    let (mut state, _) = update(state, Msg::UserAgentChanged("bot/1.0".to_string()));

    let form = state.view().form;
    assert_eq!(form.rate_limit, 12);
    assert_eq!(form.headers_text, "Accept: */*");
    assert_eq!(form.proxy, "http://proxy:8080");
    assert_eq!(form.user_agent, "bot/1.0");
    assert!(state.consume_dirty());
    assert!(!state.consume_dirty());
}

#[test]
fn view_state_serializes_round_trip() {
    init_logging();
    let state = apply(
        AppState::new(),
        vec![
            Msg::UrlEdited {
                index: 0,
                value: "https://a.test".to_string(),
            },
            Msg::RateLimitChanged(3),
        ],
    );
    let json = serde_json::to_string(&state).unwrap();
    let restored: AppState = serde_json::from_str(&json).unwrap();
    assert_eq!(restored.form(), state.form());
    assert_eq!(restored.log(), state.log());
}
