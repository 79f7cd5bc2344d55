use std::collections::VecDeque;
use std::sync::Arc;

use client_logging::{client_error, client_info, client_warn};
use scrape_core::{update, AppState, AppViewModel, Effect, FormState, Msg};

use crate::shell::{Clock, LogObserver, ResultsPresenter};
use crate::store::{put_results, KeyValueStore};
use crate::types::map_outcome;
use crate::Backend;

/// Everything a session needs from its host.
pub struct Capabilities<S> {
    pub backend: Arc<dyn Backend>,
    pub store: S,
    pub presenter: Box<dyn ResultsPresenter>,
    pub observer: Box<dyn LogObserver>,
    pub clock: Clock,
}

/// How far a submission got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionReport {
    /// Rejected before any network call (validation, or one already in flight).
    NotSent,
    /// Sent, but no results were stored.
    Failed,
    Stored { count: usize, presented: bool },
}

/// Owns the core state and runs the effects it asks for, one at a time.
pub struct Session<S> {
    state: AppState,
    backend: Arc<dyn Backend>,
    store: S,
    presenter: Box<dyn ResultsPresenter>,
    observer: Box<dyn LogObserver>,
    clock: Clock,
}

impl<S: KeyValueStore> Session<S> {
    pub fn new(form: FormState, capabilities: Capabilities<S>) -> Self {
        let Capabilities {
            backend,
            store,
            presenter,
            observer,
            clock,
        } = capabilities;
        Self {
            state: AppState::with_form(form),
            backend,
            store,
            presenter,
            observer,
            clock,
        }
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies `msg` and re-renders the log if anything changed.
    pub fn dispatch(&mut self, msg: Msg) -> Vec<Effect> {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        let was_dirty = state.consume_dirty();
        self.state = state;
        if was_dirty {
            self.observer.render(self.state.log_epoch(), self.state.log());
        }
        effects
    }

    /// Runs one full submission of the current form.
    pub async fn submit(&mut self) -> SubmissionReport {
        let timestamp = self.now();
        let mut pending: VecDeque<Effect> =
            self.dispatch(Msg::SubmitClicked { timestamp }).into();
        let mut report = SubmissionReport::NotSent;

        while let Some(effect) = pending.pop_front() {
            let msg = self.run_effect(effect, &mut report).await;
            pending.extend(self.dispatch(msg));
        }
        report
    }

    async fn run_effect(&mut self, effect: Effect, report: &mut SubmissionReport) -> Msg {
        match effect {
            Effect::SendScrape(request) => {
                *report = SubmissionReport::Failed;
                let result = self.backend.scrape(&request).await;
                if let Err(err) = &result {
                    client_warn!("Scrape request failed: {}", err);
                }
                Msg::BackendResponded {
                    timestamp: self.now(),
                    outcome: map_outcome(result),
                }
            }
            Effect::StoreResults(results) => match put_results(&mut self.store, &results) {
                Ok(()) => {
                    client_info!("Stored {} result(s) for the results view", results.len());
                    *report = SubmissionReport::Stored {
                        count: results.len(),
                        presented: false,
                    };
                    Msg::ResultsStored {
                        timestamp: self.now(),
                    }
                }
                Err(err) => {
                    client_error!("Failed to store results: {}", err);
                    Msg::ResultsStoreFailed {
                        timestamp: self.now(),
                        reason: err.to_string(),
                    }
                }
            },
            Effect::PresentResults => {
                let refused = match self.presenter.present_results() {
                    Ok(()) => {
                        if let SubmissionReport::Stored { presented, .. } = report {
                            *presented = true;
                        }
                        None
                    }
                    Err(err) => {
                        client_warn!("Results view not opened: {}", err);
                        Some(err.to_string())
                    }
                };
                Msg::ResultsPresented {
                    timestamp: self.now(),
                    refused,
                }
            }
        }
    }

    fn now(&self) -> String {
        (self.clock)()
    }
}
