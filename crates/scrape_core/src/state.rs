use serde::{Deserialize, Serialize};

use crate::view_model::{AppViewModel, FormView};
use crate::{LogEntry, UrlList, DEFAULT_RATE_LIMIT};

/// Editable submission inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormState {
    pub urls: UrlList,
    pub rate_limit: u32,
    pub headers_text: String,
    pub proxy: String,
    pub user_agent: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            urls: UrlList::new(),
            rate_limit: DEFAULT_RATE_LIMIT,
            headers_text: String::new(),
            proxy: String::new(),
            user_agent: String::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SubmissionPhase {
    #[default]
    Idle,
    /// Request sent, waiting for the backend.
    AwaitingBackend,
    /// Results received, waiting for the handoff store write.
    StoringResults,
    /// Results stored, waiting for the results view to open.
    PresentingResults,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AppState {
    form: FormState,
    log: Vec<LogEntry>,
    /// Bumped every time the log is cleared.
    log_epoch: u64,
    phase: SubmissionPhase,
    #[serde(skip)]
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_form(form: FormState) -> Self {
        Self {
            form,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            form: FormView {
                url_slots: self.form.urls.visible_slots(),
                rate_limit: self.form.rate_limit,
                headers_text: self.form.headers_text.clone(),
                proxy: self.form.proxy.clone(),
                user_agent: self.form.user_agent.clone(),
            },
            log_lines: self.log.iter().map(ToString::to_string).collect(),
            submitting: self.phase != SubmissionPhase::Idle,
            dirty: self.dirty,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn log(&self) -> &[LogEntry] {
        &self.log
    }

    pub fn log_epoch(&self) -> u64 {
        self.log_epoch
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// Returns whether anything changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn form_mut(&mut self) -> &mut FormState {
        self.dirty = true;
        &mut self.form
    }

    pub(crate) fn set_phase(&mut self, phase: SubmissionPhase) {
        if self.phase != phase {
            self.phase = phase;
            self.dirty = true;
        }
    }

    pub(crate) fn clear_log(&mut self) {
        self.log.clear();
        self.log_epoch += 1;
        self.dirty = true;
    }

    pub(crate) fn append_log(&mut self, timestamp: &str, message: impl Into<String>) {
        self.log.push(LogEntry::new(timestamp, message));
        self.dirty = true;
    }
}
