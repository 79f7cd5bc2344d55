use std::io;
use std::sync::Arc;

use scrape_core::LogEntry;
use thiserror::Error;

/// Produces the display timestamp for new log entries.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

#[derive(Debug, Error)]
pub enum PresentError {
    #[error("{0}")]
    Refused(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Opens the results view on the stored result set.
pub trait ResultsPresenter {
    fn present_results(&mut self) -> Result<(), PresentError>;
}

/// Receives the full live log after every change. `epoch` changes whenever
/// the log was cleared for a new submission.
pub trait LogObserver {
    fn render(&mut self, epoch: u64, log: &[LogEntry]);
}

#[derive(Debug, Default)]
pub struct NullObserver;

impl LogObserver for NullObserver {
    fn render(&mut self, _epoch: u64, _log: &[LogEntry]) {}
}
