use std::io::{self, Write};
use std::path::PathBuf;
use std::process::Command;
use std::sync::Arc;

use client_logging::{client_info, client_warn};
use scrape_core::LogEntry;
use scrape_engine::{Clock, LogObserver, PresentError, ResultsPresenter};

/// Wall-clock time of day, as shown next to live log entries.
pub fn local_clock() -> Clock {
    Arc::new(|| chrono::Local::now().format("%H:%M:%S").to_string())
}

/// Prints live log entries as they arrive, always following the newest one.
pub struct TerminalLogView<W: Write> {
    out: W,
    epoch: Option<u64>,
    shown: usize,
}

impl TerminalLogView<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalLogView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            epoch: None,
            shown: 0,
        }
    }

    fn write_new(&mut self, epoch: u64, log: &[LogEntry]) -> io::Result<()> {
        if self.epoch != Some(epoch) {
            if self.epoch.is_some() && self.shown > 0 {
                writeln!(self.out)?;
            }
            self.epoch = Some(epoch);
            self.shown = 0;
        }
        for entry in log.iter().skip(self.shown) {
            writeln!(self.out, "{entry}")?;
        }
        self.shown = log.len();
        self.out.flush()
    }
}

impl<W: Write> LogObserver for TerminalLogView<W> {
    fn render(&mut self, epoch: u64, log: &[LogEntry]) {
        if let Err(err) = self.write_new(epoch, log) {
            client_warn!("Failed to print live log: {}", err);
        }
    }
}

/// Opens the results view as a second `fastscraper results` process reading
/// the same handoff store.
pub struct ViewerProcessPresenter {
    program: PathBuf,
    store_dir: PathBuf,
    config: Option<PathBuf>,
}

impl ViewerProcessPresenter {
    pub fn new(store_dir: PathBuf, config: Option<PathBuf>) -> io::Result<Self> {
        Ok(Self {
            program: std::env::current_exe()?,
            store_dir,
            config,
        })
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.arg("--store-dir").arg(&self.store_dir);
        if let Some(config) = &self.config {
            command.arg("--config").arg(config);
        }
        command.arg("results");
        command
    }
}

impl ResultsPresenter for ViewerProcessPresenter {
    fn present_results(&mut self) -> Result<(), PresentError> {
        client_info!("Opening results view from {:?}", self.store_dir);
        let status = self.command().status()?;
        if status.success() {
            Ok(())
        } else {
            Err(PresentError::Refused(format!("results view exited with {status}")))
        }
    }
}

/// Used with `--no-open`: leaves the stored results for a manual `fastscraper results`.
pub struct DisabledPresenter;

impl ResultsPresenter for DisabledPresenter {
    fn present_results(&mut self) -> Result<(), PresentError> {
        Err(PresentError::Refused(
            "disabled by --no-open; run `fastscraper results` to view them".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry::new("10:00:00", message)
    }

    fn printed(view: &TerminalLogView<Vec<u8>>) -> String {
        String::from_utf8(view.out.clone()).unwrap()
    }

    #[test]
    fn prints_only_new_entries() {
        let mut view = TerminalLogView::new(Vec::new());
        let mut log = vec![entry("Starting scrape for 1 URL(s)")];
        view.render(1, &log);
        log.push(entry("HTTP 200"));
        view.render(1, &log);
        view.render(1, &log);

        assert_eq!(
            printed(&view),
            "[10:00:00] Starting scrape for 1 URL(s)\n[10:00:00] HTTP 200\n"
        );
    }

    #[test]
    fn new_epoch_starts_a_fresh_block_even_at_same_length() {
        let mut view = TerminalLogView::new(Vec::new());
        view.render(1, &[entry("No URLs provided.")]);
        view.render(2, &[entry("No URLs provided.")]);

        assert_eq!(
            printed(&view),
            "[10:00:00] No URLs provided.\n\n[10:00:00] No URLs provided.\n"
        );
    }

    #[test]
    fn viewer_command_targets_results_with_store_dir() {
        let presenter = ViewerProcessPresenter {
            program: PathBuf::from("fastscraper"),
            store_dir: PathBuf::from("/tmp/session"),
            config: Some(PathBuf::from("custom.ron")),
        };
        let command = presenter.command();
        let args: Vec<_> = command
            .get_args()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            args,
            ["--store-dir", "/tmp/session", "--config", "custom.ron", "results"]
        );
    }

    #[test]
    fn disabled_presenter_refuses() {
        assert!(matches!(
            DisabledPresenter.present_results(),
            Err(PresentError::Refused(_))
        ));
    }
}
