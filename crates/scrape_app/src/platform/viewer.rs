//! Results view: reads the handoff store once and renders one card per result.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use client_logging::{client_debug, client_info};
use scrape_core::{results_view, ResultCardView, ResultsViewModel, ScrapeResult};
use scrape_engine::{export_result, get_results, ExportError, KeyValueStore};
use thiserror::Error;

use super::clipboard::Clipboard;

const TITLE: &str = "Scrape Results";
const BODY_INDENT: &str = "    ";

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("no result #{number} ({available} available)")]
    NoSuchResult { number: usize, available: usize },
    #[error("result #{0} failed; only successful snippets can be copied")]
    NotCopyable(usize),
    #[error("clipboard error: {0}")]
    Clipboard(io::Error),
    #[error(transparent)]
    Export(#[from] ExportError),
}

pub struct ResultsViewer {
    results: Vec<ScrapeResult>,
    view: ResultsViewModel,
}

impl ResultsViewer {
    /// Loads the stored results. The store is not read again afterwards.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let results = get_results(store);
        client_debug!("Results view loaded {} result(s)", results.len());
        Self::from_results(results)
    }

    pub fn from_results(results: Vec<ScrapeResult>) -> Self {
        let view = results_view(&results);
        Self { results, view }
    }

    pub fn view(&self) -> &ResultsViewModel {
        &self.view
    }

    pub fn render<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{TITLE}")?;
        writeln!(out, "{}", "=".repeat(TITLE.len()))?;
        if let Some(message) = self.view.empty_message {
            writeln!(out, "{message}")?;
            return Ok(());
        }
        for card in &self.view.cards {
            render_card(out, card)?;
        }
        Ok(())
    }

    /// Copies the snippet of result `number` (1-based).
    pub fn copy<C: Clipboard + ?Sized>(
        &self,
        number: usize,
        clipboard: &mut C,
    ) -> Result<(), ViewerError> {
        let card = self.card(number)?;
        if !card.can_copy {
            return Err(ViewerError::NotCopyable(number));
        }
        clipboard.copy(&card.body).map_err(ViewerError::Clipboard)?;
        client_info!("Copied snippet of result #{} ({})", number, card.url);
        Ok(())
    }

    /// Exports result `number` (1-based) into `dir`.
    pub fn export(&self, number: usize, dir: &Path) -> Result<PathBuf, ViewerError> {
        let path = export_result(dir, &self.results, number)?;
        client_info!("Exported result #{} to {:?}", number, path);
        Ok(path)
    }

    fn card(&self, number: usize) -> Result<&ResultCardView, ViewerError> {
        number
            .checked_sub(1)
            .and_then(|index| self.view.cards.get(index))
            .ok_or(ViewerError::NoSuchResult {
                number,
                available: self.view.cards.len(),
            })
    }
}

fn render_card<W: Write>(out: &mut W, card: &ResultCardView) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "#{} [{}] {}", card.number, card.status_label, card.url)?;
    for line in card.body.lines() {
        writeln!(out, "{BODY_INDENT}{line}")?;
    }
    if card.can_copy {
        writeln!(
            out,
            "{BODY_INDENT}(--copy {n} | --export {n} -> {})",
            card.export_filename,
            n = card.number
        )?;
    } else {
        writeln!(
            out,
            "{BODY_INDENT}(--export {} -> {})",
            card.number, card.export_filename
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use scrape_engine::{put_results, MemoryStore};

    use super::*;

    struct RecordingClipboard(Vec<String>);

    impl Clipboard for RecordingClipboard {
        fn copy(&mut self, text: &str) -> io::Result<()> {
            self.0.push(text.to_string());
            Ok(())
        }
    }

    fn sample() -> Vec<ScrapeResult> {
        vec![
            ScrapeResult::succeeded("https://a.test", "<h1>A</h1>\n<p>body</p>"),
            ScrapeResult::failed("https://b.test", "timeout"),
        ]
    }

    fn rendered(viewer: &ResultsViewer) -> String {
        let mut out = Vec::new();
        viewer.render(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn empty_store_shows_no_results_message() {
        let viewer = ResultsViewer::load(&MemoryStore::new());
        assert_eq!(rendered(&viewer), "Scrape Results\n==============\nNo results found.\n");
    }

    #[test]
    fn renders_one_card_per_result_in_stored_order() {
        let mut store = MemoryStore::new();
        put_results(&mut store, &sample()).unwrap();
        let viewer = ResultsViewer::load(&store);

        assert_eq!(
            rendered(&viewer),
            "Scrape Results\n\
             ==============\n\
             \n\
             #1 [Success] https://a.test\n    <h1>A</h1>\n    <p>body</p>\n    \
             (--copy 1 | --export 1 -> result-1.json)\n\
             \n\
             #2 [Error] https://b.test\n    timeout\n    (--export 2 -> result-2.json)\n"
        );
    }

    #[test]
    fn copy_places_snippet_on_clipboard() {
        let viewer = ResultsViewer::from_results(sample());
        let mut clipboard = RecordingClipboard(Vec::new());
        viewer.copy(1, &mut clipboard).unwrap();
        assert_eq!(clipboard.0, vec!["<h1>A</h1>\n<p>body</p>".to_string()]);
    }

    #[test]
    fn copy_refuses_failed_and_missing_results() {
        let viewer = ResultsViewer::from_results(sample());
        let mut clipboard = RecordingClipboard(Vec::new());
        assert!(matches!(
            viewer.copy(2, &mut clipboard),
            Err(ViewerError::NotCopyable(2))
        ));
        assert!(matches!(
            viewer.copy(0, &mut clipboard),
            Err(ViewerError::NoSuchResult { number: 0, available: 2 })
        ));
        assert!(matches!(
            viewer.copy(3, &mut clipboard),
            Err(ViewerError::NoSuchResult { number: 3, available: 2 })
        ));
        assert!(clipboard.0.is_empty());
    }

    #[test]
    fn export_writes_numbered_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let viewer = ResultsViewer::from_results(sample());
        let path = viewer.export(2, temp.path()).unwrap();
        assert_eq!(path, temp.path().join("result-2.json"));
        let written = std::fs::read_to_string(path).unwrap();
        assert!(written.contains("\"error\": \"timeout\""));
    }
}
