use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use client_logging::{client_info, client_warn};
use scrape_core::{format_header_lines, FormState, Msg};
use scrape_engine::{
    BackendSettings, Capabilities, FileStore, ReqwestBackend, ResultsPresenter, Session,
    SubmissionReport,
};

use super::cli::{Cli, Command, ResultsArgs, SubmitArgs};
use super::clipboard::Osc52Clipboard;
use super::config::{load_config, AppConfig, DEFAULT_CONFIG_FILENAME};
use super::logging;
use super::shell::{local_clock, DisabledPresenter, TerminalLogView, ViewerProcessPresenter};
use super::viewer::ResultsViewer;

pub fn run_app() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let (config_path, required) = match &cli.config {
        Some(path) => (path.clone(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILENAME), false),
    };
    let config = load_config(&config_path, required)?;
    logging::initialize(config.log_destination, config.level_filter()?);
    client_info!("fastscraper {} starting", env!("CARGO_PKG_VERSION"));

    let store_dir = cli
        .store_dir
        .clone()
        .unwrap_or_else(|| config.resolved_store_dir());

    match cli.command {
        Command::Submit(args) => run_submit(&config, store_dir, cli.config, args),
        Command::Results(args) => run_results(&config, store_dir, args),
    }
}

fn run_submit(
    config: &AppConfig,
    store_dir: PathBuf,
    config_path: Option<PathBuf>,
    args: SubmitArgs,
) -> anyhow::Result<ExitCode> {
    let messages = form_messages(config, &args)?;

    let backend_url = args.backend.as_deref().unwrap_or(&config.backend_url);
    let settings = BackendSettings::parse(backend_url).context("invalid backend URL")?;
    let backend = ReqwestBackend::new(&settings).context("failed to set up HTTP client")?;
    client_info!("Backend endpoint {}", backend.endpoint());

    let presenter: Box<dyn ResultsPresenter> = if args.no_open {
        Box::new(DisabledPresenter)
    } else {
        Box::new(
            ViewerProcessPresenter::new(store_dir.clone(), config_path)
                .context("failed to locate the fastscraper executable")?,
        )
    };

    let mut session = Session::new(
        FormState::default(),
        Capabilities {
            backend: Arc::new(backend),
            store: FileStore::new(store_dir),
            presenter,
            observer: Box::new(TerminalLogView::stdout()),
            clock: local_clock(),
        },
    );
    for msg in messages {
        session.dispatch(msg);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let report = runtime.block_on(session.submit());
    client_info!("Submission finished: {:?}", report);

    Ok(match report {
        SubmissionReport::Stored { .. } => ExitCode::SUCCESS,
        SubmissionReport::NotSent | SubmissionReport::Failed => ExitCode::FAILURE,
    })
}

/// Form edits equivalent to what a user would type: one URL per slot, then
/// the scalar fields. CLI values take precedence over the config.
fn form_messages(config: &AppConfig, args: &SubmitArgs) -> anyhow::Result<Vec<Msg>> {
    let mut urls = args.urls.clone();
    if let Some(path) = &args.urls_file {
        urls.extend(read_lines(path)?);
    }

    let mut header_parts = vec![format_header_lines(&config.headers)];
    header_parts.extend(args.headers.iter().cloned());
    if let Some(path) = &args.headers_file {
        header_parts.push(read_text(path)?);
    }
    let headers_text = header_parts
        .into_iter()
        .filter(|part| !part.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n");

    let mut messages = Vec::new();
    for (index, value) in urls.into_iter().enumerate() {
        if index > 0 {
            messages.push(Msg::UrlAdded);
        }
        messages.push(Msg::UrlEdited { index, value });
    }
    messages.push(Msg::RateLimitChanged(
        args.rate_limit.unwrap_or(config.rate_limit),
    ));
    messages.push(Msg::HeadersChanged(headers_text));
    messages.push(Msg::ProxyChanged(
        args.proxy.clone().or_else(|| config.proxy.clone()).unwrap_or_default(),
    ));
    messages.push(Msg::UserAgentChanged(
        args.user_agent
            .clone()
            .or_else(|| config.user_agent.clone())
            .unwrap_or_default(),
    ));
    Ok(messages)
}

fn run_results(
    config: &AppConfig,
    store_dir: PathBuf,
    args: ResultsArgs,
) -> anyhow::Result<ExitCode> {
    let viewer = ResultsViewer::load(&FileStore::new(store_dir));
    let mut stdout = io::stdout();
    viewer
        .render(&mut stdout)
        .context("failed to print results")?;

    if let Some(number) = args.copy {
        viewer
            .copy(number, &mut Osc52Clipboard::new(io::stdout()))
            .with_context(|| format!("copy of result #{number} failed"))?;
        println!("Copied result #{number} to the clipboard.");
    }
    if let Some(number) = args.export {
        let dir = args.export_dir.as_deref().unwrap_or(&config.export_dir);
        let path = viewer
            .export(number, dir)
            .with_context(|| format!("export of result #{number} failed"))?;
        println!("Exported result #{number} to {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_lines(path: &Path) -> anyhow::Result<Vec<String>> {
    let text = read_text(path)?;
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    if lines.is_empty() {
        client_warn!("{} contains no URLs", path.display());
    }
    Ok(lines)
}
