use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "fastscraper",
    version,
    about = "Submit scrape batches to a FastScraper backend and review the results"
)]
pub struct Cli {
    /// RON config file; defaults to ./fastscraper.ron when present.
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Directory of the results handoff store.
    #[arg(long, value_name = "DIR", global = true)]
    pub store_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Build a scrape request, send it and hand the results to the results view.
    Submit(SubmitArgs),
    /// Show the last stored results; optionally copy or export one of them.
    Results(ResultsArgs),
}

#[derive(Debug, Args)]
pub struct SubmitArgs {
    /// Target URLs, one slot each. Blank entries are dropped at submit time.
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// Read additional URL slots from a file, one per line.
    #[arg(long, value_name = "FILE")]
    pub urls_file: Option<PathBuf>,

    /// Requests per second the backend may issue.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..=20))]
    pub rate_limit: Option<u32>,

    /// Custom header as `key: value`; repeatable. Malformed lines are ignored.
    #[arg(short = 'H', long = "header", value_name = "KEY: VALUE")]
    pub headers: Vec<String>,

    /// Read additional `key: value` header lines from a file.
    #[arg(long, value_name = "FILE")]
    pub headers_file: Option<PathBuf>,

    #[arg(long, value_name = "URL")]
    pub proxy: Option<String>,

    #[arg(long, value_name = "UA")]
    pub user_agent: Option<String>,

    /// Backend base URL; `/api/scrape` is appended.
    #[arg(long, value_name = "URL")]
    pub backend: Option<String>,

    /// Store results without opening the results view.
    #[arg(long, default_value_t = false)]
    pub no_open: bool,
}

#[derive(Debug, Args)]
pub struct ResultsArgs {
    /// Copy the snippet of result N (1-based) to the clipboard.
    #[arg(long, value_name = "N")]
    pub copy: Option<usize>,

    /// Export result N (1-based) as result-N.json.
    #[arg(long, value_name = "N")]
    pub export: Option<usize>,

    /// Directory for exported files; overrides the config's export_dir.
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,
}
