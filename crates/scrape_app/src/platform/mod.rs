//! Terminal host for the scrape client: CLI, config, logging and the two views.
mod app;
mod cli;
mod clipboard;
mod config;
mod logging;
mod shell;
mod viewer;

pub use app::run_app;
