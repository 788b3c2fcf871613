mod app;
mod cache;
mod cli;
mod client;
mod config;
mod controller;
mod dates;
mod error;
mod grouping;
mod launcher;
mod menu;
mod refresh;
mod responses;
mod surface;
mod types;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cache::IssueCache;
use cli::Cli;
use client::LinearClient;
use config::Config;
use controller::MenuController;
use error::Result;
use launcher::{Launcher, SystemOpener};
use std::error::Error;
use surface::NativeSurface;

fn main() {
    // Exits on its own for --version and --help.
    let _cli = Cli::parse();

    init_logging();

    if let Err(e) = run() {
        eprintln!("Error: {e}");

        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("Caused by: {cause}");
            source = cause.source();
        }

        std::process::exit(1);
    }
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lil=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> Result<()> {
    info!(version = cli::VERSION, "starting lil");

    let config = Config::load()?;
    let client = LinearClient::new(config.api_key()?);
    let cache = IssueCache::new(config.cache_path());
    info!(path = %cache.path().display(), "using issue cache");

    let mut controller = MenuController::new(NativeSurface::new()?, config.tooltip_fallback);
    let launcher = Launcher::new(SystemOpener);

    let worker_cache = cache.clone();
    app::run(&mut controller, &launcher, &cache, move |tx| {
        refresh::spawn(client, worker_cache, tx).map(|_| ())
    })
}
