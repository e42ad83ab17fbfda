use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use browser_core::{intent_channel, Controller, ControllerOptions, ResultStore};
use catalog_client::HttpCatalogClient;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::load_settings;
use terminal::{dispatch, parse_command, TerminalSurface};

#[derive(Parser, Debug)]
#[command(name = "creature-browser", about = "Browse and search the public creature catalog")]
struct Args {
    /// TOML settings file (defaults to ./browser.toml when present)
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    page_size: Option<u32>,
    /// Disable "next" once an empty page has been seen
    #[arg(long)]
    stop_at_empty_page: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    if args.stop_at_empty_page {
        settings.stop_at_empty_page = true;
    }
    settings.validate()?;

    let catalog = Arc::new(HttpCatalogClient::new(&settings.api_base_url)?);
    let store = Arc::new(ResultStore::new());
    let surface = Arc::new(TerminalSurface::stdout());
    let controller = Controller::new(
        catalog,
        store,
        surface.clone(),
        ControllerOptions {
            page_size: settings.page_size,
            stop_at_empty_page: settings.stop_at_empty_page,
        },
    );

    let (intents, receiver) = intent_channel();
    let run = tokio::spawn(controller.clone().run(receiver));
    info!(
        api = %settings.api_base_url,
        page_size = settings.page_size,
        "browser: starting"
    );

    surface.print_help();
    controller.init().await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        if !dispatch(parse_command(&line), &intents, &surface) {
            quit = true;
            break;
        }
    }
    drop(intents);

    if quit {
        // Outstanding requests have no timeout.
        run.abort();
    } else {
        run.await.context("controller task failed")?;
    }
    info!("browser: stopped");
    Ok(())
}
