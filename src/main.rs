use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gitview::{
    fetch_results, render_page, Config, Controller, Document, ElementId, FetchError,
    GitHubClient, SearchResults, SearchTicket, UiState,
};

type App = Controller<Arc<GitHubClient>, Document>;

/// Look up a GitHub user and render their profile as a page.
#[derive(Debug, Parser)]
#[command(name = "gitview", version)]
struct Args {
    /// Username to look up. Without it, usernames are read from stdin.
    handle: Option<String>,

    /// Where to write the rendered page.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Do not open the page in the browser.
    #[arg(long)]
    no_open: bool,

    /// Base URL of the GitHub REST API.
    #[arg(long)]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env()?;
    if let Some(output) = args.output {
        config.output = output;
    }
    if let Some(api_base) = args.api_base {
        config.api_base = api_base;
    }
    if args.no_open {
        config.open_browser = false;
    }

    init_tracing(&config.log_filter);

    let client = Arc::new(GitHubClient::new(config.api_base.clone())?);
    let app = Controller::new(client, Document::new());

    match args.handle {
        Some(handle) => lookup_once(app, &config, &handle).await,
        None => interactive(app, &config).await,
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// =============================================
//  ONE-SHOT: gitview <handle>
// =============================================
async fn lookup_once(mut app: App, config: &Config, handle: &str) -> Result<()> {
    if app.search(handle).await.is_none() {
        anyhow::bail!("Username must not be empty");
    }
    publish(&app, config, config.open_browser)
}

// =============================================
//  INTERACTIVE: one username per stdin line
// =============================================
async fn interactive(mut app: App, config: &Config) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<(SearchTicket, Result<SearchResults, FetchError>)>();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<JoinHandle<()>> = None;
    let mut opened = false;

    println!("Enter a GitHub username (Ctrl-D to quit).");

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read from stdin")? else {
                    break;
                };
                let Some(ticket) = app.begin_search(&line) else {
                    continue;
                };

                // A newer search makes the running one irrelevant.
                if let Some(previous) = in_flight.take() {
                    previous.abort();
                }

                let api = Arc::clone(app.api());
                let tx = tx.clone();
                in_flight = Some(tokio::spawn(async move {
                    let outcome = fetch_results(&*api, ticket.handle()).await;
                    let _ = tx.send((ticket, outcome));
                }));
            }
            Some((ticket, outcome)) = rx.recv() => {
                if app.finish_search(&ticket, outcome) {
                    in_flight = None;
                    let open = config.open_browser && !opened;
                    publish(&app, config, open)?;
                    opened |= open;
                }
            }
        }
    }

    // Let the last search land before exiting.
    drop(tx);
    while let Some((ticket, outcome)) = rx.recv().await {
        if app.finish_search(&ticket, outcome) {
            publish(&app, config, config.open_browser && !opened)?;
        }
    }

    Ok(())
}

/// Writes the page, reports the outcome and optionally opens the browser.
fn publish(app: &App, config: &Config, open_browser: bool) -> Result<()> {
    let html = render_page(app.target());
    std::fs::write(&config.output, html)
        .with_context(|| format!("Failed to write page to {}", config.output.display()))?;

    let doc = app.target();
    match app.state() {
        UiState::Result => println!(
            "{} ({}): page written to {}",
            doc.text(ElementId::Name).unwrap_or_default(),
            doc.text(ElementId::Username).unwrap_or_default(),
            config.output.display()
        ),
        UiState::Error => println!(
            "User not found or GitHub unavailable; page written to {}",
            config.output.display()
        ),
        UiState::Idle | UiState::Loading => {}
    }

    if open_browser {
        info!(path = %config.output.display(), "opening page");
        if let Err(err) = open::that(&config.output) {
            warn!(error = %err, "could not open browser");
        }
    }

    Ok(())
}
