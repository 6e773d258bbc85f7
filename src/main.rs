use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;
use vidly::api::ApiClient;
use vidly::config::Config;
use vidly::util::parse_base_url;

mod app;
mod keybindings;
mod theme;
mod ui;

use app::{App, AppEvent};
use theme::ThemeVariant;

#[derive(Parser, Debug)]
#[command(name = "vidly", about = "Terminal browser for a movie rental catalog")]
struct Args {
    /// Catalog API base URL (e.g. http://localhost:3900/api/)
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,

    /// Movies per page
    #[arg(long, value_name = "N")]
    page_size: Option<usize>,

    /// Config file (default: ~/.config/vidly/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)
            .with_context(|| format!("Failed to load config file '{}'", path.display()))?,
        None => {
            tracing::debug!("HOME not set, using default configuration");
            Config::default()
        }
    };

    if let Some(url) = &args.api_url {
        config.api_url = url.clone();
    }
    if let Some(size) = args.page_size {
        config.page_size = size;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    // stderr keeps log output off the TUI's screen
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let base = parse_base_url(&config.api_url)
        .with_context(|| format!("Invalid API URL '{}'", config.api_url))?;
    let api = ApiClient::new(base, config.request_timeout())
        .context("Failed to create HTTP client")?;

    let mut app = App::new(api, config.initial_selection());

    for warning in app.keybindings.apply_overrides(&config.keybindings) {
        tracing::warn!("{}", warning);
    }

    match ThemeVariant::from_str_name(&config.theme) {
        Some(variant) => app.set_theme(variant),
        None => tracing::warn!(theme = %config.theme, "Unknown theme, using dark"),
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::spawn_bootstrap(&mut app, &event_tx);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
