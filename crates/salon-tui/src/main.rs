use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Result;
use clap::Parser;
use salon_core::{Config, Variant};
use tracing_subscriber::EnvFilter;

mod app;
mod handler;
mod tui;
mod ui;

use app::App;

#[derive(Parser, Debug)]
#[command(name = "salon")]
#[command(about = "Booking assistant for salon client conversations")]
struct Cli {
    /// Screen set to run: dashboard, basic or full
    #[arg(short, long, value_parser = parse_variant)]
    variant: Option<Variant>,

    /// Milliseconds the result screen stays up before returning to chat
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Write logs here instead of the data directory
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Persist the given options to the config file
    #[arg(long)]
    save: bool,
}

fn parse_variant(s: &str) -> Result<Variant, String> {
    Variant::from_str(s).ok_or_else(|| {
        let names: Vec<&str> = Variant::all().iter().map(|v| v.as_str()).collect();
        format!("unknown variant `{}` (expected one of: {})", s, names.join(", "))
    })
}

/// Logs go to a file; the terminal belongs to the UI.
fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Load the config file and layer CLI options on top. An unreadable file is
/// an error, so `--save` never replaces settings it could not read.
fn prepare_config(cli: &Cli, path: &Path) -> Result<Config> {
    let mut config = Config::load_from(path)?;
    if let Some(variant) = cli.variant {
        config.variant = Some(variant);
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.result_delay_ms = Some(delay_ms);
    }
    if let Some(log_file) = &cli.log_file {
        config.log_file = Some(log_file.clone());
    }
    if cli.save {
        config.save_to(path)?;
    }
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = prepare_config(&cli, &Config::config_path()?)?;

    init_logging(&config.log_path()?)?;
    tracing::info!(
        variant = config.variant().as_str(),
        delay_ms = config.result_delay().as_millis() as u64,
        "starting salon assistant"
    );

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = tui::EventHandler::new();
    let mut app = App::new(config.variant(), config.result_delay(), events.sender());

    let result = run(&mut terminal, &mut app, &mut events).await;

    app.teardown();
    tui::restore()?;
    tracing::info!("salon assistant stopped");
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, events: &mut tui::EventHandler) -> Result<()> {
    while !app.should_quit {
        terminal.draw(|frame| ui::render(app, frame))?;

        match events.next().await {
            Some(event) => handler::handle_event(app, event)?,
            None => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_variant() {
        let cli = Cli::try_parse_from(["salon", "--variant", "basic", "--delay-ms", "100"]).unwrap();
        assert_eq!(cli.variant, Some(Variant::Basic));
        assert_eq!(cli.delay_ms, Some(100));
        assert!(!cli.save);
    }

    #[test]
    fn test_cli_rejects_unknown_variant() {
        let err = Cli::try_parse_from(["salon", "-v", "mini"]).unwrap_err();
        assert!(err.to_string().contains("unknown variant"));
    }

    #[test]
    fn test_save_keeps_unreadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ \"variant\": ").unwrap();

        let cli = Cli::try_parse_from(["salon", "--delay-ms", "100", "--save"]).unwrap();
        assert!(prepare_config(&cli, &path).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{ \"variant\": ");
    }

    #[test]
    fn test_save_merges_over_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"variant": "dashboard"}"#).unwrap();

        let cli = Cli::try_parse_from(["salon", "--delay-ms", "100", "--save"]).unwrap();
        let config = prepare_config(&cli, &path).unwrap();
        assert_eq!(config.variant(), Variant::Dashboard);
        assert_eq!(config.result_delay_ms, Some(100));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_config_without_save_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let cli = Cli::try_parse_from(["salon", "-v", "basic"]).unwrap();
        let config = prepare_config(&cli, &path).unwrap();
        assert_eq!(config.variant(), Variant::Basic);
        assert!(!path.exists());
    }
}
