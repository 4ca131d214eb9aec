//! Fiscal Deck - Terminal dashboard for the Santiago de Cali financial report
//!
//! Ten report sections with charts, tables and stat cards, a sidebar for
//! navigation and a presentation (full-screen) mode.

mod config;
mod core;
mod data;
mod format;
mod frontend;
mod presentation;
mod sections;
mod theme;
mod widgets;

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use data::{navigation_entries, SectionId};
use frontend::tui::{export_section, ExportFormat, ViewSettings};
use frontend::{Frontend, FrontendEvent};
use std::path::{Path, PathBuf};

#[derive(ClapParser)]
#[command(name = "fiscal-deck")]
#[command(about = "Terminal dashboard for the Santiago de Cali financial report", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.fiscal-deck)
    /// Can also be set via FISCAL_DECK_DIR environment variable
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Section shown at startup (overrides ui.default_section)
    #[arg(short, long, value_name = "ID")]
    section: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the report sections in sidebar order
    Sections,
    /// Render one section without a terminal and print it
    Show {
        /// Section id (see `sections`)
        id: String,

        /// Page width in columns
        #[arg(short, long, default_value_t = 120)]
        width: u16,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: ExportFormat,
    },
    /// Check built-in tables and the configured keybinds
    Validate,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set custom data directory if specified (via CLI or environment variable)
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }
    let data_dir = config::Config::base_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;

    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(config::Config::log_path(&data_dir))
        .context("Failed to open log file")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();

    tracing::info!("Using data directory: {:?}", data_dir);

    let mut config = match &cli.config {
        Some(path) => config::Config::load_from_path(path, &data_dir)?,
        None => config::Config::load(&data_dir)?,
    };
    if let Some(section) = &cli.section {
        let id: SectionId = section.parse()?;
        config.ui.default_section = id.as_str().to_string();
    }

    match cli.command {
        Some(Commands::Sections) => {
            for (i, entry) in navigation_entries().iter().enumerate() {
                println!("{:>2}  {:<14} {} {}", i + 1, entry.id.as_str(), entry.icon, entry.label);
            }
            Ok(())
        }
        Some(Commands::Show { id, width, format }) => {
            let id: SectionId = id.parse()?;
            let registry = sections::Registry::new(&config.reports);
            let narrow = width < config.ui.narrow_breakpoint;
            let settings = ViewSettings::from_config(&config, narrow);
            let output = export_section(registry.get(id), &settings, width.max(20), format)?;
            println!("{}", output);
            Ok(())
        }
        Some(Commands::Validate) => {
            let config_path = cli
                .config
                .clone()
                .unwrap_or_else(|| config::Config::config_path(&data_dir));
            let errors = validate(&config, &config_path)?;
            if errors > 0 {
                std::process::exit(1);
            }
            Ok(())
        }
        None => run_tui(config),
    }
}

/// Print table shape issues and keybind issues. Returns the error count.
fn validate(config: &config::Config, config_path: &Path) -> Result<usize> {
    let mut errors = 0;

    let registry = sections::Registry::new(&config.reports);
    let issues = registry.table_issues();
    if issues.is_empty() {
        println!("✓ {} sections, all tables well formed", registry.all().len());
    }
    for issue in &issues {
        eprintln!("✗ {}", issue.message());
        errors += 1;
    }

    // Keybinds as written, before load-time auto-fixing
    let contents = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {:?}", config_path))?;
    let raw: config::Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;
    let result = config::keybind_validator::validate_keybinds(&raw.keybinds);
    for error in result.errors() {
        eprintln!("✗ {}", error.message());
        errors += 1;
    }
    for warning in result.warnings() {
        println!("⚠ {}", warning.message());
    }
    if result.is_valid() {
        println!("✓ {} keybinds valid", raw.keybinds.len());
    }

    let report = config.management_report_path();
    if !report.exists() {
        println!("⚠ Management report not found: {}", report.display());
    }

    if errors > 0 {
        eprintln!("\n✗ Found {} error(s)", errors);
    }
    Ok(errors)
}

/// Run TUI frontend
fn run_tui(config: config::Config) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    runtime.block_on(async_run_tui(config))
}

/// Async TUI main loop
async fn async_run_tui(config: config::Config) -> Result<()> {
    use crate::core::AppCore;
    use frontend::TuiFrontend;
    use std::time::Duration;
    use tokio::sync::mpsc;

    // SIGINT outside raw mode (e.g. sent by another process) ends the loop
    let (signal_tx, mut signal_rx) = mpsc::unbounded_channel::<FrontendEvent>();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            let _ = signal_tx.send(FrontendEvent::quit());
        }
    });

    let poll_timeout = Duration::from_millis(config.ui.poll_timeout_ms);
    let theme = config.theme();
    let mut app_core = AppCore::new(config);

    let mut frontend = TuiFrontend::new(theme)?;
    frontend.set_poll_timeout(poll_timeout);
    let (width, height) = frontend.size();
    app_core.resize(width, height);

    while app_core.running {
        let mut events = frontend.poll_events()?;
        while let Ok(event) = signal_rx.try_recv() {
            events.push(event);
        }

        for event in events {
            handle_frontend_event(&mut app_core, event);
        }

        app_core.tick();
        frontend.render(&mut app_core)?;
        tokio::task::yield_now().await;
    }

    frontend.cleanup()?;
    app_core.shutdown();
    tracing::info!("Dashboard closed");
    Ok(())
}

fn handle_frontend_event(app_core: &mut core::AppCore, event: FrontendEvent) {
    match event {
        FrontendEvent::Key { code, modifiers } => app_core.handle_key(code, modifiers),
        FrontendEvent::Mouse { kind, x, y, .. } => app_core.handle_mouse(kind, x, y),
        FrontendEvent::Resize { width, height } => {
            tracing::debug!("Resize to {}x{}", width, height);
            app_core.resize(width, height);
        }
        FrontendEvent::Quit => app_core.running = false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn test_cli_parses_show_subcommand() {
        let cli = Cli::try_parse_from(["fiscal-deck", "show", "debt", "--width", "90", "--format", "json"]).unwrap();
        match cli.command {
            Some(Commands::Show { id, width, format }) => {
                assert_eq!(id, "debt");
                assert_eq!(width, 90);
                assert_eq!(format, ExportFormat::Json);
            }
            _ => panic!("expected show"),
        }
    }

    #[test]
    fn test_events_reach_core() {
        let mut core = crate::core::AppCore::new(crate::config::Config::default());
        handle_frontend_event(&mut core, FrontendEvent::resize(150, 40));
        assert_eq!(core.viewport, (150, 40));
        handle_frontend_event(&mut core, FrontendEvent::key(KeyCode::Char('3'), KeyModifiers::NONE));
        assert_eq!(core.active, SectionId::Income);
        handle_frontend_event(&mut core, FrontendEvent::Quit);
        assert!(!core.running);
    }

    #[test]
    fn test_validate_counts_keybind_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[keybinds]\n\"q\" = \"quit\"\n\"ctrl+zz\" = \"quit\"\n").unwrap();
        let config = crate::config::Config::default();
        let errors = validate(&config, &path).unwrap();
        assert!(errors >= 1);
    }
}
