mod cli;
mod config;
mod display;
mod error;
mod net;

use std::time::Duration;

use clap::Parser;
use secrecy::SecretString;
use tracing_subscriber::EnvFilter;

use inkhole_api::{FileSessionStore, PiholeClient, SessionManager, TransportConfig};
use inkhole_core::dashboard::{self, NetContext};
use inkhole_core::{ChangeDetector, FileFingerprintStore, StatusMonitor, Summary};

use crate::cli::Cli;
use crate::config::Settings;
use crate::display::{ConsoleRenderer, DisplayOptions, Renderer};
use crate::error::AppError;

const SESSION_CACHE_FILE: &str = "session.json";
const FINGERPRINT_CACHE_FILE: &str = "panel.sha256";

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(err) = run(&cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

fn init_tracing(cli: &Cli) {
    let filter = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    // Logs go to stderr; stdout carries the panel body.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: &Cli) -> Result<(), AppError> {
    let settings = config::load(cli.config.as_deref())?;

    let opts = DisplayOptions {
        rotate: settings.rotate_display,
        variant: settings.display_variant.clone(),
    };
    let mut renderer = ConsoleRenderer::new(&opts);

    match fetch(&settings).await {
        Ok(summary) => render(cli, &settings, &summary, &mut renderer),
        Err(err) => {
            // Best-effort placeholder so the panel doesn't silently go
            // stale; the run still terminates non-zero.
            let body = dashboard::format_error(&err.panel_message());
            if let Err(draw_err) = renderer.draw_error(&body) {
                tracing::warn!(error = %draw_err, "error placeholder render failed");
            }
            Err(err)
        }
    }
}

/// Acquire a session and fetch the normalized summary.
async fn fetch(settings: &Settings) -> Result<Summary, AppError> {
    let transport = TransportConfig {
        timeout: Duration::from_secs(settings.timeout_secs),
        ..TransportConfig::default()
    };
    let client = PiholeClient::new(&settings.host, settings.port, &transport)?;

    let store = FileSessionStore::new(config::cache_dir(settings).join(SESSION_CACHE_FILE));
    let sessions = SessionManager::new(store, SecretString::from(settings.password.clone()));

    Ok(StatusMonitor::new(client, sessions).fetch_summary().await?)
}

/// Format the panel body and draw it, unless nothing changed.
fn render(
    cli: &Cli,
    settings: &Settings,
    summary: &Summary,
    renderer: &mut impl Renderer,
) -> Result<(), AppError> {
    let ctx = NetContext {
        hostname: net::hostname(),
        interface: settings.interface.clone(),
        ip: net::local_ip(&settings.host, settings.port),
    };
    let body = dashboard::format_dashboard(summary, &ctx);

    // Dry runs print unconditionally and leave the cache files alone.
    if cli.dry_run {
        renderer.draw(&body)?;
        return Ok(());
    }

    let detector = ChangeDetector::new(FileFingerprintStore::new(
        config::cache_dir(settings).join(FINGERPRINT_CACHE_FILE),
    ));
    let changed = detector.should_render(&body);

    if changed || cli.force {
        renderer.draw(&body)?;
    } else {
        tracing::info!("panel content unchanged, skipping redraw");
    }
    Ok(())
}
