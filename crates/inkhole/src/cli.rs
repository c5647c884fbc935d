//! Clap derive structures for the `inkhole` periodic task.

use std::path::PathBuf;

use clap::Parser;

/// inkhole -- Pi-hole statistics on a small e-ink panel
#[derive(Debug, Parser)]
#[command(
    name = "inkhole",
    version,
    about = "Render Pi-hole statistics to a small status panel",
    long_about = "Queries a Pi-hole appliance's statistics API and renders a compact\n\
        status summary, skipping the redraw when nothing changed. Designed to\n\
        be invoked from cron or a systemd timer."
)]
pub struct Cli {
    /// Path to the TOML config file (defaults to the XDG config dir)
    #[arg(long, short = 'c', env = "INKHOLE_CONFIG_FILE")]
    pub config: Option<PathBuf>,

    /// Redraw even when the panel content is unchanged
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Print the panel text to stdout without touching the cache files
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q')]
    pub quiet: bool,
}
