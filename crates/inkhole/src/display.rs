//! Renderer boundary.
//!
//! The core hands a renderer the formatted panel body; whether that
//! becomes an e-ink raster, a framebuffer blit, or terminal output is
//! the renderer's business. The change-detection gate lives in the
//! caller: `draw` is only invoked when a redraw is actually wanted.

use chrono::Local;
use tracing::debug;

/// Display hardware options threaded through from configuration for a
/// hardware backend to consume.
#[derive(Debug, Clone)]
pub struct DisplayOptions {
    /// Panel mounted upside down.
    pub rotate: bool,
    /// Hardware variant identifier (e.g. `epd2in13_v2`).
    pub variant: String,
}

/// Something that can put the panel body in front of the user.
pub trait Renderer {
    /// Draw the panel body plus the "Updated:" clock footer.
    fn draw(&mut self, body: &str) -> std::io::Result<()>;

    /// Best-effort error placeholder shown when a run fails before
    /// producing a summary.
    fn draw_error(&mut self, body: &str) -> std::io::Result<()>;
}

/// Writes the panel to stdout. The default backend on hosts without a
/// display, and the backend behind `--dry-run`.
pub struct ConsoleRenderer;

impl ConsoleRenderer {
    pub fn new(opts: &DisplayOptions) -> Self {
        debug!(variant = %opts.variant, rotate = opts.rotate, "console renderer");
        Self
    }

    fn write(body: &str) -> std::io::Result<()> {
        use std::io::Write;

        let mut out = std::io::stdout().lock();
        writeln!(out, "{body}")?;
        writeln!(out, "Updated: {}", Local::now().format("%H:%M:%S"))
    }
}

impl Renderer for ConsoleRenderer {
    fn draw(&mut self, body: &str) -> std::io::Result<()> {
        Self::write(body)
    }

    fn draw_error(&mut self, body: &str) -> std::io::Result<()> {
        Self::write(body)
    }
}
