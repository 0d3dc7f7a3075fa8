// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for tracing setup, "now" handling, text trimming, directory creation and man page rendering
// role: utilities/helpers
// inputs: Various primitives; DateTime; paths; clap CommandFactory
// outputs: Initialized subscriber, timestamps, trimmed lines, ensured directories, man page text
// side_effects: ensure_dir creates directories; init_tracing installs a global subscriber
// invariants:
// - first_line never splits UTF-8 and caps output at FIRST_LINE_MAX chars
// - effective_now is the single source of "now" for both binaries
// errors: IO errors carry the path through ActivityError::Io
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use chrono::{DateTime, Local, SecondsFormat, Utc};
use clap::CommandFactory;
use tracing_subscriber::{fmt, EnvFilter};

use crate::error::ActivityError;

pub const FIRST_LINE_MAX: usize = 80;

/// Install a stderr tracing subscriber honoring `RUST_LOG` (default `warn`).
pub fn init_tracing() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .with_target(false)
    .try_init();
}

/// Returns the effective "now" given an optional override.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}

/// RFC3339 UTC with second precision, e.g. `2025-11-25T12:00:00Z`.
pub fn utc_stamp(at: DateTime<Local>) -> String {
  at.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// First line of `text`, trimmed; longer than FIRST_LINE_MAX chars becomes 77 chars plus "...".
pub fn first_line(text: &str) -> String {
  let line = text.lines().next().unwrap_or("").trim();

  if line.chars().count() > FIRST_LINE_MAX {
    let head: String = line.chars().take(FIRST_LINE_MAX - 3).collect();
    format!("{}...", head)
  } else {
    line.to_string()
  }
}

/// Create `dir` (and parents) if absent.
pub fn ensure_dir(dir: &Path) -> Result<(), ActivityError> {
  std::fs::create_dir_all(dir).map_err(|e| ActivityError::io("creating directory", dir, e))
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
