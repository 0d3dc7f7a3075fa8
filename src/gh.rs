// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Seam to the external GitHub search collaborator (identity + scoped activity search) and its gh CLI implementation
// role: integration/github-cli
// inputs: Category, login, DateRange; `gh` on PATH with an authenticated session
// outputs: Viewer login; raw JSON bytes of one search
// side_effects: Spawns `gh` subprocesses (network and auth handled entirely by gh)
// invariants:
// - One subprocess per call; no retries, no timeouts beyond gh's own
// - viewer_login failures are Auth errors; search failures are Query errors for that category
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::process::{Command, Output};

use tracing::debug;

use crate::category::Category;
use crate::error::ActivityError;
use crate::window::DateRange;

/// Capability to resolve the authenticated user and run scoped activity searches.
pub trait ActivitySearch {
  fn viewer_login(&self) -> Result<String, ActivityError>;

  /// Run `category`'s search for `login` over `range`, returning the raw JSON document.
  fn search(&self, category: Category, login: &str, range: &DateRange) -> Result<Vec<u8>, ActivityError>;
}

/// `ActivitySearch` backed by the GitHub CLI.
pub struct GhCli {
  program: String,
}

impl Default for GhCli {
  fn default() -> Self {
    Self { program: "gh".into() }
  }
}

impl GhCli {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_program(program: impl Into<String>) -> Self {
    Self { program: program.into() }
  }

  fn run(&self, args: &[String]) -> std::io::Result<Output> {
    debug!(program = %self.program, ?args, "spawning gh");
    Command::new(&self.program).args(args).output()
  }
}

fn spawn_failure(program: &str, e: &std::io::Error) -> String {
  if e.kind() == std::io::ErrorKind::NotFound {
    format!("{} not found; install the GitHub CLI from https://cli.github.com/", program)
  } else {
    format!("could not run {}: {}", program, e)
  }
}

fn stderr_summary(out: &Output) -> String {
  let stderr = String::from_utf8_lossy(&out.stderr).trim().to_string();
  if stderr.is_empty() {
    format!("gh exited with {}", out.status)
  } else {
    stderr
  }
}

impl ActivitySearch for GhCli {
  fn viewer_login(&self) -> Result<String, ActivityError> {
    let args: Vec<String> = vec!["api".into(), "user".into(), "--jq".into(), ".login".into()];
    let out = self
      .run(&args)
      .map_err(|e| ActivityError::Auth(spawn_failure(&self.program, &e)))?;

    if !out.status.success() {
      return Err(ActivityError::Auth(format!(
        "{} (try `gh auth login`)",
        stderr_summary(&out)
      )));
    }

    let login = String::from_utf8_lossy(&out.stdout).trim().to_string();
    if login.is_empty() {
      return Err(ActivityError::Auth("gh returned an empty login".into()));
    }

    Ok(login)
  }

  fn search(&self, category: Category, login: &str, range: &DateRange) -> Result<Vec<u8>, ActivityError> {
    let args = category.search_args(login, range);
    let out = self.run(&args).map_err(|e| ActivityError::Query {
      category,
      message: spawn_failure(&self.program, &e),
    })?;

    if !out.status.success() {
      return Err(ActivityError::Query {
        category,
        message: stderr_summary(&out),
      });
    }

    Ok(out.stdout)
  }
}
