// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed error kinds surfaced by range resolution, identity lookup, per-category queries and file IO
// role: errors
// outputs: ActivityError (Config | Auth | Query | Io)
// invariants: Every failure reaches the operator; nothing here retries or swallows
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use thiserror::Error;

use crate::category::Category;

#[derive(Debug, Error)]
pub enum ActivityError {
  /// Conflicting or malformed flags.
  #[error("{0}")]
  Config(String),

  /// No authenticated GitHub identity could be resolved.
  #[error("no authenticated GitHub identity: {0}")]
  Auth(String),

  /// One category's search failed; other categories are unaffected.
  #[error("{category} query failed: {message}")]
  Query { category: Category, message: String },

  #[error("{context}: {source}")]
  Io {
    context: String,
    #[source]
    source: std::io::Error,
  },
}

impl ActivityError {
  pub fn config(msg: impl Into<String>) -> Self {
    ActivityError::Config(msg.into())
  }

  pub fn io(action: &str, path: &Path, source: std::io::Error) -> Self {
    ActivityError::Io {
      context: format!("{} {}", action, path.display()),
      source,
    }
  }
}
