// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run the five category searches for one range and persist each raw result into the snapshot directory
// role: orchestration/fetch
// inputs: ActivitySearch implementation, DateRange, parent output directory, fetch timestamp
// outputs: <out>/gh_<since>_<until>/{commits,issues_created,issues_commented,prs_created,prs_reviewed}.json + meta.json; FetchReport
// side_effects: Creates the snapshot directory; overwrites category files of the same range
// invariants:
// - Identity is resolved before the directory is created or any search runs
// - Categories run sequentially in Category::ALL order
// - A failed category never prevents or rolls back the others
// - Category files are the verbatim search output and always a JSON array
// errors: Auth and directory/meta IO errors abort; per-category Query/Io errors are collected in the report
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::category::{Category, SEARCH_LIMIT};
use crate::error::ActivityError;
use crate::gh::ActivitySearch;
use crate::model::SnapshotMeta;
use crate::util::{ensure_dir, utc_stamp};
use crate::window::DateRange;

pub const META_FILE: &str = "meta.json";

#[derive(Debug)]
pub struct FetchParams {
  pub range: DateRange,
  /// Parent directory that receives the snapshot directory.
  pub out_dir: PathBuf,
  pub fetched_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct CategoryOutcome {
  pub category: Category,
  pub result: Result<usize, ActivityError>,
}

#[derive(Debug)]
pub struct FetchReport {
  pub username: String,
  pub dir: PathBuf,
  pub outcomes: Vec<CategoryOutcome>,
}

impl FetchReport {
  pub fn failures(&self) -> impl Iterator<Item = &ActivityError> {
    self.outcomes.iter().filter_map(|o| o.result.as_ref().err())
  }

  pub fn is_complete(&self) -> bool {
    self.failures().next().is_none()
  }

  pub fn count(&self, category: Category) -> Option<usize> {
    self
      .outcomes
      .iter()
      .find(|o| o.category == category)
      .and_then(|o| o.result.as_ref().ok().copied())
  }
}

/// Number of records in a raw search result; anything but a JSON array is a query failure.
pub fn count_records(category: Category, raw: &[u8]) -> Result<usize, ActivityError> {
  let value: serde_json::Value = serde_json::from_slice(raw).map_err(|e| ActivityError::Query {
    category,
    message: format!("invalid JSON from search: {}", e),
  })?;

  value.as_array().map(Vec::len).ok_or_else(|| ActivityError::Query {
    category,
    message: "search result is not a JSON array".into(),
  })
}

fn fetch_category(
  search: &dyn ActivitySearch,
  category: Category,
  login: &str,
  range: &DateRange,
  dir: &Path,
) -> Result<usize, ActivityError> {
  let raw = search.search(category, login, range)?;
  let count = count_records(category, &raw)?;

  let path = dir.join(category.file_name());
  std::fs::write(&path, &raw).map_err(|e| ActivityError::io("writing", &path, e))?;
  info!(%category, count, path = %path.display(), "wrote category");

  Ok(count)
}

fn write_meta(dir: &Path, meta: &SnapshotMeta) -> Result<(), ActivityError> {
  let path = dir.join(META_FILE);
  let bytes = serde_json::to_vec_pretty(meta).map_err(|e| ActivityError::Io {
    context: format!("encoding {}", path.display()),
    source: e.into(),
  })?;
  std::fs::write(&path, bytes).map_err(|e| ActivityError::io("writing", &path, e))
}

/// Fetch every category for the authenticated user over `p.range`.
pub fn run_fetch(search: &dyn ActivitySearch, p: &FetchParams) -> Result<FetchReport, ActivityError> {
  run_fetch_with(search, p, |_| {})
}

/// Like [`run_fetch`], calling `on_search` before each category's search.
pub fn run_fetch_with(
  search: &dyn ActivitySearch,
  p: &FetchParams,
  mut on_search: impl FnMut(Category),
) -> Result<FetchReport, ActivityError> {
  let username = search.viewer_login()?;
  let dir = p.out_dir.join(p.range.dir_name());
  ensure_dir(&dir)?;

  let mut outcomes = Vec::with_capacity(Category::ALL.len());

  for category in Category::ALL {
    info!(%category, range = %p.range.query(), "searching");
    on_search(category);
    let result = fetch_category(search, category, &username, &p.range, &dir);

    if let Err(e) = &result {
      warn!(%category, error = %e, "category failed");
    }
    outcomes.push(CategoryOutcome { category, result });
  }

  let counts: BTreeMap<Category, usize> = outcomes
    .iter()
    .filter_map(|o| o.result.as_ref().ok().map(|n| (o.category, *n)))
    .collect();
  let failed: Vec<Category> = outcomes.iter().filter(|o| o.result.is_err()).map(|o| o.category).collect();

  let meta = SnapshotMeta {
    username: username.clone(),
    since: p.range.since(),
    until: p.range.until(),
    fetched_at: utc_stamp(p.fetched_at),
    limit: SEARCH_LIMIT,
    counts,
    failed,
  };
  write_meta(&dir, &meta)?;

  Ok(FetchReport { username, dir, outcomes })
}
