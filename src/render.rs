// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Load a snapshot directory and render it as a Markdown digest with YAML frontmatter
// role: rendering/markdown
// inputs: Snapshot directory (category files, optional meta.json), include-body and grouping flags, optional explicit range
// outputs: Markdown text; summary file written to the requested path
// side_effects: Reads the snapshot directory; overwrites the output file
// invariants:
// - Missing, empty, null or undecodable category files render as an empty category
// - Sections appear in Category::ALL order; records keep source order
// - Body text is emitted only when include_body is set and the body is non-empty
// - Frontmatter counts equal the number of list items per section
// errors: Non-directory input and output write failures surface as ActivityError::Io
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local, NaiveDate};
use serde::Serialize;
use tracing::{debug, warn};

use crate::category::Category;
use crate::error::ActivityError;
use crate::fetch::META_FILE;
use crate::model::{ActivityRecord, ActivitySnapshot, RecordKey, SnapshotMeta};
use crate::util::utc_stamp;
use crate::window::DateRange;

pub const DEFAULT_OUTPUT_FILE: &str = "summary.md";
const TITLE: &str = "# GitHub Activity";

#[derive(Clone, Debug)]
pub struct RenderOptions {
  pub include_body: bool,
  pub group_by_repo: bool,
  /// Overrides any range found in meta.json or the directory name.
  pub explicit_range: Option<DateRange>,
  pub generated_at: DateTime<Local>,
}

#[derive(Debug)]
pub struct RenderParams {
  pub dir: PathBuf,
  pub output: PathBuf,
  pub options: RenderOptions,
}

#[derive(Debug, Serialize)]
struct Frontmatter {
  period: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  since: Option<NaiveDate>,
  #[serde(skip_serializing_if = "Option::is_none")]
  until: Option<NaiveDate>,
  source: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  username: Option<String>,
  generated_at: String,
  commits: usize,
  issues_created: usize,
  issues_commented: usize,
  prs_created: usize,
  prs_reviewed: usize,
}

/// `<dir>/summary.md`
pub fn default_output_path(dir: &Path) -> PathBuf {
  dir.join(DEFAULT_OUTPUT_FILE)
}

/// Decode one category file; anything unreadable is an empty category.
pub fn load_category(dir: &Path, category: Category) -> Vec<ActivityRecord> {
  let path = dir.join(category.file_name());

  let raw = match std::fs::read(&path) {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == ErrorKind::NotFound => {
      debug!(path = %path.display(), "category file missing; treating as empty");
      return Vec::new();
    }
    Err(e) => {
      warn!(path = %path.display(), error = %e, "unreadable category file; treating as empty");
      return Vec::new();
    }
  };

  if raw.iter().all(u8::is_ascii_whitespace) {
    return Vec::new();
  }

  match serde_json::from_slice::<serde_json::Value>(&raw) {
    Ok(serde_json::Value::Array(items)) => items
      .iter()
      .map(|item| ActivityRecord::from_json(category, item))
      .collect(),
    Ok(serde_json::Value::Null) => Vec::new(),
    Ok(_) => {
      warn!(path = %path.display(), "category file is not a JSON array; treating as empty");
      Vec::new()
    }
    Err(e) => {
      warn!(path = %path.display(), error = %e, "invalid JSON in category file; treating as empty");
      Vec::new()
    }
  }
}

fn load_meta(dir: &Path) -> Option<SnapshotMeta> {
  let path = dir.join(META_FILE);
  let raw = std::fs::read(&path).ok()?;

  match serde_json::from_slice(&raw) {
    Ok(meta) => Some(meta),
    Err(e) => {
      warn!(path = %path.display(), error = %e, "ignoring unreadable meta.json");
      None
    }
  }
}

fn source_name(dir: &Path) -> String {
  dir
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .or_else(|| {
      dir
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
    })
    .unwrap_or_else(|| dir.display().to_string())
}

/// Read every category file (plus meta.json when present) from `dir`.
pub fn load_snapshot(dir: &Path) -> Result<ActivitySnapshot, ActivityError> {
  if !dir.is_dir() {
    return Err(ActivityError::io(
      "reading snapshot",
      dir,
      std::io::Error::new(ErrorKind::NotFound, "not a directory"),
    ));
  }

  let mut snapshot = ActivitySnapshot::new(source_name(dir));
  let meta = load_meta(dir);

  snapshot.range = meta
    .as_ref()
    .and_then(SnapshotMeta::range)
    .or_else(|| DateRange::from_dir_name(&snapshot.source));
  snapshot.username = meta.map(|m| m.username);

  for category in Category::ALL {
    snapshot.insert(category, load_category(dir, category));
  }

  Ok(snapshot)
}

fn frontmatter(snapshot: &ActivitySnapshot, opts: &RenderOptions) -> Frontmatter {
  let range = opts
    .explicit_range
    .or(snapshot.range)
    .or_else(|| snapshot.timestamp_span());

  Frontmatter {
    period: range.map(|r| r.period()).unwrap_or_else(|| "unknown".to_string()),
    since: range.map(|r| r.since()),
    until: range.map(|r| r.until()),
    source: snapshot.source.clone(),
    username: snapshot.username.clone(),
    generated_at: utc_stamp(opts.generated_at),
    commits: snapshot.count(Category::Commits),
    issues_created: snapshot.count(Category::IssuesCreated),
    issues_commented: snapshot.count(Category::IssuesCommented),
    prs_created: snapshot.count(Category::PrsCreated),
    prs_reviewed: snapshot.count(Category::PrsReviewed),
  }
}

fn record_line(record: &ActivityRecord, with_repo: bool) -> String {
  let (ident, text) = match &record.key {
    RecordKey::Commit { sha, subject } => {
      let short: String = sha.chars().take(7).collect();
      let ident = match (with_repo, short.is_empty()) {
        (true, false) => format!("{}@{}", record.repository, short),
        (true, true) => record.repository.clone(),
        (false, _) => short,
      };
      (ident, subject.as_str())
    }
    RecordKey::Item { number, title } => {
      let ident = match (with_repo, number) {
        (true, Some(n)) => format!("{}#{}", record.repository, n),
        (true, None) => record.repository.clone(),
        (false, Some(n)) => format!("#{}", n),
        (false, None) => String::new(),
      };
      (ident, title.as_str())
    }
  };

  let mut parts: Vec<String> = Vec::new();

  match (ident.is_empty(), text.is_empty()) {
    (false, false) => parts.push(format!("{}: {}", ident, text)),
    (false, true) => parts.push(ident),
    (true, false) => parts.push(text.to_string()),
    (true, true) => parts.push("(untitled)".to_string()),
  }
  if let Some(d) = record.date().filter(|_| record.category.shows_date()) {
    parts.push(format!("({})", d.format("%b %d")));
  }
  if let Some(state) = &record.state {
    parts.push(format!("[{}]", state));
  }
  if let Some(url) = &record.url {
    parts.push(url.clone());
  }

  format!("- {}", parts.join(" "))
}

fn push_body(lines: &mut Vec<String>, body: Option<&str>) {
  let Some(body) = body.map(str::trim).filter(|b| !b.is_empty()) else {
    return;
  };

  for line in body.lines() {
    lines.push(format!("  > {}", line).trim_end().to_string());
  }
}

fn push_records(lines: &mut Vec<String>, records: &[&ActivityRecord], with_repo: bool, include_body: bool) {
  for record in records {
    lines.push(record_line(record, with_repo));
    if include_body {
      push_body(lines, record.body.as_deref());
    }
  }
}

/// Repositories in order of first appearance, each with its records in source order.
fn group_by_repository(records: &[ActivityRecord]) -> Vec<(&str, Vec<&ActivityRecord>)> {
  let mut groups: Vec<(&str, Vec<&ActivityRecord>)> = Vec::new();

  for record in records {
    match groups.iter_mut().find(|(repo, _)| *repo == record.repository) {
      Some((_, items)) => items.push(record),
      None => groups.push((record.repository.as_str(), vec![record])),
    }
  }

  groups
}

/// Render the whole digest document.
pub fn render_markdown(snapshot: &ActivitySnapshot, opts: &RenderOptions) -> Result<String, ActivityError> {
  let yaml = serde_yaml::to_string(&frontmatter(snapshot, opts)).map_err(|e| ActivityError::Io {
    context: "encoding frontmatter".into(),
    source: std::io::Error::other(e),
  })?;

  let mut lines: Vec<String> = vec!["---".into()];
  lines.extend(yaml.lines().map(str::to_string));
  lines.push("---".into());
  lines.push(String::new());
  lines.push(TITLE.into());
  lines.push(String::new());

  for category in Category::ALL {
    let records = snapshot.records(category);
    lines.push(format!("## {} ({})", category.heading(), records.len()));
    lines.push(String::new());

    if records.is_empty() {
      continue;
    }

    if opts.group_by_repo {
      for (repo, items) in group_by_repository(records) {
        lines.push(format!("### {}", repo));
        lines.push(String::new());
        push_records(&mut lines, &items, false, opts.include_body);
        lines.push(String::new());
      }
    } else {
      let items: Vec<&ActivityRecord> = records.iter().collect();
      push_records(&mut lines, &items, true, opts.include_body);
      lines.push(String::new());
    }
  }

  while lines.last().is_some_and(|l| l.is_empty()) {
    lines.pop();
  }

  let mut out = lines.join("\n");
  out.push('\n');
  Ok(out)
}

/// Load `p.dir`, render it, and write (overwriting) `p.output`.
pub fn run_render(p: &RenderParams) -> Result<PathBuf, ActivityError> {
  let snapshot = load_snapshot(&p.dir)?;
  let markdown = render_markdown(&snapshot, &p.options)?;

  std::fs::write(&p.output, markdown).map_err(|e| ActivityError::io("writing", &p.output, e))?;
  debug!(output = %p.output.display(), "wrote summary");

  Ok(p.output.clone())
}
