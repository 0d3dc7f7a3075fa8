// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed activity records extracted from gh search JSON, the per-directory snapshot, and meta.json
// role: model/types
// outputs: ActivityRecord, RecordKey, ActivitySnapshot, SnapshotMeta
// invariants:
// - Records keep the order they had in the source JSON array
// - Extraction never fails; absent fields become None/"unknown"
// - A snapshot always answers for all five categories (missing => empty)
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::category::{Category, CategoryKind};
use crate::ext::serde_json::JsonFetch;
use crate::util::first_line;
use crate::window::DateRange;

const REPO_PATHS: [&str; 3] = ["repository.nameWithOwner", "repository.fullName", "repository.name"];

/// Category-specific identity of a record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RecordKey {
  Commit { sha: String, subject: String },
  Item { number: Option<i64>, title: String },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ActivityRecord {
  pub category: Category,
  pub repository: String,
  pub key: RecordKey,
  pub state: Option<String>,
  pub timestamp: Option<DateTime<FixedOffset>>,
  pub url: Option<String>,
  pub body: Option<String>,
}

impl ActivityRecord {
  pub fn from_json(category: Category, v: &serde_json::Value) -> Self {
    let repository = v.first_text(&REPO_PATHS).unwrap_or_else(|| "unknown".to_string());
    let url = v.fetch("url").text().map(str::to_string);

    match category.kind() {
      CategoryKind::Commit => {
        let message = v.fetch("commit.message").text().unwrap_or("");
        let body = message
          .split_once('\n')
          .map(|(_, rest)| rest.trim())
          .filter(|rest| !rest.is_empty())
          .map(str::to_string);

        ActivityRecord {
          category,
          repository,
          key: RecordKey::Commit {
            sha: v.fetch("sha").text().unwrap_or("").to_string(),
            subject: first_line(message),
          },
          state: None,
          timestamp: parse_timestamp(v.first_text(&["commit.author.date", "commit.committer.date"])),
          url,
          body,
        }
      }
      CategoryKind::Issue | CategoryKind::PullRequest => ActivityRecord {
        category,
        repository,
        key: RecordKey::Item {
          number: v.fetch("number").to::<i64>(),
          title: v.fetch("title").text().unwrap_or("").to_string(),
        },
        state: v.fetch("state").text().map(|s| s.to_lowercase()),
        timestamp: parse_timestamp(v.first_text(&["createdAt"])),
        url,
        body: v.fetch("body").text().map(|s| s.trim().to_string()),
      },
    }
  }

  pub fn date(&self) -> Option<NaiveDate> {
    self.timestamp.map(|t| t.date_naive())
  }
}

fn parse_timestamp(raw: Option<String>) -> Option<DateTime<FixedOffset>> {
  raw.and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
}

/// One snapshot directory decoded into records.
#[derive(Clone, Debug, Default)]
pub struct ActivitySnapshot {
  pub source: String,
  pub range: Option<DateRange>,
  pub username: Option<String>,
  records: BTreeMap<Category, Vec<ActivityRecord>>,
}

impl ActivitySnapshot {
  pub fn new(source: impl Into<String>) -> Self {
    Self {
      source: source.into(),
      ..Default::default()
    }
  }

  pub fn insert(&mut self, category: Category, records: Vec<ActivityRecord>) {
    self.records.insert(category, records);
  }

  pub fn records(&self, category: Category) -> &[ActivityRecord] {
    self.records.get(&category).map(Vec::as_slice).unwrap_or(&[])
  }

  pub fn count(&self, category: Category) -> usize {
    self.records(category).len()
  }

  /// Earliest to latest date of commits and created issues.
  pub fn timestamp_span(&self) -> Option<DateRange> {
    let dates = [Category::Commits, Category::IssuesCreated]
      .into_iter()
      .flat_map(|c| self.records(c))
      .filter_map(ActivityRecord::date);
    let (min, max) = dates.fold(None, |acc: Option<(NaiveDate, NaiveDate)>, d| match acc {
      None => Some((d, d)),
      Some((lo, hi)) => Some((lo.min(d), hi.max(d))),
    })?;
    DateRange::new(min, max).ok()
  }
}

/// Written by the fetcher next to the category files.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMeta {
  pub username: String,
  pub since: NaiveDate,
  pub until: NaiveDate,
  pub fetched_at: String,
  pub limit: usize,
  pub counts: BTreeMap<Category, usize>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub failed: Vec<Category>,
}

impl SnapshotMeta {
  pub fn range(&self) -> Option<DateRange> {
    DateRange::new(self.since, self.until).ok()
  }
}
