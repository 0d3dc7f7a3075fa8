// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: The fixed set of activity categories and everything derived from a category (file, heading, search shape)
// role: model/categories
// outputs: Category enum, CategoryKind, search argument builders
// invariants:
// - Exactly five categories; Category::ALL order is the render and fetch order
// - file_name() is stable; it is the persistence contract between fetch and render
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::window::DateRange;

/// Maximum number of search results requested per category.
pub const SEARCH_LIMIT: usize = 100;

const ITEM_FIELDS: &str = "repository,number,title,state,createdAt,url,body";
const COMMIT_FIELDS: &str = "repository,sha,commit,url";

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
  Commits,
  IssuesCreated,
  IssuesCommented,
  PrsCreated,
  PrsReviewed,
}

/// Record shape stored for a category.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CategoryKind {
  Commit,
  Issue,
  PullRequest,
}

impl Category {
  pub const ALL: [Category; 5] = [
    Category::Commits,
    Category::IssuesCreated,
    Category::IssuesCommented,
    Category::PrsCreated,
    Category::PrsReviewed,
  ];

  /// Key used in file names, frontmatter and meta.json.
  pub fn key(self) -> &'static str {
    match self {
      Category::Commits => "commits",
      Category::IssuesCreated => "issues_created",
      Category::IssuesCommented => "issues_commented",
      Category::PrsCreated => "prs_created",
      Category::PrsReviewed => "prs_reviewed",
    }
  }

  pub fn file_name(self) -> String {
    format!("{}.json", self.key())
  }

  pub fn heading(self) -> &'static str {
    match self {
      Category::Commits => "Commits",
      Category::IssuesCreated => "Issues Created",
      Category::IssuesCommented => "Issues Commented",
      Category::PrsCreated => "PRs Created",
      Category::PrsReviewed => "PRs Reviewed",
    }
  }

  pub fn kind(self) -> CategoryKind {
    match self {
      Category::Commits => CategoryKind::Commit,
      Category::IssuesCreated | Category::IssuesCommented => CategoryKind::Issue,
      Category::PrsCreated | Category::PrsReviewed => CategoryKind::PullRequest,
    }
  }

  /// Whether list items carry a date. Commented and reviewed items only know
  /// the item's creation date, not the user's activity date.
  pub fn shows_date(self) -> bool {
    matches!(self, Category::Commits | Category::IssuesCreated | Category::PrsCreated)
  }

  /// Arguments for `gh` that run this category's search for `login` over `range`.
  pub fn search_args(self, login: &str, range: &DateRange) -> Vec<String> {
    let (subject, person_flag, date_flag, fields) = match self {
      Category::Commits => ("commits", "--author", "--author-date", COMMIT_FIELDS),
      Category::IssuesCreated => ("issues", "--author", "--created", ITEM_FIELDS),
      Category::IssuesCommented => ("issues", "--commenter", "--updated", ITEM_FIELDS),
      Category::PrsCreated => ("prs", "--author", "--created", ITEM_FIELDS),
      Category::PrsReviewed => ("prs", "--reviewed-by", "--updated", ITEM_FIELDS),
    };

    vec![
      "search".into(),
      subject.into(),
      person_flag.into(),
      login.into(),
      date_flag.into(),
      range.query(),
      "--limit".into(),
      SEARCH_LIMIT.to_string(),
      "--json".into(),
      fields.into(),
    ]
  }
}

impl fmt::Display for Category {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.key())
  }
}
