use chrono::{Local, TimeZone, Utc};
use gh_activity_digest::render::{load_snapshot, render_markdown, RenderOptions};
use test_support::{commit_json, item_json, write_snapshot};

#[test]
fn digest_with_bodies_snapshot() {
  test_support::init_tracing();
  test_support::init_insta();
  let td = test_support::tempdir();

  let meta = serde_json::json!({
    "username": "octocat",
    "since": "2025-11-18",
    "until": "2025-11-25",
    "fetched_at": "2025-11-25T12:00:00Z",
    "limit": 100,
    "counts": { "commits": 2, "issues_created": 1, "issues_commented": 0, "prs_created": 0, "prs_reviewed": 1 }
  });
  let dir = write_snapshot(
    td.path(),
    "gh_20251118_20251125",
    &[
      ("meta.json", meta),
      (
        "commits.json",
        serde_json::json!([
          commit_json("octo/hello", "a1b2c3d4e5", "fix: guard empty input\n\nAdds a check before parsing.", "2025-11-19T10:00:00Z"),
          commit_json("octo/world", "0f0f0f0f0f", "chore: bump deps", "2025-11-21T10:00:00Z"),
        ]),
      ),
      (
        "issues_created.json",
        serde_json::json!([item_json(
          "octo/hello",
          "issues",
          12,
          "Crash when config is missing",
          "OPEN",
          "2025-11-18T15:00:00Z",
          "Steps:\n1. delete config"
        )]),
      ),
      ("issues_commented.json", serde_json::json!([])),
      (
        "prs_reviewed.json",
        serde_json::json!([item_json("octo/world", "pull", 40, "Add retry to uploader", "MERGED", "2025-11-22T08:00:00Z", "")]),
      ),
    ],
  );

  let snapshot = load_snapshot(&dir).unwrap();
  let opts = RenderOptions {
    include_body: true,
    group_by_repo: false,
    explicit_range: None,
    generated_at: Utc.with_ymd_and_hms(2025, 11, 25, 12, 0, 0).unwrap().with_timezone(&Local),
  };
  let md = render_markdown(&snapshot, &opts).unwrap();

  insta::assert_snapshot!(md, @r#"
---
period: 2025-11-18 to 2025-11-25
since: 2025-11-18
until: 2025-11-25
source: gh_20251118_20251125
username: octocat
generated_at: 2025-11-25T12:00:00Z
commits: 2
issues_created: 1
issues_commented: 0
prs_created: 0
prs_reviewed: 1
---

# GitHub Activity

## Commits (2)

- octo/hello@a1b2c3d: fix: guard empty input (Nov 19) https://github.com/octo/hello/commit/a1b2c3d4e5
  > Adds a check before parsing.
- octo/world@0f0f0f0: chore: bump deps (Nov 21) https://github.com/octo/world/commit/0f0f0f0f0f

## Issues Created (1)

- octo/hello#12: Crash when config is missing (Nov 18) [open] https://github.com/octo/hello/issues/12
  > Steps:
  > 1. delete config

## Issues Commented (0)

## PRs Created (0)

## PRs Reviewed (1)

- octo/world#40: Add retry to uploader [merged] https://github.com/octo/world/pull/40
"#);
}
