use predicates::prelude::*;
use serial_test::serial;
use test_support::{commit_json, item_json, split_frontmatter, write_snapshot};

fn three_commits() -> serde_json::Value {
  serde_json::json!([
    commit_json("octo/hello", "a1b2c3d4e5", "fix: guard empty input\n\nAdds a check.", "2025-11-19T10:00:00Z"),
    commit_json("octo/hello", "b2c3d4e5f6", "docs: readme", "2025-11-20T10:00:00Z"),
    commit_json("octo/world", "c3d4e5f6a7", "chore: bump deps", "2025-11-21T10:00:00Z"),
  ])
}

fn render(dir: &std::path::Path, extra: &[&str]) -> String {
  test_support::cmd_bin("gh-activity-render")
    .arg(dir)
    .args(extra)
    .args(["--now-override", "2025-11-25T12:00:00Z"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Generated:"));
  std::fs::read_to_string(dir.join("summary.md")).unwrap()
}

#[test]
#[serial]
fn commits_only_snapshot_end_to_end() {
  let td = test_support::tempdir();
  let dir = write_snapshot(
    td.path(),
    "gh_20251118_20251125",
    &[
      ("commits.json", three_commits()),
      ("issues_created.json", serde_json::json!([])),
      ("issues_commented.json", serde_json::json!([])),
      ("prs_created.json", serde_json::json!([])),
      ("prs_reviewed.json", serde_json::json!([])),
    ],
  );

  let md = render(&dir, &[]);
  let (yaml, body) = split_frontmatter(&md);
  let fm: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();

  assert_eq!(fm["commits"], 3);
  for key in ["issues_created", "issues_commented", "prs_created", "prs_reviewed"] {
    assert_eq!(fm[key], 0, "{}", key);
  }
  assert_eq!(fm["source"], "gh_20251118_20251125");
  assert_eq!(fm["period"], "2025-11-18 to 2025-11-25");

  assert_eq!(body.matches("\n## ").count(), 5);
  assert_eq!(body.lines().filter(|l| l.starts_with("- ")).count(), 3);
  assert!(body.contains("## Commits (3)\n\n- octo/hello@a1b2c3d: fix: guard empty input (Nov 19)"));
}

#[test]
#[serial]
fn missing_category_files_count_zero() {
  let td = test_support::tempdir();
  let dir = write_snapshot(td.path(), "gh_20251118_20251125", &[("commits.json", three_commits())]);

  let md = render(&dir, &[]);
  let (yaml, body) = split_frontmatter(&md);
  let fm: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();

  assert_eq!(fm["prs_reviewed"], 0);
  assert!(body.trim_end().ends_with("## PRs Reviewed (0)"));
}

#[test]
#[serial]
fn body_text_requires_flag() {
  let td = test_support::tempdir();
  let issue = item_json("octo/hello", "issues", 12, "Crash", "OPEN", "2025-11-18T15:00:00Z", "secret repro steps");
  let dir = write_snapshot(td.path(), "gh_20251118_20251125", &[("issues_created.json", serde_json::json!([issue]))]);

  let plain = render(&dir, &[]);
  assert!(!plain.contains("secret repro steps"));

  let with_body = render(&dir, &["--include-body"]);
  assert!(with_body.contains("  > secret repro steps"));
}

#[test]
#[serial]
fn custom_output_is_overwritten() {
  let td = test_support::tempdir();
  let dir = write_snapshot(td.path(), "gh_20251118_20251125", &[]);
  let output = td.path().join("digest.md");
  std::fs::write(&output, "old contents").unwrap();

  test_support::cmd_bin("gh-activity-render")
    .arg(&dir)
    .arg("-o")
    .arg(&output)
    .assert()
    .success()
    .stdout(predicate::str::contains("digest.md"));

  let md = std::fs::read_to_string(&output).unwrap();
  assert!(!md.contains("old contents"));
  assert!(md.contains("# GitHub Activity"));
  assert!(!dir.join("summary.md").exists());
}

#[test]
#[serial]
fn not_a_directory_exits_one() {
  let td = test_support::tempdir();
  test_support::cmd_bin("gh-activity-render")
    .arg(td.path().join("gh_missing"))
    .assert()
    .code(1)
    .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn man_page_is_troff() {
  test_support::cmd_bin("gh-activity-render")
    .arg("--gen-man")
    .assert()
    .success()
    .stdout(predicate::str::contains(".TH"));
}
