use serial_test::serial;
use test_support::{commit_json, item_json, split_frontmatter};

#[test]
#[serial]
fn fetched_directory_renders_with_username() {
  let bin = test_support::tempdir();
  let out = test_support::tempdir();

  let commits = serde_json::json!([commit_json("octo/hello", "a1b2c3d4e5", "feat: add thing", "2025-11-19T10:00:00Z")]);
  let prs = serde_json::json!([item_json("octo/world", "pull", 40, "Add retry", "MERGED", "2025-11-22T08:00:00Z", "")]);
  let script = format!(
    r#"case "$1 $2" in
  "api user") echo hubber ;;
  "search commits") cat <<'JSON'
{commits}
JSON
  ;;
  "search prs") cat <<'JSON'
{prs}
JSON
  ;;
  *) echo '[]' ;;
esac
"#
  );
  test_support::install_fake_gh(bin.path(), &script);

  test_support::cmd_bin("gh-activity-fetch")
    .env("PATH", test_support::path_with(bin.path()))
    .args(["-s", "2025-11-18", "-d", "7", "-o"])
    .arg(out.path())
    .assert()
    .success();

  let dir = out.path().join("gh_20251118_20251125");
  test_support::cmd_bin("gh-activity-render").arg(&dir).assert().success();

  let md = std::fs::read_to_string(dir.join("summary.md")).unwrap();
  let (yaml, body) = split_frontmatter(&md);
  let fm: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();

  assert_eq!(fm["username"], "hubber");
  assert_eq!(fm["commits"], 1);
  // both prs searches answer with the same record
  assert_eq!(fm["prs_created"], 1);
  assert_eq!(fm["prs_reviewed"], 1);
  assert!(body.contains(
    "## PRs Created (1)\n\n- octo/world#40: Add retry (Nov 22) [merged] https://github.com/octo/world/pull/40"
  ));
  assert!(body.contains(
    "## PRs Reviewed (1)\n\n- octo/world#40: Add retry [merged] https://github.com/octo/world/pull/40"
  ));
}
