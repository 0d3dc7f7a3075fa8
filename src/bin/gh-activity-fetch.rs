use anyhow::{bail, Context, Result};
use clap::Parser;

use gh_activity_digest::cli::{normalize_fetch, FetchCli};
use gh_activity_digest::fetch::{run_fetch_with, FetchParams};
use gh_activity_digest::gh::GhCli;
use gh_activity_digest::window::{parse_now_override, resolve_range};
use gh_activity_digest::{util, Category};

fn main() -> Result<()> {
  util::init_tracing();
  let cli = FetchCli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<FetchCli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: flags -> explicit config
  let cfg = normalize_fetch(cli)?;

  // Phase 2: resolve the window against "today"
  let now = util::effective_now(parse_now_override(cfg.now_override.as_deref()));
  let range = resolve_range(&cfg.range, now.date_naive())?;
  println!("Fetching GitHub activity for {}", range.period());

  // Phase 3: one search per category, best effort
  let params = FetchParams {
    range,
    out_dir: cfg.out_dir,
    fetched_at: now,
  };
  let report = run_fetch_with(&GhCli::new(), &params, |category| println!("Searching {}...", category))
    .context("fetching activity")?;

  println!("User: {}", report.username);
  println!("Output: {}", report.dir.display());
  for category in Category::ALL {
    match report.count(category) {
      Some(n) => println!("  {}: {}", category, n),
      None => println!("  {}: failed", category),
    }
  }

  if !report.is_complete() {
    let failures: Vec<String> = report.failures().map(|e| e.to_string()).collect();
    for f in &failures {
      eprintln!("{}", f);
    }
    bail!("{} of {} categories failed", failures.len(), Category::ALL.len());
  }

  Ok(())
}
