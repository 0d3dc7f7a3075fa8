use clap::Parser;
use std::path::PathBuf;

use crate::error::ActivityError;
use crate::render::default_output_path;
use crate::window::{parse_date, DateRange, RangeRequest};

#[derive(Parser, Debug)]
#[command(
    name = "gh-activity-fetch",
    version,
    about = "Fetch your recent GitHub activity (commits, issues, PRs, reviews) into a dated directory of JSON files",
    long_about = None
)]
pub struct FetchCli {
  /// Number of days in the window (default 7)
  #[arg(short = 'd', long)]
  pub days: Option<u32>,

  /// First day of the window (YYYY-MM-DD); conflicts with --end-date
  #[arg(short = 's', long = "start-date", value_name = "START_DATE")]
  pub start_date: Option<String>,

  /// Last day of the window (YYYY-MM-DD); conflicts with --start-date
  #[arg(short = 'e', long = "end-date", value_name = "END_DATE")]
  pub end_date: Option<String>,

  /// Parent directory for the gh_<since>_<until> snapshot directory
  #[arg(short = 'o', long = "out-dir", default_value = ".")]
  pub out_dir: PathBuf,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override "now" (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Parser, Debug)]
#[command(
    name = "gh-activity-render",
    version,
    about = "Render a gh_<since>_<until> snapshot directory as a Markdown digest",
    long_about = None
)]
pub struct RenderCli {
  /// Snapshot directory containing the category JSON files (e.g. gh_20251118_20251125)
  #[arg(required_unless_present = "gen_man")]
  pub directory: Option<PathBuf>,

  /// Output file (default: DIRECTORY/summary.md); overwritten if present
  #[arg(short = 'o', long)]
  pub output: Option<PathBuf>,

  /// Include issue/PR/commit body text as blockquotes
  #[arg(long)]
  pub include_body: bool,

  /// Group records under per-repository subheadings
  #[arg(long)]
  pub group_by_repo: bool,

  /// Range start for the frontmatter (YYYY-MM-DD); must be paired with --until
  #[arg(long)]
  pub since: Option<String>,

  /// Range end for the frontmatter (YYYY-MM-DD); must be paired with --since
  #[arg(long)]
  pub until: Option<String>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the generation timestamp (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct FetchConfig {
  pub range: RangeRequest,
  pub out_dir: PathBuf,
  pub now_override: Option<String>,
}

#[derive(Debug)]
pub struct RenderConfig {
  pub dir: PathBuf,
  pub output: PathBuf,
  pub include_body: bool,
  pub group_by_repo: bool,
  pub explicit_range: Option<DateRange>,
  pub now_override: Option<String>,
}

pub fn normalize_fetch(cli: FetchCli) -> Result<FetchConfig, ActivityError> {
  // Reject the conflict before looking at either value
  if cli.start_date.is_some() && cli.end_date.is_some() {
    return Err(ActivityError::config(
      "--start-date and --end-date are mutually exclusive",
    ));
  }

  let range = RangeRequest {
    days: cli.days,
    start_date: cli.start_date.as_deref().map(|s| parse_date("--start-date", s)).transpose()?,
    end_date: cli.end_date.as_deref().map(|s| parse_date("--end-date", s)).transpose()?,
  };

  Ok(FetchConfig {
    range,
    out_dir: cli.out_dir,
    now_override: cli.now_override,
  })
}

pub fn normalize_render(cli: RenderCli) -> Result<RenderConfig, ActivityError> {
  let explicit_range = match (&cli.since, &cli.until) {
    (Some(s), Some(u)) => Some(DateRange::new(parse_date("--since", s)?, parse_date("--until", u)?)?),
    (None, None) => None,
    _ => return Err(ActivityError::config("--since and --until must be given together")),
  };

  let dir = cli
    .directory
    .ok_or_else(|| ActivityError::config("a snapshot DIRECTORY is required"))?;
  let output = cli.output.unwrap_or_else(|| default_output_path(&dir));

  Ok(RenderConfig {
    dir,
    output,
    include_body: cli.include_body,
    group_by_repo: cli.group_by_repo,
    explicit_range,
    now_override: cli.now_override,
  })
}
