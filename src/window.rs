// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Resolve the [since, until] fetch window from days/start/end flags and map ranges to snapshot directory names
// role: windowing
// inputs: Optional days, start date, end date; "today" (overridable for tests)
// outputs: DateRange; gh search range strings; gh_<since>_<until> directory names
// invariants:
// - since <= until for every DateRange that exists
// - start and end together are rejected before any date math
// - dir_name() is a pure function of the range
// errors: ActivityError::Config for conflicting flags, malformed dates, overflow
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::{DateTime, Days, Local, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ActivityError;

pub const DEFAULT_DAYS: u32 = 7;

const DATE_FMT: &str = "%Y-%m-%d";
const COMPACT_FMT: &str = "%Y%m%d";

/// Inclusive calendar-date window used to scope every search of one invocation.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RangeBounds")]
pub struct DateRange {
  since: NaiveDate,
  until: NaiveDate,
}

#[derive(Deserialize)]
struct RangeBounds {
  since: NaiveDate,
  until: NaiveDate,
}

impl TryFrom<RangeBounds> for DateRange {
  type Error = ActivityError;

  fn try_from(b: RangeBounds) -> Result<Self, Self::Error> {
    DateRange::new(b.since, b.until)
  }
}

impl DateRange {
  pub fn new(since: NaiveDate, until: NaiveDate) -> Result<Self, ActivityError> {
    if since > until {
      return Err(ActivityError::config(format!(
        "invalid range: {} is after {}",
        since.format(DATE_FMT),
        until.format(DATE_FMT)
      )));
    }
    Ok(Self { since, until })
  }

  pub fn since(&self) -> NaiveDate {
    self.since
  }

  pub fn until(&self) -> NaiveDate {
    self.until
  }

  /// GitHub search range qualifier value, e.g. `2025-11-18..2025-11-25`.
  pub fn query(&self) -> String {
    format!("{}..{}", self.since.format(DATE_FMT), self.until.format(DATE_FMT))
  }

  /// Snapshot directory name, e.g. `gh_20251118_20251125`.
  pub fn dir_name(&self) -> String {
    format!("gh_{}_{}", self.since.format(COMPACT_FMT), self.until.format(COMPACT_FMT))
  }

  /// Inverse of `dir_name`; returns None for names not produced by it.
  pub fn from_dir_name(name: &str) -> Option<Self> {
    static RE_DIR: Lazy<Regex> = Lazy::new(|| Regex::new(r"^gh_(\d{8})_(\d{8})$").expect("valid dir regex"));

    let caps = RE_DIR.captures(name)?;
    let since = NaiveDate::parse_from_str(caps.get(1)?.as_str(), COMPACT_FMT).ok()?;
    let until = NaiveDate::parse_from_str(caps.get(2)?.as_str(), COMPACT_FMT).ok()?;

    Self::new(since, until).ok()
  }

  /// Human label used in the digest frontmatter.
  pub fn period(&self) -> String {
    format!("{} to {}", self.since.format(DATE_FMT), self.until.format(DATE_FMT))
  }
}

/// Parsed (but not yet resolved) window flags.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RangeRequest {
  pub days: Option<u32>,
  pub start_date: Option<NaiveDate>,
  pub end_date: Option<NaiveDate>,
}

/// Parse an ISO 8601 calendar date supplied through `flag`.
pub fn parse_date(flag: &str, raw: &str) -> Result<NaiveDate, ActivityError> {
  NaiveDate::parse_from_str(raw.trim(), DATE_FMT)
    .map_err(|e| ActivityError::config(format!("invalid {} '{}': expected YYYY-MM-DD ({})", flag, raw, e)))
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate, ActivityError> {
  date
    .checked_add_days(Days::new(days.into()))
    .ok_or_else(|| ActivityError::config(format!("date overflow adding {} days to {}", days, date)))
}

fn sub_days(date: NaiveDate, days: u32) -> Result<NaiveDate, ActivityError> {
  date
    .checked_sub_days(Days::new(days.into()))
    .ok_or_else(|| ActivityError::config(format!("date overflow subtracting {} days from {}", days, date)))
}

/// Resolve a concrete range from window flags relative to `today`.
pub fn resolve_range(req: &RangeRequest, today: NaiveDate) -> Result<DateRange, ActivityError> {
  let days = req.days.unwrap_or(DEFAULT_DAYS);

  match (req.start_date, req.end_date) {
    (Some(_), Some(_)) => Err(ActivityError::config(
      "--start-date and --end-date are mutually exclusive",
    )),
    (Some(start), None) => {
      let until = match req.days {
        Some(n) if n > 0 => add_days(start, n)?,
        // open-ended start runs to today; a future start collapses to a single day
        _ => today.max(start),
      };
      DateRange::new(start, until)
    }
    (None, Some(end)) => DateRange::new(sub_days(end, days)?, end),
    (None, None) => DateRange::new(sub_days(today, days)?, today),
  }
}

/// Parse a `--now-override` string into a local DateTime.
/// Accepts RFC3339 (e.g. 2025-11-25T12:00:00Z), a naive local timestamp
/// `%Y-%m-%dT%H:%M:%S`, or a bare `%Y-%m-%d` (local midnight).
pub fn parse_now_override(s: Option<&str>) -> Option<DateTime<Local>> {
  s.and_then(|raw| {
    chrono::DateTime::parse_from_rfc3339(raw)
      .ok()
      .map(|dt| dt.with_timezone(&Local))
      .or_else(|| {
        chrono::NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
          .ok()
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
      .or_else(|| {
        NaiveDate::parse_from_str(raw, DATE_FMT)
          .ok()
          .and_then(|d| d.and_hms_opt(0, 0, 0))
          .and_then(|ndt| ndt.and_local_timezone(Local).single())
      })
  })
}
