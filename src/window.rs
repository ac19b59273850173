use chrono::{DateTime, Datelike, Local, NaiveDate};

// Date-window types live here to keep main focused. Run folder names lead
// with a YYMMDD token; both endpoints of the reporting window use the same
// fixed-width format, so lexicographic and numeric ordering coincide.

/// Resolve optional CLI date tokens into a concrete inclusive (start, end) pair.
///
/// Each unspecified endpoint independently defaults to the previous calendar
/// month (start = first day, end = last day) relative to `now`. Supports an
/// optional `now` override for deterministic testing.
pub fn resolve_range(
  start: Option<&str>,
  end: Option<&str>,
  now: Option<DateTime<Local>>,
) -> (String, String) {
  let (month_start, month_end) = last_month_bounds(crate::util::effective_now(now));
  if start.is_none() || end.is_none() {
    println!("Defaulting unspecified date(s) to last month");
  }
  (
    start.map(str::to_string).unwrap_or(month_start),
    end.map(str::to_string).unwrap_or(month_end),
  )
}

/// First and last day of the most recently completed calendar month, as YYMMDD.
fn last_month_bounds(now: DateTime<Local>) -> (String, String) {
  let first_this_month = now.date_naive().with_day(1).unwrap();
  let last_prev = first_this_month.pred_opt().unwrap();
  let first_prev = NaiveDate::from_ymd_opt(last_prev.year(), last_prev.month(), 1).unwrap();
  (
    first_prev.format("%y%m%d").to_string(),
    last_prev.format("%y%m%d").to_string(),
  )
}

/// Parse a `--now-override` string into a local DateTime.
/// Accepts RFC3339 (e.g. 2025-08-15T12:00:00Z) or a naive local timestamp
/// formatted as `%Y-%m-%dT%H:%M:%S`.
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
  })
}

/// Outcome of validating a resolved (start, end) pair.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct RangeCheck {
  pub start_ok: bool,
  pub end_ok: bool,
  pub ordered: bool,
}

impl RangeCheck {
  pub fn passed(&self) -> bool {
    self.start_ok && self.end_ok && self.ordered
  }

  /// Human-readable diagnostics naming each failed check.
  pub fn problems(&self, start: &str, end: &str) -> Vec<String> {
    let mut out = Vec::new();
    if !self.start_ok {
      out.push(format!("Start date '{}' is not a valid YYMMDD token", start));
    }
    if !self.end_ok {
      out.push(format!("End date '{}' is not a valid YYMMDD token", end));
    }
    if !self.ordered {
      out.push(format!("End date '{}' is before start date '{}'", end, start));
    }
    out
  }
}

pub fn validate_range(start: &str, end: &str) -> RangeCheck {
  RangeCheck {
    start_ok: token_valid(start),
    end_ok: token_valid(end),
    ordered: end >= start,
  }
}

/// A token is valid iff it is exactly 6 ASCII digits with month in 1..=12 and
/// day in 1..=31. No check of day validity within the named month; the year
/// digits are unconstrained. Non-numeric tokens are rejected here rather than
/// surfacing as a parse panic later.
pub fn token_valid(token: &str) -> bool {
  if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
    return false;
  }
  let month: u32 = token[2..4].parse().unwrap_or(0);
  let day: u32 = token[4..6].parse().unwrap_or(0);
  (1..=12).contains(&month) && (1..=31).contains(&day)
}
