use crate::error::ExtractError;
use crate::util;

// The binary InterOp files are never parsed here; we consume the tabular
// stdout of Illumina's InterOp command-line tools, the same way the rest of
// the codebase consumes subprocess output.

const SUMMARY_TOOL: &str = "interop_summary";
const IMAGING_TOOL: &str = "interop_imaging_table";

const YIELD_COLUMN: &str = "Yield G";
const Q30_COLUMN: &str = "% >= Q30";
const PASS_FILTER_COLUMN: &str = "% Pass Filter";

/// Per-run scalar quality metrics, rendered as text for the report.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RunMetrics {
  pub yield_g: String,
  pub pct_q30: String,
  pub pct_pass_filter: String,
}

/// Extract yield, %>=Q30 and mean %-pass-filter for one run folder.
pub fn run_metrics(run_folder: &str, tools_dir: Option<&str>) -> Result<RunMetrics, ExtractError> {
  let summary_out = run_interop(SUMMARY_TOOL, run_folder, tools_dir)?;
  let imaging_out = run_interop(IMAGING_TOOL, run_folder, tools_dir)?;

  let (yield_g, pct_q30) = parse_summary(&summary_out)?;
  let pct_pass_filter = parse_imaging(&imaging_out)?;

  Ok(RunMetrics {
    yield_g,
    pct_q30,
    pct_pass_filter,
  })
}

fn run_interop(tool: &str, run_folder: &str, tools_dir: Option<&str>) -> Result<String, ExtractError> {
  util::run_tool(tool, tools_dir, &[run_folder.to_string()]).map_err(|e| ExtractError::MetricsUnavailable {
    reason: format!("{:#}", e),
  })
}

fn unavailable(reason: impl Into<String>) -> ExtractError {
  ExtractError::MetricsUnavailable { reason: reason.into() }
}

fn split_row(line: &str) -> Vec<&str> {
  line.split(',').map(str::trim).collect()
}

fn is_data_line(line: &str) -> bool {
  !line.trim().is_empty() && !line.trim_start().starts_with('#')
}

/// Pull yield and %>=Q30 from the summary table: locate the header row that
/// carries both columns, then read the first data row after it. The summary
/// can hold per-read rows before the total; the first row is authoritative
/// (matches long-observed reporting behavior).
fn parse_summary(text: &str) -> Result<(String, String), ExtractError> {
  let mut lines = text.lines().filter(|l| is_data_line(l));

  let (yield_idx, q30_idx) = loop {
    let line = lines
      .next()
      .ok_or_else(|| unavailable(format!("summary output has no '{}' header", YIELD_COLUMN)))?;
    let cells = split_row(line);
    let yield_idx = cells.iter().position(|c| *c == YIELD_COLUMN);
    let q30_idx = cells.iter().position(|c| *c == Q30_COLUMN);
    if let (Some(y), Some(q)) = (yield_idx, q30_idx) {
      break (y, q);
    }
  };

  let row = lines
    .next()
    .ok_or_else(|| unavailable("summary table has a header but no records"))?;
  let cells = split_row(row);
  let yield_g = cells
    .get(yield_idx)
    .ok_or_else(|| unavailable(format!("summary record is missing '{}'", YIELD_COLUMN)))?;
  let pct_q30 = cells
    .get(q30_idx)
    .ok_or_else(|| unavailable(format!("summary record is missing '{}'", Q30_COLUMN)))?;

  Ok((yield_g.to_string(), pct_q30.to_string()))
}

/// Unweighted mean of the %-pass-filter column across every imaging record.
/// No weighting by tile size; every row counts once.
fn parse_imaging(text: &str) -> Result<String, ExtractError> {
  let mut lines = text.lines().filter(|l| is_data_line(l));

  let pf_idx = loop {
    let line = lines
      .next()
      .ok_or_else(|| unavailable(format!("imaging output has no '{}' header", PASS_FILTER_COLUMN)))?;
    if let Some(idx) = split_row(line).iter().position(|c| *c == PASS_FILTER_COLUMN) {
      break idx;
    }
  };

  let mut sum = 0.0_f64;
  let mut count = 0_usize;
  for line in lines {
    let cells = split_row(line);
    let cell = cells
      .get(pf_idx)
      .ok_or_else(|| unavailable(format!("imaging record is missing '{}'", PASS_FILTER_COLUMN)))?;
    let value: f64 = cell
      .parse()
      .map_err(|_| unavailable(format!("imaging '{}' value '{}' is not numeric", PASS_FILTER_COLUMN, cell)))?;
    sum += value;
    count += 1;
  }

  if count == 0 {
    return Err(unavailable("imaging table has a header but no records"));
  }

  Ok(format!("{}", sum / count as f64))
}
