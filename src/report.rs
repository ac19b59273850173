// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Qualify run folders by date window, extract one row per run, and write the aggregated CSV report
// role: processing/orchestrator
// inputs: EffectiveConfig, resolved+validated (start, end) YYMMDD tokens
// outputs: ngs_run_summary_<start>_<end>.csv under out_dir; stdout skip notices and final run count
// side_effects: Lists the archive directory; writes the report file; prints to stdout
// invariants:
// - qualifying folders are processed in sorted name order
// - the report file is written only after the whole batch completes; never partial
// - run_count covers every qualifying folder, including skipped ones
// errors: Strict mode propagates the first per-run failure with the run id; IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::cli::EffectiveConfig;
use crate::error::ExtractError;
use crate::{interop, run_params, samplesheet};

/// One report line; serde renames pin the exact CSV header spelling.
#[derive(Debug, Serialize, Clone, Eq, PartialEq)]
pub struct ReportRow {
  #[serde(rename = "Run_ID")]
  pub run_id: String,
  #[serde(rename = "Yield_g")]
  pub yield_g: String,
  #[serde(rename = "Percent_gt_Q30")]
  pub pct_q30: String,
  #[serde(rename = "Percent_pass_filter")]
  pub pct_pass_filter: String,
  #[serde(rename = "Experiment_name")]
  pub experiment_name: String,
  #[serde(rename = "Sequencer_side")]
  pub sequencer_side: String,
  #[serde(rename = "Flowcell_type")]
  pub flowcell_type: String,
  #[serde(rename = "Pipeline(s)")]
  pub pipelines: String,
}

#[derive(Debug)]
pub struct Report {
  pub rows: Vec<ReportRow>,
  pub skipped: Vec<(String, ExtractError)>,
  pub run_count: usize,
}

pub fn report_file_name(start: &str, end: &str) -> String {
  format!("ngs_run_summary_{}_{}.csv", start, end)
}

/// Extract all three per-run sources into one row. Extraction order matches
/// the report's column order: metrics, parameters, pipelines.
pub fn extract_row(run_folder: &Path, tools_dir: Option<&str>) -> Result<ReportRow, ExtractError> {
  let run_id = run_folder
    .file_name()
    .map(|n| n.to_string_lossy().to_string())
    .unwrap_or_default();
  let folder = run_folder.to_string_lossy();

  let metrics = interop::run_metrics(&folder, tools_dir)?;
  let params = run_params::run_parameters(&folder)?;
  let pipelines = samplesheet::pipeline_names(&folder)?;

  Ok(ReportRow {
    run_id,
    yield_g: metrics.yield_g,
    pct_q30: metrics.pct_q30,
    pct_pass_filter: metrics.pct_pass_filter,
    experiment_name: params.experiment_name,
    sequencer_side: params.side,
    flowcell_type: params.flowcell_type,
    pipelines,
  })
}

/// Does this folder name qualify for the window? The first six characters
/// must parse as an integer lying inside [start, end]. Anything else in the
/// archive (temp dirs, non-run folders) is simply not a run.
fn qualifies(name: &str, start: u32, end: u32) -> bool {
  name
    .get(..6)
    .and_then(|t| t.parse::<u32>().ok())
    .map(|date| start <= date && date <= end)
    .unwrap_or(false)
}

/// Assemble the report for every qualifying run folder under `archive`.
///
/// Pure with respect to process state: all policy (skip vs strict) is decided
/// here and surfaced in the returned `Report`; the caller owns printing and
/// file output.
pub fn assemble_report(archive: &Path, start: &str, end: &str, tools_dir: Option<&str>, strict: bool) -> Result<Report> {
  // Validated tokens are guaranteed numeric by this point.
  let start_num: u32 = start.parse().context("parsing start date token")?;
  let end_num: u32 = end.parse().context("parsing end date token")?;

  let mut run_folders: Vec<std::path::PathBuf> = Vec::new();
  for entry in std::fs::read_dir(archive).with_context(|| format!("listing archive {}", archive.display()))? {
    let entry = entry?;
    if !entry.path().is_dir() {
      continue;
    }
    let name = entry.file_name().to_string_lossy().to_string();
    if qualifies(&name, start_num, end_num) {
      run_folders.push(entry.path());
    }
  }
  // Directory order is filesystem-dependent; sort for a deterministic report.
  run_folders.sort();

  let mut rows: Vec<ReportRow> = Vec::new();
  let mut skipped: Vec<(String, ExtractError)> = Vec::new();
  let run_count = run_folders.len();

  for folder in &run_folders {
    let run_id = folder.file_name().map(|n| n.to_string_lossy().to_string()).unwrap_or_default();
    match extract_row(folder, tools_dir) {
      Ok(row) => rows.push(row),
      Err(e) if strict => {
        return Err(anyhow::Error::new(e).context(format!("extracting run {}", run_id)));
      }
      Err(e) => skipped.push((run_id, e)),
    }
  }

  Ok(Report { rows, skipped, run_count })
}

/// Write the report CSV. The header row is always present, even for an empty
/// report.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
  let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating report file {}", path.display()))?;
  if report.rows.is_empty() {
    // serialize() emits headers from the first row; an empty report needs them written by hand.
    writer.write_record([
      "Run_ID",
      "Yield_g",
      "Percent_gt_Q30",
      "Percent_pass_filter",
      "Experiment_name",
      "Sequencer_side",
      "Flowcell_type",
      "Pipeline(s)",
    ])?;
  }
  for row in &report.rows {
    writer.serialize(row)?;
  }
  writer.flush()?;
  Ok(())
}

/// Orchestrate one invocation: assemble, report skips and the final count on
/// stdout, then write the file.
pub fn run(cfg: &EffectiveConfig, start: &str, end: &str) -> Result<()> {
  let report = assemble_report(
    Path::new(&cfg.archive),
    start,
    end,
    cfg.interop_tools.as_deref(),
    cfg.strict,
  )?;

  for (run_id, reason) in &report.skipped {
    println!("Skipped run {}: {}", run_id, reason);
  }
  println!("There were {} runs between {} and {}", report.run_count, start, end);

  let out_path = Path::new(&cfg.out_dir).join(report_file_name(start, end));
  write_report(&report, &out_path)?;
  println!("Report written to {}", out_path.display());
  Ok(())
}
