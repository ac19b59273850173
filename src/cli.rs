use anyhow::{Result, bail};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::util;

#[derive(Parser, Debug)]
#[command(
    name = "ngs-run-summary",
    version,
    about = "Aggregate Illumina run quality metrics into a monthly CSV report",
    long_about = None
)]
pub struct Cli {
  /// Archive directory containing one subdirectory per sequencing run (default: current dir)
  #[arg(long, short = 'a', default_value = ".")]
  pub archive: PathBuf,

  /// Window start date, YYMMDD inclusive (default: first day of last month)
  #[arg(long = "startdate", short = 's')]
  pub start_date: Option<String>,

  /// Window end date, YYMMDD inclusive (default: last day of last month)
  #[arg(long = "enddate", short = 'e')]
  pub end_date: Option<String>,

  /// Directory to write the report CSV into (default: current dir)
  #[arg(long, default_value = ".")]
  pub out_dir: PathBuf,

  /// Abort the whole batch when a run fails to extract, instead of skipping it
  #[arg(long)]
  pub strict: bool,

  /// Directory holding the InterOp summary/imaging tools (default: rely on PATH)
  #[arg(long)]
  pub interop_tools: Option<PathBuf>,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override the "now" instant used for date defaulting (hidden; tests only)
  #[arg(long = "now-override", hide = true)]
  pub now_override: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub archive: String, // absolute path for stability
  pub start_date: Option<String>,
  pub end_date: Option<String>,
  pub out_dir: String,
  pub strict: bool,
  pub interop_tools: Option<String>,
  pub now_override: Option<String>,
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  if !cli.archive.is_dir() {
    bail!("archive directory not found: {}", cli.archive.display());
  }

  let archive = util::canonicalize_lossy(&cli.archive);
  let out_dir = util::canonicalize_lossy(&cli.out_dir);

  Ok(EffectiveConfig {
    archive,
    start_date: cli.start_date,
    end_date: cli.end_date,
    out_dir,
    strict: cli.strict,
    interop_tools: cli.interop_tools.as_deref().map(util::canonicalize_lossy),
    now_override: cli.now_override.clone(),
  })
}
