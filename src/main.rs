use anyhow::{Result, bail};
use clap::Parser;

mod cli;
mod error;
mod interop;
mod report;
mod run_params;
mod samplesheet;
mod util;
mod window;

use crate::cli::{Cli, normalize};

fn main() -> Result<()> {
  let cli = Cli::parse();

  if cli.gen_man {
    let page = util::render_man_page::<Cli>()?;
    print!("{}", page);
    return Ok(());
  }

  // Phase 1: normalize CLI
  let cfg = normalize(cli)?;

  // Phase 2: resolve and validate the date window
  let now_opt = window::parse_now_override(cfg.now_override.as_deref());
  let (start, end) = window::resolve_range(cfg.start_date.as_deref(), cfg.end_date.as_deref(), now_opt);
  println!("Start: {}", start);
  println!("End: {}", end);

  let check = window::validate_range(&start, &end);
  if !check.passed() {
    for problem in check.problems(&start, &end) {
      println!("{}", problem);
    }
    bail!("invalid date range: no report written");
  }

  // Phase 3: scan the archive and write the report
  report::run(&cfg, &start, &end)
}
