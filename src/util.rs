// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for paths, subprocess collaborators, time defaulting, and man page rendering
// role: utilities/helpers
// inputs: Paths; optional DateTime override; tool names and args; clap CommandFactory
// outputs: Canonicalized paths, tool stdout text, effective now, man page text
// side_effects: run_tool invokes subprocesses
// invariants:
// - run_tool resolves the executable inside tools_dir when one is given, else via PATH
// - canonicalize_lossy always returns some absolute-ish string, never errors
// errors: run_tool surfaces command + stderr; IO errors bubble with context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::CommandFactory;

pub fn canonicalize_lossy<P: AsRef<Path>>(p: P) -> String {
  let p = p.as_ref();
  let pb: PathBuf = match std::fs::canonicalize(p) {
    Ok(x) => x,
    Err(_) => match std::env::current_dir() {
      Ok(cwd) => cwd.join(p),
      Err(_) => PathBuf::from(p),
    },
  };
  pb.to_string_lossy().to_string()
}

/// Run an external collaborator tool and capture its stdout.
///
/// When `tools_dir` is given the executable is resolved inside it; otherwise
/// the bare program name is handed to PATH lookup.
pub fn run_tool(program: &str, tools_dir: Option<&str>, args: &[String]) -> Result<String> {
  let exe: PathBuf = match tools_dir {
    Some(dir) => Path::new(dir).join(program),
    None => PathBuf::from(program),
  };
  let out = Command::new(&exe)
    .args(args)
    .output()
    .with_context(|| format!("spawning {} {:?}", exe.display(), args))?;

  if out.status.success() {
    Ok(String::from_utf8_lossy(&out.stdout).to_string())
  } else {
    let stderr = String::from_utf8_lossy(&out.stderr);
    anyhow::bail!("{} {:?} failed: {}", exe.display(), args, stderr)
  }
}

/// Returns the effective "now" given an optional override.
///
/// When `override_now` is `Some`, that instant is returned; otherwise
/// the current local time is used. Centralizes our handling of test
/// determinism without sprinkling `Local::now()` throughout the code.
pub fn effective_now(override_now: Option<DateTime<Local>>) -> DateTime<Local> {
  override_now.unwrap_or_else(Local::now)
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> anyhow::Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
