use std::path::PathBuf;
use thiserror::Error;

/// Per-run extraction failures. The report assembler decides skip-vs-abort on
/// these; date-window problems are handled before any per-run work and never
/// appear here.
#[derive(Debug, Error)]
pub enum ExtractError {
  #[error("interop metrics unavailable: {reason}")]
  MetricsUnavailable { reason: String },

  #[error("run parameters file missing: {}", path.display())]
  ParametersFileMissing { path: PathBuf },

  #[error("malformed RunParameters XML: {reason}")]
  MalformedXml { reason: String },

  #[error("run parameters field missing: {field}")]
  ParametersFieldMissing { field: &'static str },

  #[error("sample sheet missing: {}", path.display())]
  SampleSheetMissing { path: PathBuf },

  #[error("sample sheet unreadable: {reason}")]
  SampleSheetInvalid { reason: String },

  #[error("no [Data] section marker in sample sheet")]
  DataSectionNotFound,
}
