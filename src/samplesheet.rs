use csv::{ReaderBuilder, StringRecord};
use std::path::Path;

use crate::error::ExtractError;

pub const SAMPLE_SHEET_FILE: &str = "SampleSheet.csv";

// The sheet's Description sub-field packs key=value pairs separated by ';'.
// Pipeline assignments look like "pipelineName=SomePipeline". The prefix check
// and value offset are fixed by the sample-sheet convention: first 12
// characters are the key, the value starts at character 13.
const PIPELINE_KEY: &str = "pipelineName";
const VALUE_OFFSET: usize = 13;

const DATA_MARKER: &str = "[Data]";
const DESCRIPTION_COLUMN: &str = "Description";

/// Extract the pipeline display string for one run folder's sample sheet.
///
/// Zero discovered names collapse to `"No data"`; several names are joined
/// with `" & "` so the result always occupies exactly one report cell.
pub fn pipeline_names(run_folder: &str) -> Result<String, ExtractError> {
  let path = Path::new(run_folder).join(SAMPLE_SHEET_FILE);
  if !path.exists() {
    return Err(ExtractError::SampleSheetMissing { path });
  }

  let mut reader = ReaderBuilder::new()
    .has_headers(false)
    .flexible(true)
    .from_path(&path)
    .map_err(|e| ExtractError::SampleSheetInvalid { reason: e.to_string() })?;

  let records: Vec<StringRecord> = reader
    .records()
    .collect::<Result<_, _>>()
    .map_err(|e| ExtractError::SampleSheetInvalid { reason: e.to_string() })?;

  extract_pipelines(&records)
}

fn extract_pipelines(records: &[StringRecord]) -> Result<String, ExtractError> {
  // Row after the [Data] marker is the sub-table header.
  let marker_row = records
    .iter()
    .position(|r| r.get(0) == Some(DATA_MARKER))
    .ok_or(ExtractError::DataSectionNotFound)?;
  let header_row = marker_row + 1;

  // Missing Description column is not an error: it just yields no candidates.
  let description_col = records
    .get(header_row)
    .and_then(|header| header.iter().position(|c| c == DESCRIPTION_COLUMN));

  let mut names: Vec<String> = Vec::new();
  if let Some(col) = description_col {
    for record in records.iter().skip(header_row + 1) {
      let Some(description) = record.get(col) else { continue };
      for piece in description.split(';') {
        if piece.get(..PIPELINE_KEY.len()) == Some(PIPELINE_KEY) {
          let name = piece.get(VALUE_OFFSET..).unwrap_or("").to_string();
          if !names.contains(&name) {
            names.push(name);
          }
        }
      }
    }
  }

  Ok(join_names(names))
}

fn join_names(names: Vec<String>) -> String {
  if names.is_empty() {
    "No data".to_string()
  } else {
    names.join(" & ")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn records(rows: &[&[&str]]) -> Vec<StringRecord> {
    rows.iter().map(|r| StringRecord::from(r.to_vec())).collect()
  }

  fn sheet_with_descriptions(descriptions: &[&str]) -> Vec<StringRecord> {
    let mut rows: Vec<Vec<&str>> = vec![
      vec!["[Header]", ""],
      vec!["IEMFileVersion", "5"],
      vec!["[Data]", ""],
      vec!["Sample_ID", "Sample_Name", "Description"],
    ];
    for d in descriptions {
      rows.push(vec!["S1", "sample", *d]);
    }
    rows.iter().map(|r| StringRecord::from(r.clone())).collect()
  }

  #[test]
  fn single_pipeline_is_returned_verbatim() {
    let recs = sheet_with_descriptions(&["lib=x;pipelineName=GermlineWGS"]);
    assert_eq!(extract_pipelines(&recs).unwrap(), "GermlineWGS");
  }

  #[test]
  fn multiple_pipelines_dedup_and_join_in_first_seen_order() {
    let recs = sheet_with_descriptions(&["foo;pipelineName=A", "pipelineName=B;bar", "pipelineName=A"]);
    assert_eq!(extract_pipelines(&recs).unwrap(), "A & B");
  }

  #[test]
  fn no_pipeline_key_means_no_data() {
    let recs = sheet_with_descriptions(&["just a comment", "lib=x"]);
    assert_eq!(extract_pipelines(&recs).unwrap(), "No data");
  }

  #[test]
  fn missing_description_column_means_no_data() {
    let recs = records(&[
      &["[Header]", ""],
      &["[Data]", ""],
      &["Sample_ID", "Sample_Name"],
      &["S1", "sample"],
    ]);
    assert_eq!(extract_pipelines(&recs).unwrap(), "No data");
  }

  #[test]
  fn prefix_match_is_exact_and_case_sensitive() {
    let recs = sheet_with_descriptions(&["pipelinename=A", "PipelineName=B;pipelineName=C"]);
    assert_eq!(extract_pipelines(&recs).unwrap(), "C");
  }

  #[test]
  fn value_starts_at_character_thirteen() {
    // "pipelineName" + separator; character 12 (the '=') is skipped.
    let recs = sheet_with_descriptions(&["pipelineName=TruSight"]);
    assert_eq!(extract_pipelines(&recs).unwrap(), "TruSight");
  }

  #[test]
  fn missing_marker_is_data_section_error() {
    let recs = records(&[&["[Header]", ""], &["Sample_ID", "Description"]]);
    let err = extract_pipelines(&recs).unwrap_err();
    assert!(matches!(err, ExtractError::DataSectionNotFound));
  }

  #[test]
  fn marker_must_be_in_first_column() {
    let recs = records(&[&["x", "[Data]"], &["Sample_ID", "Description"]]);
    assert!(extract_pipelines(&recs).is_err());
  }

  #[test]
  fn missing_file_is_sheet_missing() {
    let err = pipeline_names("/nonexistent/run/folder").unwrap_err();
    assert!(matches!(err, ExtractError::SampleSheetMissing { .. }));
  }

  #[test]
  fn reads_a_sheet_from_disk() {
    let td = tempfile::TempDir::new().unwrap();
    let sheet = "\
[Header],,
IEMFileVersion,5,
[Data],,
Sample_ID,Sample_Name,Description
S1,alpha,ref=x;pipelineName=SomaticPanel
S2,beta,pipelineName=SomaticPanel
";
    std::fs::write(td.path().join(SAMPLE_SHEET_FILE), sheet).unwrap();
    let out = pipeline_names(&td.path().to_string_lossy()).unwrap();
    assert_eq!(out, "SomaticPanel");
  }
}
