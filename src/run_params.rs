use serde::Deserialize;
use std::path::Path;

use crate::error::ExtractError;

pub const RUN_PARAMETERS_FILE: &str = "RunParameters.xml";

/// Run metadata pulled from `RunParameters.xml`. One value per field; the
/// instrument writes each element exactly once.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct RunParameters {
  pub experiment_name: String,
  pub side: String,
  pub flowcell_type: String,
}

#[derive(Debug, Deserialize)]
struct RunParametersXml {
  #[serde(rename = "ExperimentName")]
  experiment_name: Option<String>,
  #[serde(rename = "Side")]
  side: Option<String>,
  #[serde(rename = "RfidsInfo")]
  rfids_info: Option<RfidsInfoXml>,
}

#[derive(Debug, Deserialize)]
struct RfidsInfoXml {
  #[serde(rename = "FlowCellMode")]
  flow_cell_mode: Option<String>,
}

/// Extract experiment name, sequencer side and flow-cell type for one run folder.
pub fn run_parameters(run_folder: &str) -> Result<RunParameters, ExtractError> {
  let path = Path::new(run_folder).join(RUN_PARAMETERS_FILE);
  let text = std::fs::read_to_string(&path).map_err(|_| ExtractError::ParametersFileMissing { path: path.clone() })?;
  parse_run_parameters(&text)
}

pub fn parse_run_parameters(xml: &str) -> Result<RunParameters, ExtractError> {
  let parsed: RunParametersXml = quick_xml::de::from_str(xml).map_err(|e| ExtractError::MalformedXml {
    reason: e.to_string(),
  })?;

  let experiment_name = parsed
    .experiment_name
    .ok_or(ExtractError::ParametersFieldMissing { field: "ExperimentName" })?;
  let side = parsed.side.ok_or(ExtractError::ParametersFieldMissing { field: "Side" })?;
  let flowcell_type = parsed
    .rfids_info
    .and_then(|r| r.flow_cell_mode)
    .ok_or(ExtractError::ParametersFieldMissing {
      field: "RfidsInfo/FlowCellMode",
    })?;

  Ok(RunParameters {
    experiment_name,
    side,
    flowcell_type,
  })
}
