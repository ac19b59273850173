use std::os::unix::fs::PermissionsExt;
use std::path::Path;

/// Create one run folder with its parameters file and sample sheet.
#[allow(dead_code)]
pub fn write_run_folder(archive: &Path, name: &str, experiment: &str, descriptions: &[&str]) {
  let run = archive.join(name);
  std::fs::create_dir_all(&run).unwrap();

  let params = format!(
    "<?xml version=\"1.0\"?>\n<RunParameters>\n  <Side>A</Side>\n  <ExperimentName>{}</ExperimentName>\n  <RfidsInfo>\n    <FlowCellMode>S4</FlowCellMode>\n  </RfidsInfo>\n</RunParameters>\n",
    experiment
  );
  std::fs::write(run.join("RunParameters.xml"), params).unwrap();

  let mut sheet = String::from("[Header],,\nIEMFileVersion,5,\n[Data],,\nSample_ID,Sample_Name,Description\n");
  for (i, d) in descriptions.iter().enumerate() {
    sheet.push_str(&format!("S{},sample{},{}\n", i + 1, i + 1, d));
  }
  std::fs::write(run.join("SampleSheet.csv"), sheet).unwrap();
}

/// Install executable stand-ins for the InterOp tools that print canned
/// tables, so end-to-end runs need no instrument binaries.
#[allow(dead_code)]
pub fn write_stub_tools(dir: &Path) {
  let summary = "#!/bin/sh\ncat <<'EOF'\n# Summary\nLevel,Yield G,Projected Yield G,% Aligned,% >= Q30\nRead 1,412.50,412.50,0.52,92.50\nTotal,825.00,825.00,0.52,91.80\nEOF\n";
  let imaging = "#!/bin/sh\ncat <<'EOF'\n# Imaging Table\nLane,Tile,Cycle,Read,% Pass Filter,Density\n1,1101,1,1,85.0,3100\n1,1102,1,1,95.0,3050\nEOF\n";

  write_executable(&dir.join("interop_summary"), summary);
  write_executable(&dir.join("interop_imaging_table"), imaging);
}

#[allow(dead_code)]
fn write_executable(path: &Path, content: &str) {
  std::fs::write(path, content).unwrap();
  std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o755)).unwrap();
}
