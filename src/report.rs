//! Trajectory reports: CSV output for downstream plotting and the
//! economic layer.

use std::ffi::OsStr;
use std::fs::{create_dir_all, File};
use std::path::Path;

use csv::Writer;

use crate::error::VecdynError;
use crate::scenario::ScenarioOutcome;
use crate::simulator::Trajectory;

// Checks that the path is valid. Creates the file and all parent
// directories if they do not exist. Returns the file if successful.
fn create_report_file(path: &Path) -> Result<File, VecdynError> {
    match path.extension().and_then(OsStr::to_str) {
        Some("csv") => {
            if let Some(parent) = path.parent() {
                create_dir_all(parent)?;
            }
            let file = File::create(path)?;
            Ok(file)
        }
        _ => Err(VecdynError::ReportError(format!(
            "report output files must be CSVs, got {}",
            path.display()
        ))),
    }
}

/// Writes one trajectory as a CSV file, one row per sample.
pub fn write_trajectory(trajectory: &Trajectory, path: &Path) -> Result<(), VecdynError> {
    let file = create_report_file(path)?;
    let mut writer = Writer::from_writer(file);
    for sample in trajectory.samples() {
        writer.serialize(sample)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the treated and untreated trajectories of a scenario as
/// `treated.csv` and `untreated.csv` under `directory`.
pub fn write_scenario(outcome: &ScenarioOutcome, directory: &Path) -> Result<(), VecdynError> {
    write_trajectory(&outcome.treated, &directory.join("treated.csv"))?;
    write_trajectory(&outcome.untreated, &directory.join("untreated.csv"))?;
    Ok(())
}
