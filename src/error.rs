use std::fmt::{self, Display};
use std::io;

/// Provides `VecdynError` and maps other errors to
/// convert to a `VecdynError`
#[derive(Debug)]
pub enum VecdynError {
    IoError(io::Error),
    JsonError(serde_json::Error),
    CsvError(csv::Error),
    /// A parameter violated a positivity or range invariant. The message
    /// names the offending parameter and its value.
    InvalidParameter(String),
    /// A spray day fell outside the season, or the schedule was not
    /// strictly increasing.
    EventOutOfRange(String),
    /// The integrator exhausted its step budget or produced a non-finite
    /// state. `time` is how far the run got before failing.
    SolverDivergence { time: f64, detail: String },
    ReportError(String),
}

impl VecdynError {
    pub(crate) fn nonpositive_parameter(name: &str, value: f64) -> VecdynError {
        VecdynError::InvalidParameter(format!(
            "{name} must be positive and finite, got {value}"
        ))
    }

    pub(crate) fn divergence(time: f64, detail: &str) -> VecdynError {
        VecdynError::SolverDivergence {
            time,
            detail: detail.to_string(),
        }
    }
}

impl From<io::Error> for VecdynError {
    fn from(error: io::Error) -> Self {
        VecdynError::IoError(error)
    }
}

impl From<serde_json::Error> for VecdynError {
    fn from(error: serde_json::Error) -> Self {
        VecdynError::JsonError(error)
    }
}

impl From<csv::Error> for VecdynError {
    fn from(error: csv::Error) -> Self {
        VecdynError::CsvError(error)
    }
}

impl std::error::Error for VecdynError {}

impl Display for VecdynError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            VecdynError::IoError(error) => write!(f, "IO error: {error}"),
            VecdynError::JsonError(error) => write!(f, "JSON error: {error}"),
            VecdynError::CsvError(error) => write!(f, "CSV error: {error}"),
            VecdynError::InvalidParameter(message)
            | VecdynError::EventOutOfRange(message)
            | VecdynError::ReportError(message) => write!(f, "{message}"),
            VecdynError::SolverDivergence { time, detail } => {
                write!(f, "solver diverged at t = {time}: {detail}")
            }
        }
    }
}
