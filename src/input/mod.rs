use std::path::{Path, PathBuf};

use thiserror::Error;

pub mod expression;
pub mod paired;
pub mod probes;
pub mod reader;
pub mod samples;

/// Which of the two lockstep streams a row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowSource {
    Probes,
    Expression,
}

impl std::fmt::Display for RowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowSource::Probes => write!(f, "probe table"),
            RowSource::Expression => write!(f, "expression matrix"),
        }
    }
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error(
        "probe id mismatch at row {row}: probe table has {probe_id}, expression matrix has {expression_id}"
    )]
    ProbeMismatch {
        row: usize,
        probe_id: String,
        expression_id: String,
    },
    #[error("row count mismatch: {exhausted} ended after {rows} rows but the other file continues")]
    RowCountMismatch { rows: usize, exhausted: RowSource },
}

impl InputError {
    /// Mismatches between the two streams, as opposed to unreadable data.
    pub fn is_integrity(&self) -> bool {
        matches!(
            self,
            InputError::ProbeMismatch { .. } | InputError::RowCountMismatch { .. }
        )
    }

    pub fn is_io(&self) -> bool {
        match self {
            InputError::Io(_) | InputError::Open { .. } | InputError::MissingInput(_) => true,
            InputError::Csv(e) => e.is_io_error(),
            _ => false,
        }
    }
}

/// The three dataset files of one donor.
#[derive(Debug, Clone)]
pub struct InputPaths {
    pub expression: PathBuf,
    pub probes: PathBuf,
    pub samples: PathBuf,
}

impl InputPaths {
    /// Fails before any processing if a file is absent.
    pub fn validate(&self) -> Result<(), InputError> {
        for (label, path) in [
            ("expression matrix", &self.expression),
            ("probe table", &self.probes),
            ("sample annotation", &self.samples),
        ] {
            ensure_file(label, path)?;
        }
        tracing::info!(
            expression = %self.expression.display(),
            probes = %self.probes.display(),
            samples = %self.samples.display(),
            "discovered input files"
        );
        Ok(())
    }
}

fn ensure_file(label: &str, path: &Path) -> Result<(), InputError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(InputError::MissingInput(format!(
            "{label} not found at {}",
            path.display()
        )))
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
