use serde::Serialize;
use thiserror::Error;

use crate::model::probe::ProbeField;

/// What to do when the probe table and expression matrix disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchPolicy {
    /// Abort on the first id mismatch or row-count difference.
    Fail,
    /// Log and keep going; stop at the shorter stream.
    Warn,
}

#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub structures: Vec<String>,
    pub threshold: f64,
    pub display_field: ProbeField,
    pub mismatch_policy: MismatchPolicy,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("threshold must be a finite number")]
    NonFiniteThreshold,
    #[error("structure names must not be empty")]
    EmptyStructureName,
    #[error("structure {0} was given more than once")]
    DuplicateStructure(String),
}

impl AnalysisConfig {
    pub fn new(
        structures: Vec<String>,
        threshold: f64,
        display_field: ProbeField,
        mismatch_policy: MismatchPolicy,
    ) -> Result<Self, ConfigError> {
        if !threshold.is_finite() {
            return Err(ConfigError::NonFiniteThreshold);
        }
        for (i, name) in structures.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyStructureName);
            }
            if structures[..i].contains(name) {
                return Err(ConfigError::DuplicateStructure(name.clone()));
            }
        }
        Ok(Self {
            structures,
            threshold,
            display_field,
            mismatch_policy,
        })
    }
}
