pub mod stage1_index;
pub mod stage2_aggregate;
pub mod stage3_classify;
pub mod stage4_report;

use tracing::warn;

use crate::input::expression::ExpressionReader;
use crate::input::paired::PairedRows;
use crate::input::probes::ProbeReader;
use crate::input::samples::SampleReader;
use crate::input::{InputError, InputPaths};
use crate::model::config::AnalysisConfig;
use stage1_index::run_stage1;
use stage2_aggregate::{AggregateOutput, run_stage2};
use stage3_classify::{Classification, run_stage3};

#[derive(Debug, Clone)]
pub struct AnalysisOutput {
    pub aggregate: AggregateOutput,
    pub classification: Classification,
}

/// Index samples, aggregate probes, classify genes. Every reader is dropped
/// before this returns, on success or error.
pub fn run_analysis(
    paths: &InputPaths,
    config: &AnalysisConfig,
) -> Result<AnalysisOutput, InputError> {
    let index = {
        let mut samples = SampleReader::open(&paths.samples)?;
        run_stage1(&mut samples, &config.structures)?
    };

    let aggregate = {
        let probes = ProbeReader::open(&paths.probes)?;
        let expression = ExpressionReader::open(&paths.expression)?;
        let mut rows = PairedRows::new(probes, expression);
        run_stage2(&mut rows, &index, config)?
    };

    if aggregate.is_empty() {
        warn!(
            threshold = config.threshold,
            "no gene reaches the threshold in any requested structure"
        );
    }
    let classification = run_stage3(&aggregate, config);

    Ok(AnalysisOutput {
        aggregate,
        classification,
    })
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
