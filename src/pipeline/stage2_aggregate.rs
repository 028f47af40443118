use std::collections::HashMap;

use serde::Serialize;
use tracing::{info, warn};

use crate::input::InputError;
use crate::input::paired::{PairStep, PairedRows};
use crate::model::config::{AnalysisConfig, MismatchPolicy};
use crate::model::gene::GeneRecord;
use crate::model::probe::Probe;
use crate::model::structures::StructureIndex;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    pub rows: usize,
    pub id_mismatches: usize,
    pub genes_admitted: usize,
    pub replacements: usize,
    pub truncated: bool,
}

/// Outcome of offering one probe row to the per-gene table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Offer {
    Admitted,
    Rejected,
    Replaced,
    Kept,
}

/// Best probe per gene, in first-admission order.
#[derive(Debug, Clone, Default)]
pub struct AggregateOutput {
    records: Vec<GeneRecord>,
    by_gene: HashMap<String, usize>,
    pub stats: AggregateStats,
}

impl AggregateOutput {
    pub fn get(&self, gene_id: &str) -> Option<&GeneRecord> {
        self.by_gene.get(gene_id).map(|&idx| &self.records[idx])
    }

    pub fn probe(&self, gene_id: &str) -> Option<&Probe> {
        self.get(gene_id).map(|r| &r.probe)
    }

    pub fn records(&self) -> &[GeneRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// A new gene enters only if some structure value reaches the threshold.
    /// A known gene is displaced only by a strictly higher average, whatever
    /// its structure values.
    pub fn offer(
        &mut self,
        probe: Probe,
        average: f64,
        structure_values: Vec<Vec<f64>>,
        threshold: f64,
    ) -> Offer {
        if let Some(&idx) = self.by_gene.get(&probe.gene_id) {
            let current = &mut self.records[idx];
            let best = current.average.max(average);
            if current.average < best {
                current.probe = probe;
                current.average = best;
                current.structure_values = structure_values;
                self.stats.replacements += 1;
                return Offer::Replaced;
            }
            return Offer::Kept;
        }

        if !structure_values.iter().flatten().any(|&v| v >= threshold) {
            return Offer::Rejected;
        }
        self.by_gene.insert(probe.gene_id.clone(), self.records.len());
        self.records.push(GeneRecord {
            probe,
            average,
            structure_values,
        });
        self.stats.genes_admitted += 1;
        Offer::Admitted
    }
}

pub fn run_stage2(
    rows: &mut PairedRows,
    index: &StructureIndex,
    config: &AnalysisConfig,
) -> Result<AggregateOutput, InputError> {
    let mut out = AggregateOutput::default();

    loop {
        match rows.next_step()? {
            PairStep::Pair(pair) => {
                if !pair.is_aligned() {
                    if config.mismatch_policy == MismatchPolicy::Fail {
                        return Err(InputError::ProbeMismatch {
                            row: pair.row,
                            probe_id: pair.probe.probe_id,
                            expression_id: pair.expression.probe_id,
                        });
                    }
                    warn!(
                        row = pair.row,
                        probe_id = %pair.probe.probe_id,
                        expression_id = %pair.expression.probe_id,
                        "files are not ordered; probe ids do not match"
                    );
                    out.stats.id_mismatches += 1;
                }
                out.stats.rows += 1;

                let groups = index.gather(&pair.expression.values).map_err(|pos| {
                    InputError::InvalidInput(format!(
                        "expression row {} has {} samples but sample position {} was indexed",
                        pair.row,
                        pair.expression.values.len(),
                        pos
                    ))
                })?;
                let average = pair.expression.average();
                out.offer(pair.probe, average, groups, config.threshold);
            }
            PairStep::End => break,
            PairStep::Truncated { rows, exhausted } => {
                if config.mismatch_policy == MismatchPolicy::Fail {
                    return Err(InputError::RowCountMismatch { rows, exhausted });
                }
                warn!(rows, %exhausted, "input files differ in length; ignoring trailing rows");
                out.stats.truncated = true;
                break;
            }
        }
    }

    info!(
        rows = out.stats.rows,
        genes = out.len(),
        replacements = out.stats.replacements,
        mismatches = out.stats.id_mismatches,
        "aggregated expression rows"
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_aggregate.rs"]
mod tests;
