use serde::Serialize;
use tracing::warn;

use crate::model::config::AnalysisConfig;
use crate::pipeline::stage2_aggregate::AggregateOutput;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StructureGenes {
    pub structure: String,
    pub genes: Vec<String>,
}

/// Gene ids partitioned by where they are expressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub unique: Vec<StructureGenes>,
    pub shared: Vec<String>,
    /// Admitted genes that pass in no group. Empty unless admission and
    /// classification disagree on the threshold.
    pub unclassified: Vec<String>,
}

impl Classification {
    #[cfg(test)]
    pub fn unique_for(&self, structure: &str) -> Option<&[String]> {
        self.unique
            .iter()
            .find(|s| s.structure == structure)
            .map(|s| s.genes.as_slice())
    }
}

/// Shared when every group has a value at or above `threshold`, otherwise
/// unique to the first group that does.
pub fn classify<'a, I>(genes: I, structures: &[String], threshold: f64) -> Classification
where
    I: IntoIterator<Item = (&'a str, &'a [Vec<f64>])>,
{
    let mut out = Classification {
        unique: structures
            .iter()
            .map(|s| StructureGenes {
                structure: s.clone(),
                genes: Vec::new(),
            })
            .collect(),
        ..Default::default()
    };

    for (gene_id, groups) in genes {
        let hits: Vec<bool> = groups
            .iter()
            .map(|group| group.iter().any(|&v| v >= threshold))
            .collect();
        if hits.iter().all(|&hit| hit) {
            out.shared.push(gene_id.to_string());
            continue;
        }
        match hits.iter().position(|&hit| hit).and_then(|i| out.unique.get_mut(i)) {
            Some(bucket) => bucket.genes.push(gene_id.to_string()),
            None => out.unclassified.push(gene_id.to_string()),
        }
    }

    if !out.unclassified.is_empty() {
        warn!(
            genes = out.unclassified.len(),
            "admitted genes pass the threshold in no structure"
        );
    }
    out
}

pub fn run_stage3(aggregate: &AggregateOutput, config: &AnalysisConfig) -> Classification {
    classify(
        aggregate
            .records()
            .iter()
            .map(|r| (r.gene_id(), r.structure_values.as_slice())),
        &config.structures,
        config.threshold,
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage3_classify.rs"]
mod tests;
