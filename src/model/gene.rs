use crate::model::probe::Probe;

/// Current winning probe for a gene together with its structure snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneRecord {
    pub probe: Probe,
    pub average: f64,
    pub structure_values: Vec<Vec<f64>>,
}

impl GeneRecord {
    pub fn gene_id(&self) -> &str {
        &self.probe.gene_id
    }
}
