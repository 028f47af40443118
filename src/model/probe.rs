use clap::ValueEnum;
use serde::Serialize;

/// One row of the probe table. Row order matches the expression matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
    pub probe_id: String,
    pub probe_name: String,
    pub gene_id: String,
    pub gene_symbol: String,
    pub gene_name: String,
    pub entrez_id: String,
    pub chromosome: String,
}

/// Probe field used when rendering gene lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeField {
    ProbeId,
    ProbeName,
    GeneId,
    #[default]
    GeneSymbol,
    GeneName,
    EntrezId,
    Chromosome,
}

impl Probe {
    pub fn field(&self, field: ProbeField) -> &str {
        match field {
            ProbeField::ProbeId => &self.probe_id,
            ProbeField::ProbeName => &self.probe_name,
            ProbeField::GeneId => &self.gene_id,
            ProbeField::GeneSymbol => &self.gene_symbol,
            ProbeField::GeneName => &self.gene_name,
            ProbeField::EntrezId => &self.entrez_id,
            ProbeField::Chromosome => &self.chromosome,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/probe.rs"]
mod tests;
