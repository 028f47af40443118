use serde::Serialize;

use crate::model::config::MismatchPolicy;
use crate::model::probe::ProbeField;
use crate::pipeline::stage2_aggregate::AggregateStats;

pub mod json;
pub mod text;

/// Unique genes of one structure, already mapped to display values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructureSection {
    pub structure: String,
    pub genes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    pub structures: Vec<StructureSection>,
    pub shared: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneSummary {
    pub gene_id: String,
    pub label: String,
    pub probe_id: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UniqueSummary {
    pub structure: String,
    pub count: usize,
    pub genes: Vec<GeneSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub tool_version: String,
    pub structures: Vec<String>,
    pub threshold: f64,
    pub display_field: ProbeField,
    pub mismatch_policy: MismatchPolicy,
    pub stats: AggregateStats,
    pub unique: Vec<UniqueSummary>,
    pub shared: Vec<GeneSummary>,
    pub unclassified: Vec<String>,
}

pub fn format_list(values: &[String]) -> String {
    format!("[{}]", values.join(", "))
}
