use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tracing::info;

use crate::model::config::AnalysisConfig;
use crate::pipeline::stage2_aggregate::AggregateOutput;
use crate::pipeline::stage3_classify::Classification;
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{GeneSummary, ReportContext, StructureSection, SummaryData, UniqueSummary};

#[derive(Debug, Clone)]
pub struct Stage4Input<'a> {
    pub config: &'a AnalysisConfig,
    pub aggregate: &'a AggregateOutput,
    pub classification: &'a Classification,
}

/// Writes the JSON summary to `json_path` if asked, then the text report to
/// `out`. A failed summary leaves `out` untouched.
pub fn write_reports<W: Write>(
    input: &Stage4Input<'_>,
    out: &mut W,
    json_path: Option<&Path>,
) -> io::Result<()> {
    if let Some(path) = json_path {
        let summary = build_summary(input);
        let json = render_summary_json(&summary).map_err(io::Error::other)?;
        write_text(path, &json)?;
        info!(path = %path.display(), "wrote JSON summary");
    }

    let ctx = build_report_context(input);
    out.write_all(render_report_text(&ctx).as_bytes())?;
    out.write_all(b"\n")?;
    out.flush()
}

pub fn build_report_context(input: &Stage4Input<'_>) -> ReportContext {
    let structures = input
        .classification
        .unique
        .iter()
        .map(|bucket| StructureSection {
            structure: bucket.structure.clone(),
            genes: display_values(input, &bucket.genes),
        })
        .collect();
    ReportContext {
        structures,
        shared: display_values(input, &input.classification.shared),
    }
}

pub fn build_summary(input: &Stage4Input<'_>) -> SummaryData {
    SummaryData {
        tool: "kira-regionexpr".to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        structures: input.config.structures.clone(),
        threshold: input.config.threshold,
        display_field: input.config.display_field,
        mismatch_policy: input.config.mismatch_policy,
        stats: input.aggregate.stats.clone(),
        unique: input
            .classification
            .unique
            .iter()
            .map(|bucket| UniqueSummary {
                structure: bucket.structure.clone(),
                count: bucket.genes.len(),
                genes: gene_summaries(input, &bucket.genes),
            })
            .collect(),
        shared: gene_summaries(input, &input.classification.shared),
        unclassified: input.classification.unclassified.clone(),
    }
}

fn display_values(input: &Stage4Input<'_>, gene_ids: &[String]) -> Vec<String> {
    gene_ids
        .iter()
        .map(|gene_id| label_for(input, gene_id))
        .collect()
}

fn label_for(input: &Stage4Input<'_>, gene_id: &str) -> String {
    input
        .aggregate
        .probe(gene_id)
        .map(|probe| probe.field(input.config.display_field).to_string())
        .unwrap_or_else(|| gene_id.to_string())
}

fn gene_summaries(input: &Stage4Input<'_>, gene_ids: &[String]) -> Vec<GeneSummary> {
    gene_ids
        .iter()
        .filter_map(|gene_id| {
            let record = input.aggregate.get(gene_id)?;
            Some(GeneSummary {
                gene_id: gene_id.clone(),
                label: record.probe.field(input.config.display_field).to_string(),
                probe_id: record.probe.probe_id.clone(),
                average: record.average,
            })
        })
        .collect()
}

fn write_text(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_report.rs"]
mod tests;
