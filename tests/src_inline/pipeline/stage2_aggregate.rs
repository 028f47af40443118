use std::io::{Cursor, Read};

use super::*;
use crate::input::RowSource;
use crate::input::expression::ExpressionReader;
use crate::input::probes::ProbeReader;
use crate::input::reader::csv_from_reader;
use crate::model::probe::ProbeField;

const PROBE_HEADER: &str =
    "probe_id,probe_name,gene_id,gene_symbol,gene_name,entrez_id,chromosome\n";

fn paired(probes: &str, expression: &str) -> PairedRows {
    let p: Box<dyn Read> = Box::new(Cursor::new(format!("{PROBE_HEADER}{probes}").into_bytes()));
    let e: Box<dyn Read> = Box::new(Cursor::new(expression.as_bytes().to_vec()));
    PairedRows::new(
        ProbeReader::new(csv_from_reader(p, true)),
        ExpressionReader::new(csv_from_reader(e, false)),
    )
}

fn config(threshold: f64, policy: MismatchPolicy) -> AnalysisConfig {
    AnalysisConfig::new(
        vec!["CA1".to_string(), "CA3".to_string()],
        threshold,
        ProbeField::GeneSymbol,
        policy,
    )
    .unwrap()
}

/// CA1 at sample 0 and 1, CA3 at sample 2 and 3.
fn index() -> StructureIndex {
    let mut index = StructureIndex::with_structures(&["CA1".to_string(), "CA3".to_string()]);
    index.record("CA1", 0);
    index.record("CA1", 1);
    index.record("CA3", 2);
    index.record("CA3", 3);
    index
}

fn probe_line(probe_id: &str, gene_id: &str) -> String {
    format!("{probe_id},P{probe_id},{gene_id},SYM{gene_id},gene {gene_id},1{probe_id},1\n")
}

fn probe(probe_id: &str, gene_id: &str) -> Probe {
    Probe {
        probe_id: probe_id.to_string(),
        probe_name: format!("P{probe_id}"),
        gene_id: gene_id.to_string(),
        gene_symbol: format!("SYM{gene_id}"),
        gene_name: format!("gene {gene_id}"),
        entrez_id: format!("1{probe_id}"),
        chromosome: "1".to_string(),
    }
}

#[test]
fn test_best_average_wins_regardless_of_order() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    // averages 3.0 and 7.0
    let low = "1,6.0,2.0,2.0,2.0\n";
    let high = "2,7.0,7.0,7.0,7.0\n";

    let mut rows = paired(
        &[probe_line("1", "G1"), probe_line("2", "G1")].concat(),
        &format!("{low}{high}"),
    );
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    let rec = out.get("G1").unwrap();
    assert_eq!(rec.probe.probe_id, "2");
    assert_eq!(rec.average, 7.0);

    let mut rows = paired(
        &[probe_line("2", "G1"), probe_line("1", "G1")].concat(),
        &format!("{high}{low}"),
    );
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    let rec = out.get("G1").unwrap();
    assert_eq!(rec.probe.probe_id, "2");
    assert_eq!(rec.average, 7.0);
    assert_eq!(rec.structure_values, vec![vec![7.0, 7.0], vec![7.0, 7.0]]);
}

#[test]
fn test_gene_below_threshold_never_admitted() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    let mut rows = paired(&probe_line("1", "G1"), "1,1.0,2.0,3.0,4.9\n");
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    assert!(out.is_empty());
    assert!(out.get("G1").is_none());
    assert_eq!(out.stats.rows, 1);
    assert_eq!(out.stats.genes_admitted, 0);
}

#[test]
fn test_admission_only_looks_at_indexed_samples() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    // sample 4 belongs to no configured structure
    let mut rows = paired(&probe_line("1", "G1"), "1,1.0,1.0,1.0,1.0,50.0\n");
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    assert!(out.is_empty());
}

#[test]
fn test_replacement_ignores_threshold_once_admitted() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    // first probe: avg 1.5 but one CA1 value reaches 5.0
    // second probe: avg 4.0, no value reaches 5.0, still replaces
    let mut rows = paired(
        &[probe_line("1", "G1"), probe_line("2", "G1")].concat(),
        "1,5.0,0.5,0.25,0.25\n2,4.0,4.0,4.0,4.0\n",
    );
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    let rec = out.get("G1").unwrap();
    assert_eq!(rec.probe.probe_id, "2");
    assert_eq!(rec.structure_values, vec![vec![4.0, 4.0], vec![4.0, 4.0]]);
    assert_eq!(out.stats.replacements, 1);
}

#[test]
fn test_tie_keeps_earlier_probe() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    let mut rows = paired(
        &[probe_line("1", "G1"), probe_line("2", "G1")].concat(),
        "1,6.0,6.0,6.0,6.0\n2,6.0,6.0,6.0,6.0\n",
    );
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    assert_eq!(out.get("G1").unwrap().probe.probe_id, "1");
    assert_eq!(out.stats.replacements, 0);
}

#[test]
fn test_first_admission_order_is_kept() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    let mut rows = paired(
        &[
            probe_line("1", "G2"),
            probe_line("2", "G1"),
            probe_line("3", "G2"),
        ]
        .concat(),
        "1,6.0,6.0,6.0,6.0\n2,6.0,6.0,6.0,6.0\n3,9.0,9.0,9.0,9.0\n",
    );
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    let order: Vec<&str> = out.records().iter().map(|r| r.gene_id()).collect();
    assert_eq!(order, vec!["G2", "G1"]);
    assert_eq!(out.probe("G2").unwrap().probe_id, "3");
}

#[test]
fn test_mismatch_fails_by_default() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    let mut rows = paired(&probe_line("1", "G1"), "9,6.0,6.0,6.0,6.0\n");
    let err = run_stage2(&mut rows, &index(), &cfg).unwrap_err();
    match err {
        InputError::ProbeMismatch {
            row,
            probe_id,
            expression_id,
        } => {
            assert_eq!(row, 1);
            assert_eq!(probe_id, "1");
            assert_eq!(expression_id, "9");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_mismatch_warns_and_continues_when_allowed() {
    let cfg = config(5.0, MismatchPolicy::Warn);
    let mut rows = paired(&probe_line("1", "G1"), "9,6.0,6.0,6.0,6.0\n");
    let out = run_stage2(&mut rows, &index(), &cfg).unwrap();
    assert_eq!(out.stats.id_mismatches, 1);
    assert_eq!(out.probe("G1").unwrap().probe_id, "1");
}

#[test]
fn test_row_count_mismatch_policy() {
    let probes = [probe_line("1", "G1"), probe_line("2", "G2")].concat();
    let expression = "1,6.0,6.0,6.0,6.0\n";

    let mut rows = paired(&probes, expression);
    let err = run_stage2(&mut rows, &index(), &config(5.0, MismatchPolicy::Fail)).unwrap_err();
    assert!(matches!(
        err,
        InputError::RowCountMismatch {
            rows: 1,
            exhausted: RowSource::Expression
        }
    ));

    let mut rows = paired(&probes, expression);
    let out = run_stage2(&mut rows, &index(), &config(5.0, MismatchPolicy::Warn)).unwrap();
    assert!(out.stats.truncated);
    assert_eq!(out.len(), 1);
}

#[test]
fn test_indexed_sample_beyond_row_width() {
    let cfg = config(5.0, MismatchPolicy::Fail);
    let mut rows = paired(&probe_line("1", "G1"), "1,6.0,6.0\n");
    let err = run_stage2(&mut rows, &index(), &cfg).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_offer_outcomes() {
    let mut out = AggregateOutput::default();
    assert_eq!(
        out.offer(probe("1", "G1"), 1.0, vec![vec![1.0], vec![2.0]], 5.0),
        Offer::Rejected
    );
    assert_eq!(
        out.offer(probe("2", "G1"), 3.0, vec![vec![5.0], vec![1.0]], 5.0),
        Offer::Admitted
    );
    assert_eq!(
        out.offer(probe("3", "G1"), 2.0, vec![vec![9.0], vec![9.0]], 5.0),
        Offer::Kept
    );
    assert_eq!(
        out.offer(probe("4", "G1"), 3.5, vec![vec![0.0], vec![0.0]], 5.0),
        Offer::Replaced
    );
    let rec = out.get("G1").unwrap();
    assert_eq!(rec.probe.probe_id, "4");
    assert_eq!(rec.average, 3.5);
    assert_eq!(out.stats.genes_admitted, 1);
}
