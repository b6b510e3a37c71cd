use approx::assert_relative_eq;
use assert_matches::assert_matches;
use rstest::*;

use crate::errors::InputError;
use crate::parsimony::{MatrixScoring, SimpleScoring, TreeLabeller};
use crate::report::{adjacency_records, hamming_distance, AdjacencyRecord, ParsimonyReport};
use crate::tree;
use crate::tree::Tree;

const ROSALIND: &str = "4\n4->CAAATCCC\n4->ATTGCGAC\n5->CTGCGCTG\n5->ATGGACGA\n6->4\n6->5\n";

fn labelled(input: &str) -> (f64, Tree) {
    let mut tree = tree!(input);
    let result = TreeLabeller::new(Box::new(SimpleScoring::default()))
        .label(&mut tree)
        .unwrap();
    (result.score, tree)
}

#[rstest]
#[case::equal(b"ACGT", b"ACGT", 0)]
#[case::one(b"ACGT", b"ACGA", 1)]
#[case::all(b"AAAA", b"CCCC", 4)]
fn hamming(#[case] a: &[u8], #[case] b: &[u8], #[case] expected: u64) {
    assert_eq!(hamming_distance(a, b).unwrap(), expected);
}

#[test]
fn hamming_unequal_lengths() {
    let res = hamming_distance(b"ACGT", b"ACG");
    assert_matches!(res.unwrap_err().downcast_ref::<InputError>(), Some(_));
}

#[test]
fn record_display() {
    let record = AdjacencyRecord::new(b"AAAAACCA", b"CAAATCCC").unwrap();
    assert_eq!(record.mismatches, 3);
    assert_eq!(record.to_string(), "AAAAACCA->CAAATCCC:3");
    assert_eq!(record.reversed().to_string(), "CAAATCCC->AAAAACCA:3");
}

#[test]
fn report_for_two_leaves() {
    let (score, tree) = labelled("2\n6->4\n6->5\n4->CAAATCCC\n5->ATGGACGA\n");
    let report = ParsimonyReport::from_tree(score, &tree).unwrap();
    assert_eq!(
        report.to_string(),
        "7\nAAAAACCA->CAAATCCC:3\nAAAAACCA->ATGGACGA:4"
    );
    assert_eq!(report.total_mismatches(), 7);
    assert_eq!(report.records().len(), 2);
}

#[test]
fn one_record_per_edge() {
    let (score, tree) = labelled(ROSALIND);
    let report = ParsimonyReport::from_tree(score, &tree).unwrap();
    assert_eq!(report.score(), 16.0);
    assert_eq!(report.records().len(), tree.edges().len());
    assert_eq!(report.total_mismatches(), 16);
    let lines: Vec<String> = report.to_string().lines().map(String::from).collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "16");
    for (line, record) in lines[1..].iter().zip(report.records()) {
        assert_eq!(line, &record.to_string());
    }
}

#[test]
fn records_match_tree_edges() {
    let (_, tree) = labelled(ROSALIND);
    let records = adjacency_records(&tree).unwrap();
    for ((parent, child), record) in tree.edges().iter().zip(&records) {
        assert_eq!(record.parent, tree.sequence(parent).unwrap());
        assert_eq!(record.child, tree.sequence(child).unwrap());
        assert_eq!(
            record.mismatches,
            hamming_distance(&record.parent, &record.child).unwrap()
        );
    }
}

#[test]
fn both_directions() {
    let (score, tree) = labelled(ROSALIND);
    let report = ParsimonyReport::from_tree(score, &tree)
        .unwrap()
        .both_directions(true);
    let lines = report.lines();
    assert_eq!(lines.len(), 2 * tree.edges().len());
    for pair in lines.chunks(2) {
        assert_eq!(pair[1], pair[0].reversed());
    }
    assert_eq!(report.total_mismatches(), 16);
    assert_eq!(report.to_string().lines().count(), 13);
}

#[test]
fn sorted_records() {
    let (score, tree) = labelled(ROSALIND);
    let report = ParsimonyReport::from_tree(score, &tree).unwrap();
    let sorted = report.sorted();
    assert_eq!(sorted.len(), report.records().len());
    assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    let (_, relabelled) = labelled(ROSALIND);
    let again = ParsimonyReport::from_tree(score, &relabelled).unwrap();
    assert_eq!(again.sorted(), sorted);
}

#[test]
fn weighted_cost_of_unit_labelling() {
    let (score, tree) = labelled(ROSALIND);
    let report = ParsimonyReport::from_tree(score, &tree).unwrap();
    assert_relative_eq!(
        report.weighted_cost(&SimpleScoring::default()).unwrap(),
        score
    );
    assert_relative_eq!(
        report
            .weighted_cost(&SimpleScoring::new(3.0).unwrap())
            .unwrap(),
        3.0 * score
    );
}

#[test]
fn weighted_cost_matches_weighted_score() {
    let mut tree = tree!(ROSALIND);
    let scoring = MatrixScoring::transition_transversion(1.0, 2.0).unwrap();
    let result = TreeLabeller::new(Box::new(scoring.clone()))
        .label(&mut tree)
        .unwrap();
    let report = ParsimonyReport::from_tree(result.score, &tree).unwrap();
    assert_relative_eq!(report.weighted_cost(&scoring).unwrap(), result.score);
}

#[test]
fn report_requires_labels() {
    let tree = tree!(ROSALIND);
    assert!(ParsimonyReport::from_tree(0.0, &tree).is_err());
}
