use rstest::*;

use itertools::join;

use crate::alphabets::{dna_alphabet as dna, protein_alphabet as prot, ParsimonySet};

#[test]
fn dna_order_is_alphabetical() {
    let dna = dna();
    assert_eq!(dna.symbols(), b"ACGT");
    assert_eq!(dna.len(), 4);
    let mut sorted = dna.symbols().to_vec();
    sorted.sort();
    assert_eq!(sorted, dna.symbols());
    assert!(format!("{}", dna).contains("DNA"));
}

#[test]
fn protein_order_is_alphabetical() {
    let prot = prot();
    assert_eq!(prot.len(), 20);
    let mut sorted = prot.symbols().to_vec();
    sorted.sort();
    assert_eq!(sorted, prot.symbols());
    assert!(format!("{}", prot).contains("protein"));
}

#[rstest]
#[case(b'A', Some(0))]
#[case(b'c', Some(1))]
#[case(b'G', Some(2))]
#[case(b't', Some(3))]
#[case(b'N', None)]
#[case(b'-', None)]
#[case(b'U', None)]
fn dna_index(#[case] symbol: u8, #[case] expected: Option<usize>) {
    assert_eq!(dna().index_of(symbol), expected);
}

#[test]
fn dna_words() {
    let dna = dna();
    assert!(dna.is_word(b"CAAATCCC"));
    assert!(dna.is_word(b"acgt"));
    assert!(dna.is_word(b""));
    assert!(!dna.is_word(b"ACGN"));
    assert!(!dna.is_word(b"AC-T"));
    assert!(!prot().is_word(b"ABC"));
}

#[test]
fn first_in_set_follows_alphabet_order() {
    let dna = dna();
    let set = ParsimonySet::from_iter([b'T', b'G', b'C']);
    assert_eq!(dna.first_in(&set), Some(b'C'));
    let set = ParsimonySet::from_iter([b'T']);
    assert_eq!(dna.first_in(&set), Some(b'T'));
    assert_eq!(dna.first_in(&ParsimonySet::new()), None);
}

#[test]
fn parsimony_set_operations() {
    let dna = dna();
    let a = dna.parsimony_set(b'a');
    let c = dna.parsimony_set(b'C');
    assert_eq!(a, ParsimonySet::from_iter([b'A']));
    assert!((&a & &c).is_empty());
    let ac = &a | &c;
    assert_eq!(ac.len(), 2);
    assert_eq!(&ac & &a, a);
    assert_eq!(&ac | &a, ac);
    assert!(ac.contains(b'C'));
    assert!(!ac.contains(b'c'));
}

#[test]
fn fitch_join() {
    let dna = dna();
    let ac = ParsimonySet::from_iter([b'A', b'C']);
    let cg = ParsimonySet::from_iter([b'C', b'G']);
    assert_eq!(ac.fitch_join(&cg), (ParsimonySet::singleton(b'C'), false));
    let t = dna.parsimony_set(b't');
    let (joined, substitution) = ac.fitch_join(&t);
    assert!(substitution);
    assert_eq!(joined, ParsimonySet::from_iter([b'A', b'C', b'T']));
    assert_eq!(t.fitch_join(&t), (t.clone(), false));
}

#[rstest]
#[case(vec![b'A', b'C', b'G', b'T'], "ACGT")]
#[case(vec![b'T', b'G', b'A', b'C'], "ACGT")]
#[case(vec![b'G'], "G")]
fn parsimony_set_printing(#[case] input: Vec<u8>, #[case] output: &str) {
    let set = ParsimonySet::from_iter(input);
    assert_eq!(
        format!("{}", set),
        format!("[{}]", join(output.chars(), " "))
    );
}
