use std::fmt::Display;

use lazy_static::lazy_static;

mod parsimony_set;
pub use parsimony_set::*;

/// Nucleotides in tie-break order.
pub static NUCLEOTIDES: &[u8] = b"ACGT";
/// Amino acids in tie-break order.
pub static AMINOACIDS: &[u8] = b"ACDEFGHIKLMNPQRSTVWY";

type SymbolIndex = [Option<usize>; 256];

/// Ordered symbol set. The order of `symbols` is the fixed total order used to break
/// ties between equally parsimonious states, so the DNA alphabet resolves ties
/// alphabetically.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alphabet {
    name: &'static str,
    symbols: &'static [u8],
    index: &'static SymbolIndex,
}

impl Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} alphabet: {}", self.name, String::from_utf8_lossy(self.symbols))
    }
}

impl Alphabet {
    pub fn symbols(&self) -> &[u8] {
        self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbol(&self, idx: usize) -> u8 {
        self.symbols[idx]
    }

    /// Position of the symbol in the alphabet, case-insensitive.
    pub fn index_of(&self, symbol: u8) -> Option<usize> {
        self.index[symbol as usize]
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.index_of(symbol).is_some()
    }

    pub fn is_word(&self, word: &[u8]) -> bool {
        word.iter().all(|&c| self.contains(c))
    }

    /// Singleton parsimony set for an observed symbol.
    pub fn parsimony_set(&self, symbol: u8) -> ParsimonySet {
        ParsimonySet::singleton(symbol.to_ascii_uppercase())
    }

    /// First member of the set in alphabet order.
    pub fn first_in(&self, set: &ParsimonySet) -> Option<u8> {
        self.symbols.iter().copied().find(|&s| set.contains(s))
    }
}

pub fn dna_alphabet() -> Alphabet {
    Alphabet {
        name: "DNA",
        symbols: NUCLEOTIDES,
        index: &NUCLEOTIDE_INDEX,
    }
}

pub fn protein_alphabet() -> Alphabet {
    Alphabet {
        name: "protein",
        symbols: AMINOACIDS,
        index: &AMINOACID_INDEX,
    }
}

fn symbol_index(symbols: &[u8]) -> SymbolIndex {
    let mut index = [None; 256];
    for (i, &char) in symbols.iter().enumerate() {
        index[char as usize] = Some(i);
        index[char.to_ascii_lowercase() as usize] = Some(i);
    }
    index
}

lazy_static! {
    static ref NUCLEOTIDE_INDEX: SymbolIndex = symbol_index(NUCLEOTIDES);
    static ref AMINOACID_INDEX: SymbolIndex = symbol_index(AMINOACIDS);
}

#[cfg(test)]
#[cfg_attr(coverage, coverage(off))]
mod tests;
