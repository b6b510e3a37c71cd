use std::fmt::Display;
use std::ops::{BitAnd, BitOr};

use hashbrown::{hash_set::Iter, HashSet};
use itertools::join;

/// Symbols with minimal subtree cost at one node and site under uniform costs.
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ParsimonySet {
    symbols: HashSet<u8>,
}

impl ParsimonySet {
    pub fn new() -> Self {
        Self {
            symbols: HashSet::new(),
        }
    }

    pub fn singleton(symbol: u8) -> Self {
        ParsimonySet::from_iter([symbol])
    }

    pub fn contains(&self, symbol: u8) -> bool {
        self.symbols.contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, u8> {
        self.symbols.iter()
    }

    /// Fitch step for a parent of `self` and `other`: the intersection if it is non-empty,
    /// otherwise the union. The flag is set when the union was taken, i.e. one substitution
    /// is needed below the parent.
    pub fn fitch_join(&self, other: &ParsimonySet) -> (ParsimonySet, bool) {
        let common = self & other;
        if common.is_empty() {
            (self | other, true)
        } else {
            (common, false)
        }
    }
}

impl FromIterator<u8> for ParsimonySet {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        ParsimonySet {
            symbols: HashSet::from_iter(iter),
        }
    }
}

impl Display for ParsimonySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut chars: Vec<char> = self.symbols.iter().map(|&a| a as char).collect();
        chars.sort();
        write!(f, "[{}]", join(chars.iter(), " "))
    }
}

impl<'a> IntoIterator for &'a ParsimonySet {
    type Item = &'a u8;
    type IntoIter = Iter<'a, u8>;

    fn into_iter(self) -> Self::IntoIter {
        self.symbols.iter()
    }
}

impl BitAnd for &ParsimonySet {
    type Output = ParsimonySet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.symbols.intersection(&rhs.symbols).copied().collect()
    }
}

impl BitOr for &ParsimonySet {
    type Output = ParsimonySet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.symbols.union(&rhs.symbols).copied().collect()
    }
}
