use anyhow::bail;

use crate::errors::InputError;
use crate::parsimony::ParsimonyScoring;
use crate::Result;

/// Same cost for every mismatch, zero for a match.
#[derive(Clone, Debug, PartialEq)]
pub struct SimpleScoring {
    mismatch: f64,
}

impl Default for SimpleScoring {
    fn default() -> Self {
        SimpleScoring { mismatch: 1.0 }
    }
}

impl SimpleScoring {
    pub fn new(mismatch: f64) -> Result<SimpleScoring> {
        if !mismatch.is_finite() || mismatch <= 0.0 {
            bail!(InputError::new(format!(
                "Mismatch cost must be positive and finite, got {}",
                mismatch
            )));
        }
        Ok(SimpleScoring { mismatch })
    }
}

impl ParsimonyScoring for SimpleScoring {
    fn cost(&self, i: usize, j: usize) -> f64 {
        if i == j {
            0.0
        } else {
            self.mismatch
        }
    }

    fn uniform_cost(&self) -> Option<f64> {
        Some(self.mismatch)
    }

    fn size(&self) -> Option<usize> {
        None
    }
}
