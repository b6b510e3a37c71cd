use std::fmt::Debug;

use dyn_clone::DynClone;

pub mod matrix_scoring;
pub use matrix_scoring::*;
pub mod simple_scoring;
pub use simple_scoring::*;

/// Substitution cost between alphabet symbols, addressed by their alphabet indices.
/// Costs are symmetric, zero on the diagonal and strictly positive otherwise.
pub trait ParsimonyScoring: Debug + DynClone + Send + Sync {
    fn cost(&self, i: usize, j: usize) -> f64;

    /// Cost of every substitution if they are all equal, `None` otherwise.
    fn uniform_cost(&self) -> Option<f64>;

    /// Number of symbols the scoring is defined for, `None` if it fits any alphabet.
    fn size(&self) -> Option<usize>;

    fn is_uniform(&self) -> bool {
        self.uniform_cost().is_some()
    }
}

dyn_clone::clone_trait_object!(ParsimonyScoring);
