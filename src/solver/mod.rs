pub mod optimal_tour;
pub mod permutations;

pub use optimal_tour::solve;
pub use permutations::{permutations, Permutations};
