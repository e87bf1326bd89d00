use crate::error::Result;
use crate::problems::ProblemAdapter;
use crate::types::Genome;
use rand::RngCore;

/// A genome is the problem's argument tuple, one `Value` per declared argument.
/// Crossover and mutation read the problem's `InputSpec` to stay in bounds.
pub fn create_random_individual(
    problem: &dyn ProblemAdapter,
    rng: &mut dyn RngCore,
) -> Result<Genome> {
    problem.random_input(rng)
}

/// `size` draws from the problem's generator. Duplicates are allowed.
pub fn initialize_population(
    problem: &dyn ProblemAdapter,
    size: usize,
    rng: &mut dyn RngCore,
) -> Result<Vec<Genome>> {
    (0..size)
        .map(|_| create_random_individual(problem, rng))
        .collect()
}
