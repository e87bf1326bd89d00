use crate::engines::mutation::{MutationOracle, PreparedSuite};
use crate::error::Result;
use crate::problems::ProblemAdapter;
use crate::types::Genome;
use rand::RngCore;
use rayon::prelude::*;
use std::sync::Arc;

/// Turns genomes into mutation-score fitness values
pub struct Evaluator {
    oracle: Arc<dyn MutationOracle>,
    suite_size: usize,
    include_base_tests: bool,
    parallel: bool,
}

impl Evaluator {
    pub fn new(oracle: Arc<dyn MutationOracle>, suite_size: usize, include_base_tests: bool) -> Self {
        Self {
            oracle,
            suite_size: suite_size.max(1),
            include_base_tests,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn oracle(&self) -> &Arc<dyn MutationOracle> {
        &self.oracle
    }

    /// Decoded input first, then either the problem's own expansion or
    /// random padding up to `suite_size`.
    fn build_suite(
        &self,
        genome: &Genome,
        problem: &dyn ProblemAdapter,
        rng: &mut dyn RngCore,
    ) -> Result<PreparedSuite> {
        let decoded = problem.decode_individual(genome)?;
        let inputs = match problem.suite_from_individual(&decoded) {
            Some(inputs) => inputs,
            None => {
                let mut inputs = Vec::with_capacity(self.suite_size);
                inputs.push(decoded);
                while inputs.len() < self.suite_size {
                    inputs.push(problem.random_input(rng)?);
                }
                inputs
            }
        };
        Ok(PreparedSuite::build(problem, &inputs, self.include_base_tests))
    }

    pub fn evaluate_individual(
        &self,
        genome: &Genome,
        problem: &dyn ProblemAdapter,
        rng: &mut dyn RngCore,
    ) -> Result<f64> {
        let suite = self.build_suite(genome, problem, rng)?;
        let result = self.oracle.score_suite(problem, &suite);
        if let Some(error) = &result.error {
            log::debug!("[{}] oracle note: {}", problem.id(), error);
        }
        Ok(result.score)
    }

    /// One fitness per genome, index-aligned with `population`. Suites are
    /// built in order from `rng` so a seeded run is reproducible either way.
    pub fn evaluate_population(
        &self,
        population: &[Genome],
        problem: &dyn ProblemAdapter,
        rng: &mut dyn RngCore,
    ) -> Result<Vec<f64>> {
        let suites = population
            .iter()
            .map(|genome| self.build_suite(genome, problem, rng))
            .collect::<Result<Vec<_>>>()?;

        let fitnesses = if self.parallel {
            suites
                .par_iter()
                .map(|suite| self.oracle.score_suite(problem, suite).score)
                .collect()
        } else {
            suites
                .iter()
                .map(|suite| self.oracle.score_suite(problem, suite).score)
                .collect()
        };
        Ok(fitnesses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::mutation::{FallbackOracle, MutationResult};
    use crate::problems::{ReverseString, TwoSum};
    use crate::types::{ArgSpec, InputSpec, Outcome, Output, Value};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::Mutex;

    /// Doubles its argument and expands each genome into its two successors
    struct Doubler {
        spec: InputSpec,
    }

    impl ProblemAdapter for Doubler {
        fn id(&self) -> &str {
            "doubler"
        }

        fn input_spec(&self) -> &InputSpec {
            &self.spec
        }

        fn base_tests(&self) -> Vec<Genome> {
            vec![vec![Value::Int(0)]]
        }

        fn target_function(&self, args: &[Value]) -> Outcome {
            Ok(Output::Int(args[0].as_int().unwrap_or_default() * 2))
        }

        fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome> {
            Ok(vec![Value::Int(rng.gen_range(0..=100))])
        }

        fn suite_from_individual(&self, decoded: &Genome) -> Option<Vec<Genome>> {
            let n = decoded[0].as_int()?;
            Some(vec![
                decoded.clone(),
                vec![Value::Int(n + 1)],
                vec![Value::Int(n + 2)],
            ])
        }
    }

    /// Records the inputs of every suite it is asked to score
    #[derive(Default)]
    struct RecordingOracle {
        seen: Mutex<Vec<Vec<Genome>>>,
    }

    impl MutationOracle for RecordingOracle {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn score_suite(&self, _problem: &dyn ProblemAdapter, suite: &PreparedSuite) -> MutationResult {
            let inputs = suite.cases().iter().map(|c| c.input.clone()).collect();
            self.seen.lock().unwrap().push(inputs);
            MutationResult::from_counts(1, 2, true)
        }
    }

    fn evaluator(suite_size: usize, include_base: bool) -> Evaluator {
        Evaluator::new(Arc::new(FallbackOracle::new()), suite_size, include_base)
    }

    #[test]
    fn test_fitness_is_a_ratio() {
        let problem = TwoSum::new();
        let mut rng = StdRng::seed_from_u64(9);
        let genome = vec![Value::IntList(vec![2, 7, 11, 15]), Value::Int(9)];
        let fitness = evaluator(1, false)
            .evaluate_individual(&genome, &problem, &mut rng)
            .unwrap();
        assert!(fitness > 0.0 && fitness <= 1.0);
    }

    #[test]
    fn test_custom_suite_replaces_random_padding() {
        let problem = Doubler {
            spec: InputSpec::new(vec![ArgSpec::int("n", 0, 100)]),
        };
        let oracle = Arc::new(RecordingOracle::default());
        let evaluator = Evaluator::new(oracle.clone(), 10, false);

        let mut rng = StdRng::seed_from_u64(21);
        let mut untouched = rng.clone();
        let fitness = evaluator
            .evaluate_individual(&vec![Value::Int(40)], &problem, &mut rng)
            .unwrap();

        assert_eq!(fitness, 0.5);
        let seen = oracle.seen.lock().unwrap();
        assert_eq!(
            seen.as_slice(),
            &[vec![
                vec![Value::Int(40)],
                vec![Value::Int(41)],
                vec![Value::Int(42)],
            ]]
        );
        // No random inputs were drawn for padding
        assert_eq!(rng.gen::<u64>(), untouched.gen::<u64>());
    }

    #[test]
    fn test_arity_mismatch_propagates() {
        let problem = ReverseString::new();
        let mut rng = StdRng::seed_from_u64(9);
        let genome = vec![Value::Str("a".into()), Value::Str("b".into())];
        assert!(evaluator(1, true)
            .evaluate_individual(&genome, &problem, &mut rng)
            .is_err());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let problem = TwoSum::new();
        let population: Vec<Genome> = (0..6)
            .map(|i| vec![Value::IntList(vec![i, 3, 5]), Value::Int(i + 3)])
            .collect();

        let sequential = evaluator(3, false)
            .evaluate_population(&population, &problem, &mut StdRng::seed_from_u64(1))
            .unwrap();
        let parallel = evaluator(3, false)
            .with_parallel(true)
            .evaluate_population(&population, &problem, &mut StdRng::seed_from_u64(1))
            .unwrap();
        assert_eq!(sequential.len(), population.len());
        assert_eq!(sequential, parallel);
    }
}
