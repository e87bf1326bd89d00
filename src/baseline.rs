//! Uniform-random baseline: one suite of random inputs, scored once.

use crate::engines::mutation::{MutationOracle, MutationResult, PreparedSuite};
use crate::error::Result;
use crate::problems::ProblemAdapter;
use rand::RngCore;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct BaselineResult {
    pub result: MutationResult,
    pub num_tests: usize,
}

pub fn run_random_baseline(
    problem: &dyn ProblemAdapter,
    oracle: &dyn MutationOracle,
    num_tests: usize,
    include_base: bool,
    rng: &mut dyn RngCore,
) -> Result<BaselineResult> {
    let inputs = (0..num_tests)
        .map(|_| problem.random_input(rng))
        .collect::<Result<Vec<_>>>()?;

    let suite = PreparedSuite::build(problem, &inputs, include_base);
    log::info!(
        "[{}] random baseline: {} inputs, {} after merge",
        problem.id(),
        num_tests,
        suite.len()
    );

    let result = oracle.score_suite(problem, &suite);
    if result.is_timeout() {
        log::warn!("[{}] random baseline timed out", problem.id());
    }
    Ok(BaselineResult { result, num_tests })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engines::mutation::FallbackOracle;
    use crate::problems::RomanToInt;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_baseline_scores_random_suite() {
        let problem = RomanToInt::new();
        let mut rng = StdRng::seed_from_u64(42);
        let baseline =
            run_random_baseline(&problem, &FallbackOracle::new(), 50, false, &mut rng).unwrap();
        assert_eq!(baseline.num_tests, 50);
        assert!(baseline.result.used_fallback);
        assert!(baseline.result.killed > 0);
        assert!(baseline.result.killed <= baseline.result.total);
    }

    struct TimingOut;

    impl MutationOracle for TimingOut {
        fn name(&self) -> &'static str {
            "timing-out"
        }

        fn score_suite(&self, _problem: &dyn ProblemAdapter, _suite: &PreparedSuite) -> MutationResult {
            MutationResult {
                stderr: Some("still running".to_string()),
                ..MutationResult::timeout()
            }
        }
    }

    #[test]
    fn test_baseline_passes_timeout_through() {
        let problem = RomanToInt::new();
        let mut rng = StdRng::seed_from_u64(42);
        let baseline = run_random_baseline(&problem, &TimingOut, 5, true, &mut rng).unwrap();
        assert!(baseline.result.is_timeout());
        assert_eq!(baseline.result.score, 0.0);
        assert!(!baseline.result.used_fallback);
        assert_eq!(baseline.result.stderr.as_deref(), Some("still running"));
    }
}
