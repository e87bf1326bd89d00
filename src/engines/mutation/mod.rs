//! Mutation scoring: turns a candidate suite into a kill ratio.

pub mod external;
pub mod fallback;
pub mod report;
pub mod suite;

pub use external::ExternalOracle;
pub use fallback::{default_catalogue, fn_mutant, FallbackOracle, GenericMutant, Mutant};
pub use report::{parse_report, ReportCounts};
pub use suite::{merge_inputs, PreparedSuite, SuiteCase};

use crate::config::MutationConfig;
use crate::problems::ProblemAdapter;
use crate::types::Genome;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationResult {
    pub score: f64,
    pub killed: usize,
    pub total: usize,
    pub used_fallback: bool,
    /// The external tool ran but was inconclusive, so the fallback produced the numbers
    pub augmented: bool,
    pub error: Option<String>,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

impl MutationResult {
    pub fn from_counts(killed: usize, total: usize, used_fallback: bool) -> Self {
        let score = if total > 0 {
            killed as f64 / total as f64
        } else {
            0.0
        };
        Self {
            score,
            killed,
            total,
            used_fallback,
            augmented: false,
            error: None,
            stdout: None,
            stderr: None,
        }
    }

    /// The zero result reported when the external tool exceeds its time limit
    pub fn timeout() -> Self {
        Self {
            error: Some("timeout".to_string()),
            ..Self::from_counts(0, 0, false)
        }
    }

    pub fn is_timeout(&self) -> bool {
        self.error.as_deref() == Some("timeout")
    }
}

pub trait MutationOracle: Send + Sync {
    fn name(&self) -> &'static str;

    /// Score an already merged suite with captured reference outcomes
    fn score_suite(&self, problem: &dyn ProblemAdapter, suite: &PreparedSuite) -> MutationResult;

    /// Merge `candidates` with the problem's base tests and score them
    fn score(&self, problem: &dyn ProblemAdapter, candidates: &[Genome]) -> MutationResult {
        let suite = PreparedSuite::build(problem, candidates, true);
        self.score_suite(problem, &suite)
    }
}

/// The oracle a configuration asks for
pub fn oracle_from_config(config: &MutationConfig) -> Arc<dyn MutationOracle> {
    if config.force_fallback {
        log::info!("Mutation scoring forced to the fallback catalogue");
        Arc::new(FallbackOracle::new())
    } else {
        Arc::new(ExternalOracle::from_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_invariant() {
        let result = MutationResult::from_counts(3, 4, true);
        assert_eq!(result.score, 0.75);

        let empty = MutationResult::from_counts(0, 0, true);
        assert_eq!(empty.score, 0.0);
    }

    #[test]
    fn test_timeout_result_is_zero() {
        let result = MutationResult::timeout();
        assert!(result.is_timeout());
        assert_eq!((result.killed, result.total, result.score), (0, 0, 0.0));
        assert!(!result.used_fallback);
    }

    #[test]
    fn test_forced_fallback_oracle() {
        let config = MutationConfig {
            force_fallback: true,
            ..Default::default()
        };
        assert_eq!(oracle_from_config(&config).name(), "fallback");
        assert_eq!(oracle_from_config(&MutationConfig::default()).name(), "external");
    }
}
