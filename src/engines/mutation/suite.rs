use crate::problems::ProblemAdapter;
use crate::types::{Genome, Outcome};
use std::collections::HashSet;

/// One merged input with the reference behaviour captured for it
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteCase {
    pub input: Genome,
    pub expected: Outcome,
}

/// Deduplicated candidate and base inputs, with reference outcomes.
/// This is the ground truth every mutant is compared against.
#[derive(Debug, Clone, Default)]
pub struct PreparedSuite {
    cases: Vec<SuiteCase>,
}

impl PreparedSuite {
    pub fn build(problem: &dyn ProblemAdapter, candidates: &[Genome], include_base: bool) -> Self {
        let base = if include_base {
            problem.base_tests()
        } else {
            Vec::new()
        };
        let cases = merge_inputs(candidates, &base)
            .into_iter()
            .map(|input| {
                let expected = problem.target_function(&input);
                SuiteCase { input, expected }
            })
            .collect();
        Self { cases }
    }

    pub fn cases(&self) -> &[SuiteCase] {
        &self.cases
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Candidates then base inputs, keeping the first occurrence of each
pub fn merge_inputs(candidates: &[Genome], base: &[Genome]) -> Vec<Genome> {
    let mut seen: HashSet<&Genome> = HashSet::new();
    candidates
        .iter()
        .chain(base.iter())
        .filter(|input| seen.insert(*input))
        .cloned()
        .collect()
}
