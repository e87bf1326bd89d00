//! Built-in mutant catalogue, used when the external tool is unavailable,
//! failing or inconclusive.

use super::suite::PreparedSuite;
use super::{MutationOracle, MutationResult};
use crate::problems::ProblemAdapter;
use crate::types::{Fault, Outcome, Output, Value};

/// A behavioural variant of a problem's reference implementation
pub trait Mutant: Send + Sync {
    fn name(&self) -> &str;
    fn call(&self, problem: &dyn ProblemAdapter, args: &[Value]) -> Outcome;
}

/// Mutants that apply to any problem by rewriting the reference result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenericMutant {
    ReturnNone,
    RaiseError,
    TweakIntOutput,
    ReverseSequenceOutput,
    DropLastSequenceOutput,
    FlipBoolOutput,
}

impl GenericMutant {
    pub const ALL: [GenericMutant; 6] = [
        GenericMutant::ReturnNone,
        GenericMutant::RaiseError,
        GenericMutant::TweakIntOutput,
        GenericMutant::ReverseSequenceOutput,
        GenericMutant::DropLastSequenceOutput,
        GenericMutant::FlipBoolOutput,
    ];
}

impl Mutant for GenericMutant {
    fn name(&self) -> &str {
        match self {
            GenericMutant::ReturnNone => "return_none",
            GenericMutant::RaiseError => "raise_error",
            GenericMutant::TweakIntOutput => "tweak_int_output",
            GenericMutant::ReverseSequenceOutput => "reverse_sequence_output",
            GenericMutant::DropLastSequenceOutput => "drop_last_sequence_output",
            GenericMutant::FlipBoolOutput => "flip_bool_output",
        }
    }

    fn call(&self, problem: &dyn ProblemAdapter, args: &[Value]) -> Outcome {
        match self {
            GenericMutant::ReturnNone => return Ok(Output::None),
            GenericMutant::RaiseError => {
                return Err(Fault::new("ValueError", "mutant triggered error"))
            }
            _ => {}
        }

        let result = problem.target_function(args)?;
        Ok(match (self, result) {
            (GenericMutant::TweakIntOutput, Output::Int(v)) => Output::Int(v.wrapping_add(1)),
            (GenericMutant::ReverseSequenceOutput, Output::IntList(mut items)) => {
                items.reverse();
                Output::IntList(items)
            }
            (GenericMutant::DropLastSequenceOutput, Output::IntList(mut items)) => {
                items.pop();
                Output::IntList(items)
            }
            (GenericMutant::FlipBoolOutput, Output::Bool(b)) => Output::Bool(!b),
            (_, unchanged) => unchanged,
        })
    }
}

/// A hand-written mutant backed by a closure over the call arguments
pub struct FnMutant<F> {
    name: String,
    f: F,
}

impl<F> Mutant for FnMutant<F>
where
    F: Fn(&[Value]) -> Outcome + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn call(&self, _problem: &dyn ProblemAdapter, args: &[Value]) -> Outcome {
        (self.f)(args)
    }
}

pub fn fn_mutant<F>(name: &str, f: F) -> Box<dyn Mutant>
where
    F: Fn(&[Value]) -> Outcome + Send + Sync + 'static,
{
    Box::new(FnMutant {
        name: name.to_string(),
        f,
    })
}

/// Generic mutants followed by the problem's own
pub fn default_catalogue(problem: &dyn ProblemAdapter) -> Vec<Box<dyn Mutant>> {
    let mut catalogue: Vec<Box<dyn Mutant>> = GenericMutant::ALL
        .iter()
        .map(|m| Box::new(*m) as Box<dyn Mutant>)
        .collect();
    catalogue.extend(problem.specific_mutants());
    catalogue
}

/// Whether a mutant's observed behaviour differs from the reference
pub fn outcomes_disagree(expected: &Outcome, actual: &Outcome) -> bool {
    match (expected, actual) {
        (Err(expected), Err(actual)) => expected.kind != actual.kind,
        (Ok(expected), Ok(actual)) => expected != actual,
        _ => true,
    }
}

/// A mutant is killed by the first case it disagrees on
pub fn is_killed(mutant: &dyn Mutant, problem: &dyn ProblemAdapter, suite: &PreparedSuite) -> bool {
    suite
        .cases()
        .iter()
        .any(|case| outcomes_disagree(&case.expected, &mutant.call(problem, &case.input)))
}

pub struct FallbackOracle {
    catalogue: Option<Vec<Box<dyn Mutant>>>,
}

impl FallbackOracle {
    /// Score with the default catalogue of each problem
    pub fn new() -> Self {
        Self { catalogue: None }
    }

    /// Score every problem against a fixed catalogue, which may be empty
    pub fn with_catalogue(catalogue: Vec<Box<dyn Mutant>>) -> Self {
        Self {
            catalogue: Some(catalogue),
        }
    }

    fn count_kills(
        &self,
        catalogue: &[Box<dyn Mutant>],
        problem: &dyn ProblemAdapter,
        suite: &PreparedSuite,
    ) -> usize {
        catalogue
            .iter()
            .filter(|mutant| {
                let killed = is_killed(mutant.as_ref(), problem, suite);
                log::trace!("{}: mutant {} killed={}", problem.id(), mutant.name(), killed);
                killed
            })
            .count()
    }
}

impl Default for FallbackOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl MutationOracle for FallbackOracle {
    fn name(&self) -> &'static str {
        "fallback"
    }

    fn score_suite(&self, problem: &dyn ProblemAdapter, suite: &PreparedSuite) -> MutationResult {
        let (killed, total) = match &self.catalogue {
            Some(catalogue) => (self.count_kills(catalogue, problem, suite), catalogue.len()),
            None => {
                let catalogue = default_catalogue(problem);
                (self.count_kills(&catalogue, problem, suite), catalogue.len())
            }
        };
        log::debug!(
            "{}: fallback scored {}/{} over {} inputs",
            problem.id(),
            killed,
            total,
            suite.len()
        );
        MutationResult::from_counts(killed, total, true)
    }
}
