//! Problem adapters: the functions under test, with their input
//! specifications, random generators and base regression inputs.

pub mod dup_digits;
pub mod reverse_string;
pub mod roman_to_int;
pub mod rotated_sort;
pub mod supersequence;
pub mod two_sum;

use crate::engines::mutation::Mutant;
use crate::error::{EvobugError, Result};
use crate::types::{Fault, Genome, InputSpec, Outcome, Value};
use rand::RngCore;
use std::collections::HashMap;
use std::sync::Arc;

pub use dup_digits::DuplicateDigits;
pub use reverse_string::ReverseString;
pub use roman_to_int::RomanToInt;
pub use rotated_sort::RotatedSortedSearch;
pub use supersequence::ShortestCommonSupersequence;
pub use two_sum::TwoSum;

/// Everything the search needs to know about one function under test.
pub trait ProblemAdapter: Send + Sync {
    /// Stable identifier used for registry lookup and by the external tool
    fn id(&self) -> &str;

    fn input_spec(&self) -> &InputSpec;

    /// Known-interesting inputs folded into every scored suite
    fn base_tests(&self) -> Vec<Genome>;

    /// The reference implementation. Failures are returned, not raised.
    fn target_function(&self, args: &[Value]) -> Outcome;

    fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome>;

    /// Map a genome to call arguments. Identity for every built-in problem.
    fn decode_individual(&self, genome: &Genome) -> Result<Genome> {
        if genome.len() != self.input_spec().arity() {
            return Err(EvobugError::Adapter(format!(
                "{}: genome has {} values, spec declares {}",
                self.id(),
                genome.len(),
                self.input_spec().arity()
            )));
        }
        Ok(genome.clone())
    }

    /// Custom suite expansion for one decoded input. `None` keeps the
    /// default policy of padding with random inputs.
    fn suite_from_individual(&self, _decoded: &Genome) -> Option<Vec<Genome>> {
        None
    }

    /// Mutants tuned to known failure modes of this problem family
    fn specific_mutants(&self) -> Vec<Box<dyn Mutant>> {
        Vec::new()
    }
}

/// Adapters addressable by identifier
pub struct ProblemRegistry {
    problems: HashMap<String, Arc<dyn ProblemAdapter>>,
}

impl ProblemRegistry {
    /// An empty registry
    pub fn empty() -> Self {
        Self {
            problems: HashMap::new(),
        }
    }

    /// A registry holding every built-in problem
    pub fn new() -> Self {
        let mut registry = Self::empty();
        let builtins: Vec<Arc<dyn ProblemAdapter>> = vec![
            Arc::new(TwoSum::new()),
            Arc::new(ReverseString::new()),
            Arc::new(RotatedSortedSearch::new()),
            Arc::new(RomanToInt::new()),
            Arc::new(ShortestCommonSupersequence::new()),
            Arc::new(DuplicateDigits::new()),
        ];
        for problem in builtins {
            // Built-in specs are static and valid.
            let id = problem.id().to_string();
            registry.problems.insert(id, problem);
        }
        registry
    }

    pub fn register(&mut self, problem: Arc<dyn ProblemAdapter>) -> Result<()> {
        problem.input_spec().validate()?;
        self.problems.insert(problem.id().to_string(), problem);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<Arc<dyn ProblemAdapter>> {
        self.problems
            .get(id)
            .cloned()
            .ok_or_else(|| EvobugError::UnknownProblem(id.to_string()))
    }

    pub fn ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.problems.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl Default for ProblemRegistry {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn int_arg(args: &[Value], idx: usize) -> std::result::Result<i64, Fault> {
    match args.get(idx) {
        Some(Value::Int(v)) => Ok(*v),
        Some(other) => Err(Fault::new(
            "TypeError",
            format!("argument {} expected int, got {}", idx, other),
        )),
        None => Err(Fault::new("TypeError", format!("missing argument {}", idx))),
    }
}

pub(crate) fn str_arg(args: &[Value], idx: usize) -> std::result::Result<&str, Fault> {
    match args.get(idx) {
        Some(Value::Str(s)) => Ok(s),
        Some(other) => Err(Fault::new(
            "TypeError",
            format!("argument {} expected str, got {}", idx, other),
        )),
        None => Err(Fault::new("TypeError", format!("missing argument {}", idx))),
    }
}

pub(crate) fn int_list_arg(args: &[Value], idx: usize) -> std::result::Result<&[i64], Fault> {
    match args.get(idx) {
        Some(Value::IntList(items)) => Ok(items),
        Some(other) => Err(Fault::new(
            "TypeError",
            format!("argument {} expected list of int, got {}", idx, other),
        )),
        None => Err(Fault::new("TypeError", format!("missing argument {}", idx))),
    }
}
