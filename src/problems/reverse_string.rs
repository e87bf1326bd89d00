use super::{str_arg, ProblemAdapter};
use crate::engines::generation::operators::STRING_ALPHABET;
use crate::engines::mutation::{fn_mutant, Mutant};
use crate::error::Result;
use crate::types::{ArgSpec, Genome, InputSpec, Outcome, Output, Value};
use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

pub struct ReverseString {
    spec: InputSpec,
}

impl ReverseString {
    pub fn new() -> Self {
        Self {
            spec: InputSpec::new(vec![ArgSpec::string("s", 1, 30)]),
        }
    }
}

impl Default for ReverseString {
    fn default() -> Self {
        Self::new()
    }
}

fn reversed(s: &str) -> String {
    s.chars().rev().collect()
}

impl ProblemAdapter for ReverseString {
    fn id(&self) -> &str {
        "reverse_string"
    }

    fn input_spec(&self) -> &InputSpec {
        &self.spec
    }

    fn base_tests(&self) -> Vec<Genome> {
        [
            "hello",
            "racecar",
            "a",
            "",
            "AbC123!@",
            "longerstringforreverse",
            "  spaced",
            "mixOfCASEand123",
            "   ",
            "abc def",
            "palindromeemordnilap",
        ]
        .iter()
        .map(|s| vec![Value::Str(s.to_string())])
        .collect()
    }

    fn target_function(&self, args: &[Value]) -> Outcome {
        Ok(Output::Str(reversed(str_arg(args, 0)?)))
    }

    fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome> {
        let (lo, hi) = self.spec.args[0].length_bounds(1);
        let len = rng.gen_range(lo..=hi);
        let alphabet: Vec<char> = STRING_ALPHABET.chars().collect();
        let s: String = (0..len)
            .filter_map(|_| alphabet.choose(&mut *rng).copied())
            .collect();
        Ok(vec![Value::Str(s)])
    }

    fn specific_mutants(&self) -> Vec<Box<dyn Mutant>> {
        vec![
            fn_mutant("identity", |args| Ok(Output::Str(str_arg(args, 0)?.to_string()))),
            fn_mutant("drop_first_char", |args| {
                Ok(Output::Str(reversed(str_arg(args, 0)?).chars().skip(1).collect()))
            }),
            fn_mutant("lowercase_result", |args| {
                Ok(Output::Str(reversed(str_arg(args, 0)?).to_lowercase()))
            }),
            fn_mutant("strip_whitespace", |args| {
                Ok(Output::Str(reversed(str_arg(args, 0)?.trim())))
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_reference() {
        let problem = ReverseString::new();
        assert_eq!(
            problem.target_function(&[Value::Str("abc def".to_string())]),
            Ok(Output::Str("fed cba".to_string()))
        );
        assert_eq!(
            problem.target_function(&[Value::Str(String::new())]),
            Ok(Output::Str(String::new()))
        );
    }
}
