use super::{int_arg, ProblemAdapter};
use crate::engines::mutation::{fn_mutant, Mutant};
use crate::error::Result;
use crate::types::{ArgSpec, Fault, Genome, InputSpec, Outcome, Output, Value};
use rand::{Rng, RngCore};

fn has_repeated(n: i64) -> bool {
    let digits = n.to_string();
    let mut seen = [false; 10];
    for d in digits.bytes().filter(u8::is_ascii_digit) {
        let idx = (d - b'0') as usize;
        if seen[idx] {
            return true;
        }
        seen[idx] = true;
    }
    false
}

fn permutation(n: i64, k: i64) -> i64 {
    (0..k).map(|i| n - i).product()
}

fn n_digit_no_repeat(n: i64) -> i64 {
    if n == 1 {
        9
    } else {
        9 * permutation(9, n - 1)
    }
}

/// Count of integers in `[1, n]` with at least one repeated digit
pub fn count_duplicate_digits(n: i64) -> std::result::Result<i64, Fault> {
    if n < 1 {
        return Err(Fault::new("ValueError", format!("N must be positive, got {}", n)));
    }
    let digits: Vec<i64> = n.to_string().bytes().map(|b| (b - b'0') as i64).collect();
    let n_digit = digits.len() as i64;

    let mut result = n - 1;
    for i in 1..n_digit {
        result -= n_digit_no_repeat(i);
    }

    let mut prefix = 0;
    for (i, &digit) in digits.iter().enumerate() {
        let i = i as i64;
        let start = if i > 0 { 0 } else { 1 };
        for j in start..digit {
            if has_repeated(prefix * 10 + j) {
                continue;
            }
            result -= permutation(9 - i, n_digit - 1 - i);
        }
        prefix = prefix * 10 + digit;
    }
    Ok(result + has_repeated(n) as i64)
}

fn brute_force(n: i64, inclusive: bool) -> i64 {
    let upper = if inclusive { n } else { n - 1 };
    (1..=upper).filter(|&k| has_repeated(k)).count() as i64
}

pub struct DuplicateDigits {
    spec: InputSpec,
}

impl DuplicateDigits {
    pub fn new() -> Self {
        Self {
            spec: InputSpec::new(vec![ArgSpec::int("N", 1, 50000)]),
        }
    }
}

impl Default for DuplicateDigits {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemAdapter for DuplicateDigits {
    fn id(&self) -> &str {
        "duplicate_digits"
    }

    fn input_spec(&self) -> &InputSpec {
        &self.spec
    }

    fn base_tests(&self) -> Vec<Genome> {
        [1, 10, 20, 99, 100, 321, 9876, 9999, 54321, 50000]
            .iter()
            .map(|&n| vec![Value::Int(n)])
            .collect()
    }

    fn target_function(&self, args: &[Value]) -> Outcome {
        Ok(Output::Int(count_duplicate_digits(int_arg(args, 0)?)?))
    }

    fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome> {
        let (lo, hi) = self.spec.args[0].value_bounds();
        Ok(vec![Value::Int(rng.gen_range(lo..=hi))])
    }

    fn specific_mutants(&self) -> Vec<Box<dyn Mutant>> {
        vec![
            fn_mutant("exclude_upper_bound", |args| {
                let n = int_arg(args, 0)?;
                Ok(Output::Int(brute_force(n, false)))
            }),
            fn_mutant("count_unique_instead", |args| {
                let n = int_arg(args, 0)?;
                Ok(Output::Int(n - count_duplicate_digits(n)?))
            }),
            fn_mutant("ignore_shorter_lengths", |args| {
                let n = int_arg(args, 0)?;
                let shorter = (1..n.to_string().len() as i64)
                    .map(n_digit_no_repeat)
                    .sum::<i64>();
                Ok(Output::Int(count_duplicate_digits(n)? - shorter))
            }),
        ]
    }
}
