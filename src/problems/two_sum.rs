use super::{int_arg, int_list_arg, ProblemAdapter};
use crate::engines::mutation::{fn_mutant, Mutant};
use crate::error::Result;
use crate::types::{ArgSpec, Genome, InputSpec, Outcome, Output, Value};
use rand::{Rng, RngCore};
use std::collections::HashMap;

/// Indices of the first pair summing to `target`, or an empty list
pub fn two_sum(nums: &[i64], target: i64) -> Vec<i64> {
    let mut lookup: HashMap<i64, usize> = HashMap::new();
    for (idx, &val) in nums.iter().enumerate() {
        if let Some(&j) = lookup.get(&(target - val)) {
            return vec![j as i64, idx as i64];
        }
        // Later duplicates overwrite earlier indices
        lookup.insert(val, idx);
    }
    Vec::new()
}

pub struct TwoSum {
    spec: InputSpec,
}

impl TwoSum {
    pub fn new() -> Self {
        Self {
            spec: InputSpec::new(vec![
                ArgSpec::int_list("nums", 2, 20, -100, 100),
                ArgSpec::int("target", -200, 200),
            ]),
        }
    }
}

impl Default for TwoSum {
    fn default() -> Self {
        Self::new()
    }
}

fn case(nums: &[i64], target: i64) -> Genome {
    vec![Value::IntList(nums.to_vec()), Value::Int(target)]
}

impl ProblemAdapter for TwoSum {
    fn id(&self) -> &str {
        "two_sum"
    }

    fn input_spec(&self) -> &InputSpec {
        &self.spec
    }

    fn base_tests(&self) -> Vec<Genome> {
        vec![
            case(&[2, 7, 11, 15], 9),
            case(&[3, 3], 6),
            case(&[3, 2, 4], 6),
            case(&[-1, -2, -3, -4, -5], -8),
            case(&[0, 4, 3, 0], 0),
            case(&[1, 2, 3, 4, 5], 10),
            case(&[5, 75, 25], 100),
            case(&[2, 5, 5, 11], 10),
            case(&[1, 3, 4, 2], 6),
            case(&[-3, 4, 3, 90], 0),
            case(&[1, 2, 3], 100),
            case(&[1, 2, 3, 4, 5], 6),
            case(&[0, -1, 2, -3, 4], 1),
            case(&[3, 3, 4, 2], 6),
            case(&[5, 6, 1, 0], 7),
            case(&[1, 1, 1, 1], 2),
        ]
    }

    fn target_function(&self, args: &[Value]) -> Outcome {
        let nums = int_list_arg(args, 0)?;
        let target = int_arg(args, 1)?;
        Ok(Output::IntList(two_sum(nums, target)))
    }

    fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome> {
        let (len_lo, len_hi) = self.spec.args[0].length_bounds(0);
        let (lo, hi) = self.spec.args[0].value_bounds();
        let (lo_t, hi_t) = self.spec.args[1].value_bounds();

        let len = rng.gen_range(len_lo..=len_hi);
        let nums = (0..len).map(|_| rng.gen_range(lo..=hi)).collect();
        Ok(vec![Value::IntList(nums), Value::Int(rng.gen_range(lo_t..=hi_t))])
    }

    fn specific_mutants(&self) -> Vec<Box<dyn Mutant>> {
        vec![
            fn_mutant("return_fixed_pair", |_| Ok(Output::IntList(vec![0, 1]))),
            fn_mutant("return_pair_unsorted", |args| {
                let mut pair = two_sum(int_list_arg(args, 0)?, int_arg(args, 1)?);
                pair.reverse();
                Ok(Output::IntList(pair))
            }),
            fn_mutant("off_by_one_second_index", |args| {
                let mut pair = two_sum(int_list_arg(args, 0)?, int_arg(args, 1)?);
                if let Some(last) = pair.last_mut() {
                    *last += 1;
                }
                Ok(Output::IntList(pair))
            }),
            fn_mutant("allow_same_index", |args| {
                let nums = int_list_arg(args, 0)?;
                let target = int_arg(args, 1)?;
                for (i, &a) in nums.iter().enumerate() {
                    if a + a == target {
                        return Ok(Output::IntList(vec![i as i64, i as i64]));
                    }
                }
                Ok(Output::IntList(two_sum(nums, target)))
            }),
            fn_mutant("keep_first_duplicate_index", |args| {
                let nums = int_list_arg(args, 0)?;
                let target = int_arg(args, 1)?;
                let mut lookup: HashMap<i64, usize> = HashMap::new();
                for (idx, &val) in nums.iter().enumerate() {
                    if let Some(&j) = lookup.get(&(target - val)) {
                        return Ok(Output::IntList(vec![j as i64, idx as i64]));
                    }
                    lookup.entry(val).or_insert(idx);
                }
                Ok(Output::IntList(Vec::new()))
            }),
        ]
    }
}
