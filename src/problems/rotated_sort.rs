use super::{int_arg, int_list_arg, ProblemAdapter};
use crate::engines::mutation::{fn_mutant, Mutant};
use crate::error::Result;
use crate::types::{ArgSpec, Genome, InputSpec, Outcome, Output, Value};
use rand::{Rng, RngCore};

/// Binary search in a rotated sorted array; index of `target` or -1
pub fn search_rotated(nums: &[i64], target: i64) -> i64 {
    if nums.is_empty() {
        return -1;
    }

    let (mut left, mut right) = (0i64, nums.len() as i64 - 1);
    while left <= right {
        let mid = (left + right) / 2;
        let at = |i: i64| nums[i as usize];
        if at(mid) == target {
            return mid;
        }

        if at(left) <= at(mid) {
            if at(left) <= target && target < at(mid) {
                right = mid - 1;
            } else {
                left = mid + 1;
            }
        } else if at(mid) < target && target <= at(right) {
            left = mid + 1;
        } else {
            right = mid - 1;
        }
    }
    -1
}

pub struct RotatedSortedSearch {
    spec: InputSpec,
}

impl RotatedSortedSearch {
    pub fn new() -> Self {
        Self {
            spec: InputSpec::new(vec![
                ArgSpec::int_list("nums", 1, 20, -100, 100),
                ArgSpec::int("target", -150, 150),
            ]),
        }
    }
}

impl Default for RotatedSortedSearch {
    fn default() -> Self {
        Self::new()
    }
}

fn case(nums: &[i64], target: i64) -> Genome {
    vec![Value::IntList(nums.to_vec()), Value::Int(target)]
}

impl ProblemAdapter for RotatedSortedSearch {
    fn id(&self) -> &str {
        "rotated_sorted_array_search"
    }

    fn input_spec(&self) -> &InputSpec {
        &self.spec
    }

    fn base_tests(&self) -> Vec<Genome> {
        vec![
            case(&[4, 5, 6, 7, 0, 1, 2], 0),
            case(&[4, 5, 6, 7, 0, 1, 2], 3),
            case(&[1], 0),
            case(&[1, 3], 3),
            case(&[6, 7, 1, 2, 3, 4, 5], 3),
            case(&[30, 40, 50, 10, 20], 10),
            case(&[2, 2, 2, 3, 4, 2], 3),
            case(&[0, 5, -20, -15, -10, -5], -15),
            case(&[10, 10, 10, 1, 10], 1),
            case(&[5, 1, 3], 2),
        ]
    }

    fn target_function(&self, args: &[Value]) -> Outcome {
        let nums = int_list_arg(args, 0)?;
        let target = int_arg(args, 1)?;
        Ok(Output::Int(search_rotated(nums, target)))
    }

    /// A sorted list rotated at a random pivot
    fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome> {
        let (len_lo, len_hi) = self.spec.args[0].length_bounds(1);
        let (lo, hi) = self.spec.args[0].value_bounds();
        let (lo_t, hi_t) = self.spec.args[1].value_bounds();

        let len = rng.gen_range(len_lo..=len_hi);
        let mut nums: Vec<i64> = (0..len).map(|_| rng.gen_range(lo..=hi)).collect();
        nums.sort_unstable();
        if len > 1 {
            let pivot = rng.gen_range(0..len);
            nums.rotate_left(pivot);
        }
        Ok(vec![Value::IntList(nums), Value::Int(rng.gen_range(lo_t..=hi_t))])
    }

    fn specific_mutants(&self) -> Vec<Box<dyn Mutant>> {
        vec![
            fn_mutant("always_not_found", |_| Ok(Output::Int(-1))),
            fn_mutant("linear_scan_last_index", |args| {
                let nums = int_list_arg(args, 0)?;
                let target = int_arg(args, 1)?;
                let idx = nums.iter().rposition(|&v| v == target);
                Ok(Output::Int(idx.map_or(-1, |i| i as i64)))
            }),
            fn_mutant("plain_binary_search", |args| {
                let nums = int_list_arg(args, 0)?;
                let target = int_arg(args, 1)?;
                let (mut left, mut right) = (0i64, nums.len() as i64 - 1);
                while left <= right {
                    let mid = (left + right) / 2;
                    let v = nums[mid as usize];
                    if v == target {
                        return Ok(Output::Int(mid));
                    } else if v < target {
                        left = mid + 1;
                    } else {
                        right = mid - 1;
                    }
                }
                Ok(Output::Int(-1))
            }),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_rotated_reference() {
        assert_eq!(search_rotated(&[4, 5, 6, 7, 0, 1, 2], 0), 4);
        assert_eq!(search_rotated(&[4, 5, 6, 7, 0, 1, 2], 3), -1);
        assert_eq!(search_rotated(&[1], 0), -1);
        assert_eq!(search_rotated(&[1, 3], 3), 1);
        assert_eq!(search_rotated(&[30, 40, 50, 10, 20], 10), 3);
        assert_eq!(search_rotated(&[], 5), -1);
    }
}
