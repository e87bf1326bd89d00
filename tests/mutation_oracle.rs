use evobug::engines::mutation::{
    default_catalogue, fn_mutant, merge_inputs, FallbackOracle, MutationOracle, PreparedSuite,
};
use evobug::problems::{ProblemAdapter, ReverseString, RomanToInt, TwoSum};
use evobug::types::{Genome, Output, Value};

fn two_sum_case(nums: &[i64], target: i64) -> Genome {
    vec![Value::IntList(nums.to_vec()), Value::Int(target)]
}

#[test]
fn test_two_sum_single_input_kills_mutants() {
    let _ = env_logger::builder().is_test(true).try_init();
    let problem = TwoSum::new();
    let oracle = FallbackOracle::new();

    let result = oracle.score(&problem, &[two_sum_case(&[2, 7, 11, 15], 9)]);

    assert!(result.used_fallback);
    assert!(result.killed >= 1);
    assert_eq!(result.total, default_catalogue(&problem).len());
    assert!((0.0..=1.0).contains(&result.score));
    assert_eq!(result.score, result.killed as f64 / result.total as f64);
}

#[test]
fn test_empty_catalogue_scores_zero() {
    let problem = TwoSum::new();
    let oracle = FallbackOracle::with_catalogue(Vec::new());

    let result = oracle.score(&problem, &[two_sum_case(&[1, 2], 3)]);

    assert_eq!((result.score, result.killed, result.total), (0.0, 0, 0));
    assert!(result.used_fallback);
}

#[test]
fn test_oracle_ignores_duplicate_candidates() {
    let problem = RomanToInt::new();
    let oracle = FallbackOracle::new();
    let once = vec![vec![Value::Str("XIV".into())]];
    let twice = vec![once[0].clone(), once[0].clone()];

    assert_eq!(oracle.score(&problem, &once), oracle.score(&problem, &twice));
}

#[test]
fn test_merge_is_idempotent() {
    let problem = TwoSum::new();
    let base = problem.base_tests();
    let candidates = vec![two_sum_case(&[3, 3], 6), base[0].clone(), two_sum_case(&[3, 3], 6)];

    let merged = merge_inputs(&candidates, &base);
    assert_eq!(merge_inputs(&merged, &base), merged);
    assert_eq!(merged[0], two_sum_case(&[3, 3], 6));
    assert_eq!(merged[1], base[0]);
}

#[test]
fn test_reference_faults_are_captured() {
    let problem = RomanToInt::new();
    let suite = PreparedSuite::build(&problem, &[vec![Value::Str("ABC".into())]], false);

    assert_eq!(suite.len(), 1);
    let fault = suite.cases()[0].expected.as_ref().unwrap_err();
    assert_eq!(fault.kind, "KeyError");
}

#[test]
fn test_fault_of_same_kind_survives() {
    let problem = RomanToInt::new();
    let same_kind = fn_mutant("same_fault", |_| {
        Err(evobug::types::Fault::new("KeyError", "different message"))
    });
    let oracle = FallbackOracle::with_catalogue(vec![same_kind]);

    let invalid = oracle.score_suite(
        &problem,
        &PreparedSuite::build(&problem, &[vec![Value::Str("Q".into())]], false),
    );
    assert_eq!((invalid.killed, invalid.total), (0, 1));

    let valid = oracle.score_suite(
        &problem,
        &PreparedSuite::build(&problem, &[vec![Value::Str("X".into())]], false),
    );
    assert_eq!((valid.killed, valid.total), (1, 1));
}

#[test]
fn test_identity_mutant_survives_palindromes_only() {
    let problem = ReverseString::new();
    let identity = fn_mutant("identity_copy", |args| {
        Ok(Output::Str(args[0].as_str().unwrap_or_default().to_string()))
    });
    let oracle = FallbackOracle::with_catalogue(vec![identity]);

    let palindrome = PreparedSuite::build(&problem, &[vec![Value::Str("level".into())]], false);
    assert_eq!(oracle.score_suite(&problem, &palindrome).killed, 0);

    let plain = PreparedSuite::build(&problem, &[vec![Value::Str("abc".into())]], false);
    assert_eq!(oracle.score_suite(&problem, &plain).killed, 1);
}

#[test]
fn test_base_tests_raise_score() {
    let problem = TwoSum::new();
    let oracle = FallbackOracle::new();
    let candidate = [two_sum_case(&[1, 2], 3)];

    let without = oracle.score_suite(&problem, &PreparedSuite::build(&problem, &candidate, false));
    let with = oracle.score_suite(&problem, &PreparedSuite::build(&problem, &candidate, true));
    assert!(with.killed >= without.killed);
    assert_eq!(with.total, without.total);
}
