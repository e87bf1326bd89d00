use super::{str_arg, ProblemAdapter};
use crate::engines::mutation::{fn_mutant, Mutant};
use crate::error::Result;
use crate::types::{ArgSpec, Genome, InputSpec, Outcome, Output, Value};
use rand::{Rng, RngCore};

/// Longest common subsequence. On equal lengths the row above wins.
fn longest_common_subsequence(s: &[char], t: &[char]) -> Vec<char> {
    let (m, n) = (s.len(), t.len());
    let mut dp = vec![vec![Vec::<char>::new(); n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if s[i - 1] == t[j - 1] {
                let mut lcs = dp[i - 1][j - 1].clone();
                lcs.push(s[i - 1]);
                lcs
            } else if dp[i][j - 1].len() > dp[i - 1][j].len() {
                dp[i][j - 1].clone()
            } else {
                dp[i - 1][j].clone()
            };
        }
    }
    dp[m][n].clone()
}

/// Weave both strings around their LCS; `with_tail` appends leftovers
fn weave(str1: &str, str2: &str, with_tail: bool) -> String {
    let a: Vec<char> = str1.chars().collect();
    let b: Vec<char> = str2.chars().collect();
    let lcs = longest_common_subsequence(&a, &b);

    let mut out = String::new();
    let (mut i, mut j) = (0, 0);
    for ch in lcs {
        while i < a.len() && a[i] != ch {
            out.push(a[i]);
            i += 1;
        }
        while j < b.len() && b[j] != ch {
            out.push(b[j]);
            j += 1;
        }
        out.push(ch);
        i += 1;
        j += 1;
    }
    if with_tail {
        out.extend(a.iter().skip(i));
        out.extend(b.iter().skip(j));
    }
    out
}

pub fn shortest_common_supersequence(str1: &str, str2: &str) -> String {
    weave(str1, str2, true)
}

pub struct ShortestCommonSupersequence {
    spec: InputSpec,
}

impl ShortestCommonSupersequence {
    pub fn new() -> Self {
        Self {
            spec: InputSpec::new(vec![
                ArgSpec::string("str1", 1, 20),
                ArgSpec::string("str2", 1, 20),
            ]),
        }
    }
}

impl Default for ShortestCommonSupersequence {
    fn default() -> Self {
        Self::new()
    }
}

impl ProblemAdapter for ShortestCommonSupersequence {
    fn id(&self) -> &str {
        "shortest_common_supersequence"
    }

    fn input_spec(&self) -> &InputSpec {
        &self.spec
    }

    fn base_tests(&self) -> Vec<Genome> {
        [
            ("abac", "cab"),
            ("geek", "eke"),
            ("abc", "ac"),
            ("", "abc"),
            ("abcd", "xycd"),
            ("aggtab", "gxtxayb"),
            ("ace", "abcde"),
            ("aaa", "aa"),
            ("xyz", "pqr"),
            ("abc", "abc"),
            ("abc", ""),
            ("aaaa", "aaa"),
            ("abc", "def"),
            ("axbxc", "abc"),
            ("banana", "ban"),
            ("kitten", "sitting"),
        ]
        .iter()
        .map(|(a, b)| vec![Value::Str(a.to_string()), Value::Str(b.to_string())])
        .collect()
    }

    fn target_function(&self, args: &[Value]) -> Outcome {
        let str1 = str_arg(args, 0)?;
        let str2 = str_arg(args, 1)?;
        Ok(Output::Str(shortest_common_supersequence(str1, str2)))
    }

    /// Two lowercase strings
    fn random_input(&self, rng: &mut dyn RngCore) -> Result<Genome> {
        let mut genome = Vec::with_capacity(2);
        for spec in &self.spec.args {
            let (lo, hi) = spec.length_bounds(1);
            let len = rng.gen_range(lo..=hi);
            let s: String = (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect();
            genome.push(Value::Str(s));
        }
        Ok(genome)
    }

    fn specific_mutants(&self) -> Vec<Box<dyn Mutant>> {
        vec![
            fn_mutant("concatenate", |args| {
                Ok(Output::Str(format!("{}{}", str_arg(args, 0)?, str_arg(args, 1)?)))
            }),
            fn_mutant("drop_leftovers", |args| {
                Ok(Output::Str(weave(str_arg(args, 0)?, str_arg(args, 1)?, false)))
            }),
            fn_mutant("swap_arguments", |args| {
                Ok(Output::Str(shortest_common_supersequence(
                    str_arg(args, 1)?,
                    str_arg(args, 0)?,
                )))
            }),
        ]
    }
}
