use crate::error::{EvobugError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_VALUE_RANGE: (i64, i64) = (-1_000_000, 1_000_000);

/// Semantic type tag of a single argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "str")]
    Str,
    #[serde(rename = "list_int")]
    IntList,
}

/// Descriptor for one positional argument of the function under test.
/// Ranges are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArgSpec {
    pub name: String,
    pub arg_type: ArgType,
    pub value_range: Option<(i64, i64)>,
    pub length_range: Option<(usize, usize)>,
}

impl ArgSpec {
    pub fn int(name: &str, lo: i64, hi: i64) -> Self {
        Self {
            name: name.to_string(),
            arg_type: ArgType::Int,
            value_range: Some((lo, hi)),
            length_range: None,
        }
    }

    pub fn string(name: &str, min_len: usize, max_len: usize) -> Self {
        Self {
            name: name.to_string(),
            arg_type: ArgType::Str,
            value_range: None,
            length_range: Some((min_len, max_len)),
        }
    }

    pub fn int_list(name: &str, min_len: usize, max_len: usize, lo: i64, hi: i64) -> Self {
        Self {
            name: name.to_string(),
            arg_type: ArgType::IntList,
            value_range: Some((lo, hi)),
            length_range: Some((min_len, max_len)),
        }
    }

    pub fn value_bounds(&self) -> (i64, i64) {
        self.value_range.unwrap_or(DEFAULT_VALUE_RANGE)
    }

    /// Length bounds, falling back to `[1, max(1, current_len)]`
    pub fn length_bounds(&self, current_len: usize) -> (usize, usize) {
        self.length_range.unwrap_or((1, current_len.max(1)))
    }

    pub fn validate(&self) -> Result<()> {
        if let Some((lo, hi)) = self.value_range {
            if lo > hi {
                return Err(EvobugError::InvalidSpec(format!(
                    "argument '{}' has value_range [{}, {}] with lo > hi",
                    self.name, lo, hi
                )));
            }
        }
        if let Some((lo, hi)) = self.length_range {
            if lo > hi {
                return Err(EvobugError::InvalidSpec(format!(
                    "argument '{}' has length_range [{}, {}] with lo > hi",
                    self.name, lo, hi
                )));
            }
        }
        Ok(())
    }

    /// Whether `value` carries this descriptor's tag and satisfies its bounds
    pub fn admits(&self, value: &Value) -> bool {
        let (lo, hi) = self.value_bounds();
        match (self.arg_type, value) {
            (ArgType::Int, Value::Int(v)) => (lo..=hi).contains(v),
            (ArgType::Str, Value::Str(s)) => match self.length_range {
                Some((min, max)) => (min..=max).contains(&s.chars().count()),
                None => true,
            },
            (ArgType::IntList, Value::IntList(items)) => {
                let in_len = match self.length_range {
                    Some((min, max)) => (min..=max).contains(&items.len()),
                    None => true,
                };
                in_len && items.iter().all(|v| (lo..=hi).contains(v))
            }
            _ => false,
        }
    }
}

/// Ordered argument specification of a problem
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputSpec {
    pub args: Vec<ArgSpec>,
}

impl InputSpec {
    pub fn new(args: Vec<ArgSpec>) -> Self {
        Self { args }
    }

    pub fn arity(&self) -> usize {
        self.args.len()
    }

    pub fn get(&self, idx: usize) -> Option<&ArgSpec> {
        self.args.get(idx)
    }

    pub fn validate(&self) -> Result<()> {
        if self.args.is_empty() {
            return Err(EvobugError::InvalidSpec(
                "input spec declares no arguments".to_string(),
            ));
        }
        for arg in &self.args {
            arg.validate()?;
        }
        Ok(())
    }

    pub fn contains(&self, genome: &[Value]) -> bool {
        genome.len() == self.args.len()
            && self.args.iter().zip(genome).all(|(spec, v)| spec.admits(v))
    }
}

/// A concrete argument value
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Str(String),
    IntList(Vec<i64>),
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int_list(&self) -> Option<&[i64]> {
        match self {
            Value::IntList(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::IntList(items) => write!(f, "{:?}", items),
        }
    }
}

/// One candidate test input: argument values in descriptor order
pub type Genome = Vec<Value>;

/// Return value of the reference implementation or a mutant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Output {
    None,
    Bool(bool),
    Int(i64),
    Str(String),
    IntList(Vec<i64>),
}

/// A captured failure. Two faults agree when their kinds match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fault {
    pub kind: String,
    pub message: String,
}

impl Fault {
    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            kind: kind.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Fault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

/// Observable behaviour of one call
pub type Outcome = std::result::Result<Output, Fault>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_rejects_inverted_ranges() {
        let spec = InputSpec::new(vec![ArgSpec::int("n", 5, 1)]);
        assert!(spec.validate().is_err());

        let spec = InputSpec::new(vec![ArgSpec::string("s", 4, 2)]);
        assert!(spec.validate().is_err());

        assert!(InputSpec::default().validate().is_err());
    }

    #[test]
    fn test_contains_checks_arity_and_bounds() {
        let spec = InputSpec::new(vec![
            ArgSpec::int_list("nums", 2, 4, -10, 10),
            ArgSpec::int("target", -20, 20),
        ]);

        assert!(spec.contains(&[Value::IntList(vec![1, 2]), Value::Int(3)]));
        assert!(!spec.contains(&[Value::IntList(vec![1]), Value::Int(3)]));
        assert!(!spec.contains(&[Value::IntList(vec![1, 11]), Value::Int(3)]));
        assert!(!spec.contains(&[Value::IntList(vec![1, 2])]));
        assert!(!spec.contains(&[Value::Int(1), Value::Int(3)]));
    }

    #[test]
    fn test_string_length_counts_chars() {
        let spec = ArgSpec::string("s", 1, 2);
        assert!(spec.admits(&Value::Str("éé".to_string())));
        assert!(!spec.admits(&Value::Str(String::new())));
    }

    #[test]
    fn test_arg_type_serde_names() {
        let json = serde_json::to_string(&ArgType::IntList).unwrap();
        assert_eq!(json, "\"list_int\"");
    }
}
