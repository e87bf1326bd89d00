//! Parsing of the external tool's report. YAML is read with `serde_yaml`,
//! which also accepts JSON reports.

use crate::error::{EvobugError, Result};
use serde_yaml::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReportCounts {
    pub killed: usize,
    pub total: usize,
}

/// Strip tags such as `!!python/object:...` down to the plain node
fn untag(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untag(&tagged.value),
        other => other,
    }
}

fn field<'a>(mapping: &'a Value, key: &str) -> Option<&'a Value> {
    untag(mapping).as_mapping()?.get(key).map(untag)
}

fn is_truthy_list(value: Option<&Value>) -> Option<&Vec<Value>> {
    value.and_then(Value::as_sequence).filter(|items| !items.is_empty())
}

fn entry_killed(entry: &Value) -> bool {
    if let Some(status) = field(entry, "status").and_then(Value::as_str) {
        return status.eq_ignore_ascii_case("killed");
    }
    field(entry, "killed").and_then(Value::as_bool).unwrap_or(false)
}

pub fn parse_report(contents: &str) -> Result<ReportCounts> {
    if contents.trim().is_empty() {
        return Ok(ReportCounts::default());
    }
    let document: Value = serde_yaml::from_str(contents)?;
    let document = untag(&document);

    match document {
        Value::Null => return Ok(ReportCounts::default()),
        Value::Mapping(_) => {}
        other => {
            return Err(EvobugError::BackendReport {
                reason: format!("report is not a mapping: {:?}", other),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    let mutants = is_truthy_list(field(document, "mutants"))
        .or_else(|| is_truthy_list(field(document, "mutations")));

    let Some(mutants) = mutants else {
        return Ok(ReportCounts::default());
    };

    let killed = mutants.iter().filter(|m| entry_killed(m)).count();
    Ok(ReportCounts {
        killed,
        total: mutants.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_mutants_list() {
        let report = r#"
mutation_score: 50.0
mutants:
  - status: killed
    module: two_sum
  - status: survived
  - status: killed
  - status: incompetent
"#;
        let counts = parse_report(report).unwrap();
        assert_eq!(counts, ReportCounts { killed: 2, total: 4 });
    }

    #[test]
    fn test_falls_back_to_mutations_key() {
        let report = "mutants: []\nmutations:\n  - {killed: true}\n  - {killed: false}\n";
        let counts = parse_report(report).unwrap();
        assert_eq!(counts, ReportCounts { killed: 1, total: 2 });
    }

    #[test]
    fn test_tagged_entries_are_unwrapped() {
        let report = r#"
mutants:
  - !MutantInfo
    status: KILLED
  - !MutantInfo
    status: survived
"#;
        let counts = parse_report(report).unwrap();
        assert_eq!(counts, ReportCounts { killed: 1, total: 2 });
    }

    #[test]
    fn test_json_report() {
        let report = r#"{"mutants": [{"status": "killed"}]}"#;
        assert_eq!(parse_report(report).unwrap(), ReportCounts { killed: 1, total: 1 });
    }

    #[test]
    fn test_empty_document_has_no_mutants() {
        assert_eq!(parse_report("").unwrap(), ReportCounts::default());
    }

    #[test]
    fn test_malformed_reports_error() {
        assert!(parse_report("mutants: [unclosed").is_err());
        assert!(parse_report("- just\n- a list\n").is_err());
    }
}
