use super::traits::ConfigSection;
use crate::error::EvobugError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Executable name (looked up on PATH) or path of the mutation tool
    pub tool: String,
    pub timeout_secs: u64,
    /// Skip the external tool and score with the built-in catalogue only
    pub force_fallback: bool,
    pub extra_search_paths: Vec<PathBuf>,
    pub baseline_num_tests: usize,
    pub baseline_include_base_tests: bool,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            tool: "mut.py".to_string(),
            timeout_secs: 10,
            force_fallback: false,
            extra_search_paths: Vec::new(),
            baseline_num_tests: 500,
            baseline_include_base_tests: true,
        }
    }
}

impl ConfigSection for MutationConfig {
    fn section_name() -> &'static str {
        "mutation"
    }

    fn validate(&self) -> Result<(), EvobugError> {
        if self.timeout_secs == 0 {
            return Err(EvobugError::Configuration(
                "Mutation timeout must be at least 1 second".to_string(),
            ));
        }
        if !self.force_fallback && self.tool.trim().is_empty() {
            return Err(EvobugError::Configuration(
                "Mutation tool must be named unless force_fallback is set".to_string(),
            ));
        }
        Ok(())
    }
}
