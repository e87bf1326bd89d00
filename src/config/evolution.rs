use super::traits::ConfigSection;
use crate::error::EvobugError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub tournament_size: usize,
    /// Inputs per individual suite (the decoded genome plus random padding)
    pub suite_size: usize,
    pub include_base_tests: bool,
    /// Score built suites across threads
    pub parallel: bool,
    pub seed: u64,
    /// Per-problem population size, keyed by problem id
    pub population_overrides: HashMap<String, usize>,
    /// Per-problem generation budget, keyed by problem id
    pub generation_overrides: HashMap<String, usize>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            population_size: 30,
            num_generations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.2,
            tournament_size: 3,
            suite_size: 1,
            include_base_tests: true,
            parallel: false,
            seed: 42,
            population_overrides: HashMap::new(),
            generation_overrides: HashMap::new(),
        }
    }
}

impl EvolutionConfig {
    pub fn population_size_for(&self, problem_id: &str) -> usize {
        self.population_overrides
            .get(problem_id)
            .copied()
            .unwrap_or(self.population_size)
    }

    pub fn num_generations_for(&self, problem_id: &str) -> usize {
        self.generation_overrides
            .get(problem_id)
            .copied()
            .unwrap_or(self.num_generations)
    }
}

impl ConfigSection for EvolutionConfig {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), EvobugError> {
        if self.population_size == 0 {
            return Err(EvobugError::Configuration(
                "Population size must be at least 1".to_string(),
            ));
        }
        if let Some((id, _)) = self.population_overrides.iter().find(|(_, &size)| size == 0) {
            return Err(EvobugError::Configuration(format!(
                "Population override for '{}' must be at least 1",
                id
            )));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(EvobugError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(EvobugError::Configuration(
                "Crossover rate must be between 0 and 1".to_string(),
            ));
        }
        if self.tournament_size == 0 {
            return Err(EvobugError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.suite_size == 0 {
            return Err(EvobugError::Configuration(
                "Suite size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
