use crate::config::EvolutionConfig;
use crate::config::traits::validate_section;
use crate::engines::evaluation::Evaluator;
use crate::engines::generation::operators::{crossover, mutate, tournament_index};
use crate::engines::generation::progress::ProgressCallback;
use crate::engines::generation::representation::initialize_population;
use crate::error::Result;
use crate::problems::ProblemAdapter;
use crate::types::Genome;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct RunResult {
    pub problem: String,
    pub best_genome: Genome,
    pub best_fitness: f64,
    /// Best fitness of each generation
    pub fitness_history: Vec<f64>,
    /// Mean fitness of each generation
    pub avg_fitness_history: Vec<f64>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

pub struct EvolutionEngine {
    config: EvolutionConfig,
    evaluator: Evaluator,
    rng: StdRng,
}

/// Index of the first maximum
fn best_index(fitnesses: &[f64]) -> usize {
    let mut best = 0;
    for (i, &f) in fitnesses.iter().enumerate() {
        if f > fitnesses[best] {
            best = i;
        }
    }
    best
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

impl EvolutionEngine {
    pub fn new(config: EvolutionConfig, evaluator: Evaluator) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self {
            config,
            evaluator,
            rng,
        }
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Run the evolution process
    pub fn run<C: ProgressCallback>(
        &mut self,
        problem: &dyn ProblemAdapter,
        mut callback: C,
    ) -> Result<RunResult> {
        validate_section(&self.config)?;
        problem.input_spec().validate()?;

        let started_at = Utc::now();
        let population_size = self.config.population_size_for(problem.id());
        let generations = self.config.num_generations_for(problem.id());
        log::info!(
            "[{}] evolving {} individuals for {} generations with the {} oracle",
            problem.id(),
            population_size,
            generations,
            self.evaluator.oracle().name()
        );

        let mut population = initialize_population(problem, population_size, &mut self.rng)?;
        let mut fitnesses = self.evaluate(&population, problem, &mut callback)?;

        let initial_best = best_index(&fitnesses);
        let mut best_genome = population[initial_best].clone();
        let mut best_fitness = fitnesses[initial_best];

        let mut fitness_history = Vec::with_capacity(generations);
        let mut avg_fitness_history = Vec::with_capacity(generations);

        for generation in 0..generations {
            callback.on_generation_start(generation);

            let gen_best = best_index(&fitnesses);
            let gen_best_fitness = fitnesses[gen_best];
            let gen_avg_fitness = mean(&fitnesses);
            fitness_history.push(gen_best_fitness);
            avg_fitness_history.push(gen_avg_fitness);

            // Strict improvement only; an equal later maximum keeps the earlier best
            if gen_best_fitness > best_fitness {
                best_fitness = gen_best_fitness;
                best_genome = population[gen_best].clone();
            }

            callback.on_generation_complete(generation, gen_best_fitness, gen_avg_fitness);

            population = self.create_next_generation(&population, &fitnesses, problem);
            fitnesses = self.evaluate(&population, problem, &mut callback)?;
        }

        Ok(RunResult {
            problem: problem.id().to_string(),
            best_genome,
            best_fitness,
            fitness_history,
            avg_fitness_history,
            started_at,
            finished_at: Utc::now(),
        })
    }

    fn evaluate<C: ProgressCallback>(
        &mut self,
        population: &[Genome],
        problem: &dyn ProblemAdapter,
        callback: &mut C,
    ) -> Result<Vec<f64>> {
        let total = population.len();
        if self.evaluator.is_parallel() {
            // Scores arrive together, so progress is reported once they are in
            let fitnesses = self
                .evaluator
                .evaluate_population(population, problem, &mut self.rng)?;
            for current in 1..=total {
                callback.on_individual_evaluated(current, total);
            }
            return Ok(fitnesses);
        }

        let mut fitnesses = Vec::with_capacity(total);
        for (i, genome) in population.iter().enumerate() {
            fitnesses.push(
                self.evaluator
                    .evaluate_individual(genome, problem, &mut self.rng)?,
            );
            callback.on_individual_evaluated(i + 1, total);
        }
        Ok(fitnesses)
    }

    fn create_next_generation(
        &mut self,
        population: &[Genome],
        fitnesses: &[f64],
        problem: &dyn ProblemAdapter,
    ) -> Vec<Genome> {
        let spec = Some(problem.input_spec());
        let target = population.len();
        let mut next_generation = Vec::with_capacity(target);

        while next_generation.len() < target {
            let p1 = tournament_index(fitnesses, self.config.tournament_size, &mut self.rng);
            let p2 = tournament_index(fitnesses, self.config.tournament_size, &mut self.rng);

            let (mut child1, mut child2) = crossover(
                &population[p1],
                &population[p2],
                spec,
                self.config.crossover_rate,
                &mut self.rng,
            );
            mutate(&mut child1, spec, self.config.mutation_rate, &mut self.rng);
            mutate(&mut child2, spec, self.config.mutation_rate, &mut self.rng);

            next_generation.push(child1);
            if next_generation.len() < target {
                next_generation.push(child2);
            }
        }
        next_generation
    }
}
