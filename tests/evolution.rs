use evobug::config::EvolutionConfig;
use evobug::engines::evaluation::Evaluator;
use evobug::engines::generation::{
    initialize_population, ChannelProgressCallback, EvolutionEngine, NoProgress,
    ProgressCallback, ProgressMessage,
};
use evobug::engines::mutation::FallbackOracle;
use evobug::problems::{ProblemAdapter, ProblemRegistry, RotatedSortedSearch, TwoSum};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::mpsc;
use std::sync::Arc;

/// Records generation numbers for assertions
struct TestProgressCallback {
    generations: Vec<usize>,
}

impl ProgressCallback for TestProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, _best_fitness: f64, _avg_fitness: f64) {
        self.generations.push(generation);
    }

    fn on_individual_evaluated(&mut self, _current: usize, _total: usize) {}
}

fn small_config(generations: usize) -> EvolutionConfig {
    EvolutionConfig {
        population_size: 8,
        num_generations: generations,
        seed: 42,
        ..EvolutionConfig::default()
    }
}

fn evaluator(config: &EvolutionConfig) -> Evaluator {
    Evaluator::new(
        Arc::new(FallbackOracle::new()),
        config.suite_size,
        config.include_base_tests,
    )
}

#[test]
fn test_zero_generations_reports_initial_best() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = EvolutionConfig {
        include_base_tests: false,
        ..small_config(0)
    };
    let problem = TwoSum::new();

    let mut engine = EvolutionEngine::new(config.clone(), evaluator(&config));
    let result = engine.run(&problem, NoProgress).unwrap();

    // Replay the engine's first two RNG consumers
    let mut rng = StdRng::seed_from_u64(config.seed);
    let population = initialize_population(&problem, config.population_size, &mut rng).unwrap();
    let fitnesses = evaluator(&config)
        .evaluate_population(&population, &problem, &mut rng)
        .unwrap();
    let initial_best = fitnesses.iter().cloned().fold(f64::MIN, f64::max);

    assert!(result.fitness_history.is_empty());
    assert!(result.avg_fitness_history.is_empty());
    assert_eq!(result.best_fitness, initial_best);
    assert!(population.contains(&result.best_genome));
}

#[test]
fn test_history_has_one_entry_per_generation() {
    let config = small_config(4);
    let problem = RotatedSortedSearch::new();
    let mut callback = TestProgressCallback {
        generations: Vec::new(),
    };

    let mut engine = EvolutionEngine::new(config.clone(), evaluator(&config));
    let result = engine.run(&problem, &mut callback).unwrap();

    assert_eq!(result.fitness_history.len(), 4);
    assert_eq!(result.avg_fitness_history.len(), 4);
    assert_eq!(callback.generations, vec![0, 1, 2, 3]);
    for (best, avg) in result.fitness_history.iter().zip(&result.avg_fitness_history) {
        assert!(*avg <= best + 1e-12);
        assert!((0.0..=1.0).contains(best));
    }
    let max_seen = result.fitness_history.iter().cloned().fold(f64::MIN, f64::max);
    assert!(result.best_fitness >= max_seen);
    assert!(problem.input_spec().contains(&result.best_genome));
    assert!(result.finished_at >= result.started_at);
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let config = small_config(3);
    let problem = TwoSum::new();

    let first = EvolutionEngine::new(config.clone(), evaluator(&config))
        .run(&problem, NoProgress)
        .unwrap();
    let second = EvolutionEngine::new(config.clone(), evaluator(&config))
        .run(&problem, NoProgress)
        .unwrap();

    assert_eq!(first.best_genome, second.best_genome);
    assert_eq!(first.fitness_history, second.fitness_history);
    assert_eq!(first.avg_fitness_history, second.avg_fitness_history);
}

#[test]
fn test_per_problem_overrides_apply() {
    let mut config = small_config(5);
    config.population_size = 9;
    config.generation_overrides.insert("two_sum".to_string(), 2);
    let problem = TwoSum::new();

    let result = EvolutionEngine::new(config.clone(), evaluator(&config))
        .run(&problem, NoProgress)
        .unwrap();
    assert_eq!(result.fitness_history.len(), 2);
}

#[test]
fn test_channel_progress_messages() {
    let config = small_config(2);
    let problem = TwoSum::new();
    let (tx, rx) = mpsc::channel();

    EvolutionEngine::new(config.clone(), evaluator(&config))
        .run(&problem, ChannelProgressCallback::new(tx))
        .unwrap();

    let messages: Vec<ProgressMessage> = rx.try_iter().collect();
    let completed = messages
        .iter()
        .filter(|m| matches!(m, ProgressMessage::GenerationComplete { .. }))
        .count();
    assert_eq!(completed, 2);
    assert_eq!(messages.first(), Some(&ProgressMessage::IndividualEvaluated { current: 1, total: 8 }));

    // Initial population plus one evaluation per generation, one message per individual
    let evaluated: Vec<usize> = messages
        .iter()
        .filter_map(|m| match m {
            ProgressMessage::IndividualEvaluated { current, .. } => Some(*current),
            _ => None,
        })
        .collect();
    assert_eq!(evaluated.len(), 8 * 3);
    assert_eq!(&evaluated[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_parallel_progress_counts_every_individual() {
    let config = small_config(1);
    let problem = TwoSum::new();
    let (tx, rx) = mpsc::channel();

    EvolutionEngine::new(config.clone(), evaluator(&config).with_parallel(true))
        .run(&problem, ChannelProgressCallback::new(tx))
        .unwrap();

    let evaluated = rx
        .try_iter()
        .filter(|m| matches!(m, ProgressMessage::IndividualEvaluated { .. }))
        .count();
    assert_eq!(evaluated, 8 * 2);
}

#[test]
fn test_every_registered_problem_evolves() {
    let config = EvolutionConfig {
        population_size: 4,
        ..small_config(1)
    };
    let registry = ProblemRegistry::new();
    for id in registry.ids() {
        let problem = registry.get(&id).unwrap();
        let result = EvolutionEngine::new(config.clone(), evaluator(&config).with_parallel(true))
            .run(problem.as_ref(), NoProgress)
            .unwrap();
        assert_eq!(result.problem, id);
        assert!(result.best_fitness > 0.0, "{} never killed a mutant", id);
    }
}

#[test]
fn test_invalid_config_fails_fast() {
    let config = EvolutionConfig {
        crossover_rate: 1.5,
        ..small_config(1)
    };
    let mut engine = EvolutionEngine::new(config.clone(), evaluator(&config));
    assert!(engine.run(&TwoSum::new(), NoProgress).is_err());
}
