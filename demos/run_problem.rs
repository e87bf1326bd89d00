//! Run the GA and the random baseline for one registered problem.
//!
//! cargo run --example run_problem -- two_sum [config.toml]

use anyhow::{Context, Result};
use evobug::baseline::run_random_baseline;
use evobug::config::ConfigManager;
use evobug::engines::evaluation::Evaluator;
use evobug::engines::generation::{EvolutionEngine, LogProgressCallback};
use evobug::engines::mutation::oracle_from_config;
use evobug::problems::ProblemRegistry;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let problem_id = args.next().unwrap_or_else(|| "two_sum".to_string());
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("evobug.toml"));

    let manager = ConfigManager::new();
    manager
        .load_layered(&config_path)
        .with_context(|| format!("loading {}", config_path.display()))?;
    let config = manager.get();

    let registry = ProblemRegistry::new();
    let problem = registry.get(&problem_id).with_context(|| {
        format!("available problems: {}", registry.ids().join(", "))
    })?;

    let oracle = oracle_from_config(&config.mutation);
    let evaluator = Evaluator::new(
        oracle.clone(),
        config.evolution.suite_size,
        config.evolution.include_base_tests,
    )
    .with_parallel(config.evolution.parallel);

    let mut engine = EvolutionEngine::new(config.evolution.clone(), evaluator);
    let run = engine.run(problem.as_ref(), LogProgressCallback::new(problem.id()))?;

    let mut rng = StdRng::seed_from_u64(config.evolution.seed);
    let baseline = run_random_baseline(
        problem.as_ref(),
        oracle.as_ref(),
        config.mutation.baseline_num_tests,
        config.mutation.baseline_include_base_tests,
        &mut rng,
    )?;

    println!("{}", serde_json::to_string_pretty(&run)?);
    println!(
        "GA best {:.4} vs random baseline {:.4} ({}/{} killed over {} inputs)",
        run.best_fitness,
        baseline.result.score,
        baseline.result.killed,
        baseline.result.total,
        baseline.num_tests
    );
    Ok(())
}
