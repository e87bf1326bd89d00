pub mod evolution_engine;
pub mod operators;
pub mod progress;
pub mod representation;

pub use evolution_engine::{EvolutionEngine, RunResult};
pub use operators::{crossover, mutate, tournament_selection, STRING_ALPHABET};
pub use progress::{
    ChannelProgressCallback, LogProgressCallback, NoProgress, ProgressCallback, ProgressMessage,
};
pub use representation::initialize_population;
