use std::sync::mpsc::Sender;

pub trait ProgressCallback: Send {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, avg_fitness: f64);
    fn on_individual_evaluated(&mut self, current: usize, total: usize);
}

impl<T: ProgressCallback + ?Sized> ProgressCallback for &mut T {
    fn on_generation_start(&mut self, generation: usize) {
        (**self).on_generation_start(generation);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, avg_fitness: f64) {
        (**self).on_generation_complete(generation, best_fitness, avg_fitness);
    }

    fn on_individual_evaluated(&mut self, current: usize, total: usize) {
        (**self).on_individual_evaluated(current, total);
    }
}

/// Emits progress through the `log` facade
pub struct LogProgressCallback {
    problem: String,
}

impl LogProgressCallback {
    pub fn new(problem: impl Into<String>) -> Self {
        Self {
            problem: problem.into(),
        }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::debug!("[{}] generation {} starting", self.problem, generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, avg_fitness: f64) {
        log::info!(
            "[{}] generation {} complete. best {:.4}, mean {:.4}",
            self.problem,
            generation + 1,
            best_fitness,
            avg_fitness
        );
    }

    fn on_individual_evaluated(&mut self, current: usize, total: usize) {
        if current % 10 == 0 || current == total {
            log::debug!("[{}]   evaluated {}/{}", self.problem, current, total);
        }
    }
}

// For observers on another thread
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressMessage {
    GenerationStart(usize),
    GenerationComplete {
        generation: usize,
        best_fitness: f64,
        avg_fitness: f64,
    },
    IndividualEvaluated {
        current: usize,
        total: usize,
    },
}

pub struct ChannelProgressCallback {
    sender: Sender<ProgressMessage>,
}

impl ChannelProgressCallback {
    pub fn new(sender: Sender<ProgressMessage>) -> Self {
        Self { sender }
    }
}

impl ProgressCallback for ChannelProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        let _ = self.sender.send(ProgressMessage::GenerationStart(generation));
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, avg_fitness: f64) {
        let _ = self.sender.send(ProgressMessage::GenerationComplete {
            generation,
            best_fitness,
            avg_fitness,
        });
    }

    fn on_individual_evaluated(&mut self, current: usize, total: usize) {
        let _ = self
            .sender
            .send(ProgressMessage::IndividualEvaluated { current, total });
    }
}

pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation_start(&mut self, _generation: usize) {}
    fn on_generation_complete(&mut self, _generation: usize, _best: f64, _avg: f64) {}
    fn on_individual_evaluated(&mut self, _current: usize, _total: usize) {}
}
