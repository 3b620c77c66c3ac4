use jiff::SignedDuration;

#[derive(Clone, Debug)]
pub struct SolverParams {
    pub terminations: Vec<Termination>,
}

/// The search stops as soon as ANY termination triggers.
#[derive(Clone, Debug)]
pub enum Termination {
    /// Wall-clock budget for the improvement phase.
    Duration(SignedDuration),
    Iterations(usize),
    IterationsWithoutImprovement(usize),
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            terminations: vec![
                Termination::Duration(SignedDuration::from_secs(30)),
                Termination::Iterations(100_000),
                Termination::IterationsWithoutImprovement(5_000),
            ],
        }
    }
}

impl SolverParams {
    pub fn with_time_budget(budget: SignedDuration) -> Self {
        Self {
            terminations: vec![
                Termination::Duration(budget),
                Termination::Iterations(100_000),
                Termination::IterationsWithoutImprovement(5_000),
            ],
        }
    }
}
