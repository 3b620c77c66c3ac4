use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{Level, debug, info, instrument, warn};

use crate::{error::PlanningError, problem::routing_problem::RoutingProblem};

use super::{
    construction::construct,
    ls::{local_search::LocalSearch, penalty::ArcPenalties},
    solution::working_solution::WorkingSolution,
    solver_params::{SolverParams, Termination},
};

#[derive(Copy, Clone, Debug, Serialize)]
pub enum SolverStatus {
    Pending,
    Running,
    Completed,
}

/// Two-phase solver: cheapest-insertion construction, then guided local
/// search until a termination fires.
///
/// Every demanded node must be routed; a construction that leaves nodes
/// unassigned is a planning failure, not a partial answer. The
/// improvement phase only ever rearranges a complete assignment.
pub struct Solver {
    problem: Arc<RoutingProblem>,
    params: SolverParams,
    status: RwLock<SolverStatus>,
}

impl Solver {
    pub fn new(problem: Arc<RoutingProblem>, params: SolverParams) -> Self {
        Solver {
            problem,
            params,
            status: RwLock::new(SolverStatus::Pending),
        }
    }

    pub fn solve(&self) -> Result<WorkingSolution, PlanningError> {
        *self.status.write() = SolverStatus::Running;
        let result = self.run_search();
        *self.status.write() = SolverStatus::Completed;
        result
    }

    pub fn status(&self) -> SolverStatus {
        *self.status.read()
    }

    #[instrument(skip_all, level = Level::DEBUG)]
    fn run_search(&self) -> Result<WorkingSolution, PlanningError> {
        let started = Instant::now();

        let mut current = construct(&self.problem);
        if current.has_unassigned() {
            let unplaced: Vec<String> = current
                .unassigned()
                .iter()
                .map(|&node| self.problem.node(node).site_id().to_string())
                .collect();
            warn!(?unplaced, "no feasible insertion for some demanded sites");
            return Err(PlanningError::NoSolutionFound { unplaced });
        }

        debug!(cost = current.total_cost(), "construction finished");

        let search = LocalSearch::new(&self.problem);
        let mut penalties = ArcPenalties::new(ArcPenalties::lambda_from_cost(
            current.total_cost(),
            self.problem.num_nodes(),
        ));

        // The incumbent walks the penalized landscape; the best solution
        // is tracked on real cost only.
        let mut best = current.clone();
        let mut iterations = 0_usize;
        let mut since_improvement = 0_usize;

        while !self.should_terminate(started, iterations, since_improvement) {
            iterations += 1;

            match search.improve_once(&mut current, &penalties) {
                Some(_) => {
                    if current.total_cost() < best.total_cost() {
                        best = current.clone();
                        since_improvement = 0;
                    } else {
                        since_improvement += 1;
                    }
                }
                None => {
                    // Local optimum under the current penalties: raise
                    // them and keep going from the same incumbent.
                    since_improvement += 1;
                    if !penalties.penalize_solution(&self.problem, &current) {
                        break;
                    }
                }
            }
        }

        info!(
            iterations,
            cost = best.total_cost(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "search finished"
        );

        Ok(best)
    }

    fn should_terminate(
        &self,
        started: Instant,
        iterations: usize,
        since_improvement: usize,
    ) -> bool {
        self.params.terminations.iter().any(|t| match t {
            Termination::Duration(budget) => {
                started.elapsed().as_secs_f64() >= budget.as_secs_f64()
            }
            Termination::Iterations(max) => iterations >= *max,
            Termination::IterationsWithoutImprovement(max) => since_improvement >= *max,
        })
    }
}
