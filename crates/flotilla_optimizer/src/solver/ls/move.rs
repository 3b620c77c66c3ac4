use crate::problem::{Minutes, fleet::BargeIdx};

use crate::solver::solution::{route::WorkingRoute, working_solution::WorkingSolution};

use super::penalty::ArcPenalties;

/// A fully evaluated candidate move: the replacement routes are already
/// propagated and feasible, so applying a move is just swapping them in.
#[derive(Debug)]
pub struct EvaluatedMove {
    pub operator: &'static str,

    /// Change in real minutes (travel + waiting).
    pub raw_delta: Minutes,

    /// Change under the GLS-augmented objective; acceptance is decided
    /// on this one.
    pub penalized_delta: Minutes,

    pub routes: Vec<WorkingRoute>,
}

impl EvaluatedMove {
    pub fn apply(self, solution: &mut WorkingSolution) {
        solution.replace_routes(self.routes);
    }
}

pub trait LocalSearchOperator: Sized {
    /// Feeds every structurally valid move for the route pair to
    /// `consumer`, in a deterministic order. Feasibility is checked later
    /// by [`LocalSearchOperator::evaluate`].
    fn generate_moves<C>(solution: &WorkingSolution, pair: (BargeIdx, BargeIdx), consumer: C)
    where
        C: FnMut(Self);

    /// Re-propagates the affected routes. `None` when the move breaks a
    /// hard constraint (capacity, a time window or a working window).
    fn evaluate(
        &self,
        solution: &WorkingSolution,
        penalties: &ArcPenalties,
    ) -> Option<EvaluatedMove>;
}

/// Shared scoring for evaluated moves: the before/after routes determine
/// both the raw and the penalized delta.
pub(super) fn score_routes(
    operator: &'static str,
    solution: &WorkingSolution,
    penalties: &ArcPenalties,
    replacements: Vec<WorkingRoute>,
) -> EvaluatedMove {
    let mut raw_delta = 0;
    let mut penalized_delta = 0;

    for route in &replacements {
        let current = solution.route(route.barge_id());
        raw_delta += route.cost() - current.cost();
        penalized_delta += (route.cost() + penalties.route_penalty_cost(route))
            - (current.cost() + penalties.route_penalty_cost(current));
    }

    EvaluatedMove {
        operator,
        raw_delta,
        penalized_delta,
        routes: replacements,
    }
}
