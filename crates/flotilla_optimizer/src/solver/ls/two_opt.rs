use crate::problem::fleet::BargeIdx;

use crate::solver::solution::{route::WorkingRoute, working_solution::WorkingSolution};

use super::{
    r#move::{EvaluatedMove, LocalSearchOperator, score_routes},
    penalty::ArcPenalties,
};

/// **2-opt** (intra-route)
///
/// Reverses a contiguous segment of a route, removing two arcs and
/// reconnecting the route with two new ones.
///
/// ```text
/// BEFORE:  ... (A) -> [P] -> [Q] -> [R] -> (B) ...
/// AFTER:   ... (A) -> [R] -> [Q] -> [P] -> (B) ...
/// ```
#[derive(Debug)]
pub struct TwoOptOperator {
    params: TwoOptOperatorParams,
}

#[derive(Debug)]
pub struct TwoOptOperatorParams {
    pub route: BargeIdx,

    /// First stop of the reversed segment (inclusive).
    pub start: usize,

    /// Last stop of the reversed segment (inclusive).
    pub end: usize,
}

impl TwoOptOperator {
    pub fn new(params: TwoOptOperatorParams) -> Self {
        assert!(params.start < params.end, "segment must span at least two stops");
        Self { params }
    }
}

impl LocalSearchOperator for TwoOptOperator {
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (BargeIdx, BargeIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        if r1 != r2 {
            return;
        }

        let len = solution.route(r1).len();
        for start in 0..len {
            for end in (start + 1)..len {
                consumer(TwoOptOperator::new(TwoOptOperatorParams {
                    route: r1,
                    start,
                    end,
                }));
            }
        }
    }

    fn evaluate(
        &self,
        solution: &WorkingSolution,
        penalties: &ArcPenalties,
    ) -> Option<EvaluatedMove> {
        let route = solution.route(self.params.route);

        let mut stops = route.stops().to_vec();
        stops[self.params.start..=self.params.end].reverse();

        let new_route = WorkingRoute::from_stops(solution.problem(), self.params.route, stops)?;

        Some(score_routes("TwoOpt", solution, penalties, vec![new_route]))
    }
}
