use crate::problem::fleet::BargeIdx;

use crate::solver::solution::{route::WorkingRoute, working_solution::WorkingSolution};

use super::{
    r#move::{EvaluatedMove, LocalSearchOperator, score_routes},
    penalty::ArcPenalties,
};

/// **Adjacent-Pair Swap** (intra-route)
///
/// Exchanges two consecutive stops within a route.
///
/// ```text
/// BEFORE:  ... (A) -> [P] -> [Q] -> (B) ...
/// AFTER:   ... (A) -> [Q] -> [P] -> (B) ...
/// ```
#[derive(Debug)]
pub struct SwapOperator {
    params: SwapOperatorParams,
}

#[derive(Debug)]
pub struct SwapOperatorParams {
    pub route: BargeIdx,
    pub position: usize,
}

impl SwapOperator {
    pub fn new(params: SwapOperatorParams) -> Self {
        Self { params }
    }
}

impl LocalSearchOperator for SwapOperator {
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

        let route = solution.route(r1);
        for position in 0..route.len().saturating_sub(1) {
            consumer(SwapOperator::new(SwapOperatorParams {
                route: r1,
                position,
            }));
        }
    }

    fn evaluate(
        &self,
        solution: &WorkingSolution,
        penalties: &ArcPenalties,
    ) -> Option<EvaluatedMove> {
        let route = solution.route(self.params.route);

        let mut stops = route.stops().to_vec();
        stops.swap(self.params.position, self.params.position + 1);

        let new_route = WorkingRoute::from_stops(solution.problem(), self.params.route, stops)?;

        Some(score_routes("Swap", solution, penalties, vec![new_route]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        problem::node::NodeIdx,
        test_utils::{problem_with, symmetric_edges, test_barge},
    };

    #[test]
    fn swapping_fixes_a_backwards_pair() {
        // Far site first, near site second: swapping them shortens the
        // route from 90+40+10 to 10+40+90... both 140; use asymmetric
        // distances so order matters.
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 10), ("S2", 10, 0, 10080, 10)],
            &[
                ("PORT0", "S1", 100),
                ("S1", "PORT0", 100),
                ("PORT0", "S2", 10),
                ("S2", "PORT0", 10),
                ("S1", "S2", 100),
                ("S2", "S1", 10),
            ],
            vec![test_barge("B1", 100)],
        );

        // PORT0 -> S1 -> S2 -> PORT0 = 100 + 100 + 10 = 210.
        // PORT0 -> S2 -> S1 -> PORT0 = 10 + 10 + 100  = 120.
        let mut solution = WorkingSolution::new(problem);
        assert!(solution.insert(BargeIdx::new(0), NodeIdx::new(1), 0));
        assert!(solution.insert(BargeIdx::new(0), NodeIdx::new(2), 1));
        assert_eq!(solution.total_cost(), 210);

        let penalties = ArcPenalties::new(1);
        let mut best: Option<EvaluatedMove> = None;
        SwapOperator::generate_moves(&solution, (BargeIdx::new(0), BargeIdx::new(0)), |op| {
            if let Some(eval) = op.evaluate(&solution, &penalties) {
                if best
                    .as_ref()
                    .is_none_or(|b| eval.penalized_delta < b.penalized_delta)
                {
                    best = Some(eval);
                }
            }
        });

        let best = best.expect("swap must be feasible");
        assert_eq!(best.raw_delta, -90);

        best.apply(&mut solution);
        assert_eq!(solution.total_cost(), 120);
    }

    #[test]
    fn no_moves_for_single_stop_routes() {
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 10)],
            &symmetric_edges(&[("PORT0", "S1", 30)]),
            vec![test_barge("B1", 100)],
        );

        let mut solution = WorkingSolution::new(problem);
        assert!(solution.insert(BargeIdx::new(0), NodeIdx::new(1), 0));

        let mut count = 0;
        SwapOperator::generate_moves(&solution, (BargeIdx::new(0), BargeIdx::new(0)), |_| {
            count += 1;
        });
        assert_eq!(count, 0);
    }
}
