use crate::problem::fleet::BargeIdx;

use crate::solver::solution::{route::WorkingRoute, working_solution::WorkingSolution};

use super::{
    r#move::{EvaluatedMove, LocalSearchOperator, score_routes},
    penalty::ArcPenalties,
};

/// **Inter-Route Relocate**
///
/// Moves a single stop from one barge's route into another's.
///
/// ```text
/// BEFORE:
///    Route 1: ... (A) -> [from] -> (B) ...
///    Route 2: ... (X) -> (Y) ...
///
/// AFTER:
///    Route 1: ... (A) -> (B) ...
///    Route 2: ... (X) -> [from] -> (Y) ...
/// ```
#[derive(Debug)]
pub struct RelocateOperator {
    params: RelocateOperatorParams,
}

#[derive(Debug)]
pub struct RelocateOperatorParams {
    pub from_route: BargeIdx,
    pub from: usize,
    pub to_route: BargeIdx,
    pub to: usize,
}

impl RelocateOperator {
    pub fn new(params: RelocateOperatorParams) -> Self {
        if params.from_route == params.to_route {
            panic!("RelocateOperator moves stops between distinct routes");
        }

        Self { params }
    }
}

impl LocalSearchOperator for RelocateOperator {
    fn generate_moves<C>(
        solution: &WorkingSolution,
        (r1, r2): (BargeIdx, BargeIdx),
        mut consumer: C,
    ) where
        C: FnMut(Self),
    {
        if r1 == r2 {
            return;
        }

        let from_route = solution.route(r1);
        let to_route = solution.route(r2);

        for from_pos in 0..from_route.len() {
            for to_pos in 0..=to_route.len() {
                consumer(RelocateOperator::new(RelocateOperatorParams {
                    from_route: r1,
                    from: from_pos,
                    to_route: r2,
                    to: to_pos,
                }));
            }
        }
    }

    fn evaluate(
        &self,
        solution: &WorkingSolution,
        penalties: &ArcPenalties,
    ) -> Option<EvaluatedMove> {
        let problem = solution.problem();
        let from_route = solution.route(self.params.from_route);
        let to_route = solution.route(self.params.to_route);

        let moved = from_route.stop(self.params.from);

        let mut from_stops = from_route.stops().to_vec();
        from_stops.remove(self.params.from);

        let mut to_stops = to_route.stops().to_vec();
        to_stops.insert(self.params.to, moved);

        let new_from = WorkingRoute::from_stops(problem, self.params.from_route, from_stops)?;
        let new_to = WorkingRoute::from_stops(problem, self.params.to_route, to_stops)?;

        Some(score_routes(
            "Relocate",
            solution,
            penalties,
            vec![new_from, new_to],
        ))
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
    fn relocating_to_the_nearer_barge_reduces_cost() {
        // S2 sits right next to S1; serving it from the second barge
        // costs a long detour.
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 10), ("S2", 10, 0, 10080, 10)],
            &symmetric_edges(&[("PORT0", "S1", 20), ("PORT0", "S2", 90), ("S1", "S2", 5)]),
            vec![test_barge("B1", 100), test_barge("B2", 100)],
        );

        let mut solution = WorkingSolution::new(problem);
        assert!(solution.insert(BargeIdx::new(0), NodeIdx::new(1), 0));
        assert!(solution.insert(BargeIdx::new(1), NodeIdx::new(2), 0));
        let before = solution.total_cost();

        let penalties = ArcPenalties::new(1);
        let mut best: Option<EvaluatedMove> = None;
        RelocateOperator::generate_moves(
            &solution,
            (BargeIdx::new(1), BargeIdx::new(0)),
            |op| {
                if let Some(eval) = op.evaluate(&solution, &penalties) {
                    if best
                        .as_ref()
                        .is_none_or(|b| eval.penalized_delta < b.penalized_delta)
                    {
                        best = Some(eval);
                    }
                }
            },
        );

        let best = best.expect("some relocate must be feasible");
        assert!(best.raw_delta < 0);

        best.apply(&mut solution);
        assert!(solution.total_cost() < before);
        assert_eq!(solution.route(BargeIdx::new(0)).len(), 2);
        assert!(solution.route(BargeIdx::new(1)).is_empty());
    }

    #[test]
    fn capacity_blocks_relocation() {
        let problem = problem_with(
            &[("S1", 60, 0, 10080, 10), ("S2", 60, 0, 10080, 10)],
            &symmetric_edges(&[("PORT0", "S1", 20), ("PORT0", "S2", 90), ("S1", "S2", 5)]),
            vec![test_barge("B1", 100), test_barge("B2", 100)],
        );

        let mut solution = WorkingSolution::new(problem);
        assert!(solution.insert(BargeIdx::new(0), NodeIdx::new(1), 0));
        assert!(solution.insert(BargeIdx::new(1), NodeIdx::new(2), 0));

        let penalties = ArcPenalties::new(1);
        let mut found = false;
        RelocateOperator::generate_moves(
            &solution,
            (BargeIdx::new(1), BargeIdx::new(0)),
            |op| {
                found |= op.evaluate(&solution, &penalties).is_some();
            },
        );

        // 120 units on a 100-unit barge: every relocate is infeasible.
        assert!(!found);
    }
}
