use std::sync::Arc;

use tracing::{Level, debug, instrument};

use crate::problem::{
    Minutes,
    fleet::BargeIdx,
    node::NodeIdx,
    routing_problem::RoutingProblem,
    travel_time_matrix::MISSING_EDGE_MINUTES,
};

use super::solution::working_solution::WorkingSolution;

/// Candidate insertion, ordered by marginal cost, then barge index, then
/// node index, then position. The derived ordering is the reproducibility
/// tie-break: equal-cost candidates always resolve the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Candidate {
    added_cost: Minutes,
    barge_id: BargeIdx,
    node: NodeIdx,
    position: usize,
}

/// Greedy cheapest-insertion construction.
///
/// Repeatedly applies the feasible (node, barge, position) insertion with
/// the lowest marginal cost across all unassigned nodes. The primary pass
/// refuses candidates that route through a missing-edge sentinel arc (a
/// soft preference); a relaxation retry lifts that preference for nodes
/// the primary pass could not place. Capacity and time windows are never
/// relaxed. Nodes still unassigned afterwards are provisionally
/// infeasible; the caller decides whether that dooms the run.
#[instrument(skip_all, level = Level::DEBUG)]
pub fn construct(problem: &Arc<RoutingProblem>) -> WorkingSolution {
    let mut solution = WorkingSolution::new(problem.clone());

    insert_all(&mut solution, false);

    if solution.has_unassigned() {
        debug!(
            remaining = solution.unassigned().len(),
            "relaxation retry over sentinel arcs"
        );
        insert_all(&mut solution, true);
    }

    debug!(
        cost = solution.total_cost(),
        unassigned = solution.unassigned().len(),
        "construction finished"
    );

    solution
}

fn insert_all(solution: &mut WorkingSolution, allow_sentinel_arcs: bool) {
    while let Some(candidate) = best_candidate(solution, allow_sentinel_arcs) {
        let inserted = solution.insert(candidate.barge_id, candidate.node, candidate.position);
        debug_assert!(inserted, "best candidate must stay insertable");
    }
}

fn best_candidate(solution: &WorkingSolution, allow_sentinel_arcs: bool) -> Option<Candidate> {
    let problem = solution.problem();
    let mut best: Option<Candidate> = None;

    for &node in solution.unassigned() {
        for barge_id in problem.fleet().indices() {
            let route = solution.route(barge_id);
            for position in 0..=route.len() {
                let Some(candidate_route) = route.inserting(problem, node, position) else {
                    continue;
                };

                let added_cost = candidate_route.cost() - route.cost();
                if !allow_sentinel_arcs && added_cost >= MISSING_EDGE_MINUTES {
                    continue;
                }

                let candidate = Candidate {
                    added_cost,
                    barge_id,
                    node,
                    position,
                };

                if best.is_none_or(|current| candidate < current) {
                    best = Some(candidate);
                }
            }
        }
    }

    best
}
