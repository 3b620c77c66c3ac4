use fxhash::FxHashMap;

use crate::problem::{Minutes, node::NodeIdx, routing_problem::RoutingProblem};

use crate::solver::solution::{route::WorkingRoute, working_solution::WorkingSolution};

type Arc = (NodeIdx, NodeIdx);

/// Guided-local-search arc penalties.
///
/// Arcs of the current local optimum accumulate penalty counts that feed
/// an augmented objective, `cost + lambda * count`, steering the search
/// away from arcs it keeps reselecting. The raw cost is untouched: the
/// best solution is always tracked on real minutes.
pub struct ArcPenalties {
    counts: FxHashMap<Arc, Minutes>,
    lambda: Minutes,
}

impl ArcPenalties {
    pub fn new(lambda: Minutes) -> Self {
        ArcPenalties {
            counts: FxHashMap::default(),
            lambda,
        }
    }

    /// The classic GLS scaling: a fraction of the average arc share of
    /// the construction cost.
    pub fn lambda_from_cost(initial_cost: Minutes, num_nodes: usize) -> Minutes {
        (initial_cost / (8 * num_nodes.max(1) as Minutes)).max(1)
    }

    pub fn lambda(&self) -> Minutes {
        self.lambda
    }

    fn count(&self, arc: Arc) -> Minutes {
        self.counts.get(&arc).copied().unwrap_or(0)
    }

    /// Penalty surcharge for one route under the augmented objective.
    pub fn route_penalty_cost(&self, route: &WorkingRoute) -> Minutes {
        if self.counts.is_empty() {
            return 0;
        }

        self.lambda
            * route
                .arcs()
                .map(|arc| self.count(arc))
                .sum::<Minutes>()
    }

    /// Penalizes every maximum-utility arc of `solution`, where utility
    /// is `travel / (1 + count)`. Returns false when the solution uses no
    /// positive-cost arcs, i.e. there is nothing left to diversify over.
    pub fn penalize_solution(
        &mut self,
        problem: &RoutingProblem,
        solution: &WorkingSolution,
    ) -> bool {
        let mut max_utility = 0.0_f64;
        let mut max_arcs: Vec<Arc> = Vec::new();

        for route in solution.routes() {
            for arc in route.arcs() {
                let travel = problem.travel_minutes(arc.0, arc.1);
                if travel <= 0 {
                    continue;
                }

                let utility = travel as f64 / (1.0 + self.count(arc) as f64);
                if utility > max_utility {
                    max_utility = utility;
                    max_arcs.clear();
                    max_arcs.push(arc);
                } else if utility == max_utility {
                    max_arcs.push(arc);
                }
            }
        }

        if max_arcs.is_empty() {
            return false;
        }

        for arc in max_arcs {
            *self.counts.entry(arc).or_insert(0) += 1;
        }

        true
    }
}
