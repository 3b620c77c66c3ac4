use std::sync::Arc;

use crate::problem::{
    Minutes,
    fleet::BargeIdx,
    node::NodeIdx,
    routing_problem::RoutingProblem,
};

use super::route::WorkingRoute;

/// One route per barge (barge order fixed by the fleet) plus the set of
/// still-unassigned sites, kept sorted for deterministic iteration.
#[derive(Clone, Debug)]
pub struct WorkingSolution {
    problem: Arc<RoutingProblem>,
    routes: Vec<WorkingRoute>,
    unassigned: Vec<NodeIdx>,
}

impl WorkingSolution {
    pub fn new(problem: Arc<RoutingProblem>) -> Self {
        let routes = problem
            .fleet()
            .indices()
            .map(WorkingRoute::empty)
            .collect();
        let unassigned = problem.site_indices().collect();

        WorkingSolution {
            problem,
            routes,
            unassigned,
        }
    }

    pub fn problem(&self) -> &Arc<RoutingProblem> {
        &self.problem
    }

    pub fn route(&self, barge_id: BargeIdx) -> &WorkingRoute {
        &self.routes[barge_id.get()]
    }

    pub fn routes(&self) -> &[WorkingRoute] {
        &self.routes
    }

    pub fn unassigned(&self) -> &[NodeIdx] {
        &self.unassigned
    }

    pub fn has_unassigned(&self) -> bool {
        !self.unassigned.is_empty()
    }

    /// Travel plus waiting minutes over all routes.
    pub fn total_cost(&self) -> Minutes {
        self.routes.iter().map(WorkingRoute::cost).sum()
    }

    pub fn total_load_units(&self) -> u64 {
        self.routes
            .iter()
            .map(|route| route.load_units() as u64)
            .sum()
    }

    /// Inserts `node` into the barge's route at `position` if the result
    /// stays feasible. Returns whether the insertion was applied.
    pub fn insert(&mut self, barge_id: BargeIdx, node: NodeIdx, position: usize) -> bool {
        let Some(route) = self.routes[barge_id.get()].inserting(&self.problem, node, position)
        else {
            return false;
        };

        self.routes[barge_id.get()] = route;
        self.unassigned.retain(|&unassigned| unassigned != node);
        true
    }

    /// Swaps in already-validated routes produced by a local-search move.
    pub fn replace_routes(&mut self, routes: Vec<WorkingRoute>) {
        for route in routes {
            let index = route.barge_id().get();
            self.routes[index] = route;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{problem_with, test_barge};

    #[test]
    fn starts_with_all_sites_unassigned() {
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 10), ("S2", 20, 0, 10080, 10)],
            &[
                ("PORT0", "S1", 30),
                ("S1", "PORT0", 30),
                ("PORT0", "S2", 30),
                ("S2", "PORT0", 30),
                ("S1", "S2", 30),
                ("S2", "S1", 30),
            ],
            vec![test_barge("B1", 100)],
        );

        let solution = WorkingSolution::new(problem);
        assert_eq!(solution.unassigned().len(), 2);
        assert_eq!(solution.total_cost(), 0);
    }

    #[test]
    fn insert_updates_route_and_unassigned() {
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 10)],
            &[("PORT0", "S1", 30), ("S1", "PORT0", 30)],
            vec![test_barge("B1", 100)],
        );

        let mut solution = WorkingSolution::new(problem);
        assert!(solution.insert(BargeIdx::new(0), NodeIdx::new(1), 0));
        assert!(!solution.has_unassigned());
        assert_eq!(solution.route(BargeIdx::new(0)).len(), 1);
        assert_eq!(solution.total_cost(), 60);
    }

    // Solve errors carry the losing solution through `unwrap_err` and
    // `{:?}` panics in tests, so the whole graph must stay debuggable.
    #[test]
    fn solutions_format_for_diagnostics() {
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 10)],
            &[("PORT0", "S1", 30), ("S1", "PORT0", 30)],
            vec![test_barge("B1", 100)],
        );

        let solution = WorkingSolution::new(problem);
        let rendered = format!("{solution:?}");
        assert!(rendered.contains("unassigned"));
    }

    #[test]
    fn infeasible_insert_is_rejected() {
        let problem = problem_with(
            &[("S1", 200, 0, 10080, 10)],
            &[("PORT0", "S1", 30), ("S1", "PORT0", 30)],
            vec![test_barge("B1", 100)],
        );

        let mut solution = WorkingSolution::new(problem);
        assert!(!solution.insert(BargeIdx::new(0), NodeIdx::new(1), 0));
        assert!(solution.has_unassigned());
    }
}
