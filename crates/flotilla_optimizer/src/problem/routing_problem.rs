use tracing::warn;

use crate::error::BuildWarning;

use super::{
    Minutes,
    fleet::{Barge, BargeIdx, Fleet},
    node::{Node, NodeIdx},
    travel_time_matrix::TravelTimeMatrix,
};

/// Solver-ready problem instance: indexed node list (depot at 0), travel
/// minute matrix and the fleet vectors. Built once per planning run and
/// never mutated while solving, so it can be shared read-only across
/// search workers.
#[derive(Debug)]
pub struct RoutingProblem {
    nodes: Vec<Node>,
    matrix: TravelTimeMatrix,
    fleet: Fleet,
    warnings: Vec<BuildWarning>,
}

impl RoutingProblem {
    pub fn node(&self, node: NodeIdx) -> &Node {
        &self.nodes[node]
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// All non-depot node indices.
    pub fn site_indices(&self) -> impl Iterator<Item = NodeIdx> {
        (1..self.nodes.len()).map(NodeIdx::new)
    }

    pub fn demand_units(&self, node: NodeIdx) -> u32 {
        self.nodes[node].demand_units()
    }

    pub fn service_minutes(&self, node: NodeIdx) -> Minutes {
        self.nodes[node].service_minutes()
    }

    pub fn travel_minutes(&self, from: NodeIdx, to: NodeIdx) -> Minutes {
        self.matrix.travel_minutes(from, to)
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn barge(&self, barge_id: BargeIdx) -> &Barge {
        self.fleet.barge(barge_id)
    }

    pub fn total_demand_units(&self) -> u64 {
        self.nodes
            .iter()
            .map(|node| node.demand_units() as u64)
            .sum()
    }

    pub fn warnings(&self) -> &[BuildWarning] {
        &self.warnings
    }
}

/// Deterministic: the same inputs always yield the same index assignment
/// (depot = 0, remaining nodes in input order).
#[derive(Default)]
pub struct RoutingProblemBuilder {
    nodes: Option<Vec<Node>>,
    matrix: Option<TravelTimeMatrix>,
    fleet: Option<Fleet>,
    warnings: Vec<BuildWarning>,
}

impl RoutingProblemBuilder {
    pub fn set_nodes(&mut self, nodes: Vec<Node>) -> &mut RoutingProblemBuilder {
        self.nodes = Some(nodes);
        self
    }

    pub fn set_matrix(&mut self, matrix: TravelTimeMatrix) -> &mut RoutingProblemBuilder {
        self.matrix = Some(matrix);
        self
    }

    pub fn set_fleet(&mut self, fleet: Fleet) -> &mut RoutingProblemBuilder {
        self.fleet = Some(fleet);
        self
    }

    pub fn add_warnings(&mut self, warnings: Vec<BuildWarning>) -> &mut RoutingProblemBuilder {
        self.warnings.extend(warnings);
        self
    }

    pub fn build(self) -> RoutingProblem {
        let nodes = self.nodes.expect("Expected list of nodes");
        let matrix = self.matrix.expect("Expected travel time matrix");
        let fleet = self.fleet.expect("Expected fleet");

        assert_eq!(
            matrix.num_nodes(),
            nodes.len(),
            "Travel time matrix must cover every node"
        );
        assert_eq!(
            nodes[0].demand_units(),
            0,
            "Depot (index 0) must have zero demand"
        );

        let mut warnings = self.warnings;

        let demand_units = nodes.iter().map(|node| node.demand_units() as u64).sum();
        let capacity_units = fleet.total_capacity_units();
        if demand_units > capacity_units {
            let warning = BuildWarning::CapacityExceeded {
                demand_units,
                capacity_units,
            };
            warn!("{warning}");
            warnings.push(warning);
        }

        RoutingProblem {
            nodes,
            matrix,
            fleet,
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{problem_with, test_barge};

    #[test]
    fn depot_is_index_zero() {
        let problem = problem_with(
            &[("S1", 40, 0, 10080, 10)],
            &[("PORT0", "S1", 30), ("S1", "PORT0", 30)],
            vec![test_barge("B1", 100)],
        );

        assert_eq!(problem.node(NodeIdx::new(0)).site_id(), "PORT0");
        assert_eq!(problem.num_nodes(), 2);
        assert_eq!(problem.site_indices().count(), 1);
    }

    #[test]
    fn warns_when_demand_exceeds_fleet_capacity() {
        let problem = problem_with(
            &[("S1", 80, 0, 10080, 10), ("S2", 80, 0, 10080, 10)],
            &[
                ("PORT0", "S1", 30),
                ("S1", "PORT0", 30),
                ("PORT0", "S2", 30),
                ("S2", "PORT0", 30),
            ],
            vec![test_barge("B1", 100)],
        );

        assert!(problem.warnings().iter().any(|warning| matches!(
            warning,
            BuildWarning::CapacityExceeded {
                demand_units: 160,
                capacity_units: 100
            }
        )));
    }
}
