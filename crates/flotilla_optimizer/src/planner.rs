use std::sync::Arc;

use jiff::civil;
use tracing::{Level, info, instrument};

use crate::{
    error::PlanningError,
    input::PlanInput,
    problem::{
        fleet::Fleet, routing_problem::RoutingProblemBuilder,
        travel_time_matrix::TravelTimeMatrix, week::build_week_nodes,
    },
    schedule::{DispatchSchedule, extract_schedule},
    solver::{solver::Solver, solver_params::SolverParams},
};

/// Front door of the crate: owns the raw input records and plans one
/// week at a time.
pub struct DispatchPlanner {
    input: PlanInput,
}

impl DispatchPlanner {
    pub fn new(input: PlanInput) -> Self {
        Self { input }
    }

    pub fn input(&self) -> &PlanInput {
        &self.input
    }

    /// Runs the full pipeline for the week starting at `week_start`:
    /// fleet and node assembly, travel matrix, solve, schedule
    /// extraction.
    #[instrument(skip_all, level = Level::INFO, fields(%week_start))]
    pub fn plan(
        &self,
        week_start: civil::Date,
        params: SolverParams,
    ) -> Result<DispatchSchedule, PlanningError> {
        let fleet = Fleet::from_specs(&self.input.barges)?;
        let nodes = build_week_nodes(&self.input.demand, &self.input.sites, week_start, &fleet)?;

        let site_ids: Vec<&str> = nodes.iter().map(|node| node.site_id()).collect();
        let (matrix, warnings) = TravelTimeMatrix::from_edges(&site_ids, &self.input.travel_times);

        let mut builder = RoutingProblemBuilder::default();
        builder
            .set_nodes(nodes)
            .set_matrix(matrix)
            .set_fleet(fleet)
            .add_warnings(warnings);
        let problem = Arc::new(builder.build());

        info!(
            sites = problem.num_nodes() - 1,
            barges = problem.fleet().len(),
            demand_units = problem.total_demand_units(),
            "planning week"
        );

        let solver = Solver::new(Arc::clone(&problem), params);
        let solution = solver.solve()?;

        Ok(extract_schedule(&solution, week_start))
    }
}
