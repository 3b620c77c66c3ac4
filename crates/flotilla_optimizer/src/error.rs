use jiff::civil;
use thiserror::Error;

/// Failure modes of a weekly planning run.
///
/// Data-quality issues (missing travel edges, demand exceeding fleet
/// capacity) are not errors: they are logged as [`BuildWarning`]s and the
/// solve is still attempted. Only an empty week or a search that cannot
/// place every demanded site terminates the run.
#[derive(Error, Debug)]
pub enum PlanningError {
    /// No forecast rows matched the requested week. Recoverable: there is
    /// simply nothing to plan.
    #[error("no forecast rows for week starting {week_start}")]
    NoDemand { week_start: civil::Date },

    /// Neither construction nor improvement produced a feasible assignment
    /// covering every demanded site.
    #[error("no feasible plan: could not place {}", unplaced.join(", "))]
    NoSolutionFound { unplaced: Vec<String> },

    #[error("invalid clock time {0:?}, expected HH:MM")]
    InvalidClockTime(String),

    #[error("barge {barge_id}: {reason}")]
    InvalidBargeSpec { barge_id: String, reason: String },

    #[error("fleet has no barges")]
    EmptyFleet,
}

/// Non-fatal data-quality findings collected while building a
/// [`RoutingProblem`](crate::problem::routing_problem::RoutingProblem).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    /// No travel-time edge between the depot and a demanded site. The arc
    /// gets a large sentinel cost so the solver naturally avoids it.
    MissingEdge { from: String, to: String },

    /// Total weekly demand exceeds the summed fleet capacity. The solver,
    /// not the builder, decides definitive infeasibility.
    CapacityExceeded {
        demand_units: u64,
        capacity_units: u64,
    },
}

impl std::fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildWarning::MissingEdge { from, to } => {
                write!(f, "missing travel-time edge {from}->{to}")
            }
            BuildWarning::CapacityExceeded {
                demand_units,
                capacity_units,
            } => write!(
                f,
                "total demand {demand_units} exceeds fleet capacity {capacity_units}"
            ),
        }
    }
}
