use crate::define_index_newtype;

use super::{Minutes, time_window::TimeWindow};

define_index_newtype!(NodeIdx, Node);

/// Index of the depot in every problem instance.
pub const DEPOT: NodeIdx = NodeIdx::new(0);

/// One stop in the problem: either the depot (index 0) or a site with
/// positive demand for the planning week.
#[derive(Debug, Clone)]
pub struct Node {
    site_id: String,
    demand_units: u32,
    service_minutes: Minutes,
    window: TimeWindow,
}

impl Node {
    pub fn new(
        site_id: impl Into<String>,
        demand_units: u32,
        service_minutes: Minutes,
        window: TimeWindow,
    ) -> Self {
        Node {
            site_id: site_id.into(),
            demand_units,
            service_minutes,
            window,
        }
    }

    /// The depot has no demand, no service time and a full-horizon window.
    pub fn depot(site_id: impl Into<String>) -> Self {
        Node {
            site_id: site_id.into(),
            demand_units: 0,
            service_minutes: 0,
            window: TimeWindow::full_horizon(),
        }
    }

    pub fn site_id(&self) -> &str {
        &self.site_id
    }

    pub fn demand_units(&self) -> u32 {
        self.demand_units
    }

    pub fn service_minutes(&self) -> Minutes {
        self.service_minutes
    }

    pub fn window(&self) -> TimeWindow {
        self.window
    }
}
