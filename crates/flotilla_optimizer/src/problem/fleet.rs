use crate::{define_index_newtype, error::PlanningError, input::BargeSpecRecord};

use super::time_window::TimeWindow;

define_index_newtype!(BargeIdx, Barge);

/// One vehicle of the fleet. The working window bounds the barge's depot
/// departure and its return arrival; the loading rate feeds the per-stop
/// service-time rule.
#[derive(Debug, Clone)]
pub struct Barge {
    barge_id: String,
    capacity_units: u32,
    working_window: TimeWindow,
    loading_rate: f64,
}

impl Barge {
    pub fn new(
        barge_id: impl Into<String>,
        capacity_units: u32,
        working_window: TimeWindow,
        loading_rate: f64,
    ) -> Self {
        Barge {
            barge_id: barge_id.into(),
            capacity_units,
            working_window,
            loading_rate,
        }
    }

    pub fn from_spec(spec: &BargeSpecRecord) -> Result<Self, PlanningError> {
        let invalid = |reason: &str| PlanningError::InvalidBargeSpec {
            barge_id: spec.barge_id.clone(),
            reason: reason.to_string(),
        };

        if spec.total_capacity_units == 0 {
            return Err(invalid("capacity must be positive"));
        }
        if spec.avg_loading_rate_units_per_min <= 0.0 {
            return Err(invalid("loading rate must be positive"));
        }

        let working_window =
            TimeWindow::from_clock(&spec.working_hours_start, &spec.working_hours_end)?;

        Ok(Barge {
            barge_id: spec.barge_id.clone(),
            capacity_units: spec.total_capacity_units,
            working_window,
            loading_rate: spec.avg_loading_rate_units_per_min,
        })
    }

    pub fn barge_id(&self) -> &str {
        &self.barge_id
    }

    pub fn capacity_units(&self) -> u32 {
        self.capacity_units
    }

    pub fn working_window(&self) -> TimeWindow {
        self.working_window
    }

    pub fn loading_rate(&self) -> f64 {
        self.loading_rate
    }
}

/// Barge input order defines [`BargeIdx`] everywhere, including the
/// per-barge route mapping in the output.
#[derive(Debug, Clone)]
pub struct Fleet {
    barges: Vec<Barge>,
}

impl Fleet {
    pub fn new(barges: Vec<Barge>) -> Result<Self, PlanningError> {
        if barges.is_empty() {
            return Err(PlanningError::EmptyFleet);
        }
        Ok(Fleet { barges })
    }

    pub fn from_specs(specs: &[BargeSpecRecord]) -> Result<Self, PlanningError> {
        let barges = specs
            .iter()
            .map(Barge::from_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Fleet::new(barges)
    }

    pub fn len(&self) -> usize {
        self.barges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.barges.is_empty()
    }

    pub fn barge(&self, barge_id: BargeIdx) -> &Barge {
        &self.barges[barge_id]
    }

    pub fn barges(&self) -> &[Barge] {
        &self.barges
    }

    pub fn indices(&self) -> impl Iterator<Item = BargeIdx> {
        (0..self.barges.len()).map(BargeIdx::new)
    }

    pub fn total_capacity_units(&self) -> u64 {
        self.barges
            .iter()
            .map(|barge| barge.capacity_units() as u64)
            .sum()
    }

    /// The most conservative rate, used for the per-stop service-time
    /// rule before any barge assignment is known.
    pub fn slowest_loading_rate(&self) -> f64 {
        self.barges
            .iter()
            .map(Barge::loading_rate)
            .fold(f64::INFINITY, f64::min)
    }
}
