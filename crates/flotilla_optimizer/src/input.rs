use jiff::civil;
use serde::{Deserialize, Serialize};

/// One forecast row from the demand collaborator: predicted units to
/// deliver to a site during the week starting at `week_start` (a Monday).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemandRecord {
    pub site_id: String,
    pub week_start: civil::Date,
    pub forecast_units: u32,
}

/// Site master data. Open/close times are `"HH:MM"` clock strings mapped
/// onto the planning week's Monday.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSpecRecord {
    pub site_id: String,
    pub open_time: String,
    pub close_time: String,
    pub service_time_minutes: Option<i64>,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelTimeRecord {
    pub from_site: String,
    pub to_site: String,
    pub travel_minutes: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BargeSpecRecord {
    pub barge_id: String,
    pub total_capacity_units: u32,
    pub working_hours_start: String,
    pub working_hours_end: String,
    pub avg_loading_rate_units_per_min: f64,
}

/// Complete input for one planning run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanInput {
    pub demand: Vec<DemandRecord>,
    pub sites: Vec<SiteSpecRecord>,
    pub travel_times: Vec<TravelTimeRecord>,
    pub barges: Vec<BargeSpecRecord>,
}
