use fxhash::FxHashMap;
use jiff::civil;
use tracing::warn;

use crate::{
    error::PlanningError,
    input::{DemandRecord, SiteSpecRecord},
};

use super::{
    Minutes,
    fleet::Fleet,
    node::Node,
    time_window::TimeWindow,
};

/// Depot id synthesized when the site specs do not carry one.
pub const DEFAULT_DEPOT_ID: &str = "PORT0";

/// Fallback for sites without a `service_time_minutes` value.
pub const DEFAULT_SERVICE_MINUTES: Minutes = 30;

/// Merges per-site weekly demand with the site specifications into the
/// node list for one planning week: depot first, then every site with
/// positive aggregated demand, in order of first appearance in the
/// demand rows.
///
/// Service time per stop is
/// `max(site_minimum, ceil(demand / loading_rate))`: larger shipments
/// take longer to load even at a fixed per-site minimum. The fleet's
/// slowest loading rate is used since no barge assignment exists yet.
pub fn build_week_nodes(
    demand: &[DemandRecord],
    sites: &[SiteSpecRecord],
    week_start: civil::Date,
    fleet: &Fleet,
) -> Result<Vec<Node>, PlanningError> {
    let mut demand_per_site: FxHashMap<&str, u32> = FxHashMap::default();
    let mut site_order: Vec<&str> = Vec::new();

    for row in demand {
        if row.week_start != week_start {
            continue;
        }
        let entry = demand_per_site.entry(row.site_id.as_str()).or_insert(0);
        if *entry == 0 && row.forecast_units > 0 {
            site_order.push(row.site_id.as_str());
        }
        *entry += row.forecast_units;
    }

    if demand_per_site.is_empty() {
        return Err(PlanningError::NoDemand { week_start });
    }

    let spec_of: FxHashMap<&str, &SiteSpecRecord> = sites
        .iter()
        .map(|spec| (spec.site_id.as_str(), spec))
        .collect();

    // The depot keeps its role even when the site specs do not list it.
    let loading_rate = fleet.slowest_loading_rate();
    let mut nodes = vec![Node::depot(DEFAULT_DEPOT_ID)];

    for site_id in site_order {
        let demand_units = demand_per_site[site_id];
        if demand_units == 0 {
            continue;
        }

        let (window, site_minimum) = match spec_of.get(site_id) {
            Some(spec) => (
                TimeWindow::from_clock(&spec.open_time, &spec.close_time)?,
                spec.service_time_minutes.unwrap_or(DEFAULT_SERVICE_MINUTES),
            ),
            None => {
                warn!("site {site_id} has demand but no site spec, assuming open all week");
                (TimeWindow::full_horizon(), DEFAULT_SERVICE_MINUTES)
            }
        };

        let loading_minutes = (demand_units as f64 / loading_rate).ceil() as Minutes;
        let service_minutes = site_minimum.max(loading_minutes);

        nodes.push(Node::new(site_id, demand_units, service_minutes, window));
    }

    if nodes.len() == 1 {
        return Err(PlanningError::NoDemand { week_start });
    }

    Ok(nodes)
}
