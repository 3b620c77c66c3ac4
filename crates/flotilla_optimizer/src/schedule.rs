use jiff::{SignedDuration, civil};
use serde::Serialize;

use crate::problem::Minutes;
use crate::solver::solution::working_solution::WorkingSolution;

/// One delivery on a barge's itinerary. `order` is 0-based and
/// contiguous within the barge; the depot legs are implicit.
#[derive(Clone, Debug, Serialize)]
pub struct ScheduledStop {
    pub order: usize,
    pub site_id: String,
    pub qty: u32,
    pub arrival_min: Minutes,
    pub departure_min: Minutes,
    pub arrival: civil::DateTime,
    pub departure: civil::DateTime,
}

#[derive(Clone, Debug, Serialize)]
pub struct BargeSchedule {
    pub barge_id: String,
    pub stops: Vec<ScheduledStop>,
    pub total_units: u32,
    pub travel_minutes: Minutes,
    pub waiting_minutes: Minutes,
}

#[derive(Clone, Debug, Serialize)]
pub struct DispatchSchedule {
    pub week_start: civil::Date,
    pub barges: Vec<BargeSchedule>,
}

impl DispatchSchedule {
    pub fn total_units(&self) -> u64 {
        self.barges.iter().map(|b| u64::from(b.total_units)).sum()
    }
}

/// Turns a solved assignment into the per-barge dispatch schedule.
/// Minute offsets count from `week_start` at 00:00.
pub fn extract_schedule(solution: &WorkingSolution, week_start: civil::Date) -> DispatchSchedule {
    let problem = solution.problem();
    let midnight = week_start.at(0, 0, 0, 0);

    let barges = solution
        .routes()
        .iter()
        .map(|route| {
            let stops = route
                .stops()
                .iter()
                .enumerate()
                .map(|(order, &node)| {
                    let arrival_min = route.arrival(order);
                    let departure_min = route.departure(order);
                    ScheduledStop {
                        order,
                        site_id: problem.node(node).site_id().to_string(),
                        qty: problem.demand_units(node),
                        arrival_min,
                        departure_min,
                        arrival: midnight.saturating_add(SignedDuration::from_mins(arrival_min)),
                        departure: midnight
                            .saturating_add(SignedDuration::from_mins(departure_min)),
                    }
                })
                .collect();

            BargeSchedule {
                barge_id: problem.barge(route.barge_id()).barge_id().to_string(),
                stops,
                total_units: route.load_units(),
                travel_minutes: route.travel_minutes(),
                waiting_minutes: route.waiting_minutes(),
            }
        })
        .collect();

    DispatchSchedule { week_start, barges }
}
