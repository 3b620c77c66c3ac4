use crate::problem::{
    Minutes,
    fleet::BargeIdx,
    node::{DEPOT, NodeIdx},
    routing_problem::RoutingProblem,
};

/// One barge's ordered stop sequence with fully propagated times.
///
/// Every constructor re-runs the forward propagation
/// `arrival[i] = max(open[i], departure[i-1] + travel(i-1, i))`,
/// `departure[i] = arrival[i] + service[i]` and rejects the sequence if
/// any arrival misses its window, the cumulative load exceeds the barge
/// capacity, or the return to the depot lands after the barge's working
/// window. A `WorkingRoute` is therefore feasible by construction.
#[derive(Clone, Debug)]
pub struct WorkingRoute {
    barge_id: BargeIdx,
    stops: Vec<NodeIdx>,

    /// Arrival per stop, waiting already absorbed (never before open).
    arrivals: Vec<Minutes>,

    /// Departure per stop: arrival + service.
    departures: Vec<Minutes>,

    load_units: u32,
    travel_minutes: Minutes,
    waiting_minutes: Minutes,
}

impl WorkingRoute {
    pub fn empty(barge_id: BargeIdx) -> Self {
        WorkingRoute {
            barge_id,
            stops: Vec::new(),
            arrivals: Vec::new(),
            departures: Vec::new(),
            load_units: 0,
            travel_minutes: 0,
            waiting_minutes: 0,
        }
    }

    /// Propagates times and loads along `stops`. `None` means the
    /// sequence violates a hard constraint and no route exists.
    pub fn from_stops(
        problem: &RoutingProblem,
        barge_id: BargeIdx,
        stops: Vec<NodeIdx>,
    ) -> Option<Self> {
        let barge = problem.barge(barge_id);

        let mut load_units: u32 = 0;
        for &stop in &stops {
            load_units = load_units.checked_add(problem.demand_units(stop))?;
        }
        if load_units > barge.capacity_units() {
            return None;
        }

        let mut arrivals = Vec::with_capacity(stops.len());
        let mut departures = Vec::with_capacity(stops.len());
        let mut travel_minutes: Minutes = 0;
        let mut waiting_minutes: Minutes = 0;

        // The barge leaves the depot as soon as its working window opens.
        let mut previous = DEPOT;
        let mut previous_departure = barge.working_window().open();

        for &stop in &stops {
            let leg = problem.travel_minutes(previous, stop);
            let reached = previous_departure + leg;
            let window = problem.node(stop).window();

            let arrival = reached.max(window.open());
            if arrival > window.close() {
                return None;
            }

            travel_minutes += leg;
            waiting_minutes += arrival - reached;

            let departure = arrival + problem.service_minutes(stop);
            arrivals.push(arrival);
            departures.push(departure);

            previous = stop;
            previous_departure = departure;
        }

        if let Some(&last) = stops.last() {
            let leg = problem.travel_minutes(last, DEPOT);
            travel_minutes += leg;
            if previous_departure + leg > barge.working_window().close() {
                return None;
            }
        }

        Some(WorkingRoute {
            barge_id,
            stops,
            arrivals,
            departures,
            load_units,
            travel_minutes,
            waiting_minutes,
        })
    }

    /// Candidate route with `node` inserted at `position`.
    pub fn inserting(
        &self,
        problem: &RoutingProblem,
        node: NodeIdx,
        position: usize,
    ) -> Option<Self> {
        debug_assert!(position <= self.stops.len());
        let mut stops = Vec::with_capacity(self.stops.len() + 1);
        stops.extend_from_slice(&self.stops[..position]);
        stops.push(node);
        stops.extend_from_slice(&self.stops[position..]);
        WorkingRoute::from_stops(problem, self.barge_id, stops)
    }

    pub fn barge_id(&self) -> BargeIdx {
        self.barge_id
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn stops(&self) -> &[NodeIdx] {
        &self.stops
    }

    pub fn stop(&self, position: usize) -> NodeIdx {
        self.stops[position]
    }

    pub fn arrival(&self, position: usize) -> Minutes {
        self.arrivals[position]
    }

    pub fn departure(&self, position: usize) -> Minutes {
        self.departures[position]
    }

    pub fn load_units(&self) -> u32 {
        self.load_units
    }

    pub fn travel_minutes(&self) -> Minutes {
        self.travel_minutes
    }

    pub fn waiting_minutes(&self) -> Minutes {
        self.waiting_minutes
    }

    /// Route cost: travel plus waiting, in minutes.
    pub fn cost(&self) -> Minutes {
        self.travel_minutes + self.waiting_minutes
    }

    /// Directed arcs used by this route, depot legs included. Empty
    /// routes use no arcs.
    pub fn arcs(&self) -> impl Iterator<Item = (NodeIdx, NodeIdx)> + '_ {
        let first = self.stops.first().map(|&stop| (DEPOT, stop));
        let last = self.stops.last().map(|&stop| (stop, DEPOT));
        first
            .into_iter()
            .chain(self.stops.windows(2).map(|pair| (pair[0], pair[1])))
            .chain(last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{problem_with, test_barge, test_barge_with_window};

    const B0: BargeIdx = BargeIdx::new(0);

    fn node(index: usize) -> NodeIdx {
        NodeIdx::new(index)
    }

    #[test]
    fn propagates_arrivals_and_departures() {
        let problem = problem_with(
            &[("S1", 10, 100, 1000, 20), ("S2", 10, 0, 1000, 15)],
            &[
                ("PORT0", "S1", 60),
                ("S1", "S2", 30),
                ("S2", "PORT0", 45),
                ("S1", "PORT0", 60),
                ("PORT0", "S2", 45),
            ],
            vec![test_barge("B1", 100)],
        );

        let route =
            WorkingRoute::from_stops(&problem, B0, vec![node(1), node(2)]).expect("feasible");

        // Departs at 0, reaches S1 at 60, waits until its 100 open.
        assert_eq!(route.arrival(0), 100);
        assert_eq!(route.departure(0), 120);
        assert_eq!(route.arrival(1), 150);
        assert_eq!(route.departure(1), 165);
        assert_eq!(route.waiting_minutes(), 40);
        assert_eq!(route.travel_minutes(), 60 + 30 + 45);
        assert_eq!(route.load_units(), 20);
    }

    #[test]
    fn rejects_arrival_after_close() {
        let problem = problem_with(
            &[("S1", 10, 0, 50, 20)],
            &[("PORT0", "S1", 60), ("S1", "PORT0", 60)],
            vec![test_barge("B1", 100)],
        );

        assert!(WorkingRoute::from_stops(&problem, B0, vec![node(1)]).is_none());
    }

    #[test]
    fn rejects_overloaded_route() {
        let problem = problem_with(
            &[("S1", 40, 0, 10080, 10), ("S2", 40, 0, 10080, 10)],
            &[
                ("PORT0", "S1", 30),
                ("S1", "S2", 30),
                ("S2", "PORT0", 30),
                ("S1", "PORT0", 30),
                ("PORT0", "S2", 30),
            ],
            vec![test_barge("B1", 50)],
        );

        assert!(WorkingRoute::from_stops(&problem, B0, vec![node(1)]).is_some());
        assert!(WorkingRoute::from_stops(&problem, B0, vec![node(1), node(2)]).is_none());
    }

    #[test]
    fn rejects_return_after_working_window() {
        // Working 08:00-10:00; the round trip alone takes 150 minutes.
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 30)],
            &[("PORT0", "S1", 60), ("S1", "PORT0", 60)],
            vec![test_barge_with_window("B1", 100, 480, 600)],
        );

        assert!(WorkingRoute::from_stops(&problem, B0, vec![node(1)]).is_none());
    }

    #[test]
    fn departure_waits_for_working_window_start() {
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 30)],
            &[("PORT0", "S1", 60), ("S1", "PORT0", 60)],
            vec![test_barge_with_window("B1", 100, 480, 1200)],
        );

        let route = WorkingRoute::from_stops(&problem, B0, vec![node(1)]).expect("feasible");
        assert_eq!(route.arrival(0), 540);
    }

    #[test]
    fn empty_route_is_feasible_and_free() {
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 30)],
            &[("PORT0", "S1", 60), ("S1", "PORT0", 60)],
            vec![test_barge("B1", 100)],
        );

        let route = WorkingRoute::from_stops(&problem, B0, vec![]).expect("feasible");
        assert_eq!(route.cost(), 0);
        assert_eq!(route.arcs().count(), 0);
    }

    #[test]
    fn arcs_include_depot_legs() {
        let problem = problem_with(
            &[("S1", 10, 0, 10080, 10), ("S2", 10, 0, 10080, 10)],
            &[
                ("PORT0", "S1", 30),
                ("S1", "S2", 30),
                ("S2", "PORT0", 30),
                ("S1", "PORT0", 30),
                ("PORT0", "S2", 30),
            ],
            vec![test_barge("B1", 100)],
        );

        let route = WorkingRoute::from_stops(&problem, B0, vec![node(1), node(2)]).unwrap();
        let arcs: Vec<_> = route.arcs().collect();
        assert_eq!(
            arcs,
            vec![(DEPOT, node(1)), (node(1), node(2)), (node(2), DEPOT)]
        );
    }
}
