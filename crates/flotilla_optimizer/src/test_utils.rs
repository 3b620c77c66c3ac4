use std::sync::Arc;

use crate::{
    input::TravelTimeRecord,
    problem::{
        Minutes,
        fleet::{Barge, Fleet},
        node::Node,
        routing_problem::{RoutingProblem, RoutingProblemBuilder},
        time_window::TimeWindow,
        travel_time_matrix::TravelTimeMatrix,
    },
};

/// Barge with a full-horizon working window and a loading rate fast
/// enough that service times stay at the site minimum.
pub fn test_barge(barge_id: &str, capacity_units: u32) -> Barge {
    Barge::new(barge_id, capacity_units, TimeWindow::full_horizon(), 100.0)
}

pub fn test_barge_with_window(
    barge_id: &str,
    capacity_units: u32,
    open: Minutes,
    close: Minutes,
) -> Barge {
    Barge::new(barge_id, capacity_units, TimeWindow::new(open, close), 100.0)
}

/// Builds a problem from `(site_id, demand, open, close, service)` tuples
/// and `(from, to, minutes)` edges. The depot `PORT0` is synthesized at
/// index 0; node indices follow the tuple order.
pub fn problem_with(
    sites: &[(&str, u32, Minutes, Minutes, Minutes)],
    edges: &[(&str, &str, Minutes)],
    barges: Vec<Barge>,
) -> Arc<RoutingProblem> {
    let mut nodes = vec![Node::depot("PORT0")];
    for &(site_id, demand, open, close, service) in sites {
        nodes.push(Node::new(
            site_id,
            demand,
            service,
            TimeWindow::new(open, close),
        ));
    }

    let site_ids: Vec<&str> = nodes.iter().map(|node| node.site_id()).collect();
    let records: Vec<TravelTimeRecord> = edges
        .iter()
        .map(|&(from, to, minutes)| TravelTimeRecord {
            from_site: from.to_string(),
            to_site: to.to_string(),
            travel_minutes: minutes,
        })
        .collect();

    let (matrix, warnings) = TravelTimeMatrix::from_edges(&site_ids, &records);

    let mut builder = RoutingProblemBuilder::default();
    builder
        .set_nodes(nodes)
        .set_matrix(matrix)
        .set_fleet(Fleet::new(barges).unwrap())
        .add_warnings(warnings);

    Arc::new(builder.build())
}

/// Symmetric edge helper: one entry per unordered pair, expanded both ways.
pub fn symmetric_edges<'a>(
    pairs: &[(&'a str, &'a str, Minutes)],
) -> Vec<(&'a str, &'a str, Minutes)> {
    pairs
        .iter()
        .flat_map(|&(a, b, minutes)| [(a, b, minutes), (b, a, minutes)])
        .collect()
}
