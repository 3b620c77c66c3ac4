use fxhash::FxHashMap;
use tracing::warn;

use crate::{error::BuildWarning, input::TravelTimeRecord};

use super::{Minutes, node::NodeIdx};

/// Cost of an arc with no supplied travel time. Large enough that the
/// solver avoids the arc whenever any window or working-hour bound is in
/// play, without failing the build.
pub const MISSING_EDGE_MINUTES: Minutes = 9999;

/// Flat `n x n` matrix of travel minutes, indexed
/// `from * num_nodes + to`. The diagonal is always zero regardless of any
/// supplied self-edges.
#[derive(Debug)]
pub struct TravelTimeMatrix {
    minutes: Vec<Minutes>,
    num_nodes: usize,
}

impl TravelTimeMatrix {
    /// Builds the matrix for `site_ids` (depot first). Pairs absent from
    /// `edges` get the sentinel cost; absent depot<->site pairs are also
    /// reported as warnings, matching the error taxonomy.
    pub fn from_edges(
        site_ids: &[&str],
        edges: &[TravelTimeRecord],
    ) -> (Self, Vec<BuildWarning>) {
        let num_nodes = site_ids.len();
        let index_of: FxHashMap<&str, usize> = site_ids
            .iter()
            .enumerate()
            .map(|(index, &id)| (id, index))
            .collect();

        let mut minutes = vec![MISSING_EDGE_MINUTES; num_nodes * num_nodes];
        let mut supplied = vec![false; num_nodes * num_nodes];

        for edge in edges {
            let (Some(&from), Some(&to)) = (
                index_of.get(edge.from_site.as_str()),
                index_of.get(edge.to_site.as_str()),
            ) else {
                continue;
            };

            minutes[from * num_nodes + to] = edge.travel_minutes.max(0);
            supplied[from * num_nodes + to] = true;
        }

        for i in 0..num_nodes {
            minutes[i * num_nodes + i] = 0;
        }

        let mut warnings = Vec::new();
        for site in 1..num_nodes {
            for (from, to) in [(0, site), (site, 0)] {
                if !supplied[from * num_nodes + to] {
                    let warning = BuildWarning::MissingEdge {
                        from: site_ids[from].to_string(),
                        to: site_ids[to].to_string(),
                    };
                    warn!("{warning}");
                    warnings.push(warning);
                }
            }
        }

        (
            TravelTimeMatrix { minutes, num_nodes },
            warnings,
        )
    }

    #[inline(always)]
    pub fn travel_minutes(&self, from: NodeIdx, to: NodeIdx) -> Minutes {
        self.minutes[from.get() * self.num_nodes + to.get()]
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }
}
