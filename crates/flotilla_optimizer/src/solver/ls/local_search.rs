use rayon::prelude::*;
use tracing::{Level, instrument, trace};

use crate::problem::{Minutes, fleet::BargeIdx, routing_problem::RoutingProblem};

use crate::solver::solution::working_solution::WorkingSolution;

use super::{
    r#move::{EvaluatedMove, LocalSearchOperator},
    penalty::ArcPenalties,
    relocate::RelocateOperator,
    swap::SwapOperator,
    two_opt::TwoOptOperator,
};

/// Best-improvement local search over every route pair.
///
/// Each pass evaluates all operators on all ordered route pairs (the
/// diagonal carries the intra-route operators), picks the single best
/// move under the penalized objective and applies it. Pairs are
/// evaluated in parallel but reduced in a fixed order, so the search is
/// deterministic for a given problem.
pub struct LocalSearch {
    pairs: Vec<(BargeIdx, BargeIdx)>,
}

impl LocalSearch {
    pub fn new(problem: &RoutingProblem) -> Self {
        let mut pairs = Vec::new();
        for r1 in problem.fleet().indices() {
            for r2 in problem.fleet().indices() {
                pairs.push((r1, r2));
            }
        }

        LocalSearch { pairs }
    }

    /// Applies the best improving move, if any. Returns the raw cost
    /// delta of the applied move; `None` means the solution is locally
    /// optimal under the current penalties.
    #[instrument(skip_all, level = Level::DEBUG)]
    pub fn improve_once(
        &self,
        solution: &mut WorkingSolution,
        penalties: &ArcPenalties,
    ) -> Option<Minutes> {
        let candidates: Vec<Option<EvaluatedMove>> = self
            .pairs
            .par_iter()
            .map(|&pair| best_move_for_pair(solution, penalties, pair))
            .collect();

        let mut best: Option<EvaluatedMove> = None;
        for candidate in candidates.into_iter().flatten() {
            if best
                .as_ref()
                .is_none_or(|b| candidate.penalized_delta < b.penalized_delta)
            {
                best = Some(candidate);
            }
        }

        let best = best.filter(|m| m.penalized_delta < 0)?;

        trace!(
            operator = best.operator,
            raw_delta = best.raw_delta,
            penalized_delta = best.penalized_delta,
            "applying move"
        );

        let raw_delta = best.raw_delta;
        best.apply(solution);
        Some(raw_delta)
    }
}

fn best_move_for_pair(
    solution: &WorkingSolution,
    penalties: &ArcPenalties,
    pair: (BargeIdx, BargeIdx),
) -> Option<EvaluatedMove> {
    let mut best: Option<EvaluatedMove> = None;
    collect_best::<RelocateOperator>(solution, penalties, pair, &mut best);
    collect_best::<SwapOperator>(solution, penalties, pair, &mut best);
    collect_best::<TwoOptOperator>(solution, penalties, pair, &mut best);
    best
}

fn collect_best<O: LocalSearchOperator>(
    solution: &WorkingSolution,
    penalties: &ArcPenalties,
    pair: (BargeIdx, BargeIdx),
    best: &mut Option<EvaluatedMove>,
) {
    O::generate_moves(solution, pair, |op| {
        if let Some(eval) = op.evaluate(solution, penalties) {
            if best
                .as_ref()
                .is_none_or(|b| eval.penalized_delta < b.penalized_delta)
            {
                *best = Some(eval);
            }
        }
    });
}
