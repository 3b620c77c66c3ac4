use std::{fs, path::PathBuf};

use anyhow::Context;
use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};
use jiff::civil;
use tracing::{info, warn};

use flotilla_optimizer::{
    error::PlanningError,
    input::PlanInput,
    planner::DispatchPlanner,
    schedule::DispatchSchedule,
    solver::solver_params::SolverParams,
};

use crate::parsers;

#[derive(Args)]
pub struct PlanArgs {
    /// JSON file with demand, site, travel time and barge records
    #[arg(short, long)]
    input: PathBuf,

    /// Monday the planning week starts on, e.g. 2026-04-13
    #[arg(short, long, value_parser = parsers::parse_week)]
    week: civil::Date,

    /// Solver budget (e.g. "30s", "5m", "PT1H30M")
    #[arg(short, long, value_parser = parsers::parse_duration, default_value = "30s")]
    timeout: jiff::SignedDuration,

    /// Write the schedule as JSON to this file
    #[arg(short, long)]
    out: Option<PathBuf>,
}

pub fn run(args: PlanArgs) -> Result<(), anyhow::Error> {
    if args.week.weekday() != civil::Weekday::Monday {
        warn!("{} is not a Monday, planning the week starting there anyway", args.week);
    }

    let raw = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let input: PlanInput = serde_json::from_str(&raw)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    let planner = DispatchPlanner::new(input);
    let schedule = match planner.plan(args.week, SolverParams::with_time_budget(args.timeout)) {
        Ok(schedule) => schedule,
        Err(PlanningError::NoDemand { week_start }) => {
            info!("no demand for the week of {week_start}, nothing to plan");
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    render(&schedule);

    if let Some(out) = args.out {
        let json = serde_json::to_string_pretty(&schedule)?;
        fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
        info!("schedule written to {}", out.display());
    }

    Ok(())
}

fn render(schedule: &DispatchSchedule) {
    println!("Dispatch schedule for the week of {}", schedule.week_start);

    for barge in &schedule.barges {
        if barge.stops.is_empty() {
            println!("\n{}: idle", barge.barge_id);
            continue;
        }

        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "#", "Site", "Units", "Arrival", "Departure",
        ]);

        for stop in &barge.stops {
            table.add_row(vec![
                stop.order.to_string(),
                stop.site_id.clone(),
                stop.qty.to_string(),
                stop.arrival.to_string(),
                stop.departure.to_string(),
            ]);
        }

        println!(
            "\n{} ({} units, {} min travel, {} min waiting)",
            barge.barge_id, barge.total_units, barge.travel_minutes, barge.waiting_minutes
        );
        println!("{table}");
    }

    println!("\nTotal: {} units", schedule.total_units());
}
