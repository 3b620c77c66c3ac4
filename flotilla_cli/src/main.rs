use clap::{Parser, Subcommand};

use crate::plan::PlanArgs;

mod parsers;
mod plan;

#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan one week of barge deliveries from a JSON input file
    Plan {
        #[command(flatten)]
        args: PlanArgs,
    },
}

fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.debug {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .init();

    match cli.command {
        Commands::Plan { args } => plan::run(args),
    }
}
