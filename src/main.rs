use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod check;
mod highs;
mod post;
mod schedule;
mod scrape;
mod sports;
mod telemetry;
mod util;

#[derive(Parser)]
#[command(name = "highs", about = "Season-high announcements from athletics stats pages")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Check(check::CheckCmd),
    Schedule(schedule::ScheduleCmd),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);

    // initialize logging/tracing (stderr). Respect RUST_LOG and HIGHS_LOG_FORMAT
    telemetry::config::init_tracing();

    match cli.command {
        Commands::Check(args) => check::run(args).await?,
        Commands::Schedule(args) => schedule::run(args).await?,
    }

    Ok(())
}
