use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

mod platform;

use platform::logging::LogDestination;

#[derive(Parser, Debug)]
#[command(
    name = "listings",
    about = "Browse an infinitely scrolling feed of classified listings"
)]
struct Args {
    /// RON config file; defaults are used when it does not exist
    #[arg(long, value_name = "FILE", default_value = "listings.ron")]
    config: PathBuf,

    /// Seed for reproducible synthetic listings
    #[arg(long)]
    seed: Option<u64>,

    /// Where log output goes
    #[arg(long, value_enum, default_value_t = LogDestination::File)]
    log: LogDestination,
}

fn main() -> Result<()> {
    let args = Args::parse();
    platform::run_app(&args.config, args.seed, args.log)
}
