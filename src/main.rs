use anyhow::Result;
use clap::{Parser, Subcommand};

use memstore::{
    inspect::{inspect, InspectArgs},
    instrumentation,
};

#[derive(Parser)]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    #[clap(long)]
    #[clap(help = "Enable chrome tracing")]
    #[clap(long_help = "Enable chrome tracing which on program exit will generate
a json file to be opened with a chrome tracing compatible
viewer.")]
    trace: bool,
    #[clap(short, long, action = clap::ArgAction::Count)]
    #[clap(help = "Log more details to stderr, repeat for more")]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[clap(about = "Create a storage unit and dump its contents")]
    #[clap(aliases = &["i"])]
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _trace_guard = instrumentation::init(instrumentation::verbosity(cli.verbose), cli.trace);

    match &cli.command {
        Command::Inspect(args) => inspect(args),
    }
}
