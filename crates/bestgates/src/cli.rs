use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Minimum XOR-gate circuits for subfield S-box basis changes
#[derive(Parser, Debug)]
#[command(name = "bestgates")]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Command {
    /// Find the cheapest shared-XOR circuit for each basis record
    Optimize(OptimizeCommand),
    /// Check that the matrices of each basis record agree with each other
    Check(InputArgs),
    /// Print the S-box tables computed in the tower field
    Sbox,
}

#[derive(Args, Debug)]
pub(crate) struct InputArgs {
    /// Basis record file; records are read from stdin when omitted
    #[arg(value_name = "INPUT")]
    pub(crate) input: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct OptimizeCommand {
    #[command(flatten)]
    pub(crate) input: InputArgs,

    /// Spread the first level of the search over all cores
    #[arg(long)]
    pub(crate) parallel: bool,

    /// Show a spinner with the pair being searched
    #[arg(long)]
    pub(crate) progress: bool,

    /// Verbose output
    #[arg(short, long, help = "Report gate counts and search time per pair")]
    pub(crate) verbose: bool,

    /// Compare every result against the unpruned search
    #[arg(
        long = "cross-check",
        help = "Also run the exhaustive search and reject records that disagree (narrow inputs only)"
    )]
    pub(crate) cross_check: bool,
}

impl Cli {
    /// Parse command line arguments
    pub(crate) fn parse_args() -> Self {
        Cli::parse()
    }
}
