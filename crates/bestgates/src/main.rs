//! `bestgates`: shared-XOR circuits for the basis changes of a subfield
//! AES S-box.

mod cli;
mod report;
mod run;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::Context;
use cli::{Cli, Command, InputArgs};
use run::OptimizeOptions;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

// Only used by the integration tests.
#[cfg(test)]
use assert_cmd as _;
#[cfg(test)]
use predicates as _;
#[cfg(test)]
use tempfile as _;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse_args();
    let mut out = io::stdout().lock();

    match args.command {
        Command::Optimize(cmd) => {
            let options = OptimizeOptions {
                parallel: cmd.parallel,
                progress: cmd.progress,
                verbose: cmd.verbose,
                cross_check: cmd.cross_check,
            };
            let input = open_input(&cmd.input)?;
            run::optimize(input, &mut out, options)?.ensure_clean()
        }
        Command::Check(cmd) => {
            let input = open_input(&cmd)?;
            run::check(input, &mut out)?.ensure_clean()
        }
        Command::Sbox => run::sbox(&mut out),
    }
}

fn open_input(args: &InputArgs) -> anyhow::Result<Box<dyn BufRead>> {
    match args.input.as_deref() {
        Some(path) => open_file(path),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn open_file(path: &Path) -> anyhow::Result<Box<dyn BufRead>> {
    let file =
        File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(Box::new(BufReader::new(file)))
}
