//! Subcommand drivers.  Each reads basis records line by line, writes its
//! report to `out` and sends diagnostics to stderr.

use std::io::{BufRead, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, bail, ensure};
use indicatif::{ProgressBar, ProgressStyle};
use xorshare_basis::{BasisRecord, MatrixPair, failed_checks, tower};
use xorshare_gates::{CircuitState, Optimizer, exhaustive_min_gates, reconstruct};

use crate::report;

#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct OptimizeOptions {
    pub(crate) parallel: bool,
    pub(crate) progress: bool,
    pub(crate) verbose: bool,
    pub(crate) cross_check: bool,
}

/// Record counts of a finished run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RunSummary {
    pub(crate) accepted: usize,
    pub(crate) rejected: usize,
}

impl RunSummary {
    /// Fails when any record was rejected.
    pub(crate) fn ensure_clean(self) -> anyhow::Result<()> {
        if self.rejected > 0 {
            bail!(
                "{} of {} records rejected",
                self.rejected,
                self.accepted + self.rejected
            );
        }
        Ok(())
    }
}

/// Spinner on stderr when enabled, plain stderr lines otherwise.
#[derive(Debug)]
struct Status {
    bar: Option<ProgressBar>,
}

impl Status {
    fn new(enabled: bool) -> anyhow::Result<Self> {
        if !enabled {
            return Ok(Self { bar: None });
        }
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        Ok(Self { bar: Some(pb) })
    }

    fn message(&self, msg: String) {
        if let Some(pb) = &self.bar {
            pb.set_message(msg);
        }
    }

    fn note(&self, msg: String) {
        match &self.bar {
            Some(pb) => pb.println(msg),
            None => eprintln!("{msg}"),
        }
    }

    fn finish(&self, summary: RunSummary) {
        if let Some(pb) = &self.bar {
            pb.finish_with_message(format!(
                "{} records optimized, {} rejected",
                summary.accepted, summary.rejected
            ));
        }
    }
}

/// Runs `f` on every record of `input`.  Records that fail to parse, or for
/// which `f` fails, are reported as `line N: <error>` and counted as
/// rejected; the remaining records still run.
fn for_each_record(
    input: impl BufRead,
    status: &Status,
    mut f: impl FnMut(&BasisRecord) -> anyhow::Result<()>,
) -> anyhow::Result<RunSummary> {
    let mut summary = RunSummary::default();
    for (index, line) in input.lines().enumerate() {
        let line = line.context("failed to read input")?;
        let Some(record) = BasisRecord::parse_line(&line) else {
            continue;
        };
        match record.map_err(anyhow::Error::from).and_then(|r| f(&r)) {
            Ok(()) => summary.accepted += 1,
            Err(err) => {
                status.note(format!("line {}: {err:#}", index + 1));
                summary.rejected += 1;
            }
        }
    }
    Ok(summary)
}

pub(crate) fn optimize(
    input: impl BufRead,
    out: &mut impl Write,
    options: OptimizeOptions,
) -> anyhow::Result<RunSummary> {
    let optimizer = Optimizer::new().parallel(options.parallel);
    let status = Status::new(options.progress)?;

    let summary = for_each_record(input, &status, |record| {
        // Buffered so a rejected record leaves no partial report behind.
        let mut buf = Vec::new();
        write_record(&mut buf, record, &optimizer, options, &status)?;
        out.write_all(&buf)?;
        out.flush()?;
        Ok(())
    })?;

    status.finish(summary);
    Ok(summary)
}

fn write_record(
    out: &mut Vec<u8>,
    record: &BasisRecord,
    optimizer: &Optimizer<'_>,
    options: OptimizeOptions,
    status: &Status,
) -> anyhow::Result<()> {
    report::write_header(out, record.id)?;

    let mut gates = [0; 2];
    for (slot, pair) in gates.iter_mut().zip(record.pairs()) {
        let name = format!("basis #{} {}/{}", record.id, pair.low_tag, pair.high_tag);
        status.message(name.clone());

        let baseline = CircuitState::new(&pair.columns);
        report::write_state(out, &pair, &baseline, false)?;

        let started = Instant::now();
        let best = optimize_pair(&pair, optimizer)?;
        if options.verbose {
            status.note(format!(
                "{name}: {} -> {} gates, {} columns in {:.2?}",
                baseline.gates(),
                best.gates(),
                best.num_columns(),
                started.elapsed()
            ));
        }

        if options.cross_check {
            let expected = exhaustive_min_gates(&pair.columns, optimizer.gains());
            ensure!(
                best.gates() == expected,
                "{name}: search found {} gates, exhaustive search {expected}",
                best.gates()
            );
        }

        report::write_state(out, &pair, &best, true)?;
        *slot = best.gates();
    }

    report::write_summary(out, record.id, gates)?;
    Ok(())
}

/// Optimizes `pair` and rebuilds the result from its merge history, so the
/// printed columns are the ones the history produces.
fn optimize_pair(pair: &MatrixPair, optimizer: &Optimizer<'_>) -> anyhow::Result<CircuitState> {
    let mut state = CircuitState::new(&pair.columns);
    optimizer.optimize(&mut state);

    let history: Vec<_> = state.merges().iter().map(|m| (m.lo(), m.hi())).collect();
    let replayed = reconstruct(&pair.columns, &history, optimizer.gains())
        .context("merge history does not replay")?;
    ensure!(
        replayed.columns() == state.columns() && replayed.gates() == state.gates(),
        "replayed merge history disagrees with the search"
    );
    Ok(replayed)
}

/// Reports, per record, whether its four matrices agree.  Inconsistent records
/// count as rejected.
pub(crate) fn check(input: impl BufRead, out: &mut impl Write) -> anyhow::Result<RunSummary> {
    let status = Status::new(false)?;
    for_each_record(input, &status, |record| {
        let failed = failed_checks(record);
        if failed.is_empty() {
            writeln!(out, "basis #{:3}: consistent", record.id)?;
            return Ok(());
        }
        let names: Vec<_> = failed.iter().map(ToString::to_string).collect();
        writeln!(out, "basis #{:3}: failed {}", record.id, names.join(", "))?;
        bail!("basis #{} is inconsistent", record.id)
    })
}

/// Prints the forward and inverse S-box computed in the tower field.
pub(crate) fn sbox(out: &mut impl Write) -> anyhow::Result<()> {
    let (forward, inverse) = tower::tables();
    report::write_c_table(out, "S", &forward)?;
    report::write_c_table(out, "Si", &inverse)?;
    Ok(())
}
