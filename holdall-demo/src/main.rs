//!
//! Walks through the holdall containers, one scenario per container.
//!
#![warn(missing_docs)]

use clap::{ArgEnum, Parser};
use holdall_core::ContainerError;
use log::{LevelFilter, Log, Metadata, Record};

mod any;
mod nullable;
mod variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ArgEnum)]
enum Scenario {
    Nullable,
    Variant,
    Any,
    All,
}

#[derive(Debug, Clone, PartialEq, Parser)]
#[clap(about, author)]
struct Options {
    /// Which container to walk through.
    #[clap(long, short, arg_enum, default_value = "all")]
    scenario: Scenario,

    /// Print the containers' trace output to stderr.
    #[clap(long, short)]
    verbose: bool,
}

/// Writes every record to stderr.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _: &Metadata) -> bool {
        true
    }

    fn log(&self, record: &Record) {
        eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Prints a container failure the walk-through expects, and carries on.
fn report(error: &ContainerError) {
    println!("  {}: {}", error.kind(), error);
}

fn main() -> anyhow::Result<()> {
    let opts = Options::parse();

    if opts.verbose {
        log::set_logger(&LOGGER).map_err(|err| anyhow::anyhow!("could not install the logger: {}", err))?;
        log::set_max_level(LevelFilter::Trace);
    }

    let all = opts.scenario == Scenario::All;
    if all || opts.scenario == Scenario::Nullable {
        nullable::run()?;
    }
    if all || opts.scenario == Scenario::Variant {
        variant::run()?;
    }
    if all || opts.scenario == Scenario::Any {
        any::run()?;
    }

    Ok(())
}
