//! Runs a command stream through the robowar engine and prints a line
//! `D <team> <robot>` for every robot destroyed, in the order it happens.

#[macro_use] extern crate failure;
#[macro_use] extern crate log;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{Parser, ValueEnum};
use failure::Error;
use robowar_engine::{Config, Record, RobotWorld};

mod logging;
mod parse;

use parse::{ParseError, TextRecords};

/// Simulates combat robots under a timestamped command stream.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File to read records from. Reads standard input when absent.
    input: Option<PathBuf>,

    /// How the records are written.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable verbose logging, including every ignored command
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// A record count, then `time tag team robot operand` per record.
    /// Records are processed as they arrive.
    Text,
    /// A JSON array of records, processed once the whole array is read.
    Json,
}

fn read_input(path: Option<&PathBuf>) -> Result<String, Error> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut input = String::new();
            io::stdin().read_to_string(&mut input)?;
            Ok(input)
        },
    }
}

/// Feeds one record to the world and writes out what it destroyed. The
/// lines are flushed straight away, so a reader on the other end of a pipe
/// sees them before the next record arrives.
fn step<W: Write>(world: &mut RobotWorld, record: &Record, out: &mut W) -> Result<(), Error> {
    let events = world.process(record);
    if events.is_empty() {
        return Ok(());
    }
    for event in events {
        writeln!(out, "{}", event)?;
    }
    out.flush()?;
    Ok(())
}

/// Runs text records through the world as they are read. Returns how many
/// were processed.
fn run_text<R: BufRead, W: Write>(reader: R, world: &mut RobotWorld, out: &mut W)
                                  -> Result<usize, Error> {
    let mut records = TextRecords::new(reader)?;
    let mut processed = 0;
    for record in records.by_ref() {
        match record {
            Ok(record) => {
                step(world, &record, out)?;
                processed += 1;
            },
            Err(e @ ParseError::Unreadable { .. }) => return Err(e.into()),
            Err(e) => warn!("skipping record: {}", e),
        }
    }
    if records.remaining() > 0 {
        warn!("input ended with {} announced records missing", records.remaining());
    }
    Ok(processed)
}

fn run(args: &Args) -> Result<(), Error> {
    let config = if args.verbose { Config::verbose() } else { Config::quiet() };
    let mut world = RobotWorld::with_config(config);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let processed = match args.format {
        Format::Text => match args.input {
            Some(ref path) => run_text(BufReader::new(File::open(path)?), &mut world, &mut out)?,
            None => {
                let stdin = io::stdin();
                let reader = stdin.lock();
                run_text(reader, &mut world, &mut out)?
            },
        },
        Format::Json => {
            let input = read_input(args.input.as_ref())?;
            let records = parse::json_records(&input)?;
            for record in &records {
                step(&mut world, record, &mut out)?;
            }
            records.len()
        },
    };

    debug!("processed {} records; {} robots live, {} dead at t={}",
           processed, world.live_count(), world.dead_count(), world.time());
    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(&args) {
        error!("{}", e);
        process::exit(1);
    }
}
