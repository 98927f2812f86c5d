//! Command-line definition and command handlers for `ride-heap`.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use log::{info, warn};
use ride_heap::{BatchOutcome, HeapConfig, LogDiagnostics, MinHeap, Ride};

use crate::demo::run_demo;
use crate::generate::{generate_records, GeneratorParams};
use crate::input::{load_config, load_records, write_records_json, write_rides_json};
use crate::printer::{render_array, render_schedule, render_tree, Label};

#[derive(Parser, Debug)]
#[command(
    name = "ride-heap",
    about = "Schedule ride requests in a bounded min-heap",
    long_about = "Loads ride requests into a bounded min-heap ordered by departure time,\n\
                  merging rides on the same route that leave within ten minutes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the built-in sample scenario
    Demo,
    /// Load rides from a JSON or CSV file
    Load(LoadArgs),
    /// Write seeded random ride records as JSON
    Generate(GenerateArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct LoadArgs {
    /// Ride file (.json array of records, or .csv with id,time,passengers,start_id,end_id)
    #[arg(long)]
    pub input: PathBuf,
    /// Heap configuration file (JSON)
    #[arg(long, env = "RIDE_HEAP_CONFIG")]
    pub config: Option<PathBuf>,
    /// Override the configured capacity
    #[arg(long)]
    pub capacity: Option<usize>,
    /// Give every ride its own slot
    #[arg(long)]
    pub no_merge: bool,
    /// How to print the heap
    #[arg(value_enum, long, default_value_t = View::Ids)]
    pub view: View,
    /// Sort the heap after loading and print it again
    #[arg(long)]
    pub sort: bool,
    /// Write the rides, in slot order, to this JSON file
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Number of rides
    #[arg(long, default_value_t = 20)]
    pub count: usize,
    /// Random seed
    #[arg(long, default_value_t = 42)]
    pub seed: u64,
    /// Number of distinct pickup/dropoff locations
    #[arg(long, default_value_t = 5)]
    pub locations: i64,
    /// Output file; prints to stdout when omitted
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum View {
    /// One line per slot
    Array,
    /// Tree of ride ids
    Ids,
    /// Tree of departure times
    Times,
    /// Full ride details in slot order
    Schedule,
}

impl View {
    pub fn render(self, slots: &[Option<Ride>]) -> String {
        match self {
            View::Array => render_array(slots),
            View::Ids => render_tree(slots, Label::Id),
            View::Times => render_tree(slots, Label::Time),
            View::Schedule => render_schedule(slots),
        }
    }
}

/// Totals across every batch of a load.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub read: usize,
    pub admitted: usize,
    pub merged: usize,
    pub skipped: usize,
    pub rejected: usize,
}

impl LoadSummary {
    pub fn accepted(&self) -> usize {
        self.admitted + self.merged
    }

    fn absorb(&mut self, outcome: &BatchOutcome) {
        self.admitted += outcome.admitted;
        self.merged += outcome.merged;
        self.skipped += outcome.skipped;
        self.rejected += outcome.rejected.len();
    }
}

pub fn run(cli: Cli, out: &mut impl Write) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Demo => {
            let mut heap = MinHeap::new().with_diagnostics(Box::new(LogDiagnostics));
            run_demo(&mut heap, out)?;
        }
        Commands::Load(args) => {
            run_load(&args, out)?;
        }
        Commands::Generate(args) => run_generate(&args, out)?,
    }
    Ok(())
}

pub fn resolve_config(args: &LoadArgs) -> Result<HeapConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => HeapConfig::default(),
    };
    if let Some(capacity) = args.capacity {
        config = config.with_max_capacity(capacity);
    }
    if args.no_merge {
        config = config.with_consolidation(false);
    }
    config.validate()?;
    Ok(config)
}

/// Loads the input file into a fresh heap and prints it.
///
/// Records are fed in batches of `capacity + 1`, so files longer than the
/// heap still load; the overflow is counted as rejected.
pub fn run_load(
    args: &LoadArgs,
    out: &mut impl Write,
) -> Result<LoadSummary, Box<dyn std::error::Error>> {
    let config = resolve_config(args)?;
    let records = load_records(&args.input)?;
    info!(
        "Loaded {} records from {}",
        records.len(),
        args.input.display()
    );

    let mut heap = MinHeap::with_config(config).with_diagnostics(Box::new(LogDiagnostics));
    let mut summary = LoadSummary {
        read: records.len(),
        ..LoadSummary::default()
    };

    let rides: Vec<Option<Ride>> = records
        .into_iter()
        .map(|record| {
            let ride = record.into_ride();
            if let Some(reason) = ride.invalid_reason() {
                warn!("Skipping ride {}: {reason}", ride.id());
            }
            Some(ride)
        })
        .collect();

    let batch_len = heap.capacity() + 1;
    let mut pending = rides.into_iter().peekable();
    while pending.peek().is_some() {
        let batch: Vec<Option<Ride>> = pending.by_ref().take(batch_len).collect();
        match heap.insert_all(batch) {
            Ok(outcome) => {
                for rejected in &outcome.rejected {
                    warn!("Ride {} refused: {}", rejected.input.id(), rejected.reason);
                }
                summary.absorb(&outcome);
            }
            Err(rejected) => {
                warn!("Batch refused: {}", rejected.reason);
                summary.skipped += rejected.input.len();
            }
        }
    }

    writeln!(
        out,
        "{} records: {} admitted, {} merged, {} skipped, {} rejected ({} of {} slots used)",
        summary.read,
        summary.admitted,
        summary.merged,
        summary.skipped,
        summary.rejected,
        heap.len(),
        heap.capacity()
    )?;
    write!(out, "{}", args.view.render(heap.slots()))?;

    if args.sort {
        writeln!(out, "\nSorted:")?;
        write!(out, "{}", args.view.render(heap.sort()))?;
    }
    if let Some(path) = &args.output {
        write_rides_json(heap.iter(), path)?;
        info!("Wrote {} rides to {}", heap.len(), path.display());
    }
    Ok(summary)
}

pub fn run_generate(
    args: &GenerateArgs,
    out: &mut impl Write,
) -> Result<(), Box<dyn std::error::Error>> {
    let params = GeneratorParams::default()
        .with_count(args.count)
        .with_seed(args.seed)
        .with_locations(args.locations);
    let records = generate_records(params);
    match &args.output {
        Some(path) => {
            write_records_json(&records, path)?;
            info!("Wrote {} records to {}", records.len(), path.display());
        }
        None => {
            serde_json::to_writer_pretty(&mut *out, &records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
