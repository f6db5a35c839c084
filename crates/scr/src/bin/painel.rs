//! SCR delinquency panel CLI tool.
//!
//! Loads one segmentation scheme from a directory of CSV tables, folds the
//! states outside the top N into "demais UFs" and prints the series of one
//! state, or the per-state totals, scaled to the chosen unit. Logging goes to
//! stderr, filtered by `RUST_LOG` (default `warn`).
//!
//! Usage: `cargo run --bin painel --features cli -- --data DIR [options]`
//! Example: `cargo run --bin painel --features cli -- --data dados --top 3 --drop-br --uf SP`

use std::{env, path::PathBuf, process};

use scr::{
    period::ResampleConfig,
    primitives::{ACTIVE_PORTFOLIO, ColumnMap, Granularity, ScaleUnit, SegmentScheme, Uf},
    reshape::{LongTable, ReshapeCache, ReshapeConfig, SegmentLabels, wrap_label},
    storage::{CsvTableSource, TableStore},
};
use tracing_subscriber::EnvFilter;

/// Default number of states kept individually.
const DEFAULT_TOP_N: usize = 5;

const USAGE: &str = "\
Usage: painel --data DIR [--scheme modalidade|ocupacao|porte]
              [--granularity ano_mes|trimestre] [--trim]
              [--top N|all] [--drop-br] [--acronyms]
              [--uf UF] [--unit unidade|milhão|bilhão|trilhão]";

/// Parsed command-line options.
#[derive(Debug)]
struct Args {
    data: PathBuf,
    scheme: SegmentScheme,
    granularity: Granularity,
    trim: bool,
    top_n_states: Option<usize>,
    drop_nationwide: bool,
    acronyms: bool,
    uf: Option<Uf>,
    unit: ScaleUnit,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{USAGE}");
        return;
    }

    let args = match parse_args(&args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}\n\n{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut data = None;
    let mut parsed = Args {
        data: PathBuf::new(),
        scheme: SegmentScheme::Modality,
        granularity: Granularity::default(),
        trim: false,
        top_n_states: Some(DEFAULT_TOP_N),
        drop_nationwide: false,
        acronyms: false,
        uf: None,
        unit: ScaleUnit::Billion,
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        let mut value = || iter.next().ok_or_else(|| format!("missing value for {flag}"));
        match flag.as_str() {
            "--data" => data = Some(PathBuf::from(value()?)),
            "--scheme" => parsed.scheme = value()?.parse().map_err(|e| format!("{e}"))?,
            "--granularity" => parsed.granularity = value()?.parse().map_err(|e| format!("{e}"))?,
            "--top" => {
                let top = value()?;
                parsed.top_n_states = if top == "all" {
                    None
                } else {
                    Some(top.parse().map_err(|_| format!("invalid --top value: {top}"))?)
                };
            }
            "--uf" => parsed.uf = Some(Uf::new(value()?.to_uppercase())),
            "--unit" => parsed.unit = ScaleUnit::from_label_or_unit(value()?),
            "--trim" => parsed.trim = true,
            "--drop-br" => parsed.drop_nationwide = true,
            "--acronyms" => parsed.acronyms = true,
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    parsed.data = data.ok_or("--data is required")?;
    Ok(parsed)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let source = CsvTableSource::new(&args.data);
    let mut store = TableStore::with_columns(source, ColumnMap::for_scheme(args.scheme));
    let table = store.get(args.scheme)?;

    let config = ReshapeConfig {
        top_n_states: args.top_n_states,
        drop_nationwide: args.drop_nationwide,
        resample: ResampleConfig {
            granularity: args.granularity,
            drop_incomplete_quarters: args.trim,
        },
        segment_labels: args.acronyms.then(SegmentLabels::acronyms),
        columns: table.columns().clone(),
        ..Default::default()
    };

    let mut cache = ReshapeCache::new();
    let long = cache.get_or_reshape(table.id(), table.frame(), &config)?;
    let long = long.scaled(args.unit)?;

    print_header(&long, args)?;

    let view = match &args.uf {
        Some(uf) => long.state_series(uf)?,
        None => long.totals_by_state()?,
    };
    if view.height() == 0 {
        println!("No rows for the selected parameters.");
    } else {
        println!("{view}");
    }

    Ok(())
}

fn print_header(long: &LongTable, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let order = long.state_order(ACTIVE_PORTFOLIO)?;
    let states: Vec<&str> = order.iter().map(Uf::as_str).collect();

    println!("Scheme:      {}", args.scheme);
    println!("Granularity: {}", long.granularity());
    println!("Unit:        {}", args.unit.label());
    println!("States:      {}", states.join(", "));

    let mut segments: Vec<&str> = Vec::new();
    for segment in long.frame().column(long.segment_column())?.str()?.into_iter().flatten() {
        if !segments.contains(&segment) {
            segments.push(segment);
        }
    }
    println!("Segments:");
    for segment in segments {
        println!("  {}", wrap_label(segment).replace('\n', "\n  "));
    }
    println!();

    Ok(())
}
