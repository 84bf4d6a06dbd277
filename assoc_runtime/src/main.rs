//! Ingestion CLI.
//!
//!   assoc_runtime <sheet> [--config file.json] [--json out.json] [--select male|female|both]
//!
//! Reads the sheet, builds the association dictionary and the incidence
//! graph, prints the graph table and its fingerprint.

use std::path::PathBuf;
use std::process;

use assoc_graph::hashing::fingerprint;
use assoc_runtime::config::IngestConfig;
use assoc_runtime::dictionary::{build_graph, export_to_file, Selection};
use assoc_runtime::error::IngestError;
use assoc_runtime::ingest::build_dictionary;
use assoc_runtime::sheet::read_rows_from_file;

struct Args {
    sheet: PathBuf,
    config: Option<PathBuf>,
    json: Option<PathBuf>,
    selection: Selection,
}

fn parse_args() -> Result<Args, String> {
    let mut sheet = None;
    let mut config = None;
    let mut json = None;
    let mut selection = Selection::default();

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => config = Some(PathBuf::from(flag_value(&mut args, "--config")?)),
            "--json" => json = Some(PathBuf::from(flag_value(&mut args, "--json")?)),
            "--select" => selection = flag_value(&mut args, "--select")?.parse()?,
            flag if flag.starts_with("--") => return Err(format!("unknown flag {}", flag)),
            path if sheet.is_none() => sheet = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument {:?}", extra)),
        }
    }

    Ok(Args {
        sheet: sheet.ok_or("missing <sheet> argument")?,
        config,
        json,
        selection,
    })
}

fn flag_value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    args.next().ok_or_else(|| format!("{} requires a value", flag))
}

fn run(args: Args) -> Result<(), IngestError> {
    let config = match &args.config {
        Some(path) => IngestConfig::from_json_file(path)?,
        None => IngestConfig::default(),
    };

    let rows = read_rows_from_file(&args.sheet, config.delimiter)?;
    let dict = build_dictionary(&rows, &config)?;
    if let Some(path) = &args.json {
        export_to_file(&dict, path)?;
        println!("Dictionary written to: {}", path.display());
    }

    let graph = build_graph(&dict, args.selection)?;
    println!("{}", graph);
    println!();
    println!(
        "Incentives: {}  Reactions: {}  Selection: {}",
        graph.incentive_count(),
        graph.reaction_count(),
        args.selection
    );
    println!("Fingerprint: {}", fingerprint(&graph));
    Ok(())
}

fn main() {
    let args = match parse_args() {
        Ok(args) => args,
        Err(msg) => {
            eprintln!("{}", msg);
            eprintln!(
                "usage: assoc_runtime <sheet> [--config file.json] [--json out.json] \
                 [--select male|female|both]"
            );
            process::exit(2);
        }
    };
    if let Err(err) = run(args) {
        eprintln!("[FAIL] {}", err);
        process::exit(1);
    }
}
