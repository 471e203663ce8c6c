//! Batch multiple primary classifier.
//!
//! Usage: `mph <pairs.csv> [--lenient]`
//!
//! Reads tumor pairs from a CSV file and writes one JSON outcome per line
//! to stdout.

mod input;

use std::collections::HashMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::sync::Arc;

use mph_engine::MphEngine;
use mph_loader::{LoaderConfig, ReferenceData};
use mph_types::{ClassificationOutcome, ComputeOptions, MpResult};
use rayon::prelude::*;
use serde::Serialize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Serialize)]
struct OutputLine<'a> {
    row: usize,
    #[serde(flatten)]
    outcome: &'a ClassificationOutcome,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let input_path = args.next().ok_or("usage: mph <pairs.csv> [--lenient]")?;
    let options = match args.next().as_deref() {
        Some("--lenient") => ComputeOptions::lenient(),
        Some(other) => return Err(format!("unknown option: {other}").into()),
        None => ComputeOptions::default(),
    };

    // Get data path from env or use the embedded tables
    let config = match std::env::var("MPH_DATA_PATH") {
        Ok(path) => {
            tracing::info!("Loading reference data from: {}", path);
            LoaderConfig::from_dir(path)
        }
        Err(_) => {
            tracing::info!("Using embedded reference data");
            LoaderConfig::default()
        }
    };
    let data = ReferenceData::load(&config)?;
    let engine = MphEngine::new(Arc::new(data))?;
    tracing::info!("Engine ready with {} rule groups", engine.groups().len());

    let pairs = input::read_pairs(File::open(&input_path)?)?;
    tracing::info!("Classifying {} tumor pairs from {}", pairs.len(), input_path);

    let outcomes: Vec<ClassificationOutcome> = pairs
        .par_iter()
        .map(|(first, second)| engine.compute_primaries(first, second, &options))
        .collect();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let mut counts: HashMap<MpResult, usize> = HashMap::new();
    for (index, outcome) in outcomes.iter().enumerate() {
        *counts.entry(outcome.result).or_default() += 1;
        let line = OutputLine {
            row: index + 1,
            outcome,
        };
        serde_json::to_writer(&mut out, &line)?;
        writeln!(out)?;
    }
    out.flush()?;

    for result in [
        MpResult::SinglePrimary,
        MpResult::MultiplePrimaries,
        MpResult::Questionable,
        MpResult::InvalidInput,
    ] {
        tracing::info!("{}: {}", result, counts.get(&result).copied().unwrap_or(0));
    }

    Ok(())
}
