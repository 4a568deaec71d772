use std::fs::File;
use std::io::BufWriter;
use std::time::Instant;

use crate::config::{Config, TableKind};
use crate::error::{Error, Result};
use crate::question::Question;
use crate::rank::rank;
use crate::reader::{read_file, Ingest};
use crate::record::Record;
use crate::tally::{AggregateEntry, HashTally, ScanTally, Tally};
use crate::writer::write_top;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub records: u64,
    pub accepted: u64,
    pub keys: usize,
    pub rows: usize,
}

/// Classifies, tallies and ranks records already in memory.
pub fn answer<I>(question: Question, records: I) -> Vec<AggregateEntry>
where
    I: IntoIterator<Item = Record>,
{
    let mut ingest: Ingest<HashTally> = Ingest::default();
    for record in records {
        ingest.add(question, &record);
    }
    rank(ingest.tally.into_entries(), question)
}

pub fn run(config: &Config) -> Result<Summary> {
    match config.table {
        TableKind::Hash => run_with::<HashTally>(config),
        TableKind::Scan => run_with::<ScanTally>(config),
    }
}

fn run_with<T: Tally + Send>(config: &Config) -> Result<Summary> {
    let timer = Instant::now();

    let ingest: Ingest<T> = read_file(&config.input, config.format, config.question, config.jobs)?;
    log::info!(
        "read {} records from {}, {} counted for {}",
        ingest.records,
        config.input.display(),
        ingest.accepted,
        config.question
    );

    let keys = ingest.tally.len();
    let ranked = rank(ingest.tally.into_entries(), config.question);

    let output = File::create(&config.output).map_err(| error | Error::io(error, &config.output))?;
    let rows = write_top(BufWriter::new(output), config.question, &ranked, config.limit)?;
    log::info!("wrote {rows} of {keys} rows to {}", config.output.display());
    log::info!("finished in {:?}", timer.elapsed());

    Ok(Summary { records: ingest.records, accepted: ingest.accepted, keys, rows })
}
