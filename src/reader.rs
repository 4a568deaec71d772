use std::fs::File;
use std::path::Path;

use bstr::ByteSlice;
use memmap2::MmapOptions;
use rayon::prelude::*;

use crate::classify::classify;
use crate::config::InputFormat;
use crate::error::{Error, Result};
use crate::parse::{is_csv_header, record_from_line, BlockReader};
use crate::question::Question;
use crate::record::Record;
use crate::tally::Tally;

const NEWLINE: u8 = 10;
const BOM: &[u8] = b"\xEF\xBB\xBF";

/// A tally plus how many records went into it.
#[derive(Debug, Default)]
pub struct Ingest<T> {
    pub tally: T,
    pub records: u64,
    pub accepted: u64,
}

impl<T: Tally> Ingest<T> {
    pub fn add(&mut self, question: Question, record: &Record) {
        self.records += 1;
        if let Some((key, delta)) = classify(question, record) {
            self.accepted += 1;
            self.tally.ingest(key, delta, record);
        }
    }

    /// `later` must cover input that comes after everything in `self`.
    pub fn merge(&mut self, later: Self) {
        self.records += later.records;
        self.accepted += later.accepted;
        self.tally.merge(later.tally);
    }
}

pub fn read_file<T: Tally + Send>(
    path: &Path,
    format: InputFormat,
    question: Question,
    jobs: usize,
) -> Result<Ingest<T>> {
    let file = File::open(path).map_err(| error | Error::io(error, path))?;
    let size = file.metadata().map_err(| error | Error::io(error, path))?.len();
    if size == 0 {
        log::debug!("{} is empty", path.display());
        return Ok(Ingest::default());
    }

    // SAFETY: the map is read-only and dropped before this function returns.
    let mmap = unsafe { MmapOptions::new().map(&file) }.map_err(| error | Error::io(error, path))?;

    match format {
        InputFormat::Csv => tally_csv(&mmap, question, jobs),
        InputFormat::Yaml => {
            if jobs > 1 {
                log::warn!("block input is read on one thread, ignoring --jobs {jobs}");
            }
            tally_blocks(&mmap, question)
        }
    }
}

pub fn tally_blocks<T: Tally>(buffer: &[u8], question: Question) -> Result<Ingest<T>> {
    let mut ingest = Ingest::default();
    for record in BlockReader::new(buffer) {
        ingest.add(question, &record?);
    }
    Ok(ingest)
}

pub fn tally_csv<T: Tally + Send>(buffer: &[u8], question: Question, jobs: usize) -> Result<Ingest<T>> {
    let body_start = find_body_start(buffer);
    let chunks = find_chunk_boundaries(buffer, body_start, jobs);
    log::debug!("csv chunks: {chunks:?}");

    if chunks.len() <= 1 {
        return match chunks.first() {
            Some(&(start, end)) => scan_csv_chunk(buffer, start, end, question),
            None => Ok(Ingest::default()),
        };
    }

    let pool = rayon::ThreadPoolBuilder::new().num_threads(chunks.len()).build()?;
    log::debug!("scanning {} chunks on {} threads", chunks.len(), pool.current_num_threads());

    let parts: Vec<Result<Ingest<T>>> = pool.install(|| {
        chunks
            .par_iter()
            .map(| &(start, end) | scan_csv_chunk(buffer, start, end, question))
            .collect()
    });

    parts
        .into_iter()
        .try_fold(
            Ingest::default(),
            | mut merged, part | { merged.merge(part?); Ok(merged) }
        )
}

/// Offset of the first data line: past a byte order mark and, when the first
/// non-blank line is a header, past that line too.
fn find_body_start(buffer: &[u8]) -> usize {
    let content = if buffer.starts_with(BOM) { BOM.len() } else { 0 };

    let mut start = content;
    while start < buffer.len() {
        let end = find_next_newline(start, buffer);
        let line = &buffer[start..end];
        if !line.trim().is_empty() {
            return if is_csv_header(line) { end } else { content };
        }
        start = end;
    }
    content
}

/// Splits `buffer[start..]` into at most `parts` non-empty ranges that each
/// end just after a newline (or at the end of the buffer).
pub fn find_chunk_boundaries(buffer: &[u8], start: usize, parts: usize) -> Vec<(usize, usize)> {
    let size = buffer.len();
    let parts = parts.max(1);
    let chunk_size = (size - start) / parts;

    let mut starts: Vec<usize> = (0..parts)
        .map(| part | start + part * chunk_size)
        .collect();

    for i in 1..parts {
        starts[i] = find_next_newline(starts[i], buffer).max(starts[i - 1]);
    }

    let mut ends: Vec<usize> = vec![0; parts];
    ends[..(parts - 1)].copy_from_slice(&starts[1..parts]);
    ends[parts - 1] = size;

    starts
        .into_iter()
        .zip(ends)
        .filter(| (start, end) | start < end)
        .collect()
}

fn find_next_newline(start: usize, buffer: &[u8]) -> usize {
    match buffer[start..].find_byte(NEWLINE) {
        Some(position) => start + position + 1,
        None => buffer.len(),
    }
}

fn scan_csv_chunk<T: Tally>(buffer: &[u8], start: usize, end: usize, question: Question) -> Result<Ingest<T>> {
    let mut ingest = Ingest::default();

    for (index, raw) in buffer[start..end].lines().enumerate() {
        let record = parse_csv_line(raw, index as u64 + 1)
            .map_err(| error | error.shift_line(lines_before(buffer, start)))?;
        if let Some(record) = record {
            ingest.add(question, &record);
        }
    }

    Ok(ingest)
}

fn parse_csv_line(raw: &[u8], line: u64) -> Result<Option<Record>> {
    let text = raw.to_str().map_err(|_| Error::Utf8 { line })?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    record_from_line(text, line).map(Some)
}

fn lines_before(buffer: &[u8], position: usize) -> u64 {
    buffer[..position].find_iter("\n").count() as u64
}
