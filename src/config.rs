use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};

use crate::error::{Error, Result};
use crate::question::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum InputFormat {
    /// One route per line, 13 comma separated columns.
    Csv,
    /// `key: value` lines, one block per route.
    Yaml,
}

impl InputFormat {
    pub fn infer(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(| extension | extension.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("csv" | "txt") => Ok(Self::Csv),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(Error::UnknownFormat(path.to_path_buf())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum TableKind {
    #[default]
    Hash,
    Scan,
}

#[derive(Debug, Parser)]
#[command(name = "route-tally", version, about = "Rank airline routes and write the top N as CSV")]
pub struct Cli {
    /// Route data file
    #[arg(long = "DATA", visible_alias = "data", value_name = "FILE")]
    pub data: PathBuf,

    /// 1: airlines flying into Canada, 2: destination countries, 3: destination airports
    #[arg(long = "QUESTION", visible_alias = "question")]
    pub question: Question,

    /// Number of rows to write
    #[arg(long = "N", visible_aliases = ["n", "limit"])]
    pub limit: usize,

    #[arg(long, default_value = "output.csv", value_name = "FILE")]
    pub output: PathBuf,

    /// Input layout; inferred from the file extension when omitted
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Worker threads for CSV input, at most the number of available cores
    #[arg(long, default_value = "1")]
    pub jobs: NonZeroUsize,

    #[arg(long, value_enum, default_value_t = TableKind::Hash)]
    pub table: TableKind,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let format = match self.format {
            Some(format) => format,
            None => InputFormat::infer(&self.data)?,
        };

        Ok(Config {
            input: self.data,
            output: self.output,
            question: self.question,
            limit: self.limit,
            format,
            jobs: bounded_jobs(self.jobs.get()),
            table: self.table,
        })
    }
}

fn bounded_jobs(requested: usize) -> usize {
    let available = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
    if requested > available {
        log::warn!("--jobs {requested} exceeds the {available} available threads, using {available}");
    }
    requested.clamp(1, available)
}

/// Everything one run needs, resolved once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub question: Question,
    pub limit: usize,
    pub format: InputFormat,
    pub jobs: usize,
    pub table: TableKind,
}

impl Config {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        question: Question,
        limit: usize,
    ) -> Result<Self> {
        let input = input.into();
        let format = InputFormat::infer(&input)?;
        Ok(Self {
            input,
            output: output.into(),
            question,
            limit,
            format,
            jobs: 1,
            table: TableKind::default(),
        })
    }

    pub fn with_format(mut self, format: InputFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = bounded_jobs(jobs);
        self
    }

    pub fn with_table(mut self, table: TableKind) -> Self {
        self.table = table;
        self
    }
}
