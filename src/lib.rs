//! Ranks airline route records by one of three questions and writes the top
//! N as CSV: airlines flying into Canada, destination countries, or
//! destination airports.

pub mod classify;
pub mod config;
pub mod error;
pub mod parse;
pub mod pipeline;
pub mod question;
pub mod rank;
pub mod reader;
pub mod record;
pub mod tally;
pub mod writer;

pub use classify::{classify, AggregationKey};
pub use config::{Cli, Config, InputFormat, TableKind};
pub use error::{Error, Result};
pub use pipeline::{answer, run, Summary};
pub use question::Question;
pub use rank::rank;
pub use record::{Airline, Airport, Record};
pub use tally::{AggregateEntry, HashTally, ScanTally, Tally};
