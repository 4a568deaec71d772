use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("unknown question `{0}`, expected 1, 2 or 3")]
    UnknownQuestion(String),

    #[error("cannot infer input format of {0}, pass --format")]
    UnknownFormat(PathBuf),

    #[error("line {line}: expected 13 columns, found {found}")]
    MalformedRow { line: u64, found: usize },

    #[error("line {line}: record is missing `{field}`")]
    MissingField { line: u64, field: &'static str },

    #[error("line {line}: unknown field `{field}`")]
    UnknownField { line: u64, field: String },

    #[error("line {line}: field appears before the first record")]
    OrphanField { line: u64 },

    #[error("line {line}: input is not valid UTF-8")]
    Utf8 { line: u64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("could not start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Moves a line-numbered error down by `lines`, for input read in pieces.
    pub(crate) fn shift_line(self, lines: u64) -> Self {
        match self {
            Self::MalformedRow { line, found } => Self::MalformedRow { line: line + lines, found },
            Self::MissingField { line, field } => Self::MissingField { line: line + lines, field },
            Self::UnknownField { line, field } => Self::UnknownField { line: line + lines, field },
            Self::OrphanField { line } => Self::OrphanField { line: line + lines },
            Self::Utf8 { line } => Self::Utf8 { line: line + lines },
            other => other,
        }
    }
}
