//! Crate-wide error taxonomy.
//!
//! Every failure is surfaced synchronously to the caller; there is no retry
//! policy and no partial output. A failed plot call leaves no saved artifact
//! behind.

use std::io;
use std::num::ParseFloatError;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The caller supplied a different number of x series and y series where
    /// the two must agree.
    #[error("x has {x} series but y has {y}")]
    ShapeMismatch { x: usize, y: usize },

    /// An x sequence shorter than its paired y sequence. y defines the series
    /// length; x may be clipped, never extended.
    #[error("series {index}: x has {x} values but y has {y}")]
    SeriesTooShort { index: usize, x: usize, y: usize },

    /// Label data on the y side. Only the x side falls back to categorical
    /// tick labels; y values must always be numeric.
    #[error("series {index}: y values must be numeric")]
    NonNumericOrdinate { index: usize },

    /// Categorical x labels on a log-scaled x axis.
    #[error("categorical x labels cannot be drawn on a logarithmic x axis")]
    LogScaleLabels,

    /// Categorical x labels on a scatter call.
    #[error("categorical x labels are only supported for line plots")]
    ScatterLabels,

    /// A plot call with no series at all.
    #[error("no series to plot")]
    EmptyInput,

    /// Finalization of a session that never had a subplot added.
    #[error("cannot finalize a session with no subplot")]
    EmptySession,

    /// Mutually exclusive configuration supplied in one call.
    #[error("{0}")]
    ConfigConflict(&'static str),

    /// Legend entries must cover every series of a call, or be omitted
    /// entirely.
    #[error("legend has {legends} entries but {series} series were supplied")]
    LegendMismatch { legends: usize, series: usize },

    /// A series was addressed at a subplot that was never added.
    #[error("subplot {0} does not exist")]
    NoSuchSubplot(usize),

    /// The x column and a y column select the same field of a delimited file.
    #[error("x and y indices cannot both be column {0}")]
    ColumnOverlap(usize),

    /// A row of a delimited file lacks one of the selected columns.
    #[error("{path:?}: record {record} has no column {index}")]
    ColumnMissing {
        path: PathBuf,
        record: usize,
        index: usize,
    },

    /// A selected cell of a delimited file did not parse as a number. The
    /// whole load fails; there is no partial-row recovery.
    #[error("{path:?}: record {record}: {source}")]
    Parse {
        path: PathBuf,
        record: usize,
        source: ParseFloatError,
    },

    /// The spawned gnuplot process reported failure.
    #[error("gnuplot failed: {0}")]
    Gnuplot(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
