//! Simple line and scatter plots, driven through [gnuplot].
//!
//! [gnuplot]: http://www.gnuplot.info/
//!
//! `splot` is a thin convenience layer: hand it flat or nested sequences (or
//! delimited files) and it reshapes them into series, accumulates them in a
//! [`PlotSession`], and drives a `gnuplot` child process to display the
//! result or persist it to a file. Rendering, layout and file formats belong
//! to gnuplot; this crate owns the argument reshaping, the session state and
//! the script that ties the two together.
//!
//! # Examples
//!
//! One shared x sequence broadcast across two y series:
//!
//! ```
//! use splot::prelude::*;
//!
//! let xs = vec![0., 1., 2., 3.];
//! let session = splot::line(xs, vec![vec![0., 1., 4., 9.], vec![0., 1., 8., 27.]])
//!     .set(Title("powers"))
//!     .configure(Axis::X, |a| a.set(Label("n")))
//!     .set(Legend(vec!["squares", "cubes"]))
//!     .no_display()
//!     .draw()
//!     .unwrap();
//!
//! assert_eq!(session.series_count(), 2);
//! ```
//!
//! Categorical x values fall back to tick labels at positions `0..n`:
//!
//! ```
//! use splot::prelude::*;
//!
//! let session = splot::line(vec!["mon", "tue", "wed"], vec![3., 1., 4.])
//!     .configure(Axis::Y, |a| a.set(Label("count")))
//!     .no_display()
//!     .draw()
//!     .unwrap();
//!
//! let script = String::from_utf8_lossy(&session.script()).into_owned();
//! assert!(script.contains("'mon' 0, 'tue' 1, 'wed' 2"));
//! ```
//!
//! Saving to a path never opens a window, so it works on headless machines
//! (the example below is skipped when gnuplot is not installed):
//!
//! ```no_run
//! use splot::prelude::*;
//!
//! # fn main() -> splot::Result<()> {
//! if splot::version().is_err() {
//!     return Ok(());
//! }
//! splot::line(vec![1., 2.], vec![5., 6.])
//!     .set(Output(std::path::Path::new("out.svg")))
//!     .no_display()
//!     .draw()?;
//! # Ok(())
//! # }
//! ```

use std::borrow::Cow;
use std::io;
use std::num::ParseIntError;
use std::path::Path;
use std::process::Command;
use std::str;

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

mod data;
mod display;

pub mod axis;
pub mod curve;
pub mod error;
pub mod figure;
pub mod file;
pub mod key;
pub mod normalize;
pub mod plot;
pub mod prelude;
pub mod proxy;
pub mod session;
pub mod style;
pub mod traits;

pub use crate::error::{Error, Result};
pub use crate::figure::{Figure, SeriesHandle, SubplotId};
pub use crate::normalize::{Input, Series, Values};
pub use crate::plot::{
    line, line_from_csv, line_from_file, line_from_files, scatter, Line, Scatter,
};
pub use crate::session::{AxisConfig, Marker, PlotSession, SessionState};
pub use crate::style::{Margins, StyleConfig};

/// A coordinate axis of a subplot
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// The abscissa
    X,
    /// The ordinate
    Y,
}

/// Color
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Black,
    Blue,
    Cyan,
    DarkViolet,
    ForestGreen,
    Gold,
    Gray,
    Green,
    Magenta,
    Red,
    /// Custom RGB color
    Rgb(u8, u8, u8),
    /// Custom RGB color with an opacity in `0 ..= 255` (255 is opaque)
    Rgba(u8, u8, u8, u8),
    White,
    Yellow,
}

/// A gnuplot dash pattern: alternating on/off segment lengths
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashStyle(pub Vec<f64>);

/// The size of a font
#[derive(Clone, Copy)]
pub struct FontSize(pub f64);

/// Axis or legend label text
pub struct Label(Cow<'static, str>);

/// One legend entry per series of a plot call
pub struct Legend(Vec<Cow<'static, str>>);

/// Width of the lines
#[derive(Clone, Copy)]
pub struct LineWidth(pub f64);

/// Size of the series markers
#[derive(Clone, Copy)]
pub struct MarkerSize(pub f64);

/// Per-series marker sizes, paired positionally with the series of one call
#[derive(Clone)]
pub struct MarkerSizes(pub Vec<f64>);

/// Output file path
pub struct Output(Cow<'static, Path>);

/// Point (marker) type
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointType {
    Circle,
    FilledCircle,
    FilledSquare,
    FilledTriangle,
    Plus,
    Square,
    Star,
    Triangle,
    X,
}

/// Axis scale
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scale {
    Linear,
    Logarithmic,
}

/// Output terminal used when rendering to a file
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Terminal {
    Png,
    Svg,
}

impl Terminal {
    /// Picks the terminal matching a file extension. Anything that is not
    /// `.png` renders as SVG.
    pub fn from_extension(path: &Path) -> Terminal {
        match path.extension().and_then(|e| e.to_str()) {
            Some("png") => Terminal::Png,
            _ => Terminal::Svg,
        }
    }
}

/// Figure title
pub struct Title(Cow<'static, str>);

/// Not public version of `std::default::Default`, used to not leak default
/// constructors into the public API
trait Default {
    /// Creates `Properties` with default configuration
    fn default() -> Self;
}

/// Enums that can produce gnuplot code
trait Display<S> {
    /// Translates the enum in gnuplot code
    fn display(&self) -> S;
}

/// Structs that can produce gnuplot code
trait Script {
    /// Translates some configuration struct into gnuplot code
    fn script(&self) -> String;
}

fn escape(s: &str) -> String {
    s.replace('\'', "''")
}

/// Possible errors when parsing gnuplot's version string
#[derive(Debug, ThisError)]
pub enum VersionError {
    /// The `gnuplot` command couldn't be executed
    #[error("`gnuplot --version` failed: {0}")]
    Exec(#[source] io::Error),
    /// The `gnuplot` command returned an error message
    #[error("`gnuplot --version` failed with error message:\n{0}")]
    Error(String),
    /// The `gnuplot` command returned invalid utf-8
    #[error("`gnuplot --version` returned invalid utf-8")]
    OutputError,
    /// The `gnuplot` command returned an unparsable string
    #[error("`gnuplot --version` returned an unparsable version string: {0}")]
    ParseError(String),
}

/// Structure representing a gnuplot version number.
pub struct Version {
    /// The major version number
    pub major: usize,
    /// The minor version number
    pub minor: usize,
    /// The patch level
    pub patch: String,
}

/// Returns `gnuplot` version
pub fn version() -> std::result::Result<Version, VersionError> {
    let command_output = Command::new("gnuplot")
        .arg("--version")
        .output()
        .map_err(VersionError::Exec)?;
    if !command_output.status.success() {
        let error =
            String::from_utf8(command_output.stderr).map_err(|_| VersionError::OutputError)?;
        return Err(VersionError::Error(error));
    }

    parse_version_utf8(&command_output.stdout).or_else(|utf8_err| {
        // gnuplot can emit UTF-16 on some systems/configurations (e.g. some
        // Windows machines). If we failed to parse as UTF-8, try again as
        // UTF-16 before reporting the original error.
        parse_version_utf16(&command_output.stdout).map_err(|_| utf8_err)
    })
}

fn parse_version_utf8(output_bytes: &[u8]) -> std::result::Result<Version, VersionError> {
    let output = str::from_utf8(output_bytes).map_err(|_| VersionError::OutputError)?;
    parse_version(output).map_err(|_| VersionError::ParseError(output.to_owned()))
}

fn parse_version_utf16(output_bytes: &[u8]) -> std::result::Result<Version, VersionError> {
    if output_bytes.len() % 2 != 0 {
        // Not an even number of bytes, so cannot be UTF-16.
        return Err(VersionError::OutputError);
    }

    let output_as_u16: Vec<u16> = output_bytes
        .chunks_exact(2)
        .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
        .collect();

    let output = String::from_utf16(&output_as_u16).map_err(|_| VersionError::OutputError)?;
    parse_version(&output).map_err(|_| VersionError::ParseError(output.to_owned()))
}

fn parse_version(version_str: &str) -> std::result::Result<Version, Option<ParseIntError>> {
    let mut words = version_str.split_whitespace().skip(1);
    let mut version = words.next().ok_or(None)?.split('.');
    let major = version.next().ok_or(None)?.parse()?;
    let minor = version.next().ok_or(None)?.parse()?;
    let patchlevel = words.nth(1).ok_or(None)?.to_owned();

    Ok(Version {
        major,
        minor,
        patch: patchlevel,
    })
}

#[cfg(test)]
mod test {
    #[test]
    fn test_parse_version_on_valid_string() {
        let string = "gnuplot 5.0 patchlevel 7";
        let version = super::parse_version(string).unwrap();
        assert_eq!(5, version.major);
        assert_eq!(0, version.minor);
        assert_eq!("7", &version.patch);
    }

    #[test]
    fn test_parse_gentoo_version() {
        let string = "gnuplot 5.2 patchlevel 5a (Gentoo revision r0)";
        let version = super::parse_version(string).unwrap();
        assert_eq!(5, version.major);
        assert_eq!(2, version.minor);
        assert_eq!("5a", &version.patch);
    }

    #[test]
    fn test_parse_version_returns_error_on_invalid_strings() {
        let strings = [
            "",
            "foobar",
            "gnuplot 50 patchlevel 7",
            "gnuplot 5.0 patchlevel",
            "gnuplot foo.bar patchlevel 7",
        ];
        for string in &strings {
            assert!(super::parse_version(string).is_err());
        }
    }

    #[test]
    fn test_escape_quotes() {
        assert_eq!(super::escape("it's"), "it''s");
    }
}
