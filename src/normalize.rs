//! Shape normalization
//!
//! Plot calls accept either a flat sequence or a sequence of sequences on
//! each side. [`normalize_line`] and [`normalize_scatter`] canonicalize the
//! two arguments into an ordered list of [`Series`], applying the broadcast
//! and truncation rules documented on each function. The y side defines the
//! length of every series: a longer x is clipped to it, a shorter x is an
//! error.
//!
//! Only the x side may carry labels instead of numbers. Whether labels render
//! as categorical tick text or are rejected depends on the axis configuration
//! of the target subplot, so that decision is deferred to the session; label
//! data on the y side is rejected here.

use crate::error::{Error, Result};
use crate::traits::Data;

/// An ordered sequence of values: numeric, or categorical labels
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    /// Numeric values
    Numbers(Vec<f64>),
    /// Categorical labels (x side only)
    Labels(Vec<String>),
}

impl Values {
    /// Number of values in the sequence
    pub fn len(&self) -> usize {
        match self {
            Values::Numbers(v) => v.len(),
            Values::Labels(v) => v.len(),
        }
    }

    /// Whether the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn truncated(mut self, len: usize) -> Values {
        match &mut self {
            Values::Numbers(v) => v.truncate(len),
            Values::Labels(v) => v.truncate(len),
        }
        self
    }
}

/// One plot-call argument: a flat sequence, or a sequence of sequences
#[derive(Clone, Debug, PartialEq)]
pub enum Input {
    /// A single sequence
    Flat(Values),
    /// One sequence per series
    Nested(Vec<Values>),
}

macro_rules! impl_input_numeric {
    ($($ty:ty),+) => {
        $(
            impl From<Vec<$ty>> for Input {
                fn from(values: Vec<$ty>) -> Input {
                    Input::Flat(Values::Numbers(values.into_iter().map(Data::f64).collect()))
                }
            }

            impl<'a> From<&'a [$ty]> for Input {
                fn from(values: &'a [$ty]) -> Input {
                    Input::Flat(Values::Numbers(values.iter().map(Data::f64).collect()))
                }
            }

            impl From<Vec<Vec<$ty>>> for Input {
                fn from(values: Vec<Vec<$ty>>) -> Input {
                    Input::Nested(
                        values
                            .into_iter()
                            .map(|v| Values::Numbers(v.into_iter().map(Data::f64).collect()))
                            .collect(),
                    )
                }
            }
        )+
    }
}

impl_input_numeric!(f32, f64, i16, i32, i64, i8, isize, u16, u32, u64, u8, usize);

impl From<Vec<String>> for Input {
    fn from(labels: Vec<String>) -> Input {
        Input::Flat(Values::Labels(labels))
    }
}

impl<'a> From<Vec<&'a str>> for Input {
    fn from(labels: Vec<&'a str>) -> Input {
        Input::Flat(Values::Labels(labels.into_iter().map(String::from).collect()))
    }
}

impl From<Vec<Vec<String>>> for Input {
    fn from(labels: Vec<Vec<String>>) -> Input {
        Input::Nested(labels.into_iter().map(Values::Labels).collect())
    }
}

impl<'a> From<Vec<Vec<&'a str>>> for Input {
    fn from(labels: Vec<Vec<&'a str>>) -> Input {
        Input::Nested(
            labels
                .into_iter()
                .map(|v| Values::Labels(v.into_iter().map(String::from).collect()))
                .collect(),
        )
    }
}

impl From<Values> for Input {
    fn from(values: Values) -> Input {
        Input::Flat(values)
    }
}

/// One (x, y) pairing to be drawn as a single trace
///
/// Invariant: `xs.len() == ys.len()`.
#[derive(Clone, Debug, PartialEq)]
pub struct Series {
    /// The abscissa values
    pub xs: Values,
    /// The ordinate values
    pub ys: Vec<f64>,
}

impl Series {
    /// A series over numeric x values
    pub fn numeric(xs: Vec<f64>, ys: Vec<f64>) -> Series {
        Series {
            xs: Values::Numbers(xs),
            ys,
        }
    }

    /// A series over categorical x labels
    pub fn categorical(labels: Vec<String>, ys: Vec<f64>) -> Series {
        Series {
            xs: Values::Labels(labels),
            ys,
        }
    }
}

fn ordinates(y: Input) -> Result<Vec<Vec<f64>>> {
    let into_numbers = |index: usize, values: Values| match values {
        Values::Numbers(v) => Ok(v),
        Values::Labels(_) => Err(Error::NonNumericOrdinate { index }),
    };

    match y {
        Input::Flat(values) => Ok(vec![into_numbers(0, values)?]),
        Input::Nested(values) => {
            if values.is_empty() {
                return Err(Error::EmptyInput);
            }
            values
                .into_iter()
                .enumerate()
                .map(|(index, v)| into_numbers(index, v))
                .collect()
        }
    }
}

pub(crate) fn pair(index: usize, xs: Values, ys: Vec<f64>) -> Result<Series> {
    if xs.len() < ys.len() {
        return Err(Error::SeriesTooShort {
            index,
            x: xs.len(),
            y: ys.len(),
        });
    }
    let len = ys.len();
    Ok(Series {
        xs: xs.truncated(len),
        ys,
    })
}

/// Normalizes the arguments of a line call.
///
/// A flat y is a single series. A flat x is shared: it is broadcast across
/// every y series, clipped to each one's length. A nested x must have exactly
/// as many series as y and pairs with it positionally.
pub fn normalize_line(x: Input, y: Input) -> Result<Vec<Series>> {
    let yss = ordinates(y)?;

    match x {
        Input::Flat(xs) => yss
            .into_iter()
            .enumerate()
            .map(|(index, ys)| pair(index, xs.clone(), ys))
            .collect(),
        Input::Nested(xss) => {
            if xss.is_empty() {
                return Err(Error::EmptyInput);
            }
            if xss.len() != yss.len() {
                return Err(Error::ShapeMismatch {
                    x: xss.len(),
                    y: yss.len(),
                });
            }
            xss.into_iter()
                .zip(yss)
                .enumerate()
                .map(|(index, (xs, ys))| pair(index, xs, ys))
                .collect()
        }
    }
}

/// Normalizes the arguments of a scatter call.
///
/// A flat y is a single series. A flat x is broadcast to y's series count.
/// When both sides are nested their series counts must agree exactly, so a
/// nested x with a flat y fails unless x holds exactly one series.
pub fn normalize_scatter(x: Input, y: Input) -> Result<Vec<Series>> {
    let yss = ordinates(y)?;

    let xss = match x {
        Input::Flat(xs) => vec![xs; yss.len()],
        Input::Nested(xss) => {
            if xss.is_empty() {
                return Err(Error::EmptyInput);
            }
            xss
        }
    };

    if xss.len() != yss.len() {
        return Err(Error::ShapeMismatch {
            x: xss.len(),
            y: yss.len(),
        });
    }

    xss.into_iter()
        .zip(yss)
        .enumerate()
        .map(|(index, (xs, ys))| pair(index, xs, ys))
        .collect()
}
