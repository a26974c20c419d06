//! Loading series from delimited files
//!
//! One x column is shared by every y column selected from the same file;
//! loading several files concatenates their series. Any malformed row fails
//! the whole load.

use std::path::Path;

use csv::{ReaderBuilder, Trim};
use log::debug;

use crate::error::{Error, Result};
use crate::normalize::{Input, Values};

/// Loads `(x, y)` inputs from delimited files.
///
/// `x_index` and `y_indices` select columns by position. The y columns are
/// collected in row order, one series per selected column, and every series
/// of a file shares that file's x column. With a space delimiter, runs of
/// spaces count as a single separator.
pub fn load_delimited<P>(
    paths: &[P],
    delimiter: u8,
    x_index: usize,
    y_indices: &[usize],
) -> Result<(Input, Input)>
where
    P: AsRef<Path>,
{
    if y_indices.contains(&x_index) {
        return Err(Error::ColumnOverlap(x_index));
    }
    let mut selected = y_indices.to_vec();
    selected.sort_unstable();
    selected.dedup();
    if selected.is_empty() || paths.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut xss = Vec::new();
    let mut yss = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let mut reader = ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_path(path)?;

        let mut xs = Vec::new();
        let mut ys = vec![Vec::new(); selected.len()];
        for (record_index, record) in reader.records().enumerate() {
            let record = record?;
            let fields = if delimiter == b' ' {
                record.iter().filter(|f| !f.is_empty()).collect::<Vec<_>>()
            } else {
                record.iter().collect::<Vec<_>>()
            };

            let parse = |index: usize| -> Result<f64> {
                let field = fields.get(index).ok_or_else(|| Error::ColumnMissing {
                    path: path.to_owned(),
                    record: record_index,
                    index,
                })?;
                field.parse().map_err(|source| Error::Parse {
                    path: path.to_owned(),
                    record: record_index,
                    source,
                })
            };

            xs.push(parse(x_index)?);
            for (slot, &index) in ys.iter_mut().zip(&selected) {
                slot.push(parse(index)?);
            }
        }

        debug!(
            "loaded {} records x {} y columns from {:?}",
            xs.len(),
            selected.len(),
            path
        );
        for series in ys {
            yss.push(Values::Numbers(series));
            xss.push(Values::Numbers(xs.clone()));
        }
    }

    Ok((Input::Nested(xss), Input::Nested(yss)))
}
