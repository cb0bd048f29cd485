//! Comma separated matrix files.
//!
//! One matrix row per line, one decimal literal per field. Blank and
//! whitespace-only lines are skipped and fields are trimmed. Every remaining
//! line must have as many fields as the first one.
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use ::csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};

use crate::error::{Result, TensorError};
use crate::math::{Matrix, Scalar};

/// Read a matrix from a CSV file. An empty file yields the `0 x 0` matrix.
pub fn read_matrix_csv<P: AsRef<Path>>(path: P) -> Result<Matrix> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TensorError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let matrix = read_matrix_csv_from_reader(file)?;
    let (nrows, ncols) = matrix.size();
    log::info!("Loaded {}x{} matrix from {}", nrows, ncols, path.display());
    Ok(matrix)
}

/// Read a matrix from any CSV source.
pub fn read_matrix_csv_from_reader<R: Read>(reader: R) -> Result<Matrix> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows: Vec<Vec<Scalar>> = Vec::new();
    let mut width: Option<usize> = None;

    for result in reader.records() {
        let record = result.map_err(|e| TensorError::CsvParse {
            line: e.position().map_or(0, |p| p.line()),
            reason: e.to_string(),
        })?;
        if is_blank(&record) {
            continue;
        }
        let line = record.position().map_or(0, |p| p.line());

        match width {
            None => width = Some(record.len()),
            Some(expected) if expected != record.len() => {
                return Err(TensorError::CsvParse {
                    line,
                    reason: format!("expected {} fields, found {}", expected, record.len()),
                });
            }
            Some(_) => {}
        }

        let row = record
            .iter()
            .map(|field| {
                Scalar::parse(field).map_err(|_| TensorError::CsvParse {
                    line,
                    reason: format!("'{}' is not a decimal number", field),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    log::debug!("csv: parsed {} rows", rows.len());
    Matrix::from_scalar_rows(rows)
}

fn is_blank(record: &StringRecord) -> bool {
    record.len() == 1 && record[0].is_empty()
}

/// Write `matrix` to `path`, one row per line, entries as plain decimals.
pub fn write_matrix_csv<P: AsRef<Path>>(path: P, matrix: &Matrix) -> Result<()> {
    let path = path.as_ref();
    let io_err = |source: io::Error| TensorError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    for row in matrix.row_iter() {
        writer
            .write_record(row.iter().map(|v| v.to_string()))
            .map_err(|e| io_err(e.into()))?;
    }
    writer.flush().map_err(io_err)?;

    let (nrows, ncols) = matrix.size();
    log::info!("Wrote {}x{} matrix to {}", nrows, ncols, path.display());
    Ok(())
}
