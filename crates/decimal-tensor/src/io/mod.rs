//! Reading and writing matrices as delimited text.
pub mod csv;

pub use self::csv::{read_matrix_csv, read_matrix_csv_from_reader, write_matrix_csv};
