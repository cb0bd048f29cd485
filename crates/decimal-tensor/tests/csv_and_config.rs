use std::fs;
use std::io::Write;

use decimal_tensor::config::{DecimalPolicy, Rounding};
use decimal_tensor::error::TensorError;
use decimal_tensor::io::{read_matrix_csv, write_matrix_csv};
use decimal_tensor::math::Matrix;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ---------------------------------------------------------------------------
// CSV files
// ---------------------------------------------------------------------------

#[test]
fn csv_file_round_trip_preserves_exact_values() {
    init_logging();
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("m.csv");

    let a = Matrix::parse_rows(&[
        ["0.1", "-2", "3.14159265358979323846"],
        ["1e3", "0", "-0.000001"],
    ])
    .unwrap();
    write_matrix_csv(&path, &a).expect("failed to write csv");

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("0.1,-2,3.14159265358979323846\n"));
    assert!(text.contains("1000,0,-0.000001"));

    let b = read_matrix_csv(&path).expect("failed to read csv");
    assert_eq!(a, b);
}

#[test]
fn csv_file_with_blank_lines_and_padding() {
    init_logging();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, " 1 , 2 ").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "3,4").unwrap();
    writeln!(file, "   ").unwrap();
    file.flush().unwrap();

    let a = read_matrix_csv(file.path()).unwrap();
    assert_eq!(a, Matrix::from_f64_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap());
    assert_eq!(a.determinant().unwrap().to_string(), "-2");
}

#[test]
fn csv_file_errors_carry_line_numbers() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "1,2\n3,4\n5\n").unwrap();
    file.flush().unwrap();

    match read_matrix_csv(file.path()) {
        Err(TensorError::CsvParse { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a CsvParse error, got {:?}", other),
    }
}

#[test]
fn empty_csv_file_is_empty_matrix() {
    let file = tempfile::NamedTempFile::new().unwrap();
    assert_eq!(read_matrix_csv(file.path()).unwrap(), Matrix::empty());
}

// ---------------------------------------------------------------------------
// Decimal policy as JSON
// ---------------------------------------------------------------------------

#[test]
fn policy_json_round_trip() {
    let policy = DecimalPolicy::new(4, 30, Rounding::HalfEven);
    let json = serde_json::to_string(&policy).unwrap();
    assert!(json.contains("\"half_even\""));
    let back: DecimalPolicy = serde_json::from_str(&json).unwrap();
    assert_eq!(policy, back);
}

#[test]
fn policy_json_fills_missing_fields_with_defaults() {
    let policy: DecimalPolicy = serde_json::from_str(r#"{ "division_scale": 3 }"#).unwrap();
    assert_eq!(policy.division_scale, 3);
    assert_eq!(policy.inverse_scale, DecimalPolicy::default().inverse_scale);
    assert_eq!(policy.rounding, Rounding::HalfUp);

    let a = Matrix::from_f64_rows(&[[3.0, 1.0], [0.0, 1.0]]).unwrap();
    let reduced = a.rref_with(&policy);
    assert!(reduced.is_rref());
}

#[test]
fn unknown_rounding_mode_is_rejected() {
    let err = serde_json::from_str::<DecimalPolicy>(r#"{ "rounding": "nearest" }"#);
    assert!(err.is_err());
}
