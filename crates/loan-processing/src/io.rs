//! CSV input and output.

use crate::error::{PreprocessingError, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Cell values read as missing, in addition to empty fields.
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Load a CSV file with a header row, trying progressively more lenient
/// strategies before giving up.
///
/// 1. Standard read with `"` quoting
/// 2. Read with quoting disabled
/// 3. Read of pre-cleaned text (collapsed doubled quotes, no blank lines)
///
/// Column types are inferred from the first `infer_schema_length` rows, or
/// from the whole file when it is `None`. Empty fields and
/// [`MISSING_VALUE_TOKENS`] load as nulls.
///
/// Fails with [`PreprocessingError::Load`] when the file is missing or every
/// strategy fails.
pub fn load_csv(
    path: &Path,
    separator: u8,
    infer_schema_length: Option<usize>,
) -> Result<DataFrame> {
    let load_error = |reason: String| PreprocessingError::Load {
        path: path.display().to_string(),
        reason,
    };

    if !path.is_file() {
        return Err(load_error("file not found".to_string()));
    }

    let read_options = |quote_char: Option<u8>| {
        CsvReadOptions::default()
            .with_infer_schema_length(infer_schema_length)
            .with_has_header(true)
            .with_parse_options(
                CsvParseOptions::default()
                    .with_separator(separator)
                    .with_quote_char(quote_char)
                    .with_null_values(Some(missing_values())),
            )
    };

    // Strategy 1: Standard loading with quote handling
    match read_options(Some(b'"'))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => return loaded(path, df),
        Err(e) => debug!("Standard loading failed: {}", e),
    }

    // Strategy 2: Without quote handling
    match read_options(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
    {
        Ok(df) => return loaded(path, df),
        Err(e) => debug!("Loading without quotes failed: {}", e),
    }

    // Strategy 3: Pre-clean content
    let content = fs::read_to_string(path).map_err(|e| load_error(e.to_string()))?;
    let cleaned = clean_csv_content(&content);
    let df = read_options(Some(b'"'))
        .into_reader_with_file_handle(Cursor::new(cleaned))
        .finish()
        .map_err(|e| load_error(e.to_string()))?;

    loaded(path, df)
}

fn missing_values() -> NullValues {
    NullValues::AllColumns(
        MISSING_VALUE_TOKENS
            .iter()
            .map(|&token| PlSmallStr::from_static(token))
            .collect(),
    )
}

fn loaded(path: &Path, df: DataFrame) -> Result<DataFrame> {
    if df.width() == 0 {
        return Err(PreprocessingError::Load {
            path: path.display().to_string(),
            reason: "no columns".to_string(),
        });
    }

    info!("Dataset loaded from {}. Shape: {:?}", path.display(), df.shape());
    Ok(df)
}

/// Collapse doubled quotes and drop blank lines.
fn clean_csv_content(content: &str) -> String {
    content
        .replace("\"\"\"", "\"")
        .replace("\"\"", "\"")
        .lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `df` as delimited text with a header row and no index column.
///
/// Parent directories are created as needed.
pub fn write_csv(df: &mut DataFrame, path: &Path, separator: u8) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(separator)
        .with_quote_char(b'"')
        .finish(df)?;

    info!("Dataset saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_missing_file() {
        let err = load_csv(Path::new("does/not/exist.csv"), b',', None).unwrap_err();
        assert!(err.is_load_failure());
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_load_infers_types() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "loan_id,income,employment_type").unwrap();
        writeln!(file, "L1,5000,Salaried").unwrap();
        writeln!(file, "L2,6500.5,Self-Employed").unwrap();

        let df = load_csv(file.path(), b',', None).unwrap();
        assert_eq!(df.shape(), (2, 3));
        assert_eq!(df.column("income").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("employment_type").unwrap().dtype(), &DataType::String);
    }

    #[test]
    fn test_late_float_widens_column_type() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "loan_id,age").unwrap();
        for i in 0..150 {
            let age = if i == 120 {
                "30.5".to_string()
            } else {
                (25 + i % 30).to_string()
            };
            writeln!(file, "L{i},{age}").unwrap();
        }

        let df = load_csv(file.path(), b',', None).unwrap();
        assert_eq!(df.height(), 150);
        assert_eq!(df.column("age").unwrap().dtype(), &DataType::Float64);
    }

    #[test]
    fn test_missing_value_tokens_load_as_null() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "income,employment_type").unwrap();
        writeln!(file, "5000,Salaried").unwrap();
        writeln!(file, "NaN,NA").unwrap();
        writeln!(file, "6200,null").unwrap();
        writeln!(file, "N/A,Contract").unwrap();

        let df = load_csv(file.path(), b',', None).unwrap();
        assert_eq!(df.column("income").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("income").unwrap().null_count(), 2);
        assert_eq!(df.column("employment_type").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("employment_type").unwrap().null_count(), 2);
    }

    #[test]
    fn test_load_empty_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = load_csv(file.path(), b',', None).unwrap_err();
        assert_eq!(err.error_code(), "LOAD_ERROR");
    }

    #[test]
    fn test_clean_csv_content() {
        let cleaned = clean_csv_content("a,b\n\n\"\"x\"\",1\n");
        assert_eq!(cleaned, "a,b\n\"x\",1");
    }

    #[test]
    fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out.csv");
        let mut df = df![
            "income" => [0.5, -0.5],
            "employment_type" => [0u32, 1],
        ]
        .unwrap();

        write_csv(&mut df, &path, b',').unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("income,employment_type\n"));

        let reloaded = load_csv(&path, b',', None).unwrap();
        assert_eq!(reloaded.shape(), (2, 2));
    }
}
