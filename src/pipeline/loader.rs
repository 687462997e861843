//! Dataset loader for comma-delimited files

use std::path::Path;

use polars::prelude::*;

use super::config::DEFAULT_INFER_SCHEMA_LENGTH;
use super::error::PipelineError;

/// Make sure `path` names a readable file before the CSV reader sees it.
fn check_readable(path: &Path) -> Result<(), PipelineError> {
    let metadata =
        std::fs::metadata(path).map_err(|e| PipelineError::file_access(path, e))?;
    if metadata.is_dir() {
        return Err(PipelineError::file_access(
            path,
            std::io::Error::other("path is a directory"),
        ));
    }
    std::fs::File::open(path).map_err(|e| PipelineError::file_access(path, e))?;
    Ok(())
}

fn csv_reader(path: &Path, infer_schema_length: usize) -> LazyCsvReader {
    // 0 means scan the whole file
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };
    LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(schema_length)
}

/// Load a CSV file with a header row into memory
pub fn load_data(path: &Path) -> Result<DataFrame, PipelineError> {
    load_data_with_schema_length(path, DEFAULT_INFER_SCHEMA_LENGTH)
}

/// Load a CSV file, inferring column types from the first
/// `infer_schema_length` rows
pub fn load_data_with_schema_length(
    path: &Path,
    infer_schema_length: usize,
) -> Result<DataFrame, PipelineError> {
    check_readable(path)?;

    csv_reader(path, infer_schema_length)
        .finish()
        .and_then(|lf| lf.collect())
        .map_err(|source| PipelineError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

/// Read only the column names of a CSV file
pub fn get_column_names(path: &Path) -> Result<Vec<String>, PipelineError> {
    check_readable(path)?;

    let parse_error = |source: PolarsError| PipelineError::Parse {
        path: path.to_path_buf(),
        source,
    };
    let schema = csv_reader(path, DEFAULT_INFER_SCHEMA_LENGTH)
        .finish()
        .map_err(parse_error)?
        .collect_schema()
        .map_err(parse_error)?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

/// Estimated in-memory size of a loaded table in megabytes
pub fn estimated_size_mb(df: &DataFrame) -> f64 {
    df.estimated_size() as f64 / (1024.0 * 1024.0)
}
