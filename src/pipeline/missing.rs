//! Missing value detection and zero imputation

use polars::prelude::*;

use super::error::PipelineError;

/// Replacement written into null cells of text columns
pub const MISSING_TEXT_FILL: &str = "0";

/// Count null cells per column, in column order
pub fn count_missing(df: &DataFrame) -> Vec<(String, usize)> {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), column.null_count()))
        .collect()
}

/// Replace every null cell with zero, in place.
///
/// Numeric columns keep their dtype and receive `0`, boolean columns receive
/// `false`, text columns receive `"0"`. Columns without nulls are left
/// untouched, so a second call is a no-op.
///
/// Returns the number of cells that were filled.
pub fn fill_missing(df: &mut DataFrame) -> Result<usize, PipelineError> {
    let names: Vec<PlSmallStr> = df.get_column_names().into_iter().cloned().collect();
    let mut filled = 0usize;

    for name in names {
        let column = df.column(&name)?;
        let null_count = column.null_count();
        if null_count == 0 {
            continue;
        }

        let replacement = zero_filled(column.as_materialized_series())?;
        df.with_column(replacement)?;
        filled += null_count;
    }

    Ok(filled)
}

fn zero_filled(series: &Series) -> PolarsResult<Series> {
    let name = series.name().clone();
    match series.dtype() {
        DataType::String => {
            let filled: StringChunked = series
                .str()?
                .into_iter()
                .map(|v| Some(v.unwrap_or(MISSING_TEXT_FILL)))
                .collect();
            Ok(filled.with_name(name).into_series())
        }
        DataType::Boolean => {
            let filled: BooleanChunked = series
                .bool()?
                .into_iter()
                .map(|v| Some(v.unwrap_or(false)))
                .collect();
            Ok(filled.with_name(name).into_series())
        }
        // An all-empty column carries no type information
        DataType::Null => Ok(Series::new(name, vec![0i64; series.len()])),
        _ => series.fill_null(FillNullStrategy::Zero),
    }
}
