use csv::{ReaderBuilder, StringRecord, Trim};
use serde_json::{Number, Value};
use std::path::Path;
use tracing::{debug, instrument};

use super::types::{ConfigRow, DataRow, DataTable};
use crate::error::{PctsError, Result};

pub const CATEGORY: &str = "Category";
pub const SUB_CATEGORY: &str = "Sub Category";
pub const TARGET_COLUMN: &str = "Target Column";
pub const UNIT: &str = "unit";

/// Type a raw cell the way a dataframe reader would: integers, then floats,
/// empty → null, anything else stays text.
pub fn infer_scalar(raw: &str) -> Value {
    let s = raw.trim();
    if s.is_empty() {
        return Value::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Number(i.into());
    }
    if let Ok(f) = s.parse::<f64>() {
        // NaN and infinities have no JSON form
        return Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null);
    }
    Value::String(raw.to_string())
}

fn require_headers(headers: &StringRecord, required: &[&str], path: &Path) -> Result<()> {
    for &col in required {
        if !headers.iter().any(|h| h == col) {
            return Err(PctsError::MissingColumn {
                column: col.to_string(),
                input: path.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Read the category config: `Category, Sub Category, Target Column, unit`.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Vec<ConfigRow>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| PctsError::from_csv(path, e))?;

    let headers = rdr.headers().map_err(|e| PctsError::from_csv(path, e))?.clone();
    require_headers(&headers, &[CATEGORY, SUB_CATEGORY, TARGET_COLUMN, UNIT], path)?;

    let mut rows = Vec::new();
    for result in rdr.deserialize::<ConfigRow>() {
        rows.push(result.map_err(|e| PctsError::from_csv(path, e))?);
    }
    debug!(rows = rows.len(), "loaded config");
    Ok(rows)
}

/// Read the indicator data file. Every cell goes through [`infer_scalar`].
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_data<P: AsRef<Path>>(path: P) -> Result<DataTable> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| PctsError::from_csv(path, e))?;

    let headers: Vec<String> = rdr
        .headers()
        .map_err(|e| PctsError::from_csv(path, e))?
        .iter()
        .map(str::to_string)
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.map_err(|e| PctsError::from_csv(path, e))?;
        let row: DataRow = headers
            .iter()
            .zip(record.iter())
            .map(|(h, cell)| (h.clone(), infer_scalar(cell)))
            .collect();
        rows.push(row);
    }
    debug!(rows = rows.len(), columns = headers.len(), "loaded data");
    Ok(DataTable { headers, rows })
}
