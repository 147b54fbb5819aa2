use csv::{ByteRecord, ReaderBuilder, Trim};
use std::{collections::HashMap, path::Path};
use tracing::{debug, instrument, warn};

use super::hierarchy::STOP_BYTE;
use super::types::MappingRow;
use crate::error::{PctsError, Result};

/// Positional columns of the mapping file.
pub const FIRST_KEY_COL: usize = 1;
pub const SECOND_KEY_COL: usize = 2;
pub const VILLAGE_COL: usize = 5;

pub const DEFAULT_ID_COLUMN: &str = "CENSUS_CD_2011";

/// Village identifier → WKT outline.
pub type ShapeLookup = HashMap<String, String>;

/// Trim an identifier and drop the `.0` a float rendering of an integer code adds.
pub fn normalize_id(raw: &str) -> String {
    let s = raw.trim();
    match s.strip_suffix(".0") {
        Some(int) if !int.is_empty() && int.bytes().all(|b| b.is_ascii_digit()) => int.to_string(),
        _ => s.to_string(),
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn key_cell(record: &ByteRecord, idx: usize) -> Option<String> {
    let raw = record.get(idx)?;
    let stripped: Vec<u8> = raw.iter().copied().filter(|&b| b != STOP_BYTE).collect();
    if stripped.is_empty() {
        None
    } else {
        Some(decode(&stripped))
    }
}

/// Read the PCTS village → subcentre mapping, which has a header row and at
/// least six positional columns.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_mapping<P: AsRef<Path>>(path: P) -> Result<Vec<MappingRow>> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| PctsError::from_csv(path, e))?;

    let mut rows = Vec::new();
    let mut record = ByteRecord::new();
    let mut line = 1usize;
    while rdr
        .read_byte_record(&mut record)
        .map_err(|e| PctsError::from_csv(path, e))?
    {
        line += 1;
        if record.len() <= VILLAGE_COL {
            return Err(PctsError::malformed(
                path,
                format!(
                    "record {} has {} fields, expected at least {}",
                    line,
                    record.len(),
                    VILLAGE_COL + 1
                ),
            ));
        }
        rows.push(MappingRow {
            first_key: key_cell(&record, FIRST_KEY_COL),
            second_key: key_cell(&record, SECOND_KEY_COL),
            village_id: normalize_id(&decode(&record[VILLAGE_COL])),
        });
    }
    debug!(rows = rows.len(), "loaded mapping");
    Ok(rows)
}

/// Read the village shape file into a lookup keyed by `id_column`.
///
/// The outline comes from `wkt_column` or, when unset, the first column that
/// is not the id column. Repeated ids keep their first outline.
#[instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_shapes<P: AsRef<Path>>(
    path: P,
    id_column: &str,
    wkt_column: Option<&str>,
) -> Result<ShapeLookup> {
    let path = path.as_ref();
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_path(path)
        .map_err(|e| PctsError::from_csv(path, e))?;

    let headers = rdr.headers().map_err(|e| PctsError::from_csv(path, e))?.clone();
    let missing = |column: &str| PctsError::MissingColumn {
        column: column.to_string(),
        input: path.display().to_string(),
    };

    let id_idx = headers
        .iter()
        .position(|h| h == id_column)
        .ok_or_else(|| missing(id_column))?;
    let wkt_idx = match wkt_column {
        Some(name) => headers
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| missing(name))?,
        None => (0..headers.len())
            .find(|&i| i != id_idx)
            .ok_or_else(|| PctsError::malformed(path, "no geometry column besides the id column"))?,
    };
    debug!(
        id_column,
        wkt_column = &headers[wkt_idx],
        "resolved shape columns"
    );

    let mut lookup = ShapeLookup::new();
    for result in rdr.records() {
        let record = result.map_err(|e| PctsError::from_csv(path, e))?;
        let id = normalize_id(&record[id_idx]);
        if lookup.contains_key(&id) {
            warn!(village = %id, "repeated village id in shape file, keeping the first outline");
            continue;
        }
        lookup.insert(id, record[wkt_idx].to_string());
    }
    debug!(villages = lookup.len(), "loaded village shapes");
    Ok(lookup)
}
