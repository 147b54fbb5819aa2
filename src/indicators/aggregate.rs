use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::types::{CategoryRecord, ConfigRow, DataRow, FigureEntry, FigureLabels, SubRecord};
use crate::error::{PctsError, Result};
use crate::slug::slug;

pub const SHC: &str = "SHC";
pub const SECTOR: &str = "Sector";
pub const BLOCK: &str = "Block";

/// Columns every data row must carry besides the configured targets.
pub const META_COLUMNS: [&str; 3] = [SHC, SECTOR, BLOCK];

fn lookup<'a>(row: &'a DataRow, column: &str, row_idx: usize) -> Result<&'a Value> {
    row.get(column).ok_or_else(|| PctsError::MissingColumn {
        column: column.to_string(),
        input: format!("data row {}", row_idx),
    })
}

fn build_sub_record(
    config: &ConfigRow,
    data: &[DataRow],
    labels: &FigureLabels,
) -> Result<SubRecord> {
    let record_figures = data
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let value = lookup(row, &config.target_column, idx)?.clone();
            let shc = lookup(row, SHC, idx)?.clone();
            Ok(FigureEntry {
                figures: labels.figures_for(value),
                grpby_name: shc.clone(),
                shc,
                block: lookup(row, BLOCK, idx)?.clone(),
                sector: lookup(row, SECTOR, idx)?.clone(),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(SubRecord {
        record_name: config.sub_category.clone(),
        record_slug: slug(&config.sub_category),
        unit: config.unit.clone(),
        record_figures,
    })
}

/// Reshape `data` into one [`CategoryRecord`] per distinct config category.
///
/// Categories come out in ascending order of the raw category string; the
/// sub-records of a category keep config file order and every sub-record
/// carries one figure per data row, in data order. A column missing from any
/// row fails the whole call.
pub fn aggregate(
    data: &[DataRow],
    config: &[ConfigRow],
    labels: &FigureLabels,
) -> Result<Vec<CategoryRecord>> {
    let mut by_category: BTreeMap<&str, Vec<&ConfigRow>> = BTreeMap::new();
    for row in config {
        by_category.entry(row.category.as_str()).or_default().push(row);
    }

    let mut out = Vec::with_capacity(by_category.len());
    for (category, rows) in by_category {
        let sub_records = rows
            .into_iter()
            .map(|cfg| build_sub_record(cfg, data, labels))
            .collect::<Result<Vec<_>>>()?;
        debug!(category, sub_records = sub_records.len(), "built category");
        out.push(CategoryRecord {
            category_slug: slug(category),
            sub_records,
        });
    }

    info!(
        categories = out.len(),
        locations = data.len(),
        "aggregated indicators"
    );
    Ok(out)
}
