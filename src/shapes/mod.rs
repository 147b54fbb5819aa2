//! PCTS village mapping + village GIS outlines → subcentre outlines.

pub mod hierarchy;
pub mod load;
pub mod merge;
pub mod types;

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub use hierarchy::{build_groups, clean_key};
pub use load::{load_mapping, load_shapes, ShapeLookup, DEFAULT_ID_COLUMN};
pub use merge::merge_shapes;
pub use types::{MappingRow, SubcentreGroup};

use crate::error::Result;
use crate::output::write_groups;

/// Which columns of the shape file hold the village id and its outline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShapeColumns {
    pub id_column: String,
    pub wkt_column: Option<String>,
}

impl Default for ShapeColumns {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            wkt_column: None,
        }
    }
}

/// Build every subcentre group from the mapping file and merge its village
/// outlines. Groups come back sorted by name.
#[instrument(level = "info", skip_all, fields(mapping = %mapping_path.display(), shapes = %shapes_path.display()))]
pub fn generate(
    mapping_path: &Path,
    shapes_path: &Path,
    columns: &ShapeColumns,
) -> Result<Vec<SubcentreGroup>> {
    let rows = load_mapping(mapping_path)?;
    let groups = build_groups(&rows);
    info!(rows = rows.len(), groups = groups.len(), "built subcentre groups");

    let shapes = load_shapes(shapes_path, &columns.id_column, columns.wkt_column.as_deref())?;
    info!(villages = shapes.len(), "loaded village outlines");

    Ok(merge_shapes(groups, &shapes)?.into_values().collect())
}

/// [`generate`], then write `name,villages,geo_wkt` rows to `output_path`.
/// Nothing is written unless every group merged.
pub fn generate_to_file(
    mapping_path: &Path,
    shapes_path: &Path,
    output_path: &Path,
    columns: &ShapeColumns,
) -> Result<PathBuf> {
    let groups = generate(mapping_path, shapes_path, columns)?;
    let written = write_groups(output_path, &groups)?;
    info!(groups = groups.len(), "subcentre csv ready");
    Ok(written)
}
