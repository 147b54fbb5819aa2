use std::path::{Path, PathBuf};
use tracing::info;

use super::atomic::AtomicFile;
use crate::error::Result;
use crate::shapes::SubcentreGroup;

pub const HEADER: [&str; 3] = ["name", "villages", "geo_wkt"];

/// Render a village list as `[id1, id2, ...]`.
pub fn format_villages(villages: &[String]) -> String {
    format!("[{}]", villages.join(", "))
}

/// Write one `name,villages,geo_wkt` row per group, in iteration order.
pub fn write_groups<'a, I>(path: &Path, groups: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = &'a SubcentreGroup>,
{
    let mut wtr = csv::Writer::from_writer(AtomicFile::create(path)?);
    wtr.write_record(HEADER)?;

    let mut rows = 0usize;
    for group in groups {
        wtr.write_record([
            group.name.as_str(),
            format_villages(&group.villages).as_str(),
            group.geo_wkt.as_deref().unwrap_or(""),
        ])?;
        rows += 1;
    }

    let file = wtr.into_inner().map_err(|e| e.into_error())?;
    let written = file.commit()?;
    info!(path = %written.display(), rows, "wrote subcentre csv");
    Ok(written)
}
