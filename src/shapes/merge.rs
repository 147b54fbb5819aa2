use geo::{BooleanOps, Geometry, MultiPolygon};
use std::collections::BTreeMap;
use tracing::{debug, info, instrument};
use wkt::{ToWkt, TryFromWkt};

use super::load::ShapeLookup;
use super::types::SubcentreGroup;
use crate::error::{PctsError, Result};

/// Parse a village outline; only polygons and multipolygons are accepted.
pub fn parse_outline(village: &str, wkt: &str) -> Result<MultiPolygon<f64>> {
    let invalid = |reason: String| PctsError::InvalidGeometry {
        village: village.to_string(),
        reason,
    };
    match Geometry::<f64>::try_from_wkt_str(wkt.trim()).map_err(|e| invalid(e.to_string()))? {
        Geometry::Polygon(p) => Ok(MultiPolygon::new(vec![p])),
        Geometry::MultiPolygon(mp) => Ok(mp),
        _ => Err(invalid(format!(
            "expected a polygon, found {}",
            keyword(wkt)
        ))),
    }
}

fn keyword(wkt: &str) -> &str {
    wkt.trim()
        .split(|c: char| c == '(' || c.is_whitespace())
        .next()
        .unwrap_or("")
}

/// Union of all outlines. A single-part result is returned as a `POLYGON`.
pub fn union_outlines(outlines: &[MultiPolygon<f64>]) -> Geometry<f64> {
    let merged = match outlines.split_first() {
        Some((first, rest)) => rest
            .iter()
            .fold(first.clone(), |acc, next| acc.union(next)),
        None => MultiPolygon::new(Vec::new()),
    };
    if merged.0.len() == 1 {
        let mut parts = merged.0;
        Geometry::Polygon(parts.remove(0))
    } else {
        Geometry::MultiPolygon(merged)
    }
}

fn merge_group(group: &SubcentreGroup, shapes: &ShapeLookup) -> Result<String> {
    let mut texts = Vec::with_capacity(group.villages.len());
    for village in &group.villages {
        let wkt = shapes.get(village).ok_or_else(|| PctsError::UnknownVillage {
            village: village.clone(),
            group: group.name.clone(),
        })?;
        texts.push((village, wkt));
    }

    let outlines = texts
        .iter()
        .map(|(village, wkt)| parse_outline(village, wkt))
        .collect::<Result<Vec<_>>>()?;

    // a lone village keeps its own outline text
    if let [(_, wkt)] = texts.as_slice() {
        return Ok(wkt.trim().to_string());
    }
    Ok(union_outlines(&outlines).wkt_string())
}

/// Attach the merged outline of every group's villages as `geo_wkt`.
///
/// Fails on the first village that has no outline in `shapes`, so a
/// subcentre is never written with a partial boundary.
#[instrument(level = "info", skip_all, fields(groups = groups.len()))]
pub fn merge_shapes(
    groups: BTreeMap<String, SubcentreGroup>,
    shapes: &ShapeLookup,
) -> Result<BTreeMap<String, SubcentreGroup>> {
    let mut merged = BTreeMap::new();
    for (name, mut group) in groups {
        let wkt = merge_group(&group, shapes)?;
        debug!(group = %name, villages = group.villages.len(), "merged outline");
        group.geo_wkt = Some(wkt);
        merged.insert(name, group);
    }
    info!(groups = merged.len(), "merged subcentre shapes");
    Ok(merged)
}
