/// One row of the village → subcentre mapping file.
///
/// `first_key` and `second_key` are the raw group-key cells (positional
/// columns 1 and 2); a row where either cleans to a non-empty value opens a
/// new group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRow {
    pub first_key: Option<String>,
    pub second_key: Option<String>,
    pub village_id: String,
}

impl MappingRow {
    pub fn new(first_key: Option<&str>, second_key: Option<&str>, village_id: &str) -> Self {
        Self {
            first_key: first_key.map(str::to_string),
            second_key: second_key.map(str::to_string),
            village_id: village_id.to_string(),
        }
    }
}

/// Villages collected under one subcentre, with their merged outline once
/// the shape merger has run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubcentreGroup {
    pub name: String,
    pub villages: Vec<String>,
    pub geo_wkt: Option<String>,
}
