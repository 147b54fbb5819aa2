use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// One row of the category config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ConfigRow {
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Sub Category")]
    pub sub_category: String,
    #[serde(rename = "Target Column")]
    pub target_column: String,
    #[serde(rename = "unit")]
    pub unit: String,
}

/// One location (health sub-centre) of the data file: column name → scalar.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataRow {
    pub values: HashMap<String, Value>,
}

impl DataRow {
    pub fn get(&self, column: &str) -> Option<&Value> {
        self.values.get(column)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for DataRow {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

/// Parsed data file: header order plus rows in file order.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub headers: Vec<String>,
    pub rows: Vec<DataRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category_slug: String,
    pub sub_records: Vec<SubRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubRecord {
    pub record_name: String,
    pub record_slug: String,
    pub unit: String,
    pub record_figures: Vec<FigureEntry>,
}

/// `figures` maps the budget attribute to a list of `{period: value}` entries,
/// which is the shape the story generator front end indexes into.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureEntry {
    pub figures: BTreeMap<String, Vec<BTreeMap<String, Value>>>,
    pub grpby_name: Value,
    pub shc: Value,
    pub block: Value,
    pub sector: Value,
}

/// Fixed labels stamped on every figure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FigureLabels {
    pub budget_attr: String,
    pub period_label: String,
}

impl Default for FigureLabels {
    fn default() -> Self {
        Self {
            budget_attr: "BE".into(),
            period_label: "May, 2017-18".into(),
        }
    }
}

impl FigureLabels {
    pub fn figures_for(&self, value: Value) -> BTreeMap<String, Vec<BTreeMap<String, Value>>> {
        let period = BTreeMap::from([(self.period_label.clone(), value)]);
        BTreeMap::from([(self.budget_attr.clone(), vec![period])])
    }
}
