//! CSV indicator data → nested JSON for the story generator.
//!
//! The config file lists, per row, a category, a sub-category name, the data
//! column holding its values and a display unit. Each category becomes one
//! [`CategoryRecord`]; each config row one [`SubRecord`] with a figure per
//! data row.

pub mod aggregate;
pub mod load;
pub mod types;

use std::path::{Path, PathBuf};
use tracing::{info, instrument};

pub use aggregate::{aggregate, META_COLUMNS};
pub use load::{load_config, load_data};
pub use types::{
    CategoryRecord, ConfigRow, DataRow, DataTable, FigureEntry, FigureLabels, SubRecord,
};

use crate::error::{PctsError, Result};
use crate::output::write_json;

/// Fail on the first meta or target column that the data header lacks.
pub fn check_columns(table: &DataTable, config: &[ConfigRow], data_path: &Path) -> Result<()> {
    let referenced = META_COLUMNS
        .iter()
        .copied()
        .chain(config.iter().map(|c| c.target_column.as_str()));
    for column in referenced {
        if !table.headers.iter().any(|h| h == column) {
            return Err(PctsError::MissingColumn {
                column: column.to_string(),
                input: data_path.display().to_string(),
            });
        }
    }
    Ok(())
}

/// Load both files and build the category records.
#[instrument(level = "info", skip_all, fields(data = %data_path.display(), config = %config_path.display()))]
pub fn convert(
    data_path: &Path,
    config_path: &Path,
    labels: &FigureLabels,
) -> Result<Vec<CategoryRecord>> {
    let config = load_config(config_path)?;
    let table = load_data(data_path)?;
    info!(
        config_rows = config.len(),
        data_rows = table.rows.len(),
        "inputs loaded"
    );

    check_columns(&table, &config, data_path)?;
    aggregate(&table.rows, &config, labels)
}

/// [`convert`], then write the records to `output_path`. The output file is
/// only created once every record has been built.
pub fn convert_to_file(
    data_path: &Path,
    config_path: &Path,
    output_path: &Path,
    labels: &FigureLabels,
    pretty: bool,
) -> Result<PathBuf> {
    let records = convert(data_path, config_path, labels)?;
    let written = write_json(output_path, &records, pretty)?;
    info!(categories = records.len(), "indicator json ready");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::fs;
    use tempfile::TempDir;

    fn write_inputs(dir: &TempDir, data: &str, config: &str) -> Result<(PathBuf, PathBuf)> {
        let data_path = dir.path().join("data.csv");
        let config_path = dir.path().join("config.csv");
        fs::write(&data_path, data)?;
        fs::write(&config_path, config)?;
        Ok((data_path, config_path))
    }

    #[test]
    fn converts_files_end_to_end() -> Result<()> {
        crate::logging::init_test_logging();
        let dir = TempDir::new()?;
        let (data, config) = write_inputs(
            &dir,
            "S.No.,Block,Sector,SHC,anc_reg\n1,Arain,Bandarsindri,Asnawar,137\n2,Arain,Bandarsindri,Badipura,100\n",
            "Category,Sub Category,Target Column,unit\nAnte Natal Care Services,Number of ANC Registrations,anc_reg,\n",
        )?;
        let records = convert(&data, &config, &FigureLabels::default())?;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].category_slug, "ante_natal_care_services");
        assert_eq!(records[0].sub_records[0].record_slug, "number_of_anc_registrations");
        assert_eq!(records[0].sub_records[0].record_figures.len(), 2);
        Ok(())
    }

    #[test]
    fn header_only_data_still_checks_columns() -> Result<()> {
        let dir = TempDir::new()?;
        let (data, config) = write_inputs(
            &dir,
            "Block,Sector,SHC\n",
            "Category,Sub Category,Target Column,unit\nA,B,anc_reg,\n",
        )?;
        match convert(&data, &config, &FigureLabels::default()) {
            Err(PctsError::MissingColumn { column, .. }) => assert_eq!(column, "anc_reg"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn missing_meta_column_is_reported() -> Result<()> {
        let dir = TempDir::new()?;
        let (data, config) = write_inputs(
            &dir,
            "Block,SHC,anc_reg\nArain,Asnawar,1\n",
            "Category,Sub Category,Target Column,unit\nA,B,anc_reg,\n",
        )?;
        match convert(&data, &config, &FigureLabels::default()) {
            Err(PctsError::MissingColumn { column, .. }) => assert_eq!(column, "Sector"),
            other => panic!("expected MissingColumn, got {:?}", other),
        }
        Ok(())
    }

    #[test]
    fn failed_conversion_leaves_no_output() -> Result<()> {
        let dir = TempDir::new()?;
        let (data, config) = write_inputs(
            &dir,
            "Block,Sector,SHC,anc_reg\nArain,Bandarsindri,Asnawar,1\n",
            "Category,Sub Category,Target Column,unit\nA,B,anc_reg,\nA,C,pnc_visits,\n",
        )?;
        let out = dir.path().join("out.json");
        let err = convert_to_file(&data, &config, &out, &FigureLabels::default(), false)
            .unwrap_err();
        assert!(matches!(err, PctsError::MissingColumn { ref column, .. } if column == "pnc_visits"));
        assert!(!out.exists());
        assert_eq!(fs::read_dir(dir.path())?.count(), 2);
        Ok(())
    }

    #[test]
    fn written_file_round_trips() -> Result<()> {
        let dir = TempDir::new()?;
        let (data, config) = write_inputs(
            &dir,
            "Block,Sector,SHC,anc_reg\nArain,Bandarsindri,Asnawar,137\nArain,Bandarsindri,Badipura,12.75\n",
            "Category,Sub Category,Target Column,unit\nAnte Natal Care,ANC Registrations,anc_reg,%\n",
        )?;
        let out = dir.path().join("out.json");
        convert_to_file(&data, &config, &out, &FigureLabels::default(), true)?;
        let back: Vec<CategoryRecord> = serde_json::from_str(&fs::read_to_string(&out)?)?;
        assert_eq!(back, convert(&data, &config, &FigureLabels::default())?);
        Ok(())
    }
}
