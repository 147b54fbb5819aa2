use anyhow::{Context, Result};
use clap::Parser;
use pcts_tools::{
    logging,
    shapes::{self, ShapeColumns, DEFAULT_ID_COLUMN},
};
use std::path::PathBuf;
use tracing::info;

/// Generate subcentre outlines (WKT) from PCTS village mappings and village GIS.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input PCTS data file mapping villages to PHCs/SHCs
    pcts_data_file: PathBuf,

    /// Village shape file with one WKT outline per village
    village_map_file: PathBuf,

    /// Output CSV path
    output_csv_file: PathBuf,

    /// Village identifier column of the shape file
    #[arg(long, default_value = DEFAULT_ID_COLUMN)]
    id_column: String,

    /// WKT column of the shape file (default: first non-id column)
    #[arg(long)]
    wkt_column: Option<String>,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    info!(?args, "startup");

    let columns = ShapeColumns {
        id_column: args.id_column,
        wkt_column: args.wkt_column,
    };

    let written = shapes::generate_to_file(
        &args.pcts_data_file,
        &args.village_map_file,
        &args.output_csv_file,
        &columns,
    )
    .with_context(|| {
        format!(
            "merging {} with {} into {}",
            args.pcts_data_file.display(),
            args.village_map_file.display(),
            args.output_csv_file.display()
        )
    })?;

    info!(path = %written.display(), "all done");
    Ok(())
}
