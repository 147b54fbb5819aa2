use anyhow::{Context, Result};
use clap::Parser;
use pcts_tools::{
    indicators::{self, FigureLabels},
    logging,
};
use std::path::PathBuf;
use tracing::info;

/// Convert PCTS indicator data into the story generator's JSON format.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Input PCTS data file (SHC, Sector, Block and every target column)
    data_file: PathBuf,

    /// Config file with Category, Sub Category, Target Column and unit
    config_file: PathBuf,

    /// Output JSON path
    output_json_file: PathBuf,

    /// Budget attribute the figures are filed under
    #[arg(long, default_value = "BE")]
    budget_attr: String,

    /// Reporting period label attached to every value
    #[arg(long, default_value = "May, 2017-18")]
    period_label: String,

    /// Pretty-print the JSON
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    logging::init();
    let args = Args::parse();
    info!(?args, "startup");

    let labels = FigureLabels {
        budget_attr: args.budget_attr,
        period_label: args.period_label,
    };

    let written = indicators::convert_to_file(
        &args.data_file,
        &args.config_file,
        &args.output_json_file,
        &labels,
        args.pretty,
    )
    .with_context(|| {
        format!(
            "converting {} with {} into {}",
            args.data_file.display(),
            args.config_file.display(),
            args.output_json_file.display()
        )
    })?;

    info!(path = %written.display(), "all done");
    Ok(())
}
