//! Validates a produced dataset before it is handed to model training:
//! `dataset_check path/to/drafts.csv`

use std::path::PathBuf;

use anyhow::{Context, Result};

use draftscope::persist::{self, MODEL_FEATURE_COLUMNS};

fn run() -> Result<()> {
    let path: PathBuf = std::env::args_os()
        .nth(1)
        .context("usage: dataset_check <dataset.csv>")?
        .into();
    persist::require_columns(&path, MODEL_FEATURE_COLUMNS)?;
    println!(
        "{}: all {} model columns present",
        path.display(),
        MODEL_FEATURE_COLUMNS.len()
    );
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
