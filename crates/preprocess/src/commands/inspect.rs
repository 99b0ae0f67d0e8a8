use anyhow::{Context, Result};
use itertools::Itertools;

use binaural_datasets::HrtfDataset;

use crate::cli_args::{CliArgs, InspectArgs};

pub fn inspect(_top_args: &CliArgs, inspect_args: &InspectArgs) -> Result<()> {
    let dataset = HrtfDataset::load(&inspect_args.path)
        .with_context(|| format!("Loading {}", inspect_args.path.display()))?;

    let elevations = dataset
        .entries()
        .iter()
        .map(|e| e.elevation)
        .sorted()
        .dedup()
        .join(", ");

    println!("Entries: {}", dataset.len());
    println!("Bins per response: {}", dataset.bin_count());
    println!("Half-window: {}", dataset.half_window());
    println!("Elevations: {elevations}");
    Ok(())
}
