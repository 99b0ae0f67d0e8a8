//! Definition of the Clap command line.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use hrtf_preprocess::Padding;

#[derive(Debug, Parser)]
#[command(about = "Build and inspect HRTF datasets")]
pub struct CliArgs {
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Convert raw impulse-response measurements into a dataset artifact.
    Generate(GenerateArgs),

    /// Print a summary of a dataset artifact.
    Inspect(InspectArgs),
}

#[derive(Debug, Parser)]
pub struct GenerateArgs {
    /// JSON array of measurements with `channel`, `elevation`, `azimuth`, and `impulseResponse` fields.
    #[arg(long)]
    pub input: PathBuf,

    /// Where to write the artifact.  Only replaced once the whole dataset has been built and validated.
    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = Padding::Leading)]
    pub padding: Padding,
}

#[derive(Debug, Parser)]
pub struct InspectArgs {
    pub path: PathBuf,
}
