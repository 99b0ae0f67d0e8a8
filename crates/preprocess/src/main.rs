//! Command line front end for building HRTF dataset artifacts.
//!
//! `generate` runs the offline preprocessing step; `inspect` loads an artifact exactly as the runtime would and
//! summarizes it.  Set `RUST_LOG=info` to see progress.
mod cli_args;
mod commands;

fn main() -> anyhow::Result<()> {
    use clap::Parser;

    env_logger::init();

    let args = cli_args::CliArgs::parse();
    commands::dispatch_command(args)
}
