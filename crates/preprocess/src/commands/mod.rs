mod generate;
mod inspect;

use crate::cli_args;

/// Figure out what command to run, then run it.
pub fn dispatch_command(args: cli_args::CliArgs) -> anyhow::Result<()> {
    match &args.command {
        cli_args::Command::Generate(g) => generate::generate(&args, g),
        cli_args::Command::Inspect(i) => inspect::inspect(&args, i),
    }
}
