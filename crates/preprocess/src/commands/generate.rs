use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::cli_args::{CliArgs, GenerateArgs};

fn temporary_path_for(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Write `output` through a temporary file next to it, renaming into place only if `write` succeeds.
///
/// On failure the temporary file is removed and `output` is left as it was.
fn replace_file(
    output: &Path,
    write: impl FnOnce(&mut BufWriter<File>) -> Result<()>,
) -> Result<()> {
    let tmp_path = temporary_path_for(output);

    let written = File::create(&tmp_path)
        .with_context(|| format!("Creating {}", tmp_path.display()))
        .and_then(|file| {
            let mut writer = BufWriter::new(file);
            write(&mut writer)?;
            writer.flush()?;
            Ok(())
        });

    if let Err(e) = written {
        if let Err(cleanup) = std::fs::remove_file(&tmp_path) {
            log::debug!("Could not remove {}: {}", tmp_path.display(), cleanup);
        }
        return Err(e);
    }

    std::fs::rename(&tmp_path, output)
        .with_context(|| format!("Moving artifact into {}", output.display()))
}

pub fn generate(_top_args: &CliArgs, generate_args: &GenerateArgs) -> Result<()> {
    let input = File::open(&generate_args.input)
        .with_context(|| format!("Opening {}", generate_args.input.display()))?;
    let raw = hrtf_preprocess::load_raw(BufReader::new(input))?;
    log::info!(
        "Read {} measurements from {}",
        raw.len(),
        generate_args.input.display()
    );

    let dataset = hrtf_preprocess::preprocess(&raw, generate_args.padding)?;

    replace_file(&generate_args.output, |writer| {
        dataset.write_to(writer)?;
        Ok(())
    })?;

    log::info!(
        "Wrote {} entries with a half-window of {} to {}",
        dataset.len(),
        dataset.half_window(),
        generate_args.output.display()
    );
    Ok(())
}
