//! Render a mono wave file binaurally at a fixed position.
//!
//! Usage: `cargo run --example render_wave_file -- dataset.json input.wav output.wav x y z`
//!
//! The input must be mono; stereo input is a configuration failure, exactly as it would be from an audio host.
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use binauralizer as bz;

/// Host-sized blocks, as an audio callback would see them.
const QUANTUM: usize = 128;

fn read_mono(path: &str) -> Result<(Vec<f32>, u32)> {
    let mut reader = hound::WavReader::open(path).with_context(|| format!("Opening {path}"))?;
    let spec = reader.spec();
    if spec.channels != 1 {
        bail!("{path} has {} channels, but only mono input is supported", spec.channels);
    }

    let samples = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<_>, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    Ok((samples, spec.sample_rate))
}

fn main() -> Result<()> {
    env_logger::init();

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() != 7 {
        bail!("Usage: render_wave_file dataset.json input.wav output.wav x y z");
    }

    let coord = |i: usize| -> Result<f32> {
        args[i]
            .parse()
            .with_context(|| format!("{} is not a number", args[i]))
    };
    let position = bz::ListenerPosition::new(coord(4)?, coord(5)?, coord(6)?);

    let dataset = Arc::new(bz::HrtfDataset::load(&args[1]).context("Loading the dataset")?);
    let (mut input, sample_rate) = read_mono(&args[2])?;
    if sample_rate != bz::SR {
        log::warn!(
            "Input is at {} Hz; delays will be computed for that rate, but the dataset was likely measured at {}",
            sample_rate,
            bz::SR
        );
    }

    let config = bz::ProcessorConfigBuilder::default()
        .sample_rate(sample_rate)
        .build()?;
    let mut processor = bz::SpatializationProcessor::with_config(dataset, config);

    // Flush the tail: the last input sample comes out a window plus the longest delay later.
    let tail = processor.half_window() * 2 + processor.ring_capacity();
    input.resize(input.len() + tail, 0.0);

    let mut left = vec![0.0f32; QUANTUM];
    let mut right = vec![0.0f32; QUANTUM];

    let spec = hound::WavSpec {
        channels: 2,
        sample_format: hound::SampleFormat::Float,
        bits_per_sample: 32,
        sample_rate,
    };
    let mut writer = hound::WavWriter::create(&args[3], spec)?;

    for block in input.chunks(QUANTUM) {
        let (l, r) = (&mut left[..block.len()], &mut right[..block.len()]);
        processor.process(&[block], &mut [&mut *l, &mut *r], position)?;
        for (ls, rs) in l.iter().zip(r.iter()) {
            writer.write_sample(*ls)?;
            writer.write_sample(*rs)?;
        }
    }

    writer.finalize()?;
    log::info!("Wrote {}", args[3]);

    Ok(())
}
