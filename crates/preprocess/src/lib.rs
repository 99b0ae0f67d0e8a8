//! Offline conversion of measured impulse responses into the frequency-domain artifact the runtime loads.
//!
//! Input is a JSON array of [RawMeasurement], one per ear per direction, with elevations given as measurement indices.
//! Left and right records for the same direction are paired up, each impulse response is zero-padded and transformed,
//! and the result is validated as an [HrtfDataset] before anything gets written.
use std::io::Read;

use ahash::{HashMap, HashMapExt};
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use binaural_datasets::{DatasetError, HrtfDataset, HrtfEntry};
use binaural_dsp::{Complex, ForwardTransform};

pub const LEFT_CHANNEL: u8 = 0;
pub const RIGHT_CHANNEL: u8 = 1;

/// Elevation indices run from 0 (the horizontal plane) to this value (straight up).
pub const ELEVATION_STEPS: f64 = 13.0;

/// Values in the artifact are kept to this many decimal places.
pub const DECIMAL_PLACES: i32 = 5;

/// One ear's measurement for one direction.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawMeasurement {
    /// 0 for the left ear, 1 for the right.
    pub channel: u8,

    /// An index in `0..=13`, or negative below the horizontal plane.  Not degrees.
    pub elevation: i32,

    /// Degrees.
    pub azimuth: i32,

    pub impulse_response: Vec<f32>,
}

/// How impulse responses are laid out before the transform.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Padding {
    /// Prepend as many zeros as there are samples, so the spectrum has twice as many bins as the response has taps.
    #[default]
    Leading,

    /// Transform the response as-is.
    Raw,
}

#[derive(Debug, thiserror::Error)]
pub enum PreprocessError {
    #[error("No right-channel measurement for elevation {elevation}, azimuth {azimuth}")]
    MissingRightChannel { elevation: i32, azimuth: i32 },

    #[error("Measurement {index} has channel {channel}; only 0 and 1 are understood")]
    UnknownChannel { index: usize, channel: u8 },

    #[error("Measurement {index} has an empty impulse response")]
    EmptyImpulse { index: usize },

    #[error("The generated dataset is invalid: {0}")]
    Dataset(#[from] DatasetError),

    #[error("Could not parse measurements: {0}")]
    Parse(#[from] serde_json::Error),
}

pub fn load_raw(reader: impl Read) -> Result<Vec<RawMeasurement>, PreprocessError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Map an elevation index to whole degrees.
pub fn rescale_elevation(index: i32) -> i32 {
    (index as f64 / ELEVATION_STEPS * 90.0).round() as i32
}

pub fn round_to_precision(value: f32) -> f32 {
    let scale = 10f64.powi(DECIMAL_PLACES);
    ((value as f64 * scale).round() / scale) as f32
}

/// Transform one impulse response into interleaved `re, im` pairs.
pub fn frequency_response(
    planner: &mut FftPlanner<f32>,
    impulse: &[f32],
    padding: Padding,
) -> Vec<f32> {
    let leading = match padding {
        Padding::Leading => impulse.len(),
        Padding::Raw => 0,
    };

    let mut buffer = std::iter::repeat(Complex::new(0.0, 0.0))
        .take(leading)
        .chain(impulse.iter().map(|x| Complex::new(*x, 0.0)))
        .collect::<Vec<_>>();

    ForwardTransform::with_planner(planner, buffer.len()).forward_in_place(&mut buffer);

    buffer
        .iter()
        .flat_map(|c| [round_to_precision(c.re), round_to_precision(c.im)])
        .collect()
}

fn check_measurements(raw: &[RawMeasurement]) -> Result<(), PreprocessError> {
    for (index, m) in raw.iter().enumerate() {
        if m.channel != LEFT_CHANNEL && m.channel != RIGHT_CHANNEL {
            return Err(PreprocessError::UnknownChannel {
                index,
                channel: m.channel,
            });
        }

        if m.impulse_response.is_empty() {
            return Err(PreprocessError::EmptyImpulse { index });
        }
    }

    Ok(())
}

/// Pair, transform, and validate a set of measurements.
///
/// Entries come out in the order their left-channel records appear.  If a direction has more than one right-channel
/// record, the first one is used.  Extra right-channel records without a left partner are ignored.
pub fn preprocess(
    raw: &[RawMeasurement],
    padding: Padding,
) -> Result<HrtfDataset, PreprocessError> {
    check_measurements(raw)?;

    let mut rights: HashMap<(i32, i32), &RawMeasurement> = HashMap::new();
    for m in raw.iter().filter(|m| m.channel == RIGHT_CHANNEL) {
        rights.entry((m.elevation, m.azimuth)).or_insert(m);
    }

    let mut planner = FftPlanner::new();
    let mut entries = vec![];

    for left in raw.iter().filter(|m| m.channel == LEFT_CHANNEL) {
        let right = rights.get(&(left.elevation, left.azimuth)).ok_or(
            PreprocessError::MissingRightChannel {
                elevation: left.elevation,
                azimuth: left.azimuth,
            },
        )?;

        entries.push(HrtfEntry {
            elevation: rescale_elevation(left.elevation),
            azimuth: left.azimuth,
            complex_freq_resp_l: frequency_response(
                &mut planner,
                &left.impulse_response,
                padding,
            ),
            complex_freq_resp_r: frequency_response(
                &mut planner,
                &right.impulse_response,
                padding,
            ),
        });
    }

    log::debug!(
        "Paired {} directions out of {} measurements",
        entries.len(),
        raw.len()
    );

    Ok(HrtfDataset::from_entries(entries)?)
}
