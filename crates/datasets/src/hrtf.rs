use std::io::{Read, Write};
use std::path::Path;

use binaural_dsp::Complex;
use serde::{Deserialize, Serialize};

use crate::DatasetError;

/// One measured direction.
///
/// The responses are the frequency responses of the left and right ears, stored as interleaved `re, im` pairs per
/// bin.  Every entry of a dataset has the same number of bins, which is twice the half-window the runtime analyzes
/// with.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HrtfEntry {
    /// Degrees, where -90 is straight down and 90 straight up.
    pub elevation: i32,

    /// Degrees, starting from 0 and proceeding clockwise.
    pub azimuth: i32,

    pub complex_freq_resp_l: Vec<f32>,
    pub complex_freq_resp_r: Vec<f32>,
}

impl HrtfEntry {
    /// Number of frequency bins in each response.
    pub fn bin_count(&self) -> usize {
        self.complex_freq_resp_l.len() / 2
    }

    #[inline(always)]
    pub fn left_bin(&self, index: usize) -> Complex<f32> {
        Complex::new(
            self.complex_freq_resp_l[index * 2],
            self.complex_freq_resp_l[index * 2 + 1],
        )
    }

    #[inline(always)]
    pub fn right_bin(&self, index: usize) -> Complex<f32> {
        Complex::new(
            self.complex_freq_resp_r[index * 2],
            self.complex_freq_resp_r[index * 2 + 1],
        )
    }
}

/// A validated, immutable HRTF dataset.
///
/// There is intentionally no way to get a mutable reference to the entries: datasets are shared between processors,
/// and their order is meaningful (ties in direction matching go to the earlier entry).
#[derive(Debug)]
pub struct HrtfDataset {
    entries: Vec<HrtfEntry>,
}

fn validate(entries: &[HrtfEntry]) -> Result<(), DatasetError> {
    let first = entries.first().ok_or(DatasetError::Empty)?;
    let expected_len = first.complex_freq_resp_l.len();

    if expected_len == 0 || expected_len % 4 != 0 {
        return Err(DatasetError::BadResponseLength {
            index: 0,
            len: expected_len,
        });
    }

    for (index, entry) in entries.iter().enumerate() {
        if !(-90..=90).contains(&entry.elevation) {
            return Err(DatasetError::ElevationOutOfRange {
                index,
                elevation: entry.elevation,
            });
        }

        if !(0..=360).contains(&entry.azimuth) {
            return Err(DatasetError::AzimuthOutOfRange {
                index,
                azimuth: entry.azimuth,
            });
        }

        for response in [&entry.complex_freq_resp_l, &entry.complex_freq_resp_r] {
            if response.len() != expected_len {
                return Err(DatasetError::MismatchedResponseLength {
                    index,
                    expected: expected_len,
                    found: response.len(),
                });
            }

            if let Some(position) = response.iter().position(|x| !x.is_finite()) {
                return Err(DatasetError::NonFinite { index, position });
            }
        }
    }

    Ok(())
}

impl HrtfDataset {
    pub fn from_entries(entries: Vec<HrtfEntry>) -> Result<Self, DatasetError> {
        validate(&entries)?;
        Ok(Self { entries })
    }

    /// Parse and validate a JSON artifact.
    pub fn from_reader(reader: impl Read) -> Result<Self, DatasetError> {
        let entries: Vec<HrtfEntry> = serde_json::from_reader(reader)?;
        Self::from_entries(entries)
    }

    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let entries: Vec<HrtfEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Load a JSON artifact from disk.
    ///
    /// Call this at startup, never from an audio thread.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    /// Write this dataset out as a JSON artifact.
    pub fn write_to(&self, writer: impl Write) -> Result<(), DatasetError> {
        serde_json::to_writer(writer, &self.entries)?;
        Ok(())
    }

    pub fn entries(&self) -> &[HrtfEntry] {
        &self.entries[..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false, since validation rejects empty datasets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of frequency bins per response, `2N`.
    pub fn bin_count(&self) -> usize {
        self.entries[0].bin_count()
    }

    /// The analysis half-window `N` that processors using this dataset must use.
    pub fn half_window(&self) -> usize {
        self.bin_count() / 2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    fn entry(elevation: i32, azimuth: i32, floats: usize) -> HrtfEntry {
        HrtfEntry {
            elevation,
            azimuth,
            complex_freq_resp_l: (0..floats).map(|x| x as f32).collect(),
            complex_freq_resp_r: (0..floats).map(|x| -(x as f32)).collect(),
        }
    }

    #[test]
    fn test_accessors() {
        let ds = HrtfDataset::from_entries(vec![entry(0, 0, 16), entry(10, 90, 16)]).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.bin_count(), 8);
        assert_eq!(ds.half_window(), 4);

        let e = &ds.entries()[0];
        assert_eq!(e.left_bin(3), Complex::new(6.0, 7.0));
        assert_eq!(e.right_bin(3), Complex::new(-6.0, -7.0));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            HrtfDataset::from_entries(vec![]),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn test_rejects_bad_lengths() {
        assert!(matches!(
            HrtfDataset::from_entries(vec![entry(0, 0, 6)]),
            Err(DatasetError::BadResponseLength { index: 0, len: 6 })
        ));

        let mut bad = entry(0, 5, 16);
        bad.complex_freq_resp_r.pop();
        assert!(matches!(
            HrtfDataset::from_entries(vec![entry(0, 0, 16), bad]),
            Err(DatasetError::MismatchedResponseLength {
                index: 1,
                expected: 16,
                found: 15
            })
        ));
    }

    #[test]
    fn test_rejects_out_of_range_angles() {
        assert!(matches!(
            HrtfDataset::from_entries(vec![entry(91, 0, 8)]),
            Err(DatasetError::ElevationOutOfRange { .. })
        ));
        assert!(matches!(
            HrtfDataset::from_entries(vec![entry(0, -5, 8)]),
            Err(DatasetError::AzimuthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_rejects_nan() {
        let mut bad = entry(0, 0, 8);
        bad.complex_freq_resp_l[3] = f32::NAN;
        assert!(matches!(
            HrtfDataset::from_entries(vec![bad]),
            Err(DatasetError::NonFinite {
                index: 0,
                position: 3
            })
        ));
    }

    #[test]
    fn test_artifact_format() {
        let json = r#"[
            {
                "elevation": -40,
                "azimuth": 355,
                "complexFreqRespL": [1.0, 0.0, 0.5, -0.5],
                "complexFreqRespR": [0.25, 0.0, 0.0, 0.125]
            }
        ]"#;

        let ds = HrtfDataset::from_json_str(json).unwrap();
        assert_eq!(ds.half_window(), 1);
        assert_eq!(
            ds.entries()[0],
            HrtfEntry {
                elevation: -40,
                azimuth: 355,
                complex_freq_resp_l: vec![1.0, 0.0, 0.5, -0.5],
                complex_freq_resp_r: vec![0.25, 0.0, 0.0, 0.125],
            }
        );

        let mut written = vec![];
        ds.write_to(&mut written).unwrap();
        let reread = HrtfDataset::from_reader(&written[..]).unwrap();
        assert_eq!(reread.entries(), ds.entries());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            HrtfDataset::from_json_str("[{\"elevation\": 0}]"),
            Err(DatasetError::Parse(_))
        ));
    }
}
