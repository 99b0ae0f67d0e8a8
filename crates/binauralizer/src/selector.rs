//! Nearest-direction matching against a dataset.
//!
//! Datasets are sparse: only measured directions exist.  We pick the entry whose elevation and azimuth are closest to
//! the query, measuring both around the circle.  This is a plain linear scan over a shared, immutable dataset; nothing
//! is sorted or cached, so any number of processors can select from the same dataset at once.
use binaural_datasets::{HrtfDataset, HrtfEntry};

/// Distance between two angles in degrees, accounting for wraparound at the 0/360 seam.
///
/// For angles within `-180..360` of each other this is at most 180.
pub fn circular_angle_diff(a: f64, b: f64) -> f64 {
    let direct = (a - b).abs();
    let wrapped_a = (a + 360.0 - b).abs();
    let wrapped_b = (a - (b + 360.0)).abs();
    direct.min(wrapped_a).min(wrapped_b)
}

pub fn score(entry: &HrtfEntry, elevation: f64, azimuth: f64) -> f64 {
    circular_angle_diff(entry.elevation as f64, elevation)
        + circular_angle_diff(entry.azimuth as f64, azimuth)
}

/// Find the entry with the lowest [score].  Ties go to whichever entry comes first in the dataset.
pub fn select_nearest(dataset: &HrtfDataset, elevation: f64, azimuth: f64) -> &HrtfEntry {
    let entries = dataset.entries();
    // Datasets are validated to be non-empty.
    let mut best = &entries[0];
    let mut best_score = score(best, elevation, azimuth);

    for entry in &entries[1..] {
        let s = score(entry, elevation, azimuth);
        // Strictly less, so that the first of several equal entries wins.
        if s < best_score {
            best = entry;
            best_score = s;
        }
    }

    best
}
