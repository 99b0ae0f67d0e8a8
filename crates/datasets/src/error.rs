/// Reasons a dataset can fail to load or validate.
#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("Found an HRTF dataset without any entries")]
    Empty,

    #[error("Entry {index}: responses must be a nonzero multiple of 4 floats long, but found {len}")]
    BadResponseLength { index: usize, len: usize },

    #[error("Entry {index}: expected responses of {expected} floats, but found {found}")]
    MismatchedResponseLength {
        index: usize,
        expected: usize,
        found: usize,
    },

    #[error("Entry {index}: response contains a non-finite value at position {position}")]
    NonFinite { index: usize, position: usize },

    #[error("Entry {index}: elevation {elevation} is not in -90..=90")]
    ElevationOutOfRange { index: usize, elevation: i32 },

    #[error("Entry {index}: azimuth {azimuth} is not in 0..=360")]
    AzimuthOutOfRange { index: usize, azimuth: i32 },

    #[error("Unable to parse dataset: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
