//! HRTF datasets.
//!
//! A dataset is produced offline by `hrtf_preprocess` and written out as a JSON artifact.  At runtime it is loaded
//! once, validated, and then shared immutably (typically behind an `Arc`) by however many processors want it.
mod error;
mod hrtf;

pub use error::DatasetError;
pub use hrtf::*;
