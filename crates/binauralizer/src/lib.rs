//! Real-time binaural rendering of a mono source from a measured HRTF dataset.
//!
//! The pieces, leaves first:
//!
//! - [position] turns a listener-relative position into a direction, a distance, and a delay per ear.
//! - [selector] finds the closest measured direction in a [HrtfDataset].
//! - [SpatializationProcessor] is the real-time core, driven once per host quantum.
//! - [PositionControl] hands positions from a control thread to the render thread.
//!
//! Datasets are built offline by the `hrtf_preprocess` tool and loaded with [HrtfDataset::load] before processing
//! starts.
#[macro_use]
mod logging;

pub mod config;
mod control;
mod data_structures;
mod error;
mod is_audio_thread;
pub mod position;
mod processor;
pub mod selector;

pub use binaural_datasets::{DatasetError, HrtfDataset, HrtfEntry};
pub use config::{ProcessorConfig, ProcessorConfigBuilder, SR};
pub use control::PositionControl;
pub use error::{Error, HaltedError, LayoutError, Result};
pub use is_audio_thread::mark_audio_thread;
pub use position::{ListenerPosition, MappedPosition};
pub use processor::SpatializationProcessor;
