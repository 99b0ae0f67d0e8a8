//! Small DSP building blocks shared by the real-time processor and the offline dataset pipeline.
mod channel_format;
#[doc(hidden)]
pub mod close_floats;
pub mod complex;
pub mod fft;

pub use channel_format::*;
pub use complex::Complex;
pub use fft::{map_bins, ForwardTransform};
