mod input_window;
mod output_ring;

pub(crate) use input_window::*;
pub(crate) use output_ring::*;
