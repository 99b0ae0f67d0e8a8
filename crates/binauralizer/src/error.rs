use binaural_datasets::DatasetError;

/// The host handed the processor something other than one mono input and one stereo output.
///
/// Built on the audio thread, so it must never allocate.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("Expected {expected} input channel (mono), but the host provided {found}")]
    Input { expected: usize, found: usize },

    #[error("Expected {expected} output channels (stereo), but the host provided {found}")]
    Output { expected: usize, found: usize },

    #[error("Output channels must be the same length, but got {left} and {right}")]
    UnequalOutputs { left: usize, right: usize },
}

/// The processor stopped after a configuration failure and will not process again.
#[derive(Debug, thiserror::Error)]
#[error("This processor has halted after a previous configuration failure")]
pub struct HaltedError;

#[derive(Debug, derive_more::Display, derive_more::IsVariant)]
enum ErrorPayload {
    #[display(fmt = "Dataset error: {}", _0)]
    Dataset(DatasetError),

    #[display(fmt = "Channel layout error: {}", _0)]
    Layout(LayoutError),

    #[display(fmt = "{}", _0)]
    Halted(HaltedError),
}

#[derive(Debug, thiserror::Error)]
#[error("{payload}")]
pub struct Error {
    payload: ErrorPayload,
}

macro_rules! conv {
    ($variant: ident, $from_err: path) => {
        impl From<$from_err> for Error {
            fn from(value: $from_err) -> Error {
                Error {
                    payload: ErrorPayload::$variant(value),
                }
            }
        }
    };
}

conv!(Dataset, DatasetError);
conv!(Layout, LayoutError);
conv!(Halted, HaltedError);

impl Error {
    /// Was the dataset unusable?
    pub fn is_dataset(&self) -> bool {
        self.payload.is_dataset()
    }

    /// Did the host present the wrong channel layout?
    ///
    /// This is a configuration failure. The processor halts, and the host should stop invoking it.
    pub fn is_layout(&self) -> bool {
        self.payload.is_layout()
    }

    /// Was the processor already halted?
    pub fn is_halted(&self) -> bool {
        self.payload.is_halted()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
