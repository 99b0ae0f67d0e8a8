use std::num::NonZeroUsize;

/// A format for audio data.
#[derive(Clone, Copy, Debug, Eq, PartialEq, derive_more::IsVariant, derive_more::Display)]
pub enum ChannelFormat {
    /// This is single-channel mono audio.
    #[display(fmt = "mono")]
    Mono,

    /// This is stereo audio: 2 channels [l r].
    #[display(fmt = "stereo")]
    Stereo,

    /// This is some raw audio data without an interpretation.
    #[display(fmt = "{} raw channels", channels)]
    Raw { channels: NonZeroUsize },
}

impl ChannelFormat {
    pub fn get_channel_count(&self) -> usize {
        match self {
            ChannelFormat::Mono => 1,
            ChannelFormat::Stereo => 2,
            ChannelFormat::Raw { channels, .. } => channels.get(),
        }
    }

    /// Interpret a channel count coming from a host.
    ///
    /// Returns `None` for 0 channels, which isn't a format at all.
    pub fn from_channel_count(channels: usize) -> Option<ChannelFormat> {
        match channels {
            0 => None,
            1 => Some(ChannelFormat::Mono),
            2 => Some(ChannelFormat::Stereo),
            n => NonZeroUsize::new(n).map(|channels| ChannelFormat::Raw { channels }),
        }
    }
}
