thread_local! {
    static IS_AUDIO_THREAD: std::cell::Cell<bool> = const { std::cell::Cell::new(false) };
}

pub(crate) fn is_audio_thread() -> bool {
    IS_AUDIO_THREAD.with(|x| x.get())
}

/// Mark this thread as being an audio thread, which routes logging from it through the realtime-safe queue instead of
/// straight into the `log` crate.
///
/// [crate::SpatializationProcessor::process] does this itself; hosts only need it if they want their own callback code
/// to share the same logging behavior.
#[inline(always)]
pub fn mark_audio_thread() {
    IS_AUDIO_THREAD.with(|x| x.set(true));
}
