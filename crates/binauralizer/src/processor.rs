use std::path::Path;
use std::sync::Arc;

use binaural_datasets::HrtfDataset;
use binaural_dsp::complex::multiply;
use binaural_dsp::{map_bins, ChannelFormat, Complex, ForwardTransform};

use crate::config::{ProcessorConfig, RING_CAPACITY_FACTOR};
use crate::data_structures::*;
use crate::error::{HaltedError, LayoutError};
use crate::is_audio_thread::mark_audio_thread;
use crate::position::ListenerPosition;
use crate::selector::select_nearest;
use crate::Result;

/// Renders one mono source as binaural stereo.
///
/// The processor analyzes its input in overlapping windows of `2N` samples, advancing by `N` at a time, where `N` is
/// [HrtfDataset::half_window].  Each time a window fills it:
///
/// - maps the current [ListenerPosition] to a direction, a distance, and a delay for each ear;
/// - picks the nearest measured direction from the dataset;
/// - transforms the window, multiplies each bin by that direction's response for each ear, and takes the real parts of
///   the first `N` bins as the ear's output;
/// - scales by the configured gain and the distance attenuation, and writes the `N` frames into the output ring, each
///   ear offset by its own delay.
///
/// The host drains the ring one quantum at a time, so the quantum size is independent of `N`.  Output lags input by
/// `N` samples plus the larger ear's delay.
///
/// No inverse transform is applied before reading samples back out: the output is the real part of the filtered
/// spectrum, not its time-domain signal.  Tests pin this behavior exactly; don't change it casually.
///
/// Everything is allocated up front.  [SpatializationProcessor::process] doesn't allocate, lock, or do I/O, and is
/// meant to be called from exactly one real-time thread.
pub struct SpatializationProcessor {
    dataset: Arc<HrtfDataset>,
    config: ProcessorConfig,
    half_window: usize,

    window: InputWindow,
    ring: StereoOutputRing,

    transform: ForwardTransform,
    spectrum: Vec<Complex<f32>>,
    filtered_l: Vec<Complex<f32>>,
    filtered_r: Vec<Complex<f32>>,

    position: ListenerPosition,

    /// Set on a configuration failure.  Once set, nothing is processed again.
    halted: bool,

    warned_oversized_quantum: bool,
}

fn check_layout(inputs: &[&[f32]], outputs: &[&mut [f32]]) -> Result<(), LayoutError> {
    if !ChannelFormat::from_channel_count(inputs.len()).is_some_and(|f| f.is_mono()) {
        return Err(LayoutError::Input {
            expected: ChannelFormat::Mono.get_channel_count(),
            found: inputs.len(),
        });
    }

    if !ChannelFormat::from_channel_count(outputs.len()).is_some_and(|f| f.is_stereo()) {
        return Err(LayoutError::Output {
            expected: ChannelFormat::Stereo.get_channel_count(),
            found: outputs.len(),
        });
    }

    if outputs[0].len() != outputs[1].len() {
        return Err(LayoutError::UnequalOutputs {
            left: outputs[0].len(),
            right: outputs[1].len(),
        });
    }

    Ok(())
}

impl SpatializationProcessor {
    pub fn new(dataset: Arc<HrtfDataset>) -> Self {
        Self::with_config(dataset, ProcessorConfig::default())
    }

    pub fn with_config(dataset: Arc<HrtfDataset>, config: ProcessorConfig) -> Self {
        // The first audio-thread log message must not be what spawns the logging thread.
        crate::logging::ensure_log_ctx();

        let half_window = dataset.half_window();
        let window_len = half_window * 2;
        let ring_capacity = half_window * config.ring_capacity_factor.max(RING_CAPACITY_FACTOR);

        log::debug!(
            "Creating processor: {} directions, half-window {}, ring capacity {}, sample rate {}",
            dataset.len(),
            half_window,
            ring_capacity,
            config.sample_rate
        );

        Self {
            dataset,
            config,
            half_window,
            window: InputWindow::new(half_window),
            ring: StereoOutputRing::new(ring_capacity),
            transform: ForwardTransform::new(window_len),
            spectrum: vec![Complex::new(0.0, 0.0); window_len],
            filtered_l: vec![Complex::new(0.0, 0.0); window_len],
            filtered_r: vec![Complex::new(0.0, 0.0); window_len],
            position: ListenerPosition::default(),
            halted: false,
            warned_oversized_quantum: false,
        }
    }

    /// Load a dataset artifact and build a processor around it.
    ///
    /// This does I/O; call it during setup, not from the audio thread.
    pub fn from_artifact(path: impl AsRef<Path>, config: ProcessorConfig) -> Result<Self> {
        let dataset = HrtfDataset::load(path)?;
        Ok(Self::with_config(Arc::new(dataset), config))
    }

    pub fn dataset(&self) -> &Arc<HrtfDataset> {
        &self.dataset
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// The hop size `N`: how many input samples arrive between filter passes.
    pub fn half_window(&self) -> usize {
        self.half_window
    }

    pub fn ring_capacity(&self) -> usize {
        self.ring.capacity()
    }

    pub fn position(&self) -> ListenerPosition {
        self.position
    }

    /// Set the position used by subsequent filter passes.
    ///
    /// [SpatializationProcessor::process] calls this for you; it's here for hosts which drive
    /// [SpatializationProcessor::ingest] and [SpatializationProcessor::drain] themselves.
    pub fn set_position(&mut self, position: ListenerPosition) {
        self.position = position;
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// Feed one mono sample, running a filter pass if this completes a window.
    #[inline]
    pub fn ingest(&mut self, sample: f32) {
        if self.window.push(sample) {
            self.apply_filter();
            self.window.advance();
        }
    }

    fn apply_filter(&mut self) {
        let mapped = self.position.map();
        let (delay_l, delay_r) = mapped.delay_samples(self.config.sample_rate);
        let entry = select_nearest(&self.dataset, mapped.elevation, mapped.azimuth);

        // Both ears filter the same spectrum.
        self.transform
            .forward_real(self.window.samples(), &mut self.spectrum[..]);
        self.filtered_l.copy_from_slice(&self.spectrum[..]);
        self.filtered_r.copy_from_slice(&self.spectrum[..]);

        map_bins(&mut self.filtered_l[..], |bin, index, _| {
            multiply(bin, entry.left_bin(index))
        });
        map_bins(&mut self.filtered_r[..], |bin, index, _| {
            multiply(bin, entry.right_bin(index))
        });

        let gain = self.config.gain;
        let attenuation = mapped.attenuation();
        let n = self.half_window;

        // The extra N keeps the write ahead of the cursor the reader is about to reach.
        for i in 0..n {
            self.ring.write_frame(
                self.filtered_l[i].re * gain * attenuation,
                delay_l + n,
                self.filtered_r[i].re * gain * attenuation,
                delay_r + n,
            );
        }
    }

    /// Copy the next `left.len()` frames of output.
    ///
    /// # Panics
    ///
    /// If `left` and `right` differ in length.
    pub fn drain(&mut self, left: &mut [f32], right: &mut [f32]) {
        self.ring.drain(left, right);
    }

    /// Run one quantum: take the position, consume the whole mono input, and fill both output channels.
    ///
    /// `inputs` and `outputs` are slices of channels.  Anything other than exactly one input channel and exactly two
    /// equal-length output channels is a configuration failure: the outputs are left untouched, the error is logged,
    /// and the processor halts.  Every later call returns an error for which [crate::Error::is_halted] is true; hosts
    /// should stop calling.
    ///
    /// `position` holds for the whole quantum; see [ListenerPosition::from_automation] for hosts with per-sample
    /// parameters.
    pub fn process(
        &mut self,
        inputs: &[&[f32]],
        outputs: &mut [&mut [f32]],
        position: ListenerPosition,
    ) -> Result<()> {
        mark_audio_thread();

        if self.halted {
            return Err(HaltedError.into());
        }

        if let Err(e) = check_layout(inputs, outputs) {
            rt_error!("Wrong setup for the spatialization processor: {}. Halting", e);
            self.halted = true;
            return Err(e.into());
        }

        self.position = position;

        let quantum = outputs[0].len();
        if quantum > self.ring.capacity() && !self.warned_oversized_quantum {
            rt_warn!(
                "Quantum of {} frames is longer than the output ring ({} frames); output will repeat itself",
                quantum,
                self.ring.capacity()
            );
            self.warned_oversized_quantum = true;
        }

        for sample in inputs[0].iter().copied() {
            self.ingest(sample);
        }

        let (left, right) = outputs.split_at_mut(1);
        self.ring.drain(&mut *left[0], &mut *right[0]);

        Ok(())
    }
}
