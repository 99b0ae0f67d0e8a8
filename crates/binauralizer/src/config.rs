//! Constants and per-processor configuration.

/// The sample rate the processor is designed around.
///
/// Delays are computed in samples, so running at another rate only works if the host tells the processor about it
/// through [ProcessorConfig::sample_rate].
pub const SR: u32 = 44100;

/// Meters per second.
pub const SPEED_OF_SOUND: f64 = 343.0;

/// Distance from the center of the head to each ear, in meters.  The ears sit at `(-HEAD_HALF_WIDTH, 0, 0)` and
/// `(HEAD_HALF_WIDTH, 0, 0)`.
pub const HEAD_HALF_WIDTH: f64 = 0.20;

/// Added to the horizontal distance when computing elevation, so that a source directly above or below the listener
/// still has one.
pub const ELEVATION_EPSILON: f64 = 0.001;

/// Fixed makeup gain applied to the filtered signal.
pub const OUTPUT_GAIN: f32 = 4.0;

/// The output ring holds this many half-windows per channel, at minimum.
pub const RING_CAPACITY_FACTOR: usize = 8;

/// Position components are clamped to `-POSITION_LIMIT..=POSITION_LIMIT`.
pub const POSITION_LIMIT: f32 = 1000.0;

/// Runtime configuration for a [crate::SpatializationProcessor].
///
/// Build one with [ProcessorConfigBuilder]; every field has a default matching the constants above.
#[derive(Clone, Debug, derive_builder::Builder)]
#[builder(pattern = "owned", build_fn(validate = "Self::validate"))]
pub struct ProcessorConfig {
    #[builder(default = "SR")]
    pub sample_rate: u32,

    #[builder(default = "OUTPUT_GAIN")]
    pub gain: f32,

    /// Capacity of each output ring, in half-windows.
    #[builder(default = "RING_CAPACITY_FACTOR")]
    pub ring_capacity_factor: usize,
}

impl ProcessorConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(factor) = self.ring_capacity_factor {
            if factor < RING_CAPACITY_FACTOR {
                return Err(format!(
                    "ring_capacity_factor must be at least {RING_CAPACITY_FACTOR}, got {factor}"
                ));
            }
        }

        if self.sample_rate == Some(0) {
            return Err("sample_rate must not be 0".to_string());
        }

        if let Some(gain) = self.gain {
            if !gain.is_finite() {
                return Err(format!("gain must be finite, got {gain}"));
            }
        }

        Ok(())
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            sample_rate: SR,
            gain: OUTPUT_GAIN,
            ring_capacity_factor: RING_CAPACITY_FACTOR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let cfg = ProcessorConfigBuilder::default().build().unwrap();
        assert_eq!(cfg.sample_rate, SR);
        assert_eq!(cfg.gain, OUTPUT_GAIN);
        assert_eq!(cfg.ring_capacity_factor, RING_CAPACITY_FACTOR);
    }

    #[test]
    fn test_builder_validation() {
        assert!(ProcessorConfigBuilder::default()
            .ring_capacity_factor(4)
            .build()
            .is_err());
        assert!(ProcessorConfigBuilder::default()
            .sample_rate(0)
            .build()
            .is_err());
        assert!(ProcessorConfigBuilder::default()
            .gain(f32::INFINITY)
            .build()
            .is_err());

        let cfg = ProcessorConfigBuilder::default()
            .sample_rate(48000)
            .ring_capacity_factor(16)
            .build()
            .unwrap();
        assert_eq!(cfg.sample_rate, 48000);
        assert_eq!(cfg.ring_capacity_factor, 16);
    }
}
