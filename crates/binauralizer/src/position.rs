//! Listener-relative positions and what they mean for each ear.
//!
//! Coordinates are in meters with the listener's head at the origin: `+x` is to the right and the ears lie on the x
//! axis.
use crate::config::{
    ELEVATION_EPSILON, HEAD_HALF_WIDTH, POSITION_LIMIT, SPEED_OF_SOUND,
};

/// Where the source is, relative to the listener.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ListenerPosition {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

fn sanitize(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-POSITION_LIMIT, POSITION_LIMIT)
    } else {
        0.0
    }
}

impl ListenerPosition {
    /// Build a position, clamping each component to the supported range.  Non-finite components become 0.
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            x: sanitize(x),
            y: sanitize(y),
            z: sanitize(z),
        }
    }

    /// Build a position from a quantum's worth of parameter automation.
    ///
    /// Hosts may hand over one value per sample.  We don't do sample-accurate automation: the first value of each
    /// block stands for the whole quantum.  Empty blocks mean the default of 0.
    pub fn from_automation(x: &[f32], y: &[f32], z: &[f32]) -> Self {
        let first = |block: &[f32]| block.first().copied().unwrap_or(0.0);
        Self::new(first(x), first(y), first(z))
    }

    pub fn map(&self) -> MappedPosition {
        map_position(self.x as f64, self.y as f64, self.z as f64)
    }
}

/// A position translated into the terms the filter needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MappedPosition {
    /// Degrees, `atan2(x, y)`, so in `-180..=180`.
    pub azimuth: f64,

    /// Degrees.
    pub elevation: f64,

    /// Meters from the center of the head.
    pub distance: f64,

    /// Seconds for sound to travel from the source to the left ear.
    pub time_to_ear_l: f64,

    /// Seconds for sound to travel from the source to the right ear.
    pub time_to_ear_r: f64,
}

fn distance_between(a: (f64, f64, f64), b: (f64, f64, f64)) -> f64 {
    let xx = b.0 - a.0;
    let yy = b.1 - a.1;
    let zz = b.2 - a.2;
    (xx * xx + yy * yy + zz * zz).sqrt()
}

pub fn map_position(x: f64, y: f64, z: f64) -> MappedPosition {
    let source = (x, y, z);

    let azimuth = x.atan2(y).to_degrees();
    let distance = distance_between((0.0, 0.0, 0.0), source);
    let elevation = y
        .atan2((x * x + z * z).sqrt() + ELEVATION_EPSILON)
        .to_degrees();

    let time_to_ear_l = distance_between((-HEAD_HALF_WIDTH, 0.0, 0.0), source) / SPEED_OF_SOUND;
    let time_to_ear_r = distance_between((HEAD_HALF_WIDTH, 0.0, 0.0), source) / SPEED_OF_SOUND;

    MappedPosition {
        azimuth,
        elevation,
        distance,
        time_to_ear_l,
        time_to_ear_r,
    }
}

impl MappedPosition {
    /// Per-ear propagation delays as `(left, right)`, rounded to whole samples.
    pub fn delay_samples(&self, sample_rate: u32) -> (usize, usize) {
        let sr = sample_rate as f64;
        (
            (self.time_to_ear_l * sr).round() as usize,
            (self.time_to_ear_r * sr).round() as usize,
        )
    }

    /// Inverse-square attenuation, floored at one meter so that close sources are never amplified.
    ///
    /// Always in `(0, 1]` for finite positions.
    pub fn attenuation(&self) -> f32 {
        self.distance.max(1.0).powi(-2) as f32
    }
}
