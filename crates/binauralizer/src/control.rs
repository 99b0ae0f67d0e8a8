use std::sync::Arc;

use crossbeam::atomic::AtomicCell;

use crate::position::ListenerPosition;

/// A handle for passing the source position from a control thread to the render thread.
///
/// Clone it and give one copy to each side.  The control side calls [PositionControl::set] whenever the position
/// changes; the render side calls [PositionControl::snapshot] once per quantum and hands the result to
/// [crate::SpatializationProcessor::process].  The whole position is stored and loaded as one value, so the render
/// thread never sees `x` from one update and `y` from another.  Neither side allocates.
#[derive(Clone, Default)]
pub struct PositionControl {
    current: Arc<AtomicCell<ListenerPosition>>,
}

impl PositionControl {
    pub fn new() -> Self {
        Default::default()
    }

    /// Publish a new position.  Components are clamped as in [ListenerPosition::new].
    pub fn set(&self, position: ListenerPosition) {
        self.current
            .store(ListenerPosition::new(position.x, position.y, position.z));
    }

    pub fn set_xyz(&self, x: f32, y: f32, z: f32) {
        self.current.store(ListenerPosition::new(x, y, z));
    }

    pub fn snapshot(&self) -> ListenerPosition {
        self.current.load()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_origin() {
        let control = PositionControl::new();
        assert_eq!(control.snapshot(), ListenerPosition::default());
    }

    #[test]
    fn test_set_clamps() {
        let control = PositionControl::new();
        control.set(ListenerPosition {
            x: 2000.0,
            y: 1.0,
            z: f32::NEG_INFINITY,
        });
        assert_eq!(control.snapshot(), ListenerPosition::new(1000.0, 1.0, 0.0));
    }

    #[test]
    fn test_snapshots_are_never_torn() {
        let control = PositionControl::new();
        let writer = control.clone();

        let handle = std::thread::spawn(move || {
            for i in 0..10000 {
                let v = (i % 1000) as f32;
                writer.set_xyz(v, v, v);
            }
        });

        for _ in 0..10000 {
            let p = control.snapshot();
            assert!(p.x == p.y && p.y == p.z, "Torn read: {:?}", p);
        }

        handle.join().unwrap();
    }
}
