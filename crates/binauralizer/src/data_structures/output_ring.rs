/// Two channels of circular output with one write cursor and one read cursor.
///
/// The writer places each frame some offset ahead of its cursor, which is how per-ear delays are realized; the reader
/// drains whatever is at its cursor.  Both cursors wrap at the capacity, and so do offsets: a delay longer than the ring
/// wraps around rather than being rejected.
///
/// Reads don't clear what they read.  Under steady-state use the writer overwrites every slot once per trip around the
/// ring, at the same rate the reader consumes them.
pub(crate) struct StereoOutputRing {
    left: Vec<f32>,
    right: Vec<f32>,
    write: usize,
    read: usize,
}

impl StereoOutputRing {
    pub(crate) fn new(capacity: usize) -> Self {
        assert!(capacity > 0);

        Self {
            left: vec![0.0; capacity],
            right: vec![0.0; capacity],
            write: 0,
            read: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.left.len()
    }

    /// Store `left` at `left_offset` past the write cursor and `right` at `right_offset` past it, then advance the
    /// cursor by one.
    #[inline(always)]
    pub(crate) fn write_frame(
        &mut self,
        left: f32,
        left_offset: usize,
        right: f32,
        right_offset: usize,
    ) {
        let cap = self.capacity();
        // Reduce first, so that huge offsets can't overflow.
        let index_l = (self.write + left_offset % cap) % cap;
        let index_r = (self.write + right_offset % cap) % cap;
        self.left[index_l] = left;
        self.right[index_r] = right;
        self.write = (self.write + 1) % cap;
    }

    /// Fill both destinations from the read cursor, then advance it by their length.
    ///
    /// # Panics
    ///
    /// If the destinations are of different lengths.
    pub(crate) fn drain(&mut self, left: &mut [f32], right: &mut [f32]) {
        assert_eq!(left.len(), right.len());

        let cap = self.capacity();
        for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            let index = (self.read + i) % cap;
            *l = self.left[index];
            *r = self.right[index];
        }

        self.read = (self.read + left.len()) % cap;
    }

    pub(crate) fn write_cursor(&self) -> usize {
        self.write
    }

    pub(crate) fn read_cursor(&self) -> usize {
        self.read
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    #[test]
    fn test_markers_survive_a_full_trip() {
        const CAP: usize = 16;
        let mut ring = StereoOutputRing::new(CAP);

        // Start the cursors somewhere other than 0 so that the trip wraps.
        let mut scratch = [0.0f32; 5];
        let mut scratch_r = [0.0f32; 5];
        for _ in 0..5 {
            ring.write_frame(0.0, 0, 0.0, 0);
        }
        ring.drain(&mut scratch, &mut scratch_r);

        for i in 0..CAP {
            ring.write_frame(i as f32, 0, -(i as f32), 0);
        }

        let mut left = vec![0.0f32; CAP];
        let mut right = vec![0.0f32; CAP];
        ring.drain(&mut left, &mut right);

        let expected = (0..CAP).map(|i| i as f32).collect::<Vec<_>>();
        assert_eq!(left, expected);
        assert_eq!(right, expected.iter().map(|x| -x).collect::<Vec<_>>());
        assert_eq!(ring.write_cursor(), ring.read_cursor());
    }

    #[test]
    fn test_offsets_delay_each_channel() {
        let mut ring = StereoOutputRing::new(8);
        ring.write_frame(1.0, 2, 2.0, 5);

        let mut left = [0.0f32; 8];
        let mut right = [0.0f32; 8];
        ring.drain(&mut left, &mut right);
        assert_eq!(left, [0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(right, [0.0, 0.0, 0.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    }

    #[test]
    fn test_offsets_wrap() {
        let mut ring = StereoOutputRing::new(8);
        // 8 * 1000 + 3 is 3 modulo the capacity.
        ring.write_frame(1.0, 8003, 1.0, usize::MAX);

        let mut left = [0.0f32; 8];
        let mut right = [0.0f32; 8];
        ring.drain(&mut left, &mut right);
        assert_eq!(left[3], 1.0);
        assert_eq!(right[usize::MAX % 8], 1.0);
    }

    #[test]
    fn test_writes_overwrite() {
        let mut ring = StereoOutputRing::new(4);
        ring.write_frame(1.0, 1, 1.0, 1);
        // The cursor moved to 1, so an offset of 0 lands on the same slot.
        ring.write_frame(5.0, 0, 6.0, 0);

        let mut left = [0.0f32; 4];
        let mut right = [0.0f32; 4];
        ring.drain(&mut left, &mut right);
        assert_eq!(left, [0.0, 5.0, 0.0, 0.0]);
        assert_eq!(right, [0.0, 6.0, 0.0, 0.0]);
    }

    /// Stream a ramp through the ring, writing one frame at a time and draining in chunks of `chunk`, and check that
    /// it comes out in order and `offset` frames late.
    fn check_streaming(capacity: usize, chunk: usize, offset: usize) {
        let mut ring = StereoOutputRing::new(capacity);
        let total = capacity * 3;
        let mut got = vec![];
        let mut left = vec![0.0f32; chunk];
        let mut right = vec![0.0f32; chunk];

        let mut written = 0;
        while got.len() < total {
            for _ in 0..chunk {
                ring.write_frame(written as f32 + 1.0, offset, written as f32 + 1.0, offset);
                written += 1;
            }
            ring.drain(&mut left, &mut right);
            assert_eq!(left, right);
            got.extend_from_slice(&left);
        }

        for (i, x) in got.iter().enumerate().take(total) {
            let expected = if i < offset { 0.0 } else { (i - offset) as f32 + 1.0 };
            assert_eq!(*x, expected, "Sample {i}");
        }
    }

    macro_rules! streaming_test {
        ($capacity: expr, $chunk: expr, $offset: expr) => {
            paste::paste! {
                #[test]
                fn [<streaming _ $capacity _ $chunk _ $offset>]() {
                    check_streaming($capacity, $chunk, $offset);
                }
            }
        };
    }

    streaming_test!(16, 1, 0);
    streaming_test!(16, 4, 3);
    streaming_test!(64, 7, 20);
    streaming_test!(64, 16, 48);
    streaming_test!(1024, 128, 512);
}
