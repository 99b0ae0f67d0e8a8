/// A sliding analysis window of `2N` samples which advances by `N` at a time.
///
/// The first half holds the tail of the previous window and the second half fills with new samples.  Once full, the
/// caller analyzes the window and calls [InputWindow::advance], which moves the second half to the front.
pub(crate) struct InputWindow {
    data: Vec<f32>,
    half: usize,
    head: usize,
}

impl InputWindow {
    /// A window of `2 * half` zeros, ready to receive `half` new samples.
    pub(crate) fn new(half: usize) -> Self {
        assert!(half > 0);

        Self {
            data: vec![0.0; half * 2],
            half,
            head: half,
        }
    }

    /// Push a sample.  Returns true if the window is now full and should be analyzed before the next push.
    #[inline(always)]
    pub(crate) fn push(&mut self, sample: f32) -> bool {
        self.data[self.head] = sample;
        self.head += 1;
        self.head == self.data.len()
    }

    pub(crate) fn samples(&self) -> &[f32] {
        &self.data[..]
    }

    /// Discard the older half and start filling again.
    pub(crate) fn advance(&mut self) {
        self.data.copy_within(self.half.., 0);
        self.head = self.half;
    }

    pub(crate) fn head(&self) -> usize {
        self.head
    }
}
