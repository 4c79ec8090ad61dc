/// A perception frame stamped with the monotonic time it was produced.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedFrame<F> {
    pub frame: F,
    pub timestamp_ms: i64,
    /// Position in the producer's stream. Gaps mean frames were overwritten before
    /// the pipeline got to them.
    pub sequence: u64,
}

impl<F> TimedFrame<F> {
    pub fn new(frame: F, timestamp_ms: i64) -> Self {
        Self {
            frame,
            timestamp_ms,
            sequence: 0,
        }
    }

    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }
}
