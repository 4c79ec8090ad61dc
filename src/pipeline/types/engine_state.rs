/// Mutable decision state owned by exactly one pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    /// Monotonic timestamp of the last dispatched action. `None` means no action has been
    /// dispatched yet, so the first candidate is always admitted.
    pub last_action_timestamp_ms: Option<i64>,
    /// Only the face pipeline ever flips this.
    pub enabled: bool,
}

impl EngineState {
    pub fn new() -> Self {
        Self {
            last_action_timestamp_ms: None,
            enabled: true,
        }
    }

    /// Milliseconds since the last dispatch, or `None` before the first one.
    pub fn elapsed_since_last_action(&self, now_ms: i64) -> Option<i64> {
        self.last_action_timestamp_ms
            .map(|last| now_ms.saturating_sub(last))
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new()
    }
}
