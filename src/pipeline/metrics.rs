use crate::pipeline::types::ActionCommand;
use std::sync::{Arc, Mutex};

/// Observer pattern for pipeline metrics collection
pub trait MetricsObserver: Send + Sync {
    fn on_frame_processed(&self, pipeline: &str);
    fn on_frames_dropped(&self, pipeline: &str, count: u64);
    fn on_action_dispatched(&self, pipeline: &str, action: ActionCommand);
    fn on_action_suppressed(&self, pipeline: &str, action: ActionCommand);
    fn on_actuator_unavailable(&self, pipeline: &str, action: ActionCommand);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineStats {
    pub frames_processed: u64,
    pub frames_dropped: u64,
    pub actions_dispatched: u64,
    /// Candidates dropped by the cooldown.
    pub actions_suppressed: u64,
    /// Candidates dropped because no actuator was attached.
    pub actions_unavailable: u64,
    pub last_action: Option<&'static str>,
}

/// Counts pipeline events; cheap to clone and share with a runner task.
#[derive(Debug, Clone, Default)]
pub struct PipelineMonitor {
    stats: Arc<Mutex<PipelineStats>>,
}

impl PipelineMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> PipelineStats {
        self.stats.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn update(&self, f: impl FnOnce(&mut PipelineStats)) {
        let mut stats = self.stats.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut stats);
    }
}

impl MetricsObserver for PipelineMonitor {
    fn on_frame_processed(&self, _pipeline: &str) {
        self.update(|stats| stats.frames_processed += 1);
    }

    fn on_frames_dropped(&self, _pipeline: &str, count: u64) {
        self.update(|stats| stats.frames_dropped += count);
    }

    fn on_action_dispatched(&self, _pipeline: &str, action: ActionCommand) {
        self.update(|stats| {
            stats.actions_dispatched += 1;
            stats.last_action = Some(action.as_str());
        });
    }

    fn on_action_suppressed(&self, _pipeline: &str, _action: ActionCommand) {
        self.update(|stats| stats.actions_suppressed += 1);
    }

    fn on_actuator_unavailable(&self, _pipeline: &str, _action: ActionCommand) {
        self.update(|stats| stats.actions_unavailable += 1);
    }
}
