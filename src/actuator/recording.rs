use super::Actuator;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A call observed by [`RecordingActuator`].
#[derive(Debug, Clone, PartialEq)]
pub enum ActuatorCall {
    Toggle,
    ScrollDown,
    ScrollUp,
    GoBack,
    GoHome,
    SwitchApps,
    Tap { x: f32, y: f32 },
    Haptic(Duration),
}

/// In-memory actuator that records calls instead of touching a device.
/// Used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct RecordingActuator {
    calls: Arc<Mutex<Vec<ActuatorCall>>>,
}

impl RecordingActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Recorded calls excluding haptic pulses.
    pub fn actions(&self) -> Vec<ActuatorCall> {
        self.calls()
            .into_iter()
            .filter(|call| !matches!(call, ActuatorCall::Haptic(_)))
            .collect()
    }

    pub fn haptics(&self) -> Vec<Duration> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ActuatorCall::Haptic(duration) => Some(duration),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: ActuatorCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl Actuator for RecordingActuator {
    fn toggle(&self) {
        self.record(ActuatorCall::Toggle);
    }

    fn scroll_down(&self) {
        self.record(ActuatorCall::ScrollDown);
    }

    fn scroll_up(&self) {
        self.record(ActuatorCall::ScrollUp);
    }

    fn go_back(&self) {
        self.record(ActuatorCall::GoBack);
    }

    fn go_home(&self) {
        self.record(ActuatorCall::GoHome);
    }

    fn switch_apps(&self) {
        self.record(ActuatorCall::SwitchApps);
    }

    fn tap(&self, x: f32, y: f32) {
        self.record(ActuatorCall::Tap { x, y });
    }

    fn pulse(&self, duration: Duration) {
        self.record(ActuatorCall::Haptic(duration));
    }
}
