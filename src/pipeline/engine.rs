use crate::actuator::{self, ActuatorSlot};
use crate::config::{FacePipelineConfig, HandPipelineConfig};
use crate::pipeline::classifier::{FaceClassifier, GestureClassifier, HandClassifier};
use crate::pipeline::debounce::DebounceGate;
use crate::pipeline::metrics::MetricsObserver;
use crate::pipeline::types::{ActionCommand, EngineState};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, trace};

pub type FaceEngine = GestureEngine<FaceClassifier>;
pub type HandEngine = GestureEngine<HandClassifier>;

/// Classify → debounce → dispatch for one pipeline.
///
/// The engine owns the pipeline's [`EngineState`]. `process` takes `&mut self`, so a
/// single engine can only ever have one frame in flight.
pub struct GestureEngine<C: GestureClassifier> {
    name: String,
    classifier: C,
    gate: DebounceGate,
    state: EngineState,
    haptic_duration: Duration,
    actuator: ActuatorSlot,
    observers: Vec<Arc<dyn MetricsObserver>>,
}

impl<C: GestureClassifier> GestureEngine<C> {
    pub fn new(
        name: impl Into<String>,
        classifier: C,
        cooldown_ms: i64,
        haptic_duration: Duration,
        actuator: ActuatorSlot,
    ) -> Self {
        Self {
            name: name.into(),
            classifier,
            gate: DebounceGate::new(cooldown_ms),
            state: EngineState::new(),
            haptic_duration,
            actuator,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(mut self, observer: Arc<dyn MetricsObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> &EngineState {
        &self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn cooldown_ms(&self) -> i64 {
        self.gate.cooldown_ms()
    }

    /// Run one frame through the pipeline and return the command that was dispatched,
    /// or [`ActionCommand::None`].
    ///
    /// With no actuator attached every candidate is dropped before the gate, so the
    /// cooldown clock and the toggle only move when an action really reaches the device.
    /// Every dispatched action is followed by a haptic pulse on the same actuator.
    pub fn process(&mut self, frame: &C::Frame, now_ms: i64) -> ActionCommand {
        let action = self.decide(frame, now_ms);
        for observer in &self.observers {
            observer.on_frame_processed(&self.name);
        }
        action
    }

    fn decide(&mut self, frame: &C::Frame, now_ms: i64) -> ActionCommand {
        let candidate = self.classifier.classify(frame, self.state.enabled);
        if candidate.is_none() {
            return ActionCommand::None;
        }

        let Some(actuator) = self.actuator.current() else {
            trace!("[{}] No actuator attached, dropping {}", self.name, candidate);
            for observer in &self.observers {
                observer.on_actuator_unavailable(&self.name, candidate);
            }
            return ActionCommand::None;
        };

        let admitted = self.gate.admit(&mut self.state, now_ms, candidate);
        if admitted.is_none() {
            for observer in &self.observers {
                observer.on_action_suppressed(&self.name, candidate);
            }
            return ActionCommand::None;
        }

        debug!("[{}] Dispatching {} at {}ms", self.name, admitted, now_ms);
        actuator::dispatch(actuator.as_ref(), admitted);
        actuator.pulse(self.haptic_duration);
        for observer in &self.observers {
            observer.on_action_dispatched(&self.name, admitted);
        }
        admitted
    }
}

impl GestureEngine<FaceClassifier> {
    pub fn face(config: &FacePipelineConfig, actuator: ActuatorSlot) -> Self {
        Self::new(
            "face",
            FaceClassifier::new(config.thresholds),
            config.cooldown_ms,
            Duration::from_millis(config.haptic_ms),
            actuator,
        )
    }
}

impl GestureEngine<HandClassifier> {
    pub fn hand(config: &HandPipelineConfig, actuator: ActuatorSlot) -> Self {
        Self::new(
            "hand",
            HandClassifier::new(config.thresholds),
            config.cooldown_ms,
            Duration::from_millis(config.haptic_ms),
            actuator,
        )
    }
}
