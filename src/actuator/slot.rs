use super::Actuator;
use std::sync::{Arc, RwLock};
use tracing::info;

/// Shared handle to the actuation capability, empty until the host connects it.
///
/// Clones share the same slot, so the host integration can attach and detach while the
/// engines that were given a clone keep reading it.
#[derive(Clone, Default)]
pub struct ActuatorSlot {
    inner: Arc<RwLock<Option<Arc<dyn Actuator>>>>,
}

impl ActuatorSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_actuator(actuator: Arc<dyn Actuator>) -> Self {
        let slot = Self::new();
        slot.attach(actuator);
        slot
    }

    pub fn attach(&self, actuator: Arc<dyn Actuator>) {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(actuator);
        info!("Actuator attached");
    }

    pub fn detach(&self) -> Option<Arc<dyn Actuator>> {
        let mut guard = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let previous = guard.take();
        if previous.is_some() {
            info!("Actuator detached");
        }
        previous
    }

    pub fn is_attached(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// Snapshot of the current actuator, if connected.
    pub fn current(&self) -> Option<Arc<dyn Actuator>> {
        self.inner
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl std::fmt::Debug for ActuatorSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActuatorSlot")
            .field("attached", &self.is_attached())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::RecordingActuator;

    #[test]
    fn clones_share_attachment() {
        let slot = ActuatorSlot::new();
        let engine_view = slot.clone();
        assert!(!engine_view.is_attached());

        slot.attach(Arc::new(RecordingActuator::new()));
        assert!(engine_view.is_attached());

        assert!(slot.detach().is_some());
        assert!(engine_view.current().is_none());
        assert!(slot.detach().is_none());
    }
}
