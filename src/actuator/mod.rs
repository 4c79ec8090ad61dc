//! Actuation capabilities the decision engine drives.
//!
//! The engine never owns the host integration. It reaches it through an [`ActuatorSlot`]
//! injected at construction, which is empty while the accessibility capability is not
//! connected. Every call is fire-and-forget.

pub mod device;
pub mod recording;
mod slot;

pub use device::{DeviceActuator, DeviceCommand, GlobalAction, Stroke};
pub use recording::{ActuatorCall, RecordingActuator};
pub use slot::ActuatorSlot;

use crate::pipeline::types::ActionCommand;
use std::time::Duration;

/// Host accessibility actions.
pub trait Actuator: Send + Sync {
    fn toggle(&self);
    fn scroll_down(&self);
    fn scroll_up(&self);
    fn go_back(&self);
    fn go_home(&self);
    fn switch_apps(&self);
    fn tap(&self, x: f32, y: f32);
    /// Short vibration signalling that an action fired.
    fn pulse(&self, duration: Duration);
}

/// Route an admitted command to the matching actuator call.
/// Returns `false` for [`ActionCommand::None`], which has nothing to dispatch.
pub fn dispatch(actuator: &dyn Actuator, command: ActionCommand) -> bool {
    match command {
        ActionCommand::ToggleEnabled => actuator.toggle(),
        ActionCommand::ScrollDown => actuator.scroll_down(),
        ActionCommand::ScrollUp => actuator.scroll_up(),
        ActionCommand::GoBack => actuator.go_back(),
        ActionCommand::GoHome => actuator.go_home(),
        ActionCommand::SwitchApps => actuator.switch_apps(),
        ActionCommand::TapAt { x, y } => actuator.tap(x, y),
        ActionCommand::None => return false,
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_maps_each_command() {
        let recorder = RecordingActuator::new();
        let commands = [
            ActionCommand::ToggleEnabled,
            ActionCommand::ScrollDown,
            ActionCommand::ScrollUp,
            ActionCommand::GoBack,
            ActionCommand::GoHome,
            ActionCommand::SwitchApps,
            ActionCommand::TapAt { x: 1.0, y: 2.0 },
        ];
        for command in commands {
            assert!(dispatch(&recorder, command));
        }
        assert!(!dispatch(&recorder, ActionCommand::None));
        assert_eq!(
            recorder.calls(),
            vec![
                ActuatorCall::Toggle,
                ActuatorCall::ScrollDown,
                ActuatorCall::ScrollUp,
                ActuatorCall::GoBack,
                ActuatorCall::GoHome,
                ActuatorCall::SwitchApps,
                ActuatorCall::Tap { x: 1.0, y: 2.0 },
            ]
        );
    }
}
