use super::Actuator;
use crate::config::GestureGeometry;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{debug, warn};

/// A single-finger stroke in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub from: (f32, f32),
    pub to: (f32, f32),
    pub duration_ms: u64,
}

impl Stroke {
    pub fn tap(x: f32, y: f32, duration_ms: u64) -> Self {
        Self {
            from: (x, y),
            to: (x, y),
            duration_ms,
        }
    }

    pub fn is_tap(&self) -> bool {
        self.from == self.to
    }
}

/// System navigation actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlobalAction {
    Back,
    Home,
    Recents,
}

/// Low-level commands for the host integration to execute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DeviceCommand {
    Gesture { stroke: Stroke },
    Global { action: GlobalAction },
    Vibrate { duration_ms: u64 },
    ControlToggled,
}

/// Translates actions into [`DeviceCommand`]s on a bounded channel.
///
/// Sends never wait: if the host is lagging and the channel is full, or the host went
/// away, the command is logged and dropped.
#[derive(Debug, Clone)]
pub struct DeviceActuator {
    geometry: GestureGeometry,
    command_tx: mpsc::Sender<DeviceCommand>,
}

impl DeviceActuator {
    pub fn new(geometry: GestureGeometry, command_tx: mpsc::Sender<DeviceCommand>) -> Self {
        Self {
            geometry,
            command_tx,
        }
    }

    /// Create an actuator together with the receiving end for the host.
    pub fn channel(
        geometry: GestureGeometry,
        buffer_size: usize,
    ) -> (Self, mpsc::Receiver<DeviceCommand>) {
        let (command_tx, command_rx) = mpsc::channel(buffer_size);
        (Self::new(geometry, command_tx), command_rx)
    }

    fn swipe(&self, from_y: f32, to_y: f32) -> DeviceCommand {
        let x = self.geometry.swipe_x;
        DeviceCommand::Gesture {
            stroke: Stroke {
                from: (x, from_y),
                to: (x, to_y),
                duration_ms: self.geometry.swipe_duration_ms,
            },
        }
    }

    fn send(&self, command: DeviceCommand) {
        debug!("Sending device command {:?}", command);
        match self.command_tx.try_send(command) {
            Ok(()) => {}
            Err(TrySendError::Full(command)) => {
                warn!("Device command channel full, dropping {:?}", command);
            }
            Err(TrySendError::Closed(command)) => {
                warn!("Device command channel closed, dropping {:?}", command);
            }
        }
    }
}

impl Actuator for DeviceActuator {
    fn toggle(&self) {
        self.send(DeviceCommand::ControlToggled);
    }

    // Finger moves up to scroll content down.
    fn scroll_down(&self) {
        self.send(self.swipe(self.geometry.swipe_bottom_y, self.geometry.swipe_top_y));
    }

    fn scroll_up(&self) {
        self.send(self.swipe(self.geometry.swipe_top_y, self.geometry.swipe_bottom_y));
    }

    fn go_back(&self) {
        self.send(DeviceCommand::Global {
            action: GlobalAction::Back,
        });
    }

    fn go_home(&self) {
        self.send(DeviceCommand::Global {
            action: GlobalAction::Home,
        });
    }

    fn switch_apps(&self) {
        self.send(DeviceCommand::Global {
            action: GlobalAction::Recents,
        });
    }

    fn tap(&self, x: f32, y: f32) {
        self.send(DeviceCommand::Gesture {
            stroke: Stroke::tap(x, y, self.geometry.tap_duration_ms),
        });
    }

    fn pulse(&self, duration: Duration) {
        self.send(DeviceCommand::Vibrate {
            duration_ms: duration.as_millis() as u64,
        });
    }
}
