use serde::{Deserialize, Serialize};

/// The decision produced for one perception frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum ActionCommand {
    ToggleEnabled,
    ScrollDown,
    ScrollUp,
    GoBack,
    GoHome,
    SwitchApps,
    TapAt { x: f32, y: f32 },
    #[default]
    None,
}

impl ActionCommand {
    pub fn is_none(&self) -> bool {
        matches!(self, ActionCommand::None)
    }

    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionCommand::ToggleEnabled => "toggle-enabled",
            ActionCommand::ScrollDown => "scroll-down",
            ActionCommand::ScrollUp => "scroll-up",
            ActionCommand::GoBack => "go-back",
            ActionCommand::GoHome => "go-home",
            ActionCommand::SwitchApps => "switch-apps",
            ActionCommand::TapAt { .. } => "tap",
            ActionCommand::None => "none",
        }
    }
}

impl std::fmt::Display for ActionCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionCommand::TapAt { x, y } => write!(f, "tap({}, {})", x, y),
            other => f.write_str(other.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_no_action() {
        let command = ActionCommand::default();
        assert!(command.is_none());
        assert_eq!(command.to_string(), "none");
    }
}
