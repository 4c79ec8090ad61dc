use super::GestureClassifier;
use crate::config::FaceThresholds;
use crate::pipeline::types::{ActionCommand, FaceFrame};
use tracing::debug;

/// Face expression rules. The first matching rule wins.
///
/// 1. head roll → toggle (the only rule evaluated while disabled)
/// 2. smile → scroll down
/// 3. left wink (left closed, right clearly open) → scroll up
/// 4. both eyes closed → back
/// 5. head pitched down → home
/// 6. head turned → app switcher
///
/// A left eye below `wink_closed` with the right eye between `both_closed` and
/// `wink_open` (inclusive) matches neither eye rule and falls through to the head-pose rules.
#[derive(Debug, Clone, Default)]
pub struct FaceClassifier {
    thresholds: FaceThresholds,
}

impl FaceClassifier {
    pub fn new(thresholds: FaceThresholds) -> Self {
        Self { thresholds }
    }
}

impl GestureClassifier for FaceClassifier {
    type Frame = FaceFrame;

    fn classify(&self, frame: &FaceFrame, enabled: bool) -> ActionCommand {
        let t = &self.thresholds;

        if frame.roll_deg > t.toggle_roll_deg {
            debug!("Head roll {:.1} deg matched toggle", frame.roll_deg);
            return ActionCommand::ToggleEnabled;
        }

        if !enabled {
            return ActionCommand::None;
        }

        let candidate = if frame.smile_prob > t.smile_prob {
            ActionCommand::ScrollDown
        } else if frame.left_eye_open < t.wink_closed && frame.right_eye_open > t.wink_open {
            ActionCommand::ScrollUp
        } else if frame.left_eye_open < t.wink_closed && frame.right_eye_open < t.both_closed {
            ActionCommand::GoBack
        } else if frame.pitch_deg < t.home_pitch_deg {
            ActionCommand::GoHome
        } else if frame.yaw_deg > t.switch_yaw_deg {
            ActionCommand::SwitchApps
        } else {
            ActionCommand::None
        };

        if candidate.is_some() {
            debug!("Face frame matched {}", candidate);
        }
        candidate
    }

    fn name(&self) -> &'static str {
        "FaceClassifier"
    }
}
