use super::GestureClassifier;
use crate::config::PinchThresholds;
use crate::pipeline::types::{ActionCommand, HandFrame};
use tracing::debug;

/// Thumb/index pinch detection on the first detected hand.
#[derive(Debug, Clone, Default)]
pub struct HandClassifier {
    thresholds: PinchThresholds,
}

impl HandClassifier {
    pub fn new(thresholds: PinchThresholds) -> Self {
        Self { thresholds }
    }

    /// Normalized distance between index tip and thumb tip, if both are present.
    pub fn pinch_distance(frame: &HandFrame) -> Option<f32> {
        let index = frame.index_tip()?;
        let thumb = frame.thumb_tip()?;
        Some(index.distance(thumb))
    }

    pub fn classify(&self, frame: &HandFrame) -> ActionCommand {
        if frame.is_empty() {
            return ActionCommand::None;
        }

        // A truncated landmark set can't show a pinch.
        let Some(distance) = Self::pinch_distance(frame) else {
            debug!(
                "Hand frame has {} landmarks, fingertips missing",
                frame.landmarks.len()
            );
            return ActionCommand::None;
        };

        if distance < self.thresholds.pinch_distance {
            debug!("Pinch detected at distance {:.3}", distance);
            ActionCommand::TapAt {
                x: self.thresholds.tap_x,
                y: self.thresholds.tap_y,
            }
        } else {
            ActionCommand::None
        }
    }
}

impl GestureClassifier for HandClassifier {
    type Frame = HandFrame;

    /// The hand pipeline has no toggle, so `enabled` is ignored.
    fn classify(&self, frame: &HandFrame, _enabled: bool) -> ActionCommand {
        HandClassifier::classify(self, frame)
    }

    fn name(&self) -> &'static str {
        "HandClassifier"
    }
}
