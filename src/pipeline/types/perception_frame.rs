use crate::error::GestureError;
use serde::{Deserialize, Serialize};

/// Index of the thumb tip in a 21-point hand landmark set.
pub const THUMB_TIP: usize = 4;
/// Index of the index-finger tip in a 21-point hand landmark set.
pub const INDEX_TIP: usize = 8;
/// Number of landmarks a complete hand detection carries.
pub const HAND_LANDMARK_COUNT: usize = 21;

fn neutral_smile() -> f32 {
    0.0
}

fn eye_assumed_open() -> f32 {
    1.0
}

/// Per-frame face attributes produced by the upstream face model.
///
/// Classification probabilities the model did not report deserialize to neutral values:
/// no smile, eyes open.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FaceFrame {
    #[serde(default = "neutral_smile")]
    pub smile_prob: f32,
    #[serde(default = "eye_assumed_open")]
    pub left_eye_open: f32,
    #[serde(default = "eye_assumed_open")]
    pub right_eye_open: f32,
    #[serde(default)]
    pub pitch_deg: f32,
    #[serde(default)]
    pub yaw_deg: f32,
    #[serde(default)]
    pub roll_deg: f32,
}

impl Default for FaceFrame {
    fn default() -> Self {
        Self {
            smile_prob: neutral_smile(),
            left_eye_open: eye_assumed_open(),
            right_eye_open: eye_assumed_open(),
            pitch_deg: 0.0,
            yaw_deg: 0.0,
            roll_deg: 0.0,
        }
    }
}

/// Raw face model output where classification attributes may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FaceObservation {
    pub smile_prob: Option<f32>,
    pub left_eye_open: Option<f32>,
    pub right_eye_open: Option<f32>,
    pub pitch_deg: f32,
    pub yaw_deg: f32,
    pub roll_deg: f32,
}

impl From<FaceObservation> for FaceFrame {
    fn from(observation: FaceObservation) -> Self {
        Self {
            smile_prob: observation.smile_prob.unwrap_or_else(neutral_smile),
            left_eye_open: observation.left_eye_open.unwrap_or_else(eye_assumed_open),
            right_eye_open: observation.right_eye_open.unwrap_or_else(eye_assumed_open),
            pitch_deg: observation.pitch_deg,
            yaw_deg: observation.yaw_deg,
            roll_deg: observation.roll_deg,
        }
    }
}

/// A normalized image-space point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Landmark) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Landmarks of the first detected hand; empty when no hand was found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HandFrame {
    #[serde(default)]
    pub landmarks: Vec<Landmark>,
}

impl HandFrame {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self { landmarks }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Keep the first detected hand and ignore any others.
    pub fn from_detections(detections: Vec<Vec<Landmark>>) -> Self {
        Self {
            landmarks: detections.into_iter().next().unwrap_or_default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }

    pub fn thumb_tip(&self) -> Option<&Landmark> {
        self.landmarks.get(THUMB_TIP)
    }

    pub fn index_tip(&self) -> Option<&Landmark> {
        self.landmarks.get(INDEX_TIP)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PerceptionFrame {
    Face(FaceFrame),
    Hand(HandFrame),
}

impl PerceptionFrame {
    /// Decode one frame emitted by an external perception bridge.
    pub fn from_json(payload: &str) -> Result<Self, GestureError> {
        Ok(serde_json::from_str(payload)?)
    }
}

impl From<FaceFrame> for PerceptionFrame {
    fn from(frame: FaceFrame) -> Self {
        PerceptionFrame::Face(frame)
    }
}

impl From<HandFrame> for PerceptionFrame {
    fn from(frame: HandFrame) -> Self {
        PerceptionFrame::Hand(frame)
    }
}
