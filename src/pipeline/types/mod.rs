mod action_command;
mod engine_state;
mod perception_frame;
mod timed_frame;

pub use action_command::ActionCommand;
pub use engine_state::EngineState;
pub use perception_frame::{
    FaceFrame, FaceObservation, HandFrame, Landmark, PerceptionFrame, HAND_LANDMARK_COUNT,
    INDEX_TIP, THUMB_TIP,
};
pub use timed_frame::TimedFrame;
