//! Hands-free device control from facial expressions and hand pinches.
//!
//! Perception frames flow through a per-pipeline decision engine (classify, debounce,
//! dispatch) into an injected actuator. See [`pipeline`] for the decision core and
//! [`intake`] for the latest-frame runners that drive it.

pub mod actuator;
pub mod config;
pub mod error;
pub mod intake;
pub mod pipeline;
pub mod telemetry;

pub use actuator::{Actuator, ActuatorSlot};
pub use config::Configuration;
pub use error::GestureError;
pub use intake::{Coordinator, CoordinatorBuilder, FrameSender};
pub use pipeline::{
    ActionCommand, EngineState, FaceEngine, FaceFrame, GestureEngine, HandEngine, HandFrame,
    Landmark, PerceptionFrame,
};
