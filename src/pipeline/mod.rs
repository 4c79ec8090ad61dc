pub mod classifier;
pub mod debounce;
pub mod engine;
pub mod metrics;
pub mod service;
pub mod types;

pub use classifier::{FaceClassifier, GestureClassifier, HandClassifier};
pub use debounce::{admit, DebounceGate};
pub use engine::{FaceEngine, GestureEngine, HandEngine};
pub use metrics::{MetricsObserver, PipelineMonitor, PipelineStats};
pub use service::GestureService;
pub use types::{
    ActionCommand, EngineState, FaceFrame, FaceObservation, HandFrame, Landmark, PerceptionFrame,
    TimedFrame,
};
