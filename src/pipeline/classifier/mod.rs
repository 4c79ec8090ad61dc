mod face;
mod hand;

pub use face::FaceClassifier;
pub use hand::HandClassifier;

use crate::pipeline::types::ActionCommand;

/// Maps one perception frame to a candidate action using a fixed, ordered rule table.
///
/// Implementations are pure: the same frame and toggle state always yield the same
/// candidate. Whether the candidate is dispatched is decided later by the debounce gate.
pub trait GestureClassifier: Send + Sync {
    type Frame: Send + Sync + 'static;

    fn classify(&self, frame: &Self::Frame, enabled: bool) -> ActionCommand;

    fn name(&self) -> &'static str;
}
