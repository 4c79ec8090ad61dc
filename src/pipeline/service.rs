use crate::error::GestureError;
use crate::pipeline::classifier::GestureClassifier;
use crate::pipeline::engine::GestureEngine;
use crate::pipeline::types::{ActionCommand, TimedFrame};
use futures::future::{ready, Ready};
use std::task::{Context, Poll};
use tower::Service;

/// Exposes a [`GestureEngine`] as a `tower::Service` over timestamped frames.
///
/// Decisions are synchronous, so every call resolves immediately.
pub struct GestureService<C: GestureClassifier> {
    engine: GestureEngine<C>,
}

impl<C: GestureClassifier> GestureService<C> {
    pub fn new(engine: GestureEngine<C>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &GestureEngine<C> {
        &self.engine
    }
}

impl<C: GestureClassifier> Service<TimedFrame<C::Frame>> for GestureService<C> {
    type Response = ActionCommand;
    type Error = GestureError;
    type Future = Ready<Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: TimedFrame<C::Frame>) -> Self::Future {
        ready(Ok(self.engine.process(&request.frame, request.timestamp_ms)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::{ActuatorSlot, RecordingActuator};
    use crate::config::HandPipelineConfig;
    use crate::pipeline::types::{HandFrame, Landmark, HAND_LANDMARK_COUNT, INDEX_TIP, THUMB_TIP};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_gesture_service() {
        let recorder = RecordingActuator::new();
        let slot = ActuatorSlot::with_actuator(Arc::new(recorder.clone()));
        let mut service =
            GestureService::new(GestureEngine::hand(&HandPipelineConfig::default(), slot));

        let mut landmarks = vec![Landmark::new(0.2, 0.2); HAND_LANDMARK_COUNT];
        landmarks[INDEX_TIP] = Landmark::new(0.50, 0.50);
        landmarks[THUMB_TIP] = Landmark::new(0.52, 0.50);
        let pinch = HandFrame::new(landmarks);

        let response = service
            .ready()
            .await
            .unwrap()
            .call(TimedFrame::new(pinch.clone(), 0))
            .await
            .unwrap();
        assert_eq!(
            response,
            ActionCommand::TapAt {
                x: 540.0,
                y: 1200.0
            }
        );

        let response = service
            .ready()
            .await
            .unwrap()
            .call(TimedFrame::new(pinch, 500))
            .await
            .unwrap();
        assert_eq!(response, ActionCommand::None);
        assert_eq!(recorder.actions().len(), 1);
    }
}
