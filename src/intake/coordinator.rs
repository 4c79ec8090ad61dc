use crate::{
    actuator::{ActuatorSlot, DeviceActuator, DeviceCommand},
    config::Configuration,
    error::GestureError,
    intake::latest_frame::{latest_frame_channel, FrameReceiver, FrameSender, MonotonicClock},
    pipeline::{
        FaceFrame, GestureClassifier, GestureEngine, GestureService, HandFrame, MetricsObserver,
        PerceptionFrame, PipelineMonitor, PipelineStats, TimedFrame,
    },
};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower::{Service, ServiceExt};
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// A running pipeline: its frame intake, runner task and counters.
struct PipelineHandle<F> {
    frames: FrameSender<F>,
    task: JoinHandle<()>,
    monitor: PipelineMonitor,
}

/// Owns the face and hand pipelines and their runner tasks.
///
/// Each pipeline processes one frame at a time on its own task; frames submitted while a
/// frame is in flight overwrite each other and only the latest is processed next.
pub struct Coordinator {
    id: Uuid,
    face: Option<PipelineHandle<FaceFrame>>,
    hand: Option<PipelineHandle<HandFrame>>,
    actuator: ActuatorSlot,
    cancel_token: CancellationToken,
}

impl Coordinator {
    fn start_pipeline<C>(
        id: Uuid,
        engine: GestureEngine<C>,
        clock: MonotonicClock,
        cancel_token: CancellationToken,
    ) -> PipelineHandle<C::Frame>
    where
        C: GestureClassifier + 'static,
        C::Frame: Clone,
    {
        let monitor = PipelineMonitor::new();
        let engine = engine.add_observer(Arc::new(monitor.clone()));
        let (frames, frame_rx) = latest_frame_channel(clock);
        let task = tokio::spawn(run_pipeline(
            id,
            GestureService::new(engine),
            frame_rx,
            monitor.clone(),
            cancel_token,
        ));
        PipelineHandle {
            frames,
            task,
            monitor,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The slot the host integration attaches its actuator to.
    pub fn actuator(&self) -> &ActuatorSlot {
        &self.actuator
    }

    pub fn face_frames(&self) -> Option<FrameSender<FaceFrame>> {
        self.face.as_ref().map(|handle| handle.frames.clone())
    }

    pub fn hand_frames(&self) -> Option<FrameSender<HandFrame>> {
        self.hand.as_ref().map(|handle| handle.frames.clone())
    }

    /// Route a frame to the pipeline matching its kind.
    pub fn submit(&self, frame: PerceptionFrame, timestamp_ms: i64) -> Result<(), GestureError> {
        match frame {
            PerceptionFrame::Face(frame) => self
                .face
                .as_ref()
                .ok_or(GestureError::PipelineClosed)?
                .frames
                .submit(frame, timestamp_ms),
            PerceptionFrame::Hand(frame) => self
                .hand
                .as_ref()
                .ok_or(GestureError::PipelineClosed)?
                .frames
                .submit(frame, timestamp_ms),
        }
    }

    pub fn face_stats(&self) -> Option<PipelineStats> {
        self.face.as_ref().map(|handle| handle.monitor.snapshot())
    }

    pub fn hand_stats(&self) -> Option<PipelineStats> {
        self.hand.as_ref().map(|handle| handle.monitor.snapshot())
    }

    pub fn stop(&self) {
        self.cancel_token.cancel();
        if let Some(face) = &self.face {
            face.task.abort();
        }
        if let Some(hand) = &self.hand {
            hand.task.abort();
        }
    }

    /// Cancel both runners, wait for them to exit and release the actuator.
    ///
    /// Every runner is awaited and the actuator is detached even if a runner failed; the
    /// first failure is reported.
    pub async fn shutdown(mut self) -> Result<(), GestureError> {
        self.cancel_token.cancel();
        let face = self.face.take().map(|handle| handle.task);
        let hand = self.hand.take().map(|handle| handle.task);
        let mut first_error = None;
        for task in face.into_iter().chain(hand) {
            if let Err(e) = task.await {
                error!("Pipeline task failed: {}", e);
                first_error.get_or_insert(GestureError::Runner(e.to_string()));
            }
        }
        self.actuator.detach();
        info!("Coordinator {} shut down", self.id);
        first_error.map_or(Ok(()), Err)
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        self.stop();
    }
}

#[instrument(skip_all, fields(pipeline = %service.engine().name(), coordinator = %id))]
async fn run_pipeline<C>(
    id: Uuid,
    mut service: GestureService<C>,
    mut frame_rx: FrameReceiver<C::Frame>,
    monitor: PipelineMonitor,
    cancel_token: CancellationToken,
) where
    C: GestureClassifier + 'static,
    C::Frame: Clone,
{
    let name = service.engine().name().to_string();
    info!("Pipeline started");
    loop {
        let delivery = tokio::select! {
            _ = cancel_token.cancelled() => break,
            delivery = frame_rx.next() => match delivery {
                Some(delivery) => delivery,
                None => break,
            },
        };

        if delivery.dropped > 0 {
            debug!("Dropped {} stale frames", delivery.dropped);
            monitor.on_frames_dropped(&name, delivery.dropped);
        }

        let response = match ServiceExt::<TimedFrame<C::Frame>>::ready(&mut service).await {
            Ok(ready) => ready.call(delivery.frame).await,
            Err(e) => Err(e),
        };
        if let Err(e) = response {
            error!("Pipeline error: {}", e);
        }
    }
    info!("Pipeline stopped");
}

pub struct CoordinatorBuilder {
    configuration: Configuration,
    face_enabled: bool,
    hand_enabled: bool,
    actuator: ActuatorSlot,
    observers: Vec<Arc<dyn MetricsObserver>>,
}

impl CoordinatorBuilder {
    pub fn new(configuration: Configuration) -> Self {
        Self {
            configuration,
            face_enabled: true,
            hand_enabled: true,
            actuator: ActuatorSlot::new(),
            observers: Vec::new(),
        }
    }

    // Starts the face pipeline, enabled by default.
    pub fn face_pipeline(mut self, enabled: bool) -> Self {
        self.face_enabled = enabled;
        self
    }

    // Starts the hand pipeline, enabled by default.
    pub fn hand_pipeline(mut self, enabled: bool) -> Self {
        self.hand_enabled = enabled;
        self
    }

    // Overrides the configured face cooldown.
    pub fn face_cooldown_ms(mut self, cooldown_ms: i64) -> Self {
        self.configuration.face.cooldown_ms = cooldown_ms;
        self
    }

    // Overrides the configured hand cooldown.
    pub fn hand_cooldown_ms(mut self, cooldown_ms: i64) -> Self {
        self.configuration.hand.cooldown_ms = cooldown_ms;
        self
    }

    pub fn actuator(mut self, actuator: ActuatorSlot) -> Self {
        self.actuator = actuator;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn MetricsObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Attach a [`DeviceActuator`] to the slot, returning the stream of device commands
    /// for the host to execute.
    pub fn device_actuator(self) -> (Self, mpsc::Receiver<DeviceCommand>) {
        let (device, command_rx) = DeviceActuator::channel(
            self.configuration.gestures,
            self.configuration.device_command_buffer_size,
        );
        self.actuator.attach(Arc::new(device));
        (self, command_rx)
    }

    pub fn build(self) -> Result<Coordinator, GestureError> {
        self.configuration.validate()?;
        if !self.face_enabled && !self.hand_enabled {
            return Err(GestureError::InvalidConfiguration(
                "At least one pipeline must be enabled".to_string(),
            ));
        }
        tokio::runtime::Handle::try_current()
            .map_err(|e| GestureError::Runner(e.to_string()))?;

        let id = Uuid::new_v4();
        let cancel_token = CancellationToken::new();
        let clock = MonotonicClock::new();

        let face = self.face_enabled.then(|| {
            let engine = self.wire(GestureEngine::face(
                &self.configuration.face,
                self.actuator.clone(),
            ));
            Coordinator::start_pipeline(id, engine, clock, cancel_token.clone())
        });
        let hand = self.hand_enabled.then(|| {
            let engine = self.wire(GestureEngine::hand(
                &self.configuration.hand,
                self.actuator.clone(),
            ));
            Coordinator::start_pipeline(id, engine, clock, cancel_token.clone())
        });

        info!(
            "Coordinator {} started (face: {}, hand: {})",
            id, self.face_enabled, self.hand_enabled
        );
        Ok(Coordinator {
            id,
            face,
            hand,
            actuator: self.actuator,
            cancel_token,
        })
    }

    fn wire<C: GestureClassifier>(&self, engine: GestureEngine<C>) -> GestureEngine<C> {
        self.observers
            .iter()
            .fold(engine, |engine, observer| engine.add_observer(observer.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actuator::Actuator;
    use std::time::Duration;

    // Panics on app switching, taking the face runner down with it.
    struct FailingActuator;

    impl Actuator for FailingActuator {
        fn toggle(&self) {}
        fn scroll_down(&self) {}
        fn scroll_up(&self) {}
        fn go_back(&self) {}
        fn go_home(&self) {}
        fn switch_apps(&self) {
            panic!("device lost");
        }
        fn tap(&self, _x: f32, _y: f32) {}
        fn pulse(&self, _duration: Duration) {}
    }

    #[test]
    fn build_requires_a_runtime() {
        let result = CoordinatorBuilder::new(Configuration::default()).build();
        assert!(matches!(result, Err(GestureError::Runner(_))));
    }

    #[tokio::test]
    async fn build_requires_a_pipeline() {
        let result = CoordinatorBuilder::new(Configuration::default())
            .face_pipeline(false)
            .hand_pipeline(false)
            .build();
        assert!(matches!(
            result,
            Err(GestureError::InvalidConfiguration(_))
        ));
    }

    #[tokio::test]
    async fn build_rejects_invalid_overrides() {
        let result = CoordinatorBuilder::new(Configuration::default())
            .hand_cooldown_ms(-5)
            .build();
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn shutdown_releases_actuator_after_runner_failure() {
        let slot = ActuatorSlot::with_actuator(Arc::new(FailingActuator));
        let coordinator = CoordinatorBuilder::new(Configuration::default())
            .actuator(slot.clone())
            .build()
            .expect("Failed to build coordinator");

        coordinator
            .submit(
                PerceptionFrame::Face(FaceFrame {
                    yaw_deg: 30.0,
                    ..FaceFrame::default()
                }),
                0,
            )
            .unwrap();
        tokio::time::timeout(Duration::from_secs(5), async {
            while !coordinator
                .face
                .as_ref()
                .is_some_and(|handle| handle.task.is_finished())
            {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("face runner did not fail");

        let hand_task_alive = coordinator
            .hand
            .as_ref()
            .is_some_and(|handle| !handle.task.is_finished());
        assert!(hand_task_alive);

        let result = coordinator.shutdown().await;
        assert!(matches!(result, Err(GestureError::Runner(_))));
        assert!(!slot.is_attached());
    }

    #[tokio::test]
    async fn device_actuator_is_attached_to_the_slot() {
        let (builder, _commands) = CoordinatorBuilder::new(Configuration::default())
            .hand_pipeline(false)
            .device_actuator();
        let coordinator = builder.build().expect("Failed to build coordinator");
        assert!(coordinator.actuator().is_attached());
        coordinator.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_coordinator() {
        let coordinator = CoordinatorBuilder::new(Configuration::default())
            .hand_pipeline(false)
            .build()
            .expect("Failed to build coordinator");
        assert!(coordinator.face_frames().is_some());
        assert!(coordinator.hand_frames().is_none());
        assert!(matches!(
            coordinator.submit(PerceptionFrame::Hand(HandFrame::empty()), 0),
            Err(GestureError::PipelineClosed)
        ));
        coordinator.shutdown().await.unwrap();
    }
}
