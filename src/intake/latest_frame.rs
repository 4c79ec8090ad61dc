use crate::error::GestureError;
use crate::pipeline::types::TimedFrame;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::debug;

/// Millisecond clock anchored at pipeline start. Never goes backwards.
#[derive(Debug, Clone, Copy)]
pub struct MonotonicClock {
    origin: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }

    pub fn now_ms(&self) -> i64 {
        self.origin.elapsed().as_millis() as i64
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a single-slot frame channel. A new frame replaces any frame the consumer has
/// not picked up yet.
pub fn latest_frame_channel<F>(clock: MonotonicClock) -> (FrameSender<F>, FrameReceiver<F>) {
    let (tx, rx) = watch::channel(None);
    let sender = FrameSender {
        tx: Arc::new(tx),
        clock,
    };
    let receiver = FrameReceiver {
        rx,
        last_sequence: None,
    };
    (sender, receiver)
}

/// Producer side, handed to the external frame source.
///
/// Clones may publish concurrently. Sequence numbers are assigned while the slot is
/// locked, and a frame stamped earlier than the one already published is discarded, so
/// the consumer never sees time go backwards.
pub struct FrameSender<F> {
    tx: Arc<watch::Sender<Option<TimedFrame<F>>>>,
    clock: MonotonicClock,
}

impl<F> Clone for FrameSender<F> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
            clock: self.clock,
        }
    }
}

impl<F> FrameSender<F> {
    /// Publish a frame stamped by the caller's monotonic clock.
    pub fn submit(&self, frame: F, timestamp_ms: i64) -> Result<(), GestureError> {
        if self.tx.is_closed() {
            return Err(GestureError::PipelineClosed);
        }
        self.tx.send_if_modified(|slot| {
            let sequence = match slot {
                Some(latest) if latest.timestamp_ms > timestamp_ms => {
                    debug!(
                        "Discarding frame at {}ms, already published {}ms",
                        timestamp_ms, latest.timestamp_ms
                    );
                    return false;
                }
                Some(latest) => latest.sequence + 1,
                None => 0,
            };
            *slot = Some(TimedFrame::new(frame, timestamp_ms).with_sequence(sequence));
            true
        });
        Ok(())
    }

    /// Publish a frame stamped with the pipeline clock.
    pub fn submit_now(&self, frame: F) -> Result<(), GestureError> {
        self.submit(frame, self.clock.now_ms())
    }

}

/// A frame picked up by the consumer, with the number of frames overwritten since the
/// previous pick-up.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery<F> {
    pub frame: TimedFrame<F>,
    pub dropped: u64,
}

/// Consumer side, owned by the pipeline runner.
pub struct FrameReceiver<F> {
    rx: watch::Receiver<Option<TimedFrame<F>>>,
    last_sequence: Option<u64>,
}

impl<F: Clone> FrameReceiver<F> {
    /// Wait for the next unseen frame. Returns `None` once every sender is gone.
    pub async fn next(&mut self) -> Option<Delivery<F>> {
        loop {
            self.rx.changed().await.ok()?;
            let latest = self.rx.borrow_and_update().clone();
            let Some(frame) = latest else {
                continue;
            };
            let dropped = match self.last_sequence {
                Some(last) => frame.sequence.saturating_sub(last + 1),
                None => frame.sequence,
            };
            self.last_sequence = Some(frame.sequence);
            return Some(Delivery { frame, dropped });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn only_latest_frame_is_delivered() {
        let (sender, mut receiver) = latest_frame_channel::<u32>(MonotonicClock::new());
        sender.submit(1, 0).unwrap();
        sender.submit(2, 10).unwrap();
        sender.submit(3, 20).unwrap();

        let delivery = receiver.next().await.unwrap();
        assert_eq!(delivery.frame.frame, 3);
        assert_eq!(delivery.frame.timestamp_ms, 20);
        assert_eq!(delivery.dropped, 2);

        sender.submit(4, 30).unwrap();
        let delivery = receiver.next().await.unwrap();
        assert_eq!(delivery.frame.frame, 4);
        assert_eq!(delivery.dropped, 0);
    }

    #[tokio::test]
    async fn receiver_ends_when_senders_are_dropped() {
        let (sender, mut receiver) = latest_frame_channel::<u32>(MonotonicClock::new());
        let clone = sender.clone();
        drop(sender);
        clone.submit(7, 0).unwrap();
        drop(clone);

        assert_eq!(receiver.next().await.unwrap().frame.frame, 7);
        assert!(receiver.next().await.is_none());
    }

    #[tokio::test]
    async fn submit_fails_after_receiver_is_gone() {
        let (sender, receiver) = latest_frame_channel::<u32>(MonotonicClock::new());
        drop(receiver);
        assert!(matches!(
            sender.submit(1, 0),
            Err(GestureError::PipelineClosed)
        ));
    }

    #[tokio::test]
    async fn late_frame_from_another_producer_is_discarded() {
        let (sender, mut receiver) = latest_frame_channel::<u32>(MonotonicClock::new());
        let other = sender.clone();
        sender.submit(1, 20).unwrap();
        other.submit(2, 10).unwrap();

        let delivery = receiver.next().await.unwrap();
        assert_eq!(delivery.frame.frame, 1);
        assert_eq!(delivery.frame.timestamp_ms, 20);
        assert_eq!(delivery.dropped, 0);

        other.submit(3, 20).unwrap();
        sender.submit(4, 30).unwrap();
        let delivery = receiver.next().await.unwrap();
        assert_eq!(delivery.frame.frame, 4);
        assert_eq!(delivery.frame.sequence, 2);
        assert_eq!(delivery.dropped, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_producers_deliver_in_time_order() {
        let (sender, mut receiver) = latest_frame_channel::<u32>(MonotonicClock::new());
        let producers: Vec<_> = (0..4)
            .map(|offset| {
                let sender = sender.clone();
                tokio::spawn(async move {
                    for step in 0..200 {
                        sender.submit(offset, step * 4 + offset as i64).unwrap();
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();
        drop(sender);

        let consumer = tokio::spawn(async move {
            let mut seen = Vec::new();
            while let Some(delivery) = receiver.next().await {
                seen.push((delivery.frame.sequence, delivery.frame.timestamp_ms));
            }
            seen
        });
        for producer in producers {
            producer.await.unwrap();
        }
        let seen = consumer.await.unwrap();

        assert!(!seen.is_empty());
        assert!(seen.windows(2).all(|pair| pair[0].0 < pair[1].0));
        assert!(seen.windows(2).all(|pair| pair[0].1 <= pair[1].1));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_now_uses_pipeline_clock() {
        let (sender, mut receiver) = latest_frame_channel::<u32>(MonotonicClock::new());
        tokio::time::advance(std::time::Duration::from_millis(250)).await;
        sender.submit_now(1).unwrap();
        assert_eq!(receiver.next().await.unwrap().frame.timestamp_ms, 250);
    }
}
