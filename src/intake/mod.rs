pub mod coordinator;
pub mod latest_frame;

pub use coordinator::{Coordinator, CoordinatorBuilder};
pub use latest_frame::{latest_frame_channel, Delivery, FrameReceiver, FrameSender, MonotonicClock};
