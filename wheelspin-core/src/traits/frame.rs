//! Per-frame callback facility

/// Token for one scheduled frame callback
///
/// Issued by the scheduler; the session holds at most one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationHandle(u32);

impl AnimationHandle {
    /// Wrap a scheduler-specific id
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Scheduler-specific id
    pub const fn id(self) -> u32 {
        self.0
    }
}

/// Trait for display-synchronized frame timers
///
/// The scheduler fires a requested frame once by calling
/// [`WheelSession::on_frame`](crate::WheelSession::on_frame) with the handle
/// it returned and the current timestamp. A cancelled handle must never
/// fire.
pub trait FrameScheduler {
    /// Schedule one frame callback
    fn request_frame(&mut self) -> AnimationHandle;

    /// Cancel a scheduled frame callback that has not fired yet
    fn cancel_frame(&mut self, handle: AnimationHandle);
}

impl<T: FrameScheduler + ?Sized> FrameScheduler for &mut T {
    fn request_frame(&mut self) -> AnimationHandle {
        (**self).request_frame()
    }

    fn cancel_frame(&mut self, handle: AnimationHandle) {
        (**self).cancel_frame(handle)
    }
}
