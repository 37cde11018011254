use std::time::Instant;

/// Identifies a requested frame. Needed to cancel it before it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameHandle(u64);

/// Per-frame callback scheduling, fired roughly once per display refresh.
pub trait Scheduler {
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancels a pending frame. Cancelling a frame that already fired does nothing.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// A cooperative frame scheduler for a single-threaded host loop.
///
/// The host calls [`FrameQueue::drain`] on every refresh and runs the frames it gets back.
/// Frames requested while those run are due on the following refresh.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next: u64,
    pending: Vec<FrameHandle>,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every frame due this refresh.
    pub fn drain(&mut self) -> Vec<FrameHandle> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[FrameHandle] {
        &self.pending
    }
}

impl Scheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next);
        self.next += 1;
        self.pending.push(handle);

        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending.retain(|&h| h != handle);
    }
}

/// A monotonic clock in milliseconds.
pub trait Clock {
    fn now(&self) -> f64;
}

/// Milliseconds since the clock was created.
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
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> f64 {
        self.origin.elapsed().as_secs_f64() * 1000.0
    }
}
