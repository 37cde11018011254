use tracing::debug;

use crate::frame::FrameHandle;
use crate::frame::Scheduler;

/// Shown on the play/pause control while the animation runs
pub const PAUSE_GLYPH: &str = "⏸";

/// Shown on the play/pause control while the animation is stopped
pub const PLAY_GLYPH: &str = "▶";

/// Whether the animation loop is running. A running animation always owns the handle of its
/// pending frame, which is what lets a pause cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Stopped,
    Running(FrameHandle),
}

#[derive(Debug)]
pub struct AnimationController {
    state: AnimationState,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationController {
    pub fn new() -> Self {
        Self {
            state: AnimationState::Stopped,
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, AnimationState::Running(_))
    }

    /// Glyph for the play/pause control: the action it would take next.
    pub fn glyph(&self) -> &'static str {
        match self.state {
            AnimationState::Running(_) => PAUSE_GLYPH,
            AnimationState::Stopped => PLAY_GLYPH,
        }
    }

    /// Starts the animation by scheduling its first frame. Returns `false` if it was already
    /// running.
    pub fn play<Q: Scheduler>(&mut self, scheduler: &mut Q) -> bool {
        if self.is_running() {
            return false;
        }

        let handle = scheduler.request_frame();
        self.state = AnimationState::Running(handle);
        debug!(?handle, "animation started");

        true
    }

    /// Stops the animation, cancelling its pending frame. Returns `false` if it was already
    /// stopped.
    pub fn pause<Q: Scheduler>(&mut self, scheduler: &mut Q) -> bool {
        let AnimationState::Running(handle) = self.state else {
            return false;
        };

        scheduler.cancel_frame(handle);
        self.state = AnimationState::Stopped;
        debug!(?handle, "animation paused");

        true
    }

    pub fn toggle<Q: Scheduler>(&mut self, scheduler: &mut Q) {
        if self.is_running() {
            self.pause(scheduler);
        } else {
            self.play(scheduler);
        }
    }

    /// Whether `handle` is the frame this animation is waiting on.
    pub fn owns(&self, handle: FrameHandle) -> bool {
        self.state == AnimationState::Running(handle)
    }

    /// Schedules the frame after the current one.
    pub fn schedule_next<Q: Scheduler>(&mut self, scheduler: &mut Q) {
        if self.is_running() {
            self.state = AnimationState::Running(scheduler.request_frame());
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::frame::FrameQueue;

    #[test]
    fn starts_stopped() {
        let controller = AnimationController::new();

        assert_eq!(controller.state(), AnimationState::Stopped);
        assert_eq!(controller.glyph(), PLAY_GLYPH);
    }

    #[test]
    fn play_schedules_exactly_one_frame() {
        let mut queue = FrameQueue::new();
        let mut controller = AnimationController::new();

        assert!(controller.play(&mut queue));
        assert!(!controller.play(&mut queue));

        assert_eq!(queue.pending().len(), 1);
        assert!(controller.owns(queue.pending()[0]));
        assert_eq!(controller.glyph(), PAUSE_GLYPH);
    }

    #[test]
    fn pause_cancels_the_pending_frame() {
        let mut queue = FrameQueue::new();
        let mut controller = AnimationController::new();

        controller.play(&mut queue);
        assert!(controller.pause(&mut queue));
        assert!(!controller.pause(&mut queue));

        assert_eq!(controller.state(), AnimationState::Stopped);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn schedule_next_replaces_the_handle() {
        let mut queue = FrameQueue::new();
        let mut controller = AnimationController::new();

        controller.play(&mut queue);
        let first = queue.drain()[0];

        controller.schedule_next(&mut queue);
        let second = queue.pending()[0];

        assert!(!controller.owns(first));
        assert!(controller.owns(second));
    }

    #[test]
    fn stopped_controller_schedules_nothing() {
        let mut queue = FrameQueue::new();
        let mut controller = AnimationController::new();

        controller.schedule_next(&mut queue);
        assert!(queue.pending().is_empty());
    }

    #[test]
    fn toggle_flips_state() {
        let mut queue = FrameQueue::new();
        let mut controller = AnimationController::new();

        controller.toggle(&mut queue);
        assert!(controller.is_running());

        controller.toggle(&mut queue);
        assert!(!controller.is_running());
        assert!(queue.pending().is_empty());
    }
}
