use std::collections::VecDeque;
use std::fmt;

/// Number of samples kept to compute the window statistics
pub const WINDOW: usize = 100;

/// Frame rate statistics over the last [`WINDOW`] frames. All rates are in frames per second.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FpsSummary {
    pub latest: f64,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
}

impl fmt::Display for FpsSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Frames per Second:")?;
        writeln!(f, "         latest = {}", self.latest.round())?;
        writeln!(f, "avg of last {WINDOW} = {}", self.mean.round())?;
        writeln!(f, "min of last {WINDOW} = {}", self.min.round())?;
        write!(f, "max of last {WINDOW} = {}", self.max.round())
    }
}

/// Tracks the frame rate from the time elapsed between consecutive samples.
#[derive(Debug, Clone)]
pub struct FpsTracker {
    frames: VecDeque<f64>,

    /// Timestamp of the previous sample, in milliseconds
    last: f64,

    summary: FpsSummary,
}

impl FpsTracker {
    /// Starts tracking at `now` (milliseconds).
    pub fn new(now: f64) -> Self {
        Self {
            frames: VecDeque::with_capacity(WINDOW + 1),
            last: now,
            summary: FpsSummary::default(),
        }
    }

    /// Records a frame boundary at `now` (milliseconds) and returns the updated statistics.
    ///
    /// Two samples with the same timestamp give an infinite rate.
    pub fn sample(&mut self, now: f64) -> FpsSummary {
        let delta = now - self.last;
        self.last = now;

        let fps = 1000.0 / delta;

        self.frames.push_back(fps);
        if self.frames.len() > WINDOW {
            self.frames.pop_front();
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for &frame in &self.frames {
            sum += frame;
            min = min.min(frame);
            max = max.max(frame);
        }

        self.summary = FpsSummary {
            latest: fps,
            mean: sum / self.frames.len() as f64,
            min,
            max,
        };

        self.summary
    }

    /// Statistics as of the last sample
    pub fn summary(&self) -> FpsSummary {
        self.summary
    }

    /// Samples currently in the window, oldest first
    pub fn window(&self) -> impl Iterator<Item = f64> + '_ {
        self.frames.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn steady_frames_report_steady_rate() {
        let mut fps = FpsTracker::new(0.0);

        let mut summary = FpsSummary::default();
        for t in (10..=1000).step_by(10) {
            summary = fps.sample(t as f64);
        }

        assert_eq!(fps.len(), 100);
        assert!((summary.mean - 100.0).abs() < 1e-9);
        assert_eq!(summary.min, 100.0);
        assert_eq!(summary.max, 100.0);
        assert_eq!(summary.latest, 100.0);
    }

    #[test]
    fn window_evicts_oldest_samples() {
        let mut fps = FpsTracker::new(0.0);

        // the first frame is much faster than the rest
        fps.sample(1.0);
        let mut t = 1.0;
        for _ in 1..150 {
            t += 20.0;
            fps.sample(t);
        }

        let summary = fps.summary();
        assert_eq!(fps.len(), WINDOW);
        assert!(fps.window().all(|f| f == 50.0));
        assert_eq!(summary.max, 50.0);
        assert_eq!(summary.min, 50.0);
    }

    #[test]
    fn statistics_cover_the_whole_window() {
        let mut fps = FpsTracker::new(0.0);

        fps.sample(10.0); // 100
        fps.sample(30.0); // 50
        let summary = fps.sample(55.0); // 40

        assert_eq!(summary.latest, 40.0);
        assert_eq!(summary.min, 40.0);
        assert_eq!(summary.max, 100.0);
        assert!((summary.mean - 190.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn readout_rounds_for_display() {
        let mut fps = FpsTracker::new(0.0);

        fps.sample(16.0);
        fps.sample(33.0);
        let summary = fps.sample(50.0);

        insta::assert_snapshot!(summary.to_string(), @r"
        Frames per Second:
                 latest = 59
        avg of last 100 = 60
        min of last 100 = 59
        max of last 100 = 63
        ");
    }
}
