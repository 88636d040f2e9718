//! Trim window planning with fast-seek splitting
//!
//! Seeking far into a file on the output side forces the engine to decode
//! everything before the start point. Past the threshold the seek is split in
//! two: a fast keyframe seek on the input that lands `threshold` seconds early,
//! followed by an exact output seek over the remaining `threshold` seconds.

use tracing::debug;

use crate::domain::model::{TrimWindow, FAST_SEEK_THRESHOLD_SECS};
use crate::planner::TrimPlan;

/// Planner that turns a trim window into engine seek arguments
#[derive(Debug, Clone, Copy)]
pub struct TrimPlanner {
    threshold: i64,
}

impl Default for TrimPlanner {
    fn default() -> Self {
        Self::new()
    }
}

impl TrimPlanner {
    /// Create a planner with the standard fast-seek threshold
    pub fn new() -> Self {
        Self::with_threshold(FAST_SEEK_THRESHOLD_SECS)
    }

    pub fn with_threshold(threshold: i64) -> Self {
        Self { threshold }
    }

    /// Plan the seek arguments for `window`.
    ///
    /// `window` must already have passed the checks in `TrimWindow::new`.
    pub fn plan(&self, window: &TrimWindow) -> TrimPlan {
        if !window.enabled {
            return TrimPlan::empty();
        }

        let fast_seek = window.start_seconds > self.threshold;
        let plan = if fast_seek {
            self.plan_fast_seek(window)
        } else {
            Self::plan_exact(window)
        };

        debug!(
            start = window.start_seconds,
            end = ?window.has_end.then_some(window.end_seconds),
            fast_seek,
            "Planned trim: input={:?} output={:?}",
            plan.input_fragment,
            plan.output_fragment
        );

        plan
    }

    /// Frame-accurate output seek straight to the start
    fn plan_exact(window: &TrimWindow) -> TrimPlan {
        let mut output = vec!["-ss".to_string(), window.start_seconds.to_string()];
        if window.has_end {
            output.push("-to".to_string());
            output.push(window.end_seconds.to_string());
        }

        TrimPlan {
            input_fragment: Vec::new(),
            output_fragment: output,
        }
    }

    /// Coarse input seek to `start - threshold`, then a fine seek of `threshold`
    fn plan_fast_seek(&self, window: &TrimWindow) -> TrimPlan {
        let coarse = window.start_seconds - self.threshold;
        let input = vec!["-ss".to_string(), coarse.to_string()];

        // Output timestamps restart at the coarse seek point
        let mut output = vec!["-ss".to_string(), self.threshold.to_string()];
        if let Some(duration) = window.duration_seconds() {
            output.push("-to".to_string());
            output.push((self.threshold + duration).to_string());
        }

        TrimPlan {
            input_fragment: input,
            output_fragment: output,
        }
    }
}
