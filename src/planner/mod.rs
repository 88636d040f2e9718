//! Trim planning module

use serde::Serialize;

pub mod trim;

pub use trim::TrimPlanner;

/// Engine arguments that together reproduce a trim window
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TrimPlan {
    /// Placed before `-i`; a coarse keyframe seek
    pub input_fragment: Vec<String>,
    /// Placed after the output options; the exact seek and end bound
    pub output_fragment: Vec<String>,
}

impl TrimPlan {
    /// No trimming
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.input_fragment.is_empty() && self.output_fragment.is_empty()
    }

    /// Seconds skipped by the input-side seek, if one is planned
    pub fn coarse_seek(&self) -> Option<i64> {
        seek_value(&self.input_fragment)
    }

    /// Seconds skipped by the output-side seek, if one is planned
    pub fn fine_seek(&self) -> Option<i64> {
        seek_value(&self.output_fragment)
    }

    /// Output-side `-to` bound, if one is planned
    pub fn end_bound(&self) -> Option<i64> {
        flag_value(&self.output_fragment, "-to")
    }
}

fn seek_value(fragment: &[String]) -> Option<i64> {
    flag_value(fragment, "-ss")
}

fn flag_value(fragment: &[String], flag: &str) -> Option<i64> {
    fragment
        .iter()
        .position(|arg| arg == flag)
        .and_then(|i| fragment.get(i + 1))
        .and_then(|value| value.parse().ok())
}
