//! Collaborators the path collector delegates to: time arithmetic that is
//! aware of the search direction, cost calculation and slack.
//!
//! The search itself owns none of this logic, so the same components serve a
//! forward (depart-after) and a reverse (arrive-by) search.

mod calculator;
mod cost;
mod slack;

use serde::{Deserialize, Serialize};

pub use calculator::{ForwardTransitCalculator, ReverseTransitCalculator, TransitCalculator};
pub use cost::{CostCalculator, DefaultCostCalculator};
pub use slack::{DefaultSlackProvider, SlackProvider};

/// Direction in which the search moves through time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchDirection {
    /// Depart after a given time, moving forward in time.
    #[default]
    Forward,
    /// Arrive before a given time, moving backward in time.
    Reverse,
}

impl SearchDirection {
    pub fn is_forward(self) -> bool {
        self == SearchDirection::Forward
    }

    /// Move `time` by `duration` in the search direction.
    pub fn plus(self, time: i32, duration: i32) -> i32 {
        match self {
            SearchDirection::Forward => time + duration,
            SearchDirection::Reverse => time - duration,
        }
    }

    /// Move `time` by `duration` against the search direction.
    pub fn minus(self, time: i32, duration: i32) -> i32 {
        match self {
            SearchDirection::Forward => time - duration,
            SearchDirection::Reverse => time + duration,
        }
    }

    /// True if `candidate` comes strictly after `subject` in search order.
    pub fn is_after(self, subject: i32, candidate: i32) -> bool {
        match self {
            SearchDirection::Forward => candidate > subject,
            SearchDirection::Reverse => candidate < subject,
        }
    }

    /// Elapsed time from `from` to `to` in the search direction.
    pub fn duration_between(self, from: i32, to: i32) -> i32 {
        match self {
            SearchDirection::Forward => to - from,
            SearchDirection::Reverse => from - to,
        }
    }
}
