//! Time arithmetic for forward and reverse searches.

use super::SearchDirection;
use crate::arrivals::AccessEgress;
use crate::time::format_time;

/// Direction-aware time calculations used when joining a stop arrival with an
/// egress leg.
///
/// A reverse search treats "plus" as subtraction, so callers can write the
/// same code for both directions.
pub trait TransitCalculator: Send + Sync {
    fn direction(&self) -> SearchDirection;

    /// Time at which `egress` can start from a stop reached at `arrival_time`.
    ///
    /// Returns `None` when the egress cannot be used from this arrival, for
    /// example because its opening hours have passed. That is an expected
    /// outcome, not an error.
    fn calculate_egress_departure_time(
        &self,
        arrival_time: i32,
        egress: &AccessEgress,
        transfer_slack: i32,
    ) -> Option<i32>;

    fn plus_duration(&self, time: i32, duration: i32) -> i32 {
        self.direction().plus(time, duration)
    }

    fn minus_duration(&self, time: i32, duration: i32) -> i32 {
        self.direction().minus(time, duration)
    }

    /// True if `candidate` comes strictly after `subject` in search order.
    fn is_after(&self, subject: i32, candidate: i32) -> bool {
        self.direction().is_after(subject, candidate)
    }

    /// True if a destination reached at `time` is outside the search limit.
    fn exceeds_time_limit(&self, time: i32) -> bool;

    /// Human readable explanation used when a path is rejected by the limit.
    fn exceeds_time_limit_reason(&self) -> String;
}

/// Calculator for depart-after searches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ForwardTransitCalculator {
    latest_accepted_arrival_time: Option<i32>,
}

impl ForwardTransitCalculator {
    /// Create a calculator. Destinations reached after
    /// `latest_accepted_arrival_time` are rejected; `None` means no limit.
    pub fn new(latest_accepted_arrival_time: Option<i32>) -> Self {
        Self {
            latest_accepted_arrival_time,
        }
    }
}

impl TransitCalculator for ForwardTransitCalculator {
    fn direction(&self) -> SearchDirection {
        SearchDirection::Forward
    }

    fn calculate_egress_departure_time(
        &self,
        arrival_time: i32,
        egress: &AccessEgress,
        transfer_slack: i32,
    ) -> Option<i32> {
        // Walking off the network is not a transfer; boarding a flex ride is.
        let departure_time = if egress.has_rides() {
            arrival_time + transfer_slack
        } else {
            arrival_time
        };
        egress.earliest_departure_time(departure_time)
    }

    fn exceeds_time_limit(&self, time: i32) -> bool {
        self.latest_accepted_arrival_time
            .is_some_and(|limit| self.is_after(limit, time))
    }

    fn exceeds_time_limit_reason(&self) -> String {
        match self.latest_accepted_arrival_time {
            Some(limit) => format!(
                "The arrival time exceeds the time limit, arrive to late: {}.",
                format_time(limit)
            ),
            None => "No arrival time limit is set.".to_string(),
        }
    }
}

/// Calculator for arrive-by searches, moving backward in time.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReverseTransitCalculator {
    earliest_accepted_departure_time: Option<i32>,
}

impl ReverseTransitCalculator {
    /// Create a calculator. Origins reached before
    /// `earliest_accepted_departure_time` are rejected; `None` means no limit.
    pub fn new(earliest_accepted_departure_time: Option<i32>) -> Self {
        Self {
            earliest_accepted_departure_time,
        }
    }
}

impl TransitCalculator for ReverseTransitCalculator {
    fn direction(&self) -> SearchDirection {
        SearchDirection::Reverse
    }

    fn calculate_egress_departure_time(
        &self,
        arrival_time: i32,
        egress: &AccessEgress,
        transfer_slack: i32,
    ) -> Option<i32> {
        let departure_time = if egress.has_rides() {
            arrival_time - transfer_slack
        } else {
            arrival_time
        };
        egress.latest_arrival_time(departure_time)
    }

    fn exceeds_time_limit(&self, time: i32) -> bool {
        self.earliest_accepted_departure_time
            .is_some_and(|limit| self.is_after(limit, time))
    }

    fn exceeds_time_limit_reason(&self) -> String {
        match self.earliest_accepted_departure_time {
            Some(limit) => format!(
                "The departure time exceeds the time limit, depart to early: {}.",
                format_time(limit)
            ),
            None => "No departure time limit is set.".to_string(),
        }
    }
}
