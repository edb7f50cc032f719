//! Access and egress legs: the connection between a transit stop and the
//! origin or destination outside the network.

use std::fmt;

use crate::time::{format_cost_centi, format_duration, format_time};

/// Index of a stop in the transit network.
pub type StopIndex = usize;

/// Window in which an access or egress leg may start.
///
/// Both bounds are inclusive search times in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpeningHours {
    pub open: i32,
    pub close: i32,
}

/// A leg connecting a stop with the origin (access) or destination (egress).
///
/// Plain walking legs have no rides; flexible (on-demand) legs count their
/// rides so the round bookkeeping of the search stays consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessEgress {
    stop: StopIndex,
    duration: i32,
    c1: i32,
    number_of_rides: u32,
    stop_reached_on_board: bool,
    opening_hours: Option<OpeningHours>,
}

impl AccessEgress {
    /// A walking leg to or from `stop`.
    pub fn walk(stop: StopIndex, duration: i32, c1: i32) -> Self {
        Self {
            stop,
            duration,
            c1,
            number_of_rides: 0,
            stop_reached_on_board: false,
            opening_hours: None,
        }
    }

    /// A flexible leg with one or more rides.
    pub fn flex(
        stop: StopIndex,
        duration: i32,
        c1: i32,
        number_of_rides: u32,
        stop_reached_on_board: bool,
    ) -> Self {
        Self {
            number_of_rides,
            stop_reached_on_board,
            ..Self::walk(stop, duration, c1)
        }
    }

    /// Restrict the departure of this leg to `[open, close]`.
    pub fn with_opening_hours(mut self, open: i32, close: i32) -> Self {
        self.opening_hours = Some(OpeningHours { open, close });
        self
    }

    pub fn stop(&self) -> StopIndex {
        self.stop
    }

    /// Duration in seconds.
    pub fn duration(&self) -> i32 {
        self.duration
    }

    /// Generalized cost in centi-seconds.
    pub fn c1(&self) -> i32 {
        self.c1
    }

    pub fn number_of_rides(&self) -> u32 {
        self.number_of_rides
    }

    pub fn has_rides(&self) -> bool {
        self.number_of_rides > 0
    }

    /// True if the traveller is still on board when the stop is reached,
    /// so they may continue on foot without an additional transfer.
    pub fn stop_reached_on_board(&self) -> bool {
        self.stop_reached_on_board
    }

    pub fn opening_hours(&self) -> Option<OpeningHours> {
        self.opening_hours
    }

    pub fn has_opening_hours(&self) -> bool {
        self.opening_hours.is_some()
    }

    /// Earliest departure at or after `requested` that is inside the opening
    /// hours, or `None` if the leg has closed.
    pub fn earliest_departure_time(&self, requested: i32) -> Option<i32> {
        match self.opening_hours {
            None => Some(requested),
            Some(OpeningHours { open, close }) => {
                if requested > close {
                    None
                } else {
                    Some(requested.max(open))
                }
            }
        }
    }

    /// Latest arrival at or before `requested` whose departure is inside the
    /// opening hours, or `None` if the leg has not opened yet.
    pub fn latest_arrival_time(&self, requested: i32) -> Option<i32> {
        match self.opening_hours {
            None => Some(requested),
            Some(OpeningHours { open, close }) => {
                let departure = requested - self.duration;
                if departure < open {
                    None
                } else {
                    Some(departure.min(close) + self.duration)
                }
            }
        }
    }
}

impl fmt::Display for AccessEgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_rides() {
            write!(f, "Flex {}x ", self.number_of_rides)?;
        } else {
            f.write_str("Walk ")?;
        }
        write!(
            f,
            "{} {}",
            format_duration(self.duration),
            format_cost_centi(self.c1)
        )?;
        if let Some(OpeningHours { open, close }) = self.opening_hours {
            write!(f, " Open({} {})", format_time(open), format_time(close))?;
        }
        write!(f, " ~ {}", self.stop)
    }
}
