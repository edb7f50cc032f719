//! Completed journeys as seen by users of the search.

use std::fmt;

use crate::arrivals::{StopIndex, TripIndex};
use crate::time::{format_cost_centi, format_duration, format_time};

/// Resolves stop indexes to display names.
pub trait StopNameResolver {
    fn stop_name(&self, stop: StopIndex) -> String;
}

impl<F> StopNameResolver for F
where
    F: Fn(StopIndex) -> String,
{
    fn stop_name(&self, stop: StopIndex) -> String {
        self(stop)
    }
}

/// One leg of a completed path. Times run forward: `from_time <= to_time`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathLeg {
    /// From the origin to the first stop.
    Access {
        to_stop: StopIndex,
        from_time: i32,
        to_time: i32,
        c1: i32,
    },
    /// Riding a trip between two stops.
    Transit {
        from_stop: StopIndex,
        to_stop: StopIndex,
        from_time: i32,
        to_time: i32,
        trip: TripIndex,
        c1: i32,
    },
    /// Walking between two stops.
    Transfer {
        from_stop: StopIndex,
        to_stop: StopIndex,
        from_time: i32,
        to_time: i32,
        c1: i32,
    },
    /// From the last stop to the destination.
    Egress {
        from_stop: StopIndex,
        from_time: i32,
        to_time: i32,
        c1: i32,
    },
}

impl PathLeg {
    pub fn from_time(&self) -> i32 {
        match self {
            PathLeg::Access { from_time, .. }
            | PathLeg::Transit { from_time, .. }
            | PathLeg::Transfer { from_time, .. }
            | PathLeg::Egress { from_time, .. } => *from_time,
        }
    }

    pub fn to_time(&self) -> i32 {
        match self {
            PathLeg::Access { to_time, .. }
            | PathLeg::Transit { to_time, .. }
            | PathLeg::Transfer { to_time, .. }
            | PathLeg::Egress { to_time, .. } => *to_time,
        }
    }

    /// Generalized cost attributed to this leg.
    pub fn c1(&self) -> i32 {
        match self {
            PathLeg::Access { c1, .. }
            | PathLeg::Transit { c1, .. }
            | PathLeg::Transfer { c1, .. }
            | PathLeg::Egress { c1, .. } => *c1,
        }
    }

    /// Stop where the leg ends, `None` for the egress leg.
    pub fn to_stop(&self) -> Option<StopIndex> {
        match self {
            PathLeg::Access { to_stop, .. }
            | PathLeg::Transit { to_stop, .. }
            | PathLeg::Transfer { to_stop, .. } => Some(*to_stop),
            PathLeg::Egress { .. } => None,
        }
    }

    pub fn is_transit(&self) -> bool {
        matches!(self, PathLeg::Transit { .. })
    }

    pub fn duration(&self) -> i32 {
        self.to_time() - self.from_time()
    }
}

/// A completed journey and its criteria.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    iteration_departure_time: i32,
    start_time: i32,
    end_time: i32,
    number_of_transfers: u32,
    c1: i32,
    legs: Vec<PathLeg>,
}

impl Path {
    /// Build a path from its legs. Start and end time are taken from the
    /// first and last leg.
    ///
    /// # Panics
    ///
    /// Panics if `legs` is empty; use [`Path::dummy`] for criteria-only paths.
    pub fn new(
        iteration_departure_time: i32,
        legs: Vec<PathLeg>,
        number_of_transfers: u32,
        c1: i32,
    ) -> Self {
        let (Some(first), Some(last)) = (legs.first(), legs.last()) else {
            panic!("a path needs at least one leg");
        };
        Self {
            iteration_departure_time,
            start_time: first.from_time(),
            end_time: last.to_time(),
            number_of_transfers,
            c1,
            legs,
        }
    }

    /// A path with criteria only and no legs, used to ask a pareto set whether
    /// a path with these criteria would survive.
    pub fn dummy(
        iteration_departure_time: i32,
        start_time: i32,
        end_time: i32,
        number_of_transfers: u32,
        c1: i32,
    ) -> Self {
        Self {
            iteration_departure_time,
            start_time,
            end_time,
            number_of_transfers,
            c1,
            legs: Vec::new(),
        }
    }

    /// Departure time of the search iteration that found this path.
    pub fn iteration_departure_time(&self) -> i32 {
        self.iteration_departure_time
    }

    pub fn start_time(&self) -> i32 {
        self.start_time
    }

    pub fn end_time(&self) -> i32 {
        self.end_time
    }

    pub fn duration(&self) -> i32 {
        self.end_time - self.start_time
    }

    pub fn number_of_transfers(&self) -> u32 {
        self.number_of_transfers
    }

    /// Total generalized cost in centi-seconds.
    pub fn c1(&self) -> i32 {
        self.c1
    }

    pub fn legs(&self) -> &[PathLeg] {
        &self.legs
    }

    pub fn transit_legs(&self) -> impl Iterator<Item = &PathLeg> {
        self.legs.iter().filter(|leg| leg.is_transit())
    }

    /// Render the path with stop names from `resolver`, e.g.
    /// `Access 2m ~ A ~ Trip 7 08:02:00 08:20:00 ~ B ~ Egress 3m [...]`.
    pub fn to_string_with(&self, resolver: &dyn StopNameResolver) -> String {
        let mut out = String::new();

        for leg in &self.legs {
            match leg {
                PathLeg::Access { .. } => {
                    out.push_str(&format!("Access {}", format_duration(leg.duration())));
                }
                PathLeg::Transit {
                    trip,
                    from_time,
                    to_time,
                    ..
                } => {
                    out.push_str(&format!(
                        "Trip {trip} {} {}",
                        format_time(*from_time),
                        format_time(*to_time)
                    ));
                }
                PathLeg::Transfer { .. } => {
                    out.push_str(&format!("Walk {}", format_duration(leg.duration())));
                }
                PathLeg::Egress { .. } => {
                    out.push_str(&format!("Egress {} ", format_duration(leg.duration())));
                }
            }
            if let Some(stop) = leg.to_stop() {
                out.push_str(&format!(" ~ {} ~ ", resolver.stop_name(stop)));
            }
        }

        out.push_str(&format!(
            "[{} {} {} Tx{} {}]",
            format_time(self.start_time),
            format_time(self.end_time),
            format_duration(self.duration()),
            self.number_of_transfers,
            format_cost_centi(self.c1)
        ));
        out
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_with(&|stop: StopIndex| stop.to_string()))
    }
}
