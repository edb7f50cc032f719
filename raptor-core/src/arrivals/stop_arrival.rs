//! A single node of the stop arrival chain.

use std::fmt;

use super::{AccessEgress, StopIndex};
use crate::time::{format_cost_centi, format_duration, format_time};

/// Index of a trip in the (external) timetable.
pub type TripIndex = usize;

/// Handle to a [`StopArrival`] stored in a [`StopArrivals`](super::StopArrivals)
/// arena.
///
/// Handles compare by identity: two handles are equal only if they point at
/// the same node of the same arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArrivalId(pub(super) u32);

impl ArrivalId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Where the traveller boarded the trip that brought them to a stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boarding {
    pub board_stop: StopIndex,
    pub board_time: i32,
    pub trip: TripIndex,
}

/// How a stop was reached.
#[derive(Debug, Clone)]
pub enum ArrivalKind {
    /// From the origin via an access leg. Always the root of a chain.
    Access(AccessEgress),
    /// Riding a transit trip.
    Transit(Boarding),
    /// Walking from another stop.
    Transfer { from_stop: StopIndex, duration: i32 },
}

impl ArrivalKind {
    pub fn name(&self) -> &'static str {
        match self {
            ArrivalKind::Access(_) => "access",
            ArrivalKind::Transit(_) => "transit",
            ArrivalKind::Transfer { .. } => "transfer",
        }
    }
}

/// Read access to the criteria of a stop arrival.
pub trait ArrivalView {
    fn stop(&self) -> StopIndex;

    fn arrival_time(&self) -> i32;

    /// Round counter incremented once per boarding and once per transfer.
    fn pareto_round(&self) -> u32;

    /// Accumulated generalized cost.
    fn c1(&self) -> i32;

    /// Accumulated time spent travelling, including any dwell between legs.
    fn travel_duration(&self) -> i32;

    /// True if the stop was reached on board a vehicle.
    fn arrived_on_board(&self) -> bool;

    /// The round of the outer search in which this arrival was found.
    fn round(&self) -> u32 {
        (self.pareto_round() + 1) / 2
    }
}

/// The state of a partial journey at one stop.
///
/// Nodes are immutable once pushed into the arena. They deliberately do not
/// implement `PartialEq`, `Eq` or `Hash`: two nodes with equal fields are
/// still different search states, so use [`ArrivalId`] for identity.
#[derive(Debug, Clone)]
pub struct StopArrival {
    pub(super) previous: Option<ArrivalId>,
    pub(super) pareto_round: u32,
    pub(super) stop: StopIndex,
    pub(super) arrival_time: i32,
    pub(super) travel_duration: i32,
    pub(super) c1: i32,
    pub(super) kind: ArrivalKind,
}

impl StopArrival {
    /// The arrival this one was derived from, or `None` for an access arrival.
    pub fn previous(&self) -> Option<ArrivalId> {
        self.previous
    }

    pub fn kind(&self) -> &ArrivalKind {
        &self.kind
    }

    /// The access leg, if this is the root of the chain.
    pub fn access(&self) -> Option<&AccessEgress> {
        match &self.kind {
            ArrivalKind::Access(access) => Some(access),
            _ => None,
        }
    }
}

impl ArrivalView for StopArrival {
    fn stop(&self) -> StopIndex {
        self.stop
    }

    fn arrival_time(&self) -> i32 {
        self.arrival_time
    }

    fn pareto_round(&self) -> u32 {
        self.pareto_round
    }

    fn c1(&self) -> i32 {
        self.c1
    }

    fn travel_duration(&self) -> i32 {
        self.travel_duration
    }

    fn arrived_on_board(&self) -> bool {
        match &self.kind {
            ArrivalKind::Access(access) => access.stop_reached_on_board(),
            ArrivalKind::Transit(_) => true,
            ArrivalKind::Transfer { .. } => false,
        }
    }
}

impl fmt::Display for StopArrival {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.kind {
            ArrivalKind::Access(access) => format!("Access {{ {access} }}"),
            ArrivalKind::Transit(b) => {
                format!("Transit {{ trip: {}, from: {} }}", b.trip, b.board_stop)
            }
            ArrivalKind::Transfer { from_stop, duration } => {
                format!("Walk {{ from: {from_stop}, {} }}", format_duration(*duration))
            }
        };
        write!(
            f,
            "{kind} {{ round: {}, stop: {}, arrival: {}, duration: {}, c1: {} }}",
            self.round(),
            self.stop,
            format_time(self.arrival_time),
            format_duration(self.travel_duration),
            format_cost_centi(self.c1)
        )
    }
}

/// A copyable snapshot of one arrival's criteria together with its handle.
///
/// Per-stop pareto sets store these instead of borrowing the arena, so new
/// arrivals can be pushed while the sets are being updated.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalRef {
    pub(super) id: ArrivalId,
    pub(super) stop: StopIndex,
    pub(super) arrival_time: i32,
    pub(super) pareto_round: u32,
    pub(super) c1: i32,
    pub(super) travel_duration: i32,
    pub(super) arrived_on_board: bool,
}

impl ArrivalRef {
    pub fn id(&self) -> ArrivalId {
        self.id
    }
}

impl ArrivalView for ArrivalRef {
    fn stop(&self) -> StopIndex {
        self.stop
    }

    fn arrival_time(&self) -> i32 {
        self.arrival_time
    }

    fn pareto_round(&self) -> u32 {
        self.pareto_round
    }

    fn c1(&self) -> i32 {
        self.c1
    }

    fn travel_duration(&self) -> i32 {
        self.travel_duration
    }

    fn arrived_on_board(&self) -> bool {
        self.arrived_on_board
    }
}
