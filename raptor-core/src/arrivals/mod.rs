//! The stop arrival chain.
//!
//! Every boarding, alighting and transfer found by the search becomes an
//! immutable [`StopArrival`] in a per-iteration [`StopArrivals`] arena. Each
//! node links back to its predecessor, so a complete journey is recovered by
//! walking from the last arrival to the access arrival at the root.

mod access_egress;
mod comparator;
mod stop_arrival;
mod stop_arrivals;

pub use access_egress::{AccessEgress, OpeningHours, StopIndex};
pub use comparator::{
    ArrivalComparator, compare_arrival_time_round_and_cost,
    compare_arrival_time_round_cost_and_on_board,
};
pub use stop_arrival::{
    ArrivalId, ArrivalKind, ArrivalRef, ArrivalView, Boarding, StopArrival, TripIndex,
};
pub use stop_arrivals::{
    ArrivalError, Chain, PARETO_ROUND_INC_TRANSFER, PARETO_ROUND_INC_TRANSIT, StopArrivals,
};
