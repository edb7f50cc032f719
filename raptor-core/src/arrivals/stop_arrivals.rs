//! Append-only arena of stop arrivals for one search iteration.

use tracing::trace;

use super::stop_arrival::{ArrivalId, ArrivalKind, ArrivalRef, ArrivalView, Boarding, StopArrival};
use super::{AccessEgress, StopIndex};
use crate::transit::SearchDirection;

/// Pareto round increment for boarding a transit trip.
pub const PARETO_ROUND_INC_TRANSIT: u32 = 1;

/// Pareto round increment for a transfer.
pub const PARETO_ROUND_INC_TRANSFER: u32 = 1;

/// Errors from operations that are only valid for some kinds of arrival.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArrivalError {
    /// Only access arrivals carry a leg that can be re-timed.
    #[error("no access leg to time-shift for {kind} arrival at stop {stop}")]
    TimeShiftUnsupported { kind: &'static str, stop: StopIndex },

    /// The access leg is not open early enough to reach the stop by the
    /// requested time.
    #[error("access to stop {stop} is not available for arrival at {requested}")]
    AccessNotAvailable { stop: StopIndex, requested: i32 },
}

/// Storage for all stop arrivals created during one search iteration.
///
/// Each arrival points back at its predecessor through an [`ArrivalId`], so a
/// chain is a walk through this vector ending at an access arrival. Nodes are
/// never mutated or removed individually; the whole arena is dropped or
/// cleared when the iteration ends.
///
/// ```
/// use raptor_core::arrivals::{AccessEgress, ArrivalView, Boarding, StopArrivals};
///
/// let mut arrivals = StopArrivals::default();
/// let access = arrivals.access(1000, AccessEgress::walk(1, 0, 0));
/// let bus = arrivals.transit(
///     access,
///     2,
///     1200,
///     20_000,
///     Boarding { board_stop: 1, board_time: 1010, trip: 7 },
/// );
/// let walk = arrivals.transfer(bus, 3, 1260, 26_000);
///
/// assert_eq!(arrivals.get(walk).travel_duration(), 260);
/// assert_eq!(arrivals.get(walk).round(), 1);
/// assert_eq!(arrivals.chain(walk).count(), 3);
/// ```
#[derive(Debug, Default)]
pub struct StopArrivals {
    direction: SearchDirection,
    nodes: Vec<StopArrival>,
}

impl StopArrivals {
    /// Create an empty arena for a search in the given direction.
    pub fn new(direction: SearchDirection) -> Self {
        Self {
            direction,
            nodes: Vec::new(),
        }
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }

    /// Add the root of a chain: the stop reached from the origin by `access`
    /// when leaving at `departure_time`.
    ///
    /// The pareto round is two per ride on the access leg, so a walking access
    /// starts at zero and the first boarding yields round one.
    pub fn access(&mut self, departure_time: i32, access: AccessEgress) -> ArrivalId {
        let pareto_round =
            access.number_of_rides() * (PARETO_ROUND_INC_TRANSIT + PARETO_ROUND_INC_TRANSFER);

        self.initial(
            access.stop(),
            departure_time,
            access.duration(),
            access.c1(),
            pareto_round,
            ArrivalKind::Access(access),
        )
    }

    fn initial(
        &mut self,
        stop: StopIndex,
        departure_time: i32,
        travel_duration: i32,
        initial_cost: i32,
        pareto_round: u32,
        kind: ArrivalKind,
    ) -> ArrivalId {
        assert!(
            pareto_round % 2 == 0,
            "initial pareto round must be even, was {pareto_round}"
        );

        self.push(StopArrival {
            previous: None,
            pareto_round,
            stop,
            arrival_time: self.direction.plus(departure_time, travel_duration),
            travel_duration,
            c1: initial_cost,
            kind,
        })
    }

    /// Add an arrival derived from `previous`.
    ///
    /// `c1` is the accumulated cost at this stop, not the increment. The travel
    /// duration grows by the time elapsed since `previous`, so any dwell
    /// before boarding is counted as travel.
    pub fn derive(
        &mut self,
        previous: ArrivalId,
        pareto_round_increment: u32,
        stop: StopIndex,
        arrival_time: i32,
        c1: i32,
        kind: ArrivalKind,
    ) -> ArrivalId {
        let prev = self.get(previous);
        let travel_duration = prev.travel_duration
            + self.direction.duration_between(prev.arrival_time, arrival_time);

        let node = StopArrival {
            previous: Some(previous),
            pareto_round: prev.pareto_round + pareto_round_increment,
            stop,
            arrival_time,
            travel_duration,
            c1,
            kind,
        };
        self.push(node)
    }

    /// Add an arrival at `stop` by riding the trip described in `boarding`.
    pub fn transit(
        &mut self,
        previous: ArrivalId,
        stop: StopIndex,
        arrival_time: i32,
        c1: i32,
        boarding: Boarding,
    ) -> ArrivalId {
        self.derive(
            previous,
            PARETO_ROUND_INC_TRANSIT,
            stop,
            arrival_time,
            c1,
            ArrivalKind::Transit(boarding),
        )
    }

    /// Add an arrival at `stop` by walking from the stop of `previous`.
    pub fn transfer(
        &mut self,
        previous: ArrivalId,
        stop: StopIndex,
        arrival_time: i32,
        c1: i32,
    ) -> ArrivalId {
        let prev = self.get(previous);
        let kind = ArrivalKind::Transfer {
            from_stop: prev.stop,
            duration: self.direction.duration_between(prev.arrival_time, arrival_time),
        };
        self.derive(
            previous,
            PARETO_ROUND_INC_TRANSFER,
            stop,
            arrival_time,
            c1,
            kind,
        )
    }

    /// Create a new access arrival for the same access leg, re-timed to reach
    /// the stop as close to `new_arrival_time` as the leg allows.
    ///
    /// Returns `id` unchanged if the arrival time would not change. Only
    /// access arrivals can be re-timed; transit and transfer arrivals have no
    /// leg that could be shifted without re-deriving their cost.
    pub fn time_shift_new_arrival_time(
        &mut self,
        id: ArrivalId,
        new_arrival_time: i32,
    ) -> Result<ArrivalId, ArrivalError> {
        let node = self.get(id);
        let ArrivalKind::Access(access) = &node.kind else {
            return Err(ArrivalError::TimeShiftUnsupported {
                kind: node.kind.name(),
                stop: node.stop,
            });
        };

        let arrival_time = match self.direction {
            SearchDirection::Forward => access.latest_arrival_time(new_arrival_time),
            SearchDirection::Reverse => access.earliest_departure_time(new_arrival_time),
        }
        .ok_or(ArrivalError::AccessNotAvailable {
            stop: node.stop,
            requested: new_arrival_time,
        })?;

        if arrival_time == node.arrival_time {
            return Ok(id);
        }

        let access = access.clone();
        let departure_time = self.direction.minus(arrival_time, access.duration());
        trace!(
            stop = access.stop(),
            from = node.arrival_time,
            to = arrival_time,
            "time-shifting access arrival"
        );
        Ok(self.access(departure_time, access))
    }

    /// The node behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not created by this arena.
    pub fn get(&self, id: ArrivalId) -> &StopArrival {
        &self.nodes[id.index()]
    }

    /// Copy the criteria of `id` into a snapshot for use in pareto sets.
    pub fn arrival_ref(&self, id: ArrivalId) -> ArrivalRef {
        let node = self.get(id);
        ArrivalRef {
            id,
            stop: node.stop,
            arrival_time: node.arrival_time,
            pareto_round: node.pareto_round,
            c1: node.c1,
            travel_duration: node.travel_duration,
            arrived_on_board: node.arrived_on_board(),
        }
    }

    pub fn previous(&self, id: ArrivalId) -> Option<ArrivalId> {
        self.get(id).previous
    }

    /// Stop of the arrival preceding `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` is an access arrival. Asking for the previous stop of
    /// the root of a chain means the caller lost track of the chain depth.
    pub fn previous_stop(&self, id: ArrivalId) -> StopIndex {
        match self.get(id).previous {
            Some(previous) => self.get(previous).stop,
            None => panic!(
                "access arrival at stop {} has no previous arrival",
                self.get(id).stop
            ),
        }
    }

    /// Walk the chain from `id` back to its access arrival.
    pub fn chain(&self, id: ArrivalId) -> Chain<'_> {
        Chain {
            arrivals: self,
            next: Some(id),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Remove all arrivals. Every previously issued handle becomes invalid.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    fn push(&mut self, node: StopArrival) -> ArrivalId {
        let id = ArrivalId(
            u32::try_from(self.nodes.len()).expect("more than u32::MAX stop arrivals"),
        );
        self.nodes.push(node);
        id
    }
}

/// Iterator from an arrival back to the root of its chain.
pub struct Chain<'a> {
    arrivals: &'a StopArrivals,
    next: Option<ArrivalId>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = (ArrivalId, &'a StopArrival);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.next?;
        let node = self.arrivals.get(id);
        self.next = node.previous;
        Some((id, node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boarding(board_stop: StopIndex, board_time: i32) -> Boarding {
        Boarding {
            board_stop,
            board_time,
            trip: 0,
        }
    }

    #[test]
    fn access_arrival_is_root() {
        let mut arrivals = StopArrivals::default();
        let id = arrivals.access(1000, AccessEgress::walk(4, 120, 24_000));
        let node = arrivals.get(id);

        assert!(node.previous().is_none());
        assert_eq!(node.stop(), 4);
        assert_eq!(node.arrival_time(), 1120);
        assert_eq!(node.travel_duration(), 120);
        assert_eq!(node.c1(), 24_000);
        assert_eq!(node.pareto_round(), 0);
        assert_eq!(node.round(), 0);
        assert!(!node.arrived_on_board());
    }

    #[test]
    fn flex_access_starts_in_later_round() {
        let mut arrivals = StopArrivals::default();
        let id = arrivals.access(1000, AccessEgress::flex(4, 600, 0, 1, true));
        let node = arrivals.get(id);

        assert_eq!(node.pareto_round(), 2);
        assert_eq!(node.round(), 1);
        assert!(node.arrived_on_board());
    }

    #[test]
    fn travel_duration_accumulates_elapsed_time() {
        let mut arrivals = StopArrivals::default();
        let access = arrivals.access(1000, AccessEgress::walk(1, 0, 0));
        let transit = arrivals.transit(access, 2, 1200, 0, boarding(1, 1100));
        let transfer = arrivals.transfer(transit, 3, 1260, 0);

        assert_eq!(arrivals.get(access).travel_duration(), 0);
        assert_eq!(arrivals.get(transit).travel_duration(), 200);
        assert_eq!(arrivals.get(transfer).travel_duration(), 260);
    }

    #[test]
    fn reverse_search_accumulates_backwards() {
        let mut arrivals = StopArrivals::new(SearchDirection::Reverse);
        let access = arrivals.access(5000, AccessEgress::walk(1, 100, 0));
        let transit = arrivals.transit(access, 2, 4500, 0, boarding(1, 4850));

        assert_eq!(arrivals.get(access).arrival_time(), 4900);
        assert_eq!(arrivals.get(transit).travel_duration(), 500);
    }

    #[test]
    fn round_formula_for_alternating_chain() {
        // depth d -> (d + 1) / 2
        let expected = [0, 1, 1, 2, 2, 3];
        let mut arrivals = StopArrivals::default();
        let mut id = arrivals.access(0, AccessEgress::walk(0, 0, 0));
        assert_eq!(arrivals.get(id).round(), expected[0]);

        for (depth, round) in expected.iter().enumerate().skip(1) {
            let time = depth as i32 * 100;
            id = if depth % 2 == 1 {
                arrivals.transit(id, depth, time, 0, boarding(depth - 1, time - 50))
            } else {
                arrivals.transfer(id, depth, time, 0)
            };
            assert_eq!(arrivals.get(id).pareto_round(), depth as u32);
            assert_eq!(arrivals.get(id).round(), *round, "depth {depth}");
        }
    }

    #[test]
    fn transit_arrives_on_board_transfer_does_not() {
        let mut arrivals = StopArrivals::default();
        let access = arrivals.access(0, AccessEgress::walk(1, 0, 0));
        let transit = arrivals.transit(access, 2, 100, 0, boarding(1, 10));
        let transfer = arrivals.transfer(transit, 3, 160, 0);

        assert!(arrivals.get(transit).arrived_on_board());
        assert!(!arrivals.get(transfer).arrived_on_board());
        assert!(arrivals.arrival_ref(transit).arrived_on_board());
    }

    #[test]
    fn transfer_records_origin_and_duration() {
        let mut arrivals = StopArrivals::default();
        let access = arrivals.access(0, AccessEgress::walk(1, 0, 0));
        let transit = arrivals.transit(access, 2, 100, 0, boarding(1, 10));
        let transfer = arrivals.transfer(transit, 3, 160, 0);

        match arrivals.get(transfer).kind() {
            ArrivalKind::Transfer {
                from_stop,
                duration,
            } => {
                assert_eq!(*from_stop, 2);
                assert_eq!(*duration, 60);
            }
            other => panic!("unexpected kind {other:?}"),
        }
    }

    #[test]
    fn chain_walks_back_to_access() {
        let mut arrivals = StopArrivals::default();
        let access = arrivals.access(0, AccessEgress::walk(1, 0, 0));
        let transit = arrivals.transit(access, 2, 100, 0, boarding(1, 10));
        let transfer = arrivals.transfer(transit, 3, 160, 0);

        let ids: Vec<_> = arrivals.chain(transfer).map(|(id, _)| id).collect();
        assert_eq!(ids, vec![transfer, transit, access]);
        assert_eq!(arrivals.previous_stop(transfer), 2);
        assert_eq!(arrivals.previous(access), None);
    }

    #[test]
    fn chains_share_prefixes() {
        let mut arrivals = StopArrivals::default();
        let access = arrivals.access(0, AccessEgress::walk(1, 0, 0));
        let a = arrivals.transit(access, 2, 100, 0, boarding(1, 10));
        let b = arrivals.transit(access, 3, 120, 0, boarding(1, 20));

        assert_eq!(arrivals.previous(a), Some(access));
        assert_eq!(arrivals.previous(b), Some(access));
        assert_eq!(arrivals.len(), 3);
    }

    #[test]
    #[should_panic(expected = "has no previous arrival")]
    fn previous_stop_of_access_panics() {
        let mut arrivals = StopArrivals::default();
        let access = arrivals.access(0, AccessEgress::walk(1, 0, 0));
        arrivals.previous_stop(access);
    }

    #[test]
    fn time_shift_access_arrival() {
        let mut arrivals = StopArrivals::default();
        let leg = AccessEgress::walk(1, 300, 6000).with_opening_hours(1000, 2000);
        let access = arrivals.access(1000, leg);

        let shifted = arrivals.time_shift_new_arrival_time(access, 1800).unwrap();
        assert_ne!(shifted, access);
        assert_eq!(arrivals.get(shifted).arrival_time(), 1800);
        assert_eq!(arrivals.get(shifted).c1(), 6000);

        // Capped by the closing time.
        let late = arrivals.time_shift_new_arrival_time(access, 5000).unwrap();
        assert_eq!(arrivals.get(late).arrival_time(), 2300);

        // Unchanged time returns the same node.
        assert_eq!(arrivals.time_shift_new_arrival_time(access, 1300), Ok(access));
    }

    #[test]
    fn time_shift_before_opening_fails() {
        let mut arrivals = StopArrivals::default();
        let leg = AccessEgress::walk(1, 300, 0).with_opening_hours(1000, 2000);
        let access = arrivals.access(1000, leg);

        assert_eq!(
            arrivals.time_shift_new_arrival_time(access, 1200),
            Err(ArrivalError::AccessNotAvailable {
                stop: 1,
                requested: 1200
            })
        );
    }

    #[test]
    fn time_shift_transfer_is_unsupported() {
        let mut arrivals = StopArrivals::default();
        let access = arrivals.access(0, AccessEgress::walk(1, 0, 0));
        let transit = arrivals.transit(access, 2, 100, 0, boarding(1, 10));
        let transfer = arrivals.transfer(transit, 3, 160, 0);

        let err = arrivals
            .time_shift_new_arrival_time(transfer, 500)
            .unwrap_err();
        assert_eq!(
            err,
            ArrivalError::TimeShiftUnsupported {
                kind: "transfer",
                stop: 3
            }
        );
        assert_eq!(
            err.to_string(),
            "no access leg to time-shift for transfer arrival at stop 3"
        );
        assert!(arrivals.time_shift_new_arrival_time(transit, 500).is_err());
    }
}
