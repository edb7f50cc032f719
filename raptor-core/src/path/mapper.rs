//! Turning destination arrivals into paths.

use super::{DestinationArrival, Path, PathLeg};
use crate::arrivals::{ArrivalKind, ArrivalView, StopArrivals, StopIndex, TripIndex};
use crate::transit::SearchDirection;

/// Maps a destination arrival, and the chain behind it, to a [`Path`].
///
/// Mapping must be deterministic: the same arrival always gives the same path.
pub trait PathMapper: Send + Sync {
    /// `iteration_departure_time` is the departure time of the search
    /// iteration that produced the arrival, if one has been set up.
    fn map_to_path(
        &self,
        arrivals: &StopArrivals,
        destination: &DestinationArrival,
        iteration_departure_time: Option<i32>,
    ) -> Path;
}

/// A point on a hop, in search order.
#[derive(Debug, Clone, Copy)]
struct Endpoint {
    stop: StopIndex,
    time: i32,
}

#[derive(Debug, Clone, Copy)]
enum HopKind {
    /// The access leg at the root of the chain.
    SearchAccess,
    Transit(TripIndex),
    Transfer,
    /// The egress leg joined by the destination arrival.
    SearchEgress,
}

/// One step of the chain, from `a` to `b` in search order.
#[derive(Debug, Clone, Copy)]
struct Hop {
    kind: HopKind,
    a: Endpoint,
    b: Endpoint,
    c1: i32,
}

/// Default mapper: walks the stop arrival chain and emits one leg per node.
///
/// Each leg is given the cost increment of its arrival, so the legs always add
/// up to the destination cost. In a reverse search the chain already runs
/// from origin to destination, and its access leg is the journey's egress.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainPathMapper {
    direction: SearchDirection,
}

impl ChainPathMapper {
    pub fn new(direction: SearchDirection) -> Self {
        Self { direction }
    }

    fn hops(&self, arrivals: &StopArrivals, destination: &DestinationArrival) -> Vec<Hop> {
        let last = arrivals.get(destination.previous());

        let mut hops = vec![Hop {
            kind: HopKind::SearchEgress,
            a: Endpoint {
                stop: last.stop(),
                time: destination.departure_time(),
            },
            b: Endpoint {
                stop: last.stop(),
                time: destination.arrival_time(),
            },
            c1: destination.c1() - last.c1(),
        }];

        for (_, node) in arrivals.chain(destination.previous()) {
            let previous_c1 = node.previous().map_or(0, |p| arrivals.get(p).c1());
            let b = Endpoint {
                stop: node.stop(),
                time: node.arrival_time(),
            };

            let (kind, a) = match node.kind() {
                ArrivalKind::Access(access) => (
                    HopKind::SearchAccess,
                    Endpoint {
                        stop: node.stop(),
                        time: self.direction.minus(node.arrival_time(), access.duration()),
                    },
                ),
                ArrivalKind::Transit(boarding) => (
                    HopKind::Transit(boarding.trip),
                    Endpoint {
                        stop: boarding.board_stop,
                        time: boarding.board_time,
                    },
                ),
                ArrivalKind::Transfer {
                    from_stop,
                    duration,
                } => (
                    HopKind::Transfer,
                    Endpoint {
                        stop: *from_stop,
                        time: self.direction.minus(node.arrival_time(), *duration),
                    },
                ),
            };

            hops.push(Hop {
                kind,
                a,
                b,
                c1: node.c1() - previous_c1,
            });
        }

        hops
    }

    fn leg(&self, hop: &Hop) -> PathLeg {
        // Legs run forward in time whatever the search direction.
        let (from, to) = match self.direction {
            SearchDirection::Forward => (hop.a, hop.b),
            SearchDirection::Reverse => (hop.b, hop.a),
        };
        let c1 = hop.c1;

        match (hop.kind, self.direction) {
            (HopKind::SearchAccess, SearchDirection::Forward)
            | (HopKind::SearchEgress, SearchDirection::Reverse) => PathLeg::Access {
                to_stop: to.stop,
                from_time: from.time,
                to_time: to.time,
                c1,
            },
            (HopKind::SearchEgress, SearchDirection::Forward)
            | (HopKind::SearchAccess, SearchDirection::Reverse) => PathLeg::Egress {
                from_stop: from.stop,
                from_time: from.time,
                to_time: to.time,
                c1,
            },
            (HopKind::Transit(trip), _) => PathLeg::Transit {
                from_stop: from.stop,
                to_stop: to.stop,
                from_time: from.time,
                to_time: to.time,
                trip,
                c1,
            },
            (HopKind::Transfer, _) => PathLeg::Transfer {
                from_stop: from.stop,
                to_stop: to.stop,
                from_time: from.time,
                to_time: to.time,
                c1,
            },
        }
    }
}

impl PathMapper for ChainPathMapper {
    fn map_to_path(
        &self,
        arrivals: &StopArrivals,
        destination: &DestinationArrival,
        iteration_departure_time: Option<i32>,
    ) -> Path {
        let hops = self.hops(arrivals, destination);

        // Hops run destination-first; a forward journey reads them backwards.
        let legs: Vec<PathLeg> = match self.direction {
            SearchDirection::Forward => hops.iter().rev().map(|hop| self.leg(hop)).collect(),
            SearchDirection::Reverse => hops.iter().map(|hop| self.leg(hop)).collect(),
        };
        let start_time = legs.first().map_or(destination.arrival_time(), PathLeg::from_time);

        Path::new(
            iteration_departure_time.unwrap_or(start_time),
            legs,
            destination.number_of_transfers(),
            destination.c1(),
        )
    }
}
