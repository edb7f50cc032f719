//! Dominance rules for stop arrivals.
//!
//! Each rule answers "is `l` better than `r` on any criterion". The pareto set
//! evaluates it both ways, so an arrival that is better on one axis and worse
//! on another is kept as a trade-off.

use super::ArrivalView;
use crate::pareto::ParetoComparator;

/// Compare arrival time, pareto round and generalized cost.
///
/// Arriving on board is not part of this rule. When it matters within the
/// same iteration and round, the order in which the search processes
/// arrivals takes care of it.
pub fn compare_arrival_time_round_and_cost<A: ArrivalView + ?Sized>(l: &A, r: &A) -> bool {
    // Short-circuit OR: the first axis decides most comparisons.
    l.arrival_time() < r.arrival_time() || l.pareto_round() < r.pareto_round() || l.c1() < r.c1()
}

/// Like [`compare_arrival_time_round_and_cost`], but an arrival reached on
/// board also beats one that was not.
pub fn compare_arrival_time_round_cost_and_on_board<A: ArrivalView + ?Sized>(
    l: &A,
    r: &A,
) -> bool {
    compare_arrival_time_round_and_cost(l, r) || (l.arrived_on_board() && !r.arrived_on_board())
}

/// The named dominance rules for stop arrivals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrivalComparator {
    ArrivalTimeRoundAndCost,
    ArrivalTimeRoundCostAndOnBoard,
}

impl<A: ArrivalView> ParetoComparator<A> for ArrivalComparator {
    fn left_dominance_exist(&self, left: &A, right: &A) -> bool {
        match self {
            ArrivalComparator::ArrivalTimeRoundAndCost => {
                compare_arrival_time_round_and_cost(left, right)
            }
            ArrivalComparator::ArrivalTimeRoundCostAndOnBoard => {
                compare_arrival_time_round_cost_and_on_board(left, right)
            }
        }
    }
}
