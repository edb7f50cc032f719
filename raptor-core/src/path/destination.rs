//! Joining a stop arrival with an egress leg.

use crate::arrivals::{AccessEgress, ArrivalId, ArrivalView, StopArrivals};
use crate::transit::{CostCalculator, SlackProvider, TransitCalculator};

/// A candidate journey: a stop arrival extended by an egress leg to the
/// destination.
#[derive(Debug, Clone)]
pub struct DestinationArrival {
    previous: ArrivalId,
    egress: AccessEgress,
    departure_time: i32,
    arrival_time: i32,
    c1: i32,
    pareto_round: u32,
    number_of_transfers: u32,
}

impl DestinationArrival {
    /// The stop arrival the egress leg starts from.
    pub fn previous(&self) -> ArrivalId {
        self.previous
    }

    pub fn egress(&self) -> &AccessEgress {
        &self.egress
    }

    /// Time the egress leg starts, after any slack or wait for opening hours.
    pub fn departure_time(&self) -> i32 {
        self.departure_time
    }

    /// Time the destination is reached.
    pub fn arrival_time(&self) -> i32 {
        self.arrival_time
    }

    /// Total generalized cost: the stop arrival's cost plus wait and egress.
    pub fn c1(&self) -> i32 {
        self.c1
    }

    /// One past the pareto round of the stop arrival.
    pub fn pareto_round(&self) -> u32 {
        self.pareto_round
    }

    pub fn round(&self) -> u32 {
        (self.pareto_round + 1) / 2
    }

    pub fn number_of_transfers(&self) -> u32 {
        self.number_of_transfers
    }
}

/// Builds [`DestinationArrival`]s using the search's collaborators.
///
/// Without a cost calculator (a search that does not track cost) the wait and
/// egress legs add nothing to the cost.
#[derive(Clone, Copy)]
pub struct DestinationArrivalFactory<'a> {
    transit_calculator: &'a dyn TransitCalculator,
    cost_calculator: Option<&'a dyn CostCalculator>,
    slack_provider: &'a dyn SlackProvider,
}

impl<'a> DestinationArrivalFactory<'a> {
    pub fn new(
        transit_calculator: &'a dyn TransitCalculator,
        cost_calculator: Option<&'a dyn CostCalculator>,
        slack_provider: &'a dyn SlackProvider,
    ) -> Self {
        Self {
            transit_calculator,
            cost_calculator,
            slack_provider,
        }
    }

    pub fn transit_calculator(&self) -> &'a dyn TransitCalculator {
        self.transit_calculator
    }

    /// Join `stop_arrival` with `egress`.
    ///
    /// Returns `None` if the egress cannot be used from this arrival.
    pub fn create(
        &self,
        arrivals: &StopArrivals,
        stop_arrival: ArrivalId,
        egress: &AccessEgress,
    ) -> Option<DestinationArrival> {
        let arrival = arrivals.get(stop_arrival);

        let departure_time = self.transit_calculator.calculate_egress_departure_time(
            arrival.arrival_time(),
            egress,
            self.slack_provider.transfer_slack(),
        )?;

        let arrival_time = self
            .transit_calculator
            .plus_duration(departure_time, egress.duration());

        let wait_time = (departure_time - arrival.arrival_time()).abs();

        let additional_cost = match self.cost_calculator {
            Some(cost) => cost.wait_cost(wait_time) + cost.cost_egress(egress),
            None => 0,
        };

        let rounds = arrival.round() + egress.number_of_rides();

        Some(DestinationArrival {
            previous: stop_arrival,
            egress: egress.clone(),
            departure_time,
            arrival_time,
            c1: arrival.c1() + additional_cost,
            pareto_round: arrival.pareto_round() + 1,
            number_of_transfers: rounds.saturating_sub(1),
        })
    }
}
