//! Collecting the paths that reach the destination.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use super::{
    DestinationArrival, DestinationArrivalFactory, Path, PathComparator, PathMapper,
    StopNameResolver,
};
use crate::arrivals::{AccessEgress, ArrivalId, ArrivalView, StopArrivals};
use crate::debug::{DebugHandler, DebugListener};
use crate::lifecycle::LifeCycleSubscriber;
use crate::pareto::ParetoSet;
use crate::throttle::Throttle;
use crate::time::format_cost_centi;
use crate::transit::{CostCalculator, SlackProvider, TransitCalculator};

/// Shared by every collector in the process, so a faulty mapper produces one
/// warning per second at most.
static COST_MISMATCH: Throttle = Throttle::new(Duration::from_secs(1));

/// Pareto set of the paths found so far in a search.
///
/// Each stop arrival that can reach the destination is offered with an egress
/// leg through [`add`](Self::add). Paths arriving past the time limit are
/// rejected; the rest are mapped to a [`Path`] and kept if no path found so
/// far dominates them.
pub struct DestinationArrivalPaths<'a> {
    paths: ParetoSet<Path, PathComparator>,
    factory: DestinationArrivalFactory<'a>,
    mapper: &'a dyn PathMapper,
    debug_handler: Option<Arc<dyn DebugHandler<Path>>>,
    reached_current_round: bool,
    iteration_departure_time: Option<i32>,
}

impl<'a> DestinationArrivalPaths<'a> {
    /// A `cost_calculator` of `None` means the search does not track
    /// generalized cost. When `debug_handler` is set it sees every accepted,
    /// rejected and dropped path.
    pub fn new(
        comparator: PathComparator,
        transit_calculator: &'a dyn TransitCalculator,
        cost_calculator: Option<&'a dyn CostCalculator>,
        slack_provider: &'a dyn SlackProvider,
        mapper: &'a dyn PathMapper,
        debug_handler: Option<Arc<dyn DebugHandler<Path>>>,
    ) -> Self {
        let paths = match &debug_handler {
            Some(handler) => {
                ParetoSet::with_listener(comparator, Box::new(DebugListener::new(handler.clone())))
            }
            None => ParetoSet::new(comparator),
        };

        Self {
            paths,
            factory: DestinationArrivalFactory::new(
                transit_calculator,
                cost_calculator,
                slack_provider,
            ),
            mapper,
            debug_handler,
            reached_current_round: false,
            iteration_departure_time: None,
        }
    }

    /// Offer `stop_arrival` extended by `egress` as a path to the destination.
    pub fn add(&mut self, arrivals: &StopArrivals, stop_arrival: ArrivalId, egress: &AccessEgress) {
        let Some(destination) = self.factory.create(arrivals, stop_arrival, egress) else {
            return;
        };

        let transit_calculator = self.factory.transit_calculator();
        if transit_calculator.exceeds_time_limit(destination.arrival_time()) {
            if self.is_debug_on() {
                let reason = transit_calculator.exceeds_time_limit_reason();
                self.debug_reject_destination(arrivals, &destination, &reason);
            }
            return;
        }

        let path = self
            .mapper
            .map_to_path(arrivals, &destination, self.iteration_departure_time);

        if path.c1() != destination.c1() {
            warn_cost_mismatch(arrivals, &destination, &path);
        }

        if self.paths.add(path) {
            debug!(
                arrival_time = destination.arrival_time(),
                transfers = destination.number_of_transfers(),
                c1 = destination.c1(),
                "destination reached"
            );
            self.reached_current_round = true;
        }
    }

    /// Whether a path was added since the current round started.
    pub fn is_reached_current_round(&self) -> bool {
        self.reached_current_round
    }

    pub fn set_iteration_departure_time(&mut self, iteration_departure_time: i32) {
        self.iteration_departure_time = Some(iteration_departure_time);
    }

    /// Whether a path with these criteria would be kept, without building it.
    ///
    /// Before any iteration is set up the departure time stands in for the
    /// iteration departure time.
    pub fn qualify(
        &self,
        departure_time: i32,
        arrival_time: i32,
        number_of_transfers: u32,
        c1: i32,
    ) -> bool {
        let iteration_departure_time = self.iteration_departure_time.unwrap_or(departure_time);
        self.paths.qualify(&Path::dummy(
            iteration_departure_time,
            departure_time,
            arrival_time,
            number_of_transfers,
            c1,
        ))
    }

    /// Paths found so far, oldest first.
    pub fn list_paths(&self) -> &[Path] {
        self.paths.as_slice()
    }

    pub fn into_paths(self) -> Vec<Path> {
        self.paths.into_vec()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Report `stop_arrival` plus `egress` as rejected by the driving search.
    pub fn debug_reject(
        &self,
        arrivals: &StopArrivals,
        stop_arrival: ArrivalId,
        egress: &AccessEgress,
        reason: &str,
    ) {
        if !self.is_debug_on() {
            return;
        }
        if let Some(destination) = self.factory.create(arrivals, stop_arrival, egress) {
            self.debug_reject_destination(arrivals, &destination, reason);
        }
    }

    pub fn debug_reject_destination(
        &self,
        arrivals: &StopArrivals,
        destination: &DestinationArrival,
        reason: &str,
    ) {
        if let Some(handler) = &self.debug_handler {
            let path = self
                .mapper
                .map_to_path(arrivals, destination, self.iteration_departure_time);
            handler.reject(&path, None, reason);
        }
    }

    pub fn is_debug_on(&self) -> bool {
        self.debug_handler.is_some()
    }

    /// All paths, one per line, with stops named by `resolver`.
    pub fn to_string_with(&self, resolver: &dyn StopNameResolver) -> String {
        self.paths
            .iter()
            .map(|path| path.to_string_with(resolver))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl LifeCycleSubscriber for DestinationArrivalPaths<'_> {
    fn on_setup_iteration(&mut self, iteration_departure_time: i32) {
        self.set_iteration_departure_time(iteration_departure_time);
    }

    fn on_prepare_for_next_round(&mut self, _round: u32) {
        self.reached_current_round = false;
    }
}

impl fmt::Display for DestinationArrivalPaths<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, path) in self.paths.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{path}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for DestinationArrivalPaths<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DestinationArrivalPaths")
            .field("paths", &self.paths)
            .field("reached_current_round", &self.reached_current_round)
            .field("iteration_departure_time", &self.iteration_departure_time)
            .field("debug", &self.is_debug_on())
            .finish_non_exhaustive()
    }
}

/// The mapper's total and raptor's total should always agree. The path is
/// kept either way.
fn warn_cost_mismatch(arrivals: &StopArrivals, destination: &DestinationArrival, path: &Path) {
    let Some(suppressed) = COST_MISMATCH.permit() else {
        return;
    };
    warn!(
        mapper = %format_cost_centi(path.c1()),
        stop_arrivals = %raptor_costs(arrivals, destination),
        suppressed,
        path = %path,
        "cost mismatch between path mapper and stop arrivals"
    );
}

/// Costs from the destination back to the access arrival, e.g. `$1200 $950 $600`.
fn raptor_costs(arrivals: &StopArrivals, destination: &DestinationArrival) -> String {
    std::iter::once(destination.c1())
        .chain(
            arrivals
                .chain(destination.previous())
                .map(|(_, arrival)| arrival.c1()),
        )
        .map(|c1| format_cost_centi(c1).replace(".00", ""))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "collector_tests.rs"]
mod tests;
