//! Search life-cycle notifications.
//!
//! The driving search announces iteration and round boundaries; components
//! that keep per-round state (such as the destination path collector)
//! subscribe to reset themselves. All callbacks run synchronously, in
//! subscriber order, on the thread that drives the search.

use tracing::trace;

/// Callbacks for search life-cycle events. Every method defaults to a no-op.
pub trait LifeCycleSubscriber {
    /// A new iteration starts, departing at `iteration_departure_time`.
    fn on_setup_iteration(&mut self, _iteration_departure_time: i32) {}

    /// Round `round` is about to start.
    fn on_prepare_for_next_round(&mut self, _round: u32) {}

    /// The current round finished.
    fn on_round_complete(&mut self, _destination_reached: bool) {}

    /// The current iteration finished.
    fn on_iteration_complete(&mut self) {}
}

/// Publishes life-cycle events and tracks the current iteration and round.
#[derive(Debug, Default)]
pub struct WorkerLifeCycle {
    round: u32,
    iteration_departure_time: Option<i32>,
}

impl WorkerLifeCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current round, zero before the first round of an iteration.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn iteration_departure_time(&self) -> Option<i32> {
        self.iteration_departure_time
    }

    /// Start a new iteration and reset the round counter.
    pub fn setup_iteration(
        &mut self,
        iteration_departure_time: i32,
        subscribers: &mut [&mut dyn LifeCycleSubscriber],
    ) {
        self.round = 0;
        self.iteration_departure_time = Some(iteration_departure_time);
        trace!(iteration_departure_time, "setup iteration");

        for subscriber in subscribers.iter_mut() {
            subscriber.on_setup_iteration(iteration_departure_time);
        }
    }

    /// Advance to the next round and notify subscribers. Returns the new round.
    pub fn prepare_for_next_round(
        &mut self,
        subscribers: &mut [&mut dyn LifeCycleSubscriber],
    ) -> u32 {
        self.round += 1;
        trace!(round = self.round, "prepare for next round");

        for subscriber in subscribers.iter_mut() {
            subscriber.on_prepare_for_next_round(self.round);
        }
        self.round
    }

    pub fn round_complete(
        &self,
        destination_reached: bool,
        subscribers: &mut [&mut dyn LifeCycleSubscriber],
    ) {
        for subscriber in subscribers.iter_mut() {
            subscriber.on_round_complete(destination_reached);
        }
    }

    pub fn iteration_complete(&self, subscribers: &mut [&mut dyn LifeCycleSubscriber]) {
        for subscriber in subscribers.iter_mut() {
            subscriber.on_iteration_complete();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        events: Vec<String>,
    }

    impl LifeCycleSubscriber for Log {
        fn on_setup_iteration(&mut self, t: i32) {
            self.events.push(format!("setup {t}"));
        }

        fn on_prepare_for_next_round(&mut self, round: u32) {
            self.events.push(format!("round {round}"));
        }

        fn on_round_complete(&mut self, reached: bool) {
            self.events.push(format!("complete {reached}"));
        }

        fn on_iteration_complete(&mut self) {
            self.events.push("done".to_string());
        }
    }

    /// Uses only the default no-op callbacks.
    struct Silent;

    impl LifeCycleSubscriber for Silent {}

    #[test]
    fn events_reach_subscribers_in_order() {
        let mut life_cycle = WorkerLifeCycle::new();
        let mut a = Log::default();
        let mut b = Log::default();
        let mut silent = Silent;

        {
            let mut subscribers: [&mut dyn LifeCycleSubscriber; 3] = [&mut a, &mut silent, &mut b];
            life_cycle.setup_iteration(3600, &mut subscribers);
            assert_eq!(life_cycle.prepare_for_next_round(&mut subscribers), 1);
            life_cycle.round_complete(false, &mut subscribers);
            assert_eq!(life_cycle.prepare_for_next_round(&mut subscribers), 2);
            life_cycle.round_complete(true, &mut subscribers);
            life_cycle.iteration_complete(&mut subscribers);
        }

        let expected = vec![
            "setup 3600",
            "round 1",
            "complete false",
            "round 2",
            "complete true",
            "done",
        ];
        assert_eq!(a.events, expected);
        assert_eq!(b.events, expected);
        assert_eq!(life_cycle.iteration_departure_time(), Some(3600));
    }

    #[test]
    fn setup_resets_round() {
        let mut life_cycle = WorkerLifeCycle::new();
        life_cycle.setup_iteration(0, &mut []);
        life_cycle.prepare_for_next_round(&mut []);
        life_cycle.prepare_for_next_round(&mut []);
        assert_eq!(life_cycle.round(), 2);

        life_cycle.setup_iteration(60, &mut []);
        assert_eq!(life_cycle.round(), 0);
    }
}
