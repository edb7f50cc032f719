//! Generalized cost of waiting and of egress legs.

use crate::arrivals::AccessEgress;

/// Cost model used by a multi-criteria search. All costs are in
/// centi-seconds.
///
/// A search that does not track cost simply has no cost calculator.
pub trait CostCalculator: Send + Sync {
    /// Cost of waiting `seconds` at a stop.
    fn wait_cost(&self, seconds: i32) -> i32;

    /// Cost of using `egress` to reach the destination.
    fn cost_egress(&self, egress: &AccessEgress) -> i32;
}

/// Cost model driven by a wait reluctance factor and a fixed transfer cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultCostCalculator {
    wait_reluctance: f64,
    transfer_cost: i32,
}

impl DefaultCostCalculator {
    /// `wait_reluctance` multiplies waiting seconds; `transfer_cost` (in
    /// centi-seconds) is charged for egress legs that involve a ride.
    pub fn new(wait_reluctance: f64, transfer_cost: i32) -> Self {
        Self {
            wait_reluctance,
            transfer_cost,
        }
    }

    pub fn wait_reluctance(&self) -> f64 {
        self.wait_reluctance
    }

    pub fn transfer_cost(&self) -> i32 {
        self.transfer_cost
    }
}

impl Default for DefaultCostCalculator {
    fn default() -> Self {
        Self {
            wait_reluctance: 1.0,
            transfer_cost: 0,
        }
    }
}

impl CostCalculator for DefaultCostCalculator {
    fn wait_cost(&self, seconds: i32) -> i32 {
        (self.wait_reluctance * f64::from(seconds) * 100.0).round() as i32
    }

    fn cost_egress(&self, egress: &AccessEgress) -> i32 {
        if egress.has_rides() {
            egress.c1() + self.transfer_cost
        } else {
            egress.c1()
        }
    }
}
