//! Destination-side core of a round-based transit search.
//!
//! The search records every stop it reaches as a chain of stop arrivals,
//! keeps pareto-optimal candidates with a dominance set, and collects the
//! journeys that reach the destination as paths.

pub mod arrivals;
pub mod config;
pub mod debug;
pub mod lifecycle;
pub mod pareto;
pub mod path;
pub mod throttle;
pub mod time;
pub mod transit;
