//! Destination arrivals and the paths built from them.
//!
//! When a stop arrival can reach the destination by an egress leg, the pair
//! becomes a [`DestinationArrival`]. The [`DestinationArrivalPaths`] collector
//! maps each one to a [`Path`] and keeps the pareto-optimal set.

mod collector;
mod comparator;
mod destination;
mod mapper;
mod model;

pub use collector::DestinationArrivalPaths;
pub use comparator::{PathComparator, PathCriteria};
pub use destination::{DestinationArrival, DestinationArrivalFactory};
pub use mapper::{ChainPathMapper, PathMapper};
pub use model::{Path, PathLeg, StopNameResolver};
