//! Pareto set: a collection where no member dominates another.
//!
//! Dominance is decided by a caller-supplied [`ParetoComparator`] that answers
//! a single question: is the left value better than the right value on *at
//! least one* criterion? The set evaluates the comparator in both directions
//! to tell apart dominance, trade-offs (both sides better somewhere) and
//! equivalent vectors (neither side better anywhere).

mod comparator;
mod set;

pub use comparator::ParetoComparator;
pub use set::{ParetoSet, ParetoSetEventListener};
