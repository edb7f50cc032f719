//! Dominance comparator seam.

/// Decides whether `left` is better than `right` on at least one criterion.
///
/// Implementations must be cheap and side-effect free; the pareto set calls
/// them twice per member on every insertion.
///
/// Any `Fn(&T, &T) -> bool` is a comparator:
///
/// ```
/// use raptor_core::pareto::{ParetoComparator, ParetoSet};
///
/// let by_time_or_cost = |l: &(i32, i32), r: &(i32, i32)| l.0 < r.0 || l.1 < r.1;
/// assert!(by_time_or_cost.left_dominance_exist(&(1, 9), &(2, 3)));
///
/// let mut set = ParetoSet::new(by_time_or_cost);
/// assert!(set.add((10, 5)));
/// assert!(!set.add((11, 6)));
/// ```
pub trait ParetoComparator<T: ?Sized> {
    /// Returns true if `left` is strictly better than `right` on at least one
    /// tracked criterion.
    fn left_dominance_exist(&self, left: &T, right: &T) -> bool;
}

impl<T: ?Sized, F> ParetoComparator<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn left_dominance_exist(&self, left: &T, right: &T) -> bool {
        self(left, right)
    }
}
