//! Vector-backed pareto set.

use std::fmt;

use super::ParetoComparator;

/// Observer of pareto set decisions, used for debugging and instrumentation.
///
/// Listeners are notified after the set has made its decision and can never
/// change it.
pub trait ParetoSetEventListener<T> {
    /// A new element was added to the set.
    fn notify_element_accepted(&self, _element: &T) {}

    /// An existing element was removed because `dropped_by` dominates it.
    fn notify_element_dropped(&self, _element: &T, _dropped_by: &T) {}

    /// A new element was rejected because `rejected_by` dominates it or is
    /// equivalent to it.
    fn notify_element_rejected(&self, _element: &T, _rejected_by: &T) {}
}

/// Outcome of comparing a candidate against the current members.
enum Verdict {
    /// The candidate trades off against every member.
    Accept,
    /// The candidate dominates the member at this index (and possibly later ones).
    AcceptAndDropFrom(usize),
    /// The member at this index dominates, or is equivalent to, the candidate.
    RejectBy(usize),
}

/// A set of values where no value dominates another.
///
/// Members are kept in a vector and every insertion is a linear scan. The
/// number of members stays small (it is bounded by how many trade-offs exist
/// between the criteria), so this outperforms any indexed structure for the
/// call volumes seen in a round-based search.
///
/// Newly accepted elements are appended at the end, and removals preserve the
/// relative order of the remaining members. This is what makes
/// [`elements_added_since_last_mark`](Self::elements_added_since_last_mark)
/// cheap.
pub struct ParetoSet<T, C> {
    elements: Vec<T>,
    comparator: C,
    listener: Option<Box<dyn ParetoSetEventListener<T>>>,
    mark: usize,
}

impl<T, C: ParetoComparator<T>> ParetoSet<T, C> {
    /// Create an empty set using the given dominance comparator.
    pub fn new(comparator: C) -> Self {
        Self {
            elements: Vec::new(),
            comparator,
            listener: None,
            mark: 0,
        }
    }

    /// Create an empty set that reports its decisions to `listener`.
    pub fn with_listener(comparator: C, listener: Box<dyn ParetoSetEventListener<T>>) -> Self {
        Self {
            listener: Some(listener),
            ..Self::new(comparator)
        }
    }

    /// Replace (or remove) the event listener.
    pub fn set_listener(&mut self, listener: Option<Box<dyn ParetoSetEventListener<T>>>) {
        self.listener = listener;
    }

    /// Test whether `candidate` would be accepted, without changing the set.
    pub fn qualify(&self, candidate: &T) -> bool {
        !matches!(self.verdict(candidate), Verdict::RejectBy(_))
    }

    /// Add `candidate` if no member dominates it (or is equivalent to it).
    ///
    /// On success every member dominated by `candidate` is removed. Returns
    /// whether the candidate was inserted.
    pub fn add(&mut self, candidate: T) -> bool {
        match self.verdict(&candidate) {
            Verdict::Accept => {
                self.accept(candidate);
                true
            }
            Verdict::AcceptAndDropFrom(first) => {
                self.remove_dominated_from(first, &candidate);
                self.accept(candidate);
                true
            }
            Verdict::RejectBy(index) => {
                if let Some(listener) = &self.listener {
                    listener.notify_element_rejected(&candidate, &self.elements[index]);
                }
                false
            }
        }
    }

    fn verdict(&self, candidate: &T) -> Verdict {
        let mut equivalent = None;

        for (index, member) in self.elements.iter().enumerate() {
            let left = self.comparator.left_dominance_exist(candidate, member);
            let right = self.comparator.left_dominance_exist(member, candidate);

            match (left, right) {
                // Trade-off: each is better on some criterion
                (true, true) => {}
                (true, false) => return Verdict::AcceptAndDropFrom(index),
                (false, true) => return Verdict::RejectBy(index),
                (false, false) => {
                    equivalent.get_or_insert(index);
                }
            }
        }

        // Either the set is empty, or every member is a trade-off
        // unless an equivalent vector was seen.
        match equivalent {
            Some(index) => Verdict::RejectBy(index),
            None => Verdict::Accept,
        }
    }

    fn remove_dominated_from(&mut self, first: usize, candidate: &T) {
        let comparator = &self.comparator;
        let listener = self.listener.as_deref();
        let mark = self.mark;
        let mut index = 0;
        let mut removed_before_mark = 0;

        self.elements.retain(|member| {
            let i = index;
            index += 1;
            if i < first {
                return true;
            }
            let dominated = comparator.left_dominance_exist(candidate, member)
                && !comparator.left_dominance_exist(member, candidate);
            if dominated {
                if i < mark {
                    removed_before_mark += 1;
                }
                if let Some(listener) = listener {
                    listener.notify_element_dropped(member, candidate);
                }
            }
            !dominated
        });

        self.mark -= removed_before_mark;
    }

    fn accept(&mut self, candidate: T) {
        if let Some(listener) = &self.listener {
            listener.notify_element_accepted(&candidate);
        }
        self.elements.push(candidate);
    }
}

impl<T, C> ParetoSet<T, C> {
    /// Returns true if the set has no members.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Member at `index`, in current storage order.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.elements.get(index)
    }

    /// All members, in current storage order.
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Iterate over all members. The order is unspecified.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    /// Remove all members and reset the mark.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.mark = 0;
    }

    /// Remember the current end of the set. See
    /// [`elements_added_since_last_mark`](Self::elements_added_since_last_mark).
    pub fn mark_at_end_of_set(&mut self) {
        self.mark = self.elements.len();
    }

    /// Members accepted after the last call to
    /// [`mark_at_end_of_set`](Self::mark_at_end_of_set) that are still in the set.
    pub fn elements_added_since_last_mark(&self) -> &[T] {
        &self.elements[self.mark..]
    }

    /// Consume the set, returning its members.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }
}

impl<'a, T, C> IntoIterator for &'a ParetoSet<T, C> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}

impl<T: fmt::Debug, C> fmt::Debug for ParetoSet<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParetoSet")
            .field("elements", &self.elements)
            .field("mark", &self.mark)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// (arrival time, round, cost), "any axis strictly lower wins".
    type Vector = (i32, i32, i32);

    fn any_lower(l: &Vector, r: &Vector) -> bool {
        l.0 < r.0 || l.1 < r.1 || l.2 < r.2
    }

    fn set() -> ParetoSet<Vector, fn(&Vector, &Vector) -> bool> {
        ParetoSet::new(any_lower as fn(&Vector, &Vector) -> bool)
    }

    fn sorted(set: &ParetoSet<Vector, fn(&Vector, &Vector) -> bool>) -> Vec<Vector> {
        let mut v: Vec<_> = set.iter().copied().collect();
        v.sort();
        v
    }

    #[test]
    fn empty_set_accepts_anything() {
        let mut s = set();
        assert!(s.is_empty());
        assert!(s.qualify(&(100, 1, 100)));
        assert!(s.add((100, 1, 100)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn dominated_candidate_is_rejected() {
        let mut s = set();
        s.add((100, 1, 100));

        assert!(!s.qualify(&(101, 1, 100)));
        assert!(!s.add((101, 1, 100)));
        assert_eq!(sorted(&s), vec![(100, 1, 100)]);
    }

    #[test]
    fn equivalent_candidate_is_rejected() {
        let mut s = set();
        s.add((100, 1, 100));

        assert!(!s.add((100, 1, 100)));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn trade_off_is_kept() {
        let mut s = set();
        s.add((100, 2, 100));

        assert!(s.add((110, 1, 100)));
        assert!(s.add((120, 3, 50)));
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn dominating_candidate_removes_all_dominated_members() {
        let mut s = set();
        s.add((100, 2, 300));
        s.add((110, 1, 400));
        s.add((120, 3, 200));

        // Dominates the first and the last, trades off against the second.
        assert!(s.add((100, 2, 200)));
        assert_eq!(sorted(&s), vec![(100, 2, 200), (110, 1, 400)]);
    }

    #[test]
    fn equivalent_member_wins_over_trade_offs() {
        let mut s = set();
        s.add((100, 2, 100));
        s.add((200, 1, 100));

        // Trades off against the first, equivalent to the second.
        assert!(!s.qualify(&(200, 1, 100)));
        assert!(!s.add((200, 1, 100)));
    }

    #[test]
    fn mark_tracks_new_elements() {
        let mut s = set();
        s.add((100, 2, 100));
        s.add((200, 1, 100));
        s.mark_at_end_of_set();
        assert!(s.elements_added_since_last_mark().is_empty());

        s.add((300, 0, 100));
        assert_eq!(s.elements_added_since_last_mark(), &[(300, 0, 100)]);

        // Removing a member before the mark keeps the new element visible.
        s.add((90, 2, 90));
        assert_eq!(
            s.elements_added_since_last_mark(),
            &[(300, 0, 100), (90, 2, 90)]
        );
    }

    #[test]
    fn clear_resets_mark() {
        let mut s = set();
        s.add((1, 1, 1));
        s.mark_at_end_of_set();
        s.clear();
        assert!(s.is_empty());
        s.add((2, 2, 2));
        assert_eq!(s.elements_added_since_last_mark().len(), 1);
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<String>>,
    }

    struct SharedRecorder(Rc<Recorder>);

    impl ParetoSetEventListener<Vector> for SharedRecorder {
        fn notify_element_accepted(&self, element: &Vector) {
            self.0.events.borrow_mut().push(format!("accept {element:?}"));
        }

        fn notify_element_dropped(&self, element: &Vector, dropped_by: &Vector) {
            self.0
                .events
                .borrow_mut()
                .push(format!("drop {element:?} by {dropped_by:?}"));
        }

        fn notify_element_rejected(&self, element: &Vector, rejected_by: &Vector) {
            self.0
                .events
                .borrow_mut()
                .push(format!("reject {element:?} by {rejected_by:?}"));
        }
    }

    #[test]
    fn listener_sees_every_decision() {
        let recorder = Rc::new(Recorder::default());
        let mut s = ParetoSet::with_listener(
            any_lower as fn(&Vector, &Vector) -> bool,
            Box::new(SharedRecorder(recorder.clone())),
        );

        s.add((100, 1, 100));
        s.add((110, 1, 100));
        s.add((90, 1, 100));

        assert_eq!(
            *recorder.events.borrow(),
            vec![
                "accept (100, 1, 100)",
                "reject (110, 1, 100) by (100, 1, 100)",
                "drop (100, 1, 100) by (90, 1, 100)",
                "accept (90, 1, 100)",
            ]
        );
        assert_eq!(s.len(), 1);
    }
}
