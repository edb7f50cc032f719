//! Dominance rules for completed paths.

use serde::{Deserialize, Serialize};

use super::Path;
use crate::pareto::ParetoComparator;
use crate::transit::SearchDirection;

/// Which criteria take part in path dominance.
///
/// Every variant compares arrival time (departure time in a reverse search),
/// number of transfers and duration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PathCriteria {
    #[default]
    Standard,
    /// Also keep paths found in a later iteration of a range search, so every
    /// departure in the window gets its own result.
    Timetable,
    /// Also compare generalized cost.
    StandardWithC1,
    /// Both of the above.
    TimetableWithC1,
}

impl PathCriteria {
    pub fn from_flags(timetable: bool, include_c1: bool) -> Self {
        match (timetable, include_c1) {
            (false, false) => PathCriteria::Standard,
            (true, false) => PathCriteria::Timetable,
            (false, true) => PathCriteria::StandardWithC1,
            (true, true) => PathCriteria::TimetableWithC1,
        }
    }

    pub fn includes_timetable(self) -> bool {
        matches!(self, PathCriteria::Timetable | PathCriteria::TimetableWithC1)
    }

    pub fn includes_c1(self) -> bool {
        matches!(
            self,
            PathCriteria::StandardWithC1 | PathCriteria::TimetableWithC1
        )
    }
}

/// Path dominance for a search in a given direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathComparator {
    criteria: PathCriteria,
    direction: SearchDirection,
}

impl PathComparator {
    pub fn new(criteria: PathCriteria, direction: SearchDirection) -> Self {
        Self {
            criteria,
            direction,
        }
    }

    pub fn criteria(&self) -> PathCriteria {
        self.criteria
    }

    pub fn direction(&self) -> SearchDirection {
        self.direction
    }
}

impl ParetoComparator<Path> for PathComparator {
    fn left_dominance_exist(&self, l: &Path, r: &Path) -> bool {
        let (better_time, better_iteration) = match self.direction {
            SearchDirection::Forward => (
                l.end_time() < r.end_time(),
                l.iteration_departure_time() > r.iteration_departure_time(),
            ),
            SearchDirection::Reverse => (
                l.start_time() > r.start_time(),
                l.iteration_departure_time() < r.iteration_departure_time(),
            ),
        };

        better_time
            || l.number_of_transfers() < r.number_of_transfers()
            || l.duration() < r.duration()
            || (self.criteria.includes_c1() && l.c1() < r.c1())
            || (self.criteria.includes_timetable() && better_iteration)
    }
}
