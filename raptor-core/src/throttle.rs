//! Rate limiting for diagnostics that may fire on every search iteration.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

#[derive(Debug)]
struct ThrottleState {
    last_emitted: Option<Instant>,
    suppressed: u64,
}

/// Lets at most one event through per quiet period.
///
/// A throttle is usually a `static` shared by every search running in the
/// process:
///
/// ```
/// use std::time::Duration;
/// use raptor_core::throttle::Throttle;
///
/// static NOISY: Throttle = Throttle::new(Duration::from_secs(1));
///
/// if let Some(suppressed) = NOISY.permit() {
///     tracing::warn!(suppressed, "something odd happened");
/// }
/// ```
#[derive(Debug)]
pub struct Throttle {
    quiet_period: Duration,
    state: Mutex<ThrottleState>,
}

impl Throttle {
    pub const fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            state: Mutex::new(ThrottleState {
                last_emitted: None,
                suppressed: 0,
            }),
        }
    }

    /// Returns `Some(n)` if the caller may emit now, where `n` is the number
    /// of events swallowed since the last emitted one. Returns `None` while
    /// the quiet period is running.
    pub fn permit(&self) -> Option<u64> {
        self.permit_at(Instant::now())
    }

    fn permit_at(&self, now: Instant) -> Option<u64> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);

        let open = match state.last_emitted {
            None => true,
            Some(last) => now.saturating_duration_since(last) >= self.quiet_period,
        };

        if open {
            state.last_emitted = Some(now);
            Some(std::mem::take(&mut state.suppressed))
        } else {
            state.suppressed += 1;
            None
        }
    }
}
