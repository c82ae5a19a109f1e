use std::time::{Duration, Instant};

/// Cancel-and-reschedule debouncer driven by caller-supplied instants.
///
/// Every [`schedule`](Debouncer::schedule) replaces the pending value and
/// restarts the delay; [`poll`](Debouncer::poll) releases the value once the
/// delay has elapsed since the last schedule.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    /// Debouncer with the given quiet period.
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// Quiet period.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Replaces any pending value and restarts the delay at `now`.
    pub fn schedule(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    /// Drops the pending value, if any.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }

    /// True while a value waits for its deadline.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Instant at which the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, due)| *due)
    }

    /// Takes the pending value when its deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let due = self.deadline()?;
        if now >= due {
            self.cancel()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_value_wins_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_millis(250));
        debouncer.schedule("r", start);
        debouncer.schedule("ri", start + Duration::from_millis(100));
        assert_eq!(debouncer.poll(start + Duration::from_millis(300)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(350)),
            Some("ri")
        );
        assert!(!debouncer.is_pending());
    }
}
