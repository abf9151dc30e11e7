// Counter loop - The per-tick work of the background task

use super::channel::StatusMessage;

/// Ticks between status reports
pub const REPORT_INTERVAL: u64 = 1000;

/// Monotonic tick counter reporting every `report_interval` ticks
#[derive(Debug, Clone)]
pub struct CounterLoop {
    counter: u64,
    report_interval: u64,
}

impl CounterLoop {
    /// Create a counter at zero
    ///
    /// # Panics
    /// Panics if `report_interval` is zero
    pub fn new(report_interval: u64) -> Self {
        assert!(report_interval > 0, "Report interval must be non-zero");
        Self {
            counter: 0,
            report_interval,
        }
    }

    /// Advance by one tick, returning a report on every interval boundary
    #[inline]
    pub fn tick(&mut self) -> Option<StatusMessage> {
        self.counter += 1;
        (self.counter % self.report_interval == 0).then_some(StatusMessage {
            counter: self.counter,
        })
    }

    /// Ticks completed so far
    pub fn counter(&self) -> u64 {
        self.counter
    }
}

impl Default for CounterLoop {
    fn default() -> Self {
        Self::new(REPORT_INTERVAL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_on_interval() {
        let mut counter = CounterLoop::default();
        let reports: Vec<_> = (0..2500).filter_map(|_| counter.tick()).collect();

        assert_eq!(counter.counter(), 2500);
        assert_eq!(
            reports,
            vec![StatusMessage { counter: 1000 }, StatusMessage { counter: 2000 }]
        );
    }

    #[test]
    fn test_no_report_before_interval() {
        let mut counter = CounterLoop::default();
        assert!((0..999).all(|_| counter.tick().is_none()));
        assert_eq!(counter.tick(), Some(StatusMessage { counter: 1000 }));
    }

    #[test]
    fn test_custom_interval() {
        let mut counter = CounterLoop::new(3);
        let reports: Vec<_> = (0..10).filter_map(|_| counter.tick()).map(|m| m.counter).collect();
        assert_eq!(reports, vec![3, 6, 9]);
    }

    #[test]
    #[should_panic(expected = "Report interval must be non-zero")]
    fn test_zero_interval() {
        CounterLoop::new(0);
    }
}
