//! Countdown clock for one day

/// Monotonic countdown from the day length to zero
#[derive(Debug, Clone)]
pub struct SessionClock {
    total: f64,
    remaining: f64,
}

impl SessionClock {
    pub fn new(total: f64) -> Self {
        Self {
            total,
            remaining: total,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    pub fn elapsed(&self) -> f64 {
        self.total - self.remaining
    }

    pub fn is_expired(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Count down by `dt` and return the new remaining time.
    /// Never increases and never goes below zero.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.remaining = (self.remaining - dt.max(0.0)).max(0.0);
        self.remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_zero() {
        let mut clock = SessionClock::new(1.0);
        assert_eq!(clock.advance(0.25), 0.75);
        assert_eq!(clock.elapsed(), 0.25);
        assert!(!clock.is_expired());

        assert_eq!(clock.advance(5.0), 0.0);
        assert!(clock.is_expired());
        assert_eq!(clock.advance(1.0), 0.0);
    }

    #[test]
    fn negative_dt_does_not_rewind() {
        let mut clock = SessionClock::new(10.0);
        clock.advance(2.0);
        assert_eq!(clock.advance(-5.0), 8.0);
    }
}
