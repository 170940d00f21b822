//! Interruption scheduling and choreography

use serde::{Deserialize, Serialize};

/// Where a running interruption is in its sequence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Choreography {
    /// Camera is moving to the coworker
    PanningOut,
    /// Coworker is chattering; input stays disabled
    Holding { remaining: f64 },
    /// Camera is moving back to the laptop
    PanningBack,
}

/// Step boundaries reported by [`InterruptionScheduler::advance`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoreographyCue {
    ArrivedAtEmployee,
    HoldElapsed,
    ArrivedAtLaptop,
}

/// Fires an interruption every `interval` seconds of countdown
///
/// The first threshold is `day - interval`. Each firing lowers the threshold
/// by `interval`, so thresholds only ever decrease. While a choreography is
/// running no new interruption can start.
#[derive(Debug, Clone)]
pub struct InterruptionScheduler {
    next_threshold: f64,
    interval: f64,
    hold: f64,
    running: Option<Choreography>,
    fired: u32,
}

impl InterruptionScheduler {
    pub fn new(day: f64, interval: f64, hold: f64) -> Self {
        Self {
            next_threshold: day - interval,
            interval,
            hold,
            running: None,
            fired: 0,
        }
    }

    pub fn next_threshold(&self) -> f64 {
        self.next_threshold
    }

    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    /// Number of interruptions started so far
    pub fn fired(&self) -> u32 {
        self.fired
    }

    /// Start an interruption if `time_remaining` has reached the threshold.
    /// Returns the threshold that fired.
    pub fn try_fire(&mut self, time_remaining: f64) -> Option<f64> {
        if self.running.is_some() || time_remaining > self.next_threshold {
            return None;
        }

        let threshold = self.next_threshold;
        self.next_threshold -= self.interval;
        self.running = Some(Choreography::PanningOut);
        self.fired += 1;
        Some(threshold)
    }

    /// Advance the running choreography. `pan_settled` is whether the camera
    /// has reached its current pan target.
    pub fn advance(&mut self, dt: f64, pan_settled: bool) -> Option<ChoreographyCue> {
        match self.running? {
            Choreography::PanningOut if pan_settled => {
                self.running = Some(Choreography::Holding {
                    remaining: self.hold,
                });
                Some(ChoreographyCue::ArrivedAtEmployee)
            }
            Choreography::Holding { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.running = Some(Choreography::PanningBack);
                    Some(ChoreographyCue::HoldElapsed)
                } else {
                    self.running = Some(Choreography::Holding { remaining });
                    None
                }
            }
            Choreography::PanningBack if pan_settled => {
                self.running = None;
                Some(ChoreographyCue::ArrivedAtLaptop)
            }
            _ => None,
        }
    }

    /// Drop the running choreography without further steps
    pub fn finish(&mut self) {
        self.running = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Run the whole countdown, finishing each choreography immediately
    fn thresholds_fired(day: f64, interval: f64, dt: f64) -> Vec<f64> {
        let mut scheduler = InterruptionScheduler::new(day, interval, 15.0);
        let mut remaining = day;
        let mut fired = Vec::new();

        while remaining > 0.0 {
            remaining = (remaining - dt).max(0.0);
            if let Some(threshold) = scheduler.try_fire(remaining) {
                fired.push(threshold);
                scheduler.finish();
            }
        }
        fired
    }

    #[test]
    fn fires_at_each_interval() {
        assert_eq!(thresholds_fired(180.0, 60.0, 0.25), vec![120.0, 60.0, 0.0]);
    }

    #[test]
    fn thresholds_only_decrease() {
        let mut scheduler = InterruptionScheduler::new(180.0, 60.0, 15.0);
        assert_eq!(scheduler.next_threshold(), 120.0);

        assert_eq!(scheduler.try_fire(119.5), Some(120.0));
        scheduler.finish();
        assert_eq!(scheduler.next_threshold(), 60.0);
        assert_eq!(scheduler.try_fire(100.0), None);
        assert_eq!(scheduler.fired(), 1);
    }

    #[test]
    fn no_reentry_while_running() {
        let mut scheduler = InterruptionScheduler::new(180.0, 60.0, 15.0);
        assert!(scheduler.try_fire(120.0).is_some());
        assert!(scheduler.is_active());

        // Even far past the next threshold
        assert_eq!(scheduler.try_fire(10.0), None);
        scheduler.finish();
        assert_eq!(scheduler.try_fire(10.0), Some(60.0));
    }

    #[test]
    fn choreography_steps() {
        let mut scheduler = InterruptionScheduler::new(180.0, 60.0, 1.0);
        scheduler.try_fire(120.0);

        // Waits for the pan
        assert_eq!(scheduler.advance(0.25, false), None);
        assert_eq!(
            scheduler.advance(0.25, true),
            Some(ChoreographyCue::ArrivedAtEmployee)
        );

        // Hold ignores the camera
        for _ in 0..3 {
            assert_eq!(scheduler.advance(0.25, true), None);
        }
        assert_eq!(
            scheduler.advance(0.25, true),
            Some(ChoreographyCue::HoldElapsed)
        );
        assert_eq!(scheduler.running, Some(Choreography::PanningBack));

        assert_eq!(scheduler.advance(0.25, false), None);
        assert_eq!(
            scheduler.advance(0.25, true),
            Some(ChoreographyCue::ArrivedAtLaptop)
        );
        assert!(!scheduler.is_active());
        assert_eq!(scheduler.advance(0.25, true), None);
    }
}
