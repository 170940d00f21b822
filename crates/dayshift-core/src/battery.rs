//! Numeric battery model

use serde::{Deserialize, Serialize};

/// Latch transition reported by [`BatteryModel::drain`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatterySignal {
    /// Charge crossed from above zero to zero
    Depleted,
    /// Charge crossed from zero back above zero
    Restored,
}

/// Linear-drain battery, measured in seconds of remaining power
///
/// `depleted` is a latch: it only flips when [`drain`](Self::drain) observes
/// a crossing, so sitting at empty never re-fires `Depleted`.
#[derive(Debug, Clone)]
pub struct BatteryModel {
    charge: f64,
    max_charge: f64,
    critical_ratio: f64,
    depleted: bool,
}

impl BatteryModel {
    /// A full battery
    pub fn new(max_charge: f64, critical_ratio: f64) -> Self {
        Self {
            charge: max_charge,
            max_charge,
            critical_ratio,
            depleted: false,
        }
    }

    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn max_charge(&self) -> f64 {
        self.max_charge
    }

    pub fn is_depleted(&self) -> bool {
        self.depleted
    }

    pub fn ratio(&self) -> f64 {
        if self.max_charge > 0.0 {
            (self.charge / self.max_charge).min(1.0)
        } else {
            0.0
        }
    }

    /// Low enough for presenters to start flickering
    pub fn is_critical(&self) -> bool {
        self.ratio() <= self.critical_ratio
    }

    /// Consume `dt` seconds of charge and recompute the latch
    pub fn drain(&mut self, dt: f64) -> Option<BatterySignal> {
        self.charge = (self.charge - dt.max(0.0)).clamp(0.0, self.max_charge);

        if self.charge <= 0.0 && !self.depleted {
            self.depleted = true;
            Some(BatterySignal::Depleted)
        } else if self.charge > 0.0 && self.depleted {
            self.depleted = false;
            Some(BatterySignal::Restored)
        } else {
            None
        }
    }

    /// Add charge. May overshoot `max_charge`; the next `drain` clamps it
    /// and recomputes the latch.
    pub fn recharge(&mut self, amount: f64) {
        self.charge += amount.max(0.0);
    }

    /// Back to full without touching the latch
    pub fn refill(&mut self) {
        self.charge = self.max_charge;
    }
}
