//! Hold-to-charge button

/// Recharges the battery while held
#[derive(Debug, Clone)]
pub struct Charger {
    multiplier: f64,
    held: bool,
}

impl Charger {
    pub fn new(multiplier: f64) -> Self {
        Self {
            multiplier,
            held: false,
        }
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Returns false if the button was already held
    pub fn press(&mut self) -> bool {
        !std::mem::replace(&mut self.held, true)
    }

    /// Returns false if the button was not held
    pub fn release(&mut self) -> bool {
        std::mem::replace(&mut self.held, false)
    }

    /// Charge delivered over `dt` seconds
    pub fn charge_for(&self, dt: f64) -> f64 {
        if self.held {
            dt.max(0.0) * self.multiplier
        } else {
            0.0
        }
    }
}
