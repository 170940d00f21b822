//! Chat bubble cadence for interruptions

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

const MIN_INTERVAL: f64 = 0.01;

/// Emits one random line immediately on start, then every `interval` seconds
pub struct ChatterSpawner {
    messages: Vec<String>,
    interval: f64,
    rng: StdRng,
    until_next: Option<f64>,
}

impl ChatterSpawner {
    pub fn new(messages: Vec<String>, interval: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            messages,
            interval: interval.max(MIN_INTERVAL),
            rng,
            until_next: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.until_next.is_some()
    }

    /// Start spawning. Returns false if already running.
    pub fn start(&mut self) -> bool {
        if self.is_running() {
            return false;
        }
        self.until_next = Some(0.0);
        true
    }

    /// Stop spawning. Returns false if it was not running.
    pub fn stop(&mut self) -> bool {
        self.until_next.take().is_some()
    }

    /// Messages due within `dt`
    pub fn advance(&mut self, dt: f64) -> Vec<String> {
        let mut spawned = Vec::new();
        let Some(mut until_next) = self.until_next else {
            return spawned;
        };

        until_next -= dt;
        while until_next <= 0.0 {
            if let Some(message) = self.messages.choose(&mut self.rng) {
                spawned.push(message.clone());
            }
            until_next += self.interval;
        }
        self.until_next = Some(until_next);
        spawned
    }
}

impl std::fmt::Debug for ChatterSpawner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatterSpawner")
            .field("messages", &self.messages.len())
            .field("interval", &self.interval)
            .field("until_next", &self.until_next)
            .finish()
    }
}
