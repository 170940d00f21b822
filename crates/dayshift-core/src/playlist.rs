//! Shuffled email queue

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// What the typing minigame should do next
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaylistItem {
    Email { body: String, remaining: usize },
    Exhausted,
}

/// Emails in random order, each played once
///
/// An empty configuration disables the playlist entirely: it never loads
/// anything and never reports exhaustion.
#[derive(Debug, Clone)]
pub struct EmailPlaylist {
    queue: VecDeque<String>,
    enabled: bool,
    delay: f64,
    pending: Option<f64>,
    exhausted_reported: bool,
}

impl EmailPlaylist {
    pub fn new(bodies: Vec<String>, delay: f64, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let mut bodies = bodies;
        bodies.shuffle(&mut rng);

        Self {
            enabled: !bodies.is_empty(),
            queue: bodies.into(),
            delay,
            pending: None,
            exhausted_reported: false,
        }
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    /// Take the next email, or report exhaustion once
    pub fn next_item(&mut self) -> Option<PlaylistItem> {
        if !self.enabled {
            return None;
        }
        match self.queue.pop_front() {
            Some(body) => Some(PlaylistItem::Email {
                body,
                remaining: self.queue.len(),
            }),
            None if !self.exhausted_reported => {
                self.exhausted_reported = true;
                Some(PlaylistItem::Exhausted)
            }
            None => None,
        }
    }

    /// Queue a delayed load; replaces any load already waiting
    pub fn schedule_next(&mut self) {
        if self.enabled {
            self.pending = Some(self.delay);
        }
    }

    pub fn cancel_pending(&mut self) {
        self.pending = None;
    }

    /// Count down a scheduled load, returning the item once it is due
    pub fn advance(&mut self, dt: f64) -> Option<PlaylistItem> {
        let remaining = self.pending? - dt;
        if remaining <= 0.0 {
            self.pending = None;
            self.next_item()
        } else {
            self.pending = Some(remaining);
            None
        }
    }
}
