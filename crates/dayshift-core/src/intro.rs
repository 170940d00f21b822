//! Intro screen hold and fade

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntroStage {
    Hold { remaining: f64 },
    Fade { elapsed: f64 },
    Done,
}

/// Output of one intro step
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IntroCue {
    /// Overlay opacity during the fade
    Fade(f64),
    /// Fade complete; the day can start
    Finished,
}

/// Shows the day card for a fixed time, then fades it out linearly
#[derive(Debug, Clone)]
pub struct IntroSequence {
    stage: IntroStage,
    fade: f64,
}

impl IntroSequence {
    pub fn new(hold: f64, fade: f64) -> Self {
        Self {
            stage: IntroStage::Hold { remaining: hold },
            fade,
        }
    }

    pub fn is_done(&self) -> bool {
        self.stage == IntroStage::Done
    }

    pub fn advance(&mut self, dt: f64) -> Option<IntroCue> {
        match self.stage {
            IntroStage::Hold { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.stage = IntroStage::Fade { elapsed: 0.0 };
                    Some(IntroCue::Fade(1.0))
                } else {
                    self.stage = IntroStage::Hold { remaining };
                    None
                }
            }
            IntroStage::Fade { elapsed } => {
                let elapsed = elapsed + dt;
                if elapsed >= self.fade {
                    self.stage = IntroStage::Done;
                    Some(IntroCue::Finished)
                } else {
                    self.stage = IntroStage::Fade { elapsed };
                    Some(IntroCue::Fade(dayshift_util::lerp(1.0, 0.0, elapsed / self.fade)))
                }
            }
            IntroStage::Done => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_then_linear_fade() {
        let mut intro = IntroSequence::new(0.5, 1.0);

        assert_eq!(intro.advance(0.25), None);
        assert_eq!(intro.advance(0.25), Some(IntroCue::Fade(1.0)));
        assert_eq!(intro.advance(0.25), Some(IntroCue::Fade(0.75)));
        assert_eq!(intro.advance(0.25), Some(IntroCue::Fade(0.5)));
        assert_eq!(intro.advance(0.25), Some(IntroCue::Fade(0.25)));
        assert_eq!(intro.advance(0.25), Some(IntroCue::Finished));
        assert!(intro.is_done());
        assert_eq!(intro.advance(0.25), None);
    }

    #[test]
    fn large_step_skips_ahead() {
        let mut intro = IntroSequence::new(2.0, 1.0);
        assert_eq!(intro.advance(10.0), Some(IntroCue::Fade(1.0)));
        assert_eq!(intro.advance(10.0), Some(IntroCue::Finished));
    }
}
