use crate::cadence::history::{CadenceHistory, Detection};
use crate::cadence::phase::Phase;
use crate::foundation::error::{DeinterlaceError, DeinterlaceResult};

/// Tuning of the phase-lock controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CadenceConfig {
    /// Consecutive predicted top fields required before film mode is trusted.
    ///
    /// The default of 60 is about one second of NTSC video.
    pub error_wait: u32,
    /// Surprises tolerated once locked before the lock is dropped.
    pub grace_frames: u32,
}

impl Default for CadenceConfig {
    fn default() -> Self {
        Self {
            error_wait: 60,
            grace_frames: 1,
        }
    }
}

impl CadenceConfig {
    /// Reject settings that would make film mode unconditional.
    pub fn validate(&self) -> DeinterlaceResult<()> {
        if self.error_wait == 0 {
            return Err(DeinterlaceError::validation(
                "cadence error_wait must be >= 1",
            ));
        }
        Ok(())
    }
}

/// How the detector's answer related to the prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Observation {
    /// No phase fits the history; the lock is dropped.
    NoMatch,
    /// The predicted phase was confirmed.
    Predicted,
    /// A different phase fits better than the predicted one.
    Surprise {
        /// Phase the detector reported.
        detected: Phase,
        /// The surprise consumed a grace token and the prediction was kept.
        absorbed: bool,
    },
}

/// Outcome of one controller step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CadenceDecision {
    /// Phase committed for this top field and the following bottom field.
    pub phase: Phase,
    /// Whether telecine is being reversed.
    pub film_mode: bool,
    /// Detector outcome relative to the prediction.
    pub observation: Observation,
    /// `film_mode` differs from the state before the step.
    pub film_mode_changed: bool,
}

/// Phase-lock controller for one stream.
///
/// Steps are pure: they return the next state instead of mutating, so a caller can replay or
/// fork a stream's cadence freely.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CadenceState {
    config: CadenceConfig,
    phase: Phase,
    error_countdown: u32,
    grace: u32,
    history: CadenceHistory,
}

impl CadenceState {
    /// Fresh, unlocked state.
    pub fn new(config: CadenceConfig) -> Self {
        Self {
            config,
            phase: Phase::AA,
            error_countdown: config.error_wait,
            grace: 0,
            history: CadenceHistory::new(),
        }
    }

    /// State after a seek or geometry change: history cleared, lock must be re-earned.
    pub fn reset(&self) -> Self {
        Self::new(self.config)
    }

    /// Controller tuning.
    pub fn config(&self) -> CadenceConfig {
        self.config
    }

    /// Committed phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Predicted top fields still needed before film mode.
    pub fn error_countdown(&self) -> u32 {
        self.error_countdown
    }

    /// Remaining surprise tolerance.
    pub fn grace(&self) -> u32 {
        self.grace
    }

    /// Repeat-magnitude history.
    pub fn history(&self) -> &CadenceHistory {
        &self.history
    }

    /// Whether telecine is being reversed; derived from the countdown only.
    pub fn film_mode(&self) -> bool {
        self.error_countdown == 0
    }

    /// Phase expected at the next top field.
    pub fn predicted(&self) -> Phase {
        self.phase.next()
    }

    /// Feed one top field's repeat magnitudes.
    pub fn observe(&self, top_diff: u64, bot_diff: u64) -> (Self, CadenceDecision) {
        let mut history = self.history;
        let Detection { chosen, .. } = history.detect(top_diff, bot_diff, true, self.predicted());
        let (mut next, decision) = self.apply_detection(chosen);
        next.history = history;
        tracing::trace!(
            top_diff,
            bot_diff,
            phase = %decision.phase,
            film_mode = decision.film_mode,
            observation = ?decision.observation,
            "cadence step"
        );
        (next, decision)
    }

    /// Advance the controller given the detector's answer for this top field.
    pub fn apply_detection(&self, detected: Option<Phase>) -> (Self, CadenceDecision) {
        let predicted = self.predicted();
        let mut next = *self;

        let observation = match detected {
            None => {
                next.grace = 0;
                next.error_countdown = self.config.error_wait;
                next.phase = predicted;
                Observation::NoMatch
            }
            Some(d) if d != predicted => {
                if self.grace > 0 {
                    next.grace -= 1;
                    next.phase = predicted;
                    Observation::Surprise {
                        detected: d,
                        absorbed: true,
                    }
                } else {
                    next.error_countdown = self.config.error_wait;
                    next.phase = d;
                    Observation::Surprise {
                        detected: d,
                        absorbed: false,
                    }
                }
            }
            Some(d) => {
                next.phase = d;
                next.error_countdown = next.error_countdown.saturating_sub(1);
                if next.error_countdown == 0 {
                    next.grace = self.config.grace_frames;
                }
                Observation::Predicted
            }
        };

        let decision = CadenceDecision {
            phase: next.phase,
            film_mode: next.film_mode(),
            observation,
            film_mode_changed: next.film_mode() != self.film_mode(),
        };
        (next, decision)
    }
}

impl Default for CadenceState {
    fn default() -> Self {
        Self::new(CadenceConfig::default())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cadence/state.rs"]
mod tests;
