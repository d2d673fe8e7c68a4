use crate::cadence::phase::{Phase, PhaseSet};

/// Slots in the repeat-magnitude ring.
pub const HISTORY_SIZE: usize = 5;
/// Samples averaged per decision.
const WINDOW: usize = 3;

/// Top-field repeat template for top-field-first material, indexed by phase.
const TFF_TOP: [bool; 5] = [false, true, false, false, false];
/// Bottom-field repeat template for top-field-first material.
const TFF_BOT: [bool; 5] = [false, false, false, true, false];
/// Top-field repeat template for bottom-field-first material.
const BFF_TOP: [bool; 5] = [false, false, false, true, false];
/// Bottom-field repeat template for bottom-field-first material.
const BFF_BOT: [bool; 5] = [false, true, false, false, false];

/// Result of one detector step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detection {
    /// Every phase consistent with the recent history.
    pub valid: PhaseSet,
    /// The predicted phase if valid, else the lowest valid phase, else `None`.
    pub chosen: Option<Phase>,
}

/// Rolling window of per-field repeat magnitudes.
///
/// A smaller magnitude means the field is more likely a repeat of the previous one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CadenceHistory {
    top: [u64; HISTORY_SIZE],
    bot: [u64; HISTORY_SIZE],
    pos: usize,
}

impl CadenceHistory {
    /// Empty (all-zero) history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot the next sample will be written to, always in `0..HISTORY_SIZE`.
    pub fn position(&self) -> usize {
        self.pos
    }

    fn back(&self, j: usize) -> usize {
        (self.pos + HISTORY_SIZE - j) % HISTORY_SIZE
    }

    fn window_mean(samples: &[u64; HISTORY_SIZE], slots: impl Iterator<Item = usize>) -> u64 {
        let sum: u128 = slots.map(|s| u128::from(samples[s])).sum();
        (sum / WINDOW as u128) as u64
    }

    /// Record one top field's magnitudes and classify the phase.
    pub fn detect(
        &mut self,
        top_diff: u64,
        bot_diff: u64,
        top_field_first: bool,
        predicted: Phase,
    ) -> Detection {
        self.top[self.pos] = top_diff;
        self.bot[self.pos] = bot_diff;

        let avg_top = Self::window_mean(&self.top, (0..WINDOW).map(|j| self.back(j)));
        let avg_bot = Self::window_mean(&self.bot, (0..WINDOW).map(|j| self.back(j)));

        let (top_tpl, bot_tpl) = if top_field_first {
            (&TFF_TOP, &TFF_BOT)
        } else {
            (&BFF_TOP, &BFF_BOT)
        };

        let valid: PhaseSet = Phase::ALL
            .into_iter()
            .filter(|p| {
                let i = p.index();
                (0..WINDOW).all(|j| {
                    let tpl = (i + HISTORY_SIZE - j) % HISTORY_SIZE;
                    let slot = self.back(j);
                    !(top_tpl[tpl] && self.top[slot] > avg_top)
                        && !(bot_tpl[tpl] && self.bot[slot] > avg_bot)
                })
            })
            .collect();

        self.pos = (self.pos + 1) % HISTORY_SIZE;

        let chosen = if valid.contains(predicted) {
            Some(predicted)
        } else {
            valid.first()
        };
        Detection { valid, chosen }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/cadence/history.rs"]
mod tests;
