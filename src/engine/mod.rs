//! Frame reconstruction: film-mode weave, scanline and frame method dispatch, and half-height bob.

pub(crate) mod bob;
pub(crate) mod context;
pub(crate) mod scanline;
pub(crate) mod weave;

/// Result of reconstructing one output field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The output buffer holds a new frame.
    Produced,
    /// Telecine recovery removed this field; present nothing for it.
    Dropped,
}

impl BuildOutcome {
    /// Return `true` for [`BuildOutcome::Produced`].
    pub fn is_produced(self) -> bool {
        matches!(self, BuildOutcome::Produced)
    }
}
