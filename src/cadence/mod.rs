//! 3:2 pulldown cadence detection: phase model, repeat history, and the phase-lock controller.

pub(crate) mod history;
pub(crate) mod phase;
pub(crate) mod score;
pub(crate) mod state;
