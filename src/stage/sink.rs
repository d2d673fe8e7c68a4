use crate::cadence::phase::Phase;
use crate::foundation::error::DeinterlaceResult;
use crate::stage::session::FrameYuy2;

/// Film-mode transition notice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct FilmModeChange {
    /// New film-mode state.
    pub film_mode: bool,
    /// Committed phase at the transition.
    pub phase: Phase,
}

/// Consumer of stage output.
///
/// Frames arrive in presentation order. A sink error aborts the current input frame.
pub trait FrameSink {
    /// Receive one output frame.
    fn push_frame(&mut self, frame: FrameYuy2) -> DeinterlaceResult<()>;

    /// Telecine reversal started or stopped.
    fn film_mode_changed(&mut self, change: FilmModeChange) -> DeinterlaceResult<()> {
        let _ = change;
        Ok(())
    }

    /// The stream is over.
    fn end(&mut self) -> DeinterlaceResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    /// Frames in presentation order.
    pub frames: Vec<FrameYuy2>,
    /// Film-mode transitions in arrival order.
    pub film_mode_changes: Vec<FilmModeChange>,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`FrameSink::end`] has been called.
    pub fn ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn push_frame(&mut self, frame: FrameYuy2) -> DeinterlaceResult<()> {
        self.frames.push(frame);
        Ok(())
    }

    fn film_mode_changed(&mut self, change: FilmModeChange) -> DeinterlaceResult<()> {
        self.film_mode_changes.push(change);
        Ok(())
    }

    fn end(&mut self) -> DeinterlaceResult<()> {
        self.ended = true;
        Ok(())
    }
}
