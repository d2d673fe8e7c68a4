use std::sync::Arc;

use crate::cadence::score::pulldown_scores;
use crate::cadence::state::{CadenceConfig, CadenceDecision, CadenceState};
use crate::engine::{BuildOutcome, bob, scanline, weave};
use crate::foundation::core::{FieldHistory, FrameSlot, Geometry, check_output};
use crate::foundation::error::{DeinterlaceError, DeinterlaceResult};
use crate::kernels::PixelKernels;
use crate::method::{Algorithm, FrameRequest, Method};

/// Telecine detection algorithm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PulldownMode {
    /// Never reverse telecine.
    None,
    /// Repeat-history cadence detection.
    #[default]
    Vektor,
}

/// Per-stream reconstruction state: cadence lock, active method, and the geometry in use.
///
/// One context serves one stream and must see its fields strictly in decode order.
#[derive(Debug)]
pub struct DeinterlaceContext {
    kernels: Arc<dyn PixelKernels>,
    method: Option<Arc<Method>>,
    pulldown: PulldownMode,
    cadence: CadenceState,
    last_decision: Option<CadenceDecision>,
    geometry: Option<Geometry>,
    parallel: bool,
}

impl DeinterlaceContext {
    /// Create a context with no method selected and cadence detection enabled.
    pub fn new(kernels: Arc<dyn PixelKernels>, config: CadenceConfig) -> DeinterlaceResult<Self> {
        config.validate()?;
        Ok(Self::with_cadence(kernels, CadenceState::new(config)))
    }

    pub(crate) fn with_cadence(kernels: Arc<dyn PixelKernels>, cadence: CadenceState) -> Self {
        Self {
            kernels,
            method: None,
            pulldown: PulldownMode::Vektor,
            cadence,
            last_decision: None,
            geometry: None,
            parallel: true,
        }
    }

    /// Select the method used outside film mode.
    pub fn set_method(&mut self, method: Option<Arc<Method>>) {
        self.method = method;
    }

    /// Active method, if any.
    pub fn method(&self) -> Option<&Arc<Method>> {
        self.method.as_ref()
    }

    /// Switch telecine detection; leaving [`PulldownMode::Vektor`] drops any lock.
    pub fn set_pulldown(&mut self, mode: PulldownMode) {
        if mode != self.pulldown && mode == PulldownMode::None {
            self.cadence = self.cadence.reset();
            self.last_decision = None;
        }
        self.pulldown = mode;
    }

    /// Telecine detection in use.
    pub fn pulldown(&self) -> PulldownMode {
        self.pulldown
    }

    /// Allow frame methods to use the rayon pool.
    pub fn set_parallel(&mut self, parallel: bool) {
        self.parallel = parallel;
    }

    /// Forget cadence history and geometry, as after a seek.
    pub fn reset(&mut self) {
        self.cadence = self.cadence.reset();
        self.last_decision = None;
        self.geometry = None;
    }

    /// Whether telecine is currently being reversed.
    pub fn film_mode(&self) -> bool {
        self.pulldown == PulldownMode::Vektor && self.cadence.film_mode()
    }

    /// Cadence controller state.
    pub fn cadence(&self) -> &CadenceState {
        &self.cadence
    }

    /// Decision taken at the most recent top field.
    pub fn last_decision(&self) -> Option<CadenceDecision> {
        self.last_decision
    }

    /// Kernels used for every pixel operation.
    pub fn kernels(&self) -> &Arc<dyn PixelKernels> {
        &self.kernels
    }

    fn track_geometry(&mut self, geometry: Geometry) -> DeinterlaceResult<()> {
        match self.geometry {
            Some(g) if g != geometry => {
                tracing::warn!(
                    from = ?g,
                    to = ?geometry,
                    "frame geometry changed, resetting deinterlace context"
                );
                self.reset();
                self.geometry = Some(geometry);
                Err(DeinterlaceError::geometry(format!(
                    "frame size changed from {}x{} to {}x{}",
                    g.width, g.height, geometry.width, geometry.height
                )))
            }
            _ => {
                self.geometry = Some(geometry);
                Ok(())
            }
        }
    }

    fn observe_top_field(&mut self, history: &FieldHistory<'_>, g: Geometry) {
        let (top, bot) = pulldown_scores(
            self.kernels.as_ref(),
            &history.current,
            &history.previous,
            g.width,
            g.height,
        );
        let (next, decision) = self.cadence.observe(top, bot);
        self.cadence = next;
        self.last_decision = Some(decision);
        if decision.film_mode_changed {
            if decision.film_mode {
                tracing::info!(phase = %decision.phase, "film mode enabled");
            } else {
                tracing::info!(phase = %decision.phase, "film mode disabled");
            }
        }
    }

    /// Reconstruct one output field into `out`.
    ///
    /// While film mode holds the output is woven from the committed phase's source frames, or
    /// the field is dropped. Otherwise the active method runs. Top fields feed the cadence
    /// detector; bottom fields reuse its last decision.
    #[allow(clippy::too_many_arguments)]
    #[tracing::instrument(skip(self, out, history), level = "trace")]
    pub fn build_deinterlaced_frame(
        &mut self,
        out: &mut [u8],
        out_stride: usize,
        history: &FieldHistory<'_>,
        bottom_field: bool,
        second_field: bool,
        width: usize,
        frame_height: usize,
    ) -> DeinterlaceResult<BuildOutcome> {
        let g = Geometry::new(width, frame_height)?;
        self.track_geometry(g)?;
        history.check(width, frame_height)?;
        let method = self
            .method
            .clone()
            .ok_or_else(|| DeinterlaceError::configuration("no deinterlacing method selected"))?;
        check_output(out, out_stride, width, frame_height)?;

        if self.pulldown == PulldownMode::Vektor {
            if !bottom_field {
                self.observe_top_field(history, g);
            }
            if self.cadence.film_mode() {
                let phase = self.cadence.phase();
                if phase.drops(bottom_field) {
                    return Ok(BuildOutcome::Dropped);
                }
                weave::weave_film_frame(
                    self.kernels.as_ref(),
                    out,
                    out_stride,
                    history,
                    phase,
                    bottom_field,
                    width,
                    frame_height,
                );
                return Ok(BuildOutcome::Produced);
            }
        }

        let k = self.kernels.as_ref();
        match &method.algorithm {
            Algorithm::Frame(algo) => {
                let req = FrameRequest {
                    bottom_field,
                    second_field,
                    width,
                    height: frame_height,
                    parallel: self.parallel,
                };
                algo.deinterlace_frame(k, out, out_stride, history, &req);
            }
            Algorithm::Scanline(algo) => scanline::run(
                k,
                algo.as_ref(),
                out,
                out_stride,
                history,
                bottom_field,
                second_field,
                width,
                frame_height,
            ),
        }
        Ok(BuildOutcome::Produced)
    }

    /// Half-height bob of one field of `current` into `out` (`frame_height / 2` scanlines).
    #[tracing::instrument(skip(self, out, current), level = "trace")]
    pub fn build_copied_field(
        &self,
        out: &mut [u8],
        out_stride: usize,
        current: &FrameSlot<'_>,
        bottom_field: bool,
        width: usize,
        frame_height: usize,
    ) -> DeinterlaceResult<()> {
        Geometry::new(width, frame_height)?;
        current.check("current frame", width, frame_height)?;
        check_output(out, out_stride, width, bob::output_rows(frame_height))?;
        bob::copied_field(
            self.kernels.as_ref(),
            out,
            out_stride,
            current,
            bottom_field,
            width,
            frame_height,
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/context.rs"]
mod tests;
