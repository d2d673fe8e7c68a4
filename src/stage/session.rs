use std::sync::Arc;

use crate::cadence::state::CadenceState;
use crate::engine::context::{DeinterlaceContext, PulldownMode};
use crate::foundation::core::{FieldHistory, FrameSlot, Geometry, row_bytes};
use crate::foundation::error::{DeinterlaceError, DeinterlaceResult};
use crate::kernels::PixelKernels;
use crate::method::Method;
use crate::method::registry::MethodRegistry;
use crate::stage::opts::{FramerateMode, StageOpts};
use crate::stage::post::{JudderClock, apply_chroma_filter};
use crate::stage::sink::{FilmModeChange, FrameSink};

/// Frames kept as history behind the current one.
const RECENT_FRAMES: usize = 2;

/// One packed 4:2:2 (`Y0 U Y1 V`) video frame with its presentation metadata.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameYuy2 {
    /// Width in pixels.
    pub width: usize,
    /// Height in scanlines.
    pub height: usize,
    /// Bytes between the starts of consecutive scanlines.
    pub stride: usize,
    /// Pixel bytes.
    pub data: Vec<u8>,
    /// Presentation timestamp in 90 kHz ticks; 0 means "schedule after the previous frame".
    pub pts: i64,
    /// Display duration in 90 kHz ticks.
    pub duration: i64,
    /// The top field is displayed first.
    pub top_field_first: bool,
    /// The decoder asked for the first field to be shown again (soft telecine).
    pub repeat_first_field: bool,
    /// The frame is flagged progressive.
    pub progressive_frame: bool,
}

impl FrameYuy2 {
    /// Tightly packed top-field-first interlaced frame at NTSC frame duration.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            stride: row_bytes(width),
            data,
            pts: 0,
            duration: 3003,
            top_field_first: true,
            repeat_first_field: false,
            progressive_frame: false,
        }
    }

    /// Borrow the pixels as a history slot.
    pub fn slot(&self) -> FrameSlot<'_> {
        FrameSlot::new(&self.data, self.stride).with_progressive(self.progressive_frame)
    }

    fn same_geometry(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height
    }
}

/// Counters accumulated over a stage's lifetime.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct StageStats {
    /// Frames handed to [`DeinterlaceStage::push_frame`].
    pub frames_in: u64,
    /// Frames delivered to the sink, pass-through included.
    pub frames_out: u64,
    /// Fields removed by telecine recovery.
    pub fields_dropped: u64,
    /// Input frames forwarded untouched.
    pub passthrough: u64,
}

/// Per-stream deinterlacing stage.
///
/// Owns the reconstruction context and the two most recent input frames. Frames must be pushed
/// in decode order; output goes to the sink passed with each frame.
#[derive(Debug)]
pub struct DeinterlaceStage {
    registry: Arc<MethodRegistry>,
    opts: StageOpts,
    context: DeinterlaceContext,
    recent: [Option<FrameYuy2>; RECENT_FRAMES],
    rff_pattern: u8,
    judder: JudderClock,
    last_film_mode: bool,
    stats: StageStats,
}

fn resolve_method(
    registry: &MethodRegistry,
    name: Option<&str>,
) -> DeinterlaceResult<Arc<Method>> {
    match name {
        Some(n) => registry
            .find(n)
            .cloned()
            .ok_or_else(|| DeinterlaceError::configuration(format!("unknown method '{n}'"))),
        None => registry
            .get(0)
            .cloned()
            .ok_or_else(|| DeinterlaceError::configuration("method registry is empty")),
    }
}

fn configure(
    kernels: Arc<dyn PixelKernels>,
    registry: &MethodRegistry,
    opts: &StageOpts,
) -> DeinterlaceResult<DeinterlaceContext> {
    opts.validate()?;
    let method = resolve_method(registry, opts.method.as_deref())?;
    let mut context = DeinterlaceContext::new(kernels, opts.cadence)?;
    context.set_method(Some(method));
    context.set_pulldown(opts.pulldown);
    context.set_parallel(opts.parallel);
    Ok(context)
}

impl DeinterlaceStage {
    /// Create a stage; fails when the options name no usable method.
    pub fn new(
        registry: Arc<MethodRegistry>,
        kernels: Arc<dyn PixelKernels>,
        opts: StageOpts,
    ) -> DeinterlaceResult<Self> {
        let context = configure(kernels, &registry, &opts)?;
        Ok(Self::assemble(registry, opts, context))
    }

    /// Create a stage, degrading to pass-through when the options cannot be honoured.
    pub fn new_or_passthrough(
        registry: Arc<MethodRegistry>,
        kernels: Arc<dyn PixelKernels>,
        opts: StageOpts,
    ) -> Self {
        match configure(kernels.clone(), &registry, &opts) {
            Ok(context) => Self::assemble(registry, opts, context),
            Err(e) => {
                tracing::warn!(error = %e, "deinterlacer unavailable, passing frames through");
                let context = DeinterlaceContext::with_cadence(kernels, CadenceState::default());
                let opts = StageOpts {
                    enabled: false,
                    ..opts
                };
                Self::assemble(registry, opts, context)
            }
        }
    }

    fn assemble(registry: Arc<MethodRegistry>, opts: StageOpts, context: DeinterlaceContext) -> Self {
        Self {
            registry,
            opts,
            context,
            recent: [None, None],
            rff_pattern: 0,
            judder: JudderClock::default(),
            last_film_mode: false,
            stats: StageStats::default(),
        }
    }

    /// Active options.
    pub fn opts(&self) -> &StageOpts {
        &self.opts
    }

    /// Replace the options. The context is rebuilt, so any cadence lock is lost; history is kept.
    ///
    /// A lost lock is reported to the sink with the next frame or at [`Self::finish`].
    pub fn set_opts(&mut self, opts: StageOpts) -> DeinterlaceResult<()> {
        let context = configure(self.context.kernels().clone(), &self.registry, &opts)?;
        self.context = context;
        self.opts = opts;
        self.judder = JudderClock::default();
        Ok(())
    }

    /// Reconstruction context.
    pub fn context(&self) -> &DeinterlaceContext {
        &self.context
    }

    /// Counters so far.
    pub fn stats(&self) -> StageStats {
        self.stats
    }

    /// Whether frames are currently deinterlaced rather than forwarded.
    pub fn is_active(&self) -> bool {
        self.opts.enabled && self.context.method().is_some()
    }

    /// Drop frame history and cadence lock, as after a seek.
    ///
    /// A lost lock is reported to the sink with the next frame or at [`Self::finish`].
    pub fn flush(&mut self) {
        self.recent = [None, None];
        self.rff_pattern = 0;
        self.judder = JudderClock::default();
        self.context.reset();
    }

    /// Signal end of stream to `sink` and return the final counters.
    pub fn finish(&mut self, sink: &mut dyn FrameSink) -> DeinterlaceResult<StageStats> {
        self.report_film_mode(sink)?;
        sink.end()?;
        Ok(self.stats)
    }

    fn report_film_mode(&mut self, sink: &mut dyn FrameSink) -> DeinterlaceResult<()> {
        let film_mode = self.context.film_mode();
        if film_mode == self.last_film_mode {
            return Ok(());
        }
        self.last_film_mode = film_mode;
        sink.film_mode_changed(FilmModeChange {
            film_mode,
            phase: self.context.cadence().phase(),
        })
    }

    fn detect_progressive(&mut self, frame: &FrameYuy2) -> bool {
        self.rff_pattern = (self.rff_pattern << 1) | u8::from(frame.repeat_first_field);
        let soft_telecine = self.rff_pattern == 0xaa || self.rff_pattern == 0x55;
        soft_telecine
            || (self.opts.use_progressive_frame_flag
                && (frame.repeat_first_field || frame.progressive_frame))
    }

    fn forget_stale_history(&mut self, frame: &FrameYuy2) {
        if self
            .recent
            .iter()
            .flatten()
            .any(|r| !r.same_geometry(frame))
        {
            tracing::warn!(
                width = frame.width,
                height = frame.height,
                "frame geometry changed, flushing history"
            );
            self.recent = [None, None];
            self.context.reset();
        }
    }

    fn pass_through(&mut self, frame: FrameYuy2, sink: &mut dyn FrameSink) -> DeinterlaceResult<()> {
        sink.push_frame(frame)?;
        self.stats.passthrough += 1;
        self.stats.frames_out += 1;
        Ok(())
    }

    /// Process one decoded frame.
    #[tracing::instrument(skip(self, frame, sink), fields(pts = frame.pts), level = "trace")]
    pub fn push_frame(
        &mut self,
        mut frame: FrameYuy2,
        sink: &mut dyn FrameSink,
    ) -> DeinterlaceResult<()> {
        self.stats.frames_in += 1;
        self.report_film_mode(sink)?;
        let progressive = self.detect_progressive(&frame);

        let Some(method) = self.context.method().cloned().filter(|_| self.opts.enabled) else {
            return self.pass_through(frame, sink);
        };

        Geometry::new(frame.width, frame.height)?;
        frame.slot().check("input frame", frame.width, frame.height)?;
        self.forget_stale_history(&frame);

        let full = self.opts.framerate == FramerateMode::Full;
        let fields = match self.opts.framerate {
            FramerateMode::Full => [!frame.top_field_first, frame.top_field_first],
            FramerateMode::HalfTop => [false, true],
            FramerateMode::HalfBottom => [true, false],
        };
        let field_duration = |d: i64| if full { d / 2 } else { d };

        if progressive {
            let interlaced_before = self.recent[0]
                .as_ref()
                .filter(|p| !p.progressive_frame)
                .map(|p| p.duration);
            if let Some(prev_duration) = interlaced_before.filter(|_| method.delays_field) {
                let duration = field_duration(prev_duration);
                self.build_output_field(&frame, &method, fields[0], false, 0, duration, sink)?;
            }
            frame.progressive_frame = true;
            self.pass_through(frame.clone(), sink)?;
        } else {
            let after_progressive = self.recent[0]
                .as_ref()
                .is_some_and(|p| p.progressive_frame);
            if !(after_progressive && method.delays_field) {
                let duration = field_duration(frame.duration);
                self.build_output_field(&frame, &method, fields[0], false, frame.pts, duration, sink)?;
            }
            if full {
                let duration = frame.duration / 2;
                self.build_output_field(&frame, &method, fields[1], true, 0, duration, sink)?;
            }
            frame.progressive_frame = false;
        }

        self.recent.rotate_right(1);
        self.recent[0] = Some(frame);
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    fn build_output_field(
        &mut self,
        frame: &FrameYuy2,
        method: &Method,
        bottom_field: bool,
        second_field: bool,
        pts: i64,
        duration: i64,
        sink: &mut dyn FrameSink,
    ) -> DeinterlaceResult<()> {
        let (width, height) = (frame.width, frame.height);
        let out_height = if method.doscalerbob { height / 2 } else { height };
        let stride = row_bytes(width);
        let mut data = vec![0u8; stride * out_height];
        let current = frame.slot();

        let produced = if method.doscalerbob {
            self.context
                .build_copied_field(&mut data, stride, &current, bottom_field, width, height)?;
            true
        } else {
            let previous = self.recent[0].as_ref().map_or(current, FrameYuy2::slot);
            let second_previous = self.recent[1].as_ref().map_or(current, FrameYuy2::slot);
            let history = FieldHistory::new(current, previous, second_previous);
            self.context
                .build_deinterlaced_frame(
                    &mut data,
                    stride,
                    &history,
                    bottom_field,
                    second_field,
                    width,
                    height,
                )?
                .is_produced()
        };

        self.report_film_mode(sink)?;
        let film_mode = self.last_film_mode;

        if !produced {
            self.stats.fields_dropped += 1;
            return Ok(());
        }

        let retime = self.opts.judder_correction
            && self.opts.pulldown == PulldownMode::Vektor
            && film_mode;
        let (pts, duration) = if retime {
            self.judder.retime(pts)
        } else {
            (pts, duration)
        };
        if self.opts.chroma_filter {
            apply_chroma_filter(
                self.context.kernels().as_ref(),
                &mut data,
                stride,
                width,
                out_height,
            );
        }

        sink.push_frame(FrameYuy2 {
            width,
            height: out_height,
            stride,
            data,
            pts,
            duration,
            top_field_first: frame.top_field_first,
            repeat_first_field: false,
            progressive_frame: true,
        })?;
        self.stats.frames_out += 1;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/session.rs"]
mod tests;
