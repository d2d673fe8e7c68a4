//! Wavyte deinterlace is an adaptive video deinterlacer with 3:2 pulldown reversal.
//!
//! Interlaced packed 4:2:2 frames go in, progressive frames come out. The public API is
//! layered:
//!
//! - A [`MethodRegistry`] of interchangeable [`Method`]s, filtered once against the host
//! - A [`DeinterlaceContext`] that reconstructs single fields and tracks telecine cadence
//! - A [`DeinterlaceStage`] that drives a stream of [`FrameYuy2`] into a [`FrameSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod cadence;
pub(crate) mod engine;
pub(crate) mod kernels;
pub(crate) mod method;
pub(crate) mod stage;

pub use crate::foundation::core::{
    BYTES_PER_PIXEL, FieldHistory, FrameSlot, Geometry, check_output, required_len, row_bytes,
};
pub use crate::foundation::error::{DeinterlaceError, DeinterlaceResult};

pub use crate::cadence::history::{CadenceHistory, Detection, HISTORY_SIZE};
pub use crate::cadence::phase::{FieldSource, Phase, PhaseSet};
pub use crate::cadence::score::pulldown_scores;
pub use crate::cadence::state::{CadenceConfig, CadenceDecision, CadenceState, Observation};
pub use crate::engine::BuildOutcome;
pub use crate::engine::context::{DeinterlaceContext, PulldownMode};
pub use crate::kernels::{CpuFeatures, PixelKernels, ScalarKernels, select_kernels};
pub use crate::method::double::LineDoubler;
pub use crate::method::greedy2frame::Greedy2Frame;
pub use crate::method::linear::Linear;
pub use crate::method::linear_blend::LinearBlend;
pub use crate::method::registry::MethodRegistry;
pub use crate::method::scaler_bob::ScalerBob;
pub use crate::method::vertical::Vertical;
pub use crate::method::weave::Weave;
pub use crate::method::{
    Aligned, Algorithm, CopyWindow, FrameDeinterlacer, FrameRequest, InterpolateWindow, Method,
    ScanlineDeinterlacer, Straddle, builtin_methods,
};
pub use crate::stage::opts::{FramerateMode, StageOpts};
pub use crate::stage::post::FPS_24_DURATION;
pub use crate::stage::session::{DeinterlaceStage, FrameYuy2, StageStats};
pub use crate::stage::sink::{FilmModeChange, FrameSink, InMemorySink};
