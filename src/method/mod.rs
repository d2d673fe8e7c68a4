//! Deinterlacing methods: descriptors, the two algorithm shapes, and the built-in set.

pub(crate) mod double;
pub(crate) mod greedy2frame;
pub(crate) mod linear;
pub(crate) mod linear_blend;
pub(crate) mod registry;
pub(crate) mod scaler_bob;
pub(crate) mod vertical;
pub(crate) mod weave;

use std::sync::Arc;

use crate::foundation::core::FieldHistory;
use crate::kernels::{CpuFeatures, PixelKernels};

/// Two scanlines of one field straddling the output scanline.
#[derive(Clone, Copy, Debug)]
pub struct Straddle<'a> {
    /// Scanline above.
    pub t: &'a [u8],
    /// Scanline below.
    pub b: &'a [u8],
}

/// Three scanlines of one field centred on the output scanline.
#[derive(Clone, Copy, Debug)]
pub struct Aligned<'a> {
    /// Two scanlines above.
    pub tt: &'a [u8],
    /// Same position as the output scanline.
    pub m: &'a [u8],
    /// Two scanlines below.
    pub bb: &'a [u8],
}

/// Neighbourhood of a scanline missing from the current field.
///
/// Field 0 is the most recently decoded field and straddles the output; field 1 is the opposite
/// field, aligned with it. Fields 2 and 3 repeat the pattern one frame back.
#[derive(Clone, Copy, Debug)]
pub struct InterpolateWindow<'a> {
    /// Whether the field being reconstructed is the bottom field.
    pub bottom_field: bool,
    /// Current field.
    pub f0: Straddle<'a>,
    /// Opposite field, most recent.
    pub f1: Aligned<'a>,
    /// Current field parity, one frame back.
    pub f2: Straddle<'a>,
    /// Opposite field parity, one frame back.
    pub f3: Aligned<'a>,
}

/// Neighbourhood of a scanline present in the current field.
#[derive(Clone, Copy, Debug)]
pub struct CopyWindow<'a> {
    /// Whether the field being reconstructed is the bottom field.
    pub bottom_field: bool,
    /// Current field.
    pub f0: Aligned<'a>,
    /// Opposite field, most recent.
    pub f1: Straddle<'a>,
    /// Current field parity, one frame back.
    pub f2: Aligned<'a>,
    /// Opposite field parity, one frame back.
    pub f3: Straddle<'a>,
}

/// Algorithm invoked once per output scanline pair.
pub trait ScanlineDeinterlacer: Send + Sync + std::fmt::Debug {
    /// Produce a scanline that the current field does not carry.
    fn interpolate_scanline(
        &self,
        k: &dyn PixelKernels,
        out: &mut [u8],
        w: &InterpolateWindow<'_>,
        width: usize,
    );

    /// Produce a scanline that the current field carries.
    fn copy_scanline(&self, k: &dyn PixelKernels, out: &mut [u8], w: &CopyWindow<'_>, width: usize);
}

/// Parameters of one whole-frame reconstruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameRequest {
    /// Reconstruct the bottom field.
    pub bottom_field: bool,
    /// The field is the second one of its frame.
    pub second_field: bool,
    /// Width in pixels.
    pub width: usize,
    /// Frame height in scanlines.
    pub height: usize,
    /// Allow the method to split rows across the rayon pool.
    pub parallel: bool,
}

/// Algorithm invoked once per output frame; owns all interpolation internally.
pub trait FrameDeinterlacer: Send + Sync + std::fmt::Debug {
    /// Write `req.height` scanlines to `out`.
    fn deinterlace_frame(
        &self,
        k: &dyn PixelKernels,
        out: &mut [u8],
        out_stride: usize,
        history: &FieldHistory<'_>,
        req: &FrameRequest,
    );
}

/// How a method is invoked by the engine.
#[derive(Clone, Debug)]
pub enum Algorithm {
    /// Per-scanline interpolate/copy pair.
    Scanline(Arc<dyn ScanlineDeinterlacer>),
    /// Single whole-frame call.
    Frame(Arc<dyn FrameDeinterlacer>),
}

/// A registered deinterlacing method.
#[derive(Clone, Debug)]
pub struct Method {
    /// Human-readable name.
    pub name: String,
    /// Identifier used in options and on the command line.
    pub short_name: String,
    /// Historical field buffers the method reads (1..=4).
    pub fields_required: usize,
    /// CPU features the method needs.
    pub accel_required: CpuFeatures,
    /// Output is a half-height bob of the current field.
    pub doscalerbob: bool,
    /// Output lags input by one field.
    pub delays_field: bool,
    /// Longer description for listings.
    pub description: String,
    /// Invocation shape.
    pub algorithm: Algorithm,
}

impl Method {
    /// Create a method with no capability requirements.
    pub fn new(
        name: impl Into<String>,
        short_name: impl Into<String>,
        fields_required: usize,
        algorithm: Algorithm,
    ) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
            fields_required,
            accel_required: CpuFeatures::NONE,
            doscalerbob: false,
            delays_field: false,
            description: String::new(),
            algorithm,
        }
    }

    /// Scanline-mode method.
    pub fn scanline(
        name: impl Into<String>,
        short_name: impl Into<String>,
        fields_required: usize,
        algo: impl ScanlineDeinterlacer + 'static,
    ) -> Self {
        Self::new(
            name,
            short_name,
            fields_required,
            Algorithm::Scanline(Arc::new(algo)),
        )
    }

    /// Frame-mode method.
    pub fn frame(
        name: impl Into<String>,
        short_name: impl Into<String>,
        fields_required: usize,
        algo: impl FrameDeinterlacer + 'static,
    ) -> Self {
        Self::new(
            name,
            short_name,
            fields_required,
            Algorithm::Frame(Arc::new(algo)),
        )
    }

    /// Set required CPU features.
    pub fn with_accel(mut self, accel: CpuFeatures) -> Self {
        self.accel_required = accel;
        self
    }

    /// Mark the method as delaying output by one field.
    pub fn with_delays_field(mut self, delays: bool) -> Self {
        self.delays_field = delays;
        self
    }

    /// Mark the method as a half-height bob.
    pub fn with_scaler_bob(mut self, scaler_bob: bool) -> Self {
        self.doscalerbob = scaler_bob;
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Return `true` for per-scanline methods.
    pub fn scanline_mode(&self) -> bool {
        matches!(self.algorithm, Algorithm::Scanline(_))
    }
}

/// Built-in methods in registration order.
pub fn builtin_methods() -> Vec<Arc<Method>> {
    vec![
        Arc::new(linear::method()),
        Arc::new(linear_blend::method()),
        Arc::new(greedy2frame::method()),
        Arc::new(weave::method()),
        Arc::new(double::method()),
        Arc::new(vertical::method()),
        Arc::new(scaler_bob::method()),
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/method/mod.rs"]
mod tests;
