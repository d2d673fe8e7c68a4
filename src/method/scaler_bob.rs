use crate::kernels::PixelKernels;
use crate::method::{CopyWindow, InterpolateWindow, Method, ScanlineDeinterlacer};

/// Half-height bob; the engine routes it through `build_copied_field`.
///
/// The scanline pair is only reached when a caller forces full-height reconstruction, where it
/// behaves like a line doubler.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalerBob;

impl ScanlineDeinterlacer for ScalerBob {
    fn interpolate_scanline(
        &self,
        k: &dyn PixelKernels,
        out: &mut [u8],
        w: &InterpolateWindow<'_>,
        width: usize,
    ) {
        k.blit_scanline(out, w.f0.t, width);
    }

    fn copy_scanline(&self, k: &dyn PixelKernels, out: &mut [u8], w: &CopyWindow<'_>, width: usize) {
        k.blit_scanline(out, w.f0.m, width);
    }
}

pub(crate) fn method() -> Method {
    Method::scanline("Scaler Bob", "ScalerBob", 1, ScalerBob)
        .with_scaler_bob(true)
        .with_description(
            "Outputs each field at half height and lets the video scaler stretch it.",
        )
}
