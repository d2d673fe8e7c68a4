use crate::kernels::PixelKernels;
use crate::method::{CopyWindow, InterpolateWindow, Method, ScanlineDeinterlacer};

/// Spatial average of the two straddling scanlines of the current field.
#[derive(Clone, Copy, Debug, Default)]
pub struct Linear;

impl ScanlineDeinterlacer for Linear {
    fn interpolate_scanline(
        &self,
        k: &dyn PixelKernels,
        out: &mut [u8],
        w: &InterpolateWindow<'_>,
        width: usize,
    ) {
        k.interpolate_scanline(out, w.f0.t, w.f0.b, width);
    }

    fn copy_scanline(&self, k: &dyn PixelKernels, out: &mut [u8], w: &CopyWindow<'_>, width: usize) {
        k.blit_scanline(out, w.f0.m, width);
    }
}

pub(crate) fn method() -> Method {
    Method::scanline("Linear Interpolation", "Linear", 1, Linear).with_description(
        "Expands each field independently without blurring or copying in time. \
         Low CPU, television-like quality at the field rate.",
    )
}
