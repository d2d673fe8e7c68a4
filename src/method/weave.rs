use crate::kernels::PixelKernels;
use crate::method::{CopyWindow, InterpolateWindow, Method, ScanlineDeinterlacer};

/// Interleave the current field with the most recent opposite field.
#[derive(Clone, Copy, Debug, Default)]
pub struct Weave;

impl ScanlineDeinterlacer for Weave {
    fn interpolate_scanline(
        &self,
        k: &dyn PixelKernels,
        out: &mut [u8],
        w: &InterpolateWindow<'_>,
        width: usize,
    ) {
        k.blit_scanline(out, w.f1.m, width);
    }

    fn copy_scanline(&self, k: &dyn PixelKernels, out: &mut [u8], w: &CopyWindow<'_>, width: usize) {
        k.blit_scanline(out, w.f0.m, width);
    }
}

pub(crate) fn method() -> Method {
    Method::scanline("Weave Last Field", "Weave", 2, Weave).with_description(
        "Shows both fields together. Perfect for still or progressive material, \
         combs on motion.",
    )
}
