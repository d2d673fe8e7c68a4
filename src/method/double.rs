use crate::kernels::PixelKernels;
use crate::method::{CopyWindow, InterpolateWindow, Method, ScanlineDeinterlacer};

/// Repeat each scanline of the current field.
#[derive(Clone, Copy, Debug, Default)]
pub struct LineDoubler;

impl ScanlineDeinterlacer for LineDoubler {
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
    Method::scanline("Line Doubler", "LineDoubler", 1, LineDoubler)
        .with_description("Doubles each scanline of the current field. Fastest, blockiest.")
}
