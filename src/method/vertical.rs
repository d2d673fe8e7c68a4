use crate::foundation::core::row_bytes;
use crate::kernels::PixelKernels;
use crate::method::{CopyWindow, InterpolateWindow, Method, ScanlineDeinterlacer};

/// Five-tap vertical FIR `[-1 4 2 4 -1] / 8` across both fields.
#[derive(Clone, Copy, Debug, Default)]
pub struct Vertical;

impl ScanlineDeinterlacer for Vertical {
    fn interpolate_scanline(
        &self,
        _k: &dyn PixelKernels,
        out: &mut [u8],
        w: &InterpolateWindow<'_>,
        width: usize,
    ) {
        let n = row_bytes(width);
        for i in 0..n {
            let sum = -i32::from(w.f1.tt[i])
                + (i32::from(w.f0.t[i]) << 2)
                + (i32::from(w.f1.m[i]) << 1)
                + (i32::from(w.f0.b[i]) << 2)
                - i32::from(w.f1.bb[i]);
            out[i] = ((sum + 4) >> 3).clamp(0, 255) as u8;
        }
    }

    fn copy_scanline(&self, k: &dyn PixelKernels, out: &mut [u8], w: &CopyWindow<'_>, width: usize) {
        k.blit_scanline(out, w.f0.m, width);
    }
}

pub(crate) fn method() -> Method {
    Method::scanline("Vertical Blend (ffmpeg)", "Vertical", 2, Vertical).with_description(
        "Blurs vertically, favouring the most recent field for less visible trails.",
    )
}
