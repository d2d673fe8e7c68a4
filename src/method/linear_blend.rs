use crate::foundation::core::row_bytes;
use crate::kernels::PixelKernels;
use crate::method::{CopyWindow, InterpolateWindow, Method, ScanlineDeinterlacer};

/// Temporal blur: each output scanline mixes the current field with the opposite one.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearBlend;

fn blend_121(out: &mut [u8], t: &[u8], m: &[u8], b: &[u8], width: usize) {
    let n = row_bytes(width);
    for i in 0..n {
        let v = u16::from(t[i]) + u16::from(b[i]) + (u16::from(m[i]) << 1);
        out[i] = (v >> 2) as u8;
    }
}

impl ScanlineDeinterlacer for LinearBlend {
    fn interpolate_scanline(
        &self,
        _k: &dyn PixelKernels,
        out: &mut [u8],
        w: &InterpolateWindow<'_>,
        width: usize,
    ) {
        blend_121(out, w.f0.t, w.f1.m, w.f0.b, width);
    }

    fn copy_scanline(&self, _k: &dyn PixelKernels, out: &mut [u8], w: &CopyWindow<'_>, width: usize) {
        blend_121(out, w.f1.t, w.f0.m, w.f1.b, width);
    }
}

pub(crate) fn method() -> Method {
    Method::scanline("Linear Blend (mplayer)", "LinearBlend", 2, LinearBlend).with_description(
        "Avoids flicker by blurring consecutive frames of input. Evenly blurs content \
         for least flicker, with visible trails on fast motion.",
    )
}
