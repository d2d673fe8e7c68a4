use crate::foundation::core::{FrameSlot, out_row};
use crate::kernels::PixelKernels;

/// Scanlines written by [`copied_field`] for a frame of `height` scanlines.
pub(crate) fn output_rows(height: usize) -> usize {
    1 + (height - 2) / 2
}

/// Half-height output of one field, each scanline blended 3:1 with its field neighbour.
pub(crate) fn copied_field(
    k: &dyn PixelKernels,
    out: &mut [u8],
    out_stride: usize,
    cur: &FrameSlot<'_>,
    bottom_field: bool,
    width: usize,
    height: usize,
) {
    let base = usize::from(bottom_field);
    let field_last = base + 2 * ((height - 1 - base) / 2);
    k.quarter_blit_vertical_scanline(
        out_row(out, out_stride, 0, width),
        cur.row((base + 2).min(field_last)),
        cur.row(base),
        width,
    );

    let passes = (height - 2) / 2;
    for n in 0..passes {
        let y = base + 2 * (n + 1);
        let row = out_row(out, out_stride, n + 1, width);
        if bottom_field {
            k.quarter_blit_vertical_scanline(row, cur.row(y - 2), cur.row(y), width);
        } else if n + 1 < passes {
            k.quarter_blit_vertical_scanline(row, cur.row(y + 2), cur.row(y), width);
        } else {
            k.blit_scanline(row, cur.row(y), width);
        }
    }
}
