use crate::foundation::core::{FieldHistory, FrameSlot, out_row};
use crate::kernels::PixelKernels;
use crate::method::{Aligned, CopyWindow, InterpolateWindow, ScanlineDeinterlacer, Straddle};

/// Opposite-field scanline above `y`, mirrored below it on the first pass.
fn above<'a>(f: &FrameSlot<'a>, y: usize, first: bool) -> &'a [u8] {
    if first { f.row(y + 1) } else { f.row(y - 1) }
}

/// Opposite-field scanline two below `y + 1`, clamped on the last pass.
fn below<'a>(f: &FrameSlot<'a>, y: usize, last: bool) -> &'a [u8] {
    if last { f.row(y + 1) } else { f.row(y + 3) }
}

fn aligned<'a>(f: &FrameSlot<'a>, y: usize, last: bool) -> Aligned<'a> {
    Aligned {
        tt: f.row(y),
        m: f.row(y + 2),
        bb: if last { f.row(y + 2) } else { f.row(y + 4) },
    }
}

/// Drive a scanline method over one output field.
///
/// The first scanline of the field (and, for bottom fields, the one above it) and the last
/// scanline of top fields are duplicated from the current field. Every pass in between writes
/// one interpolated and one copied scanline and advances by two input scanlines.
#[allow(clippy::too_many_arguments)]
pub(crate) fn run(
    k: &dyn PixelKernels,
    algo: &dyn ScanlineDeinterlacer,
    out: &mut [u8],
    out_stride: usize,
    history: &FieldHistory<'_>,
    bottom_field: bool,
    second_field: bool,
    width: usize,
    height: usize,
) {
    let cur = &history.current;
    let last = &history.previous;
    let opposite = if second_field { cur } else { last };
    let opposite_old = if second_field {
        last
    } else {
        &history.second_previous
    };

    let base = usize::from(bottom_field);
    let mut o = 0;
    if bottom_field {
        k.blit_scanline(out_row(out, out_stride, o, width), cur.row(1), width);
        o += 1;
    }
    k.blit_scanline(out_row(out, out_stride, o, width), cur.row(base), width);
    o += 1;

    let passes = (height - 2) / 2;
    for n in 0..passes {
        let y = base + 2 * n;
        let first = n == 0;
        let last_pass = n + 1 == passes;

        let iw = InterpolateWindow {
            bottom_field,
            f0: Straddle {
                t: cur.row(y),
                b: cur.row(y + 2),
            },
            f1: Aligned {
                tt: above(opposite, y, first),
                m: opposite.row(y + 1),
                bb: below(opposite, y, last_pass),
            },
            f2: Straddle {
                t: last.row(y),
                b: last.row(y + 2),
            },
            f3: Aligned {
                tt: above(opposite_old, y, first),
                m: opposite_old.row(y + 1),
                bb: below(opposite_old, y, last_pass),
            },
        };
        algo.interpolate_scanline(k, out_row(out, out_stride, o, width), &iw, width);
        o += 1;

        let cw = CopyWindow {
            bottom_field,
            f0: aligned(cur, y, last_pass),
            f1: Straddle {
                t: opposite.row(y + 1),
                b: below(opposite, y, last_pass),
            },
            f2: aligned(last, y, last_pass),
            f3: Straddle {
                t: opposite_old.row(y + 1),
                b: below(opposite_old, y, last_pass),
            },
        };
        algo.copy_scanline(k, out_row(out, out_stride, o, width), &cw, width);
        o += 1;
    }

    if !bottom_field {
        k.blit_scanline(
            out_row(out, out_stride, o, width),
            cur.row(base + 2 * passes),
            width,
        );
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scanline.rs"]
mod tests;
