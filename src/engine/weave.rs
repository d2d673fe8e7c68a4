use crate::cadence::phase::{FieldSource, Phase};
use crate::foundation::core::{FieldHistory, FrameSlot, out_row};
use crate::kernels::PixelKernels;

/// Interleave even scanlines of `top` with odd scanlines of `bot`.
pub(crate) fn merge_fields(
    k: &dyn PixelKernels,
    out: &mut [u8],
    out_stride: usize,
    top: &FrameSlot<'_>,
    bot: &FrameSlot<'_>,
    width: usize,
    height: usize,
) {
    for y in 0..height {
        let src = if y % 2 == 1 { bot.row(y) } else { top.row(y) };
        k.blit_scanline(out_row(out, out_stride, y, width), src, width);
    }
}

/// Rebuild the film frame that this field belongs to.
#[allow(clippy::too_many_arguments)]
pub(crate) fn weave_film_frame(
    k: &dyn PixelKernels,
    out: &mut [u8],
    out_stride: usize,
    history: &FieldHistory<'_>,
    phase: Phase,
    bottom_field: bool,
    width: usize,
    height: usize,
) {
    let (cur, prev) = (&history.current, &history.previous);
    let (top, bot) = match (bottom_field, phase.source(bottom_field)) {
        (false, FieldSource::Previous) => (prev, prev),
        (false, FieldSource::Current) => (cur, prev),
        (true, FieldSource::Previous) => (cur, prev),
        (true, FieldSource::Current) => (cur, cur),
    };
    merge_fields(k, out, out_stride, top, bot, width, height);
}
