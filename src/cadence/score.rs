use crate::foundation::core::FrameSlot;
use crate::kernels::PixelKernels;

/// Scanlines excluded at the top and bottom of the frame (overscan, captions).
const MARGIN: usize = 40;

/// Repeat magnitudes `(top, bottom)` between two frames.
///
/// Every fourth scanline inside the margins is compared; the top field uses that scanline and
/// the bottom field the one below it. Frames shorter than the margins score zero.
pub fn pulldown_scores(
    k: &dyn PixelKernels,
    current: &FrameSlot<'_>,
    previous: &FrameSlot<'_>,
    width: usize,
    height: usize,
) -> (u64, u64) {
    let mut top = 0u64;
    let mut bot = 0u64;
    for i in (0..height).step_by(4) {
        if i <= MARGIN || i + MARGIN >= height {
            continue;
        }
        top += k.diff_factor_scanline(current.row(i), previous.row(i), width);
        bot += k.diff_factor_scanline(current.row(i + 1), previous.row(i + 1), width);
    }
    (top, bot)
}

#[cfg(test)]
#[path = "../../tests/unit/cadence/score.rs"]
mod tests;
