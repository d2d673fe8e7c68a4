use crate::foundation::core::{out_row, row_bytes};
use crate::kernels::PixelKernels;

/// Duration of one 24 fps frame in 90 kHz ticks.
pub const FPS_24_DURATION: i64 = 3754;
/// Film-mode frames emitted between two timestamped ones.
pub(crate) const FRAMES_TO_SYNC: u32 = 20;

/// Retimes film-mode output to a steady 24 fps.
///
/// Only one frame in every [`FRAMES_TO_SYNC`] keeps its timestamp; the rest are left for the
/// presenter to schedule from the fixed duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct JudderClock {
    counter: u32,
}

impl JudderClock {
    /// Timestamp and duration for the next produced film-mode frame.
    pub(crate) fn retime(&mut self, pts: i64) -> (i64, i64) {
        self.counter = self.counter.saturating_add(1);
        if pts != 0 && self.counter > FRAMES_TO_SYNC {
            self.counter = 0;
            (pts, FPS_24_DURATION)
        } else {
            (0, FPS_24_DURATION)
        }
    }

    #[cfg(test)]
    pub(crate) fn counter(&self) -> u32 {
        self.counter
    }
}

/// Vertical 3-3-2 chroma filter over a whole frame, in place.
///
/// Each scanline is filtered against the already-filtered scanline above it and the untouched
/// scanline below; the edges reuse the scanline itself. Luma is left alone.
pub(crate) fn apply_chroma_filter(
    k: &dyn PixelKernels,
    data: &mut [u8],
    stride: usize,
    width: usize,
    height: usize,
) {
    let n = row_bytes(width);
    let mut above = vec![0u8; n];
    let mut mid = vec![0u8; n];
    let mut below = vec![0u8; n];

    for y in 0..height {
        mid.copy_from_slice(&data[y * stride..y * stride + n]);
        if y == 0 {
            above.copy_from_slice(&mid);
        }
        if y + 1 < height {
            below.copy_from_slice(&data[(y + 1) * stride..(y + 1) * stride + n]);
        } else {
            below.copy_from_slice(&mid);
        }
        let row = out_row(data, stride, y, width);
        k.vfilter_chroma_332_scanline(row, &mid, &above, &below, width);
        above.copy_from_slice(row);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/post.rs"]
mod tests;
