use super::*;
use crate::kernels::ScalarKernels;

const W: usize = 8;
const STRIDE: usize = W * 2;

fn frame(height: usize, luma: impl Fn(usize) -> u8) -> Vec<u8> {
    let mut f = vec![128u8; STRIDE * height];
    for (y, row) in f.chunks_mut(STRIDE).enumerate() {
        for px in row.chunks_mut(2) {
            px[0] = luma(y);
        }
    }
    f
}

#[test]
fn identical_frames_score_zero() {
    let a = frame(120, |y| y as u8);
    let s = FrameSlot::new(&a, STRIDE);
    assert_eq!(pulldown_scores(&ScalarKernels, &s, &s, W, 120), (0, 0));
}

#[test]
fn only_sampled_rows_inside_margins_count() {
    let h = 100;
    let old = frame(h, |_| 0);
    // Rows 44..=56 step 4 are sampled (41..59 open range); their bottom partners are odd.
    let top_only = frame(h, |y| if y % 2 == 0 { 16 } else { 0 });
    let bot_only = frame(h, |y| if y % 2 == 1 { 16 } else { 0 });
    let edge_only = frame(h, |y| if y <= 40 || y >= 60 { 255 } else { 0 });

    let old = FrameSlot::new(&old, STRIDE);
    let per_row = 2 * ((16 * 16) >> 6);
    let k = &ScalarKernels;

    let (t, b) = pulldown_scores(k, &FrameSlot::new(&top_only, STRIDE), &old, W, h);
    assert_eq!((t, b), (4 * per_row, 0));
    let (t, b) = pulldown_scores(k, &FrameSlot::new(&bot_only, STRIDE), &old, W, h);
    assert_eq!((t, b), (0, 4 * per_row));
    assert_eq!(
        pulldown_scores(k, &FrameSlot::new(&edge_only, STRIDE), &old, W, h),
        (0, 0)
    );
}

#[test]
fn short_frames_score_zero() {
    let a = frame(80, |_| 0);
    let b = frame(80, |_| 200);
    let (sa, sb) = (FrameSlot::new(&a, STRIDE), FrameSlot::new(&b, STRIDE));
    assert_eq!(pulldown_scores(&ScalarKernels, &sa, &sb, W, 80), (0, 0));
}
