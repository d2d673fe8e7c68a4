use super::*;

const K: ScalarKernels = ScalarKernels;

#[test]
fn blit_copies_only_the_payload() {
    let src = [1u8, 2, 3, 4, 5, 6];
    let mut out = [0u8; 6];
    K.blit_scanline(&mut out, &src, 2);
    assert_eq!(out, [1, 2, 3, 4, 0, 0]);
}

#[test]
fn interpolate_truncates() {
    let mut out = [0u8; 2];
    K.interpolate_scanline(&mut out, &[10, 255], &[11, 255], 1);
    assert_eq!(out, [10, 255]);
}

#[test]
fn blend_endpoints_and_rounding() {
    let a = [0u8, 100];
    let b = [255u8, 200];
    let mut out = [0u8; 2];

    K.blend_scanline(&mut out, &a, &b, 1, 0);
    assert_eq!(out, a);
    K.blend_scanline(&mut out, &a, &b, 1, 256);
    assert_eq!(out, b);
    K.blend_scanline(&mut out, &a, &b, 1, 999);
    assert_eq!(out, b);
    K.blend_scanline(&mut out, &a, &b, 1, 64);
    // (0*192 + 255*64 + 128) >> 8 = 64, (100*192 + 200*64 + 128) >> 8 = 125
    assert_eq!(out, [64, 125]);
}

#[test]
fn quarter_blit_weights_three_to_one() {
    let mut out = [0u8; 2];
    K.quarter_blit_vertical_scanline(&mut out, &[0, 1], &[100, 2], 1);
    // (0 + 300 + 2) / 4 = 75, (1 + 6 + 2) / 4 = 2
    assert_eq!(out, [75, 2]);
}

#[test]
fn chroma_filter_leaves_luma_alone() {
    let mut out = [50u8, 60, 70, 80];
    let m = [0u8, 80, 0, 16];
    let t = [0u8, 80, 0, 16];
    let b = [0u8, 0, 0, 16];
    K.vfilter_chroma_332_scanline(&mut out, &m, &t, &b, 2);
    // (240 + 240 + 0) >> 3 = 60, 16 stays 16
    assert_eq!(out, [50, 60, 70, 16]);
}

#[test]
fn diff_factor_uses_luma_of_four_pixel_groups() {
    let cur = [40u8, 128, 40, 128, 40, 128, 40, 128, 9, 9];
    let old = [0u8, 0, 0, 0, 0, 0, 0, 0, 0, 0];
    // (40 - 0)^2 >> 6 = 25; the trailing pixel is outside any group.
    assert_eq!(K.diff_factor_scanline(&cur, &old, 5), 25);
    assert_eq!(K.diff_factor_scanline(&old, &cur, 5), 25);
    assert_eq!(K.diff_factor_scanline(&cur, &cur, 5), 0);
    assert_eq!(K.diff_factor_scanline(&cur, &old, 3), 0);
}
