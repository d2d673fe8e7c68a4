use super::*;
use crate::kernels::ScalarKernels;

const W: usize = 4;
const H: usize = 6;
const STRIDE: usize = W * 2;

fn frame_with_rows(even: u8, odd: u8) -> Vec<u8> {
    let mut f = vec![0u8; STRIDE * H];
    for (y, row) in f.chunks_mut(STRIDE).enumerate() {
        row.fill(if y % 2 == 0 { even } else { odd });
    }
    f
}

fn run(
    cur: &[u8],
    prev: &[u8],
    prev2: &[u8],
    bottom_field: bool,
    second_field: bool,
    parallel: bool,
) -> Vec<u8> {
    let history = FieldHistory::new(
        FrameSlot::new(cur, STRIDE),
        FrameSlot::new(prev, STRIDE),
        FrameSlot::new(prev2, STRIDE),
    );
    let req = FrameRequest {
        bottom_field,
        second_field,
        width: W,
        height: H,
        parallel,
    };
    let mut out = vec![0u8; STRIDE * H];
    Greedy2Frame.deinterlace_frame(&ScalarKernels, &mut out, STRIDE, &history, &req);
    out
}

#[test]
fn still_content_weaves_back_the_original_frame() {
    let f = frame_with_rows(10, 90);
    for (bottom, second) in [(false, false), (true, true), (false, true), (true, false)] {
        assert_eq!(run(&f, &f, &f, bottom, second, false), f);
    }
}

#[test]
fn motion_falls_back_to_bob_of_the_verbatim_field() {
    let cur = frame_with_rows(200, 200);
    let prev = frame_with_rows(100, 100);
    // First field of a top-field request shows the previous frame's bottom field.
    let out = run(&cur, &prev, &prev, false, false, false);
    assert!(out.iter().all(|&b| b == 100));
}

#[test]
fn second_field_weaves_still_rows_and_bobs_moving_ones() {
    let cur = frame_with_rows(10, 250);

    let still = run(&cur, &cur, &cur, true, true, false);
    assert_eq!(still, cur);

    // Odd rows moved (250 vs 20), so they are bobbed from the verbatim even rows.
    let prev = frame_with_rows(10, 20);
    let moved = run(&cur, &prev, &prev, true, true, false);
    assert!(moved.iter().all(|&b| b == 10));
}

#[test]
fn parallel_rows_match_sequential_rows() {
    let mut cur = vec![0u8; STRIDE * H];
    let mut prev = vec![0u8; STRIDE * H];
    let mut prev2 = vec![0u8; STRIDE * H];
    for i in 0..cur.len() {
        cur[i] = (i * 37 % 251) as u8;
        prev[i] = (i * 11 % 13) as u8 + 100;
        prev2[i] = (i * 7 % 5) as u8 + 100;
    }
    for bottom in [false, true] {
        for second in [false, true] {
            assert_eq!(
                run(&cur, &prev, &prev2, bottom, second, true),
                run(&cur, &prev, &prev2, bottom, second, false)
            );
        }
    }
}

#[test]
fn descriptor_flags() {
    let m = method();
    assert_eq!(m.short_name, "Greedy2Frame");
    assert_eq!(m.fields_required, 4);
    assert!(m.delays_field);
    assert!(!m.scanline_mode());
}
