use rayon::prelude::*;

use crate::foundation::core::{FieldHistory, FrameSlot, required_len, row_bytes};
use crate::kernels::PixelKernels;
use crate::method::{FrameDeinterlacer, FrameRequest, Method};

/// Half-difference above which a luma byte counts as moving.
const LUMA_THRESHOLD: u8 = 4;
/// Half-difference above which a chroma byte counts as moving.
const CHROMA_THRESHOLD: u8 = 8;

/// Two-frame greedy motion adaptation.
///
/// Output lags input by one field: the verbatim field is the most recent complete one, and each
/// missing scanline either weaves the two surrounding opposite-field samples or bobs the verbatim
/// field, per byte.
#[derive(Clone, Copy, Debug, Default)]
pub struct Greedy2Frame;

fn moving(a: u8, b: u8, i: usize) -> bool {
    let thr = if i % 2 == 0 {
        LUMA_THRESHOLD
    } else {
        CHROMA_THRESHOLD
    };
    (a.abs_diff(b) >> 1) > thr
}

fn avg_up(a: u8, b: u8) -> u8 {
    ((u16::from(a) + u16::from(b) + 1) >> 1) as u8
}

struct Fields<'a> {
    verbatim: FrameSlot<'a>,
    verbatim_old: FrameSlot<'a>,
    newer: FrameSlot<'a>,
    older: FrameSlot<'a>,
    verbatim_parity: usize,
    height: usize,
    width: usize,
}

impl Fields<'_> {
    fn render_row(&self, k: &dyn PixelKernels, y: usize, row: &mut [u8]) {
        if y % 2 == self.verbatim_parity {
            k.blit_scanline(row, self.verbatim.row(y), self.width);
            return;
        }

        let above = if y >= 1 { y - 1 } else { y + 1 };
        let below = if y + 1 < self.height { y + 1 } else { y - 1 };
        let (va, vb) = (self.verbatim.row(above), self.verbatim.row(below));
        let (oa, ob) = (self.verbatim_old.row(above), self.verbatim_old.row(below));
        let (n, o) = (self.newer.row(y), self.older.row(y));

        for i in 0..row_bytes(self.width) {
            let still_here = !moving(n[i], o[i], i);
            let still_near = !moving(va[i], oa[i], i) || !moving(vb[i], ob[i], i);
            row[i] = if still_here && still_near {
                avg_up(n[i], o[i])
            } else {
                avg_up(va[i], vb[i])
            };
        }
    }
}

impl FrameDeinterlacer for Greedy2Frame {
    fn deinterlace_frame(
        &self,
        k: &dyn PixelKernels,
        out: &mut [u8],
        out_stride: usize,
        history: &FieldHistory<'_>,
        req: &FrameRequest,
    ) {
        let (verbatim, newer, older, verbatim_old) = if req.second_field {
            (history.current, history.current, history.previous, history.previous)
        } else {
            (
                history.previous,
                history.current,
                history.previous,
                history.second_previous,
            )
        };
        let fields = Fields {
            verbatim,
            verbatim_old,
            newer,
            older,
            verbatim_parity: usize::from(!req.bottom_field),
            height: req.height,
            width: req.width,
        };

        let out = &mut out[..required_len(out_stride, req.width, req.height)];
        if req.parallel {
            out.par_chunks_mut(out_stride)
                .enumerate()
                .for_each(|(y, row)| fields.render_row(k, y, row));
        } else {
            for (y, row) in out.chunks_mut(out_stride).enumerate() {
                fields.render_row(k, y, row);
            }
        }
    }
}

pub(crate) fn method() -> Method {
    Method::frame("Greedy - 2-frame (DScaler)", "Greedy2Frame", 4, Greedy2Frame)
        .with_delays_field(true)
        .with_description(
            "Motion-adaptive weave-or-bob over two frames of history. Good on film and \
             slow motion; output lags input by one field.",
        )
}

#[cfg(test)]
#[path = "../../tests/unit/method/greedy2frame.rs"]
mod tests;
