use crate::foundation::core::row_bytes;
use crate::kernels::PixelKernels;

/// Portable reference kernels.
#[derive(Clone, Copy, Debug, Default)]
pub struct ScalarKernels;

fn luma_mean4(px: &[u8]) -> i64 {
    (i64::from(px[0]) + i64::from(px[2]) + i64::from(px[4]) + i64::from(px[6]) + 2) >> 2
}

impl PixelKernels for ScalarKernels {
    fn name(&self) -> &'static str {
        "scalar"
    }

    fn blit_scanline(&self, out: &mut [u8], src: &[u8], width: usize) {
        let n = row_bytes(width);
        out[..n].copy_from_slice(&src[..n]);
    }

    fn interpolate_scanline(&self, out: &mut [u8], top: &[u8], bot: &[u8], width: usize) {
        let n = row_bytes(width);
        for ((o, &t), &b) in out[..n].iter_mut().zip(&top[..n]).zip(&bot[..n]) {
            *o = ((u16::from(t) + u16::from(b)) >> 1) as u8;
        }
    }

    fn blend_scanline(&self, out: &mut [u8], src1: &[u8], src2: &[u8], width: usize, pos: u32) {
        let pos = pos.min(256);
        match pos {
            0 => self.blit_scanline(out, src1, width),
            256 => self.blit_scanline(out, src2, width),
            128 => self.interpolate_scanline(out, src1, src2, width),
            _ => {
                let n = row_bytes(width);
                let inv = 256 - pos;
                for ((o, &a), &b) in out[..n].iter_mut().zip(&src1[..n]).zip(&src2[..n]) {
                    *o = ((u32::from(a) * inv + u32::from(b) * pos + 0x80) >> 8) as u8;
                }
            }
        }
    }

    fn vfilter_chroma_332_scanline(
        &self,
        out: &mut [u8],
        m: &[u8],
        t: &[u8],
        b: &[u8],
        width: usize,
    ) {
        let n = row_bytes(width);
        for i in (1..n).step_by(2) {
            let v = 3 * u16::from(t[i]) + 3 * u16::from(m[i]) + 2 * u16::from(b[i]);
            out[i] = (v >> 3) as u8;
        }
    }

    fn diff_factor_scanline(&self, cur: &[u8], old: &[u8], width: usize) -> u64 {
        let groups = width / 4;
        let mut ret = 0u64;
        for g in 0..groups {
            let off = g * 8;
            let d = luma_mean4(&cur[off..off + 8]) - luma_mean4(&old[off..off + 8]);
            ret += ((d * d) >> 6) as u64;
        }
        ret
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/scalar.rs"]
mod tests;
