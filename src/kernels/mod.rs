//! Packed 4:2:2 scanline primitives, selected once per process from the detected CPU features.

pub(crate) mod scalar;

use std::sync::Arc;

pub use scalar::ScalarKernels;

/// CPU capability bitmask used to tag methods and pick kernel implementations.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CpuFeatures(pub u32);

impl CpuFeatures {
    /// Portable code only.
    pub const NONE: Self = Self(0);
    /// x86 MMX.
    pub const MMX: Self = Self(1 << 0);
    /// x86 MMX extensions (SSE integer subset).
    pub const MMXEXT: Self = Self(1 << 1);
    /// x86 SSE2.
    pub const SSE2: Self = Self(1 << 2);
    /// x86 AVX2.
    pub const AVX2: Self = Self(1 << 3);
    /// ARM NEON.
    pub const NEON: Self = Self(1 << 4);
    /// Every known feature; use when filtering should only consider field depth.
    pub const ALL: Self = Self(0x1f);

    /// Features of the running CPU.
    pub fn detect() -> Self {
        #[allow(unused_mut)]
        let mut f = Self::NONE;
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            if std::arch::is_x86_feature_detected!("mmx") {
                f = f.union(Self::MMX);
            }
            if std::arch::is_x86_feature_detected!("sse") {
                f = f.union(Self::MMXEXT);
            }
            if std::arch::is_x86_feature_detected!("sse2") {
                f = f.union(Self::SSE2);
            }
            if std::arch::is_x86_feature_detected!("avx2") {
                f = f.union(Self::AVX2);
            }
        }
        #[cfg(target_arch = "aarch64")]
        {
            if std::arch::is_aarch64_feature_detected!("neon") {
                f = f.union(Self::NEON);
            }
        }
        f
    }

    /// Return `true` when every bit of `required` is present in `self`.
    pub fn contains(self, required: Self) -> bool {
        self.0 & required.0 == required.0
    }

    /// Bitwise union.
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Return `true` when no bit is set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Bits of `self` that are missing from `available`.
    pub fn missing_from(self, available: Self) -> Self {
        Self(self.0 & !available.0)
    }
}

impl std::ops::BitOr for CpuFeatures {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::fmt::Display for CpuFeatures {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const NAMES: [(CpuFeatures, &str); 5] = [
            (CpuFeatures::MMX, "mmx"),
            (CpuFeatures::MMXEXT, "mmxext"),
            (CpuFeatures::SSE2, "sse2"),
            (CpuFeatures::AVX2, "avx2"),
            (CpuFeatures::NEON, "neon"),
        ];
        if self.is_empty() {
            return f.write_str("none");
        }
        let mut first = true;
        for (bit, name) in NAMES {
            if self.contains(bit) {
                if !first {
                    f.write_str("+")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Scanline primitives over packed 4:2:2 data.
///
/// `width` is in pixels; every slice argument must hold at least `2 * width` bytes. Outputs are
/// written in full, inputs are never modified.
pub trait PixelKernels: Send + Sync + std::fmt::Debug {
    /// Implementation label for diagnostics.
    fn name(&self) -> &'static str;

    /// Copy one scanline.
    fn blit_scanline(&self, out: &mut [u8], src: &[u8], width: usize);

    /// Per-byte average `(top + bot) >> 1`.
    fn interpolate_scanline(&self, out: &mut [u8], top: &[u8], bot: &[u8], width: usize);

    /// Per-byte blend `src1 * (256 - pos) + src2 * pos`, rounded; `pos` is clamped to `0..=256`.
    fn blend_scanline(&self, out: &mut [u8], src1: &[u8], src2: &[u8], width: usize, pos: u32);

    /// Per-byte `(one + 3 * three + 2) / 4`.
    fn quarter_blit_vertical_scanline(
        &self,
        out: &mut [u8],
        one: &[u8],
        three: &[u8],
        width: usize,
    ) {
        self.blend_scanline(out, one, three, width, 192);
    }

    /// Vertical 3-3-2 filter of the chroma bytes: `(3 * t + 3 * m + 2 * b) >> 3`.
    ///
    /// Luma bytes of `out` are left untouched.
    fn vfilter_chroma_332_scanline(
        &self,
        out: &mut [u8],
        m: &[u8],
        t: &[u8],
        b: &[u8],
        width: usize,
    );

    /// Luma difference metric between two scanlines.
    ///
    /// Each group of four pixels contributes the squared difference of their rounded luma means,
    /// shifted right by 6.
    fn diff_factor_scanline(&self, cur: &[u8], old: &[u8], width: usize) -> u64;
}

/// Pick the kernel implementation for `features`.
///
/// Only the portable implementation ships today, so every feature set maps to it.
pub fn select_kernels(features: CpuFeatures) -> Arc<dyn PixelKernels> {
    let kernels: Arc<dyn PixelKernels> = Arc::new(ScalarKernels);
    tracing::debug!(
        features = %features,
        kernels = kernels.name(),
        "selected pixel kernels"
    );
    kernels
}

#[cfg(test)]
#[path = "../../tests/unit/kernels/mod.rs"]
mod tests;
