/*
 * // Copyright (c) VectorWave Contributors. All rights reserved.
 * //
 * // Redistribution and use in source and binary forms, with or without modification,
 * // are permitted provided that the following conditions are met:
 * //
 * // 1.  Redistributions of source code must retain the above copyright notice, this
 * // list of conditions and the following disclaimer.
 * //
 * // 2.  Redistributions in binary form must reproduce the above copyright notice,
 * // this list of conditions and the following disclaimer in the documentation
 * // and/or other materials provided with the distribution.
 * //
 * // 3.  Neither the name of the copyright holder nor the names of its
 * // contributors may be used to endorse or promote products derived from
 * // this software without specific prior written permission.
 * //
 * // THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * // AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * // IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * // DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * // FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * // DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * // SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * // CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * // OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * // OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
//! Scalar/SIMD dispatch for the MODWT's inner kernel: a dot-product of a
//! short filter against a circularly-indexed window of the signal. Mirrors
//! the shape of [`crate::spetrum_arith`]'s complex-spectrum dispatch, but
//! over real taps instead of complex spectra.
use std::sync::{Arc, OnceLock};

/// Below this signal length the vector path's setup overhead is not worth
/// it; §4.2's "small-signal threshold" default.
pub const SMALL_SIGNAL_THRESHOLD: usize = 64;

/// How the per-sample filter dot-product should be evaluated.
pub trait FilterArithmetic<T>: Send + Sync {
    /// `dst[t] = sum_k taps[k] * x[(t - step*k).rem_euclid(x.len())]`
    /// i.e. the circular convolution kernel from spec §4.2, with `step`
    /// the dilation stride (`2^(j-1)` at level `j`, `1` at level 1).
    fn circular_convolve(&self, dst: &mut [T], x: &[T], taps: &[T], step: usize);
}

/// Scalar axpy used by both the portable fallback and as the tail handler
/// for every vector kernel: `dst[i] += tap * src[i]`.
#[inline(always)]
pub(crate) fn axpy_scalar<T>(dst: &mut [T], src: &[T], tap: T)
where
    T: Copy + std::ops::Mul<Output = T> + std::ops::AddAssign,
{
    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d += tap * s;
    }
}

/// Splits a single filter tap's contribution into (at most) two contiguous,
/// non-wrapping axpy calls, turning the circular index `(t - shift) mod n`
/// into plain slice arithmetic so each tap can be vectorized as a straight
/// line scan instead of a per-element gather.
#[inline]
pub(crate) fn tap_segments(n: usize, shift: usize) -> [(usize, usize, usize); 2] {
    let shift = shift % n;
    if shift == 0 {
        [(0, n, 0), (n, n, 0)]
    } else {
        // dst[0..shift]   += tap * x[n-shift..n]
        // dst[shift..n]   += tap * x[0..n-shift]
        [(0, shift, n - shift), (shift, n, 0)]
    }
}

#[derive(Debug, Default)]
pub(crate) struct CommonFilterArithmetic;

impl<T> FilterArithmetic<T> for CommonFilterArithmetic
where
    T: Copy + Default + std::ops::Mul<Output = T> + std::ops::AddAssign,
{
    fn circular_convolve(&self, dst: &mut [T], x: &[T], taps: &[T], step: usize) {
        let n = x.len();
        for d in dst.iter_mut() {
            *d = T::default();
        }
        for (k, &tap) in taps.iter().enumerate() {
            let shift = step.wrapping_mul(k) % n;
            for (dst_lo, dst_hi, src_off) in tap_segments(n, shift) {
                axpy_scalar(&mut dst[dst_lo..dst_hi], &x[src_off..src_off + (dst_hi - dst_lo)], tap);
            }
        }
    }
}

pub trait FilterArithmeticFactory: Sized {
    fn filter_arithmetic() -> Arc<dyn FilterArithmetic<Self>>;
    /// Preferred SIMD lane count for this element type on the running CPU,
    /// used by the small-signal / lane-width dispatch policy in §4.2. `1`
    /// means "no vector path available", matching the scalar fallback.
    fn preferred_lanes() -> usize;
}

impl FilterArithmeticFactory for f32 {
    fn filter_arithmetic() -> Arc<dyn FilterArithmetic<Self>> {
        static Q: OnceLock<Arc<dyn FilterArithmetic<f32>>> = OnceLock::new();
        Q.get_or_init(|| {
            #[cfg(all(target_arch = "x86_64", feature = "avx"))]
            {
                if std::arch::is_x86_feature_detected!("avx2")
                    && std::arch::is_x86_feature_detected!("fma")
                {
                    return Arc::new(crate::avx::AvxFilterF32::default());
                }
            }
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            {
                if std::arch::is_x86_feature_detected!("sse4.2") {
                    return Arc::new(crate::sse::Sse42FilterF32::default());
                }
            }
            #[cfg(all(target_arch = "aarch64", feature = "neon"))]
            {
                return Arc::new(crate::neon::NeonFilterF32::default());
            }
            #[allow(unreachable_code)]
            Arc::new(CommonFilterArithmetic)
        })
        .clone()
    }

    fn preferred_lanes() -> usize {
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if std::arch::is_x86_feature_detected!("avx2") {
                return 8;
            }
        }
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        {
            if std::arch::is_x86_feature_detected!("sse4.2") {
                return 4;
            }
        }
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        {
            return 4;
        }
        #[allow(unreachable_code)]
        1
    }
}

impl FilterArithmeticFactory for f64 {
    fn filter_arithmetic() -> Arc<dyn FilterArithmetic<Self>> {
        static Q: OnceLock<Arc<dyn FilterArithmetic<f64>>> = OnceLock::new();
        Q.get_or_init(|| {
            #[cfg(all(target_arch = "x86_64", feature = "avx"))]
            {
                if std::arch::is_x86_feature_detected!("avx2")
                    && std::arch::is_x86_feature_detected!("fma")
                {
                    return Arc::new(crate::avx::AvxFilterF64::default());
                }
            }
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            {
                if std::arch::is_x86_feature_detected!("sse4.2") {
                    return Arc::new(crate::sse::Sse42FilterF64::default());
                }
            }
            #[cfg(all(target_arch = "aarch64", feature = "neon"))]
            {
                return Arc::new(crate::neon::NeonFilterF64::default());
            }
            #[allow(unreachable_code)]
            Arc::new(CommonFilterArithmetic)
        })
        .clone()
    }

    fn preferred_lanes() -> usize {
        #[cfg(all(target_arch = "x86_64", feature = "avx"))]
        {
            if std::arch::is_x86_feature_detected!("avx2") {
                return 4;
            }
        }
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        {
            if std::arch::is_x86_feature_detected!("sse4.2") {
                return 2;
            }
        }
        #[cfg(all(target_arch = "aarch64", feature = "neon"))]
        {
            return 2;
        }
        #[allow(unreachable_code)]
        1
    }
}

/// Dispatch policy from §4.2: vectorize when the CPU offers at least 2 lanes
/// and the signal clears the small-signal threshold; otherwise scalar. A
/// config switch lets callers force either path for debugging.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SimdPolicy {
    Auto,
    ForceScalar,
    ForceSimd,
}

impl Default for SimdPolicy {
    fn default() -> Self {
        SimdPolicy::Auto
    }
}

pub(crate) fn should_vectorize<T: FilterArithmeticFactory>(n: usize, policy: SimdPolicy) -> bool {
    match policy {
        SimdPolicy::ForceScalar => false,
        SimdPolicy::ForceSimd => true,
        SimdPolicy::Auto => T::preferred_lanes() >= 2 && n >= SMALL_SIGNAL_THRESHOLD,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_convolve_matches_hand_rolled_reference() {
        let x = [1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let taps = [0.5f64, 0.5];
        let mut dst = [0.0f64; 8];
        CommonFilterArithmetic.circular_convolve(&mut dst, &x, &taps, 1);
        let n = x.len();
        let expected: Vec<f64> = (0..n)
            .map(|t| {
                taps.iter()
                    .enumerate()
                    .map(|(k, &tap)| tap * x[(t + n - k % n) % n])
                    .sum()
            })
            .collect();
        for (a, b) in dst.iter().zip(expected.iter()) {
            assert!((a - b).abs() < 1e-12);
        }
    }
}
