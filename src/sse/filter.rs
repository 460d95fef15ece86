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
use crate::filter_arith::{axpy_scalar, tap_segments, FilterArithmetic};
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;

#[inline]
#[target_feature(enable = "sse4.2")]
unsafe fn axpy_f32(dst: &mut [f32], src: &[f32], tap: f32) {
    let vtap = _mm_set1_ps(tap);
    let mut chunks = dst.chunks_exact_mut(4).zip(src.chunks_exact(4));
    for (d, s) in &mut chunks {
        let vd = _mm_loadu_ps(d.as_ptr());
        let vs = _mm_loadu_ps(s.as_ptr());
        let r = _mm_add_ps(vd, _mm_mul_ps(vtap, vs));
        _mm_storeu_ps(d.as_mut_ptr(), r);
    }
    let dst_rem = dst.chunks_exact_mut(4).into_remainder();
    let src_rem = src.chunks_exact(4).remainder();
    axpy_scalar(dst_rem, src_rem, tap);
}

#[inline]
#[target_feature(enable = "sse4.2")]
unsafe fn axpy_f64(dst: &mut [f64], src: &[f64], tap: f64) {
    let vtap = _mm_set1_pd(tap);
    let mut chunks = dst.chunks_exact_mut(2).zip(src.chunks_exact(2));
    for (d, s) in &mut chunks {
        let vd = _mm_loadu_pd(d.as_ptr());
        let vs = _mm_loadu_pd(s.as_ptr());
        let r = _mm_add_pd(vd, _mm_mul_pd(vtap, vs));
        _mm_storeu_pd(d.as_mut_ptr(), r);
    }
    let dst_rem = dst.chunks_exact_mut(2).into_remainder();
    let src_rem = src.chunks_exact(2).remainder();
    axpy_scalar(dst_rem, src_rem, tap);
}

#[derive(Debug, Default)]
pub(crate) struct Sse42FilterF32 {}

impl FilterArithmetic<f32> for Sse42FilterF32 {
    fn circular_convolve(&self, dst: &mut [f32], x: &[f32], taps: &[f32], step: usize) {
        let n = x.len();
        dst.fill(0.0);
        for (k, &tap) in taps.iter().enumerate() {
            let shift = step.wrapping_mul(k) % n;
            for (dst_lo, dst_hi, src_off) in tap_segments(n, shift) {
                unsafe {
                    axpy_f32(
                        &mut dst[dst_lo..dst_hi],
                        &x[src_off..src_off + (dst_hi - dst_lo)],
                        tap,
                    );
                }
            }
        }
    }
}

#[derive(Debug, Default)]
pub(crate) struct Sse42FilterF64 {}

impl FilterArithmetic<f64> for Sse42FilterF64 {
    fn circular_convolve(&self, dst: &mut [f64], x: &[f64], taps: &[f64], step: usize) {
        let n = x.len();
        dst.fill(0.0);
        for (k, &tap) in taps.iter().enumerate() {
            let shift = step.wrapping_mul(k) % n;
            for (dst_lo, dst_hi, src_off) in tap_segments(n, shift) {
                unsafe {
                    axpy_f64(
                        &mut dst[dst_lo..dst_hi],
                        &x[src_off..src_off + (dst_hi - dst_lo)],
                        tap,
                    );
                }
            }
        }
    }
}
