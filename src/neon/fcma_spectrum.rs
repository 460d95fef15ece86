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
//! `a * b.conj()` using the `fcma` (complex multiply-accumulate) NEON
//! extension instead of the shuffle-and-fma sequence in [`crate::neon::util`].
//! One rotate-270 instruction replaces the vtrn/vneg/vfma chain.
use crate::neon::util::{vfcmul_conj_f64, vfcmulq_conj_f32};
use crate::spetrum_arith::SpectrumArithmetic;
use num_complex::Complex;
use std::arch::aarch64::*;

#[derive(Default)]
pub(crate) struct FcmaSpectrumF32 {}

impl SpectrumArithmetic<f32> for FcmaSpectrumF32 {
    fn mul_by_b_conj_normalize(
        &self,
        dst: &mut [Complex<f32>],
        input: &[Complex<f32>],
        other: &[Complex<f32>],
        normalize_value: f32,
    ) {
        unsafe {
            let v_norm_factor = vdupq_n_f32(normalize_value);

            for ((dst, input), other) in dst
                .chunks_exact_mut(2)
                .zip(input.chunks_exact(2))
                .zip(other.chunks_exact(2))
            {
                let vd = vld1q_f32(input.as_ptr().cast());
                let vk = vld1q_f32(other.as_ptr().cast());
                let p = vmulq_f32(vfcmulq_conj_f32(vd, vk), v_norm_factor);
                vst1q_f32(dst.as_mut_ptr().cast(), p);
            }

            let dst_rem = dst.chunks_exact_mut(2).into_remainder();
            let input_rem = input.chunks_exact(2).remainder();
            let other_rem = other.chunks_exact(2).remainder();

            if let (Some(dst), Some(input), Some(other)) =
                (dst_rem.first_mut(), input_rem.first(), other_rem.first())
            {
                let vd = vld1_f32(input as *const Complex<f32> as *const f32);
                let vk = vld1_f32(other as *const Complex<f32> as *const f32);
                let p = vmul_f32(
                    crate::neon::util::vfcmul_conj_f32(vd, vk),
                    vget_low_f32(v_norm_factor),
                );
                vst1_f32(dst as *mut Complex<f32> as *mut f32, p);
            }
        }
    }
}

#[derive(Default)]
pub(crate) struct FcmaSpectrumF64 {}

impl SpectrumArithmetic<f64> for FcmaSpectrumF64 {
    fn mul_by_b_conj_normalize(
        &self,
        dst: &mut [Complex<f64>],
        input: &[Complex<f64>],
        other: &[Complex<f64>],
        normalize_value: f64,
    ) {
        unsafe {
            let v_norm_factor = vdupq_n_f64(normalize_value);

            for ((dst, input), other) in dst.iter_mut().zip(input.iter()).zip(other.iter()) {
                let vd = vld1q_f64(input as *const Complex<f64> as *const f64);
                let vk = vld1q_f64(other as *const Complex<f64> as *const f64);
                let p = vmulq_f64(vfcmul_conj_f64(vd, vk), v_norm_factor);
                vst1q_f64(dst as *mut Complex<f64> as *mut f64, p);
            }
        }
    }
}
