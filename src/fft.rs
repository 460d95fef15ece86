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
//! FFT-accelerated linear convolution (C7), built on the same `zaft`
//! executors the CWT machinery already uses through [`CwtSample::make_fft`].
//! Used by the CWT direct/FFT dispatcher (C8), the adaptive padding
//! periodicity detector (C6), and available to denoising (C10) for
//! large-kernel work.
use crate::err::{VectorWaveError, try_vec};
use crate::sample::CwtSample;
use num_complex::Complex;
use num_traits::{AsPrimitive, Zero};
use zaft::FftDirection;

/// Below this convolution output length, a direct time-domain sum beats the
/// fixed overhead of two forward transforms and one inverse transform.
pub const FFT_CROSSOVER: usize = 1024;

pub fn should_use_fft(output_len: usize) -> bool {
    output_len >= FFT_CROSSOVER
}

fn next_pow2(n: usize) -> usize {
    let mut p = 1usize;
    while p < n {
        p <<= 1;
    }
    p
}

/// Linear convolution `x * w` (length `x.len() + w.len() - 1`), computed via
/// zero-padded FFT: `ifft(fft(x) * fft(w))`. Mathematically identical to a
/// direct time-domain sum, just computed in O(n log n) instead of O(n*m) --
/// this is what lets the FFT and direct CWT paths agree to numerical
/// tolerance rather than needing separate correctness arguments.
pub fn linear_convolve<T>(x: &[T], w: &[T]) -> Result<Vec<T>, VectorWaveError>
where
    T: CwtSample,
    f64: AsPrimitive<T>,
    usize: AsPrimitive<T>,
{
    if x.is_empty() || w.is_empty() {
        return Err(VectorWaveError::InvalidArgument(
            "linear_convolve operands must be non-empty".to_string(),
        ));
    }
    let out_len = x.len() + w.len() - 1;
    let padded = next_pow2(out_len);

    let mut xf: Vec<Complex<T>> = try_vec![Complex::zero(); padded];
    for (dst, &src) in xf.iter_mut().zip(x.iter()) {
        *dst = Complex::new(src, T::zero());
    }
    let mut wf: Vec<Complex<T>> = try_vec![Complex::zero(); padded];
    for (dst, &src) in wf.iter_mut().zip(w.iter()) {
        *dst = Complex::new(src, T::zero());
    }

    let forward = T::make_fft(padded, FftDirection::Forward)?;
    let inverse = T::make_fft(padded, FftDirection::Inverse)?;
    forward.execute(&mut xf).map_err(|e| VectorWaveError::FftError(e.to_string()))?;
    forward.execute(&mut wf).map_err(|e| VectorWaveError::FftError(e.to_string()))?;

    let mut product: Vec<Complex<T>> = try_vec![Complex::zero(); padded];
    for ((dst, a), b) in product.iter_mut().zip(xf.iter()).zip(wf.iter()) {
        *dst = *a * *b;
    }
    inverse
        .execute(&mut product)
        .map_err(|e| VectorWaveError::FftError(e.to_string()))?;

    let scale: T = (1.0f64 / padded as f64).as_();
    let out = product[..out_len].iter().map(|c| c.re * scale).collect();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn direct_convolve(x: &[f64], w: &[f64]) -> Vec<f64> {
        let out_len = x.len() + w.len() - 1;
        let mut out = vec![0.0; out_len];
        for (i, &xv) in x.iter().enumerate() {
            for (j, &wv) in w.iter().enumerate() {
                out[i + j] += xv * wv;
            }
        }
        out
    }

    #[test]
    fn fft_convolution_matches_direct_convolution() {
        let x: Vec<f64> = (0..37).map(|i| (i as f64 * 0.3).sin()).collect();
        let w: Vec<f64> = (0..11).map(|i| 1.0 / (i as f64 + 1.0)).collect();
        let direct = direct_convolve(&x, &w);
        let fft = linear_convolve(&x, &w).unwrap();
        assert_eq!(direct.len(), fft.len());
        for (a, b) in direct.iter().zip(fft.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-8);
        }
    }

    #[test]
    fn rejects_empty_operand() {
        assert!(linear_convolve::<f64>(&[], &[1.0]).is_err());
    }
}
