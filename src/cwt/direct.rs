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
//! The real-valued, time-domain half of the CWT engine (C8): direct
//! convolution against a finite-support kernel, dispatched to an
//! FFT-accelerated path above a size threshold. Both paths compute the same
//! linear convolution, so they agree to numerical tolerance "for free"
//! (spec invariant 10) rather than needing a separate correctness argument.
use crate::boundary_index::{periodic_index, reflect_index};
use crate::err::{VectorWaveError, try_vec};
use crate::executor::{Executor, ParallelStrategy, select_strategy};
use crate::fft::{linear_convolve, should_use_fft};
use crate::wavelets::discrete::BoundaryMode;
use rayon::prelude::*;

/// A real-valued continuous wavelet sampled directly in the time domain.
pub trait TimeDomainWavelet: Sync {
    /// `psi(t)`, the mother wavelet evaluated at a real argument.
    fn evaluate(&self, t: f64) -> f64;
}

/// The Mexican hat / DOG(2) wavelet: `psi(t) = C * (1 - t^2) * exp(-t^2/2)`,
/// `C = 2 / (sqrt(3) * pi^(1/4))`.
#[derive(Debug, Default, Copy, Clone)]
pub struct MexicanHat;

impl TimeDomainWavelet for MexicanHat {
    fn evaluate(&self, t: f64) -> f64 {
        const NORM: f64 = 0.8673250705840776; // 2 / (sqrt(3) * pi^(1/4))
        NORM * (1.0 - t * t) * (-0.5 * t * t).exp()
    }
}

/// Builds the finite-support kernel `psi_s[n] = psi(-n/s) / sqrt(s)` for `n
/// in [-ceil(4s), ceil(4s)]` (spec §4.8), returned in array order (index 0
/// corresponds to `n = -half`) alongside `half`.
fn sample_kernel(wavelet: &dyn TimeDomainWavelet, scale: f64) -> (Vec<f64>, usize) {
    let half = (4.0 * scale).ceil().max(1.0) as usize;
    let inv_sqrt_s = 1.0 / scale.sqrt();
    let kernel: Vec<f64> = (-(half as isize)..=(half as isize))
        .map(|n| wavelet.evaluate(-(n as f64) / scale) * inv_sqrt_s)
        .collect();
    (kernel, half)
}

/// Maps a kernel-relative offset `raw` to a sample index under `mode`,
/// `None` meaning "contributes zero" (only possible under `ZeroPadding`).
fn boundary_map(raw: isize, n: usize, mode: BoundaryMode) -> Option<usize> {
    match mode {
        BoundaryMode::Periodic => Some(periodic_index(raw, n)),
        BoundaryMode::ZeroPadding => {
            if raw >= 0 && (raw as usize) < n { Some(raw as usize) } else { None }
        }
        BoundaryMode::Symmetric => Some(reflect_index(raw, n)),
    }
}

/// `c[s, tau] = sum_n x[tau + n] * psi_s[n]`, out-of-range samples resolved
/// per `mode` (spec §4.8's boundary-mode parameter, mirroring the MODWT's
/// own convolution in [`crate::modwt::convolve_forward`]).
fn convolve_direct(x: &[f64], kernel: &[f64], half: usize, mode: BoundaryMode) -> Vec<f64> {
    let n = x.len();
    (0..n)
        .map(|tau| {
            let mut acc = 0.0;
            for (i, &k) in kernel.iter().enumerate() {
                let offset = i as isize - half as isize;
                if let Some(idx) = boundary_map(tau as isize + offset, n, mode) {
                    acc += x[idx] * k;
                }
            }
            acc
        })
        .collect()
}

/// Same result as [`convolve_direct`] under `BoundaryMode::ZeroPadding`,
/// computed as a linear convolution of `x` with the time-reversed kernel:
/// for an odd-length kernel centered at `half`, `correlation(x, k)[tau] ==
/// convolve(x, reverse(k))[tau + half]`. The other boundary modes would
/// need a circular or reflected FFT convolution to match exactly, so the
/// caller only takes this path when `mode == ZeroPadding`.
fn convolve_via_fft(x: &[f64], kernel: &[f64], half: usize) -> Result<Vec<f64>, VectorWaveError> {
    let mut reversed = kernel.to_vec();
    reversed.reverse();
    let full = linear_convolve(x, &reversed)?;
    Ok(full[half..half + x.len()].to_vec())
}

fn row_for_scale(
    x: &[f64],
    wavelet: &dyn TimeDomainWavelet,
    scale: f64,
    mode: BoundaryMode,
) -> Result<Vec<f64>, VectorWaveError> {
    if scale <= 0.0 {
        return Err(VectorWaveError::InvalidArgument(format!("scale {scale} must be positive")));
    }
    let (kernel, half) = sample_kernel(wavelet, scale);
    if mode == BoundaryMode::ZeroPadding && should_use_fft(x.len() + kernel.len() - 1) {
        convolve_via_fft(x, &kernel, half)
    } else {
        Ok(convolve_direct(x, &kernel, half, mode))
    }
}

/// `analyze(x, scales) -> matrix[S x N]` (spec §4.8). Runs sequentially;
/// see [`analyze_with_executor`] for the parallel variants.
pub fn analyze(
    x: &[f64],
    wavelet: &dyn TimeDomainWavelet,
    scales: &[f64],
    mode: BoundaryMode,
) -> Result<Vec<Vec<f64>>, VectorWaveError> {
    analyze_with_executor(x, wavelet, scales, mode, None)
}

/// Same contract as [`analyze`], dispatching across scales (and, for long
/// signals with few scales, across time chunks within a scale -- each
/// output sample only reads the original signal, so no halo exchange is
/// needed between chunks) per the selector from spec §4.4/§4.8.
pub fn analyze_with_executor(
    x: &[f64],
    wavelet: &dyn TimeDomainWavelet,
    scales: &[f64],
    mode: BoundaryMode,
    executor: Option<&Executor>,
) -> Result<Vec<Vec<f64>>, VectorWaveError> {
    if x.is_empty() {
        return Err(VectorWaveError::InvalidArgument("signal must not be empty".to_string()));
    }
    if scales.is_empty() {
        return Err(VectorWaveError::InvalidArgument("scales must not be empty".to_string()));
    }
    let n = x.len();
    let strategy = executor.map(|_| select_strategy(n, scales.len())).unwrap_or(ParallelStrategy::Sequential);

    match strategy {
        ParallelStrategy::ScaleParallel | ParallelStrategy::HybridParallel => scales
            .par_iter()
            .map(|&s| row_for_scale(x, wavelet, s, mode))
            .collect(),
        ParallelStrategy::ChunkParallel => scales
            .iter()
            .map(|&s| row_for_scale_chunked(x, wavelet, s, mode))
            .collect(),
        ParallelStrategy::Sequential => scales.iter().map(|&s| row_for_scale(x, wavelet, s, mode)).collect(),
    }
}

fn row_for_scale_chunked(
    x: &[f64],
    wavelet: &dyn TimeDomainWavelet,
    scale: f64,
    mode: BoundaryMode,
) -> Result<Vec<f64>, VectorWaveError> {
    if scale <= 0.0 {
        return Err(VectorWaveError::InvalidArgument(format!("scale {scale} must be positive")));
    }
    let n = x.len();
    let (kernel, half) = sample_kernel(wavelet, scale);
    let mut out = try_vec![0.0; n];
    let chunk = (n / rayon::current_num_threads().max(1)).max(1);
    out.par_chunks_mut(chunk).enumerate().for_each(|(ci, slice)| {
        let offset = ci * chunk;
        for (i, slot) in slice.iter_mut().enumerate() {
            let tau = offset + i;
            let mut acc = 0.0;
            for (k, &tap) in kernel.iter().enumerate() {
                let o = k as isize - half as isize;
                if let Some(idx) = boundary_map(tau as isize + o, n, mode) {
                    acc += x[idx] * tap;
                }
            }
            *slot = acc;
        }
    });
    Ok(out)
}

/// A complex-valued continuous wavelet sampled directly in the time domain
/// (the Paul family is genuinely complex; it has no real-valued form).
/// Always takes the direct-convolution path -- the FFT convolution theorem
/// applies equally to complex kernels, but `zaft`'s executors here are
/// wired for the real CWT path's `linear_convolve`, and direct convolution
/// at CWT kernel sizes (a few hundred taps at most) is already cheap.
pub trait ComplexTimeDomainWavelet: Sync {
    fn evaluate(&self, t: f64) -> num_complex::Complex<f64>;
}

fn sample_complex_kernel(
    wavelet: &dyn ComplexTimeDomainWavelet,
    scale: f64,
) -> (Vec<num_complex::Complex<f64>>, usize) {
    let half = (4.0 * scale).ceil().max(1.0) as usize;
    let inv_sqrt_s = 1.0 / scale.sqrt();
    let kernel = (-(half as isize)..=(half as isize))
        .map(|n| wavelet.evaluate(-(n as f64) / scale) * inv_sqrt_s)
        .collect();
    (kernel, half)
}

fn complex_row_for_scale(
    x: &[f64],
    wavelet: &dyn ComplexTimeDomainWavelet,
    scale: f64,
    mode: BoundaryMode,
) -> Result<Vec<num_complex::Complex<f64>>, VectorWaveError> {
    if scale <= 0.0 {
        return Err(VectorWaveError::InvalidArgument(format!("scale {scale} must be positive")));
    }
    let n = x.len();
    let (kernel, half) = sample_complex_kernel(wavelet, scale);
    Ok((0..n)
        .map(|tau| {
            let mut acc = num_complex::Complex::new(0.0, 0.0);
            for (i, &k) in kernel.iter().enumerate() {
                let offset = i as isize - half as isize;
                if let Some(idx) = boundary_map(tau as isize + offset, n, mode) {
                    acc += k * x[idx];
                }
            }
            acc
        })
        .collect())
}

/// The complex counterpart of [`analyze`] for analytic wavelets such as
/// Paul, whose magnitude/phase both carry information the real CWT path
/// discards.
pub fn analyze_complex(
    x: &[f64],
    wavelet: &dyn ComplexTimeDomainWavelet,
    scales: &[f64],
    mode: BoundaryMode,
) -> Result<Vec<Vec<num_complex::Complex<f64>>>, VectorWaveError> {
    if x.is_empty() {
        return Err(VectorWaveError::InvalidArgument("signal must not be empty".to_string()));
    }
    if scales.is_empty() {
        return Err(VectorWaveError::InvalidArgument("scales must not be empty".to_string()));
    }
    scales.par_iter().map(|&s| complex_row_for_scale(x, wavelet, s, mode)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fft_path_agrees_with_direct_path() {
        let n = 1200;
        let x: Vec<f64> = (0..n).map(|i| (i as f64 * 0.05).sin()).collect();
        let scale = 6.0;
        let (kernel, half) = sample_kernel(&MexicanHat, scale);
        let direct = convolve_direct(&x, &kernel, half, BoundaryMode::ZeroPadding);
        let via_fft = convolve_via_fft(&x, &kernel, half).unwrap();
        let max_coeff = direct.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        for (a, b) in direct.iter().zip(via_fft.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-8 * max_coeff.max(1.0));
        }
    }

    /// Scenario S5: Mexican-hat on an impulse signal.
    #[test]
    fn s5_impulse_response_peaks_and_is_symmetric_about_the_impulse() {
        let n = 256;
        let mut x = vec![0.0; n];
        x[128] = 1.0;
        let scales = [1.0, 2.0, 4.0, 8.0];
        let result = analyze(&x, &MexicanHat, &scales, BoundaryMode::ZeroPadding).unwrap();
        for row in &result {
            let (peak_idx, _) = row
                .iter()
                .enumerate()
                .max_by(|(_, a), (_, b)| a.abs().partial_cmp(&b.abs()).unwrap())
                .unwrap();
            assert_eq!(peak_idx, 128);
            for offset in 1..20 {
                if 128 + offset < n && 128 >= offset {
                    assert_abs_diff_eq!(row[128 + offset], row[128 - offset], epsilon = 1e-10);
                }
            }
        }
    }

    #[test]
    fn rejects_non_positive_scale() {
        let x = vec![0.0; 16];
        assert!(analyze(&x, &MexicanHat, &[-1.0], BoundaryMode::ZeroPadding).is_err());
    }

    #[test]
    fn periodic_mode_wraps_instead_of_zero_padding() {
        let n = 64;
        let x: Vec<f64> = (0..n).map(|i| (i as f64 * 2.0 * std::f64::consts::PI / n as f64).sin()).collect();
        let periodic = analyze(&x, &MexicanHat, &[3.0], BoundaryMode::Periodic).unwrap();
        let zero = analyze(&x, &MexicanHat, &[3.0], BoundaryMode::ZeroPadding).unwrap();
        assert_ne!(periodic[0][0], zero[0][0]);
    }

    #[test]
    fn complex_paul_like_kernel_produces_nonzero_phase() {
        struct Probe;
        impl ComplexTimeDomainWavelet for Probe {
            fn evaluate(&self, t: f64) -> num_complex::Complex<f64> {
                num_complex::Complex::new(0.0, 1.0) * (-0.5 * t * t).exp()
            }
        }
        let n = 64;
        let mut x = vec![0.0; n];
        x[32] = 1.0;
        let result = analyze_complex(&x, &Probe, &[2.0], BoundaryMode::ZeroPadding).unwrap();
        assert!(result[0][32].im.abs() > 0.0);
    }
}
