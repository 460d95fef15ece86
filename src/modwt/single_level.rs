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
//! Single-level MODWT (C3): forward produces two length-`N` coefficient
//! streams (approximation + detail); inverse reconstructs the signal from
//! them.
use super::{convolve_forward, convolve_inverse, scale_filter, validate_signal, zeros};
use crate::err::VectorWaveError;
use crate::wavelets::discrete::{BoundaryMode, Wavelet};

/// Result of a single-level forward MODWT: equal-length approximation and
/// detail coefficient streams.
#[derive(Debug, Clone, PartialEq)]
pub struct ModwtResult {
    pub approximation: Vec<f64>,
    pub detail: Vec<f64>,
}

/// `forward(x, wavelet, mode) -> (A, D)` (spec §4.3). Level-1 uses the
/// MODWT-scaled filters directly, with no upsampling.
pub fn forward(x: &[f64], wavelet: &Wavelet, mode: BoundaryMode) -> Result<ModwtResult, VectorWaveError> {
    validate_signal(x)?;
    let n = x.len();
    let l = wavelet.support_width();
    if n < l {
        return Err(VectorWaveError::InvalidConfiguration(format!(
            "signal length {n} is shorter than the filter support {l}"
        )));
    }
    let h = scale_filter(&wavelet.h0);
    let g = scale_filter(&wavelet.g0);
    let mut a = zeros(n)?;
    let mut d = zeros(n)?;
    convolve_forward(&mut a, x, &h, 1, mode);
    convolve_forward(&mut d, x, &g, 1, mode);
    Ok(ModwtResult { approximation: a, detail: d })
}

/// Array-slice variant (§4.3): processes a contiguous window `x[offset ..
/// offset+length)` without copying the caller's buffer; the returned
/// coefficient arrays are owned by the caller just like [`forward`]'s.
pub fn forward_window(
    x: &[f64],
    offset: usize,
    length: usize,
    wavelet: &Wavelet,
    mode: BoundaryMode,
) -> Result<ModwtResult, VectorWaveError> {
    let end = offset
        .checked_add(length)
        .ok_or_else(|| VectorWaveError::InvalidArgument("offset + length overflows".to_string()))?;
    if end > x.len() {
        return Err(VectorWaveError::InvalidArgument(format!(
            "window [{offset}, {end}) is out of bounds for a signal of length {}",
            x.len()
        )));
    }
    forward(&x[offset..end], wavelet, mode)
}

/// `inverse(A, D, wavelet, mode) -> x` (spec §4.3).
pub fn inverse(a: &[f64], d: &[f64], wavelet: &Wavelet, mode: BoundaryMode) -> Result<Vec<f64>, VectorWaveError> {
    if a.len() != d.len() {
        return Err(VectorWaveError::InvalidArgument(
            "approximation and detail must have the same length".to_string(),
        ));
    }
    validate_signal(a)?;
    validate_signal(d)?;
    let n = a.len();
    let l = wavelet.support_width();
    if n < l {
        return Err(VectorWaveError::InvalidConfiguration(format!(
            "coefficient length {n} is shorter than the filter support {l}"
        )));
    }
    let h1 = scale_filter(&wavelet.h1);
    let g1 = scale_filter(&wavelet.g1);
    let mut x = zeros(n)?;
    convolve_inverse(&mut x, a, d, &h1, &g1, 1, mode);
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavelets::catalog;
    use approx::assert_abs_diff_eq;

    /// Scenario S1: Haar single-level, N=8.
    #[test]
    fn s1_haar_reconstructs_and_preserves_energy() {
        let x = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let haar = catalog::get("haar").unwrap();
        let result = forward(&x, &haar, BoundaryMode::Periodic).unwrap();
        assert_eq!(result.approximation.len(), 8);
        assert_eq!(result.detail.len(), 8);

        let recon = inverse(&result.approximation, &result.detail, &haar, BoundaryMode::Periodic).unwrap();
        for (a, b) in recon.iter().zip(x.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        }

        let energy: f64 = result
            .approximation
            .iter()
            .map(|v| v * v)
            .sum::<f64>()
            + result.detail.iter().map(|v| v * v).sum::<f64>();
        assert_abs_diff_eq!(energy, 204.0, epsilon = 1e-8);
    }

    #[test]
    fn perfect_reconstruction_holds_for_db4_periodic() {
        let db4 = catalog::get("db4").unwrap();
        let x: Vec<f64> = (0..64).map(|i| (i as f64 * 0.37).sin() + 0.1 * i as f64).collect();
        let result = forward(&x, &db4, BoundaryMode::Periodic).unwrap();
        let recon = inverse(&result.approximation, &result.detail, &db4, BoundaryMode::Periodic).unwrap();
        for (a, b) in recon.iter().zip(x.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        }
    }

    #[test]
    fn shift_invariance_holds_under_periodic_boundary() {
        let haar = catalog::get("haar").unwrap();
        let x: Vec<f64> = (0..16).map(|i| (i as f64).sin()).collect();
        let base = forward(&x, &haar, BoundaryMode::Periodic).unwrap();
        let shift = 3;
        let mut shifted = vec![0.0; x.len()];
        for (i, slot) in shifted.iter_mut().enumerate() {
            *slot = x[(i + x.len() - shift) % x.len()];
        }
        let shifted_result = forward(&shifted, &haar, BoundaryMode::Periodic).unwrap();
        for i in 0..x.len() {
            let expected_a = base.approximation[(i + x.len() - shift) % x.len()];
            let expected_d = base.detail[(i + x.len() - shift) % x.len()];
            assert_abs_diff_eq!(shifted_result.approximation[i], expected_a, epsilon = 1e-10);
            assert_abs_diff_eq!(shifted_result.detail[i], expected_d, epsilon = 1e-10);
        }
    }

    #[test]
    fn linearity_holds_for_modwt() {
        let haar = catalog::get("haar").unwrap();
        let x: Vec<f64> = (0..16).map(|i| (i as f64).cos()).collect();
        let y: Vec<f64> = (0..16).map(|i| (i as f64 * 0.5).sin()).collect();
        let alpha = 2.0;
        let beta = -0.5;
        let combined: Vec<f64> = x.iter().zip(y.iter()).map(|(a, b)| alpha * a + beta * b).collect();

        let fx = forward(&x, &haar, BoundaryMode::Periodic).unwrap();
        let fy = forward(&y, &haar, BoundaryMode::Periodic).unwrap();
        let fc = forward(&combined, &haar, BoundaryMode::Periodic).unwrap();

        for i in 0..16 {
            let expected_a = alpha * fx.approximation[i] + beta * fy.approximation[i];
            assert_abs_diff_eq!(fc.approximation[i], expected_a, epsilon = 1e-10);
        }
    }

    #[test]
    fn rejects_mismatched_coefficient_lengths() {
        let haar = catalog::get("haar").unwrap();
        let a = vec![0.0; 4];
        let d = vec![0.0; 5];
        assert!(inverse(&a, &d, &haar, BoundaryMode::Periodic).is_err());
    }

    #[test]
    fn rejects_non_finite_signal() {
        let haar = catalog::get("haar").unwrap();
        let x = [1.0, f64::NAN, 3.0, 4.0];
        assert!(matches!(
            forward(&x, &haar, BoundaryMode::Periodic),
            Err(VectorWaveError::InvalidSignal(_))
        ));
    }
}
