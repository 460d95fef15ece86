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
//! Builds [`CommonCwtExecutor`] instances: works out the scale range from the
//! wavelet's own shape, lays out the scale grid, and wires up the FFT pair
//! and spectrum-arithmetic kernel for the requested element type.
use crate::cwt_executor::CommonCwtExecutor;
use crate::err::try_vec;
use crate::sample::CwtSample;
use crate::scale_bounds::find_min_max_scales;
use crate::scales::{linear_scales, log_piecewise_scales};
use crate::spetrum_arith::SpectrumArithmeticFactory;
use crate::{CwtExecutor, CwtOptions, CwtWavelet, ScaleType, VectorWaveError};
use log::trace;
use num_traits::AsPrimitive;
use std::sync::Arc;
use zaft::FftDirection;

/// Angular frequency bins for a length-`n` real FFT, in the layout `zaft`
/// produces them: `omega[k] = 2*pi*k/n` for the non-negative half, wrapping
/// to negative frequencies for `k > n/2`. This is the `xi` vector the CWT's
/// frequency-domain wavelet kernels are evaluated against.
pub(crate) fn gen_psi<T: CwtSample>(n: usize) -> Result<Vec<T>, VectorWaveError>
where
    usize: AsPrimitive<T>,
{
    if n == 0 {
        return Err(VectorWaveError::ZeroBaseSized);
    }
    let mut psi = try_vec![T::zero(); n];
    let scale = T::TWO_PI / n.as_();
    let half = n / 2;
    for (k, dst) in psi.iter_mut().enumerate() {
        *dst = if k <= half {
            k.as_() * scale
        } else {
            (k.as_() - n.as_()) * scale
        };
    }
    Ok(psi)
}

pub(crate) fn create_cwt<T: CwtSample + SpectrumArithmeticFactory>(
    wavelet: Arc<dyn CwtWavelet<T> + Send + Sync>,
    length: usize,
    scale_type: ScaleType,
    options: CwtOptions,
) -> Result<Arc<dyn CwtExecutor<T> + Send + Sync>, VectorWaveError>
where
    usize: AsPrimitive<T>,
    isize: AsPrimitive<T>,
    f64: AsPrimitive<T>,
{
    if length == 0 {
        return Err(VectorWaveError::ZeroBaseSized);
    }
    if options.nv == 0 {
        return Err(VectorWaveError::InvalidArgument(
            "`nv` must be at least 1".to_string(),
        ));
    }

    let bounds = find_min_max_scales(wavelet.clone(), 1e-1f64.as_())?;
    trace!(
        "cwt scale bounds for length {length}: [{}, {}]",
        bounds.min, bounds.max
    );

    let nv: T = options.nv.as_();
    let scales = match scale_type {
        ScaleType::Log => log_piecewise_scales(bounds.min, bounds.max, nv)?,
        ScaleType::Linear => linear_scales(bounds.min, bounds.max, nv)?,
    };

    let psi = gen_psi::<T>(length)?;
    let fft_forward = T::make_fft(length, FftDirection::Forward)?;
    let fft_inverse = T::make_fft(length, FftDirection::Inverse)?;
    let spectrum_arithmetic = T::spectrum_arithmetic();

    Ok(Arc::new(CommonCwtExecutor {
        wavelet,
        fft_forward,
        fft_inverse,
        spectrum_arithmetic,
        scales,
        psi,
        execution_length: length,
        l1_norm: options.l1_norm,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn psi_is_symmetric_about_nyquist() {
        let psi = gen_psi::<f64>(8).unwrap();
        assert_eq!(psi.len(), 8);
        assert_eq!(psi[0], 0.0);
        assert!(psi[4] > 0.0);
        assert!(psi[5] < 0.0);
        assert!((psi[1] + psi[7]).abs() < 1e-12);
    }

    #[test]
    fn zero_length_rejected() {
        assert!(gen_psi::<f64>(0).is_err());
    }
}
