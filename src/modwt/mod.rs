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
//! The Maximal-Overlap Discrete Wavelet Transform: single-level (C3) and
//! multi-level (C4) forward/inverse, sharing one boundary-aware dilated
//! convolution kernel.
pub mod multi_level;
pub mod single_level;

use crate::err::{VectorWaveError, try_vec};
use crate::filter_arith::{FilterArithmeticFactory, SimdPolicy, should_vectorize};
use crate::wavelets::discrete::BoundaryMode;
use std::f64::consts::FRAC_1_SQRT_2;

pub use multi_level::MultiLevelModwtResult;
pub use single_level::ModwtResult;

/// MODWT-scales a classical DWT filter by `1/sqrt(2)` (spec §4.3).
pub(crate) fn scale_filter(h: &[f64]) -> Vec<f64> {
    h.iter().map(|&c| c * FRAC_1_SQRT_2).collect()
}

pub(crate) fn validate_signal(x: &[f64]) -> Result<(), VectorWaveError> {
    if x.is_empty() {
        return Err(VectorWaveError::InvalidArgument(
            "signal must not be empty".to_string(),
        ));
    }
    if x.iter().any(|v| !v.is_finite()) {
        return Err(VectorWaveError::InvalidSignal(
            "signal contains a non-finite sample".to_string(),
        ));
    }
    Ok(())
}

/// `J_max = floor(log2(N/L))`, the level cap from spec §4.4.
pub(crate) fn level_cap(n: usize, l: usize) -> usize {
    if n < l || l == 0 {
        return 0;
    }
    ((n as f64 / l as f64).log2()).floor().max(0.0) as usize
}

/// The forward dilated circular/boundary-aware convolution shared by every
/// MODWT level: `y[t] = sum_k taps[k] * x[(t - step*k)]`, with the
/// out-of-range behavior of `(t - step*k)` determined by `mode`. `step =
/// 2^(j-1)` implements the "insert zeros between taps" dilation of spec
/// §4.4 without ever materializing the dilated filter.
pub(crate) fn convolve_forward(dst: &mut [f64], x: &[f64], taps: &[f64], step: usize, mode: BoundaryMode) {
    let n = x.len();
    match mode {
        BoundaryMode::Periodic => {
            if should_vectorize::<f64>(n, SimdPolicy::Auto) {
                f64::filter_arithmetic().circular_convolve(dst, x, taps, step);
                return;
            }
            for (t, slot) in dst.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, &tap) in taps.iter().enumerate() {
                    let idx = crate::boundary_index::periodic_index(t as isize - (step * k) as isize, n);
                    acc += tap * x[idx];
                }
                *slot = acc;
            }
        }
        BoundaryMode::ZeroPadding => {
            for (t, slot) in dst.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, &tap) in taps.iter().enumerate() {
                    let raw = t as isize - (step * k) as isize;
                    if raw >= 0 && (raw as usize) < n {
                        acc += tap * x[raw as usize];
                    }
                }
                *slot = acc;
            }
        }
        BoundaryMode::Symmetric => {
            for (t, slot) in dst.iter_mut().enumerate() {
                let mut acc = 0.0;
                for (k, &tap) in taps.iter().enumerate() {
                    let raw = t as isize - (step * k) as isize;
                    let idx = crate::boundary_index::reflect_index(raw, n);
                    acc += tap * x[idx];
                }
                *slot = acc;
            }
        }
    }
}

/// The inverse counterpart of [`convolve_forward`]: `x[t] = sum_k h1[k] *
/// A[(t+step*k)] + sum_k g1[k] * D[(t+step*k)]` (spec §4.3/§4.4).
pub(crate) fn convolve_inverse(
    dst: &mut [f64],
    a: &[f64],
    d: &[f64],
    h1: &[f64],
    g1: &[f64],
    step: usize,
    mode: BoundaryMode,
) {
    let n = a.len();
    for (t, slot) in dst.iter_mut().enumerate() {
        let mut acc = 0.0;
        for (k, &tap) in h1.iter().enumerate() {
            let raw = t as isize + (step * k) as isize;
            let idx = match mode {
                BoundaryMode::Periodic => Some(crate::boundary_index::periodic_index(raw, n)),
                BoundaryMode::ZeroPadding => {
                    if (raw as usize) < n { Some(raw as usize) } else { None }
                }
                BoundaryMode::Symmetric => Some(crate::boundary_index::reflect_index(raw, n)),
            };
            if let Some(idx) = idx {
                acc += tap * a[idx];
            }
        }
        for (k, &tap) in g1.iter().enumerate() {
            let raw = t as isize + (step * k) as isize;
            let idx = match mode {
                BoundaryMode::Periodic => Some(crate::boundary_index::periodic_index(raw, n)),
                BoundaryMode::ZeroPadding => {
                    if (raw as usize) < n { Some(raw as usize) } else { None }
                }
                BoundaryMode::Symmetric => Some(crate::boundary_index::reflect_index(raw, n)),
            };
            if let Some(idx) = idx {
                acc += tap * d[idx];
            }
        }
        *slot = acc;
    }
}

pub(crate) fn zeros(n: usize) -> Result<Vec<f64>, VectorWaveError> {
    Ok(try_vec![0.0; n])
}
