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
//! Multi-level (cascaded) MODWT (C4): `decompose`/`reconstruct`, the level
//! cap, and the parallelism selector from spec §4.4.
use super::{convolve_forward, convolve_inverse, level_cap, scale_filter, validate_signal, zeros};
use crate::err::VectorWaveError;
use crate::executor::{Executor, ParallelStrategy, select_strategy};
use crate::wavelets::discrete::{BoundaryMode, Wavelet};
use std::cell::Cell;
use rayon::prelude::*;

/// A cascaded MODWT decomposition: the final approximation `A_J` plus
/// details `D_1..D_J` (index 0 is the finest level), all length `N` (spec
/// §3). Detail arrays are mutable in place (for thresholding); `clear_caches`
/// discards the lazily-computed energy.
#[derive(Debug, Clone)]
pub struct MultiLevelModwtResult {
    pub levels: usize,
    pub approximation: Vec<f64>,
    pub details: Vec<Vec<f64>>,
    cached_energy: Cell<Option<f64>>,
}

impl MultiLevelModwtResult {
    /// Total energy `sum(A_J^2) + sum_j sum(D_j^2)`, memoized until the next
    /// mutation-implying `clear_caches` call.
    pub fn energy(&self) -> f64 {
        if let Some(e) = self.cached_energy.get() {
            return e;
        }
        let mut total: f64 = self.approximation.iter().map(|v| v * v).sum();
        for d in &self.details {
            total += d.iter().map(|v| v * v).sum::<f64>();
        }
        self.cached_energy.set(Some(total));
        total
    }

    /// Discards any lazily-computed derived values. Call after mutating
    /// `details` or `approximation` in place (e.g. thresholding).
    pub fn clear_caches(&mut self) {
        self.cached_energy.set(None);
    }
}

/// `decompose(x, J) -> (A_J, D_1..D_J)` (spec §4.4). Runs sequentially;
/// see [`decompose_with_executor`] for the parallel variants.
pub fn decompose(
    x: &[f64],
    wavelet: &Wavelet,
    mode: BoundaryMode,
    levels: usize,
) -> Result<MultiLevelModwtResult, VectorWaveError> {
    decompose_with_executor(x, wavelet, mode, levels, None)
}

/// Same contract as [`decompose`], but dispatches across an explicit
/// [`Executor`] when the parallelism selector calls for it. `executor =
/// None` forces the sequential path regardless of size.
pub fn decompose_with_executor(
    x: &[f64],
    wavelet: &Wavelet,
    mode: BoundaryMode,
    levels: usize,
    executor: Option<&Executor>,
) -> Result<MultiLevelModwtResult, VectorWaveError> {
    validate_signal(x)?;
    let n = x.len();
    let l = wavelet.support_width();
    let j_max = level_cap(n, l);
    if levels == 0 {
        return Err(VectorWaveError::InvalidArgument(
            "levels must be at least 1".to_string(),
        ));
    }
    if levels > j_max {
        return Err(VectorWaveError::InvalidConfiguration(format!(
            "levels {levels} exceeds J_max={j_max} for N={n}, L={l}"
        )));
    }

    let h = scale_filter(&wavelet.h0);
    let g = scale_filter(&wavelet.g0);

    // The approximation cascade is an inherent sequential dependency chain
    // (level j's input is level j-1's output), so it is always computed
    // in-line; it is the cheaper of the two convolutions to run J times.
    // Detail arrays and (when the selector calls for it) individual
    // convolution ranges within a level are where the independent work is.
    let strategy = executor
        .map(|_| select_strategy(n, levels))
        .unwrap_or(ParallelStrategy::Sequential);

    let mut approximations = Vec::with_capacity(levels + 1);
    approximations.push(x.to_vec());
    for j in 1..=levels {
        let step = 1usize << (j - 1);
        let mut next = zeros(n)?;
        convolve_level_dispatch(&mut next, approximations.last().unwrap(), &h, step, mode, strategy);
        approximations.push(next);
    }

    let details: Vec<Vec<f64>> = if matches!(strategy, ParallelStrategy::ScaleParallel | ParallelStrategy::HybridParallel) {
        (1..=levels)
            .into_par_iter()
            .map(|j| {
                let step = 1usize << (j - 1);
                let mut d = vec![0.0; n];
                convolve_forward(&mut d, &approximations[j - 1], &g, step, mode);
                d
            })
            .collect()
    } else {
        let mut out = Vec::with_capacity(levels);
        for j in 1..=levels {
            let step = 1usize << (j - 1);
            let mut d = zeros(n)?;
            convolve_level_dispatch(&mut d, &approximations[j - 1], &g, step, mode, strategy);
            out.push(d);
        }
        out
    };

    Ok(MultiLevelModwtResult {
        levels,
        approximation: approximations.pop().unwrap(),
        details,
        cached_energy: Cell::new(None),
    })
}

/// Convolves one level, optionally splitting the destination range across
/// chunks on a rayon scope (the `ChunkParallel`/`HybridParallel` arms of the
/// selector); every chunk reads the full source array (read-only), so no
/// boundary exchange is needed beyond what `mode` already encodes.
fn convolve_level_dispatch(
    dst: &mut [f64],
    src: &[f64],
    taps: &[f64],
    step: usize,
    mode: BoundaryMode,
    strategy: ParallelStrategy,
) {
    match strategy {
        ParallelStrategy::ChunkParallel | ParallelStrategy::HybridParallel => {
            let chunk = (dst.len() / rayon::current_num_threads().max(1)).max(1);
            dst.par_chunks_mut(chunk).enumerate().for_each(|(ci, slice)| {
                let offset = ci * chunk;
                for (i, slot) in slice.iter_mut().enumerate() {
                    let t = offset + i;
                    *slot = convolve_point(src, taps, step, t, mode);
                }
            });
        }
        _ => convolve_forward(dst, src, taps, step, mode),
    }
}

fn convolve_point(x: &[f64], taps: &[f64], step: usize, t: usize, mode: BoundaryMode) -> f64 {
    let n = x.len();
    let mut acc = 0.0;
    for (k, &tap) in taps.iter().enumerate() {
        let raw = t as isize - (step * k) as isize;
        let idx = match mode {
            BoundaryMode::Periodic => Some(crate::boundary_index::periodic_index(raw, n)),
            BoundaryMode::ZeroPadding => {
                if raw >= 0 && (raw as usize) < n { Some(raw as usize) } else { None }
            }
            BoundaryMode::Symmetric => Some(crate::boundary_index::reflect_index(raw, n)),
        };
        if let Some(idx) = idx {
            acc += tap * x[idx];
        }
    }
    acc
}

/// `reconstruct(result) -> x` (spec §4.4): combines levels `J` down to `1`
/// with the dilated reconstruction filters.
pub fn reconstruct(
    result: &MultiLevelModwtResult,
    wavelet: &Wavelet,
    mode: BoundaryMode,
) -> Result<Vec<f64>, VectorWaveError> {
    if result.details.len() != result.levels {
        return Err(VectorWaveError::InvalidArgument(
            "detail count does not match levels".to_string(),
        ));
    }
    let n = result.approximation.len();
    let h1 = scale_filter(&wavelet.h1);
    let g1 = scale_filter(&wavelet.g1);
    let mut approx = result.approximation.clone();
    for j in (1..=result.levels).rev() {
        let step = 1usize << (j - 1);
        let mut prev = zeros(n)?;
        convolve_inverse(&mut prev, &approx, &result.details[j - 1], &h1, &g1, step, mode);
        approx = prev;
    }
    Ok(approx)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavelets::catalog;
    use approx::assert_abs_diff_eq;

    #[test]
    fn multi_level_round_trips_for_db2() {
        let db2 = catalog::get("db2").unwrap();
        let x: Vec<f64> = (0..128).map(|i| (i as f64 * 0.1).sin() + 0.05 * i as f64).collect();
        let levels = level_cap(x.len(), db2.support_width()).min(3);
        let result = decompose(&x, &db2, BoundaryMode::Periodic, levels).unwrap();
        assert_eq!(result.details.len(), levels);
        let recon = reconstruct(&result, &db2, BoundaryMode::Periodic).unwrap();
        for (a, b) in recon.iter().zip(x.iter()) {
            assert_abs_diff_eq!(a, b, epsilon = 1e-8);
        }
    }

    #[test]
    fn level_cap_is_enforced() {
        let haar = catalog::get("haar").unwrap();
        let x = vec![0.0_f64; 16];
        let j_max = level_cap(x.len(), haar.support_width());
        assert!(decompose(&x, &haar, BoundaryMode::Periodic, j_max).is_ok());
        assert!(matches!(
            decompose(&x, &haar, BoundaryMode::Periodic, j_max + 1),
            Err(VectorWaveError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn clear_caches_forces_energy_recompute() {
        let haar = catalog::get("haar").unwrap();
        let x: Vec<f64> = (0..16).map(|i| i as f64).collect();
        let mut result = decompose(&x, &haar, BoundaryMode::Periodic, 2).unwrap();
        let e1 = result.energy();
        result.details[0][0] += 100.0;
        result.clear_caches();
        let e2 = result.energy();
        assert!((e1 - e2).abs() > 1.0);
    }
}
