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
//! Wavelet shrinkage denoising (C10): threshold rules (hard/soft), threshold
//! estimators (universal/SURE/Bayes) applied per detail level, and a
//! streaming variant that keeps a rolling noise-estimate window instead of
//! recomputing sigma from a whole signal at once.
use crate::err::VectorWaveError;
use crate::modwt::multi_level::{self, MultiLevelModwtResult};
use crate::wavelets::discrete::{BoundaryMode, Wavelet};

/// Nonlinearity applied to a coefficient given a threshold `t` (spec §4.10).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ThresholdRule {
    Hard,
    Soft,
}

impl ThresholdRule {
    fn apply(self, c: f64, t: f64) -> f64 {
        match self {
            ThresholdRule::Hard => {
                if c.abs() > t {
                    c
                } else {
                    0.0
                }
            }
            ThresholdRule::Soft => c.signum() * (c.abs() - t).max(0.0),
        }
    }
}

/// How the per-level threshold `T` (or `T_j`) is derived from the detail
/// coefficients (spec §4.10).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ThresholdEstimator {
    /// `T = sigma * sqrt(2 * ln N)`, `sigma` from the finest detail level's
    /// median absolute deviation.
    Universal,
    /// Stein's Unbiased Risk Estimate, minimized over a sorted-value scan.
    Sure,
    /// Per-level `T_j = sigma^2 / sigma_Xj`.
    Bayes,
}

fn median_abs(values: &[f64]) -> f64 {
    let mut abs: Vec<f64> = values.iter().map(|v| v.abs()).collect();
    abs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let n = abs.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        abs[n / 2]
    } else {
        0.5 * (abs[n / 2 - 1] + abs[n / 2])
    }
}

/// `sigma = median(|D_1|) / 0.6745`, the robust noise estimate shared by
/// Universal and Bayes.
fn noise_sigma(finest_detail: &[f64]) -> f64 {
    median_abs(finest_detail) / 0.6745
}

/// Universal threshold `sigma * sqrt(2 * ln N)`.
fn universal_threshold(sigma: f64, n: usize) -> f64 {
    if n == 0 {
        return 0.0;
    }
    sigma * (2.0 * (n as f64).ln()).sqrt()
}

/// Minimizes Stein's Unbiased Risk Estimate over the sorted absolute detail
/// values as candidate thresholds: for a threshold `t`, `SURE(t) = n - 2 *
/// #{|c_i| <= t} + sum_i min(c_i^2, t^2)`. The minimizer over all real `t`
/// is always attained at one of the `|c_i|` (the risk is piecewise linear
/// between them), so a sorted scan suffices.
fn sure_threshold(detail: &[f64]) -> f64 {
    let n = detail.len();
    if n == 0 {
        return 0.0;
    }
    let mut abs: Vec<f64> = detail.iter().map(|v| v.abs()).collect();
    abs.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let squared: Vec<f64> = abs.iter().map(|v| v * v).collect();
    let mut cumulative = 0.0_f64;
    let mut best_t = abs[0];
    let mut best_risk = f64::INFINITY;
    for (i, (&t, &sq)) in abs.iter().zip(squared.iter()).enumerate() {
        cumulative += sq;
        // At candidate t = abs[i], exactly i+1 coefficients have |c| <= t;
        // the rest contribute t^2 each under min(c^2, t^2).
        let kept_below = (i + 1) as f64;
        let tail = (n - i - 1) as f64 * t * t;
        let risk = n as f64 - 2.0 * kept_below + cumulative + tail;
        if risk < best_risk {
            best_risk = risk;
            best_t = t;
        }
    }
    best_t
}

/// Per-level Bayes threshold `T_j = sigma^2 / sigma_Xj`, `sigma_Xj = sqrt(max(0,
/// mean(D_j^2) - sigma^2))`. Falls back to the universal threshold when the
/// level is (numerically) pure noise, since `sigma_Xj -> 0` would otherwise
/// divide by zero.
fn bayes_threshold(detail: &[f64], sigma: f64) -> f64 {
    let mean_sq = detail.iter().map(|v| v * v).sum::<f64>() / detail.len().max(1) as f64;
    let sigma_xj = (mean_sq - sigma * sigma).max(0.0).sqrt();
    if sigma_xj <= 1e-12 {
        return detail.iter().fold(0.0_f64, |a, &v| a.max(v.abs()));
    }
    (sigma * sigma) / sigma_xj
}

/// Computes the threshold for one detail level under `estimator`, given the
/// crate-wide noise estimate `sigma` (from the finest level) and that
/// level's own coefficients.
fn threshold_for_level(estimator: ThresholdEstimator, sigma: f64, detail: &[f64]) -> f64 {
    match estimator {
        ThresholdEstimator::Universal => universal_threshold(sigma, detail.len()),
        ThresholdEstimator::Sure => sure_threshold(detail),
        ThresholdEstimator::Bayes => bayes_threshold(detail, sigma),
    }
}

/// Thresholds every detail level of `result` in place (per spec §4.10's
/// "threshold each detail level separately"), then reconstructs through
/// C4's inverse. `result` is consumed since thresholding is destructive and
/// the energy cache would otherwise go stale silently.
pub fn denoise_multilevel(
    mut result: MultiLevelModwtResult,
    wavelet: &Wavelet,
    mode: BoundaryMode,
    rule: ThresholdRule,
    estimator: ThresholdEstimator,
) -> Result<Vec<f64>, VectorWaveError> {
    if result.details.is_empty() {
        return Err(VectorWaveError::InvalidArgument(
            "multi-level result must have at least one detail level".to_string(),
        ));
    }
    let sigma = noise_sigma(&result.details[0]);
    for detail in result.details.iter_mut() {
        let t = threshold_for_level(estimator, sigma, detail);
        for c in detail.iter_mut() {
            *c = rule.apply(*c, t);
        }
    }
    result.clear_caches();
    multi_level::reconstruct(&result, wavelet, mode)
}

/// `denoise(signal, wavelet_name, boundary_mode, levels, rule, estimator) ->
/// signal` (spec §6): decomposes, thresholds every detail level, and
/// reconstructs in one call.
pub fn denoise(
    x: &[f64],
    wavelet: &Wavelet,
    mode: BoundaryMode,
    levels: usize,
    rule: ThresholdRule,
    estimator: ThresholdEstimator,
) -> Result<Vec<f64>, VectorWaveError> {
    let result = multi_level::decompose(x, wavelet, mode, levels)?;
    denoise_multilevel(result, wavelet, mode, rule, estimator)
}

/// The streaming denoiser's rolling noise-estimate window (spec §4.10): a
/// fixed-size circular buffer of absolute detail-coefficient values, written
/// with a rolling pointer. When an incoming block is larger than the
/// window, it is subsampled with stride `block.len() / W` to preserve
/// temporal diversity, and the remainder of the window is filled from the
/// block's tail so no slot goes unwritten.
#[derive(Debug, Clone)]
pub struct StreamingNoiseWindow {
    buffer: Vec<f64>,
    filled: usize,
    write_pos: usize,
}

impl StreamingNoiseWindow {
    pub fn new(capacity: usize) -> Result<Self, VectorWaveError> {
        if capacity == 0 {
            return Err(VectorWaveError::InvalidArgument(
                "streaming noise window capacity must be positive".to_string(),
            ));
        }
        Ok(Self {
            buffer: vec![0.0; capacity],
            filled: 0,
            write_pos: 0,
        })
    }

    fn push(&mut self, value: f64) {
        let cap = self.buffer.len();
        self.buffer[self.write_pos] = value;
        self.write_pos = (self.write_pos + 1) % cap;
        self.filled = (self.filled + 1).min(cap);
    }

    /// Absorbs one detail block's absolute coefficient values (spec
    /// §4.10's streaming sampling rule).
    pub fn ingest(&mut self, detail: &[f64]) {
        let cap = self.buffer.len();
        if detail.len() <= cap {
            for &c in detail {
                self.push(c.abs());
            }
            return;
        }
        let stride = (detail.len() / cap).max(1);
        let mut taken = 0usize;
        let mut i = 0usize;
        while i < detail.len() && taken < cap {
            self.push(detail[i].abs());
            taken += 1;
            i += stride;
        }
        // Fill any remaining slots from the block's tail so no slot is
        // wasted even when the stride overshoots before `cap` samples are
        // taken.
        let mut tail = detail.len();
        while taken < cap {
            tail -= 1;
            self.push(detail[tail].abs());
            taken += 1;
        }
    }

    /// Recomputes `sigma = median(window) / 0.6745` from the current window
    /// contents (only the filled prefix participates before the window has
    /// wrapped once).
    pub fn sigma(&self) -> f64 {
        if self.filled == 0 {
            return 0.0;
        }
        median_abs(&self.buffer[..self.filled]) / 0.6745
    }
}

/// Streaming denoiser (spec §4.10): owns a rolling noise window and applies
/// a fixed threshold rule/estimator to each incoming detail block.
pub struct StreamingDenoiser {
    window: StreamingNoiseWindow,
    rule: ThresholdRule,
    estimator: ThresholdEstimator,
}

impl StreamingDenoiser {
    pub fn new(window_capacity: usize, rule: ThresholdRule, estimator: ThresholdEstimator) -> Result<Self, VectorWaveError> {
        Ok(Self {
            window: StreamingNoiseWindow::new(window_capacity)?,
            rule,
            estimator,
        })
    }

    /// Thresholds one detail block in place using the current rolling
    /// sigma, then folds the (pre-threshold) block into the window for the
    /// next call.
    pub fn denoise_block(&mut self, detail: &mut [f64]) {
        let sigma = self.window.sigma();
        let t = match self.estimator {
            ThresholdEstimator::Universal => universal_threshold(sigma, detail.len()),
            ThresholdEstimator::Sure => sure_threshold(detail),
            ThresholdEstimator::Bayes => bayes_threshold(detail, sigma),
        };
        self.window.ingest(detail);
        for c in detail.iter_mut() {
            *c = self.rule.apply(*c, t);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wavelets::catalog;
    use approx::assert_abs_diff_eq;

    fn noisy_sine(n: usize, amp_noise: f64) -> Vec<f64> {
        let mut rng_state: u64 = 0x9E3779B97F4A7C15;
        (0..n)
            .map(|i| {
                // xorshift for a deterministic, dependency-free noise source
                rng_state ^= rng_state << 13;
                rng_state ^= rng_state >> 7;
                rng_state ^= rng_state << 17;
                let u = (rng_state >> 11) as f64 / (1u64 << 53) as f64;
                (i as f64 * 0.2).sin() + amp_noise * (u - 0.5)
            })
            .collect()
    }

    #[test]
    fn hard_threshold_zeroes_small_coefficients() {
        assert_eq!(ThresholdRule::Hard.apply(0.1, 0.5), 0.0);
        assert_eq!(ThresholdRule::Hard.apply(1.0, 0.5), 1.0);
    }

    #[test]
    fn soft_threshold_shrinks_surviving_coefficients() {
        assert_abs_diff_eq!(ThresholdRule::Soft.apply(1.0, 0.3), 0.7, epsilon = 1e-12);
        assert_eq!(ThresholdRule::Soft.apply(0.2, 0.3), 0.0);
    }

    #[test]
    fn denoising_reduces_distance_to_clean_signal() {
        let haar = catalog::get("haar").unwrap();
        let clean: Vec<f64> = (0..256).map(|i| (i as f64 * 0.2).sin()).collect();
        let noisy = noisy_sine(256, 0.3);
        let denoised = denoise(
            &noisy,
            &haar,
            BoundaryMode::Periodic,
            3,
            ThresholdRule::Soft,
            ThresholdEstimator::Universal,
        )
        .unwrap();
        let dist_noisy: f64 = clean.iter().zip(noisy.iter()).map(|(a, b)| (a - b).powi(2)).sum();
        let dist_denoised: f64 = clean.iter().zip(denoised.iter()).map(|(a, b)| (a - b).powi(2)).sum();
        assert!(dist_denoised < dist_noisy);
    }

    #[test]
    fn bayes_and_sure_estimators_produce_finite_thresholds() {
        let haar = catalog::get("haar").unwrap();
        let noisy = noisy_sine(128, 0.4);
        for estimator in [ThresholdEstimator::Sure, ThresholdEstimator::Bayes] {
            let out = denoise(&noisy, &haar, BoundaryMode::Periodic, 2, ThresholdRule::Soft, estimator).unwrap();
            assert!(out.iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn streaming_noise_window_handles_oversized_blocks() {
        let mut window = StreamingNoiseWindow::new(16).unwrap();
        let block: Vec<f64> = (0..100).map(|i| i as f64).collect();
        window.ingest(&block);
        assert_eq!(window.filled, 16);
        assert!(window.sigma() > 0.0);
    }

    #[test]
    fn streaming_denoiser_thresholds_blocks_in_place() {
        let mut denoiser = StreamingDenoiser::new(64, ThresholdRule::Hard, ThresholdEstimator::Universal).unwrap();
        let mut block = vec![0.01, 0.02, 5.0, -5.0, 0.01];
        for _ in 0..5 {
            denoiser.denoise_block(&mut block.clone());
        }
        let mut last = vec![0.01, 0.02, 5.0, -5.0, 0.01];
        denoiser.denoise_block(&mut last);
        assert!(last[2].abs() > 0.0 || last[3].abs() > 0.0);
    }
}
