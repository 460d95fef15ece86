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
//! Adaptive padding selector (C6): scores a signal's character along six
//! axes and picks an extension strategy from spec §4.6's decision tree.
use super::strategies::{ConstantSide, PaddingStrategy, StatisticalKind, SymmetricKind};
use crate::err::VectorWaveError;
use crate::sample::CwtSample;
use num_complex::Complex;
use num_traits::Zero;
use zaft::FftDirection;

/// The six signal-characteristic scores computed by [`select_adaptive`],
/// each clamped into a documented range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalCharacteristics {
    pub smoothness: f64,
    pub trend_strength: f64,
    pub periodicity: f64,
    pub noise_level: f64,
    pub stationarity: f64,
    pub has_discontinuity: bool,
}

#[derive(Debug, Clone)]
pub struct PaddingResult {
    pub padded: Vec<f64>,
    pub strategy: PaddingStrategy,
    pub reason: String,
    pub characteristics: SignalCharacteristics,
}

fn first_differences(x: &[f64]) -> Vec<f64> {
    x.windows(2).map(|w| w[1] - w[0]).collect()
}

fn smoothness(x: &[f64]) -> f64 {
    let d1 = first_differences(x);
    if d1.len() < 2 {
        return 1.0;
    }
    let d2 = first_differences(&d1);
    let sum_abs_d1: f64 = d1.iter().map(|v| v.abs()).sum();
    let sum_abs_d2: f64 = d2.iter().map(|v| v.abs()).sum();
    if sum_abs_d1 < 1e-12 {
        return 1.0;
    }
    (-(sum_abs_d2 / sum_abs_d1)).exp()
}

fn trend_strength(x: &[f64]) -> f64 {
    let n = x.len();
    if n < 2 {
        return 0.0;
    }
    let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
    let mean_x = xs.iter().sum::<f64>() / n as f64;
    let mean_y = x.iter().sum::<f64>() / n as f64;
    let mut cov = 0.0;
    let mut var_x = 0.0;
    for (&xv, &yv) in xs.iter().zip(x.iter()) {
        cov += (xv - mean_x) * (yv - mean_y);
        var_x += (xv - mean_x).powi(2);
    }
    if var_x < 1e-12 {
        return 0.0;
    }
    let slope = cov / var_x;
    let intercept = mean_y - slope * mean_x;
    let mut ss_res = 0.0;
    let mut ss_tot = 0.0;
    for (&xv, &yv) in xs.iter().zip(x.iter()) {
        let fitted = slope * xv + intercept;
        ss_res += (yv - fitted).powi(2);
        ss_tot += (yv - mean_y).powi(2);
    }
    if ss_tot < 1e-12 {
        return 0.0;
    }
    (1.0 - ss_res / ss_tot).clamp(0.0, 1.0)
}

fn noise_level(x: &[f64]) -> f64 {
    let d1 = first_differences(x);
    if d1.is_empty() {
        return 0.0;
    }
    let mut abs_d1: Vec<f64> = d1.iter().map(|v| v.abs()).collect();
    abs_d1.sort_by(|a, b| a.partial_cmp(b).unwrap());
    let median_abs_d1 = abs_d1[abs_d1.len() / 2];
    let range = x.iter().cloned().fold(f64::MIN, f64::max) - x.iter().cloned().fold(f64::MAX, f64::min);
    let range = range.abs();
    if range < 1e-12 {
        return 0.0;
    }
    (median_abs_d1 / range * 4.0).clamp(0.0, 1.0)
}

fn stationarity(x: &[f64]) -> f64 {
    let n = x.len();
    if n < 8 {
        return 1.0;
    }
    let seg_len = n / 4;
    let mut means = Vec::with_capacity(4);
    let mut vars = Vec::with_capacity(4);
    for s in 0..4 {
        let start = s * seg_len;
        let end = if s == 3 { n } else { start + seg_len };
        let seg = &x[start..end];
        let mean = seg.iter().sum::<f64>() / seg.len() as f64;
        let var = seg.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / seg.len() as f64;
        means.push(mean);
        vars.push(var);
    }
    let global_mean = x.iter().sum::<f64>() / n as f64;
    let global_var = x.iter().map(|v| (v - global_mean).powi(2)).sum::<f64>() / n as f64;
    let mean_scale = global_mean.abs().max(1e-9);
    let var_scale = global_var.max(1e-9);
    let mean_variation = means.iter().map(|m| ((m - global_mean) / mean_scale).abs()).sum::<f64>() / 4.0;
    let var_variation = vars.iter().map(|v| ((v - global_var) / var_scale).abs()).sum::<f64>() / 4.0;
    (-2.0 * (mean_variation + var_variation) / 2.0).exp().clamp(0.0, 1.0)
}

fn has_discontinuity(x: &[f64]) -> bool {
    let n = x.len();
    if n < 3 {
        return false;
    }
    let d1 = first_differences(x);
    let mean_abs = d1.iter().map(|v| v.abs()).sum::<f64>() / d1.len() as f64;
    if mean_abs < 1e-12 {
        return false;
    }
    d1.first().unwrap().abs() > 3.0 * mean_abs || d1.last().unwrap().abs() > 3.0 * mean_abs
}

fn direct_autocorrelation_periodicity(x: &[f64]) -> f64 {
    let n = x.len();
    let mean = x.iter().sum::<f64>() / n as f64;
    let centered: Vec<f64> = x.iter().map(|v| v - mean).collect();
    let var: f64 = centered.iter().map(|v| v * v).sum();
    if var < 1e-12 {
        return 0.0;
    }
    let max_lag = (n / 2).min(10);
    let mut best = 0.0_f64;
    for lag in 2..=max_lag.max(2) {
        if lag >= n {
            break;
        }
        let mut acc = 0.0;
        for i in 0..(n - lag) {
            acc += centered[i] * centered[i + lag];
        }
        let normalized = (acc / var).abs();
        best = best.max(normalized);
    }
    best.clamp(0.0, 1.0)
}

/// Wiener-Khinchin periodicity detection: autocorrelation as the inverse FFT
/// of the power spectrum, used once `N >= 32` (spec §4.6).
fn fft_periodicity(x: &[f64]) -> Result<f64, VectorWaveError> {
    let n = x.len();
    let mean = x.iter().sum::<f64>() / n as f64;
    let mut padded_len = 1usize;
    while padded_len < 2 * n {
        padded_len <<= 1;
    }
    let mut buf: Vec<Complex<f64>> = vec![Complex::zero(); padded_len];
    for (dst, &src) in buf.iter_mut().zip(x.iter()) {
        *dst = Complex::new(src - mean, 0.0);
    }
    let forward = f64::make_fft(padded_len, FftDirection::Forward)?;
    let inverse = f64::make_fft(padded_len, FftDirection::Inverse)?;
    forward.execute(&mut buf).map_err(|e| VectorWaveError::FftError(e.to_string()))?;
    for c in buf.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }
    inverse.execute(&mut buf).map_err(|e| VectorWaveError::FftError(e.to_string()))?;
    let scale = 1.0 / padded_len as f64;
    let autocorr: Vec<f64> = buf.iter().map(|c| c.re * scale).collect();
    let zero_lag = autocorr[0].max(1e-12);

    let max_lag = (n / 2).min(50).max(2);
    let mut best = 0.0_f64;
    for lag in 2..max_lag {
        if lag + 1 >= autocorr.len() - 1 {
            break;
        }
        let prev = autocorr[lag - 1];
        let cur = autocorr[lag];
        let next = autocorr[lag + 1];
        if cur >= prev && cur >= next {
            let weight = (1.0_f64).min(n as f64 / (3.0 * lag as f64));
            let score = (cur / zero_lag).abs() * weight;
            best = best.max(score);
        }
    }

    // Validate by comparing signal-period variance to signal variance: a
    // spurious peak from broadband noise rarely survives this check.
    let period = best_period_from_autocorr(&autocorr, max_lag, zero_lag);
    if let Some(period) = period {
        if period > 0 && period < n {
            let mut period_vals = Vec::new();
            let mut i = 0;
            while i < n {
                period_vals.push(x[i]);
                i += period;
            }
            if period_vals.len() >= 2 {
                let pm = period_vals.iter().sum::<f64>() / period_vals.len() as f64;
                let pv = period_vals.iter().map(|v| (v - pm).powi(2)).sum::<f64>() / period_vals.len() as f64;
                let gv = x.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n as f64;
                if gv > 1e-12 && pv / gv > 0.5 {
                    return Ok(0.0);
                }
            }
        }
    }

    Ok(best.clamp(0.0, 1.0))
}

fn best_period_from_autocorr(autocorr: &[f64], max_lag: usize, zero_lag: f64) -> Option<usize> {
    let mut best_lag = None;
    let mut best_score = 0.0;
    for lag in 2..max_lag {
        if lag + 1 >= autocorr.len() - 1 {
            break;
        }
        let prev = autocorr[lag - 1];
        let cur = autocorr[lag];
        let next = autocorr[lag + 1];
        if cur >= prev && cur >= next && cur / zero_lag > best_score {
            best_score = cur / zero_lag;
            best_lag = Some(lag);
        }
    }
    best_lag
}

fn periodicity(x: &[f64]) -> f64 {
    if x.len() < 32 {
        direct_autocorrelation_periodicity(x)
    } else {
        fft_periodicity(x).unwrap_or(0.0)
    }
}

fn characterize(x: &[f64]) -> SignalCharacteristics {
    SignalCharacteristics {
        smoothness: smoothness(x),
        trend_strength: trend_strength(x),
        periodicity: periodicity(x),
        noise_level: noise_level(x),
        stationarity: stationarity(x),
        has_discontinuity: has_discontinuity(x),
    }
}

fn decide(c: &SignalCharacteristics, n: usize) -> (PaddingStrategy, String) {
    if n < 5 {
        return (PaddingStrategy::Constant(ConstantSide::Right), "N < 5: too short to characterize, using Constant".to_string());
    }
    if c.periodicity > 0.7 {
        return (PaddingStrategy::Periodic, format!("periodicity={:.3} > 0.7", c.periodicity));
    }
    if c.has_discontinuity && c.smoothness < 0.3 {
        return (
            PaddingStrategy::Zero,
            format!("discontinuity detected with smoothness={:.3} < 0.3", c.smoothness),
        );
    }
    if c.trend_strength > 0.8 {
        return if c.noise_level < 0.2 {
            (
                PaddingStrategy::Polynomial { degree: 3, fit_points: n.min(8).max(4) },
                format!("trend={:.3} > 0.8, noise={:.3} < 0.2", c.trend_strength, c.noise_level),
            )
        } else {
            (
                PaddingStrategy::Statistical(StatisticalKind::Trend),
                format!("trend={:.3} > 0.8, noise={:.3} >= 0.2", c.trend_strength, c.noise_level),
            )
        };
    }
    if c.smoothness > 0.7 && c.noise_level < 0.3 {
        return if c.trend_strength > 0.5 {
            (
                PaddingStrategy::Linear { fit_points: n.min(6).max(2) },
                format!("smooth={:.3}, noise={:.3}, trend={:.3} > 0.5", c.smoothness, c.noise_level, c.trend_strength),
            )
        } else {
            (
                PaddingStrategy::Polynomial { degree: 3, fit_points: n.min(8).max(4) },
                format!("smooth={:.3}, noise={:.3}, trend={:.3} <= 0.5", c.smoothness, c.noise_level, c.trend_strength),
            )
        };
    }
    if c.stationarity > 0.7 {
        return if c.noise_level > 0.5 {
            (
                PaddingStrategy::Statistical(StatisticalKind::Mean),
                format!("stationarity={:.3} > 0.7, noise={:.3} > 0.5", c.stationarity, c.noise_level),
            )
        } else {
            (
                PaddingStrategy::Constant(ConstantSide::Right),
                format!("stationarity={:.3} > 0.7, noise={:.3} <= 0.5", c.stationarity, c.noise_level),
            )
        };
    }
    if c.noise_level > 0.6 {
        return (
            PaddingStrategy::Symmetric(SymmetricKind::Half),
            format!("noise={:.3} > 0.6", c.noise_level),
        );
    }
    (
        PaddingStrategy::Symmetric(SymmetricKind::Half),
        "no rule matched; default Symmetric(Half)".to_string(),
    )
}

/// Analyzes `x`, selects a strategy via spec §4.6's decision tree, and
/// returns the padded signal alongside the scores and a human-readable
/// reason. Stateless: repeated calls with the same input always select the
/// same strategy.
pub fn select_adaptive(x: &[f64], target_length: usize) -> Result<PaddingResult, VectorWaveError> {
    if x.is_empty() {
        return Err(VectorWaveError::InvalidArgument("signal must not be empty".to_string()));
    }
    let characteristics = characterize(x);
    let (strategy, reason) = decide(&characteristics, x.len());
    let padded = super::strategies::pad(x, target_length, &strategy)?;
    Ok(PaddingResult { padded, strategy, reason, characteristics })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periodic_signal_selects_periodic_strategy() {
        let x: Vec<f64> = (0..64).map(|i| (2.0 * std::f64::consts::PI * i as f64 / 8.0).sin()).collect();
        let result = select_adaptive(&x, 80).unwrap();
        assert!(matches!(result.strategy, PaddingStrategy::Periodic));
    }

    #[test]
    fn linear_trend_selects_trend_oriented_strategy() {
        let x: Vec<f64> = (0..40).map(|i| i as f64 * 3.0 + 1.0).collect();
        let result = select_adaptive(&x, 60).unwrap();
        assert!(result.characteristics.trend_strength > 0.8);
    }

    #[test]
    fn short_signal_uses_constant() {
        let x = [1.0, 2.0, 3.0];
        let result = select_adaptive(&x, 6).unwrap();
        assert!(matches!(result.strategy, PaddingStrategy::Constant(_)));
    }
}
