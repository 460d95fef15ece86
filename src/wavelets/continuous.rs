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
//! Closed-form continuous wavelets (C1) that plug directly into the
//! time-domain CWT engine (C8), as an alternative to the frequency-domain
//! analytic wavelets (`Morlet`/`Cmhat`/`Gabor`/`Hhhat`) that back [`crate::Scalet`].
//! Every wavelet here is defined by a published closed form rather than a
//! coefficient table, so there is nothing to verify against a literature
//! table the way [`super::catalog`] verifies its discrete filters -- the
//! admissibility (zero mean) and normalization constants are themselves
//! part of the formula.
use crate::cwt::direct::{ComplexTimeDomainWavelet, TimeDomainWavelet};
use crate::err::VectorWaveError;
use num_complex::Complex;
use std::f64::consts::PI;

/// `Gamma(m + 1/2)` via the standard half-integer recurrence from `Gamma(1/2)
/// = sqrt(pi)`, used by [`DogWavelet`]'s normalization constant.
fn gamma_half(m: u32) -> f64 {
    let mut g = PI.sqrt();
    let mut k = 0.5;
    for _ in 0..m {
        g *= k;
        k += 1.0;
    }
    g
}

/// Probabilists' Hermite polynomial `He_n(t)`, via `He_0 = 1`, `He_1 = t`,
/// `He_n = t*He_{n-1} - (n-1)*He_{n-2}`.
fn hermite_prob(n: u32, t: f64) -> f64 {
    match n {
        0 => 1.0,
        1 => t,
        _ => {
            let mut h0 = 1.0;
            let mut h1 = t;
            for k in 2..=n {
                let h2 = t * h1 - (k as f64 - 1.0) * h0;
                h0 = h1;
                h1 = h2;
            }
            h1
        }
    }
}

/// The Derivative-of-Gaussian family (spec catalog names `dog1`..`dog8`,
/// aliased as `gaus1`..`gaus8`): `psi_m(t) = -He_m(t) * exp(-t^2/2) /
/// sqrt(Gamma(m + 1/2))` (Torrence & Compo 1998, eq. 12). `order = 2`
/// reproduces [`crate::cwt::direct::MexicanHat`] exactly.
#[derive(Debug, Copy, Clone)]
pub struct DogWavelet {
    order: u32,
}

impl DogWavelet {
    pub fn new(order: u32) -> Result<Self, VectorWaveError> {
        if !(1..=8).contains(&order) {
            return Err(VectorWaveError::InvalidArgument(format!(
                "DOG wavelet order {order} must be in 1..=8"
            )));
        }
        Ok(Self { order })
    }
}

impl TimeDomainWavelet for DogWavelet {
    fn evaluate(&self, t: f64) -> f64 {
        let norm = 1.0 / gamma_half(self.order).sqrt();
        -hermite_prob(self.order, t) * (-0.5 * t * t).exp() * norm
    }
}

/// The Shannon / sinc wavelet (spec catalog name `shan`): `psi(t) = 2 *
/// sinc(2t) - sinc(t)`, `sinc(t) = sin(pi*t) / (pi*t)` (`sinc(0) = 1`).
#[derive(Debug, Default, Copy, Clone)]
pub struct ShannonWavelet;

fn sinc(t: f64) -> f64 {
    if t == 0.0 { 1.0 } else { (PI * t).sin() / (PI * t) }
}

impl TimeDomainWavelet for ShannonWavelet {
    fn evaluate(&self, t: f64) -> f64 {
        2.0 * sinc(2.0 * t) - sinc(t)
    }
}

/// The real Morlet wavelet (spec catalog name `morl`): `psi(t) = exp(-t^2/2)
/// * cos(5t)`, L2-normalized by the closed-form Gaussian moment `integral
/// cos^2(w0*t) * exp(-t^2) dt = sqrt(pi)/2 * (1 + exp(-w0^2))`. Matches the
/// fixed, non-complex `morl` convention (center frequency `w0 = 5`) rather
/// than the frequency-domain admissibility-corrected Morlet already
/// provided by [`crate::wavelets::MorletWavelet`], which a caller wanting
/// the complex analytic form should use instead.
#[derive(Debug, Default, Copy, Clone)]
pub struct MorletReal;

const MORLET_W0: f64 = 5.0;

impl TimeDomainWavelet for MorletReal {
    fn evaluate(&self, t: f64) -> f64 {
        let norm = 1.0 / (0.5 * PI.sqrt() * (1.0 + (-MORLET_W0 * MORLET_W0).exp())).sqrt();
        norm * (-0.5 * t * t).exp() * (MORLET_W0 * t).cos()
    }
}

/// The Paul wavelet family (spec catalog names `paul1`..`paul8`), the only
/// genuinely complex-valued entry in the catalog: `psi_m(t) = (2^m * i^m *
/// m!) / sqrt(pi * (2m)!) * (1 - i*t)^-(m+1)` (Torrence & Compo 1998, Table
/// 1).
#[derive(Debug, Copy, Clone)]
pub struct PaulWavelet {
    order: u32,
}

impl PaulWavelet {
    pub fn new(order: u32) -> Result<Self, VectorWaveError> {
        if !(1..=8).contains(&order) {
            return Err(VectorWaveError::InvalidArgument(format!(
                "Paul wavelet order {order} must be in 1..=8"
            )));
        }
        Ok(Self { order })
    }
}

fn factorial(n: u32) -> f64 {
    (1..=n as u64).map(|k| k as f64).product::<f64>().max(1.0)
}

impl ComplexTimeDomainWavelet for PaulWavelet {
    fn evaluate(&self, t: f64) -> Complex<f64> {
        let m = self.order;
        let norm = (2f64.powi(m as i32) * factorial(m)) / (PI * factorial(2 * m)).sqrt();
        let i_pow_m = Complex::new(0.0, 1.0).powi(m as i32);
        let base = Complex::new(1.0, -t);
        norm * i_pow_m * base.powi(-(m as i32 + 1))
    }
}

/// Resolves a spec catalog name to a real time-domain wavelet, covering
/// `morl`, `dog1`..`dog8`/`gaus1`..`gaus8`, and `shan`. Returns `None` for
/// names outside this family (including the genuinely complex `paulN`,
/// see [`resolve_complex`]).
pub fn resolve_real(name: &str) -> Option<Result<Box<dyn TimeDomainWavelet>, VectorWaveError>> {
    let lower = name.to_ascii_lowercase();
    if lower == "morl" {
        return Some(Ok(Box::new(MorletReal)));
    }
    if lower == "shan" {
        return Some(Ok(Box::new(ShannonWavelet)));
    }
    for prefix in ["dog", "gaus"] {
        if let Some(rest) = lower.strip_prefix(prefix) {
            if let Ok(order) = rest.parse::<u32>() {
                return Some(DogWavelet::new(order).map(|w| Box::new(w) as Box<dyn TimeDomainWavelet>));
            }
        }
    }
    None
}

/// Resolves a spec catalog name to a complex time-domain wavelet, covering
/// `paul1`..`paul8`.
pub fn resolve_complex(name: &str) -> Option<Result<Box<dyn ComplexTimeDomainWavelet>, VectorWaveError>> {
    let lower = name.to_ascii_lowercase();
    let rest = lower.strip_prefix("paul")?;
    let order = rest.parse::<u32>().ok()?;
    Some(PaulWavelet::new(order).map(|w| Box::new(w) as Box<dyn ComplexTimeDomainWavelet>))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn dog_order_two_matches_mexican_hat() {
        use crate::cwt::direct::MexicanHat;
        let dog2 = DogWavelet::new(2).unwrap();
        for i in -50..=50 {
            let t = i as f64 * 0.1;
            assert_abs_diff_eq!(dog2.evaluate(t), MexicanHat.evaluate(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn dog_rejects_out_of_range_order() {
        assert!(DogWavelet::new(0).is_err());
        assert!(DogWavelet::new(9).is_err());
    }

    #[test]
    fn shannon_is_admissible_about_zero_mean_on_a_symmetric_grid() {
        let w = ShannonWavelet;
        let sum: f64 = (-200..=200).map(|i| w.evaluate(i as f64 * 0.05)).sum();
        assert_abs_diff_eq!(sum, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn morlet_real_peaks_at_the_origin() {
        let w = MorletReal;
        let peak = w.evaluate(0.0);
        for i in 1..50 {
            let t = i as f64 * 0.1;
            assert!(w.evaluate(t).abs() <= peak.abs() + 1e-9);
        }
    }

    #[test]
    fn paul_order_one_matches_closed_form_at_origin() {
        let w = PaulWavelet::new(1).unwrap();
        let v = w.evaluate(0.0);
        let expected_norm = (2.0 / PI.sqrt()) * Complex::new(0.0, 1.0);
        assert_abs_diff_eq!(v.re, expected_norm.re, epsilon = 1e-10);
        assert_abs_diff_eq!(v.im, expected_norm.im, epsilon = 1e-10);
    }

    #[test]
    fn resolve_real_covers_spec_catalog_names() {
        assert!(resolve_real("morl").is_some());
        assert!(resolve_real("shan").is_some());
        assert!(resolve_real("dog2").unwrap().is_ok());
        assert!(resolve_real("gaus4").unwrap().is_ok());
        assert!(resolve_real("dog0").unwrap().is_err());
        assert!(resolve_real("paul1").is_none());
    }

    #[test]
    fn resolve_complex_covers_paul_family() {
        assert!(resolve_complex("paul4").unwrap().is_ok());
        assert!(resolve_complex("paul9").unwrap().is_err());
        assert!(resolve_complex("morl").is_none());
    }
}
