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
//! The discrete-wavelet data model (C1): a tagged union over
//! `{Orthogonal, Biorthogonal}` filter banks (the `ContinuousAnalytic` arm of
//! spec §3's tagged union is the pre-existing [`crate::CwtWavelet`] hierarchy,
//! which already dispatches by type rather than by a stored tag) plus the
//! MODWT boundary-handling modes.

/// Which algebraic family a discrete wavelet's filter pair belongs to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum WaveletKind {
    /// `h1 == h0`, `g1 == g0`: a single filter pair serves both analysis and
    /// synthesis.
    Orthogonal,
    /// Four distinct filters related by the dual quadrature-mirror relation.
    Biorthogonal,
}

/// A discrete wavelet filter bank.
///
/// Coefficient arrays are small (typically under 20 taps) and immutable once
/// constructed; the catalog in [`super::catalog`] builds each entry once and
/// hands out clones, which is cheap enough that there is no need to share
/// them by `Arc` the way the CWT side shares its (larger, per-scale) kernels.
#[derive(Debug, Clone, PartialEq)]
pub struct Wavelet {
    pub name: &'static str,
    pub kind: WaveletKind,
    /// Low-pass decomposition filter.
    pub h0: Vec<f64>,
    /// High-pass decomposition filter.
    pub g0: Vec<f64>,
    /// Low-pass reconstruction filter (`== h0` when orthogonal).
    pub h1: Vec<f64>,
    /// High-pass reconstruction filter (`== g0` when orthogonal).
    pub g1: Vec<f64>,
    pub vanishing_moments: u32,
}

impl Wavelet {
    /// Filter length `L`, shared by all four taps arrays.
    pub fn support_width(&self) -> usize {
        self.h0.len()
    }

    pub(crate) fn orthogonal(name: &'static str, h0: Vec<f64>, vanishing_moments: u32) -> Self {
        let g0 = quadrature_mirror(&h0);
        let h1 = h0.clone();
        let g1 = g0.clone();
        Wavelet {
            name,
            kind: WaveletKind::Orthogonal,
            h0,
            g0,
            h1,
            g1,
            vanishing_moments,
        }
    }

    pub(crate) fn biorthogonal(
        name: &'static str,
        h0: Vec<f64>,
        h1: Vec<f64>,
        vanishing_moments: u32,
    ) -> Self {
        let g0 = quadrature_mirror(&h1);
        let g1 = quadrature_mirror(&h0);
        Wavelet {
            name,
            kind: WaveletKind::Biorthogonal,
            h0,
            g0,
            h1,
            g1,
            vanishing_moments,
        }
    }
}

/// The quadrature-mirror relation from spec §3: `g[k] = (-1)^k * h[L-1-k]`.
pub(crate) fn quadrature_mirror(h: &[f64]) -> Vec<f64> {
    let l = h.len();
    (0..l)
        .map(|k| {
            let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
            sign * h[l - 1 - k]
        })
        .collect()
}

/// Boundary-handling policy for the MODWT's circular/aware convolution (C2).
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BoundaryMode {
    /// Out-of-range indices wrap modulo the signal length (true non-negative
    /// remainder).
    Periodic,
    /// Out-of-range indices contribute zero.
    ZeroPadding,
    /// Out-of-range indices reflect without duplicating the boundary sample.
    Symmetric,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qmf_relation_holds_for_haar() {
        let frac = std::f64::consts::FRAC_1_SQRT_2;
        let h0 = vec![frac, frac];
        let g0 = quadrature_mirror(&h0);
        assert!((g0[0] - frac).abs() < 1e-12);
        assert!((g0[1] + frac).abs() < 1e-12);
    }
}
