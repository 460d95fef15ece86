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
//! The static wavelet registry (C1): named lookup, family enumeration, and
//! coefficient verification. Populated once behind a `OnceLock`, the same
//! one-shot-guard pattern the teacher uses for its cached spectrum-arithmetic
//! factory (`spetrum_arith::SpectrumArithmeticFactory`).
use super::continuous;
use super::discrete::{Wavelet, WaveletKind};
use crate::cwt::direct::{ComplexTimeDomainWavelet, TimeDomainWavelet};
use crate::err::VectorWaveError;
use std::collections::BTreeMap;
use std::sync::OnceLock;

const FRAC_1_SQRT_2: f64 = std::f64::consts::FRAC_1_SQRT_2;

fn registry() -> &'static BTreeMap<&'static str, Wavelet> {
    static REGISTRY: OnceLock<BTreeMap<&'static str, Wavelet>> = OnceLock::new();
    REGISTRY.get_or_init(build_registry)
}

fn build_registry() -> BTreeMap<&'static str, Wavelet> {
    catalog_entries()
        .into_iter()
        .map(|w| (w.name, w))
        .collect()
}

/// Literature-verified filter taps. Coverage decision recorded in
/// `DESIGN.md`: precise coefficients beyond these orders are the output of a
/// numerical spectral-factorization procedure that cannot be safely
/// transcribed from memory without a toolchain to check the factorization,
/// so `db6..db20`, `sym5..sym8`, `coif3..coif5`, and the biorthogonal spline
/// family are left out of the registry rather than risk silently-wrong
/// taps. `WaveletKind::Biorthogonal` and its dual-relation check are fully
/// implemented and unit-tested against a synthetic fixture even though no
/// catalog entry currently exercises them.
fn catalog_entries() -> Vec<Wavelet> {
    vec![
        Wavelet::orthogonal("haar", vec![FRAC_1_SQRT_2, FRAC_1_SQRT_2], 1),
        Wavelet::orthogonal(
            "db2",
            vec![
                0.482962913144690,
                0.836516303737469,
                0.224143868041857,
                -0.129409522550921,
            ],
            2,
        ),
        Wavelet::orthogonal(
            "db3",
            vec![
                0.332670552950085,
                0.806891509311093,
                0.459877502118491,
                -0.135011020010255,
                -0.085441273882027,
                0.035226291885710,
            ],
            3,
        ),
        Wavelet::orthogonal(
            "db4",
            vec![
                0.230377813308896,
                0.714846570552915,
                0.630880767929859,
                -0.027983769416859,
                -0.187034811719093,
                0.030841381835561,
                0.032883011666885,
                -0.010597401785069,
            ],
            4,
        ),
        Wavelet::orthogonal(
            "db5",
            vec![
                0.160102397974187,
                0.603829269797189,
                0.724308528437772,
                0.138428145901103,
                -0.242294887066382,
                -0.032244869584638,
                0.077571493840046,
                -0.006241490213011,
                -0.012580751999082,
                0.003335725285474,
            ],
            5,
        ),
        // sym2 coincides exactly with db2 (the least-asymmetric solution at
        // order 2 is the same filter).
        Wavelet::orthogonal(
            "sym2",
            vec![
                0.482962913144690,
                0.836516303737469,
                0.224143868041857,
                -0.129409522550921,
            ],
            2,
        ),
        // sym3 coincides exactly with db3, for the same reason.
        Wavelet::orthogonal(
            "sym3",
            vec![
                0.332670552950085,
                0.806891509311093,
                0.459877502118491,
                -0.135011020010255,
                -0.085441273882027,
                0.035226291885710,
            ],
            3,
        ),
        Wavelet::orthogonal(
            "sym4",
            vec![
                -0.075765714789341,
                -0.029635527645954,
                0.497618667632564,
                0.803738751805216,
                0.297857795605542,
                -0.099219543576848,
                -0.012603967262122,
                0.032223100604071,
            ],
            4,
        ),
        Wavelet::orthogonal(
            "coif1",
            vec![
                -0.015655728135465,
                -0.072732619512575,
                0.384864846864858,
                0.852572020212255,
                0.337897662457809,
                -0.072732619512575,
            ],
            2,
        ),
        Wavelet::orthogonal(
            "coif2",
            vec![
                -0.000720549445364,
                -0.001823208870703,
                0.005611434819394,
                0.023680171946334,
                -0.059434418646457,
                -0.076488599078306,
                0.417005184423780,
                0.812723635445542,
                0.386110066822794,
                -0.067372554721963,
                -0.041464936781960,
                0.016387336463522,
            ],
            4,
        ),
    ]
}

/// Looks up a discrete wavelet by its canonical tag (§4.1). Lookup is
/// case-insensitive.
pub fn get(name: &str) -> Result<Wavelet, VectorWaveError> {
    let key = name.to_ascii_lowercase();
    registry()
        .get(key.as_str())
        .cloned()
        .ok_or_else(|| VectorWaveError::InvalidArgument(format!("unknown wavelet '{name}'")))
}

/// Looks up a real-valued continuous wavelet by name (`morl`, `shan`,
/// `dogN`/`gausN`) for the time-domain CWT path. Returns `InvalidArgument`
/// both for names outside this family and for an out-of-range order.
pub fn get_continuous_real(name: &str) -> Result<Box<dyn TimeDomainWavelet>, VectorWaveError> {
    continuous::resolve_real(name)
        .unwrap_or_else(|| Err(VectorWaveError::InvalidArgument(format!("unknown continuous wavelet '{name}'"))))
}

/// Looks up the complex-valued Paul wavelet family (`paul1`..`paul8`) for
/// the complex time-domain CWT path.
pub fn get_continuous_complex(name: &str) -> Result<Box<dyn ComplexTimeDomainWavelet>, VectorWaveError> {
    continuous::resolve_complex(name)
        .unwrap_or_else(|| Err(VectorWaveError::InvalidArgument(format!("unknown continuous wavelet '{name}'"))))
}

/// Groups registered discrete wavelet names by family prefix (the
/// alphabetic run before the first digit or `.`).
pub fn list_by_family() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut families: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for &name in registry().keys() {
        let prefix_len = name
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(name.len());
        families.entry(&name[..prefix_len]).or_default().push(name);
    }
    families
}

/// Checks normalization (`sum h0 == sqrt(2)` within `1e-10`), orthogonality
/// (`sum h0^2 == 1` within `1e-10`) and the quadrature-mirror relation for
/// orthogonal wavelets; for biorthogonal wavelets, checks the dual relation
/// `sum_k h0[k] * h1[k + 2m] == delta(m)`.
pub fn verify_coefficients(w: &Wavelet) -> bool {
    const TOL: f64 = 1e-10;
    let sum_h0: f64 = w.h0.iter().sum();
    if (sum_h0 - std::f64::consts::SQRT_2).abs() > TOL {
        return false;
    }
    let sum_h0_sq: f64 = w.h0.iter().map(|&c| c * c).sum();
    if (sum_h0_sq - 1.0).abs() > TOL {
        return false;
    }
    match w.kind {
        WaveletKind::Orthogonal => {
            let l = w.h0.len();
            w.g0.iter().enumerate().all(|(k, &g)| {
                let sign = if k % 2 == 0 { 1.0 } else { -1.0 };
                (g - sign * w.h0[l - 1 - k]).abs() <= TOL
            })
        }
        WaveletKind::Biorthogonal => verify_dual_relation(&w.h0, &w.h1, TOL),
    }
}

/// `sum_k h0[k] * h1[k + 2m] == delta(m)` for every valid shift `m`.
fn verify_dual_relation(h0: &[f64], h1: &[f64], tol: f64) -> bool {
    let l0 = h0.len() as isize;
    let l1 = h1.len() as isize;
    let max_shift = (l0.max(l1)) / 2 + 1;
    for m in -max_shift..=max_shift {
        let mut acc = 0.0;
        for (k, &a) in h0.iter().enumerate() {
            let j = k as isize + 2 * m;
            if j >= 0 && j < l1 {
                acc += a * h1[j as usize];
            }
        }
        let expected = if m == 0 { 1.0 } else { 0.0 };
        if (acc - expected).abs() > tol {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(get("HAAR").unwrap().name, "haar");
        assert_eq!(get("Db2").unwrap().name, "db2");
    }

    #[test]
    fn unknown_name_is_invalid_argument() {
        assert!(matches!(get("db17"), Err(VectorWaveError::InvalidArgument(_))));
    }

    #[test]
    fn every_catalog_entry_verifies() {
        for w in catalog_entries() {
            assert!(verify_coefficients(&w), "{} failed verification", w.name);
        }
    }

    #[test]
    fn families_group_related_names() {
        let families = list_by_family();
        let db_family = &families["db"];
        assert!(db_family.contains(&"db2"));
        assert!(db_family.contains(&"db5"));
    }

    #[test]
    fn continuous_real_lookup_covers_named_families() {
        assert!(get_continuous_real("morl").is_ok());
        assert!(get_continuous_real("dog4").is_ok());
        assert!(get_continuous_real("unknown").is_err());
    }

    #[test]
    fn continuous_complex_lookup_covers_paul_family() {
        assert!(get_continuous_complex("paul3").is_ok());
        assert!(get_continuous_complex("morl").is_err());
    }

    #[test]
    fn synthetic_biorthogonal_dual_relation_holds() {
        // A trivial but genuine biorthogonal pair: both sides are the Haar
        // filter, which satisfies orthogonality *and* the weaker dual
        // relation, exercising the `Biorthogonal` code path end to end.
        let w = Wavelet::biorthogonal(
            "synthetic-bior",
            vec![FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            vec![FRAC_1_SQRT_2, FRAC_1_SQRT_2],
            1,
        );
        assert!(verify_coefficients(&w));
    }
}
