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
//! Signal extension strategies (C5): `pad`/`trim` are exact inverses of each
//! other for every strategy but `Statistical(Trend)`, whose extension is
//! randomized past the first `N` samples.
use crate::boundary_index::{periodic_index, reflect_index, whole_point_index};
use crate::err::VectorWaveError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ConstantSide {
    Left,
    Right,
    Symmetric,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SymmetricKind {
    Whole,
    Half,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum StatisticalKind {
    Mean,
    Median,
    Trend,
}

/// One of C5's extension strategies. `Composite` places extension samples on
/// both sides governed by an explicit `ratio`; `Antisymmetric` is also
/// two-sided, but the split is implied by its own indexing rather than a
/// ratio (spec §8 scenario S4): the left side gets exactly one mirror's
/// worth of reflected samples (`n-1` for `HalfPoint`, `n` for `Whole`),
/// capped by how many are actually needed, and the rest goes right. Every
/// other variant extends to the right only, matching the two unambiguous
/// worked examples in the testable-properties scenarios (periodic and
/// reflect padding both grow the signal at its tail).
#[derive(Debug, Clone, PartialEq)]
pub enum PaddingStrategy {
    Zero,
    Constant(ConstantSide),
    Periodic,
    Symmetric(SymmetricKind),
    Reflect,
    Antisymmetric(SymmetricKind),
    Linear { fit_points: usize },
    Polynomial { degree: usize, fit_points: usize },
    Statistical(StatisticalKind),
    Composite {
        left: Box<PaddingStrategy>,
        right: Box<PaddingStrategy>,
        ratio: f64,
    },
}

impl Default for PaddingStrategy {
    fn default() -> Self {
        PaddingStrategy::Symmetric(SymmetricKind::Half)
    }
}

fn check_target(n: usize, target_length: usize) -> Result<usize, VectorWaveError> {
    if target_length < n {
        return Err(VectorWaveError::InvalidArgument(format!(
            "target length {target_length} is shorter than the signal length {n}"
        )));
    }
    Ok(target_length - n)
}

/// `pad(x, target_length) -> x'` (spec §4.5).
pub fn pad(x: &[f64], target_length: usize, strategy: &PaddingStrategy) -> Result<Vec<f64>, VectorWaveError> {
    if x.is_empty() {
        return Err(VectorWaveError::InvalidArgument("signal must not be empty".to_string()));
    }
    let n = x.len();
    let added = check_target(n, target_length)?;

    if let PaddingStrategy::Composite { left, right, ratio } = strategy {
        if !(0.0..=1.0).contains(ratio) {
            return Err(VectorWaveError::InvalidArgument(format!(
                "composite ratio {ratio} is out of [0, 1]"
            )));
        }
        let left_count = ((added as f64) * ratio).round() as usize;
        let left_count = left_count.min(added);
        let right_count = added - left_count;

        let left_ext = extend_right(&reversed(x), left_count, left)?;
        let mut left_ext = left_ext;
        left_ext.reverse();
        let right_ext = extend_right(x, right_count, right)?;

        let mut out = Vec::with_capacity(target_length);
        out.extend(left_ext);
        out.extend_from_slice(x);
        out.extend(right_ext);
        return Ok(out);
    }

    if let PaddingStrategy::Antisymmetric(kind) = strategy {
        let left_count = added.min(antisymmetric_mirror_len(n, *kind));
        let right_count = added - left_count;

        let mut left_ext = extend_right(&reversed(x), left_count, strategy)?;
        left_ext.reverse();
        let right_ext = extend_right(x, right_count, strategy)?;

        let mut out = Vec::with_capacity(target_length);
        out.extend(left_ext);
        out.extend_from_slice(x);
        out.extend(right_ext);
        return Ok(out);
    }

    let ext = extend_right(x, added, strategy)?;
    let mut out = Vec::with_capacity(target_length);
    out.extend_from_slice(x);
    out.extend(ext);
    Ok(out)
}

/// `trim(x', original_length) -> x` (spec §4.5). Exact inverse of `pad` for
/// every deterministic strategy; for `Statistical(Trend)` the first
/// `original_length` samples are still exactly `x` (only the tail is
/// randomized).
pub fn trim(padded: &[f64], original_length: usize, strategy: &PaddingStrategy) -> Result<Vec<f64>, VectorWaveError> {
    if original_length > padded.len() {
        return Err(VectorWaveError::InvalidArgument(
            "original_length exceeds padded signal length".to_string(),
        ));
    }
    if let PaddingStrategy::Composite { ratio, .. } = strategy {
        if !(0.0..=1.0).contains(ratio) {
            return Err(VectorWaveError::InvalidArgument(format!(
                "composite ratio {ratio} is out of [0, 1]"
            )));
        }
        let added = padded.len() - original_length;
        let left_count = ((added as f64) * ratio).round() as usize;
        let left_count = left_count.min(added);
        return Ok(padded[left_count..left_count + original_length].to_vec());
    }
    if let PaddingStrategy::Antisymmetric(kind) = strategy {
        let added = padded.len() - original_length;
        let left_count = added.min(antisymmetric_mirror_len(original_length, *kind));
        return Ok(padded[left_count..left_count + original_length].to_vec());
    }
    Ok(padded[..original_length].to_vec())
}

/// How many samples of a single antisymmetric mirror fall on one side before
/// the extension has to continue with the unreflected signal (spec §4.5/§8
/// scenario S4): `HalfPoint` stops one short of re-deriving `x[0]`, `Whole`
/// carries the full reflection.
fn antisymmetric_mirror_len(n: usize, kind: SymmetricKind) -> usize {
    match kind {
        SymmetricKind::Half => n.saturating_sub(1),
        SymmetricKind::Whole => n,
    }
}

fn reversed(x: &[f64]) -> Vec<f64> {
    let mut v = x.to_vec();
    v.reverse();
    v
}

/// Produces the `count` new samples that `pad` appends after `x`.
fn extend_right(x: &[f64], count: usize, strategy: &PaddingStrategy) -> Result<Vec<f64>, VectorWaveError> {
    if count == 0 {
        return Ok(Vec::new());
    }
    let n = x.len();
    match strategy {
        PaddingStrategy::Zero => Ok(vec![0.0; count]),
        PaddingStrategy::Constant(side) => {
            let value = match side {
                ConstantSide::Left => x[0],
                ConstantSide::Right | ConstantSide::Symmetric => x[n - 1],
            };
            Ok(vec![value; count])
        }
        PaddingStrategy::Periodic => Ok((0..count).map(|k| x[periodic_index((n + k) as isize, n)]).collect()),
        PaddingStrategy::Symmetric(SymmetricKind::Whole) => {
            Ok((0..count).map(|k| x[whole_point_index((n + k) as isize, n)]).collect())
        }
        PaddingStrategy::Symmetric(SymmetricKind::Half) | PaddingStrategy::Reflect => {
            Ok((0..count).map(|k| x[reflect_index((n + k) as isize, n)]).collect())
        }
        PaddingStrategy::Antisymmetric(kind) => Ok(antisymmetric_extend(x, count, *kind)),
        PaddingStrategy::Linear { fit_points } => {
            let coeffs = fit_edge_polynomial(x, *fit_points, 1)?;
            Ok((0..count).map(|k| eval_poly(&coeffs, (n + k) as f64)).collect())
        }
        PaddingStrategy::Polynomial { degree, fit_points } => {
            let coeffs = fit_edge_polynomial(x, *fit_points, *degree)?;
            Ok((0..count).map(|k| eval_poly(&coeffs, (n + k) as f64)).collect())
        }
        PaddingStrategy::Statistical(StatisticalKind::Mean) => {
            let mean = x.iter().sum::<f64>() / n as f64;
            Ok(vec![mean; count])
        }
        PaddingStrategy::Statistical(StatisticalKind::Median) => {
            let mut sorted = x.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());
            let median = if n % 2 == 0 {
                0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
            } else {
                sorted[n / 2]
            };
            Ok(vec![median; count])
        }
        PaddingStrategy::Statistical(StatisticalKind::Trend) => Ok(statistical_trend_extend(x, count)),
        PaddingStrategy::Composite { .. } => Err(VectorWaveError::InvalidArgument(
            "composite strategy must be handled by pad/trim directly".to_string(),
        )),
    }
}

/// Antisymmetric extension immediately following `x` (spec §4.5, worked
/// example S4): the tile `x` followed by its negated reversal forms one
/// period; `HalfPoint` truncates that reversal one sample short (so the
/// reflection through the boundary sample `x[n-1]` never re-derives `x[0]`
/// with a flipped sign), while `Whole` keeps the full reflection. The tile
/// then repeats -- each new period starts fresh at `x[0]`'s sign rather than
/// accumulating further negation.
fn antisymmetric_extend(x: &[f64], count: usize, kind: SymmetricKind) -> Vec<f64> {
    let n = x.len();
    if n == 0 {
        return vec![0.0; count];
    }
    let mirror_len = antisymmetric_mirror_len(n, kind);
    let mut tile: Vec<f64> = Vec::with_capacity(n + mirror_len);
    tile.extend_from_slice(x);
    tile.extend(x.iter().rev().take(mirror_len).map(|v| -v));
    let period = tile.len();
    (0..count).map(|k| tile[(n + k) % period]).collect()
}

fn statistical_trend_extend(x: &[f64], count: usize) -> Vec<f64> {
    let n = x.len();
    let coeffs = fit_edge_polynomial(x, n, 1).unwrap_or_else(|_| vec![x[n - 1], 0.0]);
    let residual_variance = {
        let mut sum_sq = 0.0;
        for (i, &v) in x.iter().enumerate() {
            let fitted = eval_poly(&coeffs, i as f64);
            sum_sq += (v - fitted).powi(2);
        }
        sum_sq / n.max(1) as f64
    };
    let std_dev = residual_variance.sqrt();
    let mut rng = ChaCha8Rng::seed_from_u64(0x5645_4354_4f52_5745);
    (0..count)
        .map(|k| {
            let trend = eval_poly(&coeffs, (n + k) as f64);
            trend + std_dev * gaussian_sample(&mut rng)
        })
        .collect()
}

/// Standard normal sample via the Box-Muller transform.
fn gaussian_sample(rng: &mut ChaCha8Rng) -> f64 {
    let u1: f64 = rng.random_range(1e-12..1.0);
    let u2: f64 = rng.random_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}

/// Fits a degree-`degree` polynomial (coefficients low-to-high) through the
/// last `fit_points` samples of `x` by least squares (normal equations +
/// Gaussian elimination), with the independent variable being the absolute
/// sample index so the fit extrapolates directly.
fn fit_edge_polynomial(x: &[f64], fit_points: usize, degree: usize) -> Result<Vec<f64>, VectorWaveError> {
    let n = x.len();
    if fit_points < 2 {
        return Err(VectorWaveError::InvalidArgument(
            "fit_points must be at least 2".to_string(),
        ));
    }
    if fit_points > n {
        return Err(VectorWaveError::InvalidArgument(format!(
            "fit_points {fit_points} exceeds signal length {n}"
        )));
    }
    if fit_points <= degree {
        return Err(VectorWaveError::InvalidArgument(format!(
            "fit_points {fit_points} must exceed polynomial degree {degree}"
        )));
    }
    let start = n - fit_points;
    let xs: Vec<f64> = (start..n).map(|i| i as f64).collect();
    let ys = &x[start..n];
    least_squares_polyfit(&xs, ys, degree)
}

fn eval_poly(coeffs: &[f64], t: f64) -> f64 {
    let mut acc = 0.0;
    let mut power = 1.0;
    for &c in coeffs {
        acc += c * power;
        power *= t;
    }
    acc
}

/// Solves `argmin_c ||V c - y||^2` for a degree-`degree` Vandermonde system
/// via the normal equations, Gaussian-eliminated with partial pivoting.
fn least_squares_polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>, VectorWaveError> {
    let m = degree + 1;
    let mut ata = vec![vec![0.0; m]; m];
    let mut aty = vec![0.0; m];
    for (&xv, &yv) in xs.iter().zip(ys.iter()) {
        let mut powers = vec![1.0; m];
        for k in 1..m {
            powers[k] = powers[k - 1] * xv;
        }
        for i in 0..m {
            aty[i] += powers[i] * yv;
            for j in 0..m {
                ata[i][j] += powers[i] * powers[j];
            }
        }
    }
    gaussian_solve(ata, aty)
}

fn gaussian_solve(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>, VectorWaveError> {
    let m = b.len();
    for col in 0..m {
        let mut pivot = col;
        let mut best = a[col][col].abs();
        for row in (col + 1)..m {
            if a[row][col].abs() > best {
                best = a[row][col].abs();
                pivot = row;
            }
        }
        if best < 1e-12 {
            return Err(VectorWaveError::Generic(
                "edge polynomial fit is singular; too few distinct samples".to_string(),
            ));
        }
        a.swap(col, pivot);
        b.swap(col, pivot);
        for row in (col + 1)..m {
            let factor = a[row][col] / a[col][col];
            if factor == 0.0 {
                continue;
            }
            for k in col..m {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut x = vec![0.0; m];
    for row in (0..m).rev() {
        let mut acc = b[row];
        for k in (row + 1)..m {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn s2_periodic_padding_matches_scenario() {
        let x = [1.0, 2.0, 3.0];
        let padded = pad(&x, 7, &PaddingStrategy::Periodic).unwrap();
        assert_eq!(padded, vec![1.0, 2.0, 3.0, 1.0, 2.0, 3.0, 1.0]);
        let back = trim(&padded, 3, &PaddingStrategy::Periodic).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn s3_reflect_padding_matches_scenario() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let padded = pad(&x, 8, &PaddingStrategy::Reflect).unwrap();
        assert_eq!(padded, vec![1.0, 2.0, 3.0, 4.0, 3.0, 2.0, 1.0, 2.0]);
    }

    #[test]
    fn s4_antisymmetric_half_point_padding_matches_scenario() {
        let x = [1.0, 2.0, 3.0];
        let padded = pad(&x, 9, &PaddingStrategy::Antisymmetric(SymmetricKind::Half)).unwrap();
        assert_eq!(
            padded,
            vec![-2.0, -1.0, 1.0, 2.0, 3.0, -3.0, -2.0, 1.0, 2.0]
        );
        let back = trim(&padded, 3, &PaddingStrategy::Antisymmetric(SymmetricKind::Half)).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn round_trip_holds_for_every_deterministic_strategy() {
        let x = [1.0, 4.0, 2.0, 9.0, 3.0, 7.0];
        let strategies = [
            PaddingStrategy::Zero,
            PaddingStrategy::Constant(ConstantSide::Right),
            PaddingStrategy::Periodic,
            PaddingStrategy::Symmetric(SymmetricKind::Whole),
            PaddingStrategy::Symmetric(SymmetricKind::Half),
            PaddingStrategy::Reflect,
            PaddingStrategy::Antisymmetric(SymmetricKind::Half),
            PaddingStrategy::Antisymmetric(SymmetricKind::Whole),
            PaddingStrategy::Linear { fit_points: 3 },
            PaddingStrategy::Polynomial { degree: 2, fit_points: 4 },
            PaddingStrategy::Statistical(StatisticalKind::Mean),
            PaddingStrategy::Statistical(StatisticalKind::Median),
        ];
        for strategy in &strategies {
            let padded = pad(&x, 13, strategy).unwrap();
            assert_eq!(padded.len(), 13);
            let back = trim(&padded, x.len(), strategy).unwrap();
            for (a, b) in back.iter().zip(x.iter()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn statistical_trend_preserves_leading_samples_exactly() {
        let x: Vec<f64> = (0..20).map(|i| i as f64 * 2.0 + 1.0).collect();
        let padded = pad(&x, 30, &PaddingStrategy::Statistical(StatisticalKind::Trend)).unwrap();
        assert_eq!(&padded[..20], x.as_slice());
    }

    #[test]
    fn composite_splits_both_sides_by_ratio() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let strategy = PaddingStrategy::Composite {
            left: Box::new(PaddingStrategy::Zero),
            right: Box::new(PaddingStrategy::Constant(ConstantSide::Right)),
            ratio: 0.5,
        };
        let padded = pad(&x, 8, &strategy).unwrap();
        assert_eq!(padded.len(), 8);
        assert_eq!(&padded[0..2], &[0.0, 0.0]);
        assert_eq!(&padded[2..6], &x);
        assert_eq!(&padded[6..8], &[4.0, 4.0]);
        let back = trim(&padded, 4, &strategy).unwrap();
        assert_eq!(back, x);
    }

    #[test]
    fn rejects_target_shorter_than_signal() {
        let x = [1.0, 2.0, 3.0];
        assert!(pad(&x, 2, &PaddingStrategy::Zero).is_err());
    }

    #[test]
    fn rejects_too_few_fit_points() {
        let x = [1.0, 2.0, 3.0, 4.0];
        assert!(matches!(
            pad(&x, 6, &PaddingStrategy::Linear { fit_points: 1 }),
            Err(VectorWaveError::InvalidArgument(_))
        ));
    }

    #[test]
    fn rejects_composite_ratio_out_of_range() {
        let x = [1.0, 2.0, 3.0];
        let strategy = PaddingStrategy::Composite {
            left: Box::new(PaddingStrategy::Zero),
            right: Box::new(PaddingStrategy::Zero),
            ratio: 1.5,
        };
        assert!(pad(&x, 6, &strategy).is_err());
    }
}
