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
//! Index-reflection helpers shared by the MODWT's symmetric boundary mode
//! (C2) and the padding strategies that mirror a signal about its edges
//! (C5). Kept in one place so both call sites agree on what "reflect" and
//! "whole-point mirror" mean at the one sample that is easy to get off by
//! one: the boundary itself.

/// Maps a (possibly out-of-range, possibly negative) index to `[0, n)` by
/// reflecting about the boundary *without* duplicating the edge sample
/// (period `2*(n-1)`). This is both spec §4.2's `Symmetric` MODWT boundary
/// mode and spec §4.5's `Reflect` padding strategy.
pub(crate) fn reflect_index(t: isize, n: usize) -> usize {
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n as isize - 1);
    let mut m = t % period;
    if m < 0 {
        m += period;
    }
    if m >= n as isize { (period - m) as usize } else { m as usize }
}

/// Maps an index to `[0, n)` by reflecting about the boundary, duplicating
/// the edge sample (period `2*n`). Spec §4.5's `Symmetric(Whole)` padding.
pub(crate) fn whole_point_index(t: isize, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    let period = 2 * n as isize;
    let mut m = t % period;
    if m < 0 {
        m += period;
    }
    if m >= n as isize {
        (period - 1 - m) as usize
    } else {
        m as usize
    }
}

/// True modulo (non-negative remainder) used by the `Periodic` boundary
/// mode and padding strategy.
pub(crate) fn periodic_index(t: isize, n: usize) -> usize {
    let n = n as isize;
    (((t % n) + n) % n) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reflect_matches_numpy_reflect_convention() {
        // x = [1,2,3,4]; reflect-extended: ... 3 2 | 1 2 3 4 | 3 2 1 2 ...
        let n = 4;
        let extended: Vec<usize> = (4..8).map(|t| reflect_index(t, n)).collect();
        assert_eq!(extended, vec![2, 1, 0, 1]);
    }

    #[test]
    fn whole_point_duplicates_boundary() {
        let n = 4;
        assert_eq!(whole_point_index(4, n), 3);
        assert_eq!(whole_point_index(5, n), 2);
    }

    #[test]
    fn periodic_wraps_with_true_modulo() {
        assert_eq!(periodic_index(-1, 5), 4);
        assert_eq!(periodic_index(5, 5), 0);
    }
}
