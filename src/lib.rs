/*
 * // Copyright (c) Radzivon Bartoshyk 12/2025. All rights reserved.
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
#![allow(clippy::excessive_precision)]
#![cfg_attr(
    all(feature = "fcma", target_arch = "aarch64"),
    feature(stdarch_neon_fcma)
)]
#[cfg(all(target_arch = "x86_64", feature = "avx"))]
mod avx;
mod boundary_index;
mod cwt;
mod cwt_executor;
mod cwt_filter;
mod denoise;
mod err;
mod executor;
mod factory;
mod fft;
mod filter_arith;
mod freqs;
mod mla;
mod modwt;
#[cfg(all(target_arch = "aarch64", feature = "neon"))]
mod neon;
mod padding;
mod sample;
mod scale_bounds;
mod scales;
mod spetrum_arith;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
mod streaming;
mod wavelets;

use crate::factory::create_cwt;
use crate::freqs::scale_to_frequencies_impl;
pub use cwt_filter::CwtWavelet;
pub use err::VectorWaveError;
use num_complex::Complex;
use std::sync::Arc;
pub use wavelets::{CmhatWavelet, HhhatWavelet, MorletWavelet};

pub use denoise::{StreamingDenoiser, StreamingNoiseWindow, ThresholdEstimator, ThresholdRule};
pub use executor::{CancelToken, Executor, ParallelStrategy};
pub use modwt::{ModwtResult, MultiLevelModwtResult};
pub use padding::{ConstantSide, PaddingResult, PaddingStrategy, SignalCharacteristics, StatisticalKind, SymmetricKind};
pub use streaming::{BackpressurePolicy, StreamingConfig, StreamingHandle, StreamingSubscriber};
pub use wavelets::discrete::{BoundaryMode, Wavelet, WaveletKind};

/// `forward_modwt(signal, wavelet_name, boundary_mode) -> (A, D)` (spec §6):
/// single-level MODWT, looking the wavelet up by its catalog name.
pub fn forward_modwt(x: &[f64], wavelet_name: &str, mode: BoundaryMode) -> Result<ModwtResult, VectorWaveError> {
    let wavelet = wavelets::catalog::get(wavelet_name)?;
    modwt::single_level::forward(x, &wavelet, mode)
}

/// `inverse_modwt(A, D, wavelet_name, boundary_mode) -> signal` (spec §6).
pub fn inverse_modwt(a: &[f64], d: &[f64], wavelet_name: &str, mode: BoundaryMode) -> Result<Vec<f64>, VectorWaveError> {
    let wavelet = wavelets::catalog::get(wavelet_name)?;
    modwt::single_level::inverse(a, d, &wavelet, mode)
}

/// `decompose_modwt(signal, wavelet_name, boundary_mode, levels) -> A_J, D_1..D_J`
/// (spec §6): the cascaded multi-level MODWT.
pub fn decompose_modwt(
    x: &[f64],
    wavelet_name: &str,
    mode: BoundaryMode,
    levels: usize,
) -> Result<MultiLevelModwtResult, VectorWaveError> {
    let wavelet = wavelets::catalog::get(wavelet_name)?;
    modwt::multi_level::decompose(x, &wavelet, mode, levels)
}

/// Same contract as [`decompose_modwt`], but dispatched across `executor`
/// per the scale-/chunk-/hybrid-parallel selector from spec §4.4 rather than
/// always running sequentially.
pub fn decompose_modwt_with_executor(
    x: &[f64],
    wavelet_name: &str,
    mode: BoundaryMode,
    levels: usize,
    executor: &Executor,
) -> Result<MultiLevelModwtResult, VectorWaveError> {
    let wavelet = wavelets::catalog::get(wavelet_name)?;
    executor.install(|| modwt::multi_level::decompose_with_executor(x, &wavelet, mode, levels, Some(executor)))
}

/// `reconstruct_modwt(result, wavelet_name, boundary_mode) -> signal` (spec §6).
pub fn reconstruct_modwt(
    result: &MultiLevelModwtResult,
    wavelet_name: &str,
    mode: BoundaryMode,
) -> Result<Vec<f64>, VectorWaveError> {
    let wavelet = wavelets::catalog::get(wavelet_name)?;
    modwt::multi_level::reconstruct(result, &wavelet, mode)
}

/// `cwt(signal, wavelet_name, scales, boundary_mode) -> matrix[S x N]` (spec
/// §6): the real-valued time-domain CWT, direct or FFT-accelerated
/// depending on size. Complex analytic wavelets (the `paulN` family) are
/// not reachable through this entry point -- call
/// [`cwt::analyze_complex`](crate::cwt::analyze_complex) directly with
/// [`wavelets::catalog::get_continuous_complex`](crate::wavelets::catalog::get_continuous_complex).
pub fn cwt(x: &[f64], wavelet_name: &str, scales: &[f64], mode: BoundaryMode) -> Result<Vec<Vec<f64>>, VectorWaveError> {
    let wavelet = wavelets::catalog::get_continuous_real(wavelet_name)?;
    cwt::analyze(x, wavelet.as_ref(), scales, mode)
}

/// Same contract as [`cwt`], but dispatched across `executor` per the
/// scale-/chunk-parallel selector from spec §4.8 rather than always running
/// sequentially.
pub fn cwt_with_executor(
    x: &[f64],
    wavelet_name: &str,
    scales: &[f64],
    mode: BoundaryMode,
    executor: &Executor,
) -> Result<Vec<Vec<f64>>, VectorWaveError> {
    let wavelet = wavelets::catalog::get_continuous_real(wavelet_name)?;
    executor.install(|| cwt::analyze_with_executor(x, wavelet.as_ref(), scales, mode, Some(executor)))
}

/// `pad(signal, target_length, strategy) -> signal'` (spec §6).
pub fn pad(x: &[f64], target_length: usize, strategy: &PaddingStrategy) -> Result<Vec<f64>, VectorWaveError> {
    padding::strategies::pad(x, target_length, strategy)
}

/// `trim(signal', original_length, strategy) -> signal` (spec §6).
pub fn trim(padded: &[f64], original_length: usize, strategy: &PaddingStrategy) -> Result<Vec<f64>, VectorWaveError> {
    padding::strategies::trim(padded, original_length, strategy)
}

/// `select_adaptive(signal, target_length) -> (strategy, characteristics)`
/// (spec §6): runs the C6 decision tree over the signal's measured
/// characteristics to choose an extension strategy for the requested length.
pub fn select_adaptive(x: &[f64], target_length: usize) -> Result<PaddingResult, VectorWaveError> {
    padding::adaptive::select_adaptive(x, target_length)
}

/// `denoise(signal, wavelet_name, boundary_mode, levels, rule, estimator) ->
/// signal` (spec §6).
pub fn denoise(
    x: &[f64],
    wavelet_name: &str,
    mode: BoundaryMode,
    levels: usize,
    rule: ThresholdRule,
    estimator: ThresholdEstimator,
) -> Result<Vec<f64>, VectorWaveError> {
    let wavelet = wavelets::catalog::get(wavelet_name)?;
    denoise::denoise(x, &wavelet, mode, levels, rule, estimator)
}

/// `open_streaming(config, subscriber) -> StreamingHandle` (spec §6/§4.9):
/// opens a live streaming MODWT session over a sliding window.
pub fn open_streaming(
    config: StreamingConfig,
    subscriber: StreamingSubscriber,
) -> Result<StreamingHandle, VectorWaveError> {
    streaming::open_streaming(config, subscriber)
}

/// Configuration options for the Continuous Wavelet Transform (CWT).
///
/// `CwtOptions` controls how scales are generated and how the resulting
/// wavelet coefficients are normalized. These parameters affect the
/// time–frequency resolution, redundancy, and amplitude interpretation
/// of the transform.
#[derive(Debug, Copy, Clone, Hash, Ord, PartialOrd, Eq, PartialEq)]
pub struct CwtOptions {
    /// Scale generation strategy.
    ///
    /// Determines how scales are distributed (e.g. logarithmic or linear)
    /// and how `nv` is interpreted.
    pub scale_type: ScaleType,
    /// Number of voices per octave **or** total number of scales.
    ///
    /// The exact meaning depends on `scale_type`:
    /// - For logarithmic scales, `nv` specifies the number of voices per octave.
    /// - For linear scales, `nv` specifies the total number of scales.
    ///
    /// Larger values increase frequency resolution and redundancy at the
    /// cost of higher computational complexity.
    pub nv: usize,
    /// Whether to L1-normalize the CWT, which yields a more representative
    /// distribution of energies and component amplitudes than L2 (see [3]).
    /// If False (default True), uses L2 norm.
    pub l1_norm: bool,
}

impl Default for CwtOptions {
    fn default() -> Self {
        Self {
            nv: 32,
            scale_type: ScaleType::Log,
            l1_norm: true,
        }
    }
}

/// Defines the core functionality for executing a Continuous Wavelet Transform (CWT).
///
/// Implementors of this trait handle the pre-calculation of wavelet filters
/// and the efficient execution of the CWT against an input signal.
pub trait CwtExecutor<T> {
    /// Executes the Continuous Wavelet Transform on the input signal.
    ///
    /// The output is a 2D vector representing the scalogram. Each inner `Vec<Complex<T>>`
    /// corresponds to the wavelet coefficients for one scale (row), containing coefficients
    /// across the time axis (columns).
    /// The resulting dimensions are: `[num_scales, input_length]`.
    fn execute(&self, input: &[T]) -> Result<Vec<Vec<Complex<T>>>, VectorWaveError>;
    /// Executes the Continuous Wavelet Transform on a **complex-valued** input signal.
    ///
    /// This method allows direct analysis of analytic signals or signals that
    /// have already been transformed into the complex domain.
    ///
    /// # Parameters
    /// - `input`: Complex-valued time-domain signal to be analyzed.
    ///
    /// # Returns
    /// A two-dimensional vector representing the **scalogram**, with the same
    /// layout and interpretation as [`execute`](Self::execute).
    ///
    /// # Errors
    /// Returns `VectorWaveError` if the input length is incompatible with the
    /// executor configuration or if an internal FFT operation fails.
    fn execute_complex(&self, input: &[Complex<T>]) -> Result<Vec<Vec<Complex<T>>>, VectorWaveError>;
    /// Returns the expected length of the input signal this executor was built for.
    ///
    /// This is typically used to pre-calculate necessary internal parameters or
    /// check against the input signal length during `execute`.
    fn length(&self) -> usize;
    /// Provides a zero-copy view of the scale values used for this CWT instance.
    ///
    /// These values represent the dilation parameter 'a' for each step in the transform,
    /// and they are inversely proportional to the pseudo-frequency.
    ///
    /// # Returns
    ///
    /// An immutable slice (`&[T]`) containing the pre-calculated scale values.
    fn view_scales(&self) -> &[T];
}

/// The main entry point for constructing CWT executors.
///
/// `Scalet` provides convenient factory methods for creating pre-configured CWT executors,
/// handling the initialization of the chosen wavelet (e.g., Morlet) and the scale generation.
pub struct Scalet {}

impl Scalet {
    /// Creates a CWT executor configured for single-precision floating-point numbers (`f32`)
    /// using the default **Morlet Wavelet**.
    ///
    /// The resulting `CwtExecutor` is wrapped in an `Arc` for thread-safe sharing and
    /// object-safe dynamic dispatch.
    ///
    /// # Arguments
    ///
    /// * `length` - The expected length of the signal the executor will process.
    ///
    /// # Returns
    ///
    /// A `Result` containing an `Arc<dyn CwtExecutor<f32>>` or a `VectorWaveError`.
    pub fn make_morlet_f32(
        length: usize,
        options: CwtOptions,
    ) -> Result<Arc<dyn CwtExecutor<f32> + Send + Sync>, VectorWaveError> {
        create_cwt(
            Arc::new(MorletWavelet::default()),
            length,
            options.scale_type,
            options,
        )
    }

    /// Creates a CWT executor configured for double-precision floating-point numbers (`f64`)
    /// using the default **Morlet Wavelet**.
    ///
    /// This is suitable for applications requiring higher precision. See `make_morlet_f32`
    /// for argument details.
    ///
    /// # Arguments
    ///
    /// * `length` - The expected length of the signal the executor will process.
    ///
    /// # Returns
    ///
    /// A `Result` containing an `Arc<dyn CwtExecutor<f64>>` or a `VectorWaveError`.
    pub fn make_morlet_f64(
        length: usize,
        options: CwtOptions,
    ) -> Result<Arc<dyn CwtExecutor<f64> + Send + Sync>, VectorWaveError> {
        create_cwt(
            Arc::new(MorletWavelet::default()),
            length,
            options.scale_type,
            options,
        )
    }

    /// Creates a CWT executor for **single-precision (`f32`)** using a custom wavelet.
    ///
    /// # Arguments
    ///
    /// * `wavelet` – A reference-counted, thread-safe wavelet implementing `CwtWavelet<f32>`.
    /// * `length` – The expected length of the signal the executor will process.
    /// * `options` – CWT configuration parameters controlling scales, voices, and normalization.
    ///
    /// # Returns
    ///
    /// A `Result` containing an `Arc<dyn CwtExecutor<f32> + Send + Sync>` on success,
    /// or a `VectorWaveError` if creation fails.
    pub fn make_cwt_f32(
        wavelet: Arc<dyn CwtWavelet<f32> + Send + Sync>,
        length: usize,
        options: CwtOptions,
    ) -> Result<Arc<dyn CwtExecutor<f32> + Send + Sync>, VectorWaveError> {
        create_cwt(wavelet, length, options.scale_type, options)
    }

    /// Creates a CWT executor for **double-precision (`f64`)** using a custom wavelet.
    ///
    /// # Arguments
    ///
    /// * `wavelet` – A reference-counted, thread-safe wavelet implementing `CwtWavelet<f64>`.
    /// * `length` – The expected length of the signal the executor will process.
    /// * `options` – CWT configuration parameters controlling scales, voices, and normalization.
    ///
    /// # Returns
    ///
    /// A `Result` containing an `Arc<dyn CwtExecutor<f64> + Send + Sync>` on success,
    /// or a `VectorWaveError` if creation fails.
    pub fn make_cwt_f64(
        wavelet: Arc<dyn CwtWavelet<f64> + Send + Sync>,
        length: usize,
        options: CwtOptions,
    ) -> Result<Arc<dyn CwtExecutor<f64> + Send + Sync>, VectorWaveError> {
        create_cwt(wavelet, length, options.scale_type, options)
    }

    /// Converts wavelet scales to corresponding frequencies (f32 version).
    ///
    /// # Arguments
    ///
    /// * `wavelet` - An `Arc` to a type implementing `CwtWavelet<f32>`, used to determine the wavelet's center frequency.
    /// * `scales` - Slice of wavelet scales. Smaller scales correspond to higher frequencies.
    /// * `filter_length` - Length of the wavelet filter used in the CWT computation.
    /// * `sampling_frequency` - Sampling frequency of the original signal.
    ///
    /// # Returns
    ///
    /// Returns a `Result` containing a `Vec<f32>` of frequencies corresponding to the input scales,
    /// or a `VectorWaveError` if the computation fails.
    ///
    /// # Behavior
    ///
    /// The output frequencies are in **natural order**, meaning that if `scales` are provided in
    /// **ascending order**, the resulting frequencies will be in **descending order** (high → low),
    /// because frequency is inversely proportional to scale.
    pub fn scales_to_frequencies_f32(
        wavelet: Arc<dyn CwtWavelet<f32> + Send + Sync>,
        scales: &[f32],
        filter_length: usize,
        sampling_frequency: f32,
    ) -> Result<Vec<f32>, VectorWaveError> {
        scale_to_frequencies_impl(wavelet, scales, sampling_frequency, filter_length)
    }

    /// Converts wavelet scales to corresponding frequencies (f64 version).
    ///
    /// Same behavior and parameters as [`scales_to_frequencies_f32`], but for `f64` data.
    pub fn scales_to_frequencies_f64(
        wavelet: Arc<dyn CwtWavelet<f64> + Send + Sync>,
        scales: &[f64],
        filter_length: usize,
        sampling_frequency: f64,
    ) -> Result<Vec<f64>, VectorWaveError> {
        scale_to_frequencies_impl(wavelet, scales, sampling_frequency, filter_length)
    }

}

/// Specifies how the wavelet scales are distributed in a Continuous Wavelet Transform (CWT).
///
/// The choice of `ScaleType` affects the time–frequency resolution of the transform
/// and how the `nv` parameter in `CwtOptions` is interpreted.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ScaleType {
    /// **Logarithmic spacing (Geometric):** Scales are spaced by powers of two (octaves).
    /// This is the standard choice for multi-resolution analysis, providing better frequency
    /// resolution at lower frequencies. The `nv` parameter represents the **voices per octave**.
    Log,
    /// **Linear spacing (Uniform):** Scales are spaced with a constant step size.
    /// This is typically used for narrowband analysis where a uniform resolution in the
    /// scale parameter is desired. The `nv` parameter represents the **total number of scales**.
    Linear,
}
