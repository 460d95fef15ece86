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
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};

/// Error taxonomy for the transform engine.
///
/// Every fallible operation returns one of these kinds; there is no partial
/// result on error. Numeric-instability conditions (degenerate fits,
/// near-zero variance in periodicity detection) are recovered locally with a
/// documented fallback and never appear here.
#[derive(Debug)]
pub enum VectorWaveError {
    /// Malformed call-site argument: empty/non-positive length, unknown
    /// wavelet name, invalid ratio, fewer than 2 fit points, out-of-range
    /// threshold, and so on.
    InvalidArgument(String),
    /// Catch-all for conditions that don't fit a more specific variant yet,
    /// e.g. numerical root-finding failing to converge in scale-bound search.
    Generic(String),
    /// Signal contains a non-finite sample (NaN or +/-Inf).
    InvalidSignal(String),
    /// Configuration is internally inconsistent: `levels > J_max`, a
    /// streaming block size that is not a power of two, an adaptive selector
    /// paired with an incompatible boundary mode.
    InvalidConfiguration(String),
    /// Operation requested on a handle/buffer in the wrong lifecycle state
    /// (closed streaming handle, partially consumed ring buffer without a
    /// flush).
    InvalidState(String),
    /// A bounded resource was exhausted: ring-buffer write timeout,
    /// allocation failure on a growable buffer.
    ResourceExhausted(String),
    /// Failed to allocate the backing storage for a result of the given
    /// size. Kept distinct so `try_vec!` call sites can bail out before
    /// doing any further work.
    Allocation(usize),
    /// Input size did not match what the executor was configured for.
    InvalidInputSize(usize, usize),
    /// Zero-sized transform requested.
    ZeroBaseSized,
    /// A wavelet implementation returned a kernel of the wrong length.
    WaveletInvalidSize(usize, usize),
    /// An error surfaced by the FFT backend.
    FftError(String),
    /// A blocking operation exceeded its configured timeout.
    Timeout,
}

impl Display for VectorWaveError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            VectorWaveError::InvalidArgument(msg) => {
                f.write_fmt(format_args!("invalid argument: {msg}"))
            }
            VectorWaveError::Generic(msg) => f.write_str(msg),
            VectorWaveError::InvalidSignal(msg) => {
                f.write_fmt(format_args!("invalid signal: {msg}"))
            }
            VectorWaveError::InvalidConfiguration(msg) => {
                f.write_fmt(format_args!("invalid configuration: {msg}"))
            }
            VectorWaveError::InvalidState(msg) => {
                f.write_fmt(format_args!("invalid state: {msg}"))
            }
            VectorWaveError::ResourceExhausted(msg) => {
                f.write_fmt(format_args!("resource exhausted: {msg}"))
            }
            VectorWaveError::Allocation(size) => {
                f.write_fmt(format_args!("failed to allocate buffer with size {size}"))
            }
            VectorWaveError::InvalidInputSize(expected, got) => f.write_fmt(format_args!(
                "input size expected to be {expected} but it was {got}"
            )),
            VectorWaveError::ZeroBaseSized => f.write_str("zero sized transform is not supported"),
            VectorWaveError::WaveletInvalidSize(expected, actual) => f.write_fmt(format_args!(
                "wavelet is supposed to return size {expected} but it was {actual}"
            )),
            VectorWaveError::FftError(msg) => f.write_str(msg),
            VectorWaveError::Timeout => f.write_str("operation timed out"),
        }
    }
}

impl Error for VectorWaveError {}

macro_rules! try_vec {
    () => {
        Vec::new()
    };
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::err::VectorWaveError::Allocation($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;
