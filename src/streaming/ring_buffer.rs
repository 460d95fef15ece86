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
//! The lock-free ring buffer backing streaming MODWT (C9): power-of-two
//! capacity, atomic monotonic read/write cursors, bounded-exponential-
//! backoff backpressure on write, and a resizable wrapper that doubles or
//! halves capacity under sustained over/under-utilization.
//!
//! Per `DESIGN.md`'s resolved open question, the backing store is hand-
//! rolled on `std::sync::atomic` rather than wrapping a crate like `rtrb`:
//! this module needs batch-cursor-advance, prefetch hints, and resizing
//! that an off-the-shelf SPSC ring buffer does not expose.
use crate::err::VectorWaveError;
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// What a blocking [`RingBuffer::write`] does when it cannot reserve space
/// within its backoff budget.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BackpressurePolicy {
    /// Return `VectorWaveError::ResourceExhausted` immediately (the "drop"
    /// choice from spec §4.9 is the caller's to make: they get the error
    /// and may discard the batch).
    WouldBlock,
    /// Keep backing off up to `timeout`, then return
    /// `VectorWaveError::Timeout`.
    Block { timeout: Duration },
}

fn next_pow2(n: usize) -> usize {
    let mut p = 1usize;
    while p < n.max(1) {
        p <<= 1;
    }
    p
}

/// A single-reader, possibly-multi-writer circular buffer of `f64`.
///
/// Writers reserve a contiguous range via compare-and-set on `write_pos`;
/// the reserved range belongs exclusively to the reserving writer until it
/// finishes copying into it, so concurrent writers never touch the same
/// cell. Only one logical reader advances `read_pos`; `peek`/`read` just
/// load it. Capacity is fixed at construction -- see [`ResizableRingBuffer`]
/// for the variant that grows and shrinks.
pub struct RingBuffer {
    data: Box<[UnsafeCell<f64>]>,
    mask: usize,
    read_pos: AtomicUsize,
    write_pos: AtomicUsize,
}

// SAFETY: every in-bounds cell is written by at most one writer at a time
// (writers reserve disjoint index ranges via CAS on `write_pos`) and read
// only after the writer's reservation is visible via the `Release`/`Acquire`
// pair on `write_pos`; the single reader never races a writer for the same
// cell because readers only ever observe indices below the writer-visible
// high-water mark.
unsafe impl Sync for RingBuffer {}
unsafe impl Send for RingBuffer {}

impl RingBuffer {
    /// Capacity is rounded up to the next power of two `>= requested`.
    pub fn new(requested_capacity: usize) -> Result<Self, VectorWaveError> {
        if requested_capacity == 0 {
            return Err(VectorWaveError::InvalidArgument(
                "ring buffer capacity must be positive".to_string(),
            ));
        }
        let capacity = next_pow2(requested_capacity);
        let data: Box<[UnsafeCell<f64>]> = (0..capacity).map(|_| UnsafeCell::new(0.0)).collect();
        Ok(Self {
            data,
            mask: capacity - 1,
            read_pos: AtomicUsize::new(0),
            write_pos: AtomicUsize::new(0),
        })
    }

    pub fn capacity(&self) -> usize {
        self.mask + 1
    }

    pub fn len(&self) -> usize {
        self.write_pos.load(Ordering::Acquire) - self.read_pos.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn free_space(&self) -> usize {
        self.capacity() - self.len()
    }

    #[inline]
    unsafe fn cell(&self, cursor: usize) -> *mut f64 {
        self.data[cursor & self.mask].get()
    }

    /// Issues a platform cache-line-touch hint for the next write slot.
    /// There is no stable, portable prefetch intrinsic, so this is a no-op
    /// on targets without one -- it documents intent at the call site
    /// rather than changing behavior.
    pub fn prefetch_write(&self) {
        #[cfg(target_arch = "x86_64")]
        {
            let idx = self.write_pos.load(Ordering::Relaxed);
            unsafe {
                let ptr = self.cell(idx) as *const i8;
                std::arch::x86_64::_mm_prefetch(ptr, std::arch::x86_64::_MM_HINT_T0);
            }
        }
    }

    /// Issues a platform cache-line-touch hint for the next read slot.
    pub fn prefetch_read(&self) {
        #[cfg(target_arch = "x86_64")]
        {
            let idx = self.read_pos.load(Ordering::Relaxed);
            unsafe {
                let ptr = self.cell(idx) as *const i8;
                std::arch::x86_64::_mm_prefetch(ptr, std::arch::x86_64::_MM_HINT_T0);
            }
        }
    }

    /// Reserves `len` contiguous slots via CAS, backing off exponentially
    /// (1us, 2us, 4us, ... capped at 1ms) while free space is insufficient,
    /// per spec §5/§4.9. Returns the reserved starting cursor.
    fn reserve(&self, len: usize, policy: BackpressurePolicy) -> Result<usize, VectorWaveError> {
        if len > self.capacity() {
            return Err(VectorWaveError::InvalidArgument(format!(
                "write of {len} samples exceeds ring buffer capacity {}",
                self.capacity()
            )));
        }
        let start = Instant::now();
        let mut backoff = Duration::from_micros(1);
        loop {
            let cur_write = self.write_pos.load(Ordering::Acquire);
            if self.free_space() >= len {
                match self.write_pos.compare_exchange(
                    cur_write,
                    cur_write + len,
                    Ordering::AcqRel,
                    Ordering::Acquire,
                ) {
                    Ok(_) => return Ok(cur_write),
                    Err(_) => continue,
                }
            }
            match policy {
                BackpressurePolicy::WouldBlock => {
                    return Err(VectorWaveError::ResourceExhausted(
                        "ring buffer write would block".to_string(),
                    ));
                }
                BackpressurePolicy::Block { timeout } => {
                    if start.elapsed() >= timeout {
                        return Err(VectorWaveError::Timeout);
                    }
                    std::thread::sleep(backoff);
                    backoff = (backoff * 2).min(Duration::from_millis(1));
                }
            }
        }
    }

    /// `write(samples)` (spec §4.9): reserves space for the whole slice and
    /// copies it in as one contiguous logical write.
    pub fn write(&self, samples: &[f64], policy: BackpressurePolicy) -> Result<(), VectorWaveError> {
        self.write_batch(&[samples], policy)
    }

    /// `write_batch(arrays)` (spec §4.9): a single atomic cursor advance
    /// covers every array's total length, after which each array is copied
    /// into its (disjoint, pre-reserved) slot range.
    pub fn write_batch(&self, arrays: &[&[f64]], policy: BackpressurePolicy) -> Result<(), VectorWaveError> {
        let total: usize = arrays.iter().map(|a| a.len()).sum();
        if total == 0 {
            return Ok(());
        }
        let start = self.reserve(total, policy)?;
        let mut cursor = start;
        for &array in arrays {
            for &sample in array {
                unsafe { *self.cell(cursor) = sample };
                cursor += 1;
            }
        }
        Ok(())
    }

    /// Copies `len` unread samples starting at the current read cursor into
    /// `out`, without advancing the cursor. Used by the streaming engine to
    /// inspect a sliding window before deciding how far to [`advance`].
    pub fn peek(&self, len: usize, out: &mut [f64]) -> Result<(), VectorWaveError> {
        if out.len() < len {
            return Err(VectorWaveError::InvalidArgument(
                "output buffer shorter than requested peek length".to_string(),
            ));
        }
        if self.len() < len {
            return Err(VectorWaveError::InvalidState(format!(
                "requested {len} samples but only {} are available",
                self.len()
            )));
        }
        let read_pos = self.read_pos.load(Ordering::Acquire);
        for i in 0..len {
            out[i] = unsafe { *self.cell(read_pos + i) };
        }
        Ok(())
    }

    /// Advances the read cursor by `len` (the samples are considered
    /// consumed, whether or not they were ever `peek`ed). There is exactly
    /// one logical reader, so this never races another reader.
    pub fn advance(&self, len: usize) -> Result<(), VectorWaveError> {
        if self.len() < len {
            return Err(VectorWaveError::InvalidState(format!(
                "cannot advance by {len}: only {} samples available",
                self.len()
            )));
        }
        self.read_pos.fetch_add(len, Ordering::Release);
        Ok(())
    }

    /// `read(len, out)` (spec §4.9): peek followed by advance, the
    /// non-streaming-engine convenience entry point.
    pub fn read(&self, len: usize, out: &mut [f64]) -> Result<(), VectorWaveError> {
        self.peek(len, out)?;
        self.advance(len)
    }
}

/// Rolling utilization thresholds that trigger [`ResizableRingBuffer`]
/// resizing (spec §4.9): `>85%` sustained for `>= sustain` doubles capacity
/// (bounded by `max_capacity`); `<25%` sustained for `>= sustain` halves it
/// (bounded by `min_capacity`).
#[derive(Debug, Clone, Copy)]
pub struct ResizePolicy {
    pub high_watermark: f64,
    pub low_watermark: f64,
    pub sustain: Duration,
    pub min_capacity: usize,
    pub max_capacity: usize,
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            high_watermark: 0.85,
            low_watermark: 0.25,
            sustain: Duration::from_secs(1),
            min_capacity: 256,
            max_capacity: 1 << 24,
        }
    }
}

/// Wraps [`RingBuffer`] behind an epoch counter and an `RwLock`-guarded
/// swap: writers and readers take a read lock to obtain the current buffer
/// (cheap, uncontended in the common case); the resizer takes a write lock
/// only for the instant it swaps in a freshly allocated buffer with the
/// unread samples copied across, per `DESIGN.md`'s resolved "epoch, not
/// spinlock" decision.
pub struct ResizableRingBuffer {
    inner: RwLock<Arc<RingBuffer>>,
    epoch: AtomicU64,
    policy: ResizePolicy,
    high_since: RwLock<Option<Instant>>,
    low_since: RwLock<Option<Instant>>,
}

impl ResizableRingBuffer {
    pub fn new(initial_capacity: usize, policy: ResizePolicy) -> Result<Self, VectorWaveError> {
        Ok(Self {
            inner: RwLock::new(Arc::new(RingBuffer::new(initial_capacity)?)),
            epoch: AtomicU64::new(0),
            policy,
            high_since: RwLock::new(None),
            low_since: RwLock::new(None),
        })
    }

    pub fn epoch(&self) -> u64 {
        self.epoch.load(Ordering::Acquire)
    }

    pub fn current(&self) -> Arc<RingBuffer> {
        self.inner.read().unwrap().clone()
    }

    /// Call periodically (e.g. after every write) to let sustained
    /// over/under-utilization trigger a resize. Cheap when nothing needs to
    /// change: one `RwLock::read` plus two utilization-tracking writes.
    pub fn maybe_resize(&self) -> Result<(), VectorWaveError> {
        let buffer = self.current();
        let utilization = buffer.len() as f64 / buffer.capacity() as f64;
        let now = Instant::now();

        if utilization > self.policy.high_watermark {
            let mut since = self.high_since.write().unwrap();
            let started = *since.get_or_insert(now);
            if now.duration_since(started) >= self.policy.sustain {
                let new_cap = (buffer.capacity() * 2).min(self.policy.max_capacity);
                drop(since);
                if new_cap > buffer.capacity() {
                    self.resize_to(new_cap)?;
                }
                *self.high_since.write().unwrap() = None;
            }
        } else {
            *self.high_since.write().unwrap() = None;
        }

        if utilization < self.policy.low_watermark {
            let mut since = self.low_since.write().unwrap();
            let started = *since.get_or_insert(now);
            if now.duration_since(started) >= self.policy.sustain {
                let new_cap = (buffer.capacity() / 2).max(self.policy.min_capacity);
                drop(since);
                if new_cap < buffer.capacity() {
                    self.resize_to(new_cap)?;
                }
                *self.low_since.write().unwrap() = None;
            }
        } else {
            *self.low_since.write().unwrap() = None;
        }
        Ok(())
    }

    fn resize_to(&self, new_capacity: usize) -> Result<(), VectorWaveError> {
        let mut guard = self.inner.write().unwrap();
        let old = guard.clone();
        let unread = old.len();
        let fresh = RingBuffer::new(new_capacity.max(unread))?;
        if unread > 0 {
            let mut scratch = vec![0.0; unread];
            old.peek(unread, &mut scratch)?;
            fresh.write(&scratch, BackpressurePolicy::WouldBlock)?;
        }
        *guard = Arc::new(fresh);
        self.epoch.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capacity_rounds_up_to_power_of_two() {
        let rb = RingBuffer::new(100).unwrap();
        assert_eq!(rb.capacity(), 128);
    }

    #[test]
    fn write_then_read_round_trips() {
        let rb = RingBuffer::new(16).unwrap();
        let samples = [1.0, 2.0, 3.0, 4.0];
        rb.write(&samples, BackpressurePolicy::WouldBlock).unwrap();
        let mut out = vec![0.0; 4];
        rb.read(4, &mut out).unwrap();
        assert_eq!(out, samples);
        assert!(rb.is_empty());
    }

    #[test]
    fn peek_does_not_consume() {
        let rb = RingBuffer::new(16).unwrap();
        rb.write(&[1.0, 2.0, 3.0], BackpressurePolicy::WouldBlock).unwrap();
        let mut out = vec![0.0; 3];
        rb.peek(3, &mut out).unwrap();
        assert_eq!(rb.len(), 3);
        rb.advance(1).unwrap();
        assert_eq!(rb.len(), 2);
    }

    #[test]
    fn write_batch_advances_cursor_once_for_all_arrays() {
        let rb = RingBuffer::new(16).unwrap();
        rb.write_batch(&[&[1.0, 2.0], &[3.0]], BackpressurePolicy::WouldBlock).unwrap();
        assert_eq!(rb.len(), 3);
        let mut out = vec![0.0; 3];
        rb.read(3, &mut out).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn write_beyond_capacity_would_block() {
        let rb = RingBuffer::new(4).unwrap();
        rb.write(&[1.0, 2.0, 3.0, 4.0], BackpressurePolicy::WouldBlock).unwrap();
        let err = rb.write(&[5.0], BackpressurePolicy::WouldBlock);
        assert!(matches!(err, Err(VectorWaveError::ResourceExhausted(_))));
    }

    #[test]
    fn blocking_write_times_out_when_never_drained() {
        let rb = RingBuffer::new(4).unwrap();
        rb.write(&[1.0, 2.0, 3.0, 4.0], BackpressurePolicy::WouldBlock).unwrap();
        let err = rb.write(
            &[5.0],
            BackpressurePolicy::Block { timeout: Duration::from_millis(5) },
        );
        assert!(matches!(err, Err(VectorWaveError::Timeout)));
    }

    #[test]
    fn resizable_buffer_grows_under_sustained_high_utilization() {
        let policy = ResizePolicy {
            sustain: Duration::from_millis(1),
            ..ResizePolicy::default()
        };
        let rb = ResizableRingBuffer::new(8, policy).unwrap();
        rb.current().write(&[0.0; 7], BackpressurePolicy::WouldBlock).unwrap();
        std::thread::sleep(Duration::from_millis(5));
        rb.maybe_resize().unwrap();
        assert!(rb.current().capacity() > 8);
    }

    #[test]
    fn resize_preserves_unread_samples() {
        let policy = ResizePolicy {
            sustain: Duration::from_millis(1),
            ..ResizePolicy::default()
        };
        let rb = ResizableRingBuffer::new(8, policy).unwrap();
        let buf = rb.current();
        buf.write(&[1.0, 2.0, 3.0], BackpressurePolicy::WouldBlock).unwrap();
        rb.resize_to(32).unwrap();
        let mut out = vec![0.0; 3];
        rb.current().read(3, &mut out).unwrap();
        assert_eq!(out, vec![1.0, 2.0, 3.0]);
    }
}
