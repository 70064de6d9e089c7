use std::fmt;

use thiserror::Error;

use crate::alloc::packet::PacketBuf;

/// Why a release was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseFault {
    /// Every slot is already on the freelist.
    Overflow,
    /// The buffer was issued by a different pool.
    ForeignPool,
    /// The slot is already free (double release).
    AlreadyFree,
}

impl fmt::Display for ReleaseFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            ReleaseFault::Overflow => "freelist overflow",
            ReleaseFault::ForeignPool => "buffer belongs to another pool",
            ReleaseFault::AlreadyFree => "slot is already free",
        };
        f.write_str(reason)
    }
}

/// Packet pool error conditions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    #[error("Packet freelist underflow: all {capacity} buffers are in use")]
    Exhausted { capacity: usize },

    #[error("Invalid release of slot {slot}: {reason}")]
    InvalidRelease { slot: usize, reason: ReleaseFault },

    #[error("Invalid pool configuration: {0}")]
    InvalidConfig(String),

    #[error("Unable to reserve {capacity} buffers of {payload_size} bytes")]
    OutOfMemory {
        capacity: usize,
        payload_size: usize,
    },

    #[error("Length {length} exceeds packet capacity {capacity}")]
    LengthOutOfRange { length: usize, capacity: usize },
}

impl PoolError {
    /// True for errors a caller should answer with backpressure rather than abort.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PoolError::Exhausted { .. })
    }
}

/// A rejected release.
///
/// Carries the buffer back so the caller can return it to the pool that
/// issued it, like `std::sync::mpsc::SendError` does for an unsent value.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ReleaseError {
    error: PoolError,
    buf: PacketBuf,
}

impl ReleaseError {
    pub(crate) fn new(error: PoolError, buf: PacketBuf) -> Self {
        Self { error, buf }
    }

    pub fn error(&self) -> &PoolError {
        &self.error
    }

    /// The buffer that was not accepted.
    pub fn into_buf(self) -> PacketBuf {
        self.buf
    }

    pub fn into_parts(self) -> (PoolError, PacketBuf) {
        (self.error, self.buf)
    }
}
