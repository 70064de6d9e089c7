//! ## pktpool-core::alloc::packet
//! **Fixed-size packet buffers and the handle that owns them**
//!
//! A [`Packet`] lives in exactly one place at a time: on its pool's freelist,
//! or inside a [`PacketBuf`] held by client code. `PacketBuf` is neither
//! `Clone` nor `Copy`, so a buffer cannot be aliased or released twice.

use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use crate::error::PoolError;

/// Default payload capacity of every packet (10 KiB).
pub const PAYLOAD_SIZE: usize = 10 * 1024;

/// Largest payload a packet may carry; lengths must fit in 16 bits.
pub const MAX_PAYLOAD_SIZE: usize = u16::MAX as usize;

static NEXT_POOL_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`PacketPool`](crate::alloc::pool::PacketPool).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PoolId(u64);

impl PoolId {
    pub(crate) fn next() -> Self {
        PoolId(NEXT_POOL_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pool#{}", self.0)
    }
}

/// Packet of network data with its valid length.
///
/// Bytes past `len()` are scratch: they may hold whatever a previous owner
/// wrote unless the pool zeroes buffers on release.
#[derive(Debug)]
pub struct Packet {
    slot: usize,
    length: usize,
    data: Box<[u8]>,
}

impl Packet {
    /// A packet that owns no storage and belongs to no slot.
    pub(crate) fn vacant() -> Self {
        Self {
            slot: 0,
            length: 0,
            data: Box::default(),
        }
    }

    /// Creates a zero-filled packet for `slot`, reporting allocation failure
    /// instead of aborting.
    pub(crate) fn zeroed(slot: usize, payload_size: usize) -> Option<Self> {
        let mut data = Vec::new();
        data.try_reserve_exact(payload_size).ok()?;
        data.resize(payload_size, 0);
        Some(Self {
            slot,
            length: 0,
            data: data.into_boxed_slice(),
        })
    }

    /// Stable slot index of this buffer within its pool.
    #[inline]
    pub fn slot(&self) -> usize {
        self.slot
    }

    /// Number of valid payload bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Total bytes the buffer can hold.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Sets the valid length. Fails if `length` exceeds the capacity.
    pub fn set_len(&mut self, length: usize) -> Result<(), PoolError> {
        if length > self.capacity() {
            return Err(PoolError::LengthOutOfRange {
                length,
                capacity: self.capacity(),
            });
        }
        self.length = length;
        Ok(())
    }

    /// The valid bytes, `data()[..len()]`.
    #[inline]
    pub fn payload(&self) -> &[u8] {
        &self.data[..self.length]
    }

    #[inline]
    pub fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.length]
    }

    /// The whole buffer, including bytes past `len()`.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copies as much of `src` as fits and sets the length to the number of
    /// bytes copied.
    pub fn copy_from(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.capacity());
        self.data[..n].copy_from_slice(&src[..n]);
        self.length = n;
        n
    }

    /// Writes `n` copies of `byte` (clamped to the capacity) and sets the length.
    pub fn fill(&mut self, byte: u8, n: usize) -> usize {
        let n = n.min(self.capacity());
        self.data[..n].fill(byte);
        self.length = n;
        n
    }

    pub(crate) fn clear(&mut self, zero_payload: bool) {
        if zero_payload {
            self.data.fill(0);
        }
        self.length = 0;
    }

    fn is_vacant(&self) -> bool {
        self.data.is_empty()
    }
}

/// Exclusive handle to an allocated [`Packet`].
///
/// Must be handed back with `release`. Dropping it instead leaks the slot for
/// the rest of the pool's life.
pub struct PacketBuf {
    packet: Packet,
    pool: PoolId,
}

impl PacketBuf {
    pub(crate) fn new(packet: Packet, pool: PoolId) -> Self {
        Self { packet, pool }
    }

    /// Identity of the pool that issued this buffer.
    #[inline]
    pub fn pool_id(&self) -> PoolId {
        self.pool
    }

    pub(crate) fn into_packet(mut self) -> Packet {
        // Leaves a vacant packet behind so Drop stays quiet.
        std::mem::replace(&mut self.packet, Packet::vacant())
    }
}

impl Deref for PacketBuf {
    type Target = Packet;

    #[inline]
    fn deref(&self) -> &Packet {
        &self.packet
    }
}

impl DerefMut for PacketBuf {
    #[inline]
    fn deref_mut(&mut self) -> &mut Packet {
        &mut self.packet
    }
}

impl fmt::Debug for PacketBuf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketBuf")
            .field("pool", &self.pool)
            .field("slot", &self.packet.slot)
            .field("len", &self.packet.length)
            .finish()
    }
}

impl Drop for PacketBuf {
    fn drop(&mut self) {
        if !self.packet.is_vacant() {
            warn!(
                pool = %self.pool,
                slot = self.packet.slot,
                "packet leaked: buffer dropped without being released"
            );
        }
    }
}
