//! ## pktpool-core::alloc::pool
//! **Fixed-capacity packet freelist**
//!
//! All buffers are created once in [`PacketPool::new`]. After that,
//! `allocate` and `release` are O(1) stack operations that never touch the
//! heap: the free stack is sized for the full capacity up front.
//!
//! A pool is a plain owned value driven through `&mut self`. Wrap it in a
//! [`SharedPacketPool`](crate::alloc::shared::SharedPacketPool) to share it
//! between threads.
use std::fmt;

use pktpool_config::PoolConfig;
use tracing::{debug, error, info, trace};

use super::packet::{Packet, PacketBuf, PoolId, MAX_PAYLOAD_SIZE};
use super::stats::PoolStats;
use crate::error::{PoolError, ReleaseError, ReleaseFault};

/// Default number of buffers in a pool.
pub const DEFAULT_CAPACITY: usize = 1000;

/// What happens to a buffer's contents when it returns to the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReleasePolicy {
    /// Reset the length only. The next owner must overwrite before reading.
    #[default]
    ResetLength,
    /// Reset the length and zero the whole buffer.
    ZeroPayload,
}

pub struct PacketPool {
    id: PoolId,
    capacity: usize,
    payload_size: usize,
    policy: ReleasePolicy,
    /// Free stack; `free.len()` is the free count.
    free: Vec<Packet>,
    /// Per-slot allocation state, indexed by slot.
    in_use: Box<[bool]>,
    stats: PoolStats,
}

impl PacketPool {
    /// Creates a pool of `capacity` zeroed buffers of `payload_size` bytes.
    pub fn new(capacity: usize, payload_size: usize) -> Result<Self, PoolError> {
        Self::with_policy(capacity, payload_size, ReleasePolicy::default())
    }

    pub fn with_policy(
        capacity: usize,
        payload_size: usize,
        policy: ReleasePolicy,
    ) -> Result<Self, PoolError> {
        if capacity == 0 {
            return Err(PoolError::InvalidConfig(
                "capacity must be greater than zero".into(),
            ));
        }
        if payload_size == 0 || payload_size > MAX_PAYLOAD_SIZE {
            return Err(PoolError::InvalidConfig(format!(
                "payload size must be between 1 and {MAX_PAYLOAD_SIZE}, got {payload_size}"
            )));
        }

        let out_of_memory = PoolError::OutOfMemory {
            capacity,
            payload_size,
        };
        let mut free = Vec::new();
        free.try_reserve_exact(capacity)
            .map_err(|_| out_of_memory.clone())?;
        let mut in_use = Vec::new();
        in_use
            .try_reserve_exact(capacity)
            .map_err(|_| out_of_memory.clone())?;
        in_use.resize(capacity, false);
        for slot in 0..capacity {
            // Dropping `free` on failure releases every buffer made so far.
            let packet =
                Packet::zeroed(slot, payload_size).ok_or_else(|| out_of_memory.clone())?;
            free.push(packet);
        }

        let pool = Self {
            id: PoolId::next(),
            capacity,
            payload_size,
            policy,
            free,
            in_use: in_use.into_boxed_slice(),
            stats: PoolStats::new(capacity),
        };
        info!(
            pool = %pool.id,
            capacity,
            payload_size,
            policy = ?policy,
            "packet pool initialized"
        );
        Ok(pool)
    }

    /// Creates a pool sized by `config`.
    pub fn from_config(config: &PoolConfig) -> Result<Self, PoolError> {
        let policy = if config.zero_on_release {
            ReleasePolicy::ZeroPayload
        } else {
            ReleasePolicy::ResetLength
        };
        Self::with_policy(config.capacity, config.payload_size, policy)
    }

    /// Takes the buffer on top of the free stack.
    ///
    /// The buffer's length is zero; bytes past it are left over from the
    /// previous owner unless the pool zeroes on release.
    #[inline]
    pub fn allocate(&mut self) -> Result<PacketBuf, PoolError> {
        let Some(packet) = self.free.pop() else {
            self.stats.record_exhaustion();
            debug!(pool = %self.id, capacity = self.capacity, "packet freelist underflow");
            return Err(PoolError::Exhausted {
                capacity: self.capacity,
            });
        };

        self.in_use[packet.slot()] = true;
        self.stats.record_allocation(self.free.len());
        trace!(pool = %self.id, slot = packet.slot(), "packet allocated");
        Ok(PacketBuf::new(packet, self.id))
    }

    /// Returns a buffer to the free stack, resetting its length.
    ///
    /// A rejected buffer comes back inside the error, untouched.
    #[inline]
    pub fn release(&mut self, buf: PacketBuf) -> Result<(), ReleaseError> {
        let slot = buf.slot();
        if let Some(reason) = self.check_release(&buf) {
            self.stats.record_invalid_release();
            error!(
                pool = %self.id,
                owner = %buf.pool_id(),
                slot,
                %reason,
                "invalid packet release"
            );
            return Err(ReleaseError::new(
                PoolError::InvalidRelease { slot, reason },
                buf,
            ));
        }

        let mut packet = buf.into_packet();
        let length = packet.len();
        packet.clear(self.policy == ReleasePolicy::ZeroPayload);
        self.in_use[slot] = false;
        self.free.push(packet);
        self.stats.record_release(length, self.free.len());
        trace!(pool = %self.id, slot, length, "packet released");
        Ok(())
    }

    fn check_release(&self, buf: &PacketBuf) -> Option<ReleaseFault> {
        if self.free.len() == self.capacity {
            Some(ReleaseFault::Overflow)
        } else if buf.pool_id() != self.id {
            Some(ReleaseFault::ForeignPool)
        } else if !self.in_use.get(buf.slot()).copied().unwrap_or(false) {
            Some(ReleaseFault::AlreadyFree)
        } else {
            None
        }
    }

    #[inline]
    pub fn id(&self) -> PoolId {
        self.id
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn payload_size(&self) -> usize {
        self.payload_size
    }

    #[inline]
    pub fn policy(&self) -> ReleasePolicy {
        self.policy
    }

    /// Number of buffers on the freelist.
    #[inline]
    pub fn free_count(&self) -> usize {
        self.free.len()
    }

    /// Number of buffers held by callers (including leaked ones).
    #[inline]
    pub fn in_use(&self) -> usize {
        self.capacity - self.free.len()
    }

    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.free.is_empty()
    }

    pub fn stats(&self) -> PoolStats {
        self.stats
    }
}

impl fmt::Debug for PacketPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PacketPool")
            .field("id", &self.id)
            .field("capacity", &self.capacity)
            .field("payload_size", &self.payload_size)
            .field("policy", &self.policy)
            .field("free", &self.free.len())
            .finish()
    }
}
