//! ## pktpool-core::alloc::stats
//! **Freelist occupancy and release accounting**
//!
//! Every successful release is charged the bytes it carried and the bits it
//! would occupy on a 10GbE link, so throughput can be derived from the pool
//! alone.

/// Minimum Ethernet payload; shorter frames are padded on the wire.
const MIN_FRAME_PAYLOAD: u64 = 46;
/// CRC (4) plus inter-packet gap (5), in bytes.
const FRAME_OVERHEAD: u64 = 4 + 5;

/// Bits of 10GbE link capacity needed to carry a payload of `length` bytes.
#[inline]
pub fn wire_bits(length: usize) -> u64 {
    ((length as u64).max(MIN_FRAME_PAYLOAD) + FRAME_OVERHEAD) * 8
}

/// Point-in-time snapshot of a pool's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolStats {
    pub capacity: usize,
    /// Buffers currently on the freelist.
    pub free: usize,
    /// Lowest `free` ever observed.
    pub low_water: usize,
    pub allocations: u64,
    /// Successful releases.
    pub frees: u64,
    pub freed_bytes: u64,
    pub freed_bits: u64,
    /// Allocations refused because the freelist was empty.
    pub exhaustions: u64,
    pub invalid_releases: u64,
}

impl PoolStats {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            free: capacity,
            low_water: capacity,
            ..Self::default()
        }
    }

    /// Buffers currently held by callers.
    #[inline]
    pub fn in_use(&self) -> usize {
        self.capacity - self.free
    }

    #[inline]
    pub(crate) fn record_allocation(&mut self, free: usize) {
        self.allocations += 1;
        self.free = free;
        self.low_water = self.low_water.min(free);
    }

    #[inline]
    pub(crate) fn record_release(&mut self, length: usize, free: usize) {
        self.frees += 1;
        self.freed_bytes += length as u64;
        self.freed_bits += wire_bits(length);
        self.free = free;
    }

    #[inline]
    pub(crate) fn record_exhaustion(&mut self) {
        self.exhaustions += 1;
    }

    #[inline]
    pub(crate) fn record_invalid_release(&mut self) {
        self.invalid_releases += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_bits_pads_short_frames() {
        assert_eq!(wire_bits(0), (46 + 9) * 8);
        assert_eq!(wire_bits(46), (46 + 9) * 8);
        assert_eq!(wire_bits(1500), (1500 + 9) * 8);
    }

    #[test]
    fn test_stats_accounting() {
        let mut stats = PoolStats::new(4);
        assert_eq!(stats.in_use(), 0);

        stats.record_allocation(3);
        stats.record_allocation(2);
        assert_eq!(stats.in_use(), 2);
        assert_eq!(stats.low_water, 2);

        stats.record_release(100, 3);
        assert_eq!(stats.frees, 1);
        assert_eq!(stats.freed_bytes, 100);
        assert_eq!(stats.freed_bits, (100 + 9) * 8);
        assert_eq!(stats.free, 3);
        assert_eq!(stats.low_water, 2);
    }

    #[test]
    fn test_stats_failure_counters() {
        let mut stats = PoolStats::new(1);
        for _ in 0..10 {
            stats.record_exhaustion();
            stats.record_invalid_release();
        }
        assert_eq!(stats.exhaustions, 10);
        assert_eq!(stats.invalid_releases, 10);
        assert_eq!(stats.allocations, 0);
    }
}
