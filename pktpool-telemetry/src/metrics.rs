//! ## pktpool-telemetry::metrics
//! **Prometheus exporter for pool counters**
//!
//! The pool keeps its own counters in [`PoolStats`]; `observe` copies a
//! snapshot into the registry so scraping never touches the pool itself.

use prometheus::{Encoder, IntCounter, IntGauge, Registry, TextEncoder};

use pktpool_core::alloc::PoolStats;

use crate::TelemetryError;

#[derive(Debug, Clone)]
pub struct PoolMetrics {
    pub registry: Registry,
    capacity: IntGauge,
    free: IntGauge,
    in_use: IntGauge,
    low_water: IntGauge,
    allocations: IntCounter,
    frees: IntCounter,
    freed_bytes: IntCounter,
    freed_bits: IntCounter,
    exhaustions: IntCounter,
    invalid_releases: IntCounter,
}

impl PoolMetrics {
    /// Registers every pool metric under `prefix`.
    pub fn new(prefix: &str) -> Result<Self, TelemetryError> {
        let registry = Registry::new();
        let gauge = |name: &str, help: &str| -> Result<IntGauge, TelemetryError> {
            let gauge = IntGauge::new(format!("{prefix}_{name}"), help)?;
            registry.register(Box::new(gauge.clone()))?;
            Ok(gauge)
        };
        let counter = |name: &str, help: &str| -> Result<IntCounter, TelemetryError> {
            let counter = IntCounter::new(format!("{prefix}_{name}"), help)?;
            registry.register(Box::new(counter.clone()))?;
            Ok(counter)
        };

        Ok(Self {
            capacity: gauge("capacity", "Packet buffers owned by the pool")?,
            free: gauge("free", "Packet buffers on the freelist")?,
            in_use: gauge("in_use", "Packet buffers held by callers")?,
            low_water: gauge("low_water", "Lowest observed freelist depth")?,
            allocations: counter("allocations_total", "Successful allocations")?,
            frees: counter("frees_total", "Successful releases")?,
            freed_bytes: counter("freed_bytes_total", "Payload bytes released")?,
            freed_bits: counter(
                "freed_bits_total",
                "10GbE link bits represented by released packets",
            )?,
            exhaustions: counter("exhaustions_total", "Allocations refused on an empty pool")?,
            invalid_releases: counter("invalid_releases_total", "Rejected releases")?,
            registry,
        })
    }

    /// Brings every metric in line with `stats`.
    pub fn observe(&self, stats: &PoolStats) {
        self.capacity.set(stats.capacity as i64);
        self.free.set(stats.free as i64);
        self.in_use.set(stats.in_use() as i64);
        self.low_water.set(stats.low_water as i64);

        sync_counter(&self.allocations, stats.allocations);
        sync_counter(&self.frees, stats.frees);
        sync_counter(&self.freed_bytes, stats.freed_bytes);
        sync_counter(&self.freed_bits, stats.freed_bits);
        sync_counter(&self.exhaustions, stats.exhaustions);
        sync_counter(&self.invalid_releases, stats.invalid_releases);
    }

    /// Renders the registry in the Prometheus text format.
    pub fn gather(&self) -> Result<String, TelemetryError> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::<u8>::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

// Counters only move forward; a snapshot from a different pool never rewinds them.
fn sync_counter(counter: &IntCounter, total: u64) {
    let current = counter.get();
    if total > current {
        counter.inc_by(total - current);
    }
}
