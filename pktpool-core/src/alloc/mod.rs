//! ## pktpool-core::alloc
//! **Fixed-capacity packet buffer pool**
//!
//! ### Expectations (Production):
//! - Zero heap allocations in allocate/release after pool construction
//! - O(1) allocate and release
//! - Exhaustion and bad releases reported as errors, never aborts
//!
//! ### Key Submodules:
//! - `packet/`: Packet buffers and the `PacketBuf` ownership handle
//! - `pool/`: The freelist itself
//! - `shared/`: Mutex-guarded handle for multi-threaded use
//! - `stats/`: Occupancy and release accounting

pub mod packet;
pub mod pool;
pub mod shared;
pub mod stats;

pub use packet::{Packet, PacketBuf, PoolId, MAX_PAYLOAD_SIZE, PAYLOAD_SIZE};
pub use pool::{PacketPool, ReleasePolicy, DEFAULT_CAPACITY};
pub use shared::SharedPacketPool;
pub use stats::{wire_bits, PoolStats};
