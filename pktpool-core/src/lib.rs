//! # pktpool-core
//!
//! Packet buffer freelist for a userspace packet-processing toolkit.
//!
//! Buffers are created once when a [`PacketPool`](alloc::PacketPool) is
//! built and then recycled: client code `allocate`s a buffer, owns it
//! exclusively through a [`PacketBuf`](alloc::PacketBuf), and `release`s it
//! back exactly once.
//!
//! ### Expectations (Production):
//! - Zero heap allocations in packet processing paths
//! - Predictable O(1) cost per buffer
//! - Recoverable errors so pipelines can apply backpressure
//!
//! ### Key Submodules:
//! - `alloc`: Packet buffers, the freelist, and its statistics
//! - `error`: Pool error conditions

pub mod alloc;
pub mod error;

pub mod prelude {
    pub use crate::alloc::*;
    pub use crate::error::*;
}

pub use alloc::{PacketBuf, PacketPool, SharedPacketPool};
pub use error::{PoolError, ReleaseError, ReleaseFault};
