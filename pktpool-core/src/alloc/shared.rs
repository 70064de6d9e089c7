//! ## pktpool-core::alloc::shared
//! **Mutex-guarded pool handle for multi-threaded pipelines**
//!
//! [`PacketPool`] is single-owner. `SharedPacketPool` puts one behind a
//! `parking_lot::Mutex` so worker threads can allocate and release through
//! cloned handles. Per-worker pools avoid the lock entirely and should be
//! preferred where buffers do not cross threads.

use std::sync::Arc;

use parking_lot::Mutex;

use super::packet::{PacketBuf, PoolId};
use super::pool::PacketPool;
use super::stats::PoolStats;
use crate::error::{PoolError, ReleaseError};

/// Cloneable, thread-safe handle to a [`PacketPool`].
#[derive(Debug, Clone)]
pub struct SharedPacketPool {
    inner: Arc<Mutex<PacketPool>>,
}

impl SharedPacketPool {
    pub fn new(pool: PacketPool) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    #[inline]
    pub fn allocate(&self) -> Result<PacketBuf, PoolError> {
        self.inner.lock().allocate()
    }

    #[inline]
    pub fn release(&self, buf: PacketBuf) -> Result<(), ReleaseError> {
        self.inner.lock().release(buf)
    }

    pub fn free_count(&self) -> usize {
        self.inner.lock().free_count()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    pub fn id(&self) -> PoolId {
        self.inner.lock().id()
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats()
    }
}

impl From<PacketPool> for SharedPacketPool {
    fn from(pool: PacketPool) -> Self {
        Self::new(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;

    #[test]
    fn test_shared_pool_across_threads() {
        let pool = SharedPacketPool::new(PacketPool::new(64, 128).unwrap());
        let workers: Vec<_> = (0..4)
            .map(|i| {
                let pool = pool.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        let mut buf = pool.allocate().unwrap();
                        buf.fill(i as u8, 16);
                        assert_eq!(buf.payload(), &[i as u8; 16]);
                        pool.release(buf).unwrap();
                    }
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap();
        }
        assert_eq!(pool.free_count(), 64);
        assert_eq!(pool.stats().frees, 4000);
    }

    #[test]
    fn test_buffer_released_on_another_thread() {
        let pool = SharedPacketPool::from(PacketPool::new(4, 64).unwrap());
        let (tx, rx) = mpsc::channel::<PacketBuf>();

        let consumer = {
            let pool = pool.clone();
            thread::spawn(move || {
                for buf in rx {
                    pool.release(buf).unwrap();
                }
            })
        };

        for _ in 0..4 {
            let mut buf = pool.allocate().unwrap();
            buf.copy_from(b"hello");
            tx.send(buf).unwrap();
        }
        drop(tx);
        consumer.join().unwrap();

        assert_eq!(pool.free_count(), pool.capacity());
        assert_eq!(pool.stats().freed_bytes, 20);
    }
}
