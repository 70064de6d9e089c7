use pktpool_core::alloc::{PacketPool, DEFAULT_CAPACITY, PAYLOAD_SIZE};
use pktpool_core::{PoolError, ReleaseFault};

#[test]
fn allocate_mutate_release_cycle() {
    let mut pool = PacketPool::new(DEFAULT_CAPACITY, PAYLOAD_SIZE).unwrap();

    let mut p = pool.allocate().unwrap();
    assert_eq!(p.len(), 0);

    p.set_len(1).unwrap();
    p.data_mut()[0] = 42;
    assert_eq!(p.len(), 1);
    assert_eq!(p.payload(), &[42]);

    pool.release(p).unwrap();
    assert_eq!(pool.free_count(), 1000);

    let p = pool.allocate().unwrap();
    assert_eq!(p.len(), 0);
    pool.release(p).unwrap();
}

#[test]
fn drain_to_exhaustion_and_refill() {
    let mut pool = PacketPool::new(DEFAULT_CAPACITY, 64).unwrap();

    let held: Vec<_> = (0..DEFAULT_CAPACITY)
        .map(|_| pool.allocate().unwrap())
        .collect();
    assert_eq!(pool.free_count(), 0);
    assert_eq!(
        pool.allocate().unwrap_err(),
        PoolError::Exhausted {
            capacity: DEFAULT_CAPACITY
        }
    );

    for p in held {
        pool.release(p).unwrap();
    }
    assert_eq!(pool.free_count(), DEFAULT_CAPACITY);

    let stats = pool.stats();
    assert_eq!(stats.allocations, DEFAULT_CAPACITY as u64);
    assert_eq!(stats.frees, DEFAULT_CAPACITY as u64);
    assert_eq!(stats.exhaustions, 1);
    assert_eq!(stats.low_water, 0);
}

#[test]
fn fresh_pools_start_full() {
    for _ in 0..3 {
        let pool = PacketPool::new(DEFAULT_CAPACITY, 64).unwrap();
        assert_eq!(pool.free_count(), DEFAULT_CAPACITY);
    }
}

#[test]
fn full_pool_rejects_release() {
    let mut full = PacketPool::new(8, 64).unwrap();
    let mut donor = PacketPool::new(8, 64).unwrap();
    let p = donor.allocate().unwrap();

    let err = full.release(p).unwrap_err();
    assert!(matches!(
        err.error(),
        PoolError::InvalidRelease {
            reason: ReleaseFault::Overflow,
            ..
        }
    ));
    assert_eq!(full.free_count(), 8);

    donor.release(err.into_buf()).unwrap();
    assert_eq!(donor.free_count(), 8);
}

#[test]
fn misdirected_release_can_be_retried() {
    let mut a = PacketPool::new(2, 64).unwrap();
    let mut b = PacketPool::new(2, 64).unwrap();
    let mine = a.allocate().unwrap();
    let p = b.allocate().unwrap();

    let p = match a.release(p) {
        Ok(()) => panic!("foreign buffer accepted"),
        Err(err) => {
            assert!(matches!(
                err.error(),
                PoolError::InvalidRelease {
                    reason: ReleaseFault::ForeignPool,
                    ..
                }
            ));
            err.into_buf()
        }
    };
    assert_eq!(a.free_count(), 1);
    assert_eq!(b.free_count(), 1);

    b.release(p).unwrap();
    a.release(mine).unwrap();
    assert_eq!(b.free_count(), b.capacity());
    assert_eq!(a.free_count(), a.capacity());
}
