#[macro_use]
extern crate criterion;

use criterion::{black_box, Criterion};

use pktpool_core::alloc::{PacketPool, ReleasePolicy, SharedPacketPool, PAYLOAD_SIZE};

fn bench_allocate_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_cycle");

    for policy in [ReleasePolicy::ResetLength, ReleasePolicy::ZeroPayload] {
        group.throughput(criterion::Throughput::Elements(1));
        group.bench_function(format!("{:?}", policy), |b| {
            let mut pool = PacketPool::with_policy(1000, PAYLOAD_SIZE, policy).unwrap();
            b.iter(|| {
                let mut buf = pool.allocate().unwrap();
                buf.fill(0x5a, black_box(64));
                pool.release(buf).unwrap();
            });
        });
    }
    group.finish();
}

fn bench_drain_refill(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_drain_refill");

    for capacity in [128, 1000, 8192] {
        group.throughput(criterion::Throughput::Elements(capacity as u64));
        group.bench_function(format!("capacity_{}", capacity), |b| {
            let mut pool = PacketPool::new(capacity, 2048).unwrap();
            let mut held = Vec::with_capacity(capacity);
            b.iter(|| {
                while let Ok(buf) = pool.allocate() {
                    held.push(buf);
                }
                for buf in held.drain(..) {
                    pool.release(buf).unwrap();
                }
            });
        });
    }
    group.finish();
}

fn bench_shared_pool(c: &mut Criterion) {
    let pool = SharedPacketPool::new(PacketPool::new(1000, PAYLOAD_SIZE).unwrap());
    c.bench_function("shared_pool_cycle", |b| {
        b.iter(|| {
            let buf = pool.allocate().unwrap();
            pool.release(black_box(buf)).unwrap();
        });
    });
}

criterion_group!(
    benches,
    bench_allocate_release,
    bench_drain_refill,
    bench_shared_pool
);
criterion_main!(benches);
