use std::collections::VecDeque;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{info, instrument};

use pktpool_config::PktpoolConfig;
use pktpool_core::alloc::{PacketBuf, PacketPool, PoolStats};
use pktpool_telemetry::{PoolLogger, PoolMetrics};

use crate::error::CliError;

#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Configuration file; defaults to config/pktpool.yaml plus PKTPOOL_* variables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Allocate, mutate and release a single packet
    Demo(PoolArgs),
    /// Run a seeded random allocate/release workload
    Stress(StressArgs),
    /// Load and validate configuration, then print it
    CheckConfig,
}

/// Overrides for the configured pool.
#[derive(Args, Debug, Clone, Default)]
pub struct PoolArgs {
    #[arg(long)]
    pub capacity: Option<usize>,
    #[arg(long)]
    pub payload_size: Option<usize>,
    /// Zero whole buffers on release
    #[arg(long, overrides_with = "no_zero_on_release")]
    pub zero_on_release: bool,
    /// Only reset the length on release, even if configured to zero
    #[arg(long, overrides_with = "zero_on_release")]
    pub no_zero_on_release: bool,
}

impl PoolArgs {
    /// The requested zeroing policy, if either flag was given.
    fn zeroing(&self) -> Option<bool> {
        if self.zero_on_release {
            Some(true)
        } else if self.no_zero_on_release {
            Some(false)
        } else {
            None
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct StressArgs {
    #[command(flatten)]
    pub pool: PoolArgs,
    /// Number of allocate/release operations
    #[arg(long, default_value_t = 100_000)]
    pub ops: usize,
    #[arg(long, default_value_t = 0)]
    pub seed: u64,
    /// Buffers held before the oldest is released; defaults to the capacity
    #[arg(long)]
    pub hold: Option<usize>,
}

/// Outcome of a stress run.
#[derive(Debug, Clone, Copy)]
pub struct StressReport {
    pub ops: usize,
    /// Allocations refused because the pool was empty.
    pub backpressure: u64,
    pub stats: PoolStats,
}

pub fn run_command(cli: Cli) -> Result<(), CliError> {
    let config = match &cli.config {
        Some(path) => PktpoolConfig::load_from_path(path)?,
        None => PktpoolConfig::load()?,
    };
    PoolLogger::init(&config.telemetry.log_filter)?;

    match cli.command {
        Commands::Demo(args) => {
            let mut pool = build_pool(&config, &args)?;
            run_demo(&mut pool)
        }
        Commands::Stress(args) => {
            let mut pool = build_pool(&config, &args.pool)?;
            let metrics = PoolMetrics::new(&config.telemetry.metrics_prefix)?;
            let hold = args.hold.unwrap_or(pool.capacity());
            let report = run_stress(&mut pool, args.ops, args.seed, hold)?;

            metrics.observe(&report.stats);
            println!(
                "{} ops, {} allocations, {} releases, {} backpressure stalls",
                report.ops, report.stats.allocations, report.stats.frees, report.backpressure
            );
            print!("{}", metrics.gather()?);
            Ok(())
        }
        Commands::CheckConfig => {
            print!("{}", serde_yaml::to_string(&config)?);
            Ok(())
        }
    }
}

fn build_pool(config: &PktpoolConfig, args: &PoolArgs) -> Result<PacketPool, CliError> {
    let mut pool_config = config.pool.clone();
    if let Some(capacity) = args.capacity {
        pool_config.capacity = capacity;
    }
    if let Some(payload_size) = args.payload_size {
        pool_config.payload_size = payload_size;
    }
    if let Some(zero_on_release) = args.zeroing() {
        pool_config.zero_on_release = zero_on_release;
    }
    Ok(PacketPool::from_config(&pool_config)?)
}

pub fn run_demo(pool: &mut PacketPool) -> Result<(), CliError> {
    let mut p = pool.allocate()?;
    println!("Allocated packet of size: {}", p.len());

    p.set_len(1)?;
    p.data_mut()[0] = 42;
    println!(
        "Can mutate packet: length = {}, data[0] = {}",
        p.len(),
        p.data()[0]
    );

    pool.release(p)?;
    println!(
        "Released packet (ownership ends); {} of {} buffers free",
        pool.free_count(),
        pool.capacity()
    );
    Ok(())
}

/// Random allocate/release mix. On exhaustion the oldest held buffer is
/// released, the way a pipeline stage drops its backlog under pressure.
#[instrument(skip(pool), fields(pool_id = %pool.id()))]
pub fn run_stress(
    pool: &mut PacketPool,
    ops: usize,
    seed: u64,
    hold: usize,
) -> Result<StressReport, CliError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut held: VecDeque<PacketBuf> = VecDeque::with_capacity(hold.min(pool.capacity()));
    let mut backpressure = 0;

    for _ in 0..ops {
        if rng.random_bool(0.6) {
            match pool.allocate() {
                Ok(mut buf) => {
                    let len = rng.random_range(0..=buf.capacity());
                    buf.fill(rng.random(), len);
                    held.push_back(buf);
                }
                Err(e) if e.is_exhausted() => {
                    backpressure += 1;
                    if let Some(oldest) = held.pop_front() {
                        pool.release(oldest)?;
                    }
                }
                Err(e) => return Err(e.into()),
            }
            if held.len() > hold {
                if let Some(oldest) = held.pop_front() {
                    pool.release(oldest)?;
                }
            }
        } else if let Some(buf) = held.pop_front() {
            pool.release(buf)?;
        }
    }

    for buf in held.drain(..) {
        pool.release(buf)?;
    }

    let stats = pool.stats();
    info!(
        ops,
        backpressure,
        low_water = stats.low_water,
        freed_bytes = stats.freed_bytes,
        "stress run complete"
    );
    Ok(StressReport {
        ops,
        backpressure,
        stats,
    })
}
