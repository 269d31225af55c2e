//! Parallel brute-force salt search.
//!
//! The engine derives candidate addresses from successive salts and hands
//! each one to an [`AddressPredicate`]. Workers share a single attempt
//! counter, so a budget of N means at most N derivations across the whole
//! pool, and the first accepted candidate wins for everyone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use alloy_primitives::{Address, B256, U256};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::{IntoParallelIterator, ParallelIterator};

use crate::create2::create2_address;
use crate::predicate::AddressPredicate;

/// Cooperative stop flag shared between a running search and its controller.
///
/// Workers poll the flag between attempts, so cancellation lands at attempt
/// granularity; a derivation already in flight completes and is discarded.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks every worker holding a clone of this token to stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How salts are enumerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaltMode {
    /// `start`, `start + 1`, ... as big-endian 256-bit integers, wrapping
    /// at 2^256. Attempt `i` always maps to `start + i`, no matter which
    /// worker claims it.
    Sequential { start: B256 },
    /// Fresh random salts, one generator per worker, derived from `seed`.
    /// The same seed and worker count replay the same stream.
    Random { seed: u64 },
}

/// Knobs for one search run.
#[derive(Debug, Clone)]
pub struct MinePolicy {
    mode: SaltMode,
    max_attempts: Option<u64>,
    workers: Option<usize>,
    report_every: u64,
    cancel: CancelToken,
}

impl MinePolicy {
    /// A policy with the given salt mode and no bounds: unbounded attempts,
    /// pool-sized workers, reporting off, a fresh cancel token.
    pub fn new(mode: SaltMode) -> Self {
        Self {
            mode,
            max_attempts: None,
            workers: None,
            report_every: 0,
            cancel: CancelToken::new(),
        }
    }

    /// Sequential enumeration from `start`.
    pub fn sequential(start: B256) -> Self {
        Self::new(SaltMode::Sequential { start })
    }

    /// Seeded random enumeration.
    pub fn random(seed: u64) -> Self {
        Self::new(SaltMode::Random { seed })
    }

    /// Caps the total number of derivations across all workers.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Fixes the worker count instead of using the rayon pool width.
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Emits a progress event every `report_every` attempts. Zero disables
    /// reporting.
    pub fn with_report_every(mut self, report_every: u64) -> Self {
        self.report_every = report_every;
        self
    }

    /// Attaches an externally held cancellation token.
    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }
}

/// How a search run ended.
///
/// Running out of budget or being told to stop are ordinary results of a
/// probabilistic search, not errors. A token that was cancelled wins over an
/// exhausted budget when both hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MineOutcome {
    /// A salt whose derived address the predicate accepted.
    Found { salt: B256, address: Address },
    /// The attempt budget ran out with no match.
    Exhausted,
    /// The cancel token was triggered before a match.
    Cancelled,
}

/// Per-worker salt source.
enum SaltSource {
    Sequential { start: B256 },
    Random { rng: StdRng },
}

impl SaltSource {
    fn for_worker(mode: &SaltMode, worker: u64) -> Self {
        match *mode {
            SaltMode::Sequential { start } => Self::Sequential { start },
            SaltMode::Random { seed } => Self::Random {
                rng: StdRng::seed_from_u64(seed.wrapping_add(worker)),
            },
        }
    }

    fn salt_for(&mut self, attempt: u64) -> B256 {
        match self {
            Self::Sequential { start } => offset_salt(start, attempt),
            Self::Random { rng } => {
                let mut bytes = [0u8; 32];
                rng.fill(&mut bytes);
                B256::from(bytes)
            }
        }
    }
}

/// `base + offset` over the 32-byte big-endian salt space, wrapping at 2^256.
fn offset_salt(base: &B256, offset: u64) -> B256 {
    let value = U256::from_be_bytes(base.0).wrapping_add(U256::from(offset));
    B256::from(value)
}

/// Searches the salt space of one deployer and init code hash pair.
#[derive(Debug, Clone, Copy)]
pub struct Create2Miner {
    /// Address performing the deployment, baked into every preimage.
    deployer: Address,
    /// Keccak256 hash of the contract's initialization bytecode.
    bytecode_hash: B256,
}

impl Create2Miner {
    pub fn new(deployer: Address, bytecode_hash: B256) -> Self {
        Self {
            deployer,
            bytecode_hash,
        }
    }

    /// The address this deployer would get for one specific salt.
    ///
    /// This is the verification path: derive once, no search, so a caller
    /// can check a previously mined salt before spending gas on it.
    pub fn compute_address(&self, salt: &B256) -> Address {
        create2_address(self.deployer, *salt, self.bytecode_hash)
    }

    /// Runs the search until a salt matches, the budget runs out, or the
    /// policy's token is cancelled.
    ///
    /// The search:
    /// 1. Splits into workers, each with its own salt source
    /// 2. Claims attempt indices from a shared counter until the budget ends
    /// 3. Derives the candidate address for each claimed salt
    /// 4. Stops every worker as soon as one candidate is accepted
    pub fn mine(&self, predicate: &dyn AddressPredicate, policy: &MinePolicy) -> MineOutcome {
        let workers = policy.workers.unwrap_or_else(rayon::current_num_threads).max(1);
        let cap = policy.max_attempts.unwrap_or(u64::MAX);
        let attempts = AtomicU64::new(0);
        let found = AtomicBool::new(false);
        let cancel = &policy.cancel;

        tracing::info!(
            deployer = %self.deployer,
            bytecode_hash = %self.bytecode_hash,
            mode = ?policy.mode,
            max_attempts = policy.max_attempts,
            workers,
            "starting salt search"
        );

        let hit = (0..workers as u64)
            .into_par_iter()
            .find_map_any(|worker| {
                let mut source = SaltSource::for_worker(&policy.mode, worker);

                loop {
                    if cancel.is_cancelled() || found.load(Ordering::Relaxed) {
                        return None;
                    }

                    let attempt = attempts.fetch_add(1, Ordering::Relaxed);
                    if attempt >= cap {
                        return None;
                    }

                    let salt = source.salt_for(attempt);
                    let candidate = self.compute_address(&salt);
                    if predicate.accepts(&candidate) {
                        found.store(true, Ordering::Relaxed);
                        return Some((attempt, salt, candidate));
                    }

                    if policy.report_every != 0 && attempt != 0 && attempt % policy.report_every == 0
                    {
                        tracing::debug!(attempts = attempt, "still searching");
                    }
                }
            });

        match hit {
            Some((attempt, salt, address)) => {
                tracing::info!(%address, %salt, attempt, "found matching salt");
                MineOutcome::Found { salt, address }
            }
            None if cancel.is_cancelled() => {
                tracing::info!("search cancelled");
                MineOutcome::Cancelled
            }
            None => {
                tracing::info!(max_attempts = cap, "search exhausted its attempt budget");
                MineOutcome::Exhausted
            }
        }
    }
}
