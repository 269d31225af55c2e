//! CREATE2 address derivation and salt search for Uniswap V4 hooks.
//!
//! A V4 hook advertises its permissions through the low bits of its own
//! deployed address, so shipping one means finding a salt whose CREATE2
//! address carries exactly the right bit pattern. This crate provides the
//! derivation ([`create2`]), the permission flag table ([`hooks`]), the
//! match predicates ([`predicate`]), and a parallel brute-force salt search
//! ([`mine`]), plus the tick price conversion ([`tick_math`]) used when
//! initializing the pools a hook attaches to.

pub mod create2;
pub mod error;
pub mod hooks;
pub mod mine;
pub mod predicate;
pub mod tick_math;

pub use create2::{create2_address, try_create2_address};
pub use hooks::{ALL_HOOK_MASK, HookFlag};
pub use mine::{CancelToken, Create2Miner, MineOutcome, MinePolicy, SaltMode};
pub use predicate::{AddressPredicate, CaseMode, FlagPattern, SuffixPattern};
