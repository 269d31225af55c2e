//! End-to-end salt searches through the public API.
//!
//! The sequential fixtures all start from a zero salt against one pinned
//! deployer and init code hash pair, so every expected index, salt and
//! address below is a stable property of the derivation itself.

use std::thread;
use std::time::Duration;

use alloy_primitives::{Address, B256, address, b256};
use hookmine::{
    AddressPredicate, CancelToken, CaseMode, Create2Miner, FlagPattern, HookFlag, MineOutcome,
    MinePolicy, SuffixPattern,
};

const DEPLOYER: Address = address!("0x4838B106FCe9647Bdf1E7877BF73cE8B0BAD5f97");
const BYTECODE_HASH: B256 =
    b256!("0xc03eca48ffa996bd8d5e3be48957efde5e1b3e6d1d11323bc2f18dd403744432");

fn miner() -> Create2Miner {
    Create2Miner::new(DEPLOYER, BYTECODE_HASH)
}

#[test]
fn verifies_a_previously_mined_salt() {
    let salt = b256!("0x611b580e675bacaa4ad87a3a8ec25c59e16546ee4c42aad1c3fe783dee7c1de6");
    let address = miner().compute_address(&salt);
    assert_eq!(
        address,
        address!("0x9a7526ac57456a7a318e37a8aa99fdfd84766f6f")
    );
    assert_eq!(
        address.to_string(),
        "0x9A7526ac57456a7A318E37a8AA99FdFd84766f6f"
    );
}

#[test]
fn sequential_search_finds_the_first_suffix_match() {
    let predicate = SuffixPattern::parse("00", CaseMode::Insensitive).unwrap();
    let policy = MinePolicy::sequential(B256::ZERO).with_max_attempts(300);

    // Index 201 is the only match below the budget, so any worker count
    // lands on the same salt.
    assert_eq!(
        miner().mine(&predicate, &policy),
        MineOutcome::Found {
            salt: b256!("0x00000000000000000000000000000000000000000000000000000000000000c9"),
            address: address!("0xf48f5d311b36ecba40aa2fec0e4b89f34066f800"),
        }
    );
}

#[test]
fn too_small_a_budget_exhausts_cleanly() {
    let predicate = SuffixPattern::parse("00", CaseMode::Insensitive).unwrap();
    let policy = MinePolicy::sequential(B256::ZERO).with_max_attempts(200);
    assert_eq!(miner().mine(&predicate, &policy), MineOutcome::Exhausted);
}

#[test]
fn flag_search_encodes_exactly_the_requested_permissions() {
    let predicate = FlagPattern::from_names(["BEFORE_SWAP", "AFTER_SWAP"]).unwrap();
    let policy = MinePolicy::sequential(B256::ZERO).with_max_attempts(8000);

    let MineOutcome::Found { salt, address } = miner().mine(&predicate, &policy) else {
        panic!("expected a match within the budget");
    };
    assert_eq!(
        salt,
        b256!("0x0000000000000000000000000000000000000000000000000000000000001b56")
    );
    assert_eq!(
        address.to_string(),
        "0x83b0B06d25ad48172595649aaeB62476FEfC4030"
    );
    assert_eq!(
        HookFlag::set_in(&address),
        vec![HookFlag::BeforeSwap, HookFlag::AfterSwap]
    );
}

#[test]
fn checksum_suffix_search_respects_eip55_casing() {
    // The one address ending in f800 below 300 renders as ...F800, so the
    // uppercase pattern matches it and the lowercase pattern runs dry.
    let policy = MinePolicy::sequential(B256::ZERO).with_max_attempts(300);

    let upper = SuffixPattern::parse("F800", CaseMode::Checksum).unwrap();
    let MineOutcome::Found { address, .. } = miner().mine(&upper, &policy) else {
        panic!("expected the checksum-cased pattern to match");
    };
    assert_eq!(
        address,
        address!("0xf48f5d311b36ecba40aa2fec0e4b89f34066f800")
    );

    let lower = SuffixPattern::parse("f800", CaseMode::Checksum).unwrap();
    assert_eq!(miner().mine(&lower, &policy), MineOutcome::Exhausted);
}

#[test]
fn sequential_salts_carry_across_byte_boundaries() {
    // Accept only the address pinned for index 256; the winning salt must
    // be the zero base advanced past the low byte.
    struct Exactly(Address);
    impl AddressPredicate for Exactly {
        fn accepts(&self, address: &Address) -> bool {
            *address == self.0
        }
    }

    let target = address!("0x712d95af63b3c4fd5c948263ad1602fea4adbe86");
    let policy = MinePolicy::sequential(B256::ZERO).with_max_attempts(257);
    assert_eq!(
        miner().mine(&Exactly(target), &policy),
        MineOutcome::Found {
            salt: b256!("0x0000000000000000000000000000000000000000000000000000000000000100"),
            address: target,
        }
    );
}

#[test]
fn cancellation_interrupts_an_unbounded_search() {
    struct Never;
    impl AddressPredicate for Never {
        fn accepts(&self, _address: &Address) -> bool {
            false
        }
    }

    let cancel = CancelToken::new();
    let policy = MinePolicy::random(7).with_cancel(cancel.clone());

    let stopper = thread::spawn({
        let cancel = cancel.clone();
        move || {
            thread::sleep(Duration::from_millis(50));
            cancel.cancel();
        }
    });

    assert_eq!(miner().mine(&Never, &policy), MineOutcome::Cancelled);
    stopper.join().unwrap();
}

#[test]
fn random_search_replays_with_the_same_seed() {
    let predicate = FlagPattern::new(0xff, 0x42).unwrap();
    let policy = MinePolicy::random(1234)
        .with_max_attempts(2_000_000)
        .with_workers(1);

    let first = miner().mine(&predicate, &policy);
    let second = miner().mine(&predicate, &policy);
    assert_eq!(first, second);

    let MineOutcome::Found { salt, address } = first else {
        panic!("expected a match");
    };
    assert_eq!(miner().compute_address(&salt), address);
    assert!(predicate.accepts(&address));
}
