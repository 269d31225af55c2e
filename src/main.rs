mod cli;

use alloy_primitives::{Address, address};
use clap::Parser;
use eyre::bail;
use rand::Rng;
use tracing_subscriber::EnvFilter;

use hookmine::hooks::HookFlag;
use hookmine::mine::{Create2Miner, MineOutcome, MinePolicy};
use hookmine::predicate::{AddressPredicate, CaseMode, FlagPattern, SuffixPattern};
use hookmine::tick_math;

use cli::{BoundsArgs, Hookmine, SearchArgs, VerifyArgs};

/// The deterministic deployment proxy present on most EVM chains.
/// See: https://github.com/Arachnid/deterministic-deployment-proxy
const DEFAULT_DEPLOYER: Address = address!("0x4e59b44847b379578588920cA78FbF26c0B4956C");

fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match Hookmine::parse() {
        Hookmine::Search(args) => search(args),
        Hookmine::Verify(args) => verify(args),
        Hookmine::Flags => flag_table(),
        Hookmine::Bounds(args) => bounds(args),
    }
}

fn search(args: SearchArgs) -> eyre::Result<()> {
    let predicate: Box<dyn AddressPredicate> = if let Some(suffix) = &args.suffix {
        let mode = if args.checksum {
            CaseMode::Checksum
        } else {
            CaseMode::Insensitive
        };
        Box::new(SuffixPattern::parse(suffix, mode)?)
    } else if !args.flags.is_empty() {
        Box::new(FlagPattern::from_names(&args.flags)?)
    } else {
        bail!("nothing to search for: pass --suffix or --flags");
    };

    let mut policy = match args.start_salt {
        Some(start) => MinePolicy::sequential(start),
        None => {
            // Log the seed so a lucky run can be replayed.
            let seed = args.seed.unwrap_or_else(|| rand::rng().random());
            tracing::info!(seed, "using a random salt stream");
            MinePolicy::random(seed)
        }
    };
    if let Some(max_attempts) = args.max_attempts {
        policy = policy.with_max_attempts(max_attempts);
    }
    if let Some(workers) = args.workers {
        policy = policy.with_workers(workers);
    }
    policy = policy.with_report_every(args.report_every);

    let deployer = args.deployer.unwrap_or(DEFAULT_DEPLOYER);
    let miner = Create2Miner::new(deployer, args.bytecode_hash);

    match miner.mine(predicate.as_ref(), &policy) {
        MineOutcome::Found { salt, address } => {
            println!("salt:     {salt}");
            print_address(&address);
            Ok(())
        }
        MineOutcome::Exhausted => bail!("no matching salt within the attempt budget"),
        MineOutcome::Cancelled => bail!("salt search was cancelled before a match"),
    }
}

fn verify(args: VerifyArgs) -> eyre::Result<()> {
    let deployer = args.deployer.unwrap_or(DEFAULT_DEPLOYER);
    let miner = Create2Miner::new(deployer, args.bytecode_hash);
    let address = miner.compute_address(&args.salt);

    print_address(&address);
    let flags = HookFlag::set_in(&address);
    if flags.is_empty() {
        println!("flags:    none");
    } else {
        let names: Vec<&str> = flags.iter().map(|flag| flag.name()).collect();
        println!("flags:    {}", names.join(" | "));
    }
    Ok(())
}

/// Plain-lowercase and checksum-cased renderings of the same address.
fn print_address(address: &Address) {
    println!("address:  0x{}", hex::encode(address));
    println!("checksum: {address}");
}

fn flag_table() -> eyre::Result<()> {
    for flag in HookFlag::ALL {
        println!(
            "{:<24} bit {:>2}  mask 0x{:04x}  {}",
            flag.name(),
            flag.bit(),
            flag.mask(),
            flag.marker_address()
        );
    }
    Ok(())
}

fn bounds(args: BoundsArgs) -> eyre::Result<()> {
    let min = tick_math::min_usable_tick(args.tick_spacing);
    let max = tick_math::max_usable_tick(args.tick_spacing);
    println!("tick spacing: {}", args.tick_spacing);
    println!(
        "min tick: {:>8}  sqrt price x96: {}",
        min,
        tick_math::sqrt_price_x96_at_tick(min)?
    );
    println!(
        "max tick: {:>8}  sqrt price x96: {}",
        max,
        tick_math::sqrt_price_x96_at_tick(max)?
    );
    Ok(())
}
