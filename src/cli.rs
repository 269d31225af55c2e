use alloy_primitives::{Address, B256};

/// Command-line interface for the hookmine tool.
///
/// hookmine searches for CREATE2 salts that place a Uniswap V4 hook contract
/// at an address encoding the hook's permission flags, or any other trailing
/// pattern, in its low bits.
#[derive(Clone, Debug, clap::Parser)]
#[command(
    name = "hookmine",
    about = "hookmine is a CREATE2 salt miner for Uniswap V4 hook addresses."
)]
pub(super) enum Hookmine {
    /// Searches for a salt whose derived address matches a pattern.
    ///
    /// CREATE2 derives the deployed address from the deployer, the salt and
    /// the init code hash alone, so a salt mined here pins the address
    /// before anything is sent on chain.
    Search(SearchArgs),

    /// Derives the address for one specific salt.
    ///
    /// The verification half of a search: run it on a previously mined salt
    /// to confirm the address and its decoded permissions before deploying.
    Verify(VerifyArgs),

    /// Prints the hook permission flag table.
    Flags,

    /// Prints the usable tick range and its sqrt prices for a tick spacing.
    Bounds(BoundsArgs),
}

#[derive(Clone, Debug, clap::Args)]
pub(super) struct SearchArgs {
    /// Hash of the initialization code.
    pub(super) bytecode_hash: B256,

    /// Address performing the CREATE2 deployment. Defaults to the
    /// deterministic deployment proxy.
    #[clap(short, long)]
    pub(super) deployer: Option<Address>,

    /// Hex pattern the mined address must end with.
    #[clap(long, conflicts_with = "flags")]
    pub(super) suffix: Option<String>,

    /// Require suffix letters to match the EIP-55 checksum casing.
    #[clap(long, requires = "suffix")]
    pub(super) checksum: bool,

    /// Hook permissions the mined address must encode, comma separated.
    /// The address must carry exactly these flag bits and no others.
    #[clap(short, long, value_delimiter = ',')]
    pub(super) flags: Vec<String>,

    /// Stop after this many derivations instead of searching forever.
    #[clap(long)]
    pub(super) max_attempts: Option<u64>,

    /// Enumerate salts sequentially from this value instead of randomly.
    #[clap(long)]
    pub(super) start_salt: Option<B256>,

    /// Seed for the random salt stream. Drawn from the OS when omitted.
    #[clap(long, conflicts_with = "start_salt")]
    pub(super) seed: Option<u64>,

    /// Number of search workers. Defaults to the rayon pool width.
    #[clap(short, long)]
    pub(super) workers: Option<usize>,

    /// Log progress every N attempts. Zero disables progress logs.
    #[clap(long, default_value_t = 1_000_000)]
    pub(super) report_every: u64,
}

#[derive(Clone, Debug, clap::Args)]
pub(super) struct VerifyArgs {
    /// Hash of the initialization code.
    pub(super) bytecode_hash: B256,

    /// Salt to derive the address for.
    pub(super) salt: B256,

    /// Address performing the CREATE2 deployment. Defaults to the
    /// deterministic deployment proxy.
    #[clap(short, long)]
    pub(super) deployer: Option<Address>,
}

#[derive(Clone, Debug, clap::Args)]
pub(super) struct BoundsArgs {
    /// Tick spacing of the pool.
    #[clap(
        long,
        default_value_t = 200,
        value_parser = clap::value_parser!(i32).range(1..)
    )]
    pub(super) tick_spacing: i32,
}
