//! CREATE2 address derivation.
//!
//! A contract deployed through CREATE2 lands at
//! `keccak256(0xff ++ deployer ++ salt ++ keccak256(init_code))[12..]`
//! (see [EIP-1014](https://eips.ethereum.org/EIPS/eip-1014)). The preimage
//! layout is fixed: any deviation in byte order or length produces a wrong
//! but plausible-looking address, so it is assembled here in one place and
//! nowhere else.

use alloy_primitives::{Address, B256, keccak256};

use crate::error::InputError;

/// Tag byte that distinguishes the CREATE2 preimage from RLP data.
pub const PREIMAGE_TAG: u8 = 0xff;

/// Total preimage size: tag + deployer + salt + bytecode hash.
pub const PREIMAGE_LEN: usize = 1 + 20 + 32 + 32;

/// Derives the CREATE2 contract address for `salt`.
///
/// Pure function of its inputs; the fixed-size types make malformed lengths
/// unrepresentable, so this is the infallible path the mining loop runs on.
#[inline]
pub fn create2_address(deployer: Address, salt: B256, bytecode_hash: B256) -> Address {
    let mut preimage = [0u8; PREIMAGE_LEN];
    preimage[0] = PREIMAGE_TAG;
    preimage[1..21].copy_from_slice(deployer.as_slice());
    preimage[21..53].copy_from_slice(salt.as_slice());
    preimage[53..85].copy_from_slice(bytecode_hash.as_slice());

    let digest = keccak256(preimage);
    Address::from_slice(&digest[12..])
}

/// Derives the CREATE2 contract address from untyped byte slices.
///
/// Validating counterpart of [`create2_address`] for callers that hold raw
/// bytes rather than parsed primitives. Rejects any wrong length outright;
/// inputs are never padded or truncated.
pub fn try_create2_address(
    deployer: &[u8],
    salt: &[u8],
    bytecode_hash: &[u8],
) -> Result<Address, InputError> {
    let deployer = Address::try_from(deployer).map_err(|_| InputError::InvalidInputLength {
        field: "deployer",
        expected: Address::len_bytes(),
        actual: deployer.len(),
    })?;
    let salt = B256::try_from(salt).map_err(|_| InputError::InvalidInputLength {
        field: "salt",
        expected: B256::len_bytes(),
        actual: salt.len(),
    })?;
    let bytecode_hash =
        B256::try_from(bytecode_hash).map_err(|_| InputError::InvalidInputLength {
            field: "bytecode_hash",
            expected: B256::len_bytes(),
            actual: bytecode_hash.len(),
        })?;

    Ok(create2_address(deployer, salt, bytecode_hash))
}
