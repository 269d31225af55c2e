//! Predicates deciding whether a derived address is a hit.
//!
//! The search engine is agnostic about what "good" means; it only asks a
//! predicate. The two built-ins cover the common hunts: a trailing hex
//! pattern (optionally checksum-cased) and an exact hook permission bit
//! pattern in the address tail.

use alloy_primitives::{Address, keccak256};

use crate::error::PatternError;
use crate::hooks::{ALL_HOOK_MASK, HookFlag, address_flag_bits};

/// Nibbles in a 20-byte address.
const ADDRESS_NIBBLES: usize = 40;

/// Accept or reject a candidate address.
///
/// Implementations are queried from parallel workers, hence `Sync`. Calls
/// must be cheap; the engine performs no caching between attempts.
pub trait AddressPredicate: Sync {
    fn accepts(&self, address: &Address) -> bool;
}

/// How letter casing in a suffix pattern is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaseMode {
    /// Letters match either case.
    #[default]
    Insensitive,
    /// Letters must match the EIP-55 checksum rendering of the address.
    Checksum,
}

/// One required trailing nibble. `uppercase` is `None` for digits and in
/// case-insensitive mode.
#[derive(Debug, Clone, Copy)]
struct SuffixNibble {
    value: u8,
    uppercase: Option<bool>,
}

/// Requires the address to end in a given hex pattern.
///
/// Matching runs in two phases: nibble values first, and only if those hold
/// (and the pattern carries case requirements) the keccak checksum pass.
/// Value comparison stays allocation-free so the hot path never hashes for
/// a candidate that already failed on value.
#[derive(Debug, Clone)]
pub struct SuffixPattern {
    nibbles: Vec<SuffixNibble>,
    needs_checksum: bool,
}

impl SuffixPattern {
    /// Parses a trailing hex pattern, with or without a `0x` prefix.
    ///
    /// Odd lengths are fine; the pattern is anchored at the end of the
    /// address, not at a byte boundary.
    pub fn parse(suffix: &str, mode: CaseMode) -> Result<Self, PatternError> {
        let digits = suffix
            .strip_prefix("0x")
            .or_else(|| suffix.strip_prefix("0X"))
            .unwrap_or(suffix);
        if digits.is_empty() {
            return Err(PatternError::EmptySuffix);
        }
        if digits.len() > ADDRESS_NIBBLES {
            return Err(PatternError::SuffixTooLong(digits.len()));
        }

        let mut nibbles = Vec::with_capacity(digits.len());
        for ch in digits.chars() {
            let value = ch
                .to_digit(16)
                .ok_or(PatternError::InvalidHexDigit(ch))? as u8;
            let uppercase = match mode {
                CaseMode::Insensitive => None,
                CaseMode::Checksum => ch.is_ascii_alphabetic().then_some(ch.is_ascii_uppercase()),
            };
            nibbles.push(SuffixNibble { value, uppercase });
        }

        let needs_checksum = nibbles.iter().any(|nibble| nibble.uppercase.is_some());
        Ok(Self {
            nibbles,
            needs_checksum,
        })
    }

    /// Number of required trailing nibbles.
    pub fn len(&self) -> usize {
        self.nibbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nibbles.is_empty()
    }

    /// First nibble position (in 0..40) covered by the pattern.
    fn offset(&self) -> usize {
        ADDRESS_NIBBLES - self.nibbles.len()
    }
}

fn nibble_at(bytes: &[u8], position: usize) -> u8 {
    let byte = bytes[position / 2];
    if position % 2 == 0 { byte >> 4 } else { byte & 0x0f }
}

impl AddressPredicate for SuffixPattern {
    fn accepts(&self, address: &Address) -> bool {
        let offset = self.offset();
        let value_match = self
            .nibbles
            .iter()
            .enumerate()
            .all(|(i, nibble)| nibble_at(address.as_slice(), offset + i) == nibble.value);
        if !value_match {
            return false;
        }
        if !self.needs_checksum {
            return true;
        }

        // EIP-55: a hex letter is uppercased iff the matching nibble of
        // keccak256(lowercase hex of the address) is >= 8.
        let hex = hex::encode(address.as_slice());
        let digest = keccak256(hex.as_bytes());
        self.nibbles.iter().enumerate().all(|(i, nibble)| {
            nibble.uppercase.is_none_or(|uppercase| {
                (nibble_at(digest.as_slice(), offset + i) >= 8) == uppercase
            })
        })
    }
}

/// Requires an exact permission bit pattern in the address tail.
///
/// An address matches when its flag window, restricted to `mask`, equals
/// `required`. Bits inside the mask but outside `required` must be zero, so
/// a hook asking for two permissions is not satisfied by an address that
/// accidentally advertises a third.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagPattern {
    mask: u64,
    required: u64,
}

impl FlagPattern {
    /// Builds a pattern from a raw mask and required bits.
    pub fn new(mask: u64, required: u64) -> Result<Self, PatternError> {
        if required & !mask != 0 {
            return Err(PatternError::RequiredOutsideMask { mask, required });
        }
        Ok(Self { mask, required })
    }

    /// Builds a pattern requiring exactly the named permissions and no other
    /// flag bit. The mask covers the whole permission table.
    pub fn from_names<I, S>(names: I) -> Result<Self, crate::error::FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let required = HookFlag::build_mask(names)?;
        Ok(Self {
            mask: ALL_HOOK_MASK,
            required,
        })
    }

    /// Builds a pattern requiring exactly the given permissions.
    pub fn from_flags<I>(flags: I) -> Self
    where
        I: IntoIterator<Item = HookFlag>,
    {
        let required = flags.into_iter().fold(0u64, |acc, flag| acc | flag.mask());
        Self {
            mask: ALL_HOOK_MASK,
            required,
        }
    }

    pub fn mask(&self) -> u64 {
        self.mask
    }

    pub fn required(&self) -> u64 {
        self.required
    }
}

impl AddressPredicate for FlagPattern {
    fn accepts(&self, address: &Address) -> bool {
        address_flag_bits(address) & self.mask == self.required
    }
}
