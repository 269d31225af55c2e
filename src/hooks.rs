//! The hook permission flag table.
//!
//! Hook contracts advertise their permissions through the low bits of their
//! own deployed address: the pool manager dispatches on the literal bit
//! pattern, not on any on-chain metadata. Each named permission owns one
//! stable bit, counted from bit 0 upward.

use alloy_primitives::Address;

use crate::error::FlagError;

/// Mask covering every bit in the permission table.
pub const ALL_HOOK_MASK: u64 = (1 << HookFlag::COUNT) - 1;

/// A named hook permission and its address bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum HookFlag {
    BeforeInitialize = 0,
    AfterInitialize = 1,
    BeforeModifyPosition = 2,
    AfterModifyPosition = 3,
    BeforeSwap = 4,
    AfterSwap = 5,
    BeforeDonate = 6,
    AfterDonate = 7,
    BeforeSettle = 8,
    AfterSettle = 9,
    BeforeLock = 10,
    AfterLock = 11,
    BeforeSync = 12,
    AfterSync = 13,
}

impl HookFlag {
    /// Number of named permissions in the table.
    pub const COUNT: usize = 14;

    /// Every flag, in bit order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::BeforeInitialize,
        Self::AfterInitialize,
        Self::BeforeModifyPosition,
        Self::AfterModifyPosition,
        Self::BeforeSwap,
        Self::AfterSwap,
        Self::BeforeDonate,
        Self::AfterDonate,
        Self::BeforeSettle,
        Self::AfterSettle,
        Self::BeforeLock,
        Self::AfterLock,
        Self::BeforeSync,
        Self::AfterSync,
    ];

    /// Bit position of this permission within an address.
    pub const fn bit(self) -> u8 {
        self as u8
    }

    /// Single-bit mask for this permission.
    pub const fn mask(self) -> u64 {
        1 << self.bit()
    }

    /// Canonical table name of this permission.
    pub const fn name(self) -> &'static str {
        match self {
            Self::BeforeInitialize => "BEFORE_INITIALIZE",
            Self::AfterInitialize => "AFTER_INITIALIZE",
            Self::BeforeModifyPosition => "BEFORE_MODIFY_POSITION",
            Self::AfterModifyPosition => "AFTER_MODIFY_POSITION",
            Self::BeforeSwap => "BEFORE_SWAP",
            Self::AfterSwap => "AFTER_SWAP",
            Self::BeforeDonate => "BEFORE_DONATE",
            Self::AfterDonate => "AFTER_DONATE",
            Self::BeforeSettle => "BEFORE_SETTLE",
            Self::AfterSettle => "AFTER_SETTLE",
            Self::BeforeLock => "BEFORE_LOCK",
            Self::AfterLock => "AFTER_LOCK",
            Self::BeforeSync => "BEFORE_SYNC",
            Self::AfterSync => "AFTER_SYNC",
        }
    }

    /// Looks a permission up by name.
    ///
    /// Accepts any casing and either `-` or `_` as the separator, so CLI
    /// spellings like `before-swap` resolve to the table entry. Unknown names
    /// fail here, before any search starts.
    pub fn from_name(name: &str) -> Result<Self, FlagError> {
        let normalized = name.trim().replace('-', "_").to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|flag| flag.name() == normalized)
            .ok_or_else(|| FlagError::UnknownFlagName(name.to_owned()))
    }

    /// ORs the bits of the named permissions into one mask.
    pub fn build_mask<I, S>(names: I) -> Result<u64, FlagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut mask = 0u64;
        for name in names {
            mask |= Self::from_name(name.as_ref())?.mask();
        }
        Ok(mask)
    }

    /// Whether an address advertises this permission.
    pub fn is_set_in(self, address: &Address) -> bool {
        address_flag_bits(address) & self.mask() != 0
    }

    /// Every permission an address advertises, in bit order.
    pub fn set_in(address: &Address) -> Vec<Self> {
        Self::ALL
            .into_iter()
            .filter(|flag| flag.is_set_in(address))
            .collect()
    }

    /// The address whose bit pattern is exactly this permission's bit.
    ///
    /// Matches the marker addresses in the reference permission table; handy
    /// for eyeballing which nibble a flag lands in.
    pub fn marker_address(self) -> Address {
        let mut bytes = [0u8; 20];
        bytes[12..20].copy_from_slice(&self.mask().to_be_bytes());
        Address::from(bytes)
    }
}

/// The flag window of an address: its trailing eight bytes as a big-endian
/// integer. Wider than the current table so the table can grow.
pub fn address_flag_bits(address: &Address) -> u64 {
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&address.as_slice()[12..]);
    u64::from_be_bytes(tail)
}
