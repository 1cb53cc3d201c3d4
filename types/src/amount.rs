//! Wei amounts — the base currency unit of the UR chain.
//!
//! Amounts are 256-bit non-negative integers to match the issuance arithmetic
//! of the consensus rules. One UR is 10^18 wei; all reward math happens in wei
//! with integer division only.

use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub};

/// Raw wei value of one whole UR (10^18).
const ONE_UR_RAW: u64 = 1_000_000_000_000_000_000;

/// A wei amount.
///
/// Internally a `U256`; arithmetic that can underflow has checked variants.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Wei(U256);

impl Wei {
    pub const ZERO: Self = Self(U256::zero());

    /// One whole UR (10^18 wei).
    pub const ONE_UR: Self = Self(U256([ONE_UR_RAW, 0, 0, 0]));

    pub fn from_raw(raw: U256) -> Self {
        Self(raw)
    }

    /// A small amount given directly in wei.
    pub fn from_wei(raw: u64) -> Self {
        Self(U256::from(raw))
    }

    /// `n` whole UR.
    pub fn from_ur(n: u64) -> Self {
        Self(U256::from(n) * Self::ONE_UR.0)
    }

    pub fn raw(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }

    /// Integer division by a scaling denominator (truncating).
    pub fn scale_down(self, denominator: u64) -> Self {
        Self(self.0 / U256::from(denominator))
    }

    /// Whether this amount is an exact multiple of `denominator`.
    pub fn is_divisible_by(&self, denominator: u64) -> bool {
        (self.0 % U256::from(denominator)).is_zero()
    }

    /// Big-endian 32-byte representation, for canonical encodings.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }
}

impl Add for Wei {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Wei {
    fn add_assign(&mut self, rhs: Self) {
        self.0 = self.0 + rhs.0;
    }
}

impl Sub for Wei {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul<u64> for Wei {
    type Output = Self;
    fn mul(self, rhs: u64) -> Self {
        Self(self.0 * U256::from(rhs))
    }
}

impl fmt::Debug for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Wei({})", self.0)
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} wei", self.0)
    }
}
