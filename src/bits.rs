//! Fixed-width bit vectors (most-significant bit first) and their string forms.
//!
//! - `Byte` is the 8-bit vector toggled by every byte-oriented game.
//! - `PermissionBits` is the 9-bit owner/group/others `rwx` vector.
//!
//! Conversions are pure. The only failure is building a vector from a value
//! that does not fit the width; callers mask (`value & 0xFF`) beforehand.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::domain::{Permission, UserClass};
use crate::error::{Error, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct BitVector<const N: usize> {
    bits: [bool; N],
}

pub type Byte = BitVector<8>;
pub type PermissionBits = BitVector<9>;

impl<const N: usize> BitVector<N> {
    pub const WIDTH: usize = N;

    pub const fn zeroed() -> Self {
        Self { bits: [false; N] }
    }

    pub const fn from_bits(bits: [bool; N]) -> Self {
        Self { bits }
    }

    pub fn bits(&self) -> &[bool; N] {
        &self.bits
    }

    /// Bit at `index`, where index 0 is the most-significant bit.
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.bits[index] = value;
    }

    pub fn toggle(&mut self, index: usize) {
        self.bits[index] = !self.bits[index];
    }

    pub fn clear(&mut self) {
        self.bits = [false; N];
    }

    /// Sum of set-bit place values, MSB first.
    pub fn to_integer(&self) -> u32 {
        self.bits
            .iter()
            .fold(0u32, |acc, &bit| (acc << 1) | u32::from(bit))
    }

    /// Inverse of [`to_integer`](Self::to_integer).
    ///
    /// # Errors
    ///
    /// Returns [`Error::BitRange`] if `value >= 2^N`.
    pub fn from_integer(value: u32) -> Result<Self> {
        if N < 32 && u64::from(value) >= (1u64 << N) {
            return Err(Error::BitRange { value, width: N });
        }
        let mut bits = [false; N];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = (value >> (N - 1 - i)) & 1 == 1;
        }
        Ok(Self { bits })
    }

    /// Uppercase hex, zero-padded to one digit per nibble of width.
    pub fn to_hex(&self) -> String {
        format!("{:0width$X}", self.to_integer(), width = N.div_ceil(4))
    }

    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }
}

impl<const N: usize> Default for BitVector<N> {
    fn default() -> Self {
        Self::zeroed()
    }
}

impl Byte {
    pub fn from_u8(value: u8) -> Self {
        let mut bits = [false; 8];
        for (i, bit) in bits.iter_mut().enumerate() {
            *bit = value & (1 << (7 - i)) != 0;
        }
        Self { bits }
    }

    pub fn to_u8(&self) -> u8 {
        // width 8 always fits
        self.to_integer() as u8
    }
}

impl PermissionBits {
    fn offset(class: UserClass) -> usize {
        class.index() * 3
    }

    /// Three octal digits, one per user class (`"644"`).
    pub fn to_octal_triplet(&self) -> String {
        UserClass::ALL
            .iter()
            .map(|class| {
                let o = Self::offset(*class);
                let digit = u8::from(self.bits[o]) * 4
                    + u8::from(self.bits[o + 1]) * 2
                    + u8::from(self.bits[o + 2]);
                char::from(b'0' + digit)
            })
            .collect()
    }

    /// `ls -l` style notation (`"rw-r--r--"`).
    pub fn to_symbolic(&self) -> String {
        self.bits
            .iter()
            .zip(Permission::ALL.iter().cycle())
            .map(|(set, p)| if *set { p.symbol() } else { '-' })
            .collect()
    }

    /// Parses an octal preset such as `"755"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBits`] unless the text is exactly three octal digits.
    pub fn from_octal_triplet(text: &str) -> Result<Self> {
        let digits: Vec<u32> = text.chars().filter_map(|c| c.to_digit(8)).collect();
        if digits.len() != 3 || text.chars().count() != 3 {
            return Err(Error::InvalidBits(text.to_string()));
        }
        let value = digits.iter().fold(0u32, |acc, d| (acc << 3) | d);
        Self::from_integer(value)
    }

    pub fn has(&self, permission: Permission, class: UserClass) -> bool {
        self.bits[Self::offset(class) + permission.index()]
    }

    pub fn toggle_permission(&mut self, permission: Permission, class: UserClass) {
        self.toggle(Self::offset(class) + permission.index());
    }

    /// Plain-English rendering, e.g. `"owner can read, write; group has no permissions; ..."`.
    pub fn describe(&self) -> String {
        UserClass::ALL
            .iter()
            .map(|class| {
                let granted: Vec<&str> = Permission::ALL
                    .iter()
                    .filter(|p| self.has(**p, *class))
                    .map(|p| p.verb())
                    .collect();
                if granted.is_empty() {
                    format!("{} has no permissions", class.label())
                } else {
                    format!("{} can {}", class.label(), granted.join(", "))
                }
            })
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl<const N: usize> fmt::Display for BitVector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl<const N: usize> fmt::Debug for BitVector<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVector<{}>({})", N, self)
    }
}

impl<const N: usize> FromStr for BitVector<N> {
    type Err = Error;

    /// Parses exactly `N` characters of `0`/`1`.
    fn from_str(s: &str) -> Result<Self> {
        if s.chars().count() != N {
            return Err(Error::InvalidBits(s.to_string()));
        }
        let mut bits = [false; N];
        for (bit, c) in bits.iter_mut().zip(s.chars()) {
            *bit = match c {
                '0' => false,
                '1' => true,
                _ => return Err(Error::InvalidBits(s.to_string())),
            };
        }
        Ok(Self { bits })
    }
}

impl<const N: usize> Serialize for BitVector<N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
