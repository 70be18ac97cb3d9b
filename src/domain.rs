//! Domain models shared by the games: variant kinds, targets, answers, and score entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::bits::{Byte, PermissionBits};

/// Which challenge game is being played?
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantKind {
  BinaryBasics,
  Hexadecimal,
  BitwiseOps,
  AsciiText,
  ColorCoding,
  FilePermissions,
}

impl VariantKind {
  pub const ALL: [VariantKind; 6] = [
    VariantKind::BinaryBasics,
    VariantKind::Hexadecimal,
    VariantKind::BitwiseOps,
    VariantKind::AsciiText,
    VariantKind::ColorCoding,
    VariantKind::FilePermissions,
  ];

  /// Key under which the progress store tracks this game.
  pub fn module_key(self) -> &'static str {
    match self {
      VariantKind::BinaryBasics => "BinaryBasics",
      VariantKind::Hexadecimal => "Hexadecimal",
      VariantKind::BitwiseOps => "BinaryOperations",
      VariantKind::AsciiText => "App_ASCII TEXT",
      VariantKind::ColorCoding => "App_COLOR CODING",
      VariantKind::FilePermissions => "App_FILE PERMISSIONS",
    }
  }
}

/// Module key of the file size converter (not a timed game).
pub const FILE_SIZES_MODULE: &str = "App_FILE SIZES";

/// Bitwise operation practised in the operations game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BitOperation {
  And,
  Or,
  Xor,
  Not,
  /// Left shift by one, masked to 8 bits.
  Shift,
}

impl BitOperation {
  pub const ALL: [BitOperation; 5] = [
    BitOperation::And,
    BitOperation::Or,
    BitOperation::Xor,
    BitOperation::Not,
    BitOperation::Shift,
  ];

  /// NOT and SHIFT only read the first operand.
  pub fn is_unary(self) -> bool {
    matches!(self, BitOperation::Not | BitOperation::Shift)
  }

  pub fn apply(self, first: u8, second: u8) -> u8 {
    match self {
      BitOperation::And => first & second,
      BitOperation::Or => first | second,
      BitOperation::Xor => first ^ second,
      BitOperation::Not => !first,
      BitOperation::Shift => first << 1,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      BitOperation::And => "AND",
      BitOperation::Or => "OR",
      BitOperation::Xor => "XOR",
      BitOperation::Not => "NOT",
      BitOperation::Shift => "SHIFT",
    }
  }
}

/// Target of one operations round: operands plus the result to reproduce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OperationTarget {
  pub operation: BitOperation,
  pub first: u8,
  pub second: Option<u8>,
  pub expected: u8,
}

/// Operand bits the player toggles in the operations game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct OperandBits {
  pub first: Byte,
  pub second: Byte,
}

/// Record of a matched operations round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct OperationResult {
  pub operation: BitOperation,
  pub first: u8,
  pub second: Option<u8>,
  pub result: u8,
}

/// An RGB color, one byte per channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
  pub red: u8,
  pub green: u8,
  pub blue: u8,
}

impl Rgb {
  pub const fn new(red: u8, green: u8, blue: u8) -> Self {
    Self { red, green, blue }
  }

  pub fn from_channels(red: &Byte, green: &Byte, blue: &Byte) -> Self {
    Self::new(red.to_u8(), green.to_u8(), blue.to_u8())
  }

  pub fn channels(&self) -> [u8; 3] {
    [self.red, self.green, self.blue]
  }

  /// `#RRGGBB`
  pub fn hex(&self) -> String {
    format!("#{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
  }

  /// True when every channel differs by at most `tolerance` of the full 0-255 range.
  pub fn within(&self, other: &Rgb, tolerance: f64) -> bool {
    self
      .channels()
      .iter()
      .zip(other.channels().iter())
      .all(|(a, b)| (f64::from(*a) - f64::from(*b)).abs() / 255.0 <= tolerance)
  }
}

/// Owner / group / others.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserClass {
  Owner,
  Group,
  Others,
}

impl UserClass {
  pub const ALL: [UserClass; 3] = [UserClass::Owner, UserClass::Group, UserClass::Others];

  pub fn index(self) -> usize {
    match self {
      UserClass::Owner => 0,
      UserClass::Group => 1,
      UserClass::Others => 2,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      UserClass::Owner => "owner",
      UserClass::Group => "group",
      UserClass::Others => "others",
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Permission {
  Read,
  Write,
  Execute,
}

impl Permission {
  pub const ALL: [Permission; 3] = [Permission::Read, Permission::Write, Permission::Execute];

  pub fn index(self) -> usize {
    match self {
      Permission::Read => 0,
      Permission::Write => 1,
      Permission::Execute => 2,
    }
  }

  pub fn symbol(self) -> char {
    match self {
      Permission::Read => 'r',
      Permission::Write => 'w',
      Permission::Execute => 'x',
    }
  }

  pub fn verb(self) -> &'static str {
    match self {
      Permission::Read => "read",
      Permission::Write => "write",
      Permission::Execute => "execute",
    }
  }
}

/// Curated permission scenario: a task description and the exact bits it expects.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PermissionScenario {
  pub description: &'static str,
  pub expected: PermissionBits,
}

impl PermissionScenario {
  pub fn is_correct(&self, bits: &PermissionBits) -> bool {
    *bits == self.expected
  }
}

/// Immutable record of one matched round.
#[derive(Clone, Debug, Serialize)]
pub struct ScoreEntry<T, A> {
  pub id: Uuid,
  pub target: T,
  pub answer: A,
  pub points: u32,
  pub created_at: DateTime<Utc>,
}

impl<T, A> ScoreEntry<T, A> {
  pub fn new(target: T, answer: A, points: u32) -> Self {
    Self {
      id: Uuid::new_v4(),
      target,
      answer,
      points,
      created_at: Utc::now(),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_operations_stay_within_a_byte() {
    assert_eq!(BitOperation::And.apply(0b1100_1100, 0b1010_1010), 0b1000_1000);
    assert_eq!(BitOperation::Or.apply(0b1100_1100, 0b1010_1010), 0b1110_1110);
    assert_eq!(BitOperation::Xor.apply(0b1100_1100, 0b1010_1010), 0b0110_0110);
    assert_eq!(BitOperation::Not.apply(0b1100_1100, 0), 0b0011_0011);
    assert_eq!(BitOperation::Shift.apply(0b1100_1100, 0), 0b1001_1000);
  }

  #[test]
  fn test_color_tolerance() {
    let target = Rgb::new(200, 50, 10);
    assert!(target.within(&Rgb::new(195, 52, 11), 0.05));
    // 12/255 is inside the band, 13/255 is not
    assert!(target.within(&Rgb::new(212, 50, 10), 0.05));
    assert!(!target.within(&Rgb::new(213, 50, 10), 0.05));
    assert_eq!(target.hex(), "#C8320A");
  }

  #[test]
  fn test_module_keys_are_unique() {
    let mut keys: Vec<_> = VariantKind::ALL.iter().map(|k| k.module_key()).collect();
    keys.push(FILE_SIZES_MODULE);
    let before = keys.len();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), before);
  }
}
