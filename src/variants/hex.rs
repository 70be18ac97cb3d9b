//! Hexadecimal: the target is shown as two hex digits, the player answers in bits.
//!
//! Typed hex goes through `util::hex_to_byte` first, so it arrives here as bits too.

use rand::Rng;
use serde::Serialize;

use crate::bits::Byte;
use crate::domain::VariantKind;
use crate::scoring::Rules;

use super::Variant;

#[derive(Clone, Debug)]
pub struct Hexadecimal {
    rules: Rules,
}

impl Hexadecimal {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }

    /// Display form of a target (`"AD"`).
    pub fn target_hex(target: u8) -> String {
        format!("{:02X}", target)
    }
}

impl Default for Hexadecimal {
    fn default() -> Self {
        Self::new(Rules::defaults_for(VariantKind::Hexadecimal))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HexRecord {
    pub decimal: u8,
    pub binary: Byte,
    pub hex: String,
}

impl Variant for Hexadecimal {
    type Target = u8;
    type Answer = Byte;
    type Record = HexRecord;

    fn kind(&self) -> VariantKind {
        VariantKind::Hexadecimal
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        rng.gen()
    }

    fn is_match(&self, target: &u8, answer: &Byte) -> bool {
        answer.to_hex() == Self::target_hex(*target)
    }

    fn record(&self, _target: &u8, answer: &Byte) -> HexRecord {
        HexRecord {
            decimal: answer.to_u8(),
            binary: *answer,
            hex: answer.to_hex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::hex_to_byte;

    #[test]
    fn test_typed_hex_matches() {
        let v = Hexadecimal::default();
        let bits = hex_to_byte("ad").unwrap();
        assert!(v.is_match(&0xAD, &bits));
        assert!(!v.is_match(&0xDA, &bits));
    }

    #[test]
    fn test_record() {
        let v = Hexadecimal::default();
        let rec = v.record(&0x0F, &Byte::from_u8(0x0F));
        assert_eq!(rec.hex, "0F");
        assert_eq!(rec.binary.to_string(), "00001111");
        assert_eq!(rec.decimal, 15);
    }
}
