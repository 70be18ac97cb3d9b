//! ASCII text: a printable character is shown, the player types it back.

use rand::Rng;
use serde::Serialize;

use crate::bits::Byte;
use crate::domain::VariantKind;
use crate::scoring::Rules;
use crate::util::char_to_byte;

use super::Variant;

#[derive(Clone, Debug)]
pub struct AsciiText {
    rules: Rules,
}

impl AsciiText {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }
}

impl Default for AsciiText {
    fn default() -> Self {
        Self::new(Rules::defaults_for(VariantKind::AsciiText))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AsciiRecord {
    pub character: char,
    pub code: u8,
    pub binary: Byte,
}

impl Variant for AsciiText {
    type Target = char;
    /// First character of the typed text (see `util::first_char`).
    type Answer = char;
    type Record = AsciiRecord;

    fn kind(&self) -> VariantKind {
        VariantKind::AsciiText
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        char::from(rng.gen_range(32u8..=126))
    }

    fn is_match(&self, target: &char, answer: &char) -> bool {
        target == answer
    }

    fn record(&self, target: &char, _answer: &char) -> AsciiRecord {
        let binary = char_to_byte(*target).unwrap_or_default();
        AsciiRecord {
            character: *target,
            code: binary.to_u8(),
            binary,
        }
    }
}
