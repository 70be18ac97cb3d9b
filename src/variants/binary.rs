//! Binary basics: toggle eight bits until they spell the decimal target.

use rand::Rng;

use crate::bits::Byte;
use crate::domain::VariantKind;
use crate::scoring::Rules;

use super::Variant;

#[derive(Clone, Debug)]
pub struct BinaryBasics {
    rules: Rules,
}

impl BinaryBasics {
    pub fn new(rules: Rules) -> Self {
        Self { rules }
    }
}

impl Default for BinaryBasics {
    fn default() -> Self {
        Self::new(Rules::defaults_for(VariantKind::BinaryBasics))
    }
}

impl Variant for BinaryBasics {
    type Target = u8;
    type Answer = Byte;
    type Record = Byte;

    fn kind(&self) -> VariantKind {
        VariantKind::BinaryBasics
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> u8 {
        rng.gen()
    }

    fn is_match(&self, target: &u8, answer: &Byte) -> bool {
        answer.to_u8() == *target
    }

    fn record(&self, _target: &u8, answer: &Byte) -> Byte {
        *answer
    }
}
