//! Bitwise operations: toggle the operands so that `first OP second` hits the target result.

use rand::Rng;

use crate::domain::{BitOperation, OperandBits, OperationResult, OperationTarget, VariantKind};
use crate::scoring::Rules;

use super::Variant;

#[derive(Clone, Debug)]
pub struct BitwiseOps {
    rules: Rules,
    operation: BitOperation,
}

impl BitwiseOps {
    pub fn new(operation: BitOperation, rules: Rules) -> Self {
        Self { rules, operation }
    }

    pub fn with_defaults(operation: BitOperation) -> Self {
        Self::new(operation, Rules::defaults_for(VariantKind::BitwiseOps))
    }

    pub fn operation(&self) -> BitOperation {
        self.operation
    }

    /// Result the player's operands currently produce.
    pub fn result_of(&self, answer: &OperandBits) -> u8 {
        self.operation
            .apply(answer.first.to_u8(), answer.second.to_u8())
    }
}

impl Variant for BitwiseOps {
    type Target = OperationTarget;
    type Answer = OperandBits;
    type Record = OperationResult;

    fn kind(&self) -> VariantKind {
        VariantKind::BitwiseOps
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> OperationTarget {
        let first: u8 = rng.gen();
        let second: Option<u8> = if self.operation.is_unary() {
            None
        } else {
            Some(rng.gen())
        };
        OperationTarget {
            operation: self.operation,
            first,
            second,
            expected: self.operation.apply(first, second.unwrap_or(0)),
        }
    }

    fn is_match(&self, target: &OperationTarget, answer: &OperandBits) -> bool {
        self.result_of(answer) == target.expected
    }

    fn record(&self, _target: &OperationTarget, answer: &OperandBits) -> OperationResult {
        OperationResult {
            operation: self.operation,
            first: answer.first.to_u8(),
            second: (!self.operation.is_unary()).then(|| answer.second.to_u8()),
            result: self.result_of(answer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Byte;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_and_target() {
        let v = BitwiseOps::with_defaults(BitOperation::And);
        let target = OperationTarget {
            operation: BitOperation::And,
            first: 0b1100_1100,
            second: Some(0b1010_1010),
            expected: 0b1000_1000,
        };
        let answer = OperandBits {
            first: Byte::from_u8(204),
            second: Byte::from_u8(170),
        };
        assert!(v.is_match(&target, &answer));
        let rec = v.record(&target, &answer);
        assert_eq!(rec.result, 136);
        assert_eq!(rec.second, Some(170));
    }

    #[test]
    fn test_unary_targets_have_no_second_operand() {
        let mut rng = StdRng::seed_from_u64(7);
        for op in [BitOperation::Not, BitOperation::Shift] {
            let v = BitwiseOps::with_defaults(op);
            for _ in 0..50 {
                let t = v.generate(&mut rng);
                assert!(t.second.is_none());
                assert_eq!(t.expected, op.apply(t.first, 0));
            }
        }
    }

    #[test]
    fn test_generated_targets_are_consistent() {
        let mut rng = StdRng::seed_from_u64(11);
        let v = BitwiseOps::with_defaults(BitOperation::Xor);
        for _ in 0..50 {
            let t = v.generate(&mut rng);
            let answer = OperandBits {
                first: Byte::from_u8(t.first),
                second: Byte::from_u8(t.second.unwrap()),
            };
            assert!(v.is_match(&t, &answer));
        }
    }
}
