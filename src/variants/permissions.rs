//! File permissions: set the nine `rwx` bits a curated scenario asks for, then confirm.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::bits::PermissionBits;
use crate::domain::{PermissionScenario, VariantKind};
use crate::scoring::Rules;
use crate::seeds::PERMISSION_SCENARIOS;

use super::Variant;

#[derive(Clone, Debug)]
pub struct FilePermissions {
    rules: Rules,
    scenarios: &'static [PermissionScenario],
}

impl FilePermissions {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            scenarios: &PERMISSION_SCENARIOS,
        }
    }

    pub fn scenarios(&self) -> &'static [PermissionScenario] {
        self.scenarios
    }
}

impl Default for FilePermissions {
    fn default() -> Self {
        Self::new(Rules::defaults_for(VariantKind::FilePermissions))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PermissionRecord {
    pub symbolic: String,
    pub octal: String,
}

impl Variant for FilePermissions {
    type Target = &'static PermissionScenario;
    type Answer = PermissionBits;
    type Record = PermissionRecord;

    fn kind(&self) -> VariantKind {
        VariantKind::FilePermissions
    }

    fn rules(&self) -> &Rules {
        &self.rules
    }

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static PermissionScenario {
        // scenarios is a non-empty static table
        self.scenarios.choose(rng).unwrap_or(&PERMISSION_SCENARIOS[0])
    }

    fn is_match(&self, target: &&'static PermissionScenario, answer: &PermissionBits) -> bool {
        target.is_correct(answer)
    }

    fn record(&self, _target: &&'static PermissionScenario, answer: &PermissionBits) -> PermissionRecord {
        PermissionRecord {
            symbolic: answer.to_symbolic(),
            octal: answer.to_octal_triplet(),
        }
    }
}
