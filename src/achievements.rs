//! Static achievement catalog and the threshold check that awards them.

use serde::Serialize;
use tracing::debug;

use crate::domain::{VariantKind, FILE_SIZES_MODULE};
use crate::progress::ProgressStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub module: &'static str,
    pub required_score: u32,
}

pub static CATALOG: [Achievement; 7] = [
    Achievement {
        id: "bit_master",
        title: "Bit Master",
        description: "Build numbers bit by bit",
        module: "BinaryBasics",
        required_score: 1000,
    },
    Achievement {
        id: "hex_wizard",
        title: "Hex Wizard",
        description: "Read hexadecimal at a glance",
        module: "Hexadecimal",
        required_score: 1000,
    },
    Achievement {
        id: "logic_master",
        title: "Logic Master",
        description: "Master AND, OR, XOR, NOT and shifts",
        module: "BinaryOperations",
        required_score: 1000,
    },
    Achievement {
        id: "color_master",
        title: "Color Master",
        description: "Master RGB color coding",
        module: "App_COLOR CODING",
        required_score: 500,
    },
    Achievement {
        id: "size_expert",
        title: "Size Expert",
        description: "Expert in binary file sizes",
        module: FILE_SIZES_MODULE,
        required_score: 750,
    },
    Achievement {
        id: "ascii_guru",
        title: "ASCII Guru",
        description: "Master of ASCII encoding",
        module: "App_ASCII TEXT",
        required_score: 600,
    },
    Achievement {
        id: "permission_pro",
        title: "Permission Pro",
        description: "Expert in file permissions",
        module: "App_FILE PERMISSIONS",
        required_score: 800,
    },
];

pub fn for_module(module: &str) -> Option<&'static Achievement> {
    CATALOG.iter().find(|a| a.module == module)
}

pub fn for_variant(kind: VariantKind) -> Option<&'static Achievement> {
    for_module(kind.module_key())
}

/// `(achievement id, required score)` for a module, if it has one.
pub fn threshold_for(module: &str) -> Option<(&'static str, u32)> {
    for_module(module).map(|a| (a.id, a.required_score))
}

/// Award the module's achievement when `score` reaches its threshold.
///
/// Returns the achievement whenever the threshold is met, even if it was
/// already held (awarding is idempotent).
pub fn check_and_award(
    store: &ProgressStore,
    module: &str,
    score: u32,
) -> Option<&'static Achievement> {
    let achievement = for_module(module)?;
    if score < achievement.required_score {
        debug!(target: "progress", %module, score, required = achievement.required_score, "Achievement threshold not reached");
        return None;
    }
    store.add_achievement(module, achievement.id);
    Some(achievement)
}
