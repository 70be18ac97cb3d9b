//! Built-in content: the curated permission scenarios.

use crate::bits::PermissionBits;
use crate::domain::PermissionScenario;

const T: bool = true;
const F: bool = false;

/// Scenarios the permissions game draws from (uniformly, repeats allowed).
pub static PERMISSION_SCENARIOS: [PermissionScenario; 5] = [
  PermissionScenario {
    description: "Set permissions for a private file that only the owner can read and write",
    expected: PermissionBits::from_bits([T, T, F, F, F, F, F, F, F]),
  },
  PermissionScenario {
    description: "Set permissions for an executable file that everyone can run, but only the owner can modify",
    expected: PermissionBits::from_bits([T, T, F, F, F, T, F, F, T]),
  },
  PermissionScenario {
    description: "Set permissions for a shared file that everyone can read, but only the owner and group can modify",
    expected: PermissionBits::from_bits([T, T, F, T, T, F, T, F, F]),
  },
  PermissionScenario {
    description: "Set permissions for a document everyone can read, but only the owner can change",
    expected: PermissionBits::from_bits([T, T, F, T, F, F, T, F, F]),
  },
  PermissionScenario {
    description: "Set permissions for a script everyone can read and run, but only the owner can edit",
    expected: PermissionBits::from_bits([T, T, T, T, F, T, T, F, T]),
  },
];
