//! Game variants: the policy objects a `ChallengeEngine` is parameterized by.
//!
//! A variant decides:
//!   - what a target looks like and how to draw one
//!   - how a player's answer is compared against it
//!   - what a history entry records
//!   - the scoring and completion rules (`Rules`)

use std::fmt::Debug;

use rand::Rng;
use serde::Serialize;

use crate::domain::VariantKind;
use crate::scoring::Rules;

mod ascii;
mod binary;
mod bitwise;
mod color;
mod hex;
mod permissions;

pub use ascii::{AsciiRecord, AsciiText};
pub use binary::BinaryBasics;
pub use bitwise::BitwiseOps;
pub use color::{ColorCoding, DEFAULT_COLOR_TOLERANCE};
pub use hex::{HexRecord, Hexadecimal};
pub use permissions::{FilePermissions, PermissionRecord};

pub trait Variant {
    /// What the player must reproduce. Replaced after every match, never mutated.
    type Target: Clone + Debug + Serialize;
    /// Sanitized player state handed to `submit`.
    type Answer: Clone + Debug;
    /// Player-side value stored in the history.
    type Record: Clone + Debug + Serialize;

    fn kind(&self) -> VariantKind;

    fn rules(&self) -> &Rules;

    fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Target;

    fn is_match(&self, target: &Self::Target, answer: &Self::Answer) -> bool;

    fn record(&self, target: &Self::Target, answer: &Self::Answer) -> Self::Record;
}
