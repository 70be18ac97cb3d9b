//! Free-play permission editor.
//!
//! Every toggle of a single permission bit is worth a few points and is
//! recorded with the resulting notations. Points accumulate in the progress
//! store under the permissions module, next to the timed game's score.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use crate::achievements;
use crate::bits::PermissionBits;
use crate::domain::{Permission, UserClass, VariantKind};
use crate::error::Result;
use crate::progress::ProgressStore;

pub const POINTS_PER_TOGGLE: u32 = 10;
pub const HISTORY_CAP: usize = 8;

#[derive(Clone, Debug, Serialize)]
pub struct PermissionChange {
    pub id: Uuid,
    pub symbolic: String,
    pub octal: String,
    pub points: u32,
    pub created_at: DateTime<Utc>,
}

pub struct PermissionPractice {
    progress: Arc<ProgressStore>,
    bits: PermissionBits,
    score: u32,
    history: VecDeque<PermissionChange>,
}

impl PermissionPractice {
    pub fn new(progress: Arc<ProgressStore>) -> Self {
        Self {
            progress,
            bits: PermissionBits::zeroed(),
            score: 0,
            history: VecDeque::new(),
        }
    }

    pub fn bits(&self) -> &PermissionBits {
        &self.bits
    }

    pub fn describe(&self) -> String {
        self.bits.describe()
    }

    /// Flip one bit and score it.
    #[instrument(level = "debug", skip(self))]
    pub fn toggle(&mut self, permission: Permission, class: UserClass) -> &PermissionChange {
        self.bits.toggle_permission(permission, class);
        self.score = self.score.saturating_add(POINTS_PER_TOGGLE);

        let module = VariantKind::FilePermissions.module_key();
        let previous = self.progress.module(module);
        let module_score = previous
            .as_ref()
            .map_or(0, |p| p.score)
            .saturating_add(POINTS_PER_TOGGLE);
        // practice alone only completes the module once the score threshold is met
        let completed = previous.is_some_and(|p| p.completed)
            || achievements::threshold_for(module).is_some_and(|(_, required)| module_score >= required);
        self.progress.update(module, completed, module_score);
        achievements::check_and_award(&self.progress, module, module_score);

        let change = PermissionChange {
            id: Uuid::new_v4(),
            symbolic: self.bits.to_symbolic(),
            octal: self.bits.to_octal_triplet(),
            points: POINTS_PER_TOGGLE,
            created_at: Utc::now(),
        };
        info!(target: "progress", symbolic = %change.symbolic, octal = %change.octal, module_score, "Permission toggled");
        self.history.push_front(change);
        self.history.truncate(HISTORY_CAP);
        &self.history[0]
    }

    /// Load an octal preset like `"755"`. Presets are not scored.
    pub fn apply_preset(&mut self, octal: &str) -> Result<()> {
        self.bits = PermissionBits::from_octal_triplet(octal)?;
        Ok(())
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn history(&self) -> impl Iterator<Item = &PermissionChange> {
        self.history.iter()
    }

    pub fn reset(&mut self) {
        self.bits = PermissionBits::zeroed();
        self.score = 0;
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODULE: &str = "App_FILE PERMISSIONS";

    #[test]
    fn test_toggle_records_notation_and_scores() {
        let store = Arc::new(ProgressStore::in_memory());
        let mut practice = PermissionPractice::new(store.clone());

        let change = practice.toggle(Permission::Read, UserClass::Owner);
        assert_eq!(change.symbolic, "r--------");
        assert_eq!(change.octal, "400");
        assert_eq!(change.points, 10);

        let change = practice.toggle(Permission::Write, UserClass::Owner);
        assert_eq!(change.octal, "600");
        assert_eq!(practice.score(), 20);
        assert_eq!(practice.history().next().unwrap().octal, "600");

        let stored = store.module(MODULE).unwrap();
        assert_eq!(stored.score, 20);
        assert!(!stored.completed);
    }

    #[test]
    fn test_toggle_adds_to_earlier_progress() {
        let store = Arc::new(ProgressStore::in_memory());
        store.update(MODULE, true, 795);
        let mut practice = PermissionPractice::new(store.clone());

        practice.toggle(Permission::Execute, UserClass::Others);
        let stored = store.module(MODULE).unwrap();
        assert_eq!(stored.score, 805);
        assert!(stored.completed);
        assert!(stored.achievements.contains("permission_pro"));
    }

    #[test]
    fn test_history_is_bounded_and_newest_first() {
        let store = Arc::new(ProgressStore::in_memory());
        let mut practice = PermissionPractice::new(store);
        for _ in 0..5 {
            practice.toggle(Permission::Read, UserClass::Group);
            practice.toggle(Permission::Write, UserClass::Group);
        }
        assert_eq!(practice.history().count(), HISTORY_CAP);
        assert_eq!(practice.history().next().unwrap().octal, "000");
        assert_eq!(practice.score(), 100);
    }

    #[test]
    fn test_presets_and_reset() {
        let store = Arc::new(ProgressStore::in_memory());
        let mut practice = PermissionPractice::new(store.clone());
        practice.apply_preset("755").unwrap();
        assert_eq!(practice.bits().to_symbolic(), "rwxr-xr-x");
        assert!(practice.apply_preset("79").is_err());
        assert_eq!(practice.score(), 0);
        assert!(store.module(MODULE).is_none());

        practice.toggle(Permission::Write, UserClass::Others);
        assert_eq!(practice.bits().to_octal_triplet(), "757");
        practice.reset();
        assert_eq!(practice.score(), 0);
        assert_eq!(practice.history().count(), 0);
        assert_eq!(practice.bits().to_octal_triplet(), "000");
    }
}
