//! Per-variant tuning and the points formula.
//!
//! `points = base + time_bonus(remaining) + streak * streak_bonus`
//!
//! The numbers differ between games without a shared rule, so each game keeps
//! its own literal values (see `Rules::defaults_for`) and TOML can override them.

use serde::{Deserialize, Serialize};

use crate::domain::VariantKind;

/// How remaining seconds turn into bonus points.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TimeBonus {
    /// `min(cap, remaining / 2)`
    HalfRemaining { cap: u32 },
    /// `remaining * 2`
    DoubleRemaining,
}

impl TimeBonus {
    pub fn for_remaining(self, remaining_secs: u32) -> u32 {
        match self {
            TimeBonus::HalfRemaining { cap } => cap.min(remaining_secs / 2),
            TimeBonus::DoubleRemaining => remaining_secs.saturating_mul(2),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    pub duration_secs: u32,
    pub base_points: u32,
    pub time_bonus: TimeBonus,
    /// Added once per consecutive correct answer already in the streak.
    pub streak_bonus: u32,
    pub history_cap: usize,
    /// Session counts as complete at this score.
    pub completion_score: Option<u32>,
    /// ...or after this many matches.
    pub completion_matches: Option<usize>,
    /// Go straight to game over once complete.
    pub end_on_completion: bool,
    /// Seconds given back after each match, never above `duration_secs`.
    pub refill_secs: u32,
}

impl Rules {
    pub fn defaults_for(kind: VariantKind) -> Self {
        let basic = Rules {
            duration_secs: 20,
            base_points: 10,
            time_bonus: TimeBonus::HalfRemaining { cap: 10 },
            streak_bonus: 5,
            history_cap: 8,
            completion_score: None,
            completion_matches: None,
            end_on_completion: false,
            refill_secs: 0,
        };
        let applied = Rules {
            duration_secs: 30,
            base_points: 100,
            time_bonus: TimeBonus::DoubleRemaining,
            streak_bonus: 2,
            history_cap: 5,
            ..basic.clone()
        };

        match kind {
            VariantKind::BinaryBasics | VariantKind::Hexadecimal => basic,
            VariantKind::BitwiseOps => Rules {
                duration_secs: 30,
                streak_bonus: 2,
                ..basic
            },
            VariantKind::AsciiText => Rules {
                completion_score: Some(600),
                end_on_completion: true,
                refill_secs: 5,
                ..applied
            },
            VariantKind::ColorCoding => Rules {
                completion_score: Some(500),
                completion_matches: Some(5),
                end_on_completion: true,
                ..applied
            },
            VariantKind::FilePermissions => Rules {
                completion_score: Some(800),
                ..applied
            },
        }
    }

    pub fn points(&self, remaining_secs: u32, streak: u32) -> u32 {
        self.base_points
            .saturating_add(self.time_bonus.for_remaining(remaining_secs))
            .saturating_add(streak.saturating_mul(self.streak_bonus))
    }

    pub fn has_threshold(&self) -> bool {
        self.completion_score.is_some() || self.completion_matches.is_some()
    }

    pub fn is_complete(&self, score: u32, matches: usize) -> bool {
        self.completion_score.is_some_and(|s| score >= s)
            || self.completion_matches.is_some_and(|m| matches >= m)
    }

    /// Remaining time after a match, with any refill applied.
    pub fn refilled(&self, remaining_secs: u32) -> u32 {
        if self.refill_secs == 0 {
            return remaining_secs;
        }
        remaining_secs
            .saturating_add(self.refill_secs)
            .min(self.duration_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_points() {
        let rules = Rules::defaults_for(VariantKind::BinaryBasics);
        // 10 base + min(10, 15/2) + 0
        assert_eq!(rules.points(15, 0), 17);
        // bonus caps at 10
        assert_eq!(rules.points(20, 0), 20);
        assert_eq!(rules.points(20, 3), 35);
    }

    #[test]
    fn test_applied_points() {
        let rules = Rules::defaults_for(VariantKind::ColorCoding);
        assert_eq!(rules.points(25, 0), 150);
        assert_eq!(rules.points(0, 1), 102);
    }

    #[test]
    fn test_points_monotonic_in_time_and_streak() {
        for kind in VariantKind::ALL {
            let rules = Rules::defaults_for(kind);
            for streak in 0..10 {
                for t in 0..rules.duration_secs {
                    assert!(rules.points(t + 1, streak) >= rules.points(t, streak));
                    assert!(rules.points(t, streak + 1) > rules.points(t, streak));
                }
            }
        }
    }

    #[test]
    fn test_completion() {
        let color = Rules::defaults_for(VariantKind::ColorCoding);
        assert!(!color.is_complete(499, 4));
        assert!(color.is_complete(500, 1));
        assert!(color.is_complete(0, 5));

        let basics = Rules::defaults_for(VariantKind::BinaryBasics);
        assert!(!basics.has_threshold());
        assert!(!basics.is_complete(10_000, 100));
    }

    #[test]
    fn test_refill_caps_at_duration() {
        let ascii = Rules::defaults_for(VariantKind::AsciiText);
        assert_eq!(ascii.refilled(10), 15);
        assert_eq!(ascii.refilled(28), 30);
        let hex = Rules::defaults_for(VariantKind::Hexadecimal);
        assert_eq!(hex.refilled(7), 7);
    }
}
