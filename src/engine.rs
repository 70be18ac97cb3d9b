//! Generic challenge engine: one state machine shared by every game.
//!
//! `Idle -> Active -> GameOver -> Idle`
//!
//! - `start` draws the first target; calling it while Active does nothing.
//! - `submit` compares sanitized player state with the target; a match scores,
//!   extends the streak, records history and draws the next target.
//! - `tick` is driven once per second from outside (see `timer`); reaching zero
//!   ends the round and reports to the progress store.
//! - `reset` returns to Idle from anywhere, discarding the session.
//!
//! Observers read an immutable `SessionSnapshot` after each call.

use std::collections::VecDeque;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::achievements;
use crate::domain::{ScoreEntry, VariantKind};
use crate::progress::ProgressStore;
use crate::variants::Variant;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Active,
    GameOver,
}

/// What a call to `submit` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// No active session.
    Ignored,
    Miss,
    Matched {
        points: u32,
        /// Session reached its completion threshold.
        completed: bool,
        /// The match ended the session.
        game_over: bool,
    },
}

/// Final numbers handed to the progress store at game over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub session_score: u32,
    pub module_score: u32,
    pub completed: bool,
    pub achievement: Option<&'static str>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SessionSnapshot<T, R> {
    pub kind: VariantKind,
    pub phase: Phase,
    pub target: Option<T>,
    pub remaining_secs: u32,
    pub score: u32,
    pub streak: u32,
    pub completed: bool,
    pub history: Vec<ScoreEntry<T, R>>,
    pub report: Option<RoundReport>,
}

pub type Snapshot<V> = SessionSnapshot<<V as Variant>::Target, <V as Variant>::Record>;

type History<V> = VecDeque<ScoreEntry<<V as Variant>::Target, <V as Variant>::Record>>;

pub struct ChallengeEngine<V: Variant> {
    variant: V,
    progress: Arc<ProgressStore>,
    rng: StdRng,
    phase: Phase,
    target: Option<V::Target>,
    remaining_secs: u32,
    score: u32,
    streak: u32,
    matches: usize,
    completed: bool,
    history: History<V>,
    report: Option<RoundReport>,
}

impl<V: Variant> ChallengeEngine<V> {
    pub fn new(variant: V, progress: Arc<ProgressStore>) -> Self {
        Self::with_rng(variant, progress, StdRng::from_entropy())
    }

    pub fn with_rng(variant: V, progress: Arc<ProgressStore>, rng: StdRng) -> Self {
        let remaining_secs = variant.rules().duration_secs;
        Self {
            variant,
            progress,
            rng,
            phase: Phase::Idle,
            target: None,
            remaining_secs,
            score: 0,
            streak: 0,
            matches: 0,
            completed: false,
            history: VecDeque::new(),
            report: None,
        }
    }

    /// Begin a session. Returns `false` (and changes nothing) if one is already running.
    #[instrument(level = "info", skip(self), fields(kind = ?self.variant.kind()))]
    pub fn start(&mut self) -> bool {
        if self.phase == Phase::Active {
            debug!(target: "challenge", "start ignored: session already active");
            return false;
        }
        self.clear_session();
        self.phase = Phase::Active;
        self.target = Some(self.variant.generate(&mut self.rng));
        info!(target: "challenge", duration = self.remaining_secs, "Challenge started");
        true
    }

    #[instrument(level = "debug", skip(self, answer), fields(kind = ?self.variant.kind()))]
    pub fn submit(&mut self, answer: &V::Answer) -> Submission {
        if self.phase != Phase::Active {
            return Submission::Ignored;
        }
        let Some(target) = self.target.as_ref() else {
            return Submission::Ignored;
        };
        if !self.variant.is_match(target, answer) {
            return Submission::Miss;
        }

        let rules = self.variant.rules();
        let points = rules.points(self.remaining_secs, self.streak);
        let record = self.variant.record(target, answer);
        let entry = ScoreEntry::new(target.clone(), record, points);

        self.history.push_front(entry);
        self.history.truncate(rules.history_cap);
        self.streak += 1;
        self.matches += 1;
        self.score = self.score.saturating_add(points);
        self.remaining_secs = rules.refilled(self.remaining_secs);

        if rules.is_complete(self.score, self.matches) {
            self.completed = true;
        }
        info!(target: "challenge", points, score = self.score, streak = self.streak, completed = self.completed, "Correct answer");

        if self.completed && rules.end_on_completion {
            self.finish();
            return Submission::Matched {
                points,
                completed: true,
                game_over: true,
            };
        }

        self.target = Some(self.variant.generate(&mut self.rng));
        Submission::Matched {
            points,
            completed: self.completed,
            game_over: false,
        }
    }

    /// One second elapsed. Returns the phase after the tick.
    #[instrument(level = "trace", skip(self), fields(remaining = self.remaining_secs))]
    pub fn tick(&mut self) -> Phase {
        if self.phase != Phase::Active {
            return self.phase;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        if self.remaining_secs == 0 {
            self.finish();
        }
        self.phase
    }

    /// Back to Idle from any phase; an unfinished round is dropped unreported.
    #[instrument(level = "info", skip(self), fields(kind = ?self.variant.kind()))]
    pub fn reset(&mut self) {
        if self.phase == Phase::Active {
            debug!(target: "challenge", score = self.score, "Discarding active session");
        }
        self.clear_session();
        self.phase = Phase::Idle;
    }

    pub fn snapshot(&self) -> Snapshot<V> {
        SessionSnapshot {
            kind: self.variant.kind(),
            phase: self.phase,
            target: self.target.clone(),
            remaining_secs: self.remaining_secs,
            score: self.score,
            streak: self.streak,
            completed: self.completed,
            history: self.history.iter().cloned().collect(),
            report: self.report,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn target(&self) -> Option<&V::Target> {
        self.target.as_ref()
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn history(&self) -> impl Iterator<Item = &ScoreEntry<V::Target, V::Record>> {
        self.history.iter()
    }

    pub fn variant(&self) -> &V {
        &self.variant
    }

    pub fn progress(&self) -> &Arc<ProgressStore> {
        &self.progress
    }

    #[cfg(test)]
    pub(crate) fn set_target(&mut self, target: V::Target) {
        self.target = Some(target);
    }

    fn clear_session(&mut self) {
        self.target = None;
        self.remaining_secs = self.variant.rules().duration_secs;
        self.score = 0;
        self.streak = 0;
        self.matches = 0;
        self.completed = false;
        self.history.clear();
        self.report = None;
    }

    fn finish(&mut self) {
        self.phase = Phase::GameOver;
        let report = self.report_progress();
        info!(target: "challenge", kind = ?self.variant.kind(), score = self.score, module_score = report.module_score, completed = report.completed, "Game over");
        self.report = Some(report);
    }

    /// Adds the session score to the module's stored score and checks its achievement.
    fn report_progress(&self) -> RoundReport {
        let module = self.variant.kind().module_key();
        let previous = self.progress.module(module);
        let module_score = previous
            .as_ref()
            .map_or(0, |p| p.score)
            .saturating_add(self.score);
        let completed = self.completed
            || !self.variant.rules().has_threshold()
            || previous.is_some_and(|p| p.completed);

        self.progress.update(module, completed, module_score);
        let achievement = achievements::check_and_award(&self.progress, module, module_score)
            .map(|a| a.id);

        RoundReport {
            session_score: self.score,
            module_score,
            completed,
            achievement,
        }
    }
}
