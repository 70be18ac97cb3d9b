//! One-second countdown driver for a `ChallengeEngine`.
//!
//! The runner owns the engine behind a tokio mutex and at most one ticking
//! task. Ticks and player input both go through that mutex, so they are
//! serialized. The ticker is aborted on `exit`, on drop, and stops by itself
//! once the engine leaves `Active`.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, instrument};

use crate::engine::{ChallengeEngine, Phase, Snapshot, Submission};
use crate::variants::Variant;

pub const TICK: Duration = Duration::from_secs(1);

pub struct ChallengeRunner<V: Variant> {
    engine: Arc<Mutex<ChallengeEngine<V>>>,
    ticker: Option<JoinHandle<()>>,
}

impl<V> ChallengeRunner<V>
where
    V: Variant + Send + 'static,
    V::Target: Send,
    V::Record: Send,
{
    pub fn new(engine: ChallengeEngine<V>) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            ticker: None,
        }
    }

    /// Start a session and its ticker. A second call while active does nothing.
    #[instrument(level = "info", skip(self))]
    pub async fn start(&mut self) -> bool {
        let started = self.engine.lock().await.start();
        if !started {
            debug!(target: "challenge", "Runner already ticking");
            return false;
        }
        if let Some(old) = self.ticker.take() {
            old.abort();
        }
        self.ticker = Some(spawn_ticker(self.engine.clone()));
        true
    }

    pub async fn submit(&self, answer: &V::Answer) -> Submission {
        self.engine.lock().await.submit(answer)
    }

    pub async fn snapshot(&self) -> Snapshot<V> {
        self.engine.lock().await.snapshot()
    }

    /// Stop the ticker and drop the session, finished or not.
    #[instrument(level = "info", skip(self))]
    pub async fn exit(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
        self.engine.lock().await.reset();
        info!(target: "challenge", "Challenge exited");
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Shared handle to the engine, e.g. for a UI observer.
    pub fn engine(&self) -> Arc<Mutex<ChallengeEngine<V>>> {
        self.engine.clone()
    }
}

impl<V: Variant> Drop for ChallengeRunner<V> {
    fn drop(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

fn spawn_ticker<V>(engine: Arc<Mutex<ChallengeEngine<V>>>) -> JoinHandle<()>
where
    V: Variant + Send + 'static,
    V::Target: Send,
    V::Record: Send,
{
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + TICK, TICK);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            interval.tick().await;
            let phase = engine.lock().await.tick();
            if phase != Phase::Active {
                debug!(target: "challenge", ?phase, "Ticker stopped");
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bits::Byte;
    use crate::progress::ProgressStore;
    use crate::variants::BinaryBasics;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn runner() -> (ChallengeRunner<BinaryBasics>, Arc<ProgressStore>) {
        let progress = Arc::new(ProgressStore::in_memory());
        let engine = ChallengeEngine::with_rng(
            BinaryBasics::default(),
            progress.clone(),
            StdRng::seed_from_u64(1),
        );
        (ChallengeRunner::new(engine), progress)
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_decrement_per_second_after_double_start() {
        let (mut runner, _) = runner();
        assert!(runner.start().await);
        assert!(!runner.start().await);

        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(runner.snapshot().await.remaining_secs, 19);

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(runner.snapshot().await.remaining_secs, 16);
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_out_and_reports() {
        let (mut runner, progress) = runner();
        runner.start().await;
        let target = runner.snapshot().await.target.unwrap();
        assert!(matches!(
            runner.submit(&Byte::from_u8(target)).await,
            Submission::Matched { .. }
        ));

        tokio::time::sleep(Duration::from_millis(20_500)).await;
        let snap = runner.snapshot().await;
        assert_eq!(snap.phase, Phase::GameOver);
        assert_eq!(snap.remaining_secs, 0);
        assert!(!runner.is_ticking());
        assert_eq!(progress.module("BinaryBasics").unwrap().score, snap.score);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exit_stops_ticking_mid_round() {
        let (mut runner, progress) = runner();
        runner.start().await;
        tokio::time::sleep(Duration::from_millis(2500)).await;
        runner.exit().await;
        assert!(!runner.is_ticking());

        tokio::time::sleep(Duration::from_secs(30)).await;
        let snap = runner.snapshot().await;
        assert_eq!(snap.phase, Phase::Idle);
        assert_eq!(snap.remaining_secs, 20);
        assert!(progress.module("BinaryBasics").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_after_game_over() {
        let (mut runner, _) = runner();
        runner.start().await;
        tokio::time::sleep(Duration::from_millis(20_500)).await;
        assert_eq!(runner.snapshot().await.phase, Phase::GameOver);

        assert!(runner.start().await);
        tokio::time::sleep(Duration::from_millis(1500)).await;
        let snap = runner.snapshot().await;
        assert_eq!(snap.phase, Phase::Active);
        assert_eq!(snap.remaining_secs, 19);
    }
}
