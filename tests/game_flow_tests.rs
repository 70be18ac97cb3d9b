//! End-to-end game flows through `AppState`, the runners and the shared progress store.

use std::time::Duration;

use bytewise::config::GameConfig;
use bytewise::domain::{BitOperation, OperandBits, Permission, Rgb, UserClass};
use bytewise::filesize::FileSizeUnit;
use bytewise::util::{first_char, hex_to_byte};
use bytewise::{AppState, Byte, MemoryBlobStore, Phase, Submission};

fn app() -> (AppState, MemoryBlobStore) {
    let blob = MemoryBlobStore::new();
    (AppState::with_blob(GameConfig::default(), blob.clone()), blob)
}

mod runner_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_binary_basics_full_round() {
        let (app, _) = app();
        let mut game = app.binary_basics();
        assert!(game.start().await);

        let mut total = 0;
        for _ in 0..3 {
            let target = game.snapshot().await.target.unwrap();
            match game.submit(&Byte::from_u8(target)).await {
                Submission::Matched { points, .. } => total += points,
                other => panic!("expected match, got {other:?}"),
            }
        }
        let snap = game.snapshot().await;
        assert_eq!(snap.score, total);
        assert_eq!(snap.streak, 3);
        assert_eq!(snap.history.len(), 3);

        tokio::time::sleep(Duration::from_secs(21)).await;
        let snap = game.snapshot().await;
        assert_eq!(snap.phase, Phase::GameOver);
        assert_eq!(app.progress.module("BinaryBasics").unwrap().score, total);
    }

    #[tokio::test(start_paused = true)]
    async fn test_hex_typed_input() {
        let (app, _) = app();
        let mut game = app.hexadecimal();
        game.start().await;
        let target = game.snapshot().await.target.unwrap();

        // user types lowercase with junk around it
        let typed = format!("#{:02x}!", target);
        let bits = hex_to_byte(&typed).unwrap();
        assert!(matches!(game.submit(&bits).await, Submission::Matched { .. }));
        game.exit().await;
        assert_eq!(game.snapshot().await.phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bitwise_round() {
        let (app, _) = app();
        for op in BitOperation::ALL {
            let mut game = app.bitwise_ops(op);
            game.start().await;
            let target = game.snapshot().await.target.unwrap();
            let answer = OperandBits {
                first: Byte::from_u8(target.first),
                second: Byte::from_u8(target.second.unwrap_or(0)),
            };
            assert!(matches!(game.submit(&answer).await, Submission::Matched { .. }), "{op:?}");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ascii_typed_text_uses_first_char() {
        let (app, _) = app();
        let mut game = app.ascii_text();
        game.start().await;
        let target = game.snapshot().await.target.unwrap();
        let typed = format!("{target}extra");
        let answer = first_char(&typed).unwrap();
        assert!(matches!(game.submit(&answer).await, Submission::Matched { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_color_game_ends_on_completion() {
        let (app, _) = app();
        let mut game = app.color_coding();
        game.start().await;
        loop {
            let snap = game.snapshot().await;
            if snap.phase != Phase::Active {
                break;
            }
            let t = snap.target.unwrap();
            let near = Rgb::new(t.red.saturating_sub(3), t.green, t.blue.saturating_add(2));
            game.submit(&near).await;
        }
        let snap = game.snapshot().await;
        assert!(snap.completed);
        let report = snap.report.unwrap();
        assert_eq!(report.achievement, Some("color_master"));
        assert_eq!(snap.phase, Phase::GameOver);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permissions_confirm() {
        let (app, _) = app();
        let mut game = app.file_permissions();
        game.start().await;
        let scenario = game.snapshot().await.target.unwrap();
        let mut wrong = scenario.expected;
        wrong.toggle(8);
        assert_eq!(game.submit(&wrong).await, Submission::Miss);
        assert!(matches!(game.submit(&scenario.expected).await, Submission::Matched { .. }));
    }
}

mod persistence_tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_progress_survives_restart() {
        let (app, blob) = app();
        let mut game = app.binary_basics();
        game.start().await;
        let target = game.snapshot().await.target.unwrap();
        game.submit(&Byte::from_u8(target)).await;
        tokio::time::sleep(Duration::from_secs(21)).await;
        let score = game.snapshot().await.score;
        app.progress.flush();

        let restarted = AppState::with_blob(GameConfig::default(), blob);
        let stored = restarted.progress.module("BinaryBasics").unwrap();
        assert!(stored.completed);
        assert_eq!(stored.score, score);
    }

    #[test]
    fn test_reset_all_progress() {
        let (app, blob) = app();
        app.progress.update("X", true, 450);
        app.reset_all_progress();
        app.progress.flush();
        let restarted = AppState::with_blob(GameConfig::default(), blob);
        assert_eq!(restarted.progress.module("X").unwrap().score, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_permission_practice_adds_to_game_score() {
        let (app, blob) = app();
        let mut game = app.file_permissions();
        game.start().await;
        let scenario = game.snapshot().await.target.unwrap();
        game.submit(&scenario.expected).await;
        tokio::time::sleep(Duration::from_secs(31)).await;
        let session = game.snapshot().await.score;

        let mut practice = app.permission_practice();
        practice.toggle(Permission::Execute, UserClass::Owner);
        practice.toggle(Permission::Read, UserClass::Group);
        app.progress.flush();

        let restarted = AppState::with_blob(GameConfig::default(), blob);
        let stored = restarted.progress.module("App_FILE PERMISSIONS").unwrap();
        assert_eq!(stored.score, session + 20);
    }

    #[test]
    fn test_file_sizes_share_the_store() {
        let (app, _) = app();
        let mut sizes = app.file_sizes();
        sizes
            .convert("4096", FileSizeUnit::Byte, FileSizeUnit::Kibibyte)
            .unwrap();
        assert_eq!(app.progress.module("App_FILE SIZES").unwrap().score, 30);
    }
}
