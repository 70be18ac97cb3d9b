//! Application state: config, the shared progress store, and game factories.
//!
//! This module owns:
//!   - the game config (from TOML or defaults)
//!   - the progress store, shared by every engine it builds
//!
//! Each factory returns a fresh runner whose engine holds a handle to the
//! shared store, so game-over reports from any game land in the same map.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{load_game_config_from_env, GameConfig};
use crate::domain::{BitOperation, VariantKind};
use crate::engine::ChallengeEngine;
use crate::filesize::FileSizeConverter;
use crate::practice::PermissionPractice;
use crate::progress::{BlobStore, FileBlobStore, ProgressStore};
use crate::timer::ChallengeRunner;
use crate::variants::{
    AsciiText, BinaryBasics, BitwiseOps, ColorCoding, FilePermissions, Hexadecimal, Variant,
};

#[derive(Clone)]
pub struct AppState {
    pub config: GameConfig,
    pub progress: Arc<ProgressStore>,
}

impl AppState {
    /// Build state from env: load config, open the file-backed progress blob.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_game_config_from_env().unwrap_or_default();
        let blob = FileBlobStore::new(config.data_dir());
        info!(target: "bytewise", data_dir = %blob.dir().display(), "Using file-backed progress");
        Self::with_blob(config, blob)
    }

    pub fn with_blob(config: GameConfig, blob: impl BlobStore + 'static) -> Self {
        let progress = Arc::new(ProgressStore::load(blob));

        // Inventory summary per module.
        for (module, p) in progress.modules() {
            info!(target: "bytewise", %module, score = p.score, completed = p.completed, achievements = p.achievements.len(), "Startup progress inventory");
        }

        Self { config, progress }
    }

    fn runner<V>(&self, variant: V) -> ChallengeRunner<V>
    where
        V: Variant + Send + 'static,
        V::Target: Send,
        V::Record: Send,
    {
        ChallengeRunner::new(ChallengeEngine::new(variant, self.progress.clone()))
    }

    pub fn binary_basics(&self) -> ChallengeRunner<BinaryBasics> {
        self.runner(BinaryBasics::new(self.config.rules_for(VariantKind::BinaryBasics)))
    }

    pub fn hexadecimal(&self) -> ChallengeRunner<Hexadecimal> {
        self.runner(Hexadecimal::new(self.config.rules_for(VariantKind::Hexadecimal)))
    }

    pub fn bitwise_ops(&self, operation: BitOperation) -> ChallengeRunner<BitwiseOps> {
        self.runner(BitwiseOps::new(
            operation,
            self.config.rules_for(VariantKind::BitwiseOps),
        ))
    }

    pub fn ascii_text(&self) -> ChallengeRunner<AsciiText> {
        self.runner(AsciiText::new(self.config.rules_for(VariantKind::AsciiText)))
    }

    pub fn color_coding(&self) -> ChallengeRunner<ColorCoding> {
        let variant = ColorCoding::new(self.config.rules_for(VariantKind::ColorCoding))
            .with_tolerance(self.config.color_tolerance());
        self.runner(variant)
    }

    pub fn file_permissions(&self) -> ChallengeRunner<FilePermissions> {
        self.runner(FilePermissions::new(
            self.config.rules_for(VariantKind::FilePermissions),
        ))
    }

    pub fn file_sizes(&self) -> FileSizeConverter {
        FileSizeConverter::new(self.progress.clone())
    }

    pub fn permission_practice(&self) -> PermissionPractice {
        PermissionPractice::new(self.progress.clone())
    }

    /// Wipe every module back to zero.
    pub fn reset_all_progress(&self) {
        self.progress.reset_all();
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
