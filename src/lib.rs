//! ByteWise · binary literacy trainer core
//!
//! - Bit vectors and their decimal / hex / octal / `rwx` forms
//! - One generic timed challenge engine, parameterized per game:
//!   binary basics, hexadecimal, bitwise operations, ASCII, RGB color, file permissions
//! - A tokio-driven one-second countdown
//! - Progress store (per-module score, completion, achievements) persisted as one JSON blob
//! - File size unit converter and a scored permission editor
//!
//! Important env variables:
//!   BYTEWISE_CONFIG_PATH : path to TOML config (per-game tuning, data_dir)
//!   LOG_LEVEL            : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT           : "pretty" (default) or "json"

pub mod achievements;
pub mod bits;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod filesize;
pub mod practice;
pub mod progress;
pub mod scoring;
pub mod seeds;
pub mod state;
pub mod telemetry;
pub mod timer;
pub mod util;
pub mod variants;

pub use bits::{BitVector, Byte, PermissionBits};
pub use engine::{ChallengeEngine, Phase, RoundReport, SessionSnapshot, Snapshot, Submission};
pub use error::{Error, Result};
pub use progress::{BlobStore, FileBlobStore, MemoryBlobStore, ModuleProgress, ProgressStore};
pub use scoring::{Rules, TimeBonus};
pub use state::AppState;
pub use timer::ChallengeRunner;
pub use variants::Variant;
