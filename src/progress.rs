//! Progress store: per-module completion, score and achievements.
//!
//! The whole map is serialized as one JSON blob under [`PROGRESS_KEY`] and
//! rewritten after every mutation. Saves run on a single writer thread, in
//! mutation order, so callers never wait on the backend. Persistence is best effort:
//!   - a missing or corrupt blob at load time yields an empty map
//!   - a failed save is logged and otherwise ignored; memory stays authoritative
//!   - dropping the store drains whatever is still queued

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::error::Result;

/// Blob key holding the serialized progress map.
pub const PROGRESS_KEY: &str = "moduleProgress";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleProgress {
    pub completed: bool,
    pub score: u32,
    #[serde(default)]
    pub achievements: BTreeSet<String>,
    pub last_accessed: DateTime<Utc>,
}

impl ModuleProgress {
    fn fresh() -> Self {
        Self {
            completed: false,
            score: 0,
            achievements: BTreeSet::new(),
            last_accessed: Utc::now(),
        }
    }
}

/// Opaque key-value storage for the progress blob.
pub trait BlobStore: Send + Sync {
    /// `Ok(None)` when nothing has been saved under `key` yet.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn save(&self, key: &str, bytes: &[u8]) -> Result<()>;
}

/// Process-local blob store. Clones share the same contents.
#[derive(Clone, Debug, Default)]
pub struct MemoryBlobStore {
    entries: Arc<Mutex<HashMap<String, Vec<u8>>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite a raw entry (handy for seeding corrupt data).
    pub fn put(&self, key: &str, bytes: impl Into<Vec<u8>>) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), bytes.into());
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self
            .entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        self.put(key, bytes);
        Ok(())
    }
}

/// One `<key>.json` file per entry inside `dir`.
#[derive(Clone, Debug)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl BlobStore for FileBlobStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read(path)?))
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension(format!("{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }
}

enum WriteCommand {
    Save(Vec<u8>),
    Flush(Sender<()>),
}

/// Drains the queue in order. Snapshots queued behind each other collapse
/// into the newest one, since each is the full map.
fn run_writer(blob: Box<dyn BlobStore>, rx: Receiver<WriteCommand>) {
    while let Ok(command) = rx.recv() {
        match command {
            WriteCommand::Save(mut bytes) => {
                let mut ack = None;
                while let Ok(next) = rx.try_recv() {
                    match next {
                        WriteCommand::Save(newer) => bytes = newer,
                        WriteCommand::Flush(done) => {
                            ack = Some(done);
                            break;
                        }
                    }
                }
                if let Err(e) = blob.save(PROGRESS_KEY, &bytes) {
                    warn!(target: "progress", error = %e, "Failed to save progress; keeping in-memory state");
                }
                if let Some(done) = ack {
                    let _ = done.send(());
                }
            }
            WriteCommand::Flush(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!(target: "progress", "Progress writer stopped");
}

pub struct ProgressStore {
    modules: RwLock<HashMap<String, ModuleProgress>>,
    writer: Option<Sender<WriteCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl ProgressStore {
    /// Read the persisted map; anything unreadable starts empty.
    #[instrument(level = "info", skip_all)]
    pub fn load(blob: impl BlobStore + 'static) -> Self {
        let modules = match blob.load(PROGRESS_KEY) {
            Ok(Some(bytes)) => match serde_json::from_slice::<HashMap<String, ModuleProgress>>(&bytes) {
                Ok(map) => map,
                Err(e) => {
                    warn!(target: "progress", error = %e, "Corrupt progress blob; starting empty");
                    HashMap::new()
                }
            },
            Ok(None) => HashMap::new(),
            Err(e) => {
                warn!(target: "progress", error = %e, "Failed to read progress blob; starting empty");
                HashMap::new()
            }
        };
        info!(target: "progress", modules = modules.len(), "Progress loaded");

        let (tx, rx) = mpsc::channel();
        let blob: Box<dyn BlobStore> = Box::new(blob);
        let worker = thread::spawn(move || run_writer(blob, rx));
        Self {
            modules: RwLock::new(modules),
            writer: Some(tx),
            worker: Some(worker),
        }
    }

    pub fn in_memory() -> Self {
        Self::load(MemoryBlobStore::new())
    }

    /// Upsert: sets `completed`, overwrites `score`, stamps `last_accessed`.
    #[instrument(level = "debug", skip(self))]
    pub fn update(&self, module: &str, completed: bool, score: u32) {
        {
            let mut modules = self.modules.write().unwrap_or_else(PoisonError::into_inner);
            let entry = modules
                .entry(module.to_string())
                .or_insert_with(ModuleProgress::fresh);
            entry.completed = completed;
            entry.score = score;
            entry.last_accessed = Utc::now();
            self.persist(&modules);
        }
        debug!(target: "progress", %module, completed, score, "Module progress updated");
    }

    /// Returns `true` if the achievement was not already present.
    #[instrument(level = "debug", skip(self))]
    pub fn add_achievement(&self, module: &str, achievement_id: &str) -> bool {
        let inserted = {
            let mut modules = self.modules.write().unwrap_or_else(PoisonError::into_inner);
            let inserted = modules
                .entry(module.to_string())
                .or_insert_with(ModuleProgress::fresh)
                .achievements
                .insert(achievement_id.to_string());
            self.persist(&modules);
            inserted
        };
        if inserted {
            info!(target: "progress", %module, achievement = %achievement_id, "Achievement earned");
        }
        inserted
    }

    /// Zero every record (keys are kept).
    #[instrument(level = "info", skip(self))]
    pub fn reset_all(&self) {
        {
            let mut modules = self.modules.write().unwrap_or_else(PoisonError::into_inner);
            for progress in modules.values_mut() {
                *progress = ModuleProgress::fresh();
            }
            self.persist(&modules);
        }
        info!(target: "progress", "All progress reset");
    }

    pub fn module(&self, module: &str) -> Option<ModuleProgress> {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(module)
            .cloned()
    }

    pub fn modules(&self) -> HashMap<String, ModuleProgress> {
        self.modules
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Block until every save queued so far has reached the backend.
    pub fn flush(&self) {
        let Some(writer) = &self.writer else { return };
        let (done_tx, done_rx) = mpsc::channel();
        if writer.send(WriteCommand::Flush(done_tx)).is_ok() {
            let _ = done_rx.recv();
        }
    }

    /// Queue a snapshot. Called with the write lock held so the queue order
    /// matches the mutation order.
    fn persist(&self, modules: &HashMap<String, ModuleProgress>) {
        let bytes = match serde_json::to_vec(modules) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(target: "progress", error = %e, "Failed to encode progress; keeping in-memory state");
                return;
            }
        };
        let queued = self
            .writer
            .as_ref()
            .is_some_and(|w| w.send(WriteCommand::Save(bytes)).is_ok());
        if !queued {
            warn!(target: "progress", "Progress writer is gone; keeping in-memory state");
        }
    }
}

impl Drop for ProgressStore {
    fn drop(&mut self) {
        drop(self.writer.take());
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
