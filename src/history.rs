use crate::app_dirs::AppDirs;
use crate::config::GameConfig;
use crate::constants::{MAX_SCORES, STORAGE_KEY};
use crate::error::Result;
use crate::question::Question;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// One finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreHistoryEntry {
    /// Milliseconds since the Unix epoch.
    pub date: i64,
    pub total_score: u32,
    pub questions: Vec<Question>,
    pub config: GameConfig,
}

/// A player's sessions, most recent first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerHistory {
    pub player_name: String,
    pub scores: Vec<ScoreHistoryEntry>,
}

/// Durable string blobs addressed by key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Stores each key as `<key>.json` inside a directory.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-process store for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: RefCell<HashMap<String, String>>,
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Per-player score history kept in a single JSON blob. Without a backend
/// every read is empty and every write is skipped.
pub struct HistoryStore {
    backend: Option<Box<dyn KeyValueStore>>,
}

impl HistoryStore {
    pub fn new<S: KeyValueStore + 'static>(backend: S) -> Self {
        Self {
            backend: Some(Box::new(backend)),
        }
    }

    pub fn unavailable() -> Self {
        Self { backend: None }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryKeyValueStore::default())
    }

    /// Opens the history under the platform state directory.
    pub fn open_default() -> Self {
        match AppDirs::state_dir() {
            Some(dir) => Self::new(FileKeyValueStore::new(dir)),
            None => {
                log::warn!("no state directory available, score history disabled");
                Self::unavailable()
            }
        }
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_some()
    }

    pub fn get_all_history(&self) -> Vec<PlayerHistory> {
        let Some(backend) = self.backend.as_ref() else {
            return Vec::new();
        };
        let blob = match backend.get(STORAGE_KEY) {
            Ok(Some(blob)) => blob,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log::error!("Error loading history: {}", e);
                return Vec::new();
            }
        };
        match serde_json::from_str(&blob) {
            Ok(history) => history,
            Err(e) => {
                log::warn!("Ignoring unreadable history: {}", e);
                Vec::new()
            }
        }
    }

    pub fn get_player_history(&self, player_name: &str) -> Vec<ScoreHistoryEntry> {
        self.get_all_history()
            .into_iter()
            .find(|p| p.player_name == player_name)
            .map(|p| p.scores)
            .unwrap_or_default()
    }

    pub fn save_score(
        &self,
        player_name: &str,
        total_score: u32,
        questions: &[Question],
        config: &GameConfig,
    ) {
        let entry = ScoreHistoryEntry {
            date: Utc::now().timestamp_millis(),
            total_score,
            questions: questions.to_vec(),
            config: config.clone(),
        };
        if let Err(e) = self.save_entry(player_name, entry) {
            log::error!("Error saving score: {}", e);
        }
    }

    fn save_entry(&self, player_name: &str, entry: ScoreHistoryEntry) -> Result<()> {
        let Some(backend) = self.backend.as_ref() else {
            return Ok(());
        };
        let mut all = self.get_all_history();

        match all.iter_mut().find(|p| p.player_name == player_name) {
            Some(player) => {
                player.scores.insert(0, entry);
                player.scores.truncate(MAX_SCORES);
            }
            None => all.push(PlayerHistory {
                player_name: player_name.to_string(),
                scores: vec![entry],
            }),
        }

        let blob = serde_json::to_string(&all)?;
        backend.set(STORAGE_KEY, &blob)
    }

    pub fn get_best_score(&self, player_name: &str) -> u32 {
        self.get_player_history(player_name)
            .iter()
            .map(|e| e.total_score)
            .max()
            .unwrap_or(0)
    }

    pub fn get_average_score(&self, player_name: &str) -> u32 {
        let history = self.get_player_history(player_name);
        if history.is_empty() {
            return 0;
        }
        let sum: u64 = history.iter().map(|e| e.total_score as u64).sum();
        (sum as f64 / history.len() as f64).round() as u32
    }
}
