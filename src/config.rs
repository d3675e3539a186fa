use crate::app_dirs::AppDirs;
use crate::constants::{
    DEFAULT_SECOND_FACTOR_RANGE, DEFAULT_TIME_PER_QUESTION, DEFAULT_TOTAL_QUESTIONS,
};
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings a game is started with. Immutable for the lifetime of a session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub player_name: String,
    pub first_factors: Vec<u32>,
    /// Closed `[min, max]` range for the second factor.
    pub second_factor_range: (u32, u32),
    pub time_per_question: f64,
    pub total_questions: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            player_name: String::new(),
            first_factors: Vec::new(),
            second_factor_range: DEFAULT_SECOND_FACTOR_RANGE,
            time_per_question: DEFAULT_TIME_PER_QUESTION,
            total_questions: DEFAULT_TOTAL_QUESTIONS,
        }
    }
}

impl GameConfig {
    /// Highest score reachable with this config.
    pub fn max_score(&self) -> u32 {
        crate::scoring::max_score(self.total_questions)
    }

    /// Renders the factor list the way the setup screen edits it, e.g. "2,5,7".
    pub fn factors_label(&self) -> String {
        self.first_factors
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Parses a comma separated factor list. Blank items are skipped; anything
/// that isn't a positive integer is dropped.
pub fn parse_factors(input: &str) -> Vec<u32> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse::<u32>().ok())
        .filter(|f| *f > 0)
        .collect()
}

/// Remembers the last-used settings between runs.
pub trait ConfigStore {
    fn load(&self) -> GameConfig;
    fn save(&self, cfg: &GameConfig) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = AppDirs::config_path()
            .unwrap_or_else(|| PathBuf::from("multitrainer_config.json"));
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> GameConfig {
        match fs::read(&self.path) {
            Ok(bytes) => match serde_json::from_slice::<GameConfig>(&bytes) {
                Ok(cfg) => cfg,
                Err(e) => {
                    log::warn!("ignoring unreadable config {}: {}", self.path.display(), e);
                    GameConfig::default()
                }
            },
            Err(_) => GameConfig::default(),
        }
    }

    fn save(&self, cfg: &GameConfig) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_drill_defaults() {
        let cfg = GameConfig::default();
        assert_eq!(cfg.player_name, "");
        assert!(cfg.first_factors.is_empty());
        assert_eq!(cfg.second_factor_range, (1, 12));
        assert_eq!(cfg.time_per_question, 5.0);
        assert_eq!(cfg.total_questions, 10);
        assert_eq!(cfg.max_score(), 150);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let cfg = GameConfig {
            player_name: "Ada".into(),
            first_factors: vec![3, 4],
            ..GameConfig::default()
        };
        let value = serde_json::to_value(&cfg).unwrap();
        assert_eq!(value["playerName"], "Ada");
        assert_eq!(value["firstFactors"], serde_json::json!([3, 4]));
        assert_eq!(value["secondFactorRange"], serde_json::json!([1, 12]));
        assert_eq!(value["timePerQuestion"], 5.0);
        assert_eq!(value["totalQuestions"], 10);
    }

    #[test]
    fn parse_factors_skips_junk() {
        assert_eq!(parse_factors("2, 5,7"), vec![2, 5, 7]);
        assert_eq!(parse_factors("3,,x,0,4,"), vec![3, 4]);
        assert!(parse_factors("").is_empty());
    }

    #[test]
    fn factors_label_joins_with_commas() {
        let cfg = GameConfig {
            first_factors: vec![2, 9],
            ..GameConfig::default()
        };
        assert_eq!(cfg.factors_label(), "2,9");
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = GameConfig {
            player_name: "Grace".into(),
            first_factors: vec![6, 7, 8],
            second_factor_range: (2, 9),
            time_per_question: 8.0,
            total_questions: 25,
        };
        store.save(&cfg).unwrap();
        assert_eq!(store.load(), cfg);
    }

    #[test]
    fn missing_or_corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        assert_eq!(store.load(), GameConfig::default());

        fs::write(&path, b"{not json").unwrap();
        assert_eq!(store.load(), GameConfig::default());
    }
}
