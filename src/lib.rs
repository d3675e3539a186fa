// Library surface for the drill engine, headless tests, and the terminal front end.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod constants;
pub mod error;
pub mod game;
pub mod generator;
pub mod history;
pub mod question;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod ui;

pub use config::GameConfig;
pub use error::{Error, Result};
pub use game::{AnswerOutcome, Game, GameEvent};
pub use history::{HistoryStore, PlayerHistory, ScoreHistoryEntry};
pub use question::Question;
pub use session::{GamePhase, GameSession};
