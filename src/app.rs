use crate::config::{parse_factors, ConfigStore, GameConfig};
use crate::game::{AnswerOutcome, Game, GameEvent};
use crate::history::HistoryStore;
use crate::session::GamePhase;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// Terminal front end state: routes keys and ticks into the [`Game`] and
/// records finished sessions in the [`HistoryStore`].
pub struct App {
    pub game: Game,
    history: HistoryStore,
    config_store: Option<Box<dyn ConfigStore>>,
    pending: Rc<RefCell<Vec<GameEvent>>>,
    /// Factor list being typed on the setup screen.
    pub factors_input: String,
    /// One-line hint shown on the setup screen.
    pub notice: Option<String>,
    pub last_outcome: Option<AnswerOutcome>,
    pub player_best: u32,
    pub player_average: u32,
}

impl App {
    pub fn new(config: GameConfig, history: HistoryStore) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let mut game = Game::new(config);
        let sink = pending.clone();
        game.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let mut app = Self {
            factors_input: game.config().factors_label(),
            game,
            history,
            config_store: None,
            pending,
            notice: None,
            last_outcome: None,
            player_best: 0,
            player_average: 0,
        };
        app.refresh_player_stats();
        app
    }

    /// Persists the settings of every started game through `store`.
    pub fn with_config_store<S: ConfigStore + 'static>(mut self, store: S) -> Self {
        self.config_store = Some(Box::new(store));
        self
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    /// Index of the question on screen, `None` outside of play.
    pub fn question_index(&self) -> Option<usize> {
        match self.game.phase() {
            GamePhase::Playing => self.game.session().map(|s| s.current_question_index()),
            GamePhase::Setup | GamePhase::Results => None,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }
        if key.code == KeyCode::Esc {
            return AppAction::Quit;
        }

        match self.game.phase() {
            GamePhase::Setup => self.on_setup_key(key.code),
            GamePhase::Playing => self.on_playing_key(key.code),
            GamePhase::Results => match key.code {
                KeyCode::Char('q') => return AppAction::Quit,
                KeyCode::Char('r') => self.game.start_game(self.game.config().clone()),
                KeyCode::Char('s') => self.game.reset(true),
                _ => {}
            },
        }
        self.process_events();
        AppAction::Continue
    }

    pub fn on_tick(&mut self, dt: f64) {
        if self.game.tick(dt) {
            // out of time: the question stays unanswered
            self.last_outcome = None;
            self.game.next_question();
        }
        self.process_events();
    }

    fn on_setup_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) if c.is_ascii_digit() || c == ',' => {
                self.factors_input.push(c);
                self.notice = None;
            }
            KeyCode::Backspace => {
                self.factors_input.pop();
            }
            KeyCode::Up => {
                self.game.update_config(|c| c.total_questions = c.total_questions.saturating_add(1))
            }
            KeyCode::Down => {
                self.game.update_config(|c| c.total_questions = c.total_questions.max(2) - 1)
            }
            KeyCode::Right => self.game.update_config(|c| c.time_per_question += 1.0),
            KeyCode::Left => self.game.update_config(|c| {
                c.time_per_question = (c.time_per_question - 1.0).max(1.0);
            }),
            KeyCode::Enter => self.start_from_setup(),
            _ => {}
        }
    }

    fn start_from_setup(&mut self) {
        let factors = parse_factors(&self.factors_input);
        if factors.is_empty() {
            self.notice = Some("type at least one factor, e.g. 3,4,7".to_string());
            return;
        }
        let mut config = self.game.config().clone();
        config.first_factors = factors;
        self.game.start_game(config);
    }

    fn on_playing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(c) => self.game.push_digit(c),
            KeyCode::Backspace => self.game.pop_digit(),
            KeyCode::Enter => {
                if let Some(outcome) = self.game.submit_current_answer() {
                    self.last_outcome = Some(outcome);
                    self.game.next_question();
                }
            }
            _ => {}
        }
    }

    fn process_events(&mut self) {
        let events: Vec<GameEvent> = self.pending.borrow_mut().drain(..).collect();
        for event in events {
            match event {
                GameEvent::Started { .. } => {
                    self.last_outcome = None;
                    self.factors_input = self.game.config().factors_label();
                    if let Some(store) = self.config_store.as_ref() {
                        if let Err(e) = store.save(self.game.config()) {
                            log::error!("failed to save settings: {}", e);
                        }
                    }
                }
                GameEvent::Finished { total_score } => {
                    if let Some(session) = self.game.session() {
                        let config = session.config();
                        self.history.save_score(
                            &config.player_name,
                            total_score,
                            session.questions(),
                            config,
                        );
                    }
                    self.refresh_player_stats();
                }
                GameEvent::Reset { .. } => {
                    self.factors_input = self.game.config().factors_label();
                    self.refresh_player_stats();
                }
                GameEvent::AnswerSubmitted { .. }
                | GameEvent::Advanced { .. }
                | GameEvent::ConfigChanged => {}
            }
        }
    }

    fn refresh_player_stats(&mut self) {
        let name = &self.game.config().player_name;
        self.player_best = self.history.get_best_score(name);
        self.player_average = self.history.get_average_score(name);
    }
}
