use crate::config::GameConfig;
use crate::constants::BASE_POINTS;
use crate::generator;
use crate::question::Question;
use crate::scoring::earned_bonus;
use crate::session::{GamePhase, GameSession};
use std::fmt;

/// Longest answer the buffer accepts.
const MAX_ANSWER_DIGITS: usize = 9;

/// Result of scoring one submitted answer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub correct_answer: u64,
    pub bonus: u32,
    pub points: u32,
}

/// Change notifications delivered to subscribers after each transition.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Started { total_questions: usize },
    AnswerSubmitted { index: usize, outcome: AnswerOutcome },
    Advanced { index: usize },
    Finished { total_score: u32 },
    Reset { keep_config: bool },
    ConfigChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Listener = Box<dyn FnMut(&GameEvent)>;

/// The drill state machine: Setup -> Playing -> Results, back to Setup on
/// reset. All mutation goes through the methods below; readers get shared
/// references and can subscribe to [`GameEvent`]s.
pub struct Game {
    phase: GamePhase,
    config: GameConfig,
    session: Option<GameSession>,
    current_answer: String,
    time_remaining: f64,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: usize,
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("phase", &self.phase)
            .field("config", &self.config)
            .field("session", &self.session)
            .field("current_answer", &self.current_answer)
            .field("time_remaining", &self.time_remaining)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            phase: GamePhase::Setup,
            config,
            session: None,
            current_answer: String::new(),
            time_remaining: 0.0,
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Option<&GameSession> {
        self.session.as_ref()
    }

    pub fn current_answer(&self) -> &str {
        &self.current_answer
    }

    pub fn time_remaining(&self) -> f64 {
        self.time_remaining
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.session.as_ref().and_then(GameSession::current_question)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&GameEvent) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn emit(&mut self, event: GameEvent) {
        log::trace!("game event: {:?}", event);
        for (_, listener) in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    /// Edits the settings used by the next `start_game`; only while in setup.
    pub fn update_config<F: FnOnce(&mut GameConfig)>(&mut self, edit: F) {
        if self.phase != GamePhase::Setup {
            return;
        }
        edit(&mut self.config);
        self.emit(GameEvent::ConfigChanged);
    }

    pub fn start_game(&mut self, config: GameConfig) {
        let questions = generator::generate(&config);
        self.start_with_questions(config, questions);
    }

    /// Starts a session over an already dealt question list.
    pub fn start_with_questions(&mut self, config: GameConfig, questions: Vec<Question>) {
        let total_questions = questions.len();
        self.time_remaining = config.time_per_question;
        self.session = Some(GameSession::new(config.clone(), questions));
        self.config = config;
        self.current_answer.clear();
        self.phase = GamePhase::Playing;
        log::debug!("started game with {} questions", total_questions);
        self.emit(GameEvent::Started { total_questions });

        if total_questions == 0 {
            self.finish();
        }
    }

    /// Scores `answer` against the current question. `time_remaining` is the
    /// number of seconds still on the countdown when the answer came in.
    pub fn submit_answer(&mut self, answer: u64, time_remaining: f64) -> Option<AnswerOutcome> {
        if self.phase != GamePhase::Playing {
            return None;
        }
        let session = self.session.as_mut()?;
        let time_per_question = session.config().time_per_question;
        let index = session.current_question_index;
        let question = session.current_question_mut()?;
        if question.is_answered() {
            return None;
        }

        let correct_answer = question.correct_answer();
        let correct = answer == correct_answer;
        let bonus = earned_bonus(correct, time_remaining, time_per_question);

        question.player_answer = Some(answer);
        question.time_used = time_per_question - time_remaining;
        question.bonus = bonus;

        let points = (if correct { BASE_POINTS } else { 0 }) + bonus;
        session.total_score += points;

        let outcome = AnswerOutcome {
            correct,
            correct_answer,
            bonus,
            points,
        };
        self.current_answer.clear();
        self.emit(GameEvent::AnswerSubmitted { index, outcome });
        Some(outcome)
    }

    /// Submits whatever is in the answer buffer. Blank input is ignored.
    pub fn submit_current_answer(&mut self) -> Option<AnswerOutcome> {
        let answer = self.current_answer.parse::<u64>().ok()?;
        self.submit_answer(answer, self.time_remaining)
    }

    pub fn next_question(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.current_question_index += 1;
        let index = session.current_question_index;
        let finished = session.is_finished();

        self.current_answer.clear();
        if finished {
            self.finish();
        } else {
            self.time_remaining = self.config.time_per_question;
            self.emit(GameEvent::Advanced { index });
        }
    }

    fn finish(&mut self) {
        let total_score = self.session.as_ref().map_or(0, GameSession::total_score);
        self.phase = GamePhase::Results;
        self.time_remaining = 0.0;
        log::debug!("game finished with {} points", total_score);
        self.emit(GameEvent::Finished { total_score });
    }

    pub fn reset(&mut self, keep_config: bool) {
        if !keep_config {
            self.config = GameConfig::default();
        }
        self.session = None;
        self.current_answer.clear();
        self.time_remaining = 0.0;
        self.phase = GamePhase::Setup;
        self.emit(GameEvent::Reset { keep_config });
    }

    pub fn push_digit(&mut self, c: char) {
        if self.phase == GamePhase::Playing
            && c.is_ascii_digit()
            && self.current_answer.len() < MAX_ANSWER_DIGITS
        {
            self.current_answer.push(c);
        }
    }

    pub fn pop_digit(&mut self) {
        self.current_answer.pop();
    }

    pub fn set_time_remaining(&mut self, secs: f64) {
        self.time_remaining = secs.max(0.0);
    }

    /// Runs the countdown down by `dt` seconds. Returns true once the current
    /// question has no time left.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.set_time_remaining(self.time_remaining - dt);
        self.time_remaining <= 0.0
    }
}
