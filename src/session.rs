use crate::config::GameConfig;
use crate::question::Question;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, strum_macros::Display)]
pub enum GamePhase {
    #[default]
    Setup,
    Playing,
    Results,
}

/// State of one play-through. Owned by [`crate::game::Game`].
#[derive(Debug, Clone, PartialEq)]
pub struct GameSession {
    config: GameConfig,
    pub(crate) questions: Vec<Question>,
    pub(crate) current_question_index: usize,
    pub(crate) total_score: u32,
}

impl GameSession {
    pub fn new(config: GameConfig, questions: Vec<Question>) -> Self {
        Self {
            config,
            questions,
            current_question_index: 0,
            total_score: 0,
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question_index(&self) -> usize {
        self.current_question_index
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_question_index)
    }

    pub(crate) fn current_question_mut(&mut self) -> Option<&mut Question> {
        self.questions.get_mut(self.current_question_index)
    }

    pub fn is_finished(&self) -> bool {
        self.current_question_index >= self.questions.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_defaults_to_setup() {
        assert_eq!(GamePhase::default(), GamePhase::Setup);
        assert_eq!(GamePhase::Results.to_string(), "Results");
    }

    #[test]
    fn current_question_tracks_index() {
        let mut session = GameSession::new(
            GameConfig::default(),
            vec![Question::new(2, 3), Question::new(4, 5)],
        );
        assert_eq!(session.current_question().unwrap().factor2, 3);
        session.current_question_index = 1;
        assert_eq!(session.current_question().unwrap().factor2, 5);
        session.current_question_index = 2;
        assert!(session.current_question().is_none());
        assert!(session.is_finished());
    }

    #[test]
    fn empty_session_is_finished() {
        let session = GameSession::new(GameConfig::default(), Vec::new());
        assert!(session.is_finished());
        assert_eq!(session.total_score(), 0);
    }
}
