use serde::{Deserialize, Serialize};

/// One drill item. The correct answer is always `factor1 * factor2`; it is
/// recomputed rather than trusted when a question is read back from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredQuestion")]
pub struct Question {
    pub factor1: u32,
    pub factor2: u32,
    correct_answer: u64,
    /// `None` until the player submits an answer.
    pub player_answer: Option<u64>,
    /// Seconds the player took to answer.
    pub time_used: f64,
    pub bonus: u32,
}

impl Question {
    pub fn new(factor1: u32, factor2: u32) -> Self {
        Self {
            factor1,
            factor2,
            correct_answer: factor1 as u64 * factor2 as u64,
            player_answer: None,
            time_used: 0.0,
            bonus: 0,
        }
    }

    pub fn correct_answer(&self) -> u64 {
        self.correct_answer
    }

    pub fn is_answered(&self) -> bool {
        self.player_answer.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.player_answer == Some(self.correct_answer)
    }

    pub fn prompt(&self) -> String {
        format!("{} × {}", self.factor1, self.factor2)
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredQuestion {
    factor1: u32,
    factor2: u32,
    #[serde(default)]
    player_answer: Option<u64>,
    #[serde(default)]
    time_used: f64,
    #[serde(default)]
    bonus: u32,
}

impl From<StoredQuestion> for Question {
    fn from(s: StoredQuestion) -> Self {
        Self {
            player_answer: s.player_answer,
            time_used: s.time_used,
            bonus: s.bonus,
            ..Question::new(s.factor1, s.factor2)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_question_is_unanswered() {
        let q = Question::new(7, 8);
        assert_eq!(q.correct_answer(), 56);
        assert_eq!(q.player_answer, None);
        assert_eq!(q.time_used, 0.0);
        assert_eq!(q.bonus, 0);
        assert!(!q.is_answered());
        assert!(!q.is_correct());
        assert_eq!(q.prompt(), "7 × 8");
    }

    #[test]
    fn serializes_unanswered_as_null() {
        let value = serde_json::to_value(Question::new(3, 4)).unwrap();
        assert_eq!(value["correctAnswer"], 12);
        assert!(value["playerAnswer"].is_null());
        assert_eq!(value["timeUsed"], 0.0);
    }

    #[test]
    fn stored_correct_answer_is_recomputed() {
        let json = r#"{"factor1":6,"factor2":9,"correctAnswer":1,"playerAnswer":54,"timeUsed":2.5,"bonus":5}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.correct_answer(), 54);
        assert!(q.is_correct());
        assert_eq!(q.time_used, 2.5);
        assert_eq!(q.bonus, 5);
    }
}
