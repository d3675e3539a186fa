use crate::constants::{BASE_POINTS, BONUS_POINTS, BONUS_THRESHOLD_PERCENT, FEEDBACK_TIERS};
use crate::error::{Error, Result};
use crate::question::Question;

pub fn score_of(question: &Question) -> u32 {
    if !question.is_answered() {
        return 0;
    }
    let base = if question.is_correct() { BASE_POINTS } else { 0 };
    base + question.bonus
}

pub fn total_score(questions: &[Question]) -> u32 {
    questions.iter().map(score_of).sum()
}

pub fn correct_count(questions: &[Question]) -> usize {
    questions.iter().filter(|q| q.is_correct()).count()
}

pub fn bonus_count(questions: &[Question]) -> usize {
    questions.iter().filter(|q| q.bonus > 0).count()
}

pub fn max_score(total_questions: usize) -> u32 {
    total_questions as u32 * (BASE_POINTS + BONUS_POINTS)
}

/// Bonus earned by an answer given with `time_remaining` seconds left on a
/// `time_per_question` budget. Only correct answers can earn it.
pub fn earned_bonus(is_correct: bool, time_remaining: f64, time_per_question: f64) -> u32 {
    let threshold = time_per_question * BONUS_THRESHOLD_PERCENT;
    if is_correct && time_remaining >= threshold {
        BONUS_POINTS
    } else {
        0
    }
}

/// Score as a percentage of the best possible result.
pub fn percentage(score: u32, total_questions: usize) -> Result<f64> {
    if total_questions == 0 {
        return Err(Error::InvalidArgument(
            "total_questions must be greater than zero".to_string(),
        ));
    }
    Ok(100.0 * score as f64 / max_score(total_questions) as f64)
}

pub fn feedback_message(score: u32, total_questions: usize) -> Result<&'static str> {
    let pct = percentage(score, total_questions)?;
    let message = FEEDBACK_TIERS
        .iter()
        .find(|(threshold, _)| pct >= *threshold)
        .map(|(_, message)| *message)
        .unwrap_or(FEEDBACK_TIERS[FEEDBACK_TIERS.len() - 1].1);
    Ok(message)
}
