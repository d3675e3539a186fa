use crate::{config::GameConfig, question::Question};
use rand::seq::SliceRandom;
use rand::Rng;

/// Builds every `(factor1, factor2)` pair the config allows. Empty when there
/// are no first factors or the range is inverted.
pub fn build_deck(config: &GameConfig) -> Vec<(u32, u32)> {
    let (min, max) = config.second_factor_range;
    config
        .first_factors
        .iter()
        .flat_map(|&f1| (min..=max).map(move |f2| (f1, f2)))
        .collect()
}

/// Deals `config.total_questions` questions like cards: the deck is shuffled
/// and dealt from the top, and only reshuffled once every combination has
/// been used.
pub fn generate(config: &GameConfig) -> Vec<Question> {
    generate_with_rng(config, &mut rand::thread_rng())
}

pub fn generate_with_rng<R: Rng + ?Sized>(config: &GameConfig, rng: &mut R) -> Vec<Question> {
    let mut deck = build_deck(config);
    if deck.is_empty() {
        return Vec::new();
    }

    let mut questions = Vec::with_capacity(config.total_questions);
    let mut remaining = config.total_questions;

    while remaining > 0 {
        deck.shuffle(rng);
        let take = remaining.min(deck.len());
        questions.extend(deck[..take].iter().map(|&(f1, f2)| Question::new(f1, f2)));
        remaining -= take;
    }

    log::trace!(
        "dealt {} questions from a deck of {}",
        questions.len(),
        deck.len()
    );
    questions
}
