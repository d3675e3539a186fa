/// Points for a correct answer.
pub const BASE_POINTS: u32 = 10;

/// Extra points for a correct answer given quickly.
pub const BONUS_POINTS: u32 = 5;

/// Fraction of the per-question budget that must still be on the clock
/// for a correct answer to earn the bonus.
pub const BONUS_THRESHOLD_PERCENT: f64 = 0.6;

pub const DEFAULT_TIME_PER_QUESTION: f64 = 5.0;
pub const DEFAULT_TOTAL_QUESTIONS: usize = 10;
pub const DEFAULT_SECOND_FACTOR_RANGE: (u32, u32) = (1, 12);

/// Key under which all player histories are stored.
pub const STORAGE_KEY: &str = "multitrainer-history";

/// Most recent sessions kept per player.
pub const MAX_SCORES: usize = 50;

/// Countdown granularity of the terminal front end.
pub const TICK_RATE_MS: u64 = 100;

/// Feedback tiers keyed by minimum percentage, highest first. The last
/// entry is the catch-all.
pub const FEEDBACK_TIERS: [(f64, &str); 7] = [
    (100.0, "Perfect! You're a multiplication master!"),
    (90.0, "Amazing work! You're really good at this!"),
    (80.0, "Great job! Keep up the good work!"),
    (70.0, "Well done! You're getting better!"),
    (60.0, "Good effort! Practice makes perfect!"),
    (50.0, "Nice try! Keep practicing!"),
    (0.0, "Keep going! Every practice helps you improve!"),
];
