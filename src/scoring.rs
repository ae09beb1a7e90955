use crate::history::{Outcome, ScoreHistory};

/// Recency decay factor for letter scores. Only meaningful in `(0, 1]`;
/// higher values discount older attempts faster.
pub const DECAY_ALPHA: f64 = 0.2;

/// Derived scores for one letter.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SymbolScore {
    /// Recency-weighted net correctness in `[-1.0, 1.0]`.
    pub weighted: f64,
    /// The weighted score rescaled to `[0.0, 100.0]`.
    pub percent: f64,
}

/// Recompute a letter's scores from its full history.
///
/// Reading the history newest first, attempt `j` carries weight
/// `(1 - alpha)^j`, counted `+1` for a correct attempt and `-1` otherwise.
/// The weighted score is the normalized sum; an empty history scores zero.
/// The recompute is total and stateless, so re-running it over the same
/// history always yields the same result.
pub fn score_history(history: &ScoreHistory, alpha: f64) -> SymbolScore {
    let mut raw_score = 0.0;
    let mut weight_sum = 0.0;

    for (j, outcome) in history.newest_first().enumerate() {
        let weight = (1.0 - alpha).powi(j as i32);
        raw_score += weight
            * match outcome {
                Outcome::Correct => 1.0,
                Outcome::Incorrect => -1.0,
            };
        weight_sum += weight;
    }

    if weight_sum > 0.0 {
        let weighted = raw_score / weight_sum;
        SymbolScore {
            weighted,
            percent: ((weighted + 1.0) / 2.0) * 100.0,
        }
    } else {
        SymbolScore::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history_of(outcomes: &[Outcome]) -> ScoreHistory {
        let mut history = ScoreHistory::new();
        for o in outcomes {
            history.push(*o);
        }
        history
    }

    #[test]
    fn three_correct_attempts_score_perfect() {
        // Weights newest first: 1.0, 0.8, 0.64; raw and weight sum both 2.44.
        let history = history_of(&[Outcome::Correct, Outcome::Correct, Outcome::Correct]);
        let score = score_history(&history, 0.2);
        assert_eq!(score.weighted, 1.0);
        assert_eq!(score.percent, 100.0);
    }

    #[test]
    fn recent_miss_outweighs_older_hit() {
        // Oldest to newest: correct, incorrect. Newest-first weights 1.0, 0.8
        // give raw -0.2 over weight sum 1.8.
        let history = history_of(&[Outcome::Correct, Outcome::Incorrect]);
        let score = score_history(&history, 0.2);
        assert!((score.weighted - (-1.0 / 9.0)).abs() < 1e-9);
        assert!((score.percent - (400.0 / 9.0)).abs() < 1e-9);
    }

    #[test]
    fn empty_history_scores_zero() {
        let score = score_history(&ScoreHistory::new(), 0.2);
        assert_eq!(score.weighted, 0.0);
        assert_eq!(score.percent, 0.0);
    }

    #[test]
    fn alpha_one_only_counts_the_latest_attempt() {
        let history = history_of(&[Outcome::Incorrect, Outcome::Incorrect, Outcome::Correct]);
        let score = score_history(&history, 1.0);
        assert_eq!(score.weighted, 1.0);
        assert_eq!(score.percent, 100.0);
    }

    #[test]
    fn scores_stay_in_range_for_any_history_and_alpha() {
        for alpha in [0.05, 0.2, 0.5, 0.9, 1.0] {
            for len in 0..=crate::history::MAX_HISTORY {
                let mut history = ScoreHistory::new();
                for i in 0..len {
                    // Irregular but deterministic mix of hits and misses.
                    history.push(if (i * 7 + len) % 3 == 0 {
                        Outcome::Incorrect
                    } else {
                        Outcome::Correct
                    });
                }
                let score = score_history(&history, alpha);
                assert!(
                    (-1.0..=1.0).contains(&score.weighted),
                    "weighted {} out of range (alpha {}, len {})",
                    score.weighted,
                    alpha,
                    len
                );
                assert!(
                    (0.0..=100.0).contains(&score.percent),
                    "percent {} out of range (alpha {}, len {})",
                    score.percent,
                    alpha,
                    len
                );
            }
        }
    }

    #[test]
    fn recompute_is_reproducible() {
        let history = history_of(&[
            Outcome::Correct,
            Outcome::Incorrect,
            Outcome::Correct,
            Outcome::Correct,
        ]);
        let first = score_history(&history, DECAY_ALPHA);
        let second = score_history(&history, DECAY_ALPHA);
        assert_eq!(first, second);
    }
}
