use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::alphabet::{Symbol, ALPHABET_LEN};
use crate::history::{Outcome, ScoreHistory};
use crate::proficiency::{self, Proficiency};
use crate::scoring::{self, SymbolScore};
use crate::util;

/// One learner's profile: identity, per-letter attempt ledgers, and the
/// scores and tier derived from them.
///
/// Every score field is derived from `history` and only changes through
/// [`apply_lesson`](UserRecord::apply_lesson); callers read, never write.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    name: String,
    proficiency: Proficiency,
    history: Vec<ScoreHistory>,
    weighted_scores: Vec<f64>,
    percent_scores: Vec<f64>,
    overall_score: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRecord {
    pub fn new(name: &str, proficiency: Proficiency) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            proficiency,
            history: vec![ScoreHistory::new(); ALPHABET_LEN],
            weighted_scores: vec![0.0; ALPHABET_LEN],
            percent_scores: vec![0.0; ALPHABET_LEN],
            overall_score: 0.0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn proficiency(&self) -> Proficiency {
        self.proficiency
    }

    pub fn overall_score(&self) -> f64 {
        self.overall_score
    }

    pub fn history(&self, symbol: Symbol) -> &ScoreHistory {
        &self.history[symbol.index()]
    }

    pub fn weighted_score(&self, symbol: Symbol) -> f64 {
        self.weighted_scores[symbol.index()]
    }

    pub fn percent_score(&self, symbol: Symbol) -> f64 {
        self.percent_scores[symbol.index()]
    }

    pub fn percent_scores(&self) -> &[f64] {
        &self.percent_scores
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Append one lesson's outcomes and rederive every score.
    ///
    /// The decay recompute runs over all letters, not just the ones touched
    /// this lesson, so the overall score always reflects the whole alphabet.
    pub(crate) fn apply_lesson(&mut self, outcomes: &[(Symbol, Outcome)], alpha: f64) {
        for (symbol, outcome) in outcomes {
            self.history[symbol.index()].push(*outcome);
        }

        for index in 0..ALPHABET_LEN {
            let SymbolScore { weighted, percent } =
                scoring::score_history(&self.history[index], alpha);
            self.weighted_scores[index] = weighted;
            self.percent_scores[index] = percent;
        }

        self.overall_score = util::mean(&self.percent_scores).unwrap_or(0.0);
        self.proficiency = proficiency::classify(self.overall_score);
        self.updated_at = Utc::now();
    }

    /// Pad or truncate the per-letter vectors to the full alphabet. Stores
    /// written by short-lesson builds carry fewer than 26 entries.
    pub(crate) fn ensure_shape(&mut self) {
        self.history.resize_with(ALPHABET_LEN, ScoreHistory::new);
        self.weighted_scores.resize(ALPHABET_LEN, 0.0);
        self.percent_scores.resize(ALPHABET_LEN, 0.0);
    }
}
