use serde::de::{Error as DeError, Unexpected};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Maximum number of attempts retained per letter.
pub const MAX_HISTORY: usize = 50;

/// Result of a single attempt at signing a letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Correct,
    Incorrect,
}

// On disk an outcome is a bare 0/1 so the store stays compact and easy to
// eyeball. See README for the full schema.
impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            Outcome::Correct => 1,
            Outcome::Incorrect => 0,
        })
    }
}

impl<'de> Deserialize<'de> for Outcome {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match u8::deserialize(deserializer)? {
            0 => Ok(Outcome::Incorrect),
            1 => Ok(Outcome::Correct),
            other => Err(D::Error::invalid_value(
                Unexpected::Unsigned(other as u64),
                &"0 or 1",
            )),
        }
    }
}

/// Bounded ledger of attempt outcomes for one letter, oldest first.
///
/// Appending beyond [`MAX_HISTORY`] evicts the oldest entries until exactly
/// `MAX_HISTORY` remain; nothing else ever removes entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreHistory {
    attempts: Vec<Outcome>,
}

impl ScoreHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.attempts.push(outcome);
        if self.attempts.len() > MAX_HISTORY {
            let excess = self.attempts.len() - MAX_HISTORY;
            self.attempts.drain(..excess);
        }
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    /// Attempts in chronological order, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Outcome> {
        self.attempts.iter()
    }

    /// Attempts most recent first, the order the score decay is applied in.
    pub fn newest_first(&self) -> impl Iterator<Item = &Outcome> {
        self.attempts.iter().rev()
    }
}
