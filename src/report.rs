use std::io::{self, Write};

use itertools::Itertools;

use crate::alphabet;
use crate::user::UserRecord;

/// Write one learner's per-letter breakdown as CSV.
pub fn user_breakdown<W: Write>(user: &UserRecord, mut out: W) -> io::Result<()> {
    writeln!(out, "letter,attempts,weighted_score,percent_score")?;
    for symbol in alphabet::letters() {
        writeln!(
            out,
            "{},{},{:.4},{:.2}",
            symbol.as_char(),
            user.history(symbol).len(),
            user.weighted_score(symbol),
            user.percent_score(symbol),
        )?;
    }
    Ok(())
}

/// Write a summary row per learner, strongest overall score first.
pub fn roster_summary<'a, W, I>(users: I, mut out: W) -> io::Result<()>
where
    W: Write,
    I: Iterator<Item = &'a UserRecord>,
{
    writeln!(out, "name,proficiency,overall_score")?;
    let ranked = users.sorted_by(|a, b| {
        b.overall_score()
            .partial_cmp(&a.overall_score())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for user in ranked {
        writeln!(
            out,
            "{},{},{:.2}",
            user.name(),
            user.proficiency(),
            user.overall_score(),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Symbol;
    use crate::history::Outcome;
    use crate::proficiency::Proficiency;
    use crate::registry::UserRegistry;
    use crate::store::MemoryStore;

    fn sym(c: char) -> Symbol {
        Symbol::from_char(c).unwrap()
    }

    #[test]
    fn breakdown_has_a_row_per_letter() {
        let mut registry = UserRegistry::open(MemoryStore::new()).unwrap();
        registry.create_user("zoe", Proficiency::Beginner).unwrap();
        registry
            .record_lesson_result(
                "zoe",
                &[(sym('a'), Outcome::Correct), (sym('b'), Outcome::Incorrect)],
            )
            .unwrap();

        let mut buf = Vec::new();
        user_breakdown(registry.get_user("zoe").unwrap(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + alphabet::ALPHABET_LEN);
        assert_eq!(lines[0], "letter,attempts,weighted_score,percent_score");
        assert_eq!(lines[1], "a,1,1.0000,100.00");
        assert_eq!(lines[2], "b,1,-1.0000,0.00");
        assert_eq!(lines[3], "c,0,0.0000,0.00");
    }

    #[test]
    fn roster_is_ranked_by_overall_score() {
        let mut registry = UserRegistry::open(MemoryStore::new()).unwrap();
        registry.create_user("novice", Proficiency::Beginner).unwrap();
        registry.create_user("adept", Proficiency::Beginner).unwrap();

        let outcomes: Vec<(Symbol, Outcome)> = alphabet::letters()
            .map(|s| (s, Outcome::Correct))
            .collect();
        registry.record_lesson_result("adept", &outcomes).unwrap();

        let mut buf = Vec::new();
        roster_summary(registry.users(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "name,proficiency,overall_score");
        assert_eq!(lines[1], "adept,Expert,100.00");
        assert_eq!(lines[2], "novice,Beginner,0.00");
    }
}
