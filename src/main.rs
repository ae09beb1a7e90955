use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use fingerspell::alphabet::{self, Symbol};
use fingerspell::history::Outcome;
use fingerspell::lesson::LessonPlan;
use fingerspell::proficiency::Proficiency;
use fingerspell::registry::{RegistryError, UserRegistry};
use fingerspell::report;
use fingerspell::store::{JsonFileStore, UserStore};
use fingerspell::util;

/// fingerspelling practice tracker
#[derive(Parser, Debug)]
#[clap(
    version,
    about,
    long_about = "Tracks fingerspelling practice per learner: every attempt feeds a recency-weighted score per letter, an overall score, and a proficiency tier, all persisted to a single JSON store."
)]
struct Cli {
    /// path to the user store (defaults to ~/.local/state/fingerspell/users.json)
    #[clap(long)]
    db: Option<PathBuf>,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// create a new learner profile
    Add {
        name: String,

        /// starting proficiency tier
        #[clap(long, value_enum, default_value_t = TierArg::Beginner)]
        tier: TierArg,
    },

    /// delete a learner profile
    Remove { name: String },

    /// list learner profiles with tier and overall score
    List,

    /// show one learner's per-letter progress
    Show { name: String },

    /// run an interactive lesson, judging each attempt by hand
    Lesson {
        name: String,

        /// practice only the first five letters
        #[clap(long)]
        short: bool,
    },

    /// record pre-judged results, e.g. `record zoe a=1 b=0`
    Record { name: String, results: Vec<String> },

    /// print progress as CSV: one learner's breakdown, or the whole roster
    Export { name: Option<String> },
}

#[derive(Debug, Copy, Clone, ValueEnum, strum_macros::Display)]
enum TierArg {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl TierArg {
    fn as_tier(&self) -> Proficiency {
        match self {
            TierArg::Beginner => Proficiency::Beginner,
            TierArg::Intermediate => Proficiency::Intermediate,
            TierArg::Advanced => Proficiency::Advanced,
            TierArg::Expert => Proficiency::Expert,
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let store = match &cli.db {
        Some(path) => JsonFileStore::with_path(path),
        None => JsonFileStore::new(),
    };
    let mut registry = UserRegistry::open(store)?;

    match cli.command {
        Command::Add { name, tier } => {
            let user = registry.create_user(&name, tier.as_tier())?;
            println!("Created {} ({})", user.name(), user.proficiency());
        }
        Command::Remove { name } => {
            registry.delete_user(&name)?;
            println!("Removed {}", name);
        }
        Command::List => {
            if registry.is_empty() {
                println!("No learners yet.");
            }
            for user in registry.users() {
                println!(
                    "{:<20} {:<12} {:>6.1}",
                    user.name(),
                    user.proficiency().to_string(),
                    user.overall_score()
                );
            }
        }
        Command::Show { name } => show_user(&registry, &name)?,
        Command::Lesson { name, short } => run_lesson(&mut registry, &name, short)?,
        Command::Record { name, results } => {
            let outcomes = parse_results(&results)?;
            let user = registry.record_lesson_result(&name, &outcomes)?;
            println!(
                "Recorded {} result(s). Overall score {:.1} ({}).",
                outcomes.len(),
                user.overall_score(),
                user.proficiency()
            );
        }
        Command::Export { name } => {
            let stdout = io::stdout();
            match name {
                Some(name) => {
                    let user = registry
                        .get_user(&name)
                        .ok_or_else(|| RegistryError::NotFound(name.clone()))?;
                    report::user_breakdown(user, stdout.lock())?;
                }
                None => report::roster_summary(registry.users(), stdout.lock())?,
            }
        }
    }

    Ok(())
}

fn show_user<S: UserStore>(
    registry: &UserRegistry<S>,
    name: &str,
) -> Result<(), Box<dyn Error>> {
    let user = registry
        .get_user(name)
        .ok_or_else(|| RegistryError::NotFound(name.to_string()))?;

    println!("Learner: {}", user.name());
    println!(
        "Tier: {}   Overall: {:.1}",
        user.proficiency(),
        user.overall_score()
    );
    if let Some(spread) = util::std_dev(user.percent_scores()) {
        println!("Letter spread (std dev): {:.1}", spread);
    }
    println!();
    println!("letter  attempts  score");
    for symbol in alphabet::letters() {
        println!(
            "  {}     {:>8}  {:>5.1}%",
            symbol,
            user.history(symbol).len(),
            user.percent_score(symbol)
        );
    }
    Ok(())
}

fn run_lesson<S: UserStore>(
    registry: &mut UserRegistry<S>,
    name: &str,
    short: bool,
) -> Result<(), Box<dyn Error>> {
    if registry.get_user(name).is_none() {
        return Err(Box::new(RegistryError::NotFound(name.to_string())));
    }

    let mut plan = if short {
        LessonPlan::short()
    } else {
        LessonPlan::full()
    };
    println!(
        "Starting a {} lesson for {} ({} letters). Answer y/n after each sign; q ends early.",
        if short { "short" } else { "full" },
        name,
        plan.len()
    );

    let stdin = io::stdin();
    let mut outcomes: Vec<(Symbol, Outcome)> = Vec::new();
    while let Some(symbol) = plan.next_symbol() {
        let outcome = loop {
            print!("Sign the letter '{}'. Correct? [y/n/q] ", symbol);
            io::stdout().flush()?;
            let mut line = String::new();
            if stdin.read_line(&mut line)? == 0 {
                break None;
            }
            match line.trim().to_ascii_lowercase().as_str() {
                "y" | "yes" => break Some(Outcome::Correct),
                "n" | "no" => break Some(Outcome::Incorrect),
                "q" | "quit" => break None,
                _ => println!("please answer y, n, or q"),
            }
        };
        match outcome {
            Some(o) => outcomes.push((symbol, o)),
            None => break,
        }
    }

    if outcomes.is_empty() {
        println!("No attempts recorded.");
        return Ok(());
    }

    let correct = outcomes
        .iter()
        .filter(|(_, o)| *o == Outcome::Correct)
        .count();
    let user = registry.record_lesson_result(name, &outcomes)?;
    println!(
        "Lesson over: {}/{} correct. Overall score {:.1} ({}).",
        correct,
        outcomes.len(),
        user.overall_score(),
        user.proficiency()
    );
    Ok(())
}

fn parse_results(results: &[String]) -> Result<Vec<(Symbol, Outcome)>, String> {
    if results.is_empty() {
        return Err("no results given; expected entries like a=1 b=0".to_string());
    }
    let mut outcomes = Vec::with_capacity(results.len());
    for entry in results {
        let (letter, value) = entry
            .split_once('=')
            .ok_or_else(|| format!("malformed result {:?}; expected letter=0|1", entry))?;
        let mut chars = letter.chars();
        let symbol = match (chars.next().and_then(Symbol::from_char), chars.next()) {
            (Some(symbol), None) => symbol,
            _ => return Err(format!("{:?} is not a letter of the alphabet", letter)),
        };
        let outcome = match value {
            "1" => Outcome::Correct,
            "0" => Outcome::Incorrect,
            _ => {
                return Err(format!(
                    "result for '{}' must be 0 or 1, got {:?}",
                    symbol, value
                ))
            }
        };
        outcomes.push((symbol, outcome));
    }
    Ok(outcomes)
}
