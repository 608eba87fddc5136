//! Fraction Tutor CLI
//!
//! Terminal front-end for the adaptive simplification tutor. Runs guided
//! exercises, serves story problems and the addition playground, and emits
//! share links that reproduce the current exercise elsewhere.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tokio::time::sleep;
use tracing_subscriber::EnvFilter;
use tutor_engine::{
    explanation_or_fallback, word_problem_or_fallback, AdditionExercise, CatalogProvider,
    DifficultyTier, Fraction, InputPolicy, Operation, Step, SubmitOutcome, Tutor, TutorConfig,
    WordProblem,
};
use tutor_share::{
    decode, share_url, strip_query, SharePayload, ShareOperation, WordProblemPayload,
};
use url::Url;

/// Starting tier override for the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum TierArg {
    /// Small denominators.
    Easy,
    /// Mid-sized denominators.
    Medium,
    /// Large denominators.
    Hard,
}

impl From<TierArg> for DifficultyTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Easy => Self::Easy,
            TierArg::Medium => Self::Medium,
            TierArg::Hard => Self::Hard,
        }
    }
}

/// Fraction Tutor - adaptive simplification practice
///
/// Generates fraction exercises tuned to a difficulty tier, checks each
/// solution step, and adapts the tier to the learner's performance.
#[derive(Parser, Debug)]
#[command(name = "tutor")]
#[command(version, about, long_about = None)]
struct Args {
    /// A share link to reproduce an exercise from
    #[arg(value_name = "LINK")]
    link: Option<String>,

    /// Path to configuration file (default: tutor.json in current directory)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Override the starting difficulty tier
    #[arg(short, long, value_enum)]
    tier: Option<TierArg>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let mut config = match args.config.as_deref() {
        Some(path) => TutorConfig::load_from_file(std::path::Path::new(path))?,
        None => TutorConfig::load()?,
    };
    if let Some(tier) = args.tier {
        config.start_tier = tier.into();
    }
    config.validate()?;

    let base = Url::parse(&config.share_base_url)?;
    let provider = CatalogProvider;

    // A pasted share link short-circuits generation for its exercise kind.
    // Anything unusable is silently ignored in favor of a fresh exercise.
    let seed = args.link.as_deref().and_then(seed_payload);
    let mut tutor = if let Some(SharePayload::Simplify {
        numerator,
        denominator,
    }) = seed
    {
        Tutor::seeded(config.clone(), Fraction::new(numerator, denominator))
    } else {
        match seed {
            Some(SharePayload::Addition {
                first,
                second,
                denominator,
            }) => {
                let policy = if config.clamp_addition_input {
                    InputPolicy::Clamp
                } else {
                    InputPolicy::Reject
                };
                match AdditionExercise::from_parts(first, second, denominator, policy) {
                    Some(exercise) => run_addition(exercise, &base)?,
                    None => tracing::debug!("addition link out of range; ignoring"),
                }
            }
            Some(SharePayload::WordProblem(payload)) => {
                run_word_problem(problem_from_payload(payload), &base)?;
            }
            _ => {}
        }
        Tutor::new(config.clone())
    };

    println!("Welcome to Fraction Friends! Difficulty: {}", tutor.tier());
    run_guided(&mut tutor, &provider, &base).await
}

/// Parses and decodes a pasted share link, returning its payload if usable.
fn seed_payload(raw_link: &str) -> Option<SharePayload> {
    let url = match Url::parse(raw_link) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!(error = %e, "link is not a URL; ignoring");
            return None;
        }
    };
    match decode(&url) {
        Ok(payload) => {
            // The query has done its job; a copied link must not re-seed
            // later navigation.
            let cleaned = strip_query(&url);
            tracing::debug!(%cleaned, "seeded exercise from share link");
            Some(payload)
        }
        Err(e) => {
            tracing::debug!(error = %e, "share link unusable; generating instead");
            None
        }
    }
}

// ============================================================================
// Guided simplification loop
// ============================================================================

async fn run_guided(
    tutor: &mut Tutor,
    provider: &CatalogProvider,
    base: &Url,
) -> anyhow::Result<()> {
    loop {
        match tutor.session().step() {
            Step::GcdEntry => {
                let fraction = tutor.session().fraction();
                println!();
                println!("Simplify {}  {}", fraction, bar(fraction));
                if tutor.session().is_already_reduced() {
                    println!("(This fraction is already in simplest form!)");
                }
                let Some(line) = prompt("What number divides top and bottom? (easier/share/story/why/quit): ")?
                else {
                    return Ok(());
                };
                match line.as_str() {
                    "quit" => return Ok(()),
                    "easier" => {
                        if tutor.request_easier() {
                            println!("Okay, something friendlier. Difficulty: {}", tutor.tier());
                        }
                    }
                    "share" => print_share_link(base, tutor.session().fraction())?,
                    "story" => {
                        let problem = word_problem_or_fallback(
                            provider,
                            tutor.config().provider_timeout(),
                        )
                        .await;
                        run_word_problem(problem, base)?;
                    }
                    "why" => {
                        let text = explanation_or_fallback(
                            provider,
                            tutor.config().provider_timeout(),
                            "simplifying fractions",
                            Some(tutor.session().fraction()),
                        )
                        .await;
                        println!("🦉 {text}");
                    }
                    answer => match tutor.submit_gcd(answer) {
                        SubmitOutcome::Accepted(token) => {
                            println!("Correct! Both sides divide by {answer}.");
                            sleep(tutor.feedback_delay()).await;
                            tutor.advance(token);
                        }
                        SubmitOutcome::Rejected => {
                            println!("Not quite - try another number (or type 'easier').");
                        }
                        SubmitOutcome::Ignored => {}
                    },
                }
            }
            Step::ResultEntry => {
                let Some(line) =
                    prompt("Now type the simplified fraction as `top bottom`: ")?
                else {
                    return Ok(());
                };
                if line == "quit" {
                    return Ok(());
                }
                if line == "easier" {
                    if tutor.request_easier() {
                        println!("Okay, something friendlier. Difficulty: {}", tutor.tier());
                    }
                    continue;
                }
                let mut parts = line.split_whitespace();
                let (n, d) = (
                    parts.next().unwrap_or_default(),
                    parts.next().unwrap_or_default(),
                );
                match tutor.submit_result(n, d) {
                    SubmitOutcome::Accepted(token) => {
                        println!(
                            "🎉 {} confetti pieces for you! Difficulty is now {}.",
                            tutor.session().confetti().len(),
                            tutor.tier()
                        );
                        sleep(tutor.feedback_delay()).await;
                        tutor.advance(token);
                    }
                    SubmitOutcome::Rejected => {
                        println!("Not quite - remember to use the smallest numbers.");
                    }
                    SubmitOutcome::Ignored => {}
                }
            }
            Step::Complete => {
                let session = tutor.session();
                println!(
                    "{} in simplest form is {}.",
                    session.fraction(),
                    session.reduced()
                );
                let Some(line) = prompt("Press enter for a new problem (or quit): ")? else {
                    return Ok(());
                };
                if line == "quit" {
                    return Ok(());
                }
                tutor.new_exercise();
            }
        }
    }
}

fn print_share_link(base: &Url, fraction: Fraction) -> anyhow::Result<()> {
    let url = share_url(
        base,
        &SharePayload::Simplify {
            numerator: fraction.numerator,
            denominator: fraction.denominator,
        },
    )?;
    println!("Share this exercise: {url}");
    Ok(())
}

// ============================================================================
// Word problems
// ============================================================================

fn run_word_problem(problem: WordProblem, base: &Url) -> anyhow::Result<()> {
    println!();
    println!("📖 {}", problem.story);
    println!("   {}", problem.question);
    println!(
        "   First part: {}   Second part: {}",
        problem.first(),
        problem.second()
    );

    loop {
        let Some(line) = prompt("Your answer as `top bottom` (share/skip): ")? else {
            return Ok(());
        };
        match line.as_str() {
            "skip" => return Ok(()),
            "share" => {
                let url = share_url(
                    base,
                    &SharePayload::WordProblem(payload_from_problem(&problem)),
                )?;
                println!("Share this story: {url}");
            }
            answer => {
                let mut parts = answer.split_whitespace();
                let n = parts.next().unwrap_or_default().parse::<u32>();
                let d = parts.next().unwrap_or_default().parse::<u32>();
                match (n, d) {
                    (Ok(n), Ok(d)) if problem.check(n, d) => {
                        println!("🎉 Great job! {} is exactly right.", problem.answer());
                        return Ok(());
                    }
                    _ => println!("Not quite! Try counting the parts again."),
                }
            }
        }
    }
}

fn problem_from_payload(payload: WordProblemPayload) -> WordProblem {
    WordProblem {
        story: payload.story,
        question: payload.question,
        n1: payload.n1,
        d1: payload.d1,
        n2: payload.n2,
        d2: payload.d2,
        op: match payload.op {
            ShareOperation::Add => Operation::Add,
            ShareOperation::Sub => Operation::Sub,
        },
    }
}

fn payload_from_problem(problem: &WordProblem) -> WordProblemPayload {
    WordProblemPayload {
        story: problem.story.clone(),
        question: problem.question.clone(),
        n1: problem.n1,
        d1: problem.d1,
        n2: problem.n2,
        d2: problem.d2,
        op: match problem.op {
            Operation::Add => ShareOperation::Add,
            Operation::Sub => ShareOperation::Sub,
        },
    }
}

// ============================================================================
// Addition playground
// ============================================================================

fn run_addition(mut exercise: AdditionExercise, base: &Url) -> anyhow::Result<()> {
    println!();
    println!("🍕 Pizza party! Combine the slices.");
    print_addition(&exercise);

    loop {
        let Some(line) =
            prompt("Commands: a <n> | b <n> | tap <region> | + | - | share | done: ")?
        else {
            return Ok(());
        };
        let mut parts = line.split_whitespace();
        match (parts.next(), parts.next()) {
            (Some("done"), _) => return Ok(()),
            (Some("+"), _) => exercise.widen(),
            (Some("-"), _) => exercise.narrow(),
            (Some("a"), Some(n)) => {
                if let Ok(n) = n.parse() {
                    if !exercise.set_first(n) {
                        println!("That many slices won't fit!");
                    }
                }
            }
            (Some("b"), Some(n)) => {
                if let Ok(n) = n.parse() {
                    if !exercise.set_second(n) {
                        println!("That many slices won't fit!");
                    }
                }
            }
            (Some("tap"), Some(region)) => {
                if let Ok(region) = region.parse() {
                    if !exercise.click_first(region) {
                        println!("That slice won't fit!");
                    }
                }
            }
            (Some("share"), _) => {
                let url = share_url(
                    base,
                    &SharePayload::Addition {
                        first: exercise.first().numerator,
                        second: exercise.second().numerator,
                        denominator: exercise.denominator(),
                    },
                )?;
                println!("Share this exercise: {url}");
            }
            _ => println!("Unrecognized command."),
        }
        print_addition(&exercise);
        if exercise.is_whole() {
            println!("🎉 You made a whole pizza!");
        }
    }
}

fn print_addition(exercise: &AdditionExercise) {
    println!(
        "{} + {} = {}  {}",
        exercise.first(),
        exercise.second(),
        exercise.sum(),
        bar(exercise.sum())
    );
}

// ============================================================================
// Terminal helpers
// ============================================================================

/// Renders a fraction as a filled/empty bar.
fn bar(fraction: Fraction) -> String {
    let filled = fraction.numerator.min(fraction.denominator) as usize;
    let total = fraction.denominator as usize;
    let mut out = String::with_capacity(total + 2);
    out.push('[');
    for i in 0..total {
        out.push(if i < filled { '#' } else { '.' });
    }
    out.push(']');
    out
}

/// Prints a prompt and reads one trimmed line; `None` means end of input.
fn prompt(text: &str) -> anyhow::Result<Option<String>> {
    print!("{text}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
