//! End-to-end tests for the guided simplification flow.
//!
//! These drive the tutor exactly the way a front-end would: submit
//! answers, wait out the deferred advance (fired directly here, since the
//! delay is the driver's concern) and watch the difficulty adapt.

use std::time::Duration;

use futures::future::{pending, BoxFuture};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tutor_engine::{
    explanation_or_fallback, word_problem_or_fallback, ContentProvider, DifficultyTier, Fraction,
    Step, SubmitOutcome, Tutor, TutorConfig, WordProblem,
};

fn tutor_at(tier: DifficultyTier, seed: u64) -> Tutor<SmallRng> {
    let config = TutorConfig {
        start_tier: tier,
        ..Default::default()
    };
    Tutor::with_rng(config, SmallRng::seed_from_u64(seed))
}

fn accepted(outcome: SubmitOutcome) -> tutor_engine::AdvanceToken {
    match outcome {
        SubmitOutcome::Accepted(token) => token,
        other => panic!("expected Accepted, got {other:?}"),
    }
}

/// Solves the active exercise completely, using the session's own derived
/// answers.
fn solve_current(tutor: &mut Tutor<SmallRng>) {
    let divisor = tutor.session().divisor().to_string();
    let reduced = tutor.session().reduced();

    let token = accepted(tutor.submit_gcd(&divisor));
    assert!(tutor.advance(token));
    assert_eq!(tutor.session().step(), Step::ResultEntry);

    let token = accepted(tutor.submit_result(
        &reduced.numerator.to_string(),
        &reduced.denominator.to_string(),
    ));
    assert!(tutor.advance(token));
    assert_eq!(tutor.session().step(), Step::Complete);
}

#[test]
fn full_walkthrough_raises_difficulty_each_time() {
    let mut tutor = tutor_at(DifficultyTier::Easy, 1);

    solve_current(&mut tutor);
    assert_eq!(tutor.tier(), DifficultyTier::Medium);

    tutor.new_exercise();
    assert_eq!(tutor.session().step(), Step::GcdEntry);
    solve_current(&mut tutor);
    assert_eq!(tutor.tier(), DifficultyTier::Hard);

    // Hard is the ceiling no matter how many more exercises succeed.
    tutor.new_exercise();
    solve_current(&mut tutor);
    assert_eq!(tutor.tier(), DifficultyTier::Hard);
}

#[test]
fn seeded_scenario_four_eighths() {
    let mut tutor = Tutor::seeded(TutorConfig::default(), Fraction::new(4, 8));
    assert_eq!(tutor.session().fraction(), Fraction::new(4, 8));
    assert_eq!(tutor.session().divisor(), 4);
    assert_eq!(tutor.session().reduced(), Fraction::new(1, 2));

    // A merely common divisor is not accepted.
    assert_eq!(tutor.submit_gcd("2"), SubmitOutcome::Rejected);

    let token = accepted(tutor.submit_gcd("4"));
    assert!(tutor.advance(token));

    // The original (unreduced) pair is rejected at the result step.
    assert_eq!(tutor.submit_result("4", "8"), SubmitOutcome::Rejected);

    let before = tutor.tier();
    let token = accepted(tutor.submit_result("1", "2"));
    assert!(tutor.advance(token));
    assert_eq!(tutor.session().step(), Step::Complete);
    assert_eq!(tutor.tier(), before.harder());
}

#[test]
fn easier_escape_hatch_lowers_and_resets() {
    let mut tutor = tutor_at(DifficultyTier::Hard, 2);

    // Get part-way through, then bail out.
    let divisor = tutor.session().divisor().to_string();
    let token = accepted(tutor.submit_gcd(&divisor));

    assert!(tutor.request_easier());
    assert_eq!(tutor.tier(), DifficultyTier::Medium);
    assert_eq!(tutor.session().step(), Step::GcdEntry);
    assert!(DifficultyTier::Medium
        .denominators()
        .contains(&tutor.session().fraction().denominator));

    // The abandoned session's timer firing late must not touch the new one.
    assert!(!tutor.advance(token));
    assert_eq!(tutor.session().step(), Step::GcdEntry);
}

#[test]
fn every_generated_exercise_is_simplifiable() {
    for seed in 0..20 {
        for tier in [
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
        ] {
            let mut tutor = tutor_at(tier, seed);
            for _ in 0..10 {
                let fraction = tutor.session().fraction();
                assert!(fraction.is_proper(), "{tier:?}: {fraction}");
                assert!(
                    fraction.divisor() > 1,
                    "{tier:?}: {fraction} has nothing to simplify"
                );
                solve_current(&mut tutor);
                tutor.new_exercise();
            }
        }
    }
}

#[test]
fn retries_are_unlimited_and_state_is_stable() {
    let mut tutor = Tutor::seeded(TutorConfig::default(), Fraction::new(6, 12));

    for wrong in ["1", "2", "3", "4", "5", "7", "banana", ""] {
        assert_eq!(tutor.submit_gcd(wrong), SubmitOutcome::Rejected);
        assert_eq!(tutor.session().step(), Step::GcdEntry);
    }
    // Still solvable after any number of failures.
    let token = accepted(tutor.submit_gcd("6"));
    assert!(tutor.advance(token));
}

/// A story service that never comes back, as seen from a flaky network.
struct OfflineStoryService;

impl ContentProvider for OfflineStoryService {
    fn explanation<'a>(
        &'a self,
        _topic: &'a str,
        _fraction: Option<Fraction>,
    ) -> BoxFuture<'a, Option<String>> {
        Box::pin(pending())
    }

    fn word_problem(&self) -> BoxFuture<'_, Option<WordProblem>> {
        Box::pin(pending())
    }
}

#[tokio::test(start_paused = true)]
async fn offline_story_service_never_blocks_the_lesson() {
    let timeout = TutorConfig::default().provider_timeout();

    let problem = word_problem_or_fallback(&OfflineStoryService, timeout).await;
    assert!(problem.answer().is_proper());
    assert!(problem.check(problem.answer().numerator, problem.answer().denominator));

    let text = explanation_or_fallback(
        &OfflineStoryService,
        timeout,
        "simplifying fractions",
        Some(Fraction::new(4, 8)),
    )
    .await;
    assert!(!text.is_empty());
}

#[test]
fn deep_linked_already_reduced_fraction_is_survivable() {
    let mut tutor = Tutor::seeded(TutorConfig::default(), Fraction::new(3, 7));
    assert!(tutor.session().is_already_reduced());

    let token = accepted(tutor.submit_gcd("1"));
    assert!(tutor.advance(token));
    let token = accepted(tutor.submit_result("3", "7"));
    assert!(tutor.advance(token));
    assert_eq!(tutor.session().step(), Step::Complete);
}
