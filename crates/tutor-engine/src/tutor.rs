//! The tutor facade: wires the generator, the difficulty controller and the
//! active session together.
//!
//! Control flow per exercise: the controller's current tier parameterizes
//! the generator, the generated fraction seeds a fresh session, and the
//! session's outcomes feed back into the controller (raise on completion,
//! lower via the easier-problem escape hatch). A fraction decoded from a
//! share link short-circuits generation and seeds the session directly.

use std::time::Duration;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::config::TutorConfig;
use crate::difficulty::{DifficultyController, DifficultyTier};
use crate::generator;
use crate::rational::Fraction;
use crate::session::{AdvanceToken, ExerciseSession, Step, SubmitOutcome};

/// Drives adaptive simplification exercises.
#[derive(Debug)]
pub struct Tutor<R: Rng = SmallRng> {
    config: TutorConfig,
    rng: R,
    difficulty: DifficultyController,
    session: ExerciseSession,
}

impl Tutor<SmallRng> {
    /// Creates a tutor with an entropy-seeded random source and a first
    /// exercise at the configured start tier.
    #[must_use]
    pub fn new(config: TutorConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Creates a tutor whose first exercise is an externally supplied
    /// fraction (typically from a share link), bypassing the generator.
    #[must_use]
    pub fn seeded(config: TutorConfig, fraction: Fraction) -> Self {
        Self::build(config, SmallRng::from_entropy(), Some(fraction))
    }
}

impl<R: Rng> Tutor<R> {
    /// Creates a tutor over an explicit random source, for deterministic
    /// runs.
    #[must_use]
    pub fn with_rng(config: TutorConfig, rng: R) -> Self {
        Self::build(config, rng, None)
    }

    fn build(config: TutorConfig, mut rng: R, seed: Option<Fraction>) -> Self {
        let difficulty = DifficultyController::new(config.start_tier);
        let fraction =
            seed.unwrap_or_else(|| generator::generate(difficulty.current(), &mut rng));
        Self {
            config,
            rng,
            difficulty,
            session: ExerciseSession::new(fraction),
        }
    }

    /// The active session.
    #[must_use]
    pub const fn session(&self) -> &ExerciseSession {
        &self.session
    }

    /// The current difficulty tier.
    #[must_use]
    pub const fn tier(&self) -> DifficultyTier {
        self.difficulty.current()
    }

    /// How long the driver should let positive feedback render before
    /// calling [`Tutor::advance`].
    #[must_use]
    pub const fn feedback_delay(&self) -> Duration {
        self.config.feedback_delay()
    }

    /// The configuration this tutor was built with.
    #[must_use]
    pub const fn config(&self) -> &TutorConfig {
        &self.config
    }

    /// Starts a fresh exercise at the current tier, superseding the active
    /// session entirely.
    pub fn new_exercise(&mut self) {
        let fraction = generator::generate(self.difficulty.current(), &mut self.rng);
        self.session = ExerciseSession::new(fraction);
    }

    /// Adopts an externally supplied fraction (typically from a share
    /// link) as the active exercise.
    pub fn adopt(&mut self, fraction: Fraction) {
        tracing::debug!(%fraction, "adopting externally supplied exercise");
        self.session = ExerciseSession::new(fraction);
    }

    /// Submits a divisor answer for the current step.
    pub fn submit_gcd(&mut self, raw: &str) -> SubmitOutcome {
        self.session.submit_gcd(raw)
    }

    /// Submits a reduced-fraction answer for the current step.
    ///
    /// A newly accepted answer raises the difficulty tier one level as a
    /// side effect; submissions ignored by the re-entrancy guard cannot
    /// raise it twice.
    pub fn submit_result(&mut self, raw_numerator: &str, raw_denominator: &str) -> SubmitOutcome {
        let outcome = self
            .session
            .submit_result(raw_numerator, raw_denominator, &mut self.rng);
        if matches!(outcome, SubmitOutcome::Accepted(_)) {
            self.difficulty.raise();
        }
        outcome
    }

    /// Performs a previously scheduled step advance.
    pub fn advance(&mut self, token: AdvanceToken) -> bool {
        self.session.advance(token)
    }

    /// The easier-problem escape hatch.
    ///
    /// Available while the exercise is unsolved: lowers the tier one level
    /// (floored at easy), generates a new fraction at the lowered tier and
    /// resets the whole session. Returns `false` (and does nothing) once
    /// the exercise is complete.
    pub fn request_easier(&mut self) -> bool {
        if self.session.step() == Step::Complete {
            return false;
        }
        self.difficulty.lower();
        self.new_exercise();
        true
    }
}
