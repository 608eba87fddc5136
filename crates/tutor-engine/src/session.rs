//! The guided-solution state machine for simplification exercises.
//!
//! A session walks the learner through two checked steps: name the greatest
//! common divisor, then name the reduced fraction. Correct submissions
//! schedule a deferred advance so the positive feedback has time to render;
//! wrong submissions clear the offending input and wait for a retry.
//!
//! The step sequence is `GcdEntry -> ResultEntry -> Complete`, never
//! skipping, with `Complete` terminal until a new fraction is adopted
//! (which replaces the session wholesale).

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::rational::Fraction;

/// Monotonic id source so advance tokens from a superseded session can
/// never match tokens of its replacement.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// Step and Feedback
// ============================================================================

/// Current step of a guided simplification session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Learner must name the greatest common divisor of both terms.
    #[default]
    GcdEntry,
    /// Learner must name the reduced numerator and denominator.
    ResultEntry,
    /// The exercise is solved; only "new problem" remains.
    Complete,
}

impl Step {
    /// Returns `true` if this step is the terminal one.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Result of the last checked submission, for display purposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feedback {
    /// Nothing has been checked since the last transition.
    #[default]
    None,
    /// The last submission was right.
    Correct,
    /// The last submission was wrong; the learner may retry.
    Incorrect,
}

// ============================================================================
// Deferred advance
// ============================================================================

/// Handle for a scheduled step advance.
///
/// A correct submission returns a token; the driver waits the feedback
/// delay, then calls [`ExerciseSession::advance`] with it. Tokens are
/// single-use and scoped to the session that issued them: once consumed,
/// or once the session is superseded, they no longer match, making the
/// timed transition idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceToken {
    session: u64,
    seq: u64,
}

/// Outcome of submitting an answer to the current step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Correct; the returned token advances the session after the feedback
    /// delay.
    Accepted(AdvanceToken),
    /// Wrong or unparsable; input cleared, state unchanged.
    Rejected,
    /// Not checked: the session is complete, mid-advance, or the
    /// submission targeted a different step.
    Ignored,
}

// ============================================================================
// Confetti
// ============================================================================

/// Number of decorative pieces emitted when an exercise is solved.
pub const CONFETTI_COUNT: usize = 50;

/// Upper bound (exclusive) on a piece's fall delay, in seconds.
pub const CONFETTI_MAX_DELAY_SECS: f32 = 2.0;

/// Bounds on a piece's fall duration, in seconds.
pub const CONFETTI_MIN_DURATION_SECS: f32 = 2.0;
/// Upper bound (exclusive) on a piece's fall duration, in seconds.
pub const CONFETTI_MAX_DURATION_SECS: f32 = 5.0;

/// One decorative falling piece. Purely cosmetic; carries no exercise
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfettiPiece {
    /// Horizontal position as a percentage of the viewport, in [0, 100).
    pub x_percent: f32,
    /// Seconds before the piece starts falling, in [0, 2).
    pub delay_secs: f32,
    /// Seconds the fall takes, in [2, 5).
    pub duration_secs: f32,
}

/// Produces a full batch of [`CONFETTI_COUNT`] random pieces.
pub fn confetti_burst<R: Rng>(rng: &mut R) -> Vec<ConfettiPiece> {
    (0..CONFETTI_COUNT)
        .map(|_| ConfettiPiece {
            x_percent: rng.gen_range(0.0..100.0),
            delay_secs: rng.gen_range(0.0..CONFETTI_MAX_DELAY_SECS),
            duration_secs: rng.gen_range(CONFETTI_MIN_DURATION_SECS..CONFETTI_MAX_DURATION_SECS),
        })
        .collect()
}

// ============================================================================
// ExerciseSession
// ============================================================================

/// State for one guided simplification exercise.
///
/// Created fresh whenever a fraction is adopted (generated or decoded from
/// a share link) and replaced in full for the next exercise.
#[derive(Debug, Clone)]
pub struct ExerciseSession {
    id: u64,
    fraction: Fraction,
    divisor: u32,
    reduced: Fraction,
    step: Step,
    feedback: Feedback,
    gcd_input: String,
    result_num_input: String,
    result_den_input: String,
    pending_advance: Option<AdvanceToken>,
    next_seq: u64,
    confetti: Vec<ConfettiPiece>,
    started_at: DateTime<Utc>,
}

impl ExerciseSession {
    /// Starts a session over the given fraction at the `GcdEntry` step.
    #[must_use]
    pub fn new(fraction: Fraction) -> Self {
        Self {
            id: NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed),
            fraction,
            divisor: fraction.divisor(),
            reduced: fraction.reduced(),
            step: Step::GcdEntry,
            feedback: Feedback::None,
            gcd_input: String::new(),
            result_num_input: String::new(),
            result_den_input: String::new(),
            pending_advance: None,
            next_seq: 0,
            confetti: Vec::new(),
            started_at: Utc::now(),
        }
    }

    /// The fraction being simplified.
    #[must_use]
    pub const fn fraction(&self) -> Fraction {
        self.fraction
    }

    /// The greatest common divisor the learner must find.
    #[must_use]
    pub const fn divisor(&self) -> u32 {
        self.divisor
    }

    /// The fraction in lowest terms.
    #[must_use]
    pub const fn reduced(&self) -> Fraction {
        self.reduced
    }

    /// The current step.
    #[must_use]
    pub const fn step(&self) -> Step {
        self.step
    }

    /// Feedback from the most recent checked submission.
    #[must_use]
    pub const fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// The raw divisor input buffer.
    #[must_use]
    pub fn gcd_input(&self) -> &str {
        &self.gcd_input
    }

    /// The raw reduced-fraction input buffers (numerator, denominator).
    #[must_use]
    pub fn result_input(&self) -> (&str, &str) {
        (&self.result_num_input, &self.result_den_input)
    }

    /// Token of the advance currently awaiting its delay, if any.
    #[must_use]
    pub const fn pending_advance(&self) -> Option<AdvanceToken> {
        self.pending_advance
    }

    /// Decorative pieces emitted by the completing submission.
    #[must_use]
    pub fn confetti(&self) -> &[ConfettiPiece] {
        &self.confetti
    }

    /// When this session was created.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns `true` if the adopted fraction was already in simplest form.
    ///
    /// The generator never produces such a fraction, but a hand-edited
    /// share link can. The session still runs (the correct divisor answer
    /// is 1); the front-end should surface an informational notice.
    #[must_use]
    pub const fn is_already_reduced(&self) -> bool {
        self.divisor <= 1
    }

    /// Checks a divisor submission against the true greatest common
    /// divisor.
    ///
    /// Only the exact gcd is accepted; a common-but-not-greatest divisor is
    /// wrong. Unparsable input counts as a wrong answer, not an error. A
    /// submission made while an advance is pending, or outside the
    /// `GcdEntry` step, is ignored.
    pub fn submit_gcd(&mut self, raw: &str) -> SubmitOutcome {
        if self.step != Step::GcdEntry || self.pending_advance.is_some() {
            return SubmitOutcome::Ignored;
        }

        self.gcd_input = raw.trim().to_string();
        match self.gcd_input.parse::<u32>() {
            Ok(candidate) if candidate == self.divisor => {
                self.feedback = Feedback::Correct;
                SubmitOutcome::Accepted(self.schedule_advance())
            }
            _ => {
                tracing::debug!(input = %self.gcd_input, "divisor submission rejected");
                self.feedback = Feedback::Incorrect;
                self.gcd_input.clear();
                SubmitOutcome::Rejected
            }
        }
    }

    /// Checks a reduced-fraction submission.
    ///
    /// Both terms must match the reduced form exactly; an equal-but-
    /// unreduced pair is rejected. On success a confetti batch is emitted
    /// and an advance to `Complete` is scheduled. Mirrors
    /// [`ExerciseSession::submit_gcd`] for ignoring and rejection rules.
    pub fn submit_result<R: Rng>(
        &mut self,
        raw_numerator: &str,
        raw_denominator: &str,
        rng: &mut R,
    ) -> SubmitOutcome {
        if self.step != Step::ResultEntry || self.pending_advance.is_some() {
            return SubmitOutcome::Ignored;
        }

        self.result_num_input = raw_numerator.trim().to_string();
        self.result_den_input = raw_denominator.trim().to_string();

        let parsed = (
            self.result_num_input.parse::<u32>(),
            self.result_den_input.parse::<u32>(),
        );
        match parsed {
            (Ok(n), Ok(d)) if n == self.reduced.numerator && d == self.reduced.denominator => {
                self.feedback = Feedback::Correct;
                self.confetti = confetti_burst(rng);
                SubmitOutcome::Accepted(self.schedule_advance())
            }
            _ => {
                tracing::debug!(
                    numerator = %self.result_num_input,
                    denominator = %self.result_den_input,
                    "reduced-fraction submission rejected"
                );
                self.feedback = Feedback::Incorrect;
                self.result_num_input.clear();
                self.result_den_input.clear();
                SubmitOutcome::Rejected
            }
        }
    }

    /// Performs the deferred transition for a previously accepted
    /// submission.
    ///
    /// Returns `true` if the token matched and the session advanced. A
    /// stale or foreign token is a no-op, so firing the same timer twice
    /// (or after a reset) cannot double-advance.
    pub fn advance(&mut self, token: AdvanceToken) -> bool {
        if self.pending_advance != Some(token) {
            return false;
        }
        self.pending_advance = None;
        self.feedback = Feedback::None;
        self.step = match self.step {
            Step::GcdEntry => Step::ResultEntry,
            Step::ResultEntry | Step::Complete => Step::Complete,
        };
        true
    }

    fn schedule_advance(&mut self) -> AdvanceToken {
        let token = AdvanceToken {
            session: self.id,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending_advance = Some(token);
        token
    }
}

// ============================================================================
// Tests
// ============================================================================
