//! Same-denominator addition exercise.
//!
//! Two numerators over a shared, adjustable denominator; the learner builds
//! each part by typing or by clicking diagram regions, and the exercise
//! reports the combined total. The invariant throughout is
//! `first + second <= denominator`.

use crate::rational::{fill_after_click, Fraction};

/// Smallest allowed shared denominator.
pub const MIN_SLICES: u32 = 2;
/// Largest allowed shared denominator.
pub const MAX_SLICES: u32 = 12;

/// How out-of-capacity numerator input is handled.
///
/// The interactive front-end historically clamps typed numerators into the
/// remaining capacity rather than rejecting them; both behaviors are
/// supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPolicy {
    /// Oversized input is reduced to the largest value that fits.
    Clamp,
    /// Oversized input is refused and the current value kept.
    Reject,
}

/// An addition exercise over a shared denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdditionExercise {
    denominator: u32,
    first: u32,
    second: u32,
    policy: InputPolicy,
}

impl Default for AdditionExercise {
    /// The traditional opening position: 1/4 + 2/4, clamping input.
    fn default() -> Self {
        Self {
            denominator: 4,
            first: 1,
            second: 2,
            policy: InputPolicy::Clamp,
        }
    }
}

impl AdditionExercise {
    /// Creates an exercise with both parts at one slice each.
    ///
    /// The denominator is brought into `[MIN_SLICES, MAX_SLICES]`.
    #[must_use]
    pub fn new(denominator: u32, policy: InputPolicy) -> Self {
        Self {
            denominator: denominator.clamp(MIN_SLICES, MAX_SLICES),
            first: 1,
            second: 1,
            policy,
        }
    }

    /// Restores an exercise from explicit parts, e.g. a decoded share
    /// link.
    ///
    /// Returns `None` if the denominator is out of range or the parts
    /// exceed it.
    #[must_use]
    pub const fn from_parts(
        first: u32,
        second: u32,
        denominator: u32,
        policy: InputPolicy,
    ) -> Option<Self> {
        if denominator < MIN_SLICES || denominator > MAX_SLICES {
            return None;
        }
        if first.saturating_add(second) > denominator {
            return None;
        }
        Some(Self {
            denominator,
            first,
            second,
            policy,
        })
    }

    /// The shared denominator.
    #[must_use]
    pub const fn denominator(&self) -> u32 {
        self.denominator
    }

    /// The first part.
    #[must_use]
    pub const fn first(&self) -> Fraction {
        Fraction::new(self.first, self.denominator)
    }

    /// The second part.
    #[must_use]
    pub const fn second(&self) -> Fraction {
        Fraction::new(self.second, self.denominator)
    }

    /// The combined total.
    #[must_use]
    pub const fn sum(&self) -> Fraction {
        Fraction::new(self.first + self.second, self.denominator)
    }

    /// Returns `true` if the parts combine to exactly one whole.
    #[must_use]
    pub const fn is_whole(&self) -> bool {
        self.first + self.second == self.denominator
    }

    /// Sets the first numerator, subject to the input policy.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_first(&mut self, value: u32) -> bool {
        let capacity = self.denominator - self.second;
        let next = match self.policy {
            InputPolicy::Clamp => value.min(capacity),
            InputPolicy::Reject if value > capacity => return false,
            InputPolicy::Reject => value,
        };
        let changed = next != self.first;
        self.first = next;
        changed
    }

    /// Sets the second numerator, subject to the input policy.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_second(&mut self, value: u32) -> bool {
        let capacity = self.denominator - self.first;
        let next = match self.policy {
            InputPolicy::Clamp => value.min(capacity),
            InputPolicy::Reject if value > capacity => return false,
            InputPolicy::Reject => value,
        };
        let changed = next != self.second;
        self.second = next;
        changed
    }

    /// Applies a diagram click on the first part.
    ///
    /// The click maps through the usual toggle rule; the update is dropped
    /// if the result would overflow the denominator.
    pub fn click_first(&mut self, region: u32) -> bool {
        let next = fill_after_click(region, self.first);
        if next.saturating_add(self.second) > self.denominator {
            return false;
        }
        self.first = next;
        true
    }

    /// Applies a diagram click on the second part.
    pub fn click_second(&mut self, region: u32) -> bool {
        let next = fill_after_click(region, self.second);
        if self.first.saturating_add(next) > self.denominator {
            return false;
        }
        self.second = next;
        true
    }

    /// Adds a slice to the shared denominator, capped at [`MAX_SLICES`].
    pub fn widen(&mut self) {
        self.denominator = (self.denominator + 1).min(MAX_SLICES);
    }

    /// Removes a slice from the shared denominator, floored at
    /// [`MIN_SLICES`]. The parts are squeezed to keep fitting.
    pub fn narrow(&mut self) {
        self.denominator = self.denominator.saturating_sub(1).max(MIN_SLICES);
        self.first = self.first.min(self.denominator);
        self.second = self.second.min(self.denominator - self.first);
    }

    /// Resets both parts to one slice each.
    pub fn reset_parts(&mut self) {
        self.first = 1;
        self.second = 1;
    }
}
