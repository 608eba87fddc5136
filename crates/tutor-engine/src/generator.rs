//! Procedural exercise generation.
//!
//! Generation is a pure function of the difficulty tier and the supplied
//! random source: the tier is threaded in as a parameter, never read as
//! ambient state, and every new-exercise request invokes the generator
//! afresh.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::difficulty::DifficultyTier;
use crate::rational::{gcd, Fraction};

/// Denominator used if a tier's pool were ever empty. Pools are const
/// non-empty arrays, so this is unreachable in practice.
const FALLBACK_DENOMINATOR: u32 = 8;

/// Generates a fraction-simplification exercise for the given tier.
///
/// The returned fraction is always proper and never already in lowest
/// terms: the numerator is built as a multiple of a factor shared with the
/// denominator, so the learner always has a real divisor to find.
///
/// The construction: draw a denominator from the tier pool, intersect its
/// proper divisors (2..=denominator/2) with the tier's preferred divisors,
/// pick one uniformly (`Easy` deterministically takes the smallest), then
/// multiply it by a random multiplier that keeps the numerator below the
/// denominator. Denominators with no preferred factor fall back to their
/// smallest proper divisor.
pub fn generate(tier: DifficultyTier, rng: &mut impl Rng) -> Fraction {
    let denominator = tier
        .denominators()
        .choose(rng)
        .copied()
        .unwrap_or(FALLBACK_DENOMINATOR);

    let divisors = proper_divisors(denominator);
    let preferred: Vec<u32> = divisors
        .iter()
        .copied()
        .filter(|v| tier.preferred_divisors().contains(v))
        .collect();

    let factor = if preferred.is_empty() {
        // No preferred factor divides this denominator; any proper divisor
        // still guarantees a common factor of at least 2.
        divisors.first().copied().unwrap_or(2)
    } else if tier == DifficultyTier::Easy {
        preferred.iter().copied().min().unwrap_or(2)
    } else {
        preferred.choose(rng).copied().unwrap_or(2)
    };

    let max_multiplier = ((denominator.saturating_sub(1)) / factor).max(1);
    let multiplier = rng.gen_range(1..=max_multiplier);
    let numerator = (factor * multiplier).min(denominator.saturating_sub(1));

    let fraction = Fraction::new(numerator, denominator);
    tracing::debug!(%tier, %fraction, factor, "generated exercise");
    debug_assert!(gcd(numerator, denominator) > 1);
    fraction
}

/// Divisors `v` of `denominator` with `2 <= v <= denominator / 2`, ascending.
fn proper_divisors(denominator: u32) -> Vec<u32> {
    (2..=denominator / 2)
        .filter(|v| denominator % v == 0)
        .collect()
}
