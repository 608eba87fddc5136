//! Difficulty tiers and the controller that owns the current tier.
//!
//! The tier is session-lifetime state with exactly two mutation paths:
//! `raise()` on a completed exercise and `lower()` when the learner asks for
//! an easier problem. The problem generator reads the tier as a parameter
//! and never mutates it.

use serde::{Deserialize, Serialize};

/// A named difficulty level controlling the generator's denominator and
/// divisor pools.
///
/// Tiers are ordered: `Easy < Medium < Hard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum DifficultyTier {
    /// Small denominators, smallest-divisor targeting.
    Easy,
    /// Mid-sized denominators with a broader divisor pool (default).
    #[default]
    Medium,
    /// Large denominators including ones whose only factors are awkward.
    Hard,
}

impl DifficultyTier {
    /// Denominators an exercise at this tier may use.
    ///
    /// Every entry is composite, so a proper numerator sharing a factor
    /// greater than 1 with it always exists.
    #[must_use]
    pub const fn denominators(self) -> &'static [u32] {
        match self {
            Self::Easy => &[4, 6, 8, 10],
            Self::Medium => &[8, 10, 12, 15, 16, 18],
            Self::Hard => &[12, 16, 18, 20, 21, 24],
        }
    }

    /// Common-divisor values the generator prefers to bake into the
    /// numerator at this tier.
    #[must_use]
    pub const fn preferred_divisors(self) -> &'static [u32] {
        match self {
            Self::Easy => &[2, 3],
            Self::Medium => &[2, 3, 4, 5],
            Self::Hard => &[3, 4, 6, 7, 8],
        }
    }

    /// The next tier up; `Hard` stays `Hard`.
    #[must_use]
    pub const fn harder(self) -> Self {
        match self {
            Self::Easy => Self::Medium,
            Self::Medium | Self::Hard => Self::Hard,
        }
    }

    /// The next tier down; `Easy` stays `Easy`.
    #[must_use]
    pub const fn easier(self) -> Self {
        match self {
            Self::Easy | Self::Medium => Self::Easy,
            Self::Hard => Self::Medium,
        }
    }

    /// Parses a string into a `DifficultyTier`, case-insensitively.
    fn from_str_case_insensitive(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl std::fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Easy => write!(f, "easy"),
            Self::Medium => write!(f, "medium"),
            Self::Hard => write!(f, "hard"),
        }
    }
}

impl<'de> Deserialize<'de> for DifficultyTier {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str_case_insensitive(&s).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid difficulty tier '{s}': expected one of 'easy', 'medium', 'hard'"
            ))
        })
    }
}

impl Serialize for DifficultyTier {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Single writer for the session's difficulty tier.
///
/// The controller is the only place the tier changes; the state machine
/// calls `raise()` on its success path and `lower()` from the
/// easier-problem escape hatch.
#[derive(Debug, Clone, Copy)]
pub struct DifficultyController {
    tier: DifficultyTier,
}

impl Default for DifficultyController {
    fn default() -> Self {
        Self::new(DifficultyTier::default())
    }
}

impl DifficultyController {
    /// Creates a controller starting at the given tier.
    #[must_use]
    pub const fn new(tier: DifficultyTier) -> Self {
        Self { tier }
    }

    /// The current tier.
    #[must_use]
    pub const fn current(&self) -> DifficultyTier {
        self.tier
    }

    /// Moves one tier up; a no-op at `Hard`.
    pub fn raise(&mut self) {
        let next = self.tier.harder();
        if next != self.tier {
            tracing::debug!(from = %self.tier, to = %next, "difficulty raised");
            self.tier = next;
        }
    }

    /// Moves one tier down; a no-op at `Easy`.
    pub fn lower(&mut self) {
        let next = self.tier.easier();
        if next != self.tier {
            tracing::debug!(from = %self.tier, to = %next, "difficulty lowered");
            self.tier = next;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_default_is_medium() {
        assert_eq!(DifficultyTier::default(), DifficultyTier::Medium);
    }

    #[test]
    fn test_tier_ordering() {
        assert!(DifficultyTier::Easy < DifficultyTier::Medium);
        assert!(DifficultyTier::Medium < DifficultyTier::Hard);
    }

    #[test]
    fn test_harder_caps_at_hard() {
        assert_eq!(DifficultyTier::Easy.harder(), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::Medium.harder(), DifficultyTier::Hard);
        assert_eq!(DifficultyTier::Hard.harder(), DifficultyTier::Hard);
    }

    #[test]
    fn test_easier_floors_at_easy() {
        assert_eq!(DifficultyTier::Hard.easier(), DifficultyTier::Medium);
        assert_eq!(DifficultyTier::Medium.easier(), DifficultyTier::Easy);
        assert_eq!(DifficultyTier::Easy.easier(), DifficultyTier::Easy);
    }

    #[test]
    fn test_denominator_pools_are_composite() {
        for tier in [
            DifficultyTier::Easy,
            DifficultyTier::Medium,
            DifficultyTier::Hard,
        ] {
            for &den in tier.denominators() {
                let has_factor = (2..den).any(|v| den % v == 0);
                assert!(has_factor, "{tier} denominator {den} is prime");
            }
        }
    }

    #[test]
    fn test_serialization() {
        assert_eq!(
            serde_json::to_string(&DifficultyTier::Easy).unwrap(),
            "\"easy\""
        );
        assert_eq!(
            serde_json::to_string(&DifficultyTier::Medium).unwrap(),
            "\"medium\""
        );
        assert_eq!(
            serde_json::to_string(&DifficultyTier::Hard).unwrap(),
            "\"hard\""
        );
    }

    #[test]
    fn test_deserialization_case_insensitive() {
        let tier: DifficultyTier = serde_json::from_str("\"easy\"").unwrap();
        assert_eq!(tier, DifficultyTier::Easy);

        let tier: DifficultyTier = serde_json::from_str("\"HARD\"").unwrap();
        assert_eq!(tier, DifficultyTier::Hard);

        let tier: DifficultyTier = serde_json::from_str("\"Medium\"").unwrap();
        assert_eq!(tier, DifficultyTier::Medium);
    }

    #[test]
    fn test_deserialization_rejects_unknown() {
        let result: std::result::Result<DifficultyTier, _> =
            serde_json::from_str("\"extreme\"");
        assert!(result.is_err());
        let err = result.unwrap_err().to_string();
        assert!(err.contains("invalid difficulty tier"));
        assert!(err.contains("extreme"));
    }

    #[test]
    fn test_controller_raise_monotonic() {
        let mut controller = DifficultyController::default();
        assert_eq!(controller.current(), DifficultyTier::Medium);

        for _ in 0..10 {
            controller.raise();
        }
        assert_eq!(controller.current(), DifficultyTier::Hard);
    }

    #[test]
    fn test_controller_lower_monotonic() {
        let mut controller = DifficultyController::new(DifficultyTier::Hard);

        for _ in 0..10 {
            controller.lower();
        }
        assert_eq!(controller.current(), DifficultyTier::Easy);
    }

    #[test]
    fn test_controller_round_trip() {
        let mut controller = DifficultyController::new(DifficultyTier::Easy);
        controller.raise();
        assert_eq!(controller.current(), DifficultyTier::Medium);
        controller.lower();
        assert_eq!(controller.current(), DifficultyTier::Easy);
    }
}
