//! Word problems: story-based exercises over two same-denominator
//! fractions.
//!
//! The tutor treats the problem source as an opaque provider (see
//! [`crate::provider`]); this module owns the problem shape, the answer
//! check, and the built-in catalog used when no external source responds.

use serde::{Deserialize, Serialize};

use crate::rational::Fraction;

/// The arithmetic operation a word problem asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Combine the two parts.
    Add,
    /// Take the second part away from the first.
    Sub,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "add"),
            Self::Sub => write!(f, "sub"),
        }
    }
}

/// A story problem over two fractions sharing a denominator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProblem {
    /// The narrative setup.
    pub story: String,
    /// The question the learner answers.
    pub question: String,
    /// Numerator of the first part.
    pub n1: u32,
    /// Denominator of the first part.
    pub d1: u32,
    /// Numerator of the second part.
    pub n2: u32,
    /// Denominator of the second part.
    pub d2: u32,
    /// Whether the parts are combined or subtracted.
    pub op: Operation,
}

impl WordProblem {
    /// The first part as a fraction.
    #[must_use]
    pub const fn first(&self) -> Fraction {
        Fraction::new(self.n1, self.d1)
    }

    /// The second part as a fraction.
    #[must_use]
    pub const fn second(&self) -> Fraction {
        Fraction::new(self.n2, self.d2)
    }

    /// The expected answer, over the first part's denominator.
    ///
    /// Subtraction saturates at zero so a malformed problem cannot
    /// underflow.
    #[must_use]
    pub const fn answer(&self) -> Fraction {
        let numerator = match self.op {
            Operation::Add => self.n1 + self.n2,
            Operation::Sub => self.n1.saturating_sub(self.n2),
        };
        Fraction::new(numerator, self.d1)
    }

    /// Checks a learner answer for exact equality with [`Self::answer`].
    ///
    /// No equivalent-fraction credit: the denominator must be the
    /// problem's own denominator.
    #[must_use]
    pub const fn check(&self, numerator: u32, denominator: u32) -> bool {
        let answer = self.answer();
        numerator == answer.numerator && denominator == answer.denominator
    }
}

// ============================================================================
// Built-in catalog
// ============================================================================

/// A catalog entry; promoted to an owned [`WordProblem`] on selection.
pub(crate) struct CatalogProblem {
    pub(crate) story: &'static str,
    pub(crate) question: &'static str,
    pub(crate) n1: u32,
    pub(crate) d1: u32,
    pub(crate) n2: u32,
    pub(crate) d2: u32,
    pub(crate) op: Operation,
}

impl From<&CatalogProblem> for WordProblem {
    fn from(entry: &CatalogProblem) -> Self {
        Self {
            story: entry.story.to_string(),
            question: entry.question.to_string(),
            n1: entry.n1,
            d1: entry.d1,
            n2: entry.n2,
            d2: entry.d2,
            op: entry.op,
        }
    }
}

/// Fixed local word problems used whenever the external source is silent.
pub(crate) const WORD_PROBLEM_CATALOG: &[CatalogProblem] = &[
    CatalogProblem {
        story: "A hungry dragon 🐉 found a giant cherry pie. He ate some for breakfast and some for lunch.",
        question: "How much pie did the dragon eat in total?",
        n1: 1, d1: 4, n2: 2, d2: 4, op: Operation::Add,
    },
    CatalogProblem {
        story: "Two aliens 👽 are painting a spaceship. Zorg paints a small part red, and Blip paints another part blue.",
        question: "What fraction of the spaceship is painted now?",
        n1: 2, d1: 6, n2: 3, d2: 6, op: Operation::Add,
    },
    CatalogProblem {
        story: "A wizard 🧙 is mixing a potion. He adds some frog slime and then adds some bat wings.",
        question: "How full is the potion cauldron now?",
        n1: 3, d1: 8, n2: 4, d2: 8, op: Operation::Add,
    },
    CatalogProblem {
        story: "A friendly robot 🤖 is building a tower with colorful blocks. First it uses some blocks, then adds more.",
        question: "What fraction of the tower is built?",
        n1: 2, d1: 5, n2: 2, d2: 5, op: Operation::Add,
    },
    CatalogProblem {
        story: "A cat 🐱 found a big bowl of milk. She drank some in the morning and more in the afternoon.",
        question: "How much milk did the cat drink?",
        n1: 1, d1: 3, n2: 1, d2: 3, op: Operation::Add,
    },
    CatalogProblem {
        story: "A penguin 🐧 is collecting fish for dinner. It caught some fish, then caught a few more.",
        question: "What fraction of fish did the penguin collect?",
        n1: 3, d1: 10, n2: 4, d2: 10, op: Operation::Add,
    },
    CatalogProblem {
        story: "A unicorn 🦄 is decorating a rainbow. It painted one part pink and another part purple.",
        question: "How much of the rainbow is decorated?",
        n1: 2, d1: 7, n2: 3, d2: 7, op: Operation::Add,
    },
    CatalogProblem {
        story: "A monkey 🐵 is sharing bananas with friends. It gave away some bananas, then gave away more.",
        question: "What fraction of bananas did the monkey share?",
        n1: 1, d1: 6, n2: 2, d2: 6, op: Operation::Add,
    },
    CatalogProblem {
        story: "A bear 🐻 is collecting honey from two beehives. It got some honey from the first hive and more from the second.",
        question: "How much honey did the bear collect in total?",
        n1: 2, d1: 9, n2: 4, d2: 9, op: Operation::Add,
    },
    CatalogProblem {
        story: "A dolphin 🐬 is jumping through hoops. It jumped through some hoops, then jumped through more.",
        question: "What fraction of hoops did the dolphin jump through?",
        n1: 2, d1: 8, n2: 2, d2: 8, op: Operation::Add,
    },
    CatalogProblem {
        story: "A bunny 🐰 is planting carrots in a garden. It planted some carrots in one row and more in another row.",
        question: "How much of the garden has carrots?",
        n1: 3, d1: 12, n2: 5, d2: 12, op: Operation::Add,
    },
    CatalogProblem {
        story: "A lion 🦁 is sharing a big meal with the pride. It ate some of the meal, then ate more.",
        question: "What fraction of the meal did the lion eat?",
        n1: 1, d1: 5, n2: 2, d2: 5, op: Operation::Add,
    },
];

/// Fixed local explanations used whenever the external source is silent.
pub(crate) const EXPLANATION_CATALOG: &[&str] = &[
    "Fractions are like sharing a pizza! 🍕 The bottom number is how many slices total, and the top number is how many you eat.",
    "Imagine a chocolate bar! 🍫 If you break it into pieces, each piece is a fraction of the whole bar.",
    "Think of Lego bricks! 🧱 If you have a tower of 4 bricks and take 1 off, you took 1/4 of the tower.",
    "Simplifying is like tidying up! 🧹 We make the numbers smaller, but the amount of cake stays exactly the same.",
    "When we simplify, we're finding the biggest number that divides both the top and bottom evenly! 🎯",
    "It's like reducing a recipe - we use smaller numbers, but the taste (the value) stays the same! 🍰",
    "Think of it like folding paper! 📄 We fold it to make it smaller, but it's still the same piece of paper.",
    "Simplifying fractions is like finding the simplest way to say the same thing! 💬",
    "If you have 4/8 of a pizza, that's the same as 1/2 - half a pizza! 🍕 Both mean the same amount!",
    "We divide both numbers by the same thing to make them smaller, but keep the fraction equal! ✨",
];

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> WordProblem {
        WordProblem {
            story: "A hungry dragon found a pie.".to_string(),
            question: "How much pie in total?".to_string(),
            n1: 1,
            d1: 4,
            n2: 2,
            d2: 4,
            op: Operation::Add,
        }
    }

    #[test]
    fn test_answer_addition() {
        let problem = sample();
        assert_eq!(problem.answer(), Fraction::new(3, 4));
    }

    #[test]
    fn test_answer_subtraction_saturates() {
        let problem = WordProblem {
            op: Operation::Sub,
            n1: 1,
            n2: 3,
            ..sample()
        };
        assert_eq!(problem.answer(), Fraction::new(0, 4));
    }

    #[test]
    fn test_check_requires_exact_terms() {
        let problem = sample();
        assert!(problem.check(3, 4));
        // 6/8 is equal in value but not accepted.
        assert!(!problem.check(6, 8));
        assert!(!problem.check(2, 4));
    }

    #[test]
    fn test_operation_serialization() {
        assert_eq!(serde_json::to_string(&Operation::Add).unwrap(), r#""add""#);
        assert_eq!(serde_json::to_string(&Operation::Sub).unwrap(), r#""sub""#);
    }

    #[test]
    fn test_word_problem_roundtrip() {
        let problem = sample();
        let json = serde_json::to_string(&problem).unwrap();
        let restored: WordProblem = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, problem);
    }

    #[test]
    fn test_catalog_entries_are_well_formed() {
        assert_eq!(WORD_PROBLEM_CATALOG.len(), 12);
        for entry in WORD_PROBLEM_CATALOG {
            let problem = WordProblem::from(entry);
            assert_eq!(problem.d1, problem.d2, "{}", problem.story);
            assert!(problem.answer().is_proper(), "{}", problem.story);
            assert!(!problem.story.is_empty());
            assert!(!problem.question.is_empty());
        }
    }

    #[test]
    fn test_explanation_catalog_is_non_empty() {
        assert_eq!(EXPLANATION_CATALOG.len(), 10);
        assert!(EXPLANATION_CATALOG.iter().all(|s| !s.is_empty()));
    }
}
