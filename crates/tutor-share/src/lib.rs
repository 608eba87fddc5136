//! Deep-link encoding and decoding for tutor exercises.
//!
//! A share link carries enough state to reproduce an exercise exactly on
//! another device. Simple exercises travel as flat query parameters
//! (`?mode=simplify&n=4&d=8`); structurally richer payloads travel as one
//! Base64-encoded JSON blob under a `data` parameter.
//!
//! Decoding is deliberately defensive: links arrive from address bars and
//! QR codes and may have been hand-edited, so every structural or type
//! violation is a typed [`ShareError`] the caller swallows by falling back
//! to a freshly generated exercise.
//!
//! # Example
//!
//! ```rust
//! use tutor_share::{decode, share_url, SharePayload};
//! use url::Url;
//!
//! let base = Url::parse("https://fractionfriends.app/").unwrap();
//! let url = share_url(
//!     &base,
//!     &SharePayload::Simplify {
//!         numerator: 4,
//!         denominator: 8,
//!     },
//! )
//! .unwrap();
//! assert_eq!(url.query(), Some("mode=simplify&n=4&d=8"));
//!
//! let payload = decode(&url).unwrap();
//! assert!(matches!(payload, SharePayload::Simplify { numerator: 4, denominator: 8 }));
//! ```

mod codec;

pub use codec::{decode, decode_for, share_url, strip_query};

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Types
// ============================================================================

/// Errors raised while decoding or encoding a share link.
///
/// None of these are fatal: the caller treats a decode failure as "no link
/// present" and generates a fresh exercise instead.
#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    /// The link has no `mode` parameter.
    #[error("no mode parameter present")]
    MissingMode,

    /// The `mode` parameter is not part of the exercise vocabulary.
    #[error("unknown mode '{0}'")]
    UnknownMode(String),

    /// The link's mode does not match the exercise being seeded.
    #[error("mode '{found}' does not match the active exercise '{expected}'")]
    ModeMismatch {
        /// The exercise kind the caller wanted to seed.
        expected: ExerciseKind,
        /// The kind named by the link.
        found: ExerciseKind,
    },

    /// A required query parameter is absent.
    #[error("missing query parameter '{name}'")]
    MissingParam {
        /// The parameter name.
        name: &'static str,
    },

    /// A numeric query parameter did not parse as a decimal integer.
    #[error("query parameter '{name}' is not a number: '{value}'")]
    InvalidNumber {
        /// The parameter name.
        name: &'static str,
        /// The offending raw value.
        value: String,
    },

    /// A simplification seed was not a proper fraction.
    #[error("{numerator}/{denominator} is not a proper fraction")]
    ImproperFraction {
        /// Decoded numerator.
        numerator: u32,
        /// Decoded denominator.
        denominator: u32,
    },

    /// The `data` parameter was not valid Base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The decoded `data` blob was not a valid payload object.
    #[error("invalid payload JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for share-link operations.
pub type Result<T> = std::result::Result<T, ShareError>;

// ============================================================================
// Exercise kinds and payloads
// ============================================================================

/// The closed vocabulary of shareable exercise kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseKind {
    /// Free exploration, no parameters.
    Explore,
    /// Guided simplification of one fraction.
    Simplify,
    /// Same-denominator addition.
    Addition,
    /// A story problem.
    WordProblems,
}

impl ExerciseKind {
    /// The `mode` parameter value for this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explore => "explore",
            Self::Simplify => "simplify",
            Self::Addition => "addition",
            Self::WordProblems => "word_problems",
        }
    }

    /// Looks a kind up by its `mode` parameter value.
    ///
    /// The vocabulary is closed: anything unrecognized is `None`.
    #[must_use]
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode {
            "explore" => Some(Self::Explore),
            "simplify" => Some(Self::Simplify),
            "addition" => Some(Self::Addition),
            "word_problems" => Some(Self::WordProblems),
            _ => None,
        }
    }
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation named by a shared word problem.
///
/// Local to this crate so the codec stays a leaf dependency; the engine has
/// its own operation type and the front-end maps between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShareOperation {
    /// Combine the parts.
    Add,
    /// Take the second part away.
    Sub,
}

/// The compound-form payload of a shared word problem.
///
/// Every field is required; a blob missing any of them fails to decode.
/// Unknown fields are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordProblemPayload {
    /// The narrative setup.
    pub story: String,
    /// The question asked.
    pub question: String,
    /// Numerator of the first part.
    pub n1: u32,
    /// Denominator of the first part.
    pub d1: u32,
    /// Numerator of the second part.
    pub n2: u32,
    /// Denominator of the second part.
    pub d2: u32,
    /// The operation to perform.
    pub op: ShareOperation,
}

/// Exercise state as carried by a share link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharePayload {
    /// Free exploration; the mode alone is the whole payload.
    Explore,
    /// A simplification exercise seed.
    Simplify {
        /// The numerator to simplify.
        numerator: u32,
        /// The denominator to simplify.
        denominator: u32,
    },
    /// An addition exercise seed.
    Addition {
        /// Numerator of the first part.
        first: u32,
        /// Numerator of the second part.
        second: u32,
        /// The shared denominator.
        denominator: u32,
    },
    /// A full word problem.
    WordProblem(WordProblemPayload),
}

impl SharePayload {
    /// The exercise kind this payload belongs to.
    #[must_use]
    pub const fn kind(&self) -> ExerciseKind {
        match self {
            Self::Explore => ExerciseKind::Explore,
            Self::Simplify { .. } => ExerciseKind::Simplify,
            Self::Addition { .. } => ExerciseKind::Addition,
            Self::WordProblem(_) => ExerciseKind::WordProblems,
        }
    }
}
