//! Query-string codec for share links.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use url::Url;

use crate::{ExerciseKind, Result, ShareError, SharePayload, WordProblemPayload};

/// Query key naming the exercise kind.
const PARAM_MODE: &str = "mode";
/// Query keys for the flat simplification form.
const PARAM_NUMERATOR: &str = "n";
/// Shared denominator key, used by both flat forms.
const PARAM_DENOMINATOR: &str = "d";
/// Query keys for the flat addition form.
const PARAM_FIRST: &str = "n1";
/// Second addition numerator.
const PARAM_SECOND: &str = "n2";
/// Query key carrying a Base64 compound payload.
const PARAM_DATA: &str = "data";

// ============================================================================
// Encoding
// ============================================================================

/// Builds a share link for the given payload on `base`.
///
/// Any query parameters already on `base` are discarded; the result's
/// query string holds exactly the payload and nothing else.
///
/// # Errors
///
/// Returns [`ShareError::Json`] if a compound payload fails to serialize;
/// flat payloads cannot fail.
pub fn share_url(base: &Url, payload: &SharePayload) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair(PARAM_MODE, payload.kind().as_str());
        match payload {
            SharePayload::Explore => {}
            SharePayload::Simplify {
                numerator,
                denominator,
            } => {
                pairs.append_pair(PARAM_NUMERATOR, &numerator.to_string());
                pairs.append_pair(PARAM_DENOMINATOR, &denominator.to_string());
            }
            SharePayload::Addition {
                first,
                second,
                denominator,
            } => {
                pairs.append_pair(PARAM_FIRST, &first.to_string());
                pairs.append_pair(PARAM_SECOND, &second.to_string());
                pairs.append_pair(PARAM_DENOMINATOR, &denominator.to_string());
            }
            SharePayload::WordProblem(problem) => {
                let json = serde_json::to_string(problem)?;
                pairs.append_pair(PARAM_DATA, &BASE64.encode(json));
            }
        }
    }
    Ok(url)
}

/// Returns `url` with its query string removed.
///
/// Called after a link has seeded state (or after any manual navigation)
/// so a stale link cannot re-trigger a decode later in the session.
#[must_use]
pub fn strip_query(url: &Url) -> Url {
    let mut url = url.clone();
    url.set_query(None);
    url
}

// ============================================================================
// Decoding
// ============================================================================

/// Decodes whatever exercise payload `url` carries.
///
/// # Errors
///
/// Returns a [`ShareError`] describing the first structural violation
/// found. Callers treat any error as "no usable link" and fall back to
/// generation.
pub fn decode(url: &Url) -> Result<SharePayload> {
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();
    let mode = params.get(PARAM_MODE).ok_or(ShareError::MissingMode)?;
    let kind =
        ExerciseKind::from_mode(mode).ok_or_else(|| ShareError::UnknownMode(mode.clone()))?;

    let payload = match kind {
        ExerciseKind::Explore => SharePayload::Explore,
        ExerciseKind::Simplify => {
            let numerator = numeric_param(&params, PARAM_NUMERATOR)?;
            let denominator = numeric_param(&params, PARAM_DENOMINATOR)?;
            if denominator < 2 || numerator >= denominator {
                return Err(ShareError::ImproperFraction {
                    numerator,
                    denominator,
                });
            }
            SharePayload::Simplify {
                numerator,
                denominator,
            }
        }
        ExerciseKind::Addition => SharePayload::Addition {
            first: numeric_param(&params, PARAM_FIRST)?,
            second: numeric_param(&params, PARAM_SECOND)?,
            denominator: numeric_param(&params, PARAM_DENOMINATOR)?,
        },
        ExerciseKind::WordProblems => {
            let data = params.get(PARAM_DATA).ok_or(ShareError::MissingParam {
                name: PARAM_DATA,
            })?;
            let bytes = BASE64.decode(data.as_bytes())?;
            let problem: WordProblemPayload = serde_json::from_slice(&bytes)?;
            SharePayload::WordProblem(problem)
        }
    };
    Ok(payload)
}

/// Decodes `url` only if its mode matches the exercise being seeded.
///
/// # Errors
///
/// As [`decode`], plus [`ShareError::ModeMismatch`] when the link names a
/// different exercise kind.
pub fn decode_for(url: &Url, expected: ExerciseKind) -> Result<SharePayload> {
    let payload = decode(url)?;
    if payload.kind() != expected {
        tracing::debug!(found = %payload.kind(), %expected, "share link is for another exercise");
        return Err(ShareError::ModeMismatch {
            expected,
            found: payload.kind(),
        });
    }
    Ok(payload)
}

/// Reads a required decimal integer parameter.
fn numeric_param(params: &HashMap<String, String>, name: &'static str) -> Result<u32> {
    let raw = params
        .get(name)
        .ok_or(ShareError::MissingParam { name })?;
    raw.parse()
        .map_err(|_| ShareError::InvalidNumber {
            name,
            value: raw.clone(),
        })
}

// ============================================================================
// Tests
// ============================================================================
