//! The external content-provider contract and its local fallback.
//!
//! Story text and kid-friendly explanations may come from an external
//! service. The tutor treats that service as a single-shot async call that
//! can take arbitrarily long or fail outright; the helpers here bound each
//! call with a timeout and substitute an entry from the built-in catalog,
//! so the learner always sees a normal result.

use std::time::Duration;

use futures::future::{ready, BoxFuture};
use rand::Rng;

use crate::problems::{WordProblem, EXPLANATION_CATALOG, WORD_PROBLEM_CATALOG};
use crate::rational::Fraction;

/// Source of story problems and explanations.
///
/// Implementations may call out to anything; callers never await them
/// directly but through the `*_or_fallback` helpers, which cancel by
/// dropping the future. Returning `None` signals "nothing available" and
/// triggers the same fallback as a timeout.
pub trait ContentProvider: Send + Sync {
    /// A short, child-friendly explanation of `topic`, optionally grounded
    /// in a concrete fraction.
    fn explanation<'a>(
        &'a self,
        topic: &'a str,
        fraction: Option<Fraction>,
    ) -> BoxFuture<'a, Option<String>>;

    /// A complete word problem.
    fn word_problem(&self) -> BoxFuture<'_, Option<WordProblem>>;
}

/// Provider backed entirely by the built-in catalog.
///
/// Used as the default provider and as the substitute when an external
/// provider is silent.
#[derive(Debug, Clone, Copy, Default)]
pub struct CatalogProvider;

impl ContentProvider for CatalogProvider {
    fn explanation<'a>(
        &'a self,
        _topic: &'a str,
        _fraction: Option<Fraction>,
    ) -> BoxFuture<'a, Option<String>> {
        Box::pin(ready(Some(local_explanation(&mut rand::thread_rng()))))
    }

    fn word_problem(&self) -> BoxFuture<'_, Option<WordProblem>> {
        Box::pin(ready(Some(local_word_problem(&mut rand::thread_rng()))))
    }
}

/// Awaits the provider's explanation, substituting a catalog entry on
/// timeout or failure.
pub async fn explanation_or_fallback(
    provider: &dyn ContentProvider,
    timeout: Duration,
    topic: &str,
    fraction: Option<Fraction>,
) -> String {
    match tokio::time::timeout(timeout, provider.explanation(topic, fraction)).await {
        Ok(Some(text)) => text,
        Ok(None) => {
            tracing::warn!(topic, "content provider had no explanation; using catalog");
            local_explanation(&mut rand::thread_rng())
        }
        Err(_) => {
            tracing::warn!(topic, ?timeout, "content provider timed out; using catalog");
            local_explanation(&mut rand::thread_rng())
        }
    }
}

/// Awaits the provider's word problem, substituting a catalog entry on
/// timeout or failure.
pub async fn word_problem_or_fallback(
    provider: &dyn ContentProvider,
    timeout: Duration,
) -> WordProblem {
    match tokio::time::timeout(timeout, provider.word_problem()).await {
        Ok(Some(problem)) => problem,
        Ok(None) => {
            tracing::warn!("content provider had no word problem; using catalog");
            local_word_problem(&mut rand::thread_rng())
        }
        Err(_) => {
            tracing::warn!(?timeout, "content provider timed out; using catalog");
            local_word_problem(&mut rand::thread_rng())
        }
    }
}

/// Draws one explanation from the built-in catalog.
fn local_explanation<R: Rng>(rng: &mut R) -> String {
    let index = rng.gen_range(0..EXPLANATION_CATALOG.len());
    EXPLANATION_CATALOG[index].to_string()
}

/// Draws one word problem from the built-in catalog.
fn local_word_problem<R: Rng>(rng: &mut R) -> WordProblem {
    let index = rng.gen_range(0..WORD_PROBLEM_CATALOG.len());
    WordProblem::from(&WORD_PROBLEM_CATALOG[index])
}
