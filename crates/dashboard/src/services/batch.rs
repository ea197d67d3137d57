//! Bounded-concurrency fan-out.

use std::future::Future;
use std::num::NonZeroUsize;

use futures::{StreamExt, TryStreamExt, stream};

/// Run `f` over every item with at most `limit` futures in flight.
///
/// Results keep the input order. The first error stops the run; futures
/// already started are dropped.
///
/// # Errors
///
/// Returns the first error produced by `f`.
pub async fn run_bounded<I, T, E, F, Fut>(
    items: I,
    limit: NonZeroUsize,
    f: F,
) -> Result<Vec<T>, E>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    stream::iter(items)
        .map(f)
        .buffered(limit.get())
        .try_collect()
        .await
}
