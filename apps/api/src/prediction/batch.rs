//! Bounded-concurrency batch runner.
//!
//! `max_concurrent` workers drain one shared queue; each pops an item, awaits
//! the processor, and appends the result. Results arrive in completion order,
//! NOT input order. Callers that need ordering pair each item with its index
//! before submitting it.
//!
//! The first processor error fails the whole batch. There is no retry and no
//! cancellation; a stalled processor holds one worker slot.

use std::collections::VecDeque;
use std::future::Future;

use futures::future::try_join_all;
use parking_lot::Mutex;
use tracing::debug;

pub const DEFAULT_MAX_CONCURRENT: usize = 5;

pub async fn parallel_process<T, R, E, F, Fut>(
    items: Vec<T>,
    processor: F,
    max_concurrent: usize,
) -> Result<Vec<R>, E>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = Result<R, E>>,
{
    let total = items.len();
    let workers = max_concurrent.max(1).min(total);
    debug!(total, workers, "starting parallel batch");

    let queue = Mutex::new(VecDeque::from(items));
    let results = Mutex::new(Vec::with_capacity(total));

    let (queue_ref, results_ref, processor_ref) = (&queue, &results, &processor);
    let worker = move || async move {
        loop {
            // the lock is released before awaiting the processor
            let next = queue_ref.lock().pop_front();
            let Some(item) = next else {
                break;
            };
            let result = processor_ref(item).await?;
            results_ref.lock().push(result);
        }
        Ok::<(), E>(())
    };

    try_join_all((0..workers).map(|_| worker())).await?;
    Ok(results.into_inner())
}
