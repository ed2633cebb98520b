// src/utils/fanout.rs

//! Bounded-concurrency fan-out over a list of work items.

use std::future::Future;

use futures::stream::{self, StreamExt};

/// Values produced by one fan-out pass.
#[derive(Debug)]
pub struct FanOutResult<T> {
    /// Successful task outputs, in input order
    pub values: Vec<T>,
    /// Number of tasks that produced nothing
    pub failures: usize,
}

impl<T> Default for FanOutResult<T> {
    fn default() -> Self {
        Self {
            values: Vec::new(),
            failures: 0,
        }
    }
}

/// Runs async tasks with at most `concurrency` in flight.
#[derive(Debug, Clone, Copy)]
pub struct FanOut {
    concurrency: usize,
}

impl FanOut {
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `task` over every item and wait for all of them.
    ///
    /// A task reports failure by returning `None`; it is counted and its
    /// siblings keep running. A free slot is refilled as soon as any task
    /// finishes, so one slow task only holds its own slot. Output order
    /// follows input order.
    pub async fn run<I, F, Fut, T>(&self, items: I, mut task: F) -> FanOutResult<T>
    where
        I: IntoIterator,
        F: FnMut(I::Item) -> Fut,
        Fut: Future<Output = Option<T>>,
    {
        let mut results: Vec<(usize, Option<T>)> = stream::iter(items.into_iter().enumerate())
            .map(|(index, item)| {
                let fut = task(item);
                async move { (index, fut.await) }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;
        results.sort_by_key(|(index, _)| *index);

        let mut outcome = FanOutResult::default();
        for (_, result) in results {
            match result {
                Some(value) => outcome.values.push(value),
                None => outcome.failures += 1,
            }
        }
        outcome
    }
}
