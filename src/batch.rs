//! Concurrency-limited batch processing.

use crate::error::Result;
use futures::future::join_all;
use std::fmt::Debug;
use std::future::Future;
use tracing::{error, info};

/// Counts reported after a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Runs items in sequential batches of at most `concurrency` concurrent futures.
pub struct BatchRunner {
    concurrency: usize,
}

impl BatchRunner {
    /// A concurrency of zero is treated as one.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Process every item, handing successful outputs to `on_success`.
    ///
    /// A failing item is logged and counted; it never stops the run.
    pub async fn run<I, O, F, Fut, S>(&self, items: &[I], process: F, mut on_success: S) -> BatchSummary
    where
        I: Debug,
        F: Fn(&I) -> Fut,
        Fut: Future<Output = Result<O>>,
        S: FnMut(O),
    {
        let mut summary = BatchSummary::default();
        let total_batches = items.len().div_ceil(self.concurrency);

        for (index, batch) in items.chunks(self.concurrency).enumerate() {
            info!(
                "Batch {}/{} ({} items)",
                index + 1,
                total_batches,
                batch.len()
            );

            let results = join_all(batch.iter().map(&process)).await;

            for (item, result) in batch.iter().zip(results) {
                match result {
                    Ok(output) => {
                        summary.processed += 1;
                        on_success(output);
                    }
                    Err(e) => {
                        summary.failed += 1;
                        error!("Failed to process {:?}: {}", item, e);
                    }
                }
            }
        }

        summary
    }
}
