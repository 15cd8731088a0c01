//! Parallel execution of a tick across a fixed number of workers.
//!
//! The body sequence is cut into contiguous index ranges, one per worker.
//! A fresh pool of exactly `workers` threads is built for every tick and
//! dropped when the tick returns. Each substep:
//!
//! ```text
//!   live ──copy──▶ snapshot (read-only, shared by all workers)
//!                     │
//!          ┌──────────┼──────────┐
//!          ▼          ▼          ▼
//!      worker 0   worker 1 … worker k   each writes only its own range
//!          └──────────┼──────────┘
//!                     ▼
//!               barrier (scope join) ──▶ finiteness check
//! ```
//!
//! Workers read every body from the snapshot but never write outside their
//! own slice of the live buffer, so there is no shared mutable state and the
//! result does not depend on the worker count or on scheduling.

use std::ops::Range;

use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

use crate::error::Result;
use crate::integrator::ForceModel;
use crate::step::{check_finite, SimulationStep, TickConfig};
use crate::types::Body;

/// Split `0..len` into `workers` contiguous ranges.
///
/// Every worker but the last gets `len / workers` bodies; the last one takes
/// the remainder. With `len < workers` all but the last range are empty.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }
    let batch = len / workers;
    (0..workers)
        .map(|k| {
            let start = k * batch;
            let end = if k + 1 == workers { len } else { start + batch };
            start..end
        })
        .collect()
}

/// Fans each substep out over a per-tick worker pool.
pub struct ParallelDispatcher;

impl ParallelDispatcher {
    /// Advance `bodies` by `dt` using `config.substeps` substeps on
    /// `config.workers` threads.
    ///
    /// Returns once every worker has finished the last substep. A panic in a
    /// worker is re-raised here and the tick is lost.
    pub fn dispatch<F: ForceModel + ?Sized>(
        step: &SimulationStep<'_, F>,
        bodies: &mut [Body],
        dt: f64,
        config: &TickConfig,
    ) -> Result<()> {
        config.validate(dt)?;

        let ranges = partition(bodies.len(), config.workers);
        if bodies.len() < config.workers {
            warn!(
                bodies = bodies.len(),
                workers = config.workers,
                "fewer bodies than workers; last worker takes them all"
            );
        }

        let pool = ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|index| format!("physix-worker-{index}"))
            .build()?;

        debug!(
            bodies = bodies.len(),
            workers = config.workers,
            substeps = config.substeps,
            dt,
            "dispatching tick"
        );

        let sub_dt = config.substep_dt(dt);
        let mut snapshot = bodies.to_vec();

        for substep in 0..config.substeps {
            snapshot.copy_from_slice(bodies);
            let snapshot = snapshot.as_slice();
            let chunks = split_ranges(bodies, &ranges);

            pool.scope(|scope| {
                for (range, chunk) in ranges.iter().zip(chunks) {
                    let start = range.start;
                    scope.spawn(move |_| step.substep_range(snapshot, chunk, start, sub_dt));
                }
            });

            check_finite(bodies, substep)?;
        }

        Ok(())
    }
}

/// Borrow disjoint mutable slices matching consecutive `ranges`.
fn split_ranges<'a>(mut rest: &'a mut [Body], ranges: &[Range<usize>]) -> Vec<&'a mut [Body]> {
    let mut chunks = Vec::with_capacity(ranges.len());
    for range in ranges {
        let (head, tail) = std::mem::take(&mut rest).split_at_mut(range.len());
        chunks.push(head);
        rest = tail;
    }
    chunks
}

// =============================================================================
// Tests
// =============================================================================
