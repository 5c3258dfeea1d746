use super::partition;
use super::serial::rotate_fragment;
use crate::core::rotor::RotorPair;
use crate::core::scratch::{ScratchArena, WorkerBlocks, WorkerRows};
use nalgebra::Vector3;
use std::ops::Range;
use tracing::{debug, instrument, trace};

/// Rotates every row of `target` by `angle` radians about `axis` into `dest`,
/// splitting the rows among as many workers as the host can run (at most one
/// per row). Returns `dest`.
///
/// Allocates a scratch arena sized for the chosen worker count and delegates to
/// [`rotate_concurrent_with`].
///
/// # Panics
///
/// Panics if `target` and `dest` have different numbers of rows.
///
/// ```compile_fail,E0502
/// use cliffrot::engine::concurrent::rotate_concurrent;
/// use nalgebra::Vector3;
///
/// let mut coords = vec![Vector3::<f64>::x(); 4];
/// rotate_concurrent(&coords, &mut coords, &Vector3::z(), 1.0);
/// ```
#[instrument(skip_all, name = "rotate_concurrent", fields(rows = target.len()))]
pub fn rotate_concurrent<'d>(
    target: &[Vector3<f64>],
    dest: &'d mut [Vector3<f64>],
    axis: &Vector3<f64>,
    angle: f64,
) -> &'d mut [Vector3<f64>] {
    // An empty batch returns before carving, but the arena still needs one worker's rows.
    let workers = partition::worker_count(target.len(), None).max(1);
    let mut scratch = ScratchArena::for_workers(workers);
    rotate_concurrent_with(target, dest, axis, angle, &mut scratch, workers)
}

/// Like [`rotate_concurrent`] with an explicit worker count, borrowing every
/// intermediate row from `scratch`. Apart from the workers themselves, no
/// heap allocation takes place.
///
/// The rotor pair is built once and shared read-only; each worker gets a
/// contiguous fragment of rows and its own scratch rows. The call returns only
/// after every worker has finished.
///
/// # Panics
///
/// All checks happen before any worker starts. Panics if `target` and `dest`
/// have different numbers of rows, if `workers` is not in `1..=rows` for a
/// non-empty input, or if `scratch` holds fewer than
/// [`scratch_rows(workers)`](crate::core::scratch::scratch_rows) rows.
pub fn rotate_concurrent_with<'d>(
    target: &[Vector3<f64>],
    dest: &'d mut [Vector3<f64>],
    axis: &Vector3<f64>,
    angle: f64,
    scratch: &mut ScratchArena,
    workers: usize,
) -> &'d mut [Vector3<f64>] {
    let rows = target.len();
    assert_eq!(
        rows,
        dest.len(),
        "source and destination must have the same number of rows"
    );
    if rows == 0 {
        return dest;
    }
    let fragments = partition::fragments(rows, workers);
    let layout = scratch.carve(workers);

    let rotor = RotorPair::build(layout.rotor, axis, angle);
    debug!(
        rows,
        workers,
        fragment_len = fragments.fragment_len(),
        "Rotating rows concurrently."
    );

    let jobs = fragment_jobs(target, &mut *dest, fragments, layout.workers);

    #[cfg(feature = "parallel")]
    rayon::scope(|scope| {
        for job in jobs {
            scope.spawn(move |_| job.run(&rotor));
        }
    });

    #[cfg(not(feature = "parallel"))]
    for job in jobs {
        job.run(&rotor);
    }

    dest
}

/// One worker's share of a call: its row range, the matching source and
/// destination rows, and its private scratch rows.
struct FragmentJob<'t, 'd, 's> {
    range: Range<usize>,
    source: &'t [Vector3<f64>],
    dest: &'d mut [Vector3<f64>],
    scratch: WorkerRows<'s>,
}

impl FragmentJob<'_, '_, '_> {
    fn run(self, rotor: &RotorPair<'_>) {
        trace!(start = self.range.start, end = self.range.end, "Worker started.");
        rotate_fragment(self.source, self.dest, rotor, self.scratch);
    }
}

fn fragment_jobs<'t, 'd, 's>(
    target: &'t [Vector3<f64>],
    dest: &'d mut [Vector3<f64>],
    fragments: partition::Fragments,
    blocks: WorkerBlocks<'s>,
) -> impl Iterator<Item = FragmentJob<'t, 'd, 's>> {
    let mut remaining = dest;
    fragments
        .zip(blocks.into_workers())
        .map(move |(range, scratch)| {
            let (dest, rest) = std::mem::take(&mut remaining).split_at_mut(range.len());
            remaining = rest;
            FragmentJob {
                source: &target[range.clone()],
                range,
                dest,
                scratch,
            }
        })
}
