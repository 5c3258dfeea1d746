use crate::core::paravector::Paravector;
use crate::core::rotor::RotorPair;
use crate::core::scratch::{ScratchArena, WorkerRows};
use nalgebra::Vector3;
use tracing::{debug, instrument};

/// Rotates every row of `target` by `angle` radians about `axis` and writes the
/// results into the matching rows of `dest`, which is returned.
///
/// Allocates one scratch arena for the call and delegates to
/// [`rotate_serial_with`].
///
/// # Panics
///
/// Panics if `target` and `dest` have different numbers of rows.
///
/// The destination can never be the source:
///
/// ```compile_fail,E0502
/// use cliffrot::engine::serial::rotate_serial;
/// use nalgebra::Vector3;
///
/// let mut coords = vec![Vector3::<f64>::x(); 4];
/// rotate_serial(&coords, &mut coords, &Vector3::z(), 1.0);
/// ```
#[instrument(skip_all, name = "rotate_serial", fields(rows = target.len()))]
pub fn rotate_serial<'d>(
    target: &[Vector3<f64>],
    dest: &'d mut [Vector3<f64>],
    axis: &Vector3<f64>,
    angle: f64,
) -> &'d mut [Vector3<f64>] {
    let mut scratch = ScratchArena::for_workers(1);
    rotate_serial_with(target, dest, axis, angle, &mut scratch)
}

/// Like [`rotate_serial`], but borrows every intermediate row from `scratch`
/// and performs no heap allocation. The arena may be reused across calls.
///
/// # Panics
///
/// Panics if `target` and `dest` have different numbers of rows, or if
/// `scratch` holds fewer than [`SERIAL_SCRATCH_ROWS`] rows.
///
/// [`SERIAL_SCRATCH_ROWS`]: crate::core::scratch::SERIAL_SCRATCH_ROWS
pub fn rotate_serial_with<'d>(
    target: &[Vector3<f64>],
    dest: &'d mut [Vector3<f64>],
    axis: &Vector3<f64>,
    angle: f64,
    scratch: &mut ScratchArena,
) -> &'d mut [Vector3<f64>] {
    assert_eq!(
        target.len(),
        dest.len(),
        "source and destination must have the same number of rows"
    );

    let layout = scratch.carve(1);
    let rotor = RotorPair::build(layout.rotor, axis, angle);
    debug!(rows = target.len(), angle, "Rotating rows serially.");

    // A single-worker layout yields exactly one set of worker rows.
    for rows in layout.workers.into_workers() {
        rotate_fragment(target, dest, &rotor, rows);
    }
    dest
}

/// Rotates `source` row by row into `dest` using one worker's scratch rows.
pub(crate) fn rotate_fragment(
    source: &[Vector3<f64>],
    dest: &mut [Vector3<f64>],
    rotor: &RotorPair<'_>,
    rows: WorkerRows<'_>,
) {
    let WorkerRows {
        operand_imag,
        product_real,
        product_imag,
        rotated_imag,
    } = rows;
    let operand_imag = &*operand_imag;
    let mut product = Paravector::from_vectors(product_real, product_imag);

    for (row, out) in source.iter().zip(dest.iter_mut()) {
        let operand = Paravector::from_vectors(row, operand_imag);
        let mut rotated = Paravector::from_vectors(out, &mut *rotated_imag);
        rotor.apply(&mut rotated, &mut product, &operand);
    }
}
