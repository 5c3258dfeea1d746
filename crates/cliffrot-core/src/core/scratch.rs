use nalgebra::Vector3;

/// Rows shared by all workers: the rotor pair and the axis.
pub const ROTOR_ROWS: usize = 5;
/// Rows private to each worker.
pub const WORKER_ROWS: usize = 4;

/// Number of arena rows needed to rotate with `workers` workers.
pub const fn scratch_rows(workers: usize) -> usize {
    ROTOR_ROWS + WORKER_ROWS * workers
}

pub const SERIAL_SCRATCH_ROWS: usize = scratch_rows(1);

/// A single zero-initialized block of 3-vector rows from which every
/// paravector of a rotation call borrows its vector parts.
///
/// The arena is allocated once and can be reused across calls; carving a
/// layout out of it never allocates.
#[derive(Debug, Clone, Default)]
pub struct ScratchArena {
    rows: Vec<Vector3<f64>>,
}

/// Rows backing the axis, the rotor and its reverse.
///
/// `rotor_rev_real` holds the normalized axis until the reverse is built from
/// the rotor, at which point it is overwritten with the rotor's (zero) real vector.
#[derive(Debug)]
pub struct RotorRows<'a> {
    pub rotor_real: &'a mut Vector3<f64>,
    pub rotor_rev_real: &'a mut Vector3<f64>,
    pub axis_imag: &'a mut Vector3<f64>,
    pub rotor_imag: &'a mut Vector3<f64>,
    pub rotor_rev_imag: &'a mut Vector3<f64>,
}

/// Rows owned by one worker for the duration of a call.
#[derive(Debug)]
pub struct WorkerRows<'a> {
    pub operand_imag: &'a mut Vector3<f64>,
    pub product_real: &'a mut Vector3<f64>,
    pub product_imag: &'a mut Vector3<f64>,
    pub rotated_imag: &'a mut Vector3<f64>,
}

/// Per-worker rows grouped as four blocks of one row per worker.
#[derive(Debug)]
pub struct WorkerBlocks<'a> {
    operand_imag: &'a mut [Vector3<f64>],
    product_real: &'a mut [Vector3<f64>],
    product_imag: &'a mut [Vector3<f64>],
    rotated_imag: &'a mut [Vector3<f64>],
}

#[derive(Debug)]
pub struct ScratchLayout<'a> {
    pub rotor: RotorRows<'a>,
    pub workers: WorkerBlocks<'a>,
}

impl ScratchArena {
    pub fn zeros(rows: usize) -> Self {
        Self {
            rows: vec![Vector3::zeros(); rows],
        }
    }

    pub fn for_workers(workers: usize) -> Self {
        Self::zeros(scratch_rows(workers))
    }

    pub fn capacity(&self) -> usize {
        self.rows.len()
    }

    /// How many workers a layout carved from this arena can serve.
    pub fn max_workers(&self) -> usize {
        self.capacity().saturating_sub(ROTOR_ROWS) / WORKER_ROWS
    }

    /// Grows the arena so that it can serve `workers` workers.
    /// Returns `true` if a reallocation happened.
    pub fn ensure_workers(&mut self, workers: usize) -> bool {
        let needed = scratch_rows(workers);
        if needed <= self.rows.len() {
            return false;
        }
        self.rows.resize(needed, Vector3::zeros());
        true
    }

    pub fn view(&self, offset: usize, rows: usize) -> &[Vector3<f64>] {
        &self.rows[offset..offset + rows]
    }

    pub fn view_mut(&mut self, offset: usize, rows: usize) -> &mut [Vector3<f64>] {
        &mut self.rows[offset..offset + rows]
    }

    /// Splits the first `scratch_rows(workers)` rows into disjoint named views
    /// and zeroes them.
    ///
    /// # Panics
    ///
    /// Panics if `workers` is zero or the arena is too small.
    pub fn carve(&mut self, workers: usize) -> ScratchLayout<'_> {
        assert!(workers > 0, "a scratch layout needs at least one worker");
        let needed = scratch_rows(workers);
        assert!(
            needed <= self.rows.len(),
            "scratch arena holds {} rows but {} workers need {}",
            self.rows.len(),
            workers,
            needed
        );

        let used = self.view_mut(0, needed);
        used.fill(Vector3::zeros());

        let (head, tail) = used.split_at_mut(ROTOR_ROWS);
        let [rotor_real, rotor_rev_real, axis_imag, rotor_imag, rotor_rev_imag] = head else {
            unreachable!("rotor block has exactly {ROTOR_ROWS} rows");
        };
        let (operand_imag, tail) = tail.split_at_mut(workers);
        let (product_real, tail) = tail.split_at_mut(workers);
        let (product_imag, rotated_imag) = tail.split_at_mut(workers);

        ScratchLayout {
            rotor: RotorRows {
                rotor_real,
                rotor_rev_real,
                axis_imag,
                rotor_imag,
                rotor_rev_imag,
            },
            workers: WorkerBlocks {
                operand_imag,
                product_real,
                product_imag,
                rotated_imag,
            },
        }
    }
}

impl<'a> WorkerBlocks<'a> {
    pub fn len(&self) -> usize {
        self.operand_imag.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operand_imag.is_empty()
    }

    /// Hands out each worker's rows, in worker order.
    pub fn into_workers(self) -> impl ExactSizeIterator<Item = WorkerRows<'a>> {
        self.operand_imag
            .iter_mut()
            .zip(self.product_real.iter_mut())
            .zip(self.product_imag.iter_mut())
            .zip(self.rotated_imag.iter_mut())
            .map(
                |(((operand_imag, product_real), product_imag), rotated_imag)| WorkerRows {
                    operand_imag,
                    product_real,
                    product_imag,
                    rotated_imag,
                },
            )
    }
}
