use crate::core::scratch::ScratchArena;
use crate::engine::concurrent::rotate_concurrent_with;
use crate::engine::config::{ConfigError, EngineConfig};
use crate::engine::partition;
use crate::engine::serial::rotate_serial_with;
use nalgebra::Vector3;
use std::path::Path;
use tracing::{debug, info, instrument};

/// Rotates batches of coordinates, reusing one scratch arena across calls.
///
/// Small batches run on the serial kernel; batches of at least
/// `parallel_threshold` rows are split among workers. The arena grows only when
/// a call needs more workers than it has served before, so repeated calls of
/// similar size perform no scratch allocation.
#[derive(Debug, Clone)]
pub struct RotationEngine {
    config: EngineConfig,
    scratch: ScratchArena,
}

impl Default for RotationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl RotationEngine {
    pub fn new(config: EngineConfig) -> Self {
        info!(
            workers = ?config.workers,
            parallel_threshold = config.parallel_threshold,
            "Creating rotation engine."
        );
        Self {
            config,
            scratch: ScratchArena::for_workers(1),
        }
    }

    /// Creates an engine from a TOML configuration file.
    pub fn from_config_file(path: &Path) -> Result<Self, ConfigError> {
        EngineConfig::load(path).map(Self::new)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of workers the engine's scratch arena can currently serve.
    pub fn scratch_workers(&self) -> usize {
        self.scratch.max_workers()
    }

    /// Rotates every row of `target` by `angle` radians about `axis` into `dest`
    /// and returns `dest`.
    ///
    /// # Panics
    ///
    /// Panics if `target` and `dest` have different numbers of rows.
    #[instrument(skip_all, name = "rotation_engine", fields(rows = target.len()))]
    pub fn rotate<'d>(
        &mut self,
        target: &[Vector3<f64>],
        dest: &'d mut [Vector3<f64>],
        axis: &Vector3<f64>,
        angle: f64,
    ) -> &'d mut [Vector3<f64>] {
        let rows = target.len();
        assert_eq!(
            rows,
            dest.len(),
            "source and destination must have the same number of rows"
        );
        let workers = partition::worker_count(rows, self.config.workers);

        if rows < self.config.parallel_threshold || workers <= 1 {
            return rotate_serial_with(target, dest, axis, angle, &mut self.scratch);
        }

        if self.scratch.ensure_workers(workers) {
            debug!(
                workers,
                capacity = self.scratch.capacity(),
                "Grew scratch arena."
            );
        }
        rotate_concurrent_with(target, dest, axis, angle, &mut self.scratch, workers)
    }

    /// Like [`rotate`](Self::rotate), but allocates and returns a new destination.
    pub fn rotated(
        &mut self,
        target: &[Vector3<f64>],
        axis: &Vector3<f64>,
        angle: f64,
    ) -> Vec<Vector3<f64>> {
        let mut dest = vec![Vector3::zeros(); target.len()];
        self.rotate(target, &mut dest, axis, angle);
        dest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rotor::rotate_vector;
    use crate::engine::config::EngineConfigBuilder;
    use crate::engine::serial::rotate_serial;
    use std::f64::consts::FRAC_PI_2;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TOLERANCE: f64 = 1e-10;

    fn vec_approx_equal(a: &Vector3<f64>, b: &Vector3<f64>) -> bool {
        (a - b).norm() < TOLERANCE
    }

    fn sample_coords(n: usize) -> Vec<Vector3<f64>> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Vector3::new(0.5 * t - 4.0, (0.9 * t).sin(), (0.2 * t).cos() * 1.5)
            })
            .collect()
    }

    fn engine(workers: usize, parallel_threshold: usize) -> RotationEngine {
        RotationEngine::new(
            EngineConfigBuilder::new()
                .workers(workers)
                .parallel_threshold(parallel_threshold)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn default_engine_uses_default_config() {
        let engine = RotationEngine::default();
        assert_eq!(*engine.config(), EngineConfig::default());
        assert_eq!(engine.scratch_workers(), 1);
    }

    #[test]
    fn small_batch_runs_serially_without_growing_scratch() {
        let mut engine = engine(4, 100);
        let target = sample_coords(10);
        let rotated = engine.rotated(&target, &Vector3::z(), FRAC_PI_2);
        for (v, r) in target.iter().zip(&rotated) {
            assert!(vec_approx_equal(r, &Vector3::new(-v.y, v.x, v.z)));
        }
        assert_eq!(engine.scratch_workers(), 1);
    }

    #[test]
    fn large_batch_grows_scratch_to_worker_count() {
        let mut engine = engine(4, 8);
        let target = sample_coords(40);
        engine.rotated(&target, &Vector3::x(), 0.3);
        assert_eq!(engine.scratch_workers(), 4);
    }

    #[test]
    fn scratch_is_not_regrown_for_repeated_calls() {
        let mut engine = engine(3, 8);
        let target = sample_coords(30);
        engine.rotated(&target, &Vector3::x(), 0.3);
        let grown = engine.scratch_workers();
        engine.rotated(&target, &Vector3::y(), 1.3);
        engine.rotated(&sample_coords(9), &Vector3::z(), 2.3);
        assert_eq!(engine.scratch_workers(), grown);
    }

    #[test]
    fn worker_limit_is_capped_by_rows() {
        let mut engine = engine(16, 1);
        engine.rotated(&sample_coords(5), &Vector3::x(), 0.3);
        assert_eq!(engine.scratch_workers(), 5);
    }

    #[test]
    fn serial_and_concurrent_dispatch_agree() {
        let target = sample_coords(64);
        let axis = Vector3::new(2.0, -1.0, 0.25);
        let serial = engine(4, usize::MAX).rotated(&target, &axis, 1.9);
        let concurrent = engine(4, 1).rotated(&target, &axis, 1.9);
        assert_eq!(serial, concurrent);

        let mut expected = vec![Vector3::<f64>::zeros(); target.len()];
        rotate_serial(&target, &mut expected, &axis, 1.9);
        assert_eq!(serial, expected);
    }

    #[test]
    fn rotate_writes_into_and_returns_destination() {
        let mut engine = engine(2, 1);
        let target = sample_coords(6);
        let axis = Vector3::new(1.0, 1.0, 0.0);
        let mut dest = vec![Vector3::<f64>::zeros(); 6];
        let returned = engine.rotate(&target, &mut dest, &axis, 0.7);
        assert_eq!(returned.len(), 6);
        for (v, r) in target.iter().zip(&dest) {
            assert!(vec_approx_equal(r, &rotate_vector(v, &axis, 0.7)));
        }
    }

    #[test]
    fn empty_batch_is_a_no_op() {
        let mut engine = engine(4, 0);
        assert!(engine.rotated(&[], &Vector3::z(), 1.0).is_empty());
    }

    #[test]
    fn from_config_file_reads_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "workers = 2\nparallel-threshold = 16\n").unwrap();

        let engine = RotationEngine::from_config_file(file.path()).unwrap();

        assert_eq!(engine.config().workers, Some(2));
        assert_eq!(engine.config().parallel_threshold, 16);
    }

    #[test]
    fn from_config_file_propagates_errors() {
        let result = RotationEngine::from_config_file(Path::new("missing_engine.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    #[should_panic(expected = "same number of rows")]
    fn panics_on_row_count_mismatch() {
        let mut engine = engine(2, 1);
        let target = sample_coords(5);
        let mut dest = vec![Vector3::<f64>::zeros(); 4];
        engine.rotate(&target, &mut dest, &Vector3::z(), 1.0);
    }

    #[test]
    fn row_count_mismatch_does_not_grow_scratch() {
        let mut engine = engine(4, 1);
        let target = sample_coords(20);
        let mut dest = vec![Vector3::<f64>::zeros(); 19];
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            engine.rotate(&target, &mut dest, &Vector3::z(), 1.0);
        }));
        assert!(result.is_err());
        assert_eq!(engine.scratch_workers(), 1);
    }
}
