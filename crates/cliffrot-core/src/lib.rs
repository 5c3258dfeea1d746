//! # Cliffrot
//!
//! Batch rotation of 3D coordinates with paravectors from the Clifford algebra
//! of three-dimensional space.
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture:
//!
//! - **[`core`]: The Foundation.** Stateless algebra: the `Paravector` type over
//!   owned or borrowed rows, rotor construction, the sandwich product, and the
//!   scratch arena that backs every intermediate value.
//!
//! - **[`engine`]: The Kernels.** Serial and concurrent batch rotation over
//!   `N x 3` row slices, the row partitioning used by the concurrent kernel, and
//!   engine configuration.
//!
//! - **[`workflows`]: The Public API.** `RotationEngine`, which reuses one arena
//!   across calls and chooses a kernel per batch.
//!
//! ```
//! use cliffrot::workflows::rotate::RotationEngine;
//! use nalgebra::Vector3;
//! use std::f64::consts::FRAC_PI_2;
//!
//! let mut engine = RotationEngine::default();
//! let coords = vec![Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 0.0, 2.0)];
//! let rotated = engine.rotated(&coords, &Vector3::z(), FRAC_PI_2);
//! assert!((rotated[0] - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
//! assert!((rotated[1] - coords[1]).norm() < 1e-12);
//! ```

pub mod core;
pub mod engine;
pub mod workflows;
