//! # Core Module
//!
//! Stateless algebra for rotating 3-vectors with Clifford (Pauli) algebra.
//!
//! ## Overview
//!
//! A rotation of angle `θ` about a unit axis `n` is encoded as the rotor
//! `R = cos(θ/2) + i sin(θ/2) n`, a paravector with a real scalar part and an
//! imaginary vector part. A vector `a` is rotated by the sandwich product
//! `R† a R`, where `R†` is the reversion of `R`.
//!
//! ## Architecture
//!
//! - **Paravectors** ([`paravector`]) - The algebraic element type, generic over
//!   whether it owns or borrows its vector parts, with reversion, normalization,
//!   and the restricted and full Clifford products.
//! - **Rotors** ([`rotor`]) - Rotor construction from an axis and an angle, the
//!   sandwich product, and single-vector rotation.
//! - **Scratch Storage** ([`scratch`]) - The arena that backs every paravector
//!   used by a batch rotation, carved into disjoint per-worker views.
//!
//! ## Key Properties
//!
//! - **No per-row allocation**: every intermediate paravector of a batch call
//!   borrows rows from one pre-allocated arena
//! - **Borrow-checked views**: a paravector view cannot outlive its rows, and two
//!   live views cannot share a row mutably
//! - **Right-handed rotations**: `R†` on the left and `R` on the right, so a
//!   quarter turn about `z` maps `x` onto `y`

pub mod paravector;
pub mod rotor;
pub mod scratch;
