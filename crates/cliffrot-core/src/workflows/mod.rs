//! # Workflows Module
//!
//! High-level entry points that pick a kernel and manage scratch storage for
//! repeated batch rotations.
//!
//! ## Architecture
//!
//! - **Rotation Workflow** ([`rotate`]) - A [`RotationEngine`](rotate::RotationEngine)
//!   that keeps one scratch arena alive across calls and dispatches each batch
//!   to the serial or concurrent kernel according to its
//!   [`EngineConfig`](crate::engine::config::EngineConfig).

pub mod rotate;
