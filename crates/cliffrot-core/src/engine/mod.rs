//! # Engine Module
//!
//! Batch rotation kernels that apply one rotation to every row of an `N x 3`
//! coordinate block.
//!
//! ## Overview
//!
//! Each kernel builds the rotor pair for the requested axis and angle once,
//! then applies the sandwich product row by row, writing into a caller-owned
//! destination that is returned on completion. All intermediate paravectors
//! borrow their vector parts from a [`ScratchArena`](crate::core::scratch::ScratchArena).
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Worker limits and the serial/concurrent
//!   threshold, built in code or loaded from TOML
//! - **Partitioning** ([`partition`]) - Worker counts and the split of rows into
//!   contiguous fragments
//! - **Serial Kernel** ([`serial`]) - Single-threaded rotation of a whole batch
//! - **Concurrent Kernel** ([`concurrent`]) - Fragment-per-worker rotation with a
//!   shared read-only rotor and a join before returning
//!
//! ## Key Properties
//!
//! - **Deterministic output**: the result does not depend on the worker count
//! - **Checked shapes**: mismatched row counts and invalid worker counts panic
//!   before any row is written
//! - **No aliasing**: the source and destination are separate borrows, so an
//!   in-place call does not compile

pub mod concurrent;
pub mod config;
pub mod partition;
pub mod serial;
