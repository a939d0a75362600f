//! Fabrication & consistency engine for synthetic financial documents.
//!
//! This crate provides:
//! - Randomized-but-plausible raw field generation (`entity`)
//! - Derived totals and running balances under one rounding policy (`calc`)
//! - Capacity-bounded pagination with carried balances (`paginate`)
//! - Orchestration into immutable, re-verified documents (`assemble`)
//! - Batch execution with per-document failure isolation (`batch`)
//!
//! Core invariants:
//! - Every derived monetary field is exactly reproducible from arithmetic
//! - Running balances are a single left-to-right fold in posting order
//! - Pages tile the body losslessly and carry balance continuity
//! - Identical batch seed + configuration reproduces bit-identical output,
//!   regardless of how work is distributed across workers
//!
#![deny(missing_docs)]

/// Document assembly orchestration.
pub mod assemble;
/// Batch execution and per-document seed derivation.
pub mod batch;
/// Consistency calculator for totals and running balances.
pub mod calc;
/// Batch configuration and validation.
pub mod config;
/// Raw entity generation from seeded randomness.
pub mod entity;
/// Engine error types.
pub mod errors;
/// Pagination planner.
pub mod paginate;
/// Seed-stream derivation.
pub mod seed;
/// Final invariant re-verification.
pub mod verify;

pub use assemble::DocumentAssembler;
pub use batch::{BatchReport, BatchRunner, FailureRecord};
pub use calc::{compute_running_balances, compute_totals, CalcError};
pub use config::{BatchConfig, EntryBounds, DEFAULT_PAGE_CAPACITY};
pub use entity::EntityGenerator;
pub use errors::{EngineError, GenerationError};
pub use paginate::{plan_pages, PaginationError};
pub use seed::{derive_document_seed, rng_for_seed};
pub use verify::{verify_document, Defect};
