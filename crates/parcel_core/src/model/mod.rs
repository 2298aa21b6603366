//! Domain model for parcel tracking.
//!
//! # Responsibility
//! - Define the canonical parcel record and lifecycle states.
//!
//! # Invariants
//! - Every stored parcel is identified by a storage-assigned `ParcelNumber`.
//! - Deletion is a hard delete and only allowed while registered.

pub mod parcel;
