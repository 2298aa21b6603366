//! Repository layer over the parcel table.
//!
//! # Responsibility
//! - Define the parcel store contract.
//! - Keep SQL details out of the service layer.
//!
//! # Invariants
//! - Write paths validate input before issuing SQL.
//! - Read APIs distinguish `NotFound` from transport errors.

pub mod parcel_repo;
