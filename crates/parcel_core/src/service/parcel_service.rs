//! Parcel tracking use-cases.
//!
//! # Responsibility
//! - Register parcels, walk them through the delivery flow and expose
//!   per-client listings.
//! - Delegate persistence to a `ParcelRepository`.
//!
//! # Invariants
//! - New parcels always start as `registered` with the current UTC time.
//! - `next_status` only moves forward and stops at `delivered`.

use crate::model::parcel::{ClientId, Parcel, ParcelNumber, ParcelStatus};
use crate::repo::parcel_repo::{ParcelRepository, RepoResult};
use log::{debug, info};

/// Use-case service wrapper over a parcel store.
pub struct ParcelService<R: ParcelRepository> {
    repo: R,
}

impl<R: ParcelRepository> ParcelService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Registers a new parcel for `client` and returns it with its number.
    pub fn register(&self, client: ClientId, address: impl Into<String>) -> RepoResult<Parcel> {
        let mut parcel = Parcel::new(client, address);
        parcel.number = self.repo.add(&parcel)?;

        info!(
            "event=parcel_register module=service status=ok number={} client={}",
            parcel.number, parcel.client
        );
        Ok(parcel)
    }

    /// Lists every parcel of `client` in registration order.
    pub fn client_parcels(&self, client: ClientId) -> RepoResult<Vec<Parcel>> {
        let parcels = self.repo.get_by_client(client)?;
        debug!(
            "event=parcel_list module=service status=ok client={} count={}",
            client,
            parcels.len()
        );
        Ok(parcels)
    }

    /// Advances a parcel one step along `registered -> sent -> delivered`.
    ///
    /// Returns the new status, or `None` when the parcel was already
    /// delivered and nothing changed.
    pub fn next_status(&self, number: ParcelNumber) -> RepoResult<Option<ParcelStatus>> {
        let parcel = self.repo.get(number)?;
        let Some(next) = parcel.status.next() else {
            debug!(
                "event=parcel_status_change module=service status=skipped number={number} current={}",
                parcel.status
            );
            return Ok(None);
        };

        self.repo.set_status(number, next)?;
        info!(
            "event=parcel_status_change module=service status=ok number={number} from={} to={next}",
            parcel.status
        );
        Ok(Some(next))
    }

    /// Changes the delivery address. Has no effect once the parcel left
    /// the `registered` state; returns whether the address was written.
    pub fn change_address(&self, number: ParcelNumber, address: &str) -> RepoResult<bool> {
        let changed = self.repo.set_address(number, address)?;
        if changed {
            info!("event=parcel_address_change module=service status=ok number={number}");
        } else {
            info!("event=parcel_address_change module=service status=skipped number={number}");
        }
        Ok(changed)
    }

    /// Deletes a registered parcel. Has no effect for sent or delivered ones;
    /// returns whether a row was removed.
    pub fn delete(&self, number: ParcelNumber) -> RepoResult<bool> {
        let removed = self.repo.delete(number)?;
        if removed {
            info!("event=parcel_delete module=service status=ok number={number}");
        } else {
            info!("event=parcel_delete module=service status=skipped number={number}");
        }
        Ok(removed)
    }

    /// Loads one parcel by number.
    pub fn get(&self, number: ParcelNumber) -> RepoResult<Parcel> {
        self.repo.get(number)
    }
}
