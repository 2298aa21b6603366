//! Parcel domain model.
//!
//! # Responsibility
//! - Define the tracked shipment record and its lifecycle states.
//! - Provide creation and validation helpers used by persistence paths.
//!
//! # Invariants
//! - `number` is assigned by storage on insert and never reused.
//! - `created_at` is an RFC3339 UTC string fixed at creation.
//! - `address` is editable and the parcel deletable only while
//!   `status == ParcelStatus::Registered`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned parcel identifier.
pub type ParcelNumber = i64;

/// Owner of a parcel.
pub type ClientId = i64;

/// Parcel lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParcelStatus {
    /// Initial state. Address is editable and the parcel can be deleted.
    Registered,
    /// Dispatched to the carrier.
    Sent,
    /// Terminal state.
    Delivered,
}

/// Persisted text value for `ParcelStatus::Registered`.
pub const PARCEL_STATUS_REGISTERED: &str = "registered";
/// Persisted text value for `ParcelStatus::Sent`.
pub const PARCEL_STATUS_SENT: &str = "sent";
/// Persisted text value for `ParcelStatus::Delivered`.
pub const PARCEL_STATUS_DELIVERED: &str = "delivered";

impl ParcelStatus {
    /// Stable string id used in the `parcel.status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Registered => PARCEL_STATUS_REGISTERED,
            Self::Sent => PARCEL_STATUS_SENT,
            Self::Delivered => PARCEL_STATUS_DELIVERED,
        }
    }

    /// Parses a persisted status value. Returns `None` for unknown text.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            PARCEL_STATUS_REGISTERED => Some(Self::Registered),
            PARCEL_STATUS_SENT => Some(Self::Sent),
            PARCEL_STATUS_DELIVERED => Some(Self::Delivered),
            _ => None,
        }
    }

    /// Forward step of the delivery flow, `None` once delivered.
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::Sent),
            Self::Sent => Some(Self::Delivered),
            Self::Delivered => None,
        }
    }
}

impl Display for ParcelStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracked shipment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    /// Zero until the parcel has been stored.
    pub number: ParcelNumber,
    pub client: ClientId,
    pub status: ParcelStatus,
    pub address: String,
    /// RFC3339 UTC, e.g. `2024-05-01T10:00:00Z`.
    pub created_at: String,
}

impl Parcel {
    /// Creates an unsaved `registered` parcel stamped with the current time.
    pub fn new(client: ClientId, address: impl Into<String>) -> Self {
        Self {
            number: 0,
            client,
            status: ParcelStatus::Registered,
            address: address.into(),
            created_at: now_rfc3339(),
        }
    }

    /// Validates fields that storage cannot check on its own.
    ///
    /// # Errors
    /// - `BlankAddress` when `address` is empty or whitespace.
    /// - `InvalidCreatedAt` when `created_at` is not RFC3339.
    pub fn validate(&self) -> Result<(), ParcelValidationError> {
        validate_address(&self.address)?;
        if DateTime::parse_from_rfc3339(&self.created_at).is_err() {
            return Err(ParcelValidationError::InvalidCreatedAt(
                self.created_at.clone(),
            ));
        }
        Ok(())
    }
}

/// Current UTC wall clock in the format stored in `parcel.created_at`.
pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

pub(crate) fn validate_address(address: &str) -> Result<(), ParcelValidationError> {
    if address.trim().is_empty() {
        return Err(ParcelValidationError::BlankAddress);
    }
    Ok(())
}

/// Field-level validation failure for `Parcel`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParcelValidationError {
    BlankAddress,
    InvalidCreatedAt(String),
}

impl Display for ParcelValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankAddress => write!(f, "parcel address cannot be blank"),
            Self::InvalidCreatedAt(value) => {
                write!(f, "parcel created_at `{value}` is not an RFC3339 timestamp")
            }
        }
    }
}

impl Error for ParcelValidationError {}

#[cfg(test)]
mod tests {
    use super::{Parcel, ParcelStatus, ParcelValidationError};
    use chrono::DateTime;

    #[test]
    fn status_text_roundtrips_for_every_variant() {
        for status in [
            ParcelStatus::Registered,
            ParcelStatus::Sent,
            ParcelStatus::Delivered,
        ] {
            assert_eq!(ParcelStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ParcelStatus::parse("lost"), None);
        assert_eq!(ParcelStatus::parse("Registered"), None);
    }

    #[test]
    fn next_status_moves_forward_and_stops_at_delivered() {
        assert_eq!(ParcelStatus::Registered.next(), Some(ParcelStatus::Sent));
        assert_eq!(ParcelStatus::Sent.next(), Some(ParcelStatus::Delivered));
        assert_eq!(ParcelStatus::Delivered.next(), None);
    }

    #[test]
    fn new_parcel_is_registered_with_utc_timestamp() {
        let parcel = Parcel::new(1000, "test");
        assert_eq!(parcel.number, 0);
        assert_eq!(parcel.status, ParcelStatus::Registered);
        assert!(parcel.created_at.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&parcel.created_at).is_ok());
        parcel.validate().unwrap();
    }

    #[test]
    fn validate_rejects_blank_address_and_bad_timestamp() {
        let mut parcel = Parcel::new(1, "   ");
        assert_eq!(parcel.validate(), Err(ParcelValidationError::BlankAddress));

        parcel.address = "street".to_string();
        parcel.created_at = "yesterday".to_string();
        assert!(matches!(
            parcel.validate(),
            Err(ParcelValidationError::InvalidCreatedAt(value)) if value == "yesterday"
        ));
    }
}
