// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::donation::payload::DonationCreateRequest;
use crate::modules::error::{code::ErrorCode, FoodLinkResult};
use crate::modules::utils::{
    parse_client_timestamp, require_non_empty, validate_contact_number,
};
use crate::{id, raise_error, utc_now};
use native_db::*;
use native_model::{native_model, Model};
use poem_openapi::{Enum, Object};
use serde::{Deserialize, Serialize};
use std::fmt;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;

/// Represents the status of a donation listing.
///
/// This enum defines the lifecycle states a listing can be in, from initial
/// publication through delivery or expiry. Transitions only ever move
/// forward; `Completed` and `Expired` are terminal.
#[derive(Clone, Copy, Debug, Eq, Default, PartialEq, Serialize, Deserialize, Hash, Enum)]
pub enum DonationStatus {
    /// Listing is published and can be claimed by an NGO or rider.
    #[default]
    Available,

    /// Listing has been claimed; a rider may be assigned.
    Claimed,

    /// The assigned rider has collected the food.
    PickedUp,

    /// The food has been delivered and the listing is closed.
    Completed,

    /// The listing passed its expiry deadline while still available.
    Expired,
}

impl DonationStatus {
    pub fn code(&self) -> u32 {
        match &self {
            DonationStatus::Available => 1,
            DonationStatus::Claimed => 2,
            DonationStatus::PickedUp => 3,
            DonationStatus::Completed => 4,
            DonationStatus::Expired => 5,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, DonationStatus::Completed | DonationStatus::Expired)
    }

    /// Lowercase label used for metric dimensions.
    pub fn label(&self) -> &'static str {
        match self {
            DonationStatus::Available => "available",
            DonationStatus::Claimed => "claimed",
            DonationStatus::PickedUp => "picked_up",
            DonationStatus::Completed => "completed",
            DonationStatus::Expired => "expired",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status_str = match self {
            DonationStatus::Available => "Available",
            DonationStatus::Claimed => "Claimed",
            DonationStatus::PickedUp => "PickedUp",
            DonationStatus::Completed => "Completed",
            DonationStatus::Expired => "Expired",
        };
        write!(f, "{}", status_str)
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Object)]
#[native_model(id = 1, version = 1)]
#[native_db(
    primary_key(pk -> String),
    secondary_key(status_code -> u32),
    secondary_key(sweep_key -> String)
)]
pub struct DonationEntity {
    /// Unique identifier of the donation, assigned at creation.
    #[secondary_key(unique)]
    pub id: u64,

    /// Identifier of the donor who listed the donation.
    #[secondary_key]
    pub donor_id: u64,

    /// Display name of the donor shown to NGOs and riders.
    pub donor_name: String,

    /// Contact number for pickup coordination.
    pub contact_number: String,

    /// Pickup address of the listing.
    pub address: String,

    /// Short description of the food being donated.
    pub food_type: String,

    /// Number of servings.
    pub quantity: u32,

    /// Optional free-form notes from the donor.
    pub notes: Option<String>,

    /// Donor-proposed pickup timestamp (Unix epoch milliseconds).
    pub pickup_time: i64,

    /// Timestamp when the food was prepared (Unix epoch milliseconds).
    pub cooked_time: i64,

    /// How many whole hours the food remains safe after cooking.
    pub shelf_life_hours: u32,

    /// Deadline after which the food is presumed unsafe. Derived server-side
    /// from `cooked_time` and `shelf_life_hours` at creation and never
    /// recomputed.
    pub expiry_datetime: i64,

    /// Current lifecycle status of the listing.
    pub status: DonationStatus,

    /// Rider assigned on claim, if any. At most one rider per donation.
    pub assigned_rider: Option<u64>,

    /// Timestamp when the rider was assigned (Unix epoch milliseconds).
    pub assigned_at: Option<i64>,

    /// Timestamp when delivery was confirmed (Unix epoch milliseconds).
    pub completed_at: Option<i64>,

    /// Timestamp when the listing was created (Unix epoch milliseconds).
    pub created_at: i64,

    /// Timestamp of the last status change (Unix epoch milliseconds).
    pub updated_at: i64,
}

impl DonationEntity {
    fn pk(&self) -> String {
        format!("{}_{}", self.created_at, self.id)
    }

    pub fn status_code(&self) -> u32 {
        self.status.code()
    }

    /// Composite `(status, expiry)` index key; the zero-padded millisecond
    /// timestamp keeps lexicographic order equal to numeric order.
    pub fn sweep_key(&self) -> String {
        format!("{}_{:020}", self.status.code(), self.expiry_datetime)
    }

    pub fn sweep_prefix(status: DonationStatus) -> String {
        format!("{}_", status.code())
    }

    pub fn new(donor_id: u64, value: DonationCreateRequest) -> FoodLinkResult<Self> {
        require_non_empty(&value.donor_name, "donor_name")?;
        require_non_empty(&value.contact_number, "contact_number")?;
        validate_contact_number(value.contact_number.trim())?;
        require_non_empty(&value.address, "address")?;
        require_non_empty(&value.food_type, "food_type")?;
        if value.quantity == 0 {
            return Err(raise_error!(
                "'quantity' must be at least 1.".into(),
                ErrorCode::InvalidParameter
            ));
        }
        if value.shelf_life_hours == 0 {
            return Err(raise_error!(
                "'shelf_life_hours' must be at least 1.".into(),
                ErrorCode::InvalidParameter
            ));
        }
        let cooked_time = parse_client_timestamp(&value.cooked_time, "cooked_time")?;
        let pickup_time = parse_client_timestamp(&value.pickup_time, "pickup_time")?;
        // The deadline is derived here, once; a client-supplied value is never trusted.
        let expiry_datetime = cooked_time + value.shelf_life_hours as i64 * MS_PER_HOUR;
        Ok(Self {
            id: id!(64),
            donor_id,
            donor_name: value.donor_name,
            contact_number: value.contact_number,
            address: value.address,
            food_type: value.food_type,
            quantity: value.quantity,
            notes: value.notes,
            pickup_time,
            cooked_time,
            shelf_life_hours: value.shelf_life_hours,
            expiry_datetime,
            status: DonationStatus::Available,
            assigned_rider: None,
            assigned_at: None,
            completed_at: None,
            created_at: utc_now!(),
            updated_at: utc_now!(),
        })
    }
}
