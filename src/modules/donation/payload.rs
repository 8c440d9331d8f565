// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use poem_openapi::Object;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Object)]
pub struct DonationCreateRequest {
    /// Display name of the donor shown to NGOs and riders.
    #[oai(validator(min_length = 1, max_length = 128))]
    pub donor_name: String,

    /// Contact number for pickup coordination.
    #[oai(validator(min_length = 6, max_length = 20))]
    pub contact_number: String,

    /// Pickup address of the listing.
    #[oai(validator(min_length = 1, max_length = 512))]
    pub address: String,

    /// Short description of the food being donated (e.g., "cooked rice and dal").
    #[oai(validator(min_length = 1, max_length = 128))]
    pub food_type: String,

    /// Number of servings.
    #[oai(validator(minimum(value = "1")))]
    pub quantity: u32,

    /// Optional free-form notes from the donor.
    #[oai(validator(max_length = 1024))]
    pub notes: Option<String>,

    /// Donor-proposed pickup time, RFC 3339 (e.g., "2025-11-02T18:30:00+05:30").
    pub pickup_time: String,

    /// When the food was prepared, RFC 3339. The expiry deadline is derived
    /// from this on the server; clients cannot supply it.
    pub cooked_time: String,

    /// How many whole hours the food remains safe after cooking.
    #[oai(validator(minimum(value = "1"), maximum(value = "168")))]
    pub shelf_life_hours: u32,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize, Object)]
pub struct DonationClaimRequest {
    /// The rider to assign to the pickup. When a rider claims for themselves
    /// this can be omitted; NGOs dispatching a specific rider set it.
    pub rider_id: Option<u64>,
}
