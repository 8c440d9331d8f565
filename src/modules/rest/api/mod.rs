// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use donation::DonationApi;
use poem_openapi::{OpenApiService, Tags};

use crate::foodlink_version;

pub mod donation;

#[derive(Tags)]
pub enum ApiTags {
    Donation,
}

type FoodLinkOpenApi = DonationApi;

pub fn create_openapi_service() -> OpenApiService<FoodLinkOpenApi, ()> {
    OpenApiService::new(DonationApi, "FoodLinkApi", foodlink_version!())
}
