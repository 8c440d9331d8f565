// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::common::auth::ClientContext;
use crate::modules::donation::entity::{DonationEntity, DonationStatus};
use crate::modules::donation::lifecycle::{
    create_donation, get_donation, list_donations, transition_donation, ActorRole,
    TransitionContext,
};
use crate::modules::donation::nativedb::DONATION_STORE;
use crate::modules::donation::payload::{DonationClaimRequest, DonationCreateRequest};
use crate::modules::rest::api::ApiTags;
use crate::modules::rest::response::DataPage;
use crate::modules::rest::ApiResult;
use poem::web::Path;
use poem_openapi::param::Query;
use poem_openapi::payload::Json;
use poem_openapi::OpenApi;

pub struct DonationApi;

#[OpenApi(prefix_path = "/api/v1", tag = "ApiTags::Donation")]
impl DonationApi {
    /// Lists a new donation. The expiry deadline is derived on the server
    /// from the cooked time and shelf life.
    #[oai(path = "/donations", method = "post", operation_id = "create_donation")]
    async fn create_donation(
        &self,
        /// The donation creation request payload.
        request: Json<DonationCreateRequest>,
        context: ClientContext,
    ) -> ApiResult<Json<DonationEntity>> {
        context.require_role(&[ActorRole::Donor, ActorRole::Ngo])?;
        let donation = create_donation(&*DONATION_STORE, context.actor, request.0).await?;
        Ok(Json(donation))
    }

    /// Retrieves a single donation by its unique id. Donors can only fetch
    /// their own listings.
    #[oai(path = "/donations/:id", method = "get", operation_id = "get_donation")]
    async fn get_donation(
        &self,
        /// The unique identifier of the donation.
        id: Path<u64>,
        context: ClientContext,
    ) -> ApiResult<Json<DonationEntity>> {
        let donation = get_donation(&*DONATION_STORE, id.0, context.actor).await?;
        Ok(Json(donation))
    }

    /// Retrieves a role-scoped list of donations, most recent first.
    ///
    /// Donors see their own listings, NGOs see everything, riders see the
    /// operative subset (available, claimed, picked up).
    #[oai(path = "/list-donations", method = "get", operation_id = "list_donations")]
    async fn list_donations(
        &self,
        /// Optional. The page number to retrieve (starting from 1).
        page: Query<Option<u64>>,
        /// Optional. The number of items per page.
        page_size: Query<Option<u64>>,
        /// Optional. Whether to sort by creation time descending (default true).
        desc: Query<Option<bool>>,
        /// Optional. Restrict the listing to a single status.
        status: Query<Option<DonationStatus>>,
        context: ClientContext,
    ) -> ApiResult<Json<DataPage<DonationEntity>>> {
        let paginated = list_donations(
            &*DONATION_STORE,
            context.actor,
            status.0,
            page.0,
            page_size.0,
            desc.0.or(Some(true)),
        )
        .await?;
        Ok(Json(DataPage::from(paginated)))
    }

    /// Claims an available donation. A rider claims for themselves; an NGO
    /// may dispatch a specific rider via the request payload.
    #[oai(path = "/donations/:id/claim", method = "post", operation_id = "claim_donation")]
    async fn claim_donation(
        &self,
        /// The unique identifier of the donation to claim.
        id: Path<u64>,
        /// The claim request payload.
        request: Json<DonationClaimRequest>,
        context: ClientContext,
    ) -> ApiResult<Json<DonationEntity>> {
        context.require_role(&[ActorRole::Ngo, ActorRole::Rider])?;
        let donation = transition_donation(
            &*DONATION_STORE,
            id.0,
            DonationStatus::Claimed,
            context.actor,
            TransitionContext {
                assigned_rider: request.0.rider_id,
            },
        )
        .await?;
        Ok(Json(donation))
    }

    /// Marks a claimed donation as picked up by the rider.
    #[oai(path = "/donations/:id/pickup", method = "post", operation_id = "pickup_donation")]
    async fn pickup_donation(
        &self,
        /// The unique identifier of the donation being collected.
        id: Path<u64>,
        context: ClientContext,
    ) -> ApiResult<Json<DonationEntity>> {
        context.require_role(&[ActorRole::Rider])?;
        let donation = transition_donation(
            &*DONATION_STORE,
            id.0,
            DonationStatus::PickedUp,
            context.actor,
            TransitionContext::default(),
        )
        .await?;
        Ok(Json(donation))
    }

    /// Confirms delivery of a picked-up donation and closes the listing.
    #[oai(
        path = "/donations/:id/complete",
        method = "post",
        operation_id = "complete_donation"
    )]
    async fn complete_donation(
        &self,
        /// The unique identifier of the donation being delivered.
        id: Path<u64>,
        context: ClientContext,
    ) -> ApiResult<Json<DonationEntity>> {
        context.require_role(&[ActorRole::Rider, ActorRole::Ngo])?;
        let donation = transition_donation(
            &*DONATION_STORE,
            id.0,
            DonationStatus::Completed,
            context.actor,
            TransitionContext::default(),
        )
        .await?;
        Ok(Json(donation))
    }
}
