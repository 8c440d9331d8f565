// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::database::Paginated;
use crate::modules::donation::entity::{DonationEntity, DonationStatus};
use crate::modules::donation::lifecycle::{Actor, TransitionContext};
use crate::modules::error::FoodLinkResult;
use std::future::Future;

/// Storage interface for donation records. The production implementation is
/// backed by native_db; tests substitute an in-memory database behind the
/// same trait.
pub trait DonationStore {
    fn insert(
        &self,
        donation: DonationEntity,
    ) -> impl Future<Output = FoodLinkResult<()>> + Send;

    fn find(
        &self,
        donation_id: u64,
    ) -> impl Future<Output = FoodLinkResult<Option<DonationEntity>>> + Send;

    /// Applies one lifecycle edge to a record. The legality check and the
    /// write happen inside a single storage transaction with the current
    /// status as the precondition, so of two racing transitions exactly one
    /// commits and the loser observes the conflict error.
    fn transition(
        &self,
        donation_id: u64,
        target: DonationStatus,
        actor: Actor,
        context: TransitionContext,
    ) -> impl Future<Output = FoodLinkResult<DonationEntity>> + Send;

    /// Flips every `Available` record whose deadline precedes `now` to
    /// `Expired`, re-checking the status precondition inside each write
    /// transaction. Returns the number of records expired.
    fn expire_overdue(&self, now: i64) -> impl Future<Output = FoodLinkResult<usize>> + Send;

    fn list_for_donor(
        &self,
        donor_id: u64,
    ) -> impl Future<Output = FoodLinkResult<Vec<DonationEntity>>> + Send;

    fn list_by_status(
        &self,
        status: DonationStatus,
    ) -> impl Future<Output = FoodLinkResult<Vec<DonationEntity>>> + Send;

    fn paginate_all(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
        desc: Option<bool>,
    ) -> impl Future<Output = FoodLinkResult<Paginated<DonationEntity>>> + Send;
}
