// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::{Arc, LazyLock};

use itertools::Itertools;
use native_db::{Database, Models};

use crate::{
    modules::{
        database::{
            batch_update_impl, filter_by_secondary_key_impl, insert_impl,
            paginate_query_primary_scan_all_impl, secondary_find_impl, update_impl, ModelsAdapter,
            Paginated,
        },
        donation::{
            entity::{DonationEntity, DonationEntityKey, DonationStatus},
            lifecycle::{check_transition, Actor, ActorRole, TransitionContext},
            store::DonationStore,
        },
        error::{code::ErrorCode, FoodLinkResult},
    },
    raise_error, utc_now,
};

pub static DONATION_MODELS: LazyLock<Models> = LazyLock::new(|| {
    let mut adapter = ModelsAdapter::new();
    adapter.register_model::<DonationEntity>();
    adapter.models
});

pub static DONATION_STORE: LazyLock<NativeDbDonationStore> = LazyLock::new(|| {
    NativeDbDonationStore::init(crate::modules::database::manager::DB_MANAGER.donation_db().clone())
});

const SWEEP_CHUNK_SIZE: usize = 100;

#[derive(Clone)]
pub struct NativeDbDonationStore {
    pub store: Arc<Database<'static>>,
}

impl NativeDbDonationStore {
    pub fn init(database: Arc<Database<'static>>) -> Self {
        Self {
            store: database.clone(),
        }
    }
}

impl DonationStore for NativeDbDonationStore {
    async fn insert(&self, donation: DonationEntity) -> FoodLinkResult<()> {
        insert_impl(&self.store, donation).await
    }

    async fn find(&self, donation_id: u64) -> FoodLinkResult<Option<DonationEntity>> {
        secondary_find_impl(&self.store, DonationEntityKey::id, donation_id).await
    }

    async fn transition(
        &self,
        donation_id: u64,
        target: DonationStatus,
        actor: Actor,
        context: TransitionContext,
    ) -> FoodLinkResult<DonationEntity> {
        update_impl(
            &self.store,
            move |rw| {
                rw.get()
                    .secondary::<DonationEntity>(DonationEntityKey::id, donation_id)
                    .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
                    .ok_or_else(|| {
                        raise_error!(
                            format!(
                                "The donation with id={} that you want to modify was not found.",
                                donation_id
                            ),
                            ErrorCode::ResourceNotFound
                        )
                    })
            },
            move |current| {
                // The legality check runs against the status read in this
                // transaction; a concurrent winner makes the loser fail here.
                check_transition(current.status, target, actor.role)?;
                let mut updated = current.clone();
                updated.status = target;
                updated.updated_at = utc_now!();
                match target {
                    DonationStatus::Claimed => {
                        let rider = context.assigned_rider.or(match actor.role {
                            ActorRole::Rider => Some(actor.id),
                            _ => None,
                        });
                        if let Some(rider) = rider {
                            updated.assigned_rider = Some(rider);
                            updated.assigned_at = Some(utc_now!());
                        }
                    }
                    DonationStatus::Completed => {
                        updated.completed_at = Some(utc_now!());
                    }
                    _ => {}
                }
                Ok(updated)
            },
        )
        .await
    }

    async fn expire_overdue(&self, now: i64) -> FoodLinkResult<usize> {
        // Collect candidates outside the write path, then expire them in
        // chunks. Each chunk re-checks status and deadline inside its own
        // transaction, so a listing claimed mid-sweep is skipped rather than
        // clobbered, and a crash mid-sweep leaves the tail for the next tick.
        let candidate_ids: Vec<u64> = {
            let r = self
                .store
                .r_transaction()
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
            r.scan()
                .secondary::<DonationEntity>(DonationEntityKey::sweep_key)
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
                .start_with(DonationEntity::sweep_prefix(DonationStatus::Available))
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
                .filter_map(|result| match result {
                    Ok(d) if d.expiry_datetime < now => Some(Ok(d.id)),
                    Ok(_) => None,
                    Err(e) => Some(Err(e)),
                })
                .try_collect()
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
        };

        let chunks: Vec<Vec<u64>> = candidate_ids
            .chunks(SWEEP_CHUNK_SIZE)
            .map(|chunk| chunk.to_vec())
            .collect();

        let mut expired = 0usize;
        for chunk in chunks {
            let applied = batch_update_impl(
                &self.store,
                move |rw| {
                    let targets: Vec<DonationEntity> = chunk
                        .iter()
                        .filter_map(|donation_id| {
                            rw.get()
                                .secondary::<DonationEntity>(DonationEntityKey::id, *donation_id)
                                .map_err(|e| {
                                    raise_error!(format!("{:#?}", e), ErrorCode::InternalError)
                                })
                                .ok()
                                .flatten()
                        })
                        .filter(|d| {
                            d.status == DonationStatus::Available && d.expiry_datetime < now
                        })
                        .collect();
                    Ok(targets)
                },
                move |data| {
                    let mut result = Vec::new();
                    for entity in data.iter() {
                        let mut updated = entity.clone();
                        updated.status = DonationStatus::Expired;
                        updated.updated_at = now;
                        result.push((entity.clone(), updated));
                    }
                    Ok(result)
                },
            )
            .await?;
            expired += applied.len();
        }

        Ok(expired)
    }

    async fn list_for_donor(&self, donor_id: u64) -> FoodLinkResult<Vec<DonationEntity>> {
        filter_by_secondary_key_impl(&self.store, DonationEntityKey::donor_id, donor_id).await
    }

    async fn list_by_status(&self, status: DonationStatus) -> FoodLinkResult<Vec<DonationEntity>> {
        filter_by_secondary_key_impl(&self.store, DonationEntityKey::status_code, status.code())
            .await
    }

    async fn paginate_all(
        &self,
        page: Option<u64>,
        page_size: Option<u64>,
        desc: Option<bool>,
    ) -> FoodLinkResult<Paginated<DonationEntity>> {
        paginate_query_primary_scan_all_impl(&self.store, page, page_size, desc).await
    }
}
