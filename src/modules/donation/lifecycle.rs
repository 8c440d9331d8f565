// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::database::Paginated;
use crate::modules::donation::entity::{DonationEntity, DonationStatus};
use crate::modules::donation::payload::DonationCreateRequest;
use crate::modules::donation::store::DonationStore;
use crate::modules::error::{code::ErrorCode, FoodLinkResult};
use crate::modules::metrics::{
    FOODLINK_DONATIONS_CREATED_TOTAL, FOODLINK_DONATION_TRANSITIONS_TOTAL,
};
use crate::raise_error;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ActorRole {
    Donor,
    Ngo,
    Rider,
    /// Reserved for internal callers such as the expiry sweeper; never
    /// accepted from a request.
    System,
}

impl ActorRole {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "donor" => Some(ActorRole::Donor),
            "ngo" => Some(ActorRole::Ngo),
            "rider" => Some(ActorRole::Rider),
            _ => None,
        }
    }
}

impl fmt::Display for ActorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let role_str = match self {
            ActorRole::Donor => "donor",
            ActorRole::Ngo => "ngo",
            ActorRole::Rider => "rider",
            ActorRole::System => "system",
        };
        write!(f, "{}", role_str)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Actor {
    pub id: u64,
    pub role: ActorRole,
}

impl Actor {
    pub const SYSTEM: Actor = Actor {
        id: 0,
        role: ActorRole::System,
    };
}

/// Extra data carried by a transition request. Currently only claims use it,
/// to name the rider being dispatched.
#[derive(Clone, Copy, Debug, Default)]
pub struct TransitionContext {
    pub assigned_rider: Option<u64>,
}

type TransitionRule = (DonationStatus, DonationStatus, &'static [ActorRole]);

/// The complete set of legal lifecycle edges, checked in one place. Expiry
/// edges are reserved for the system; everything else is gated on the role
/// acting on the listing.
const LEGAL_TRANSITIONS: &[TransitionRule] = &[
    (
        DonationStatus::Available,
        DonationStatus::Claimed,
        &[ActorRole::Ngo, ActorRole::Rider],
    ),
    (
        DonationStatus::Claimed,
        DonationStatus::PickedUp,
        &[ActorRole::Rider],
    ),
    (
        DonationStatus::PickedUp,
        DonationStatus::Completed,
        &[ActorRole::Rider, ActorRole::Ngo],
    ),
    (
        DonationStatus::Available,
        DonationStatus::Expired,
        &[ActorRole::System],
    ),
    (
        DonationStatus::Claimed,
        DonationStatus::Expired,
        &[ActorRole::System],
    ),
];

pub fn check_transition(
    from: DonationStatus,
    to: DonationStatus,
    role: ActorRole,
) -> FoodLinkResult<()> {
    if from.is_terminal() {
        return Err(raise_error!(
            format!("The donation is {} and can no longer change.", from),
            ErrorCode::InvalidTransition
        ));
    }
    let rule = LEGAL_TRANSITIONS
        .iter()
        .find(|(f, t, _)| *f == from && *t == to)
        .ok_or_else(|| {
            raise_error!(
                format!("A donation cannot move from {} to {}.", from, to),
                ErrorCode::InvalidTransition
            )
        })?;
    if !rule.2.contains(&role) {
        return Err(raise_error!(
            format!("A {} is not allowed to move a donation from {} to {}.", role, from, to),
            ErrorCode::PermissionDenied
        ));
    }
    Ok(())
}

pub async fn create_donation<S: DonationStore>(
    store: &S,
    actor: Actor,
    request: DonationCreateRequest,
) -> FoodLinkResult<DonationEntity> {
    if !matches!(actor.role, ActorRole::Donor | ActorRole::Ngo) {
        return Err(raise_error!(
            "Only donors and NGOs can list donations.".into(),
            ErrorCode::PermissionDenied
        ));
    }
    let entity = DonationEntity::new(actor.id, request)?;
    store.insert(entity.clone()).await?;
    FOODLINK_DONATIONS_CREATED_TOTAL.inc();
    info!(
        donation_id = entity.id,
        donor_id = entity.donor_id,
        expiry_datetime = entity.expiry_datetime,
        "donation listed"
    );
    Ok(entity)
}

pub async fn transition_donation<S: DonationStore>(
    store: &S,
    donation_id: u64,
    target: DonationStatus,
    actor: Actor,
    context: TransitionContext,
) -> FoodLinkResult<DonationEntity> {
    let updated = store.transition(donation_id, target, actor, context).await?;
    FOODLINK_DONATION_TRANSITIONS_TOTAL
        .with_label_values(&[updated.status.label()])
        .inc();
    info!(
        donation_id = updated.id,
        status = %updated.status,
        actor_id = actor.id,
        actor_role = %actor.role,
        "donation transitioned"
    );
    Ok(updated)
}

pub async fn get_donation<S: DonationStore>(
    store: &S,
    donation_id: u64,
    actor: Actor,
) -> FoodLinkResult<DonationEntity> {
    let donation = store.find(donation_id).await?.ok_or_else(|| {
        raise_error!(
            format!("The donation with id={} was not found.", donation_id),
            ErrorCode::ResourceNotFound
        )
    })?;
    // Donors only ever see their own listings; an id belonging to someone
    // else is indistinguishable from a missing one.
    if actor.role == ActorRole::Donor && donation.donor_id != actor.id {
        return Err(raise_error!(
            format!("The donation with id={} was not found.", donation_id),
            ErrorCode::ResourceNotFound
        ));
    }
    Ok(donation)
}

/// Statuses a rider needs to see to do their job.
const RIDER_VISIBLE: &[DonationStatus] = &[
    DonationStatus::Available,
    DonationStatus::Claimed,
    DonationStatus::PickedUp,
];

pub async fn list_donations<S: DonationStore>(
    store: &S,
    actor: Actor,
    status: Option<DonationStatus>,
    page: Option<u64>,
    page_size: Option<u64>,
    desc: Option<bool>,
) -> FoodLinkResult<Paginated<DonationEntity>> {
    match actor.role {
        ActorRole::Donor => {
            let mut items = store.list_for_donor(actor.id).await?;
            if let Some(status) = status {
                items.retain(|d| d.status == status);
            }
            sort_by_recency(&mut items, desc);
            crate::modules::common::paginated::paginate_vec(&items, page, page_size)
        }
        ActorRole::Ngo | ActorRole::System => match status {
            Some(status) => {
                let mut items = store.list_by_status(status).await?;
                sort_by_recency(&mut items, desc);
                crate::modules::common::paginated::paginate_vec(&items, page, page_size)
            }
            None => store.paginate_all(page, page_size, desc).await,
        },
        ActorRole::Rider => {
            let statuses: Vec<DonationStatus> = match status {
                Some(status) if RIDER_VISIBLE.contains(&status) => vec![status],
                Some(_) => vec![],
                None => RIDER_VISIBLE.to_vec(),
            };
            let mut items = Vec::new();
            for status in statuses {
                items.extend(store.list_by_status(status).await?);
            }
            sort_by_recency(&mut items, desc);
            crate::modules::common::paginated::paginate_vec(&items, page, page_size)
        }
    }
}

fn sort_by_recency(items: &mut [DonationEntity], desc: Option<bool>) {
    items.sort_by_key(|d| (d.created_at, d.id));
    if desc.unwrap_or(true) {
        items.reverse();
    }
}
