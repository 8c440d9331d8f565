use std::sync::Arc;

use chrono::DateTime;
use native_db::Builder;

use crate::modules::donation::entity::{DonationEntity, DonationStatus};
use crate::modules::donation::expiry::sweep;
use crate::modules::donation::lifecycle::{
    check_transition, create_donation, get_donation, list_donations, transition_donation, Actor,
    ActorRole, TransitionContext,
};
use crate::modules::donation::nativedb::{NativeDbDonationStore, DONATION_MODELS};
use crate::modules::donation::payload::DonationCreateRequest;
use crate::modules::donation::store::DonationStore;
use crate::modules::error::{code::ErrorCode, FoodLinkError};

const MS_PER_HOUR: i64 = 60 * 60 * 1000;

const DONOR: Actor = Actor {
    id: 11,
    role: ActorRole::Donor,
};
const NGO: Actor = Actor {
    id: 21,
    role: ActorRole::Ngo,
};
const RIDER: Actor = Actor {
    id: 31,
    role: ActorRole::Rider,
};

fn memory_store() -> NativeDbDonationStore {
    let db = Builder::new().create_in_memory(&DONATION_MODELS).unwrap();
    NativeDbDonationStore::init(Arc::new(db))
}

fn sample_request(cooked_time: &str) -> DonationCreateRequest {
    DonationCreateRequest {
        donor_name: "Anna's Kitchen".into(),
        contact_number: "+91 98765 43210".into(),
        address: "14 Hill Road, Bandra".into(),
        food_type: "cooked rice and dal".into(),
        quantity: 25,
        notes: Some("packed in foil trays".into()),
        pickup_time: cooked_time.into(),
        cooked_time: cooked_time.into(),
        shelf_life_hours: 2,
    }
}

fn cooked_ms(cooked_time: &str) -> i64 {
    DateTime::parse_from_rfc3339(cooked_time)
        .unwrap()
        .timestamp_millis()
}

fn error_code(error: FoodLinkError) -> ErrorCode {
    match error {
        FoodLinkError::Generic { code, .. } => code,
    }
}

#[test]
fn test_expiry_is_derived_exactly() {
    let cooked = "2025-11-02T12:00:00Z";
    let donation = DonationEntity::new(DONOR.id, sample_request(cooked)).unwrap();

    assert_eq!(
        donation.expiry_datetime,
        cooked_ms(cooked) + 2 * MS_PER_HOUR
    );
    assert_eq!(donation.status, DonationStatus::Available);
    assert_eq!(donation.donor_id, DONOR.id);
    assert!(donation.assigned_rider.is_none());
    assert!(donation.completed_at.is_none());
}

#[test]
fn test_creation_rejects_malformed_input() {
    let mut request = sample_request("2025-11-02T12:00:00Z");
    request.food_type = "   ".into();
    let error = DonationEntity::new(DONOR.id, request).unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidParameter);

    let mut request = sample_request("2025-11-02T12:00:00Z");
    request.shelf_life_hours = 0;
    let error = DonationEntity::new(DONOR.id, request).unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidParameter);

    let mut request = sample_request("2025-11-02T12:00:00Z");
    request.quantity = 0;
    let error = DonationEntity::new(DONOR.id, request).unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidParameter);

    let mut request = sample_request("2025-11-02T12:00:00Z");
    request.cooked_time = "yesterday evening".into();
    let error = DonationEntity::new(DONOR.id, request).unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidParameter);
}

#[test]
fn test_transition_table_edges() {
    // Legal edges
    check_transition(DonationStatus::Available, DonationStatus::Claimed, ActorRole::Ngo).unwrap();
    check_transition(DonationStatus::Available, DonationStatus::Claimed, ActorRole::Rider)
        .unwrap();
    check_transition(DonationStatus::Claimed, DonationStatus::PickedUp, ActorRole::Rider)
        .unwrap();
    check_transition(DonationStatus::PickedUp, DonationStatus::Completed, ActorRole::Ngo)
        .unwrap();
    check_transition(DonationStatus::Available, DonationStatus::Expired, ActorRole::System)
        .unwrap();
    check_transition(DonationStatus::Claimed, DonationStatus::Expired, ActorRole::System)
        .unwrap();

    // Expiry is reserved for the system
    let error =
        check_transition(DonationStatus::Available, DonationStatus::Expired, ActorRole::Rider)
            .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::PermissionDenied);

    // A donor cannot pick up their own listing
    let error =
        check_transition(DonationStatus::Claimed, DonationStatus::PickedUp, ActorRole::Donor)
            .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::PermissionDenied);

    // Backward and skipping edges do not exist
    let error =
        check_transition(DonationStatus::Claimed, DonationStatus::Available, ActorRole::Ngo)
            .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidTransition);
    let error =
        check_transition(DonationStatus::Available, DonationStatus::PickedUp, ActorRole::Rider)
            .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidTransition);

    // Terminal states never move again
    let error =
        check_transition(DonationStatus::Completed, DonationStatus::Claimed, ActorRole::Ngo)
            .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidTransition);
    let error =
        check_transition(DonationStatus::Expired, DonationStatus::Claimed, ActorRole::Rider)
            .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidTransition);
}

#[tokio::test]
async fn test_lifecycle_happy_path() {
    let store = memory_store();
    let created = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();

    let claimed = transition_donation(
        &store,
        created.id,
        DonationStatus::Claimed,
        RIDER,
        TransitionContext::default(),
    )
    .await
    .unwrap();
    assert_eq!(claimed.status, DonationStatus::Claimed);
    assert_eq!(claimed.assigned_rider, Some(RIDER.id));
    assert!(claimed.assigned_at.is_some());

    let picked_up = transition_donation(
        &store,
        created.id,
        DonationStatus::PickedUp,
        RIDER,
        TransitionContext::default(),
    )
    .await
    .unwrap();
    assert_eq!(picked_up.status, DonationStatus::PickedUp);

    let completed = transition_donation(
        &store,
        created.id,
        DonationStatus::Completed,
        NGO,
        TransitionContext::default(),
    )
    .await
    .unwrap();
    assert_eq!(completed.status, DonationStatus::Completed);
    assert!(completed.completed_at.is_some());

    // Terminal records never change again
    let error = transition_donation(
        &store,
        created.id,
        DonationStatus::Claimed,
        NGO,
        TransitionContext::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidTransition);
}

#[tokio::test]
async fn test_ngo_claim_dispatches_named_rider() {
    let store = memory_store();
    let created = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();

    let claimed = transition_donation(
        &store,
        created.id,
        DonationStatus::Claimed,
        NGO,
        TransitionContext {
            assigned_rider: Some(77),
        },
    )
    .await
    .unwrap();
    assert_eq!(claimed.assigned_rider, Some(77));
}

#[tokio::test]
async fn test_pickup_without_claim_is_rejected() {
    let store = memory_store();
    let created = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();

    let error = transition_donation(
        &store,
        created.id,
        DonationStatus::PickedUp,
        RIDER,
        TransitionContext::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidTransition);

    // The record is untouched
    let donation = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(donation.status, DonationStatus::Available);
}

#[tokio::test]
async fn test_unknown_donation_is_not_found() {
    let store = memory_store();
    let error = transition_donation(
        &store,
        424242,
        DonationStatus::Claimed,
        NGO,
        TransitionContext::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::ResourceNotFound);
}

#[tokio::test]
async fn test_second_claim_conflicts() {
    let store = memory_store();
    let created = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();

    transition_donation(
        &store,
        created.id,
        DonationStatus::Claimed,
        RIDER,
        TransitionContext::default(),
    )
    .await
    .unwrap();

    let other_rider = Actor {
        id: 32,
        role: ActorRole::Rider,
    };
    let error = transition_donation(
        &store,
        created.id,
        DonationStatus::Claimed,
        other_rider,
        TransitionContext::default(),
    )
    .await
    .unwrap_err();
    assert_eq!(error_code(error), ErrorCode::InvalidTransition);

    // The first rider keeps the assignment
    let donation = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(donation.assigned_rider, Some(RIDER.id));
}

#[tokio::test]
async fn test_concurrent_claims_exactly_one_wins() {
    let store = memory_store();
    let created = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();

    let other_rider = Actor {
        id: 32,
        role: ActorRole::Rider,
    };
    let (first, second) = tokio::join!(
        store.transition(
            created.id,
            DonationStatus::Claimed,
            RIDER,
            TransitionContext::default(),
        ),
        store.transition(
            created.id,
            DonationStatus::Claimed,
            other_rider,
            TransitionContext::default(),
        )
    );

    let winners = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    let loser = if first.is_ok() { second } else { first };
    assert_eq!(error_code(loser.unwrap_err()), ErrorCode::InvalidTransition);

    let donation = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(donation.status, DonationStatus::Claimed);
    assert!(donation.assigned_rider.is_some());
}

#[tokio::test]
async fn test_sweep_expires_only_overdue_available() {
    let store = memory_store();
    let cooked = "2025-01-01T00:00:00Z";
    let created = create_donation(&store, DONOR, sample_request(cooked))
        .await
        .unwrap();
    let expiry = cooked_ms(cooked) + 2 * MS_PER_HOUR;

    // One hour in: nothing to do
    let affected = sweep(&store, cooked_ms(cooked) + MS_PER_HOUR).await.unwrap();
    assert_eq!(affected, 0);

    // Exactly at the deadline the listing is still alive
    let affected = sweep(&store, expiry).await.unwrap();
    assert_eq!(affected, 0);

    // Three hours in: one hour past expiry
    let now = cooked_ms(cooked) + 3 * MS_PER_HOUR;
    let affected = sweep(&store, now).await.unwrap();
    assert_eq!(affected, 1);

    let donation = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(donation.status, DonationStatus::Expired);
    assert_eq!(donation.updated_at, now);

    // An immediate re-run with the same clock is a no-op
    let affected = sweep(&store, now).await.unwrap();
    assert_eq!(affected, 0);
}

#[tokio::test]
async fn test_sweep_never_touches_claimed_listings() {
    let store = memory_store();
    let cooked = "2025-01-01T00:00:00Z";
    let created = create_donation(&store, DONOR, sample_request(cooked))
        .await
        .unwrap();

    // Claimed half an hour in
    transition_donation(
        &store,
        created.id,
        DonationStatus::Claimed,
        RIDER,
        TransitionContext::default(),
    )
    .await
    .unwrap();

    // Well past the deadline the claim still protects the listing
    let affected = sweep(&store, cooked_ms(cooked) + 3 * MS_PER_HOUR)
        .await
        .unwrap();
    assert_eq!(affected, 0);

    let donation = store.find(created.id).await.unwrap().unwrap();
    assert_eq!(donation.status, DonationStatus::Claimed);
}

#[tokio::test]
async fn test_sweep_handles_mixed_batches() {
    let store = memory_store();
    let cooked = "2025-01-01T00:00:00Z";

    let overdue_a = create_donation(&store, DONOR, sample_request(cooked))
        .await
        .unwrap();
    let overdue_b = create_donation(&store, DONOR, sample_request(cooked))
        .await
        .unwrap();
    let mut fresh_request = sample_request(cooked);
    fresh_request.shelf_life_hours = 48;
    let fresh = create_donation(&store, DONOR, fresh_request).await.unwrap();

    let affected = sweep(&store, cooked_ms(cooked) + 3 * MS_PER_HOUR)
        .await
        .unwrap();
    assert_eq!(affected, 2);

    for id in [overdue_a.id, overdue_b.id] {
        let donation = store.find(id).await.unwrap().unwrap();
        assert_eq!(donation.status, DonationStatus::Expired);
    }
    let donation = store.find(fresh.id).await.unwrap().unwrap();
    assert_eq!(donation.status, DonationStatus::Available);
}

#[tokio::test]
async fn test_donor_listing_is_scoped_and_recent_first() {
    let store = memory_store();
    let other_donor = Actor {
        id: 12,
        role: ActorRole::Donor,
    };

    let first = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let second = create_donation(&store, DONOR, sample_request("2025-11-02T13:00:00Z"))
        .await
        .unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    create_donation(&store, other_donor, sample_request("2025-11-02T14:00:00Z"))
        .await
        .unwrap();

    let page = list_donations(&store, DONOR, None, None, None, Some(true))
        .await
        .unwrap();
    assert_eq!(page.total_items, 2);
    assert!(page.items.iter().all(|d| d.donor_id == DONOR.id));
    assert_eq!(page.items[0].id, second.id);
    assert_eq!(page.items[1].id, first.id);
}

#[tokio::test]
async fn test_ngo_sees_all_riders_see_operative() {
    let store = memory_store();

    let delivered = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();
    create_donation(&store, DONOR, sample_request("2025-11-02T13:00:00Z"))
        .await
        .unwrap();

    for target in [
        DonationStatus::Claimed,
        DonationStatus::PickedUp,
        DonationStatus::Completed,
    ] {
        transition_donation(&store, delivered.id, target, RIDER, TransitionContext::default())
            .await
            .unwrap();
    }

    let ngo_page = list_donations(&store, NGO, None, None, None, Some(true))
        .await
        .unwrap();
    assert_eq!(ngo_page.total_items, 2);

    let rider_page = list_donations(&store, RIDER, None, None, None, Some(true))
        .await
        .unwrap();
    assert_eq!(rider_page.total_items, 1);
    assert_eq!(rider_page.items[0].status, DonationStatus::Available);

    // Status filter narrows the NGO view
    let completed_page = list_donations(
        &store,
        NGO,
        Some(DonationStatus::Completed),
        None,
        None,
        Some(true),
    )
    .await
    .unwrap();
    assert_eq!(completed_page.total_items, 1);
    assert_eq!(completed_page.items[0].id, delivered.id);
}

#[tokio::test]
async fn test_donor_cannot_fetch_foreign_listing() {
    let store = memory_store();
    let other_donor = Actor {
        id: 12,
        role: ActorRole::Donor,
    };
    let created = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();

    let error = get_donation(&store, created.id, other_donor).await.unwrap_err();
    assert_eq!(error_code(error), ErrorCode::ResourceNotFound);

    let donation = get_donation(&store, created.id, NGO).await.unwrap();
    assert_eq!(donation.id, created.id);
}

#[tokio::test]
async fn test_duplicate_submissions_create_distinct_records() {
    let store = memory_store();
    let first = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();
    let second = create_donation(&store, DONOR, sample_request("2025-11-02T12:00:00Z"))
        .await
        .unwrap();

    assert_ne!(first.id, second.id);
    let page = list_donations(&store, DONOR, None, None, None, Some(true))
        .await
        .unwrap();
    assert_eq!(page.total_items, 2);
}
