use std::sync::Arc;

use native_db::Builder;

use crate::modules::database::{
    async_find_impl, batch_delete_impl, insert_impl, list_all_impl, update_impl, META_MODELS,
};
use crate::modules::error::code::ErrorCode;
use crate::modules::overview::metrics::DailyMetrics;
use crate::raise_error;

fn memory_meta_db() -> Arc<native_db::Database<'static>> {
    Arc::new(Builder::new().create_in_memory(&META_MODELS).unwrap())
}

fn metric(id: u64, created_at: i64, value: u64) -> DailyMetrics {
    DailyMetrics {
        id,
        metric: "foodlink_donations_created_total".into(),
        created_at,
        value,
        label: "donations".into(),
    }
}

#[tokio::test]
async fn test_insert_and_find() {
    let db = memory_meta_db();
    insert_impl(&db, metric(1, 100, 7)).await.unwrap();

    let found: Option<DailyMetrics> = async_find_impl(&db, 1u64).await.unwrap();
    assert_eq!(found.unwrap().value, 7);

    let missing: Option<DailyMetrics> = async_find_impl(&db, 2u64).await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_update_impl_aborts_when_precondition_fails() {
    let db = memory_meta_db();
    insert_impl(&db, metric(1, 100, 7)).await.unwrap();

    let result = update_impl::<DailyMetrics>(
        &db,
        |rw| {
            let current: DailyMetrics = rw
                .get()
                .primary(1u64)
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
                .ok_or_else(|| {
                    raise_error!("metric not found".into(), ErrorCode::ResourceNotFound)
                })?;
            if current.value > 5 {
                return Err(raise_error!(
                    "value too large to touch".into(),
                    ErrorCode::InvalidTransition
                ));
            }
            Ok(current)
        },
        |current| {
            let mut updated = current.clone();
            updated.value = 0;
            Ok(updated)
        },
    )
    .await;

    assert!(result.is_err());
    // The aborted transaction left the record unchanged
    let found: Option<DailyMetrics> = async_find_impl(&db, 1u64).await.unwrap();
    assert_eq!(found.unwrap().value, 7);
}

#[tokio::test]
async fn test_update_impl_returns_updated_record() {
    let db = memory_meta_db();
    insert_impl(&db, metric(1, 100, 3)).await.unwrap();

    let updated = update_impl::<DailyMetrics>(
        &db,
        |rw| {
            rw.get()
                .primary(1u64)
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
                .ok_or_else(|| {
                    raise_error!("metric not found".into(), ErrorCode::ResourceNotFound)
                })
        },
        |current| {
            let mut updated = current.clone();
            updated.value += 1;
            Ok(updated)
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.value, 4);
}

#[tokio::test]
async fn test_batch_delete_by_range() {
    let db = memory_meta_db();
    for i in 1..=6u64 {
        insert_impl(&db, metric(i, i as i64, i * 100)).await.unwrap();
    }

    let deleted = batch_delete_impl(&db, |rw| {
        let to_delete: Vec<DailyMetrics> = rw
            .scan()
            .secondary(crate::modules::overview::metrics::DailyMetricsKey::created_at)
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
            .range(..3i64)
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
        Ok(to_delete)
    })
    .await
    .unwrap();

    assert_eq!(deleted, 2);
    let remaining: Vec<DailyMetrics> = list_all_impl(&db).await.unwrap();
    assert_eq!(remaining.len(), 4);
}
