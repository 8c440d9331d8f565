use itertools::Itertools;
use native_db::*;
use native_model::{native_model, Model};
use poem_openapi::Object;
use serde::{Deserialize, Serialize};

use crate::{
    id,
    modules::{
        database::{batch_delete_impl, insert_impl, list_all_impl, manager::DB_MANAGER},
        error::{code::ErrorCode, FoodLinkResult},
    },
    raise_error,
};

#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, Object)]
#[native_model(id = 2, version = 1)]
#[native_db]
pub struct DailyMetrics {
    #[primary_key]
    pub id: u64,
    pub metric: String,
    #[secondary_key]
    pub created_at: i64,
    pub value: u64,
    pub label: String,
}

impl DailyMetrics {
    pub async fn save(
        metric: String,
        value: u64,
        label: String,
        created_at: i64,
    ) -> FoodLinkResult<()> {
        let item = DailyMetrics {
            id: id!(96),
            metric,
            created_at,
            value,
            label,
        };
        insert_impl(DB_MANAGER.meta_db(), item).await
    }

    pub async fn list_all() -> FoodLinkResult<Vec<DailyMetrics>> {
        list_all_impl(DB_MANAGER.meta_db()).await
    }

    pub async fn clean(cut: i64) -> FoodLinkResult<()> {
        batch_delete_impl(DB_MANAGER.meta_db(), move |rw| {
            let to_delete: Vec<DailyMetrics> = rw
                .scan()
                .secondary(DailyMetricsKey::created_at)
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
                .range(..cut)
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?
                .try_collect()
                .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
            Ok(to_delete)
        })
        .await?;
        Ok(())
    }
}
