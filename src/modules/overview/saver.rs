// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use ahash::AHashMap;
use std::sync::{LazyLock, Mutex};

use crate::{
    modules::{
        context::FoodLinkTask,
        donation::entity::DonationStatus,
        error::FoodLinkResult,
        metrics::{
            FOODLINK_DONATIONS_CREATED_TOTAL, FOODLINK_DONATIONS_EXPIRED_TOTAL,
            FOODLINK_DONATION_TRANSITIONS_TOTAL, METRIC_DONATIONS_CREATED_TOTAL,
            METRIC_DONATIONS_EXPIRED_TOTAL, METRIC_DONATION_TRANSITIONS_TOTAL,
        },
        overview::metrics::DailyMetrics,
        scheduler::periodic::PeriodicTask,
    },
    utc_now,
};

use std::time::Duration;

const TASK_INTERVAL: Duration = Duration::from_secs(60); // every 1 min

static METRIC_CACHE: LazyLock<MetricCache> = LazyLock::new(|| MetricCache {
    last_values: Mutex::new(AHashMap::new()),
});

struct MetricCache {
    last_values: Mutex<AHashMap<String, u64>>,
}

impl MetricCache {
    fn calculate_delta(&self, metric_name: &str, label: &str, current_value: u64) -> u64 {
        let key = format!("{}_{}", metric_name, label);
        let mut last_values = self.last_values.lock().unwrap();

        let delta = match last_values.get(&key) {
            Some(last_value) => {
                if current_value >= *last_value {
                    current_value - *last_value
                } else {
                    current_value
                }
            }
            None => current_value,
        };

        last_values.insert(key, current_value);
        delta
    }
}

async fn save_delta(metric: &str, label: &str, current_value: u64) -> FoodLinkResult<()> {
    let delta = METRIC_CACHE.calculate_delta(metric, label, current_value);
    if delta > 0 {
        DailyMetrics::save(metric.into(), delta, label.into(), utc_now!()).await?;
    }
    Ok(())
}

/// Periodically snapshots counter deltas into the metadata database so
/// dashboards can chart daily donation activity.
pub struct MetricsSaveTask;

impl FoodLinkTask for MetricsSaveTask {
    fn start() {
        let periodic_task = PeriodicTask::new("daily-metrics-saver");

        let task = move |_: Option<u64>| {
            Box::pin(async move {
                save_delta(
                    METRIC_DONATIONS_CREATED_TOTAL,
                    "donations",
                    FOODLINK_DONATIONS_CREATED_TOTAL.get(),
                )
                .await?;
                save_delta(
                    METRIC_DONATION_TRANSITIONS_TOTAL,
                    DonationStatus::Completed.label(),
                    FOODLINK_DONATION_TRANSITIONS_TOTAL
                        .with_label_values(&[DonationStatus::Completed.label()])
                        .get(),
                )
                .await?;
                save_delta(
                    METRIC_DONATIONS_EXPIRED_TOTAL,
                    "donations",
                    FOODLINK_DONATIONS_EXPIRED_TOTAL.get(),
                )
                .await?;
                Ok(())
            })
        };

        periodic_task.start(task, None, TASK_INTERVAL, false, false);
    }
}
