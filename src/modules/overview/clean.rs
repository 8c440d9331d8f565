// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::{
    modules::{
        context::FoodLinkTask, overview::metrics::DailyMetrics, scheduler::periodic::PeriodicTask,
    },
    utc_now,
};

use std::time::Duration;

const TASK_INTERVAL: Duration = Duration::from_secs(60 * 60); // every hour
const METRIC_RETENTION_MS: i64 = 30 * 24 * 60 * 60 * 1000; // 30 days

///This task cleans up daily metrics entries older than the retention window.
pub struct MetricsCleanTask;

impl FoodLinkTask for MetricsCleanTask {
    fn start() {
        let periodic_task = PeriodicTask::new("daily-metrics-cleaner");

        let task = move |_ctx: Option<u64>| {
            Box::pin(async move {
                let now = utc_now!();
                let expire_before = now - METRIC_RETENTION_MS;
                DailyMetrics::clean(expire_before).await
            })
        };

        periodic_task.start(task, None, TASK_INTERVAL, false, false);
    }
}
