// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::{
    modules::{
        context::FoodLinkTask,
        donation::{expiry::sweep, nativedb::DONATION_STORE},
        scheduler::periodic::PeriodicTask,
        settings::cli::SETTINGS,
    },
    utc_now,
};
use std::time::Duration;

/// Periodically demotes stale available listings to expired. A failed pass is
/// logged by the periodic runner and retried on the next tick.
pub struct ExpirySweepTask;

impl FoodLinkTask for ExpirySweepTask {
    fn start() {
        let periodic_task = PeriodicTask::new("donation-expiry-sweeper");

        let task = move |_: Option<u64>| {
            Box::pin(async move {
                sweep(&*DONATION_STORE, utc_now!()).await?;
                Ok(())
            })
        };

        periodic_task.start(
            task,
            None,
            Duration::from_secs(SETTINGS.foodlink_expiry_sweep_interval_seconds),
            false,
            false,
        );
    }
}
