// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use crate::modules::context::FoodLinkTask;
use crate::modules::donation::task::ExpirySweepTask;
use crate::modules::overview::clean::MetricsCleanTask;
use crate::modules::overview::saver::MetricsSaveTask;

pub struct PeriodicTasks;

impl PeriodicTasks {
    pub fn start_background_tasks() {
        ExpirySweepTask::start();
        MetricsSaveTask::start();
        MetricsCleanTask::start();
    }
}
