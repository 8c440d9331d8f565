// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::LazyLock;

use crate::modules::error::FoodLinkResult;
use crate::utc_now;

pub mod status;

pub trait Initialize {
    async fn initialize() -> FoodLinkResult<()>;
}

pub trait FoodLinkTask {
    fn start();
}

pub static FOODLINK_CONTEXT: LazyLock<FoodLinkContext> = LazyLock::new(FoodLinkContext::new);

pub struct FoodLinkContext {
    started_at: i64,
}

impl FoodLinkContext {
    fn new() -> Self {
        Self {
            started_at: utc_now!(),
        }
    }

    pub fn uptime_ms(&self) -> i64 {
        utc_now!() - self.started_at
    }
}

impl Initialize for FoodLinkContext {
    async fn initialize() -> FoodLinkResult<()> {
        // Force construction so uptime is measured from process start.
        let _ = FOODLINK_CONTEXT.started_at;
        Ok(())
    }
}
