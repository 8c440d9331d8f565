// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

use std::time::Instant;

use tracing::{debug, info};

use crate::modules::donation::store::DonationStore;
use crate::modules::error::FoodLinkResult;
use crate::modules::metrics::{FOODLINK_DONATIONS_EXPIRED_TOTAL, FOODLINK_SWEEP_DURATION};

/// One pass of the expiry sweeper: expire every available listing whose
/// deadline precedes `now`.
///
/// The sweeper holds no state between passes; `now` is injected so the
/// deadline comparison is deterministic under test. Listings already claimed
/// or picked up are left alone even when overdue.
pub async fn sweep<S: DonationStore>(store: &S, now: i64) -> FoodLinkResult<usize> {
    let start = Instant::now();
    let expired = store.expire_overdue(now).await?;
    FOODLINK_SWEEP_DURATION.observe(start.elapsed().as_secs_f64());

    if expired > 0 {
        FOODLINK_DONATIONS_EXPIRED_TOTAL.inc_by(expired as u64);
        info!(count = expired, "marked stale donations as expired");
    } else {
        debug!("no available donations have expired");
    }
    Ok(expired)
}
