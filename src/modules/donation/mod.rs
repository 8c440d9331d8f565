// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod entity;
pub mod expiry;
pub mod lifecycle;
pub mod nativedb;
pub mod payload;
pub mod store;
pub mod task;
#[cfg(test)]
mod tests;
