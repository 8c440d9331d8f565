// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod common;
pub mod context;
pub mod database;
pub mod donation;
pub mod error;
pub mod logger;
pub mod metrics;
pub mod overview;
pub mod rest;
pub mod scheduler;
pub mod settings;
pub mod tasks;
pub mod utils;
