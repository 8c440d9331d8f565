// Copyright © 2025 foodlink.org
// Licensed under FoodLink License Agreement v1.0
// Unauthorized copying, modification, or distribution is prohibited.

pub mod cli;
pub mod dir;
