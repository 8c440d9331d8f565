use mimalloc::MiMalloc;
use modules::{
    context::{FoodLinkContext, Initialize},
    error::FoodLinkResult,
    logger,
    rest::start_http_server,
    tasks::PeriodicTasks,
};
use tracing::info;

use crate::modules::{
    common::signal::SignalManager, database::manager::DatabaseManager, metrics::MetricsService,
    settings::dir::DataDirManager,
};

mod modules;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

static LOGO: &str = r#"
  _____                _ _     _       _
 |  ___|__   ___   __| | |   (_)_ __ | | __
 | |_ / _ \ / _ \ / _` | |   | | '_ \| |/ /
 |  _| (_) | (_) | (_| | |___| | | | |   <
 |_|  \___/ \___/ \__,_|_____|_|_| |_|_|\_\

"#;

#[tokio::main]
async fn main() -> FoodLinkResult<()> {
    logger::initialize_logging();
    info!("{}", LOGO);
    info!("Starting foodlink-server");
    info!("Version:  {}", foodlink_version!());
    info!("Git:      [{}]", env!("GIT_HASH"));

    if let Err(error) = initialize().await {
        eprintln!("{:?}", error);
        return Err(error);
    }

    start_http_server().await?;
    Ok(())
}

/// Initialize the system by validating settings and starting necessary tasks.
async fn initialize() -> FoodLinkResult<()> {
    SignalManager::initialize().await?;
    DataDirManager::initialize().await?;
    MetricsService::initialize().await?;
    DatabaseManager::initialize().await?;
    FoodLinkContext::initialize().await?;
    PeriodicTasks::start_background_tasks();
    Ok(())
}
