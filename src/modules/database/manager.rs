use crate::modules::context::Initialize;
use crate::modules::database::META_MODELS;
use crate::modules::donation::nativedb::DONATION_MODELS;
use crate::modules::error::{code::ErrorCode, FoodLinkError, FoodLinkResult};
use crate::modules::settings::cli::SETTINGS;
use crate::modules::settings::dir::DATA_DIR_MANAGER;
use crate::raise_error;
use native_db::{Builder, Database};
use std::sync::{Arc, LazyLock};
use tracing::info;

pub static DB_MANAGER: LazyLock<DatabaseManager> = LazyLock::new(DatabaseManager::new);

pub struct DatabaseManager {
    /// Donation records database instance
    donation_db: Arc<Database<'static>>,
    /// Metadata database instance (daily metrics)
    meta_db: Arc<Database<'static>>,
}

impl DatabaseManager {
    fn new() -> Self {
        std::fs::create_dir_all(&DATA_DIR_MANAGER.root_dir)
            .expect("Failed to create the data directory");
        let donation_db =
            Self::init_donation_database().expect("Failed to initialize donation database");
        let meta_db = Self::init_meta_database().expect("Failed to initialize metadata database");
        DatabaseManager {
            donation_db,
            meta_db,
        }
    }

    /// Get a reference to the donation records database
    pub fn donation_db(&self) -> &Arc<Database<'static>> {
        &self.donation_db
    }

    /// Get a reference to the metadata database
    pub fn meta_db(&self) -> &Arc<Database<'static>> {
        &self.meta_db
    }

    fn init_donation_database() -> FoodLinkResult<Arc<Database<'static>>> {
        info!(
            "Initializing donation database at: {:?}",
            &DATA_DIR_MANAGER.donation_db
        );

        let mut database = Builder::new()
            .set_cache_size(
                SETTINGS
                    .foodlink_donation_cache_size
                    .unwrap_or(134217728)
                    .max(67108864) as usize,
            ) //default 128MB
            .create(&DONATION_MODELS, DATA_DIR_MANAGER.donation_db.clone())
            .map_err(Self::handle_database_error)?;
        database
            .compact()
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
        Ok(Arc::new(database))
    }

    fn init_meta_database() -> FoodLinkResult<Arc<Database<'static>>> {
        let mut database = Builder::new()
            .set_cache_size(
                SETTINGS
                    .foodlink_metadata_cache_size
                    .unwrap_or(134217728)
                    .max(67108864) as usize,
            ) //default 128MB
            .create(&META_MODELS, DATA_DIR_MANAGER.meta_db.clone())
            .map_err(Self::handle_database_error)?;
        database
            .compact()
            .map_err(|e| raise_error!(format!("{:#?}", e), ErrorCode::InternalError))?;
        Ok(Arc::new(database))
    }

    fn handle_database_error(error: native_db::db_type::Error) -> FoodLinkError {
        match error {
            native_db::db_type::Error::RedbDatabaseError(database_error) => match database_error {
                redb::DatabaseError::DatabaseAlreadyOpen => {
                    raise_error!(
                        "Database is already open by another instance".into(),
                        ErrorCode::InternalError
                    )
                }
                other => {
                    raise_error!(
                        format!("Database error: {:?}", other),
                        ErrorCode::InternalError
                    )
                }
            },
            other => {
                raise_error!(
                    format!("Failed to create database: {:?}", other),
                    ErrorCode::InternalError
                )
            }
        }
    }
}

impl Initialize for DatabaseManager {
    async fn initialize() -> FoodLinkResult<()> {
        let _ = (DB_MANAGER.donation_db(), DB_MANAGER.meta_db());
        Ok(())
    }
}
