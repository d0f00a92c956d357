mod config;
mod factory;
mod models;
mod postgres;
mod sqlite;

pub use config::{DatabaseConfig, DatabaseType};
pub use factory::create_store;
pub use models::{Campaign, CampaignStatus};
pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use uuid::Uuid;

/// Persistence for finished campaign runs.
#[async_trait]
pub trait Store: Send + Sync {
    /// Initialize the database schema.
    async fn init(&self) -> crate::Result<()>;

    async fn save_campaign(&self, campaign: Campaign) -> crate::Result<()>;
    async fn get_campaign(&self, id: Uuid) -> crate::Result<Option<Campaign>>;
    async fn list_campaigns(&self, limit: i64, offset: i64) -> crate::Result<Vec<Campaign>>;
    async fn list_campaigns_for_user(
        &self,
        user_id: &str,
        limit: i64,
    ) -> crate::Result<Vec<Campaign>>;
    async fn delete_campaign(&self, id: Uuid) -> crate::Result<()>;
}
