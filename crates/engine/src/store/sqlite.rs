use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Row, Sqlite};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::store::{Campaign, Store};
use crate::{Error, Result};

pub struct SqliteStore {
    pool: Pool<Sqlite>,
}

impl SqliteStore {
    pub async fn new(path: &str) -> Result<Self> {
        info!("Connecting to SQLite database: {}", path);

        let options = SqliteConnectOptions::from_str(path)
            .map_err(Error::Sqlx)?
            .create_if_missing(true);

        // A pooled ":memory:" target hands every pool connection its own
        // empty database, so in-memory stores keep one long-lived connection.
        let pool_options = if path.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new()
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!("Failed to connect to SQLite: {}", e);
            Error::Sqlx(e)
        })?;

        Ok(Self { pool })
    }
}

fn campaign_from_row(r: &SqliteRow) -> Result<Campaign> {
    let business_info = serde_json::from_str(&r.get::<String, _>("business_info"))?;
    let campaign_info = serde_json::from_str(&r.get::<String, _>("campaign_info"))?;

    Ok(Campaign {
        id: r.get::<String, _>("id").parse()?,
        user_id: r.get("user_id"),
        status: r.get::<String, _>("status").parse()?,
        business_info,
        campaign_info,
        previous_performance: r.get("previous_performance"),
        ad_copy: r.get("ad_copy"),
        image_prompt: r.get("image_prompt"),
        image_url: r.get("image_url"),
        targeting_recommendations: r.get("targeting_recommendations"),
        error: r.get("error"),
        created_at: r.get("created_at"),
        updated_at: r.get("updated_at"),
    })
}

#[async_trait]
impl Store for SqliteStore {
    async fn init(&self) -> Result<()> {
        info!("Running database migrations");

        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to run migrations: {}", e);
                Error::Migrate(e)
            })?;

        Ok(())
    }

    async fn save_campaign(&self, campaign: Campaign) -> Result<()> {
        debug!("Saving campaign: {}", campaign.id);

        let business_info = serde_json::to_string(&campaign.business_info)?;
        let campaign_info = serde_json::to_string(&campaign.campaign_info)?;

        sqlx::query(
            r#"
            INSERT INTO campaigns (
                id, user_id, status, business_info, campaign_info,
                previous_performance, ad_copy, image_prompt, image_url,
                targeting_recommendations, error, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
            ON CONFLICT(id) DO UPDATE SET
                status = excluded.status,
                ad_copy = excluded.ad_copy,
                image_prompt = excluded.image_prompt,
                image_url = excluded.image_url,
                targeting_recommendations = excluded.targeting_recommendations,
                error = excluded.error,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(campaign.id.to_string())
        .bind(&campaign.user_id)
        .bind(campaign.status.to_string())
        .bind(business_info)
        .bind(campaign_info)
        .bind(&campaign.previous_performance)
        .bind(&campaign.ad_copy)
        .bind(&campaign.image_prompt)
        .bind(&campaign.image_url)
        .bind(&campaign.targeting_recommendations)
        .bind(&campaign.error)
        .bind(campaign.created_at)
        .bind(campaign.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn get_campaign(&self, id: Uuid) -> Result<Option<Campaign>> {
        debug!("Getting campaign: {}", id);

        let row = sqlx::query("SELECT * FROM campaigns WHERE id = ?1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| campaign_from_row(&r)).transpose()
    }

    async fn list_campaigns(&self, limit: i64, offset: i64) -> Result<Vec<Campaign>> {
        let rows = sqlx::query(
            "SELECT * FROM campaigns ORDER BY created_at DESC LIMIT ?1 OFFSET ?2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(campaign_from_row).collect()
    }

    async fn list_campaigns_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<Campaign>> {
        let rows = sqlx::query(
            "SELECT * FROM campaigns WHERE user_id = ?1 ORDER BY created_at DESC LIMIT ?2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(campaign_from_row).collect()
    }

    async fn delete_campaign(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM campaigns WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::{BusinessInfo, CampaignInfo, CampaignState};

    async fn test_store() -> SqliteStore {
        let store = SqliteStore::new(":memory:").await.unwrap();
        store.init().await.unwrap();
        store
    }

    fn sample_campaign(user_id: Option<&str>) -> Campaign {
        let mut state = CampaignState::new(
            BusinessInfo {
                business_name: "Acme Coffee".to_string(),
                industry: "Food & Beverage".to_string(),
                target_audience: "young professionals".to_string(),
            },
            CampaignInfo {
                campaign_goal: "increase store visits".to_string(),
                platform: "Instagram".to_string(),
                tone: "friendly".to_string(),
                visual_style: "bright and modern".to_string(),
            },
            None,
        );
        state.ad_copy = Some("the copy".to_string());
        Campaign::from_state(state, user_id.map(String::from))
    }

    #[tokio::test]
    async fn save_and_get_round_trip() {
        let store = test_store().await;
        let campaign = sample_campaign(Some("user-1"));
        store.save_campaign(campaign.clone()).await.unwrap();

        let loaded = store.get_campaign(campaign.id).await.unwrap().unwrap();
        assert_eq!(loaded.id, campaign.id);
        assert_eq!(loaded.status, campaign.status);
        assert_eq!(loaded.ad_copy.as_deref(), Some("the copy"));
        assert_eq!(
            loaded.business_info.business_name,
            campaign.business_info.business_name
        );
    }

    #[tokio::test]
    async fn get_missing_campaign_returns_none() {
        let store = test_store().await;
        assert!(store.get_campaign(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn list_filters_by_user() {
        let store = test_store().await;
        store.save_campaign(sample_campaign(Some("alice"))).await.unwrap();
        store.save_campaign(sample_campaign(Some("alice"))).await.unwrap();
        store.save_campaign(sample_campaign(Some("bob"))).await.unwrap();

        let all = store.list_campaigns(10, 0).await.unwrap();
        assert_eq!(all.len(), 3);

        let alice = store.list_campaigns_for_user("alice", 10).await.unwrap();
        assert_eq!(alice.len(), 2);

        let nobody = store.list_campaigns_for_user("carol", 10).await.unwrap();
        assert!(nobody.is_empty());
    }

    #[tokio::test]
    async fn delete_removes_the_row() {
        let store = test_store().await;
        let campaign = sample_campaign(None);
        store.save_campaign(campaign.clone()).await.unwrap();
        store.delete_campaign(campaign.id).await.unwrap();
        assert!(store.get_campaign(campaign.id).await.unwrap().is_none());
    }
}
