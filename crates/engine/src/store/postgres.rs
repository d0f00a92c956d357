use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Pool, Postgres, Row};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::store::{Campaign, Store};
use crate::{Error, Result};

pub struct PostgresStore {
    pool: Pool<Postgres>,
}

impl PostgresStore {
    pub async fn new(connection_string: &str) -> Result<Self> {
        info!("Connecting to PostgreSQL database");

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await
            .map_err(|e| {
                error!("Failed to connect to PostgreSQL: {}", e);
                Error::Sqlx(e)
            })?;

        Ok(Self { pool })
    }
}

fn campaign_from_row(r: &PgRow) -> Result<Campaign> {
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
impl Store for PostgresStore {
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
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
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

        let row = sqlx::query("SELECT * FROM campaigns WHERE id = $1")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| campaign_from_row(&r)).transpose()
    }

    async fn list_campaigns(&self, limit: i64, offset: i64) -> Result<Vec<Campaign>> {
        let rows = sqlx::query(
            "SELECT * FROM campaigns ORDER BY created_at DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(campaign_from_row).collect()
    }

    async fn list_campaigns_for_user(&self, user_id: &str, limit: i64) -> Result<Vec<Campaign>> {
        let rows = sqlx::query(
            "SELECT * FROM campaigns WHERE user_id = $1 ORDER BY created_at DESC LIMIT $2",
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(campaign_from_row).collect()
    }

    async fn delete_campaign(&self, id: Uuid) -> Result<()> {
        sqlx::query("DELETE FROM campaigns WHERE id = $1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}
