// src/profile/services.rs
//! Row access for the `profiles` table

use sqlx::SqlitePool;
use tracing::info;

use super::models::{Profile, SubscriptionTier, UpdateProfileRequest};
use crate::common::{safe_email_log, ApiError};

const PROFILE_COLUMNS: &str =
    "id, email, full_name, subscription_tier, subscription_date, created_at";

pub struct ProfileService {
    db: SqlitePool,
}

impl ProfileService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn find(&self, user_id: &str) -> Result<Option<Profile>, ApiError> {
        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE id = ?",
            PROFILE_COLUMNS
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(profile)
    }

    /// Look a profile up by id, falling back to email
    pub async fn find_by_id_or_email(&self, input: &str) -> Result<Option<Profile>, ApiError> {
        if let Some(profile) = self.find(input).await? {
            return Ok(Some(profile));
        }

        let profile = sqlx::query_as::<_, Profile>(&format!(
            "SELECT {} FROM profiles WHERE lower(email) = lower(?) ORDER BY created_at LIMIT 1",
            PROFILE_COLUMNS
        ))
        .bind(input)
        .fetch_optional(&self.db)
        .await?;

        Ok(profile)
    }

    /// Return the caller's profile, inserting a free one when missing.
    ///
    /// The flag reports whether a row was created.
    pub async fn ensure(
        &self,
        user_id: &str,
        email: &str,
        full_name: Option<&str>,
    ) -> Result<(Profile, bool), ApiError> {
        let email = Some(email).filter(|e| !e.is_empty());

        let inserted = sqlx::query(
            r#"
            INSERT INTO profiles (id, email, full_name, subscription_tier)
            VALUES (?, ?, ?, 'free')
            ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(email)
        .bind(full_name)
        .execute(&self.db)
        .await?
        .rows_affected()
            > 0;

        if inserted {
            info!(
                user_id = %user_id,
                email = %safe_email_log(email.unwrap_or_default()),
                "Created missing profile"
            );
        }

        let profile = self
            .find(user_id)
            .await?
            .ok_or_else(|| ApiError::InternalServer("Profile vanished after insert".into()))?;

        Ok((profile, inserted))
    }

    /// Apply the supplied fields only
    pub async fn update_details(
        &self,
        user_id: &str,
        request: &UpdateProfileRequest,
    ) -> Result<Profile, ApiError> {
        let email = request.email.as_deref().map(str::trim);

        let result = sqlx::query(
            r#"
            UPDATE profiles SET
                full_name = COALESCE(?, full_name),
                email = COALESCE(?, email)
            WHERE id = ?
            "#,
        )
        .bind(request.full_name.as_deref())
        .bind(email)
        .bind(user_id)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Profile not found".into()));
        }

        self.find(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Profile not found".into()))
    }

    /// Blind overwrite to pro with the given timestamp; creates the row if needed
    pub async fn promote_to_pro(&self, user_id: &str, at: &str) -> Result<(), ApiError> {
        sqlx::query(
            r#"
            INSERT INTO profiles (id, subscription_tier, subscription_date)
            VALUES (?, 'pro', ?)
            ON CONFLICT(id) DO UPDATE SET
                subscription_tier = 'pro',
                subscription_date = excluded.subscription_date
            "#,
        )
        .bind(user_id)
        .bind(at)
        .execute(&self.db)
        .await?;

        info!(user_id = %user_id, "Profile promoted to pro");

        Ok(())
    }

    /// Current tier; users without a profile row are free
    pub async fn tier(&self, user_id: &str) -> Result<SubscriptionTier, ApiError> {
        Ok(self
            .find(user_id)
            .await?
            .map(|p| p.subscription_tier)
            .unwrap_or_default())
    }
}
