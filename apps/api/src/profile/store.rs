use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{StyleProfile, StyleProfileRow};

/// Inserts or replaces the user's single profile row.
pub async fn upsert_profile(
    pool: &PgPool,
    user_id: Uuid,
    summary: &str,
    embedding: &[u8],
    profile: &StyleProfile,
    archetype: &str,
) -> Result<StyleProfileRow, AppError> {
    let row = sqlx::query_as::<_, StyleProfileRow>(
        r#"
        INSERT INTO style_profiles
            (id, user_id, raw_text, embedding, appearance, style_identity, lifestyle, style_archetype)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (user_id) DO UPDATE SET
            raw_text = EXCLUDED.raw_text,
            embedding = EXCLUDED.embedding,
            appearance = EXCLUDED.appearance,
            style_identity = EXCLUDED.style_identity,
            lifestyle = EXCLUDED.lifestyle,
            style_archetype = EXCLUDED.style_archetype,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(summary)
    .bind(embedding)
    .bind(sqlx::types::Json(&profile.appearance))
    .bind(sqlx::types::Json(&profile.style_identity))
    .bind(sqlx::types::Json(&profile.lifestyle))
    .bind(archetype)
    .fetch_one(pool)
    .await?;

    info!("Saved style profile {} for user {}", row.id, user_id);
    Ok(row)
}

pub async fn find_profile(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Option<StyleProfileRow>, AppError> {
    Ok(
        sqlx::query_as::<_, StyleProfileRow>("SELECT * FROM style_profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(pool)
            .await?,
    )
}
