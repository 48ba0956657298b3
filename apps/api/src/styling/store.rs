use chrono::NaiveDate;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::daily::{DailyContext, DailyInputRow};
use crate::models::suggestion::{FeedbackRow, Rating, SuggestionRow};
use crate::styling::vision::ImageDescription;

pub const RECENT_DAILY_LIMIT: i64 = 5;

/// Records today's input. A second submission on the same day replaces the
/// first one.
pub async fn save_daily_input(
    pool: &PgPool,
    profile_id: Uuid,
    input_date: NaiveDate,
    context: &DailyContext,
    suggestion: &str,
    image_description: Option<&ImageDescription>,
) -> Result<DailyInputRow, AppError> {
    let row = sqlx::query_as::<_, DailyInputRow>(
        r#"
        INSERT INTO daily_style_inputs
            (id, profile_id, input_date, mood_today, occasion, weather, item_focus,
             outfit_suggestion, image_description)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT (profile_id, input_date) DO UPDATE SET
            mood_today = EXCLUDED.mood_today,
            occasion = EXCLUDED.occasion,
            weather = EXCLUDED.weather,
            item_focus = EXCLUDED.item_focus,
            outfit_suggestion = EXCLUDED.outfit_suggestion,
            image_description = EXCLUDED.image_description
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(profile_id)
    .bind(input_date)
    .bind(&context.mood_today)
    .bind(&context.occasion)
    .bind(&context.weather)
    .bind(&context.item_focus)
    .bind(suggestion)
    .bind(image_description.map(Json))
    .fetch_one(pool)
    .await?;

    info!("Saved daily input {} for {}", row.id, input_date);
    Ok(row)
}

/// The user's latest daily inputs, newest first.
pub async fn recent_daily_inputs(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<DailyInputRow>, AppError> {
    Ok(sqlx::query_as::<_, DailyInputRow>(
        r#"
        SELECT d.* FROM daily_style_inputs d
        JOIN style_profiles p ON p.id = d.profile_id
        WHERE p.user_id = $1
        ORDER BY d.input_date DESC, d.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(RECENT_DAILY_LIMIT)
    .fetch_all(pool)
    .await?)
}

pub async fn insert_suggestion(
    pool: &PgPool,
    user_id: Uuid,
    content: &str,
    context: &DailyContext,
    details: &Value,
) -> Result<SuggestionRow, AppError> {
    let row = sqlx::query_as::<_, SuggestionRow>(
        r#"
        INSERT INTO styling_suggestions (id, user_id, content, mood, occasion, weather, context)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(content)
    .bind(&context.mood_today)
    .bind(&context.occasion)
    .bind(&context.weather)
    .bind(details)
    .fetch_one(pool)
    .await?;

    info!("Recorded styling suggestion {} for user {}", row.id, user_id);
    Ok(row)
}

pub async fn list_suggestions(pool: &PgPool, user_id: Uuid) -> Result<Vec<SuggestionRow>, AppError> {
    Ok(sqlx::query_as::<_, SuggestionRow>(
        "SELECT * FROM styling_suggestions WHERE user_id = $1 ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_suggestion(
    pool: &PgPool,
    user_id: Uuid,
    suggestion_id: Uuid,
) -> Result<SuggestionRow, AppError> {
    sqlx::query_as::<_, SuggestionRow>(
        "SELECT * FROM styling_suggestions WHERE id = $1 AND user_id = $2",
    )
    .bind(suggestion_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Suggestion {suggestion_id} not found")))
}

/// One feedback row per user and suggestion; resubmitting overwrites it.
pub async fn upsert_feedback(
    pool: &PgPool,
    user_id: Uuid,
    suggestion_id: Uuid,
    rating: Rating,
    comment: &str,
) -> Result<FeedbackRow, AppError> {
    let row = sqlx::query_as::<_, FeedbackRow>(
        r#"
        INSERT INTO suggestion_feedback (id, user_id, suggestion_id, rating, comment)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id, suggestion_id) DO UPDATE SET
            rating = EXCLUDED.rating,
            comment = EXCLUDED.comment,
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(suggestion_id)
    .bind(rating.as_str())
    .bind(comment)
    .fetch_one(pool)
    .await?;

    info!(
        "Feedback '{}' recorded for suggestion {}",
        rating.as_str(),
        suggestion_id
    );
    Ok(row)
}

pub async fn find_feedback(
    pool: &PgPool,
    user_id: Uuid,
    suggestion_id: Uuid,
) -> Result<Option<FeedbackRow>, AppError> {
    Ok(sqlx::query_as::<_, FeedbackRow>(
        "SELECT * FROM suggestion_feedback WHERE user_id = $1 AND suggestion_id = $2",
    )
    .bind(user_id)
    .bind(suggestion_id)
    .fetch_optional(pool)
    .await?)
}
