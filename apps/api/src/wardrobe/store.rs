use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::wardrobe::{Season, WardrobeItemRow};

/// Fields for a new wardrobe row. The image must already be stored.
pub struct NewItem<'a> {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: &'a str,
    pub category: &'a str,
    pub color: Option<&'a str>,
    pub style_tags: &'a [String],
    pub season: Season,
    pub image_key: Option<&'a str>,
    pub image_content_type: Option<&'a str>,
}

pub async fn insert_item(pool: &PgPool, item: NewItem<'_>) -> Result<WardrobeItemRow, AppError> {
    let row = sqlx::query_as::<_, WardrobeItemRow>(
        r#"
        INSERT INTO wardrobe_items
            (id, user_id, name, category, color, style_tags, season, image_key, image_content_type)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(item.id)
    .bind(item.user_id)
    .bind(item.name)
    .bind(item.category)
    .bind(item.color)
    .bind(item.style_tags)
    .bind(item.season.as_str())
    .bind(item.image_key)
    .bind(item.image_content_type)
    .fetch_one(pool)
    .await?;

    info!("Added wardrobe item {} for user {}", row.id, row.user_id);
    Ok(row)
}

/// All items of a user, favourites first, newest first within each group.
pub async fn list_items(pool: &PgPool, user_id: Uuid) -> Result<Vec<WardrobeItemRow>, AppError> {
    Ok(sqlx::query_as::<_, WardrobeItemRow>(
        r#"
        SELECT * FROM wardrobe_items
        WHERE user_id = $1
        ORDER BY is_favorite DESC, added_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?)
}

pub async fn get_item(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<WardrobeItemRow, AppError> {
    sqlx::query_as::<_, WardrobeItemRow>(
        "SELECT * FROM wardrobe_items WHERE id = $1 AND user_id = $2",
    )
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Wardrobe item {item_id} not found")))
}

/// Deletes the row and returns it so the caller can remove the stored image.
pub async fn delete_item(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<WardrobeItemRow, AppError> {
    sqlx::query_as::<_, WardrobeItemRow>(
        "DELETE FROM wardrobe_items WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Wardrobe item {item_id} not found")))
}

pub async fn toggle_favorite(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<WardrobeItemRow, AppError> {
    sqlx::query_as::<_, WardrobeItemRow>(
        r#"
        UPDATE wardrobe_items SET is_favorite = NOT is_favorite
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(item_id)
    .bind(user_id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Wardrobe item {item_id} not found")))
}

pub async fn mark_worn(
    pool: &PgPool,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<WardrobeItemRow, AppError> {
    sqlx::query_as::<_, WardrobeItemRow>(
        "UPDATE wardrobe_items SET last_used = $3 WHERE id = $1 AND user_id = $2 RETURNING *",
    )
    .bind(item_id)
    .bind(user_id)
    .bind(Utc::now())
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Wardrobe item {item_id} not found")))
}

/// For each name, refreshes `last_used` on the first of the user's items whose
/// name contains it (case-insensitive). Returns how many rows were touched.
pub async fn update_last_used(
    pool: &PgPool,
    user_id: Uuid,
    names: &[String],
) -> Result<u64, AppError> {
    let mut touched = 0;
    for name in names.iter().filter(|n| !n.trim().is_empty()) {
        let result = sqlx::query(
            r#"
            UPDATE wardrobe_items SET last_used = $3
            WHERE id = (
                SELECT id FROM wardrobe_items
                WHERE user_id = $1 AND name ILIKE '%' || $2 || '%' ESCAPE '\'
                ORDER BY added_at ASC
                LIMIT 1
            )
            "#,
        )
        .bind(user_id)
        .bind(escape_like(name))
        .bind(Utc::now())
        .execute(pool)
        .await?;
        touched += result.rows_affected();
    }
    Ok(touched)
}

fn escape_like(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("100% wool_knit"), "100\\% wool\\_knit");
        assert_eq!(escape_like("plain"), "plain");
    }
}
