use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

struct Migration {
    id: i32,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        id: 1,
        description: "users and style profiles",
        sql: r#"
CREATE TABLE IF NOT EXISTS users (
    id UUID PRIMARY KEY,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    password_salt TEXT NOT NULL,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE TABLE IF NOT EXISTS style_profiles (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL UNIQUE REFERENCES users(id) ON DELETE CASCADE,
    raw_text TEXT NOT NULL,
    embedding BYTEA,
    appearance JSONB NOT NULL,
    style_identity JSONB NOT NULL DEFAULT '{}'::jsonb,
    lifestyle JSONB NOT NULL,
    style_archetype TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);
"#,
    },
    Migration {
        id: 2,
        description: "wardrobe items",
        sql: r#"
CREATE TABLE IF NOT EXISTS wardrobe_items (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    name TEXT NOT NULL,
    category TEXT NOT NULL,
    color TEXT,
    style_tags TEXT[] NOT NULL DEFAULT '{}',
    image_key TEXT,
    image_content_type TEXT,
    season TEXT NOT NULL DEFAULT 'all'
        CHECK (season IN ('spring', 'summer', 'fall', 'winter', 'all')),
    is_favorite BOOLEAN NOT NULL DEFAULT FALSE,
    added_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    last_used TIMESTAMPTZ
);

CREATE INDEX IF NOT EXISTS idx_wardrobe_items_user
    ON wardrobe_items(user_id, is_favorite DESC, added_at DESC);
"#,
    },
    Migration {
        id: 3,
        description: "daily inputs, suggestions and feedback",
        sql: r#"
CREATE TABLE IF NOT EXISTS daily_style_inputs (
    id UUID PRIMARY KEY,
    profile_id UUID NOT NULL REFERENCES style_profiles(id) ON DELETE CASCADE,
    input_date DATE NOT NULL,
    mood_today TEXT NOT NULL DEFAULT '',
    occasion TEXT NOT NULL,
    weather TEXT NOT NULL,
    item_focus TEXT NOT NULL DEFAULT '',
    outfit_suggestion TEXT,
    image_description JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (profile_id, input_date)
);

CREATE TABLE IF NOT EXISTS styling_suggestions (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    content TEXT NOT NULL,
    mood TEXT,
    occasion TEXT,
    weather TEXT,
    context JSONB,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
);

CREATE INDEX IF NOT EXISTS idx_styling_suggestions_user
    ON styling_suggestions(user_id, created_at DESC);

CREATE TABLE IF NOT EXISTS suggestion_feedback (
    id UUID PRIMARY KEY,
    user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    suggestion_id UUID NOT NULL REFERENCES styling_suggestions(id) ON DELETE CASCADE,
    rating TEXT NOT NULL CHECK (rating IN ('loved', 'meh', 'dislike')),
    comment TEXT NOT NULL DEFAULT '',
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    UNIQUE (user_id, suggestion_id)
);
"#,
    },
];

/// Applies pending migrations in id order. Each one runs in its own
/// transaction together with its `schema_migrations` record.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS schema_migrations (
            id INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await
    .context("failed to create schema_migrations")?;

    let applied: Vec<i32> = sqlx::query_scalar("SELECT id FROM schema_migrations")
        .fetch_all(pool)
        .await?;

    for migration in MIGRATIONS.iter().filter(|m| !applied.contains(&m.id)) {
        let mut tx = pool.begin().await?;
        (&mut *tx)
            .execute(migration.sql)
            .await
            .with_context(|| format!("migration {} failed", migration.id))?;
        sqlx::query("INSERT INTO schema_migrations (id, description) VALUES ($1, $2)")
            .bind(migration.id)
            .bind(migration.description)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        info!(
            "Applied migration {}: {}",
            migration.id, migration.description
        );
    }

    Ok(())
}
