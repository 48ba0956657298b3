use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct DailyInputRow {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub input_date: NaiveDate,
    pub mood_today: String,
    pub occasion: String,
    pub weather: String,
    pub item_focus: String,
    pub outfit_suggestion: Option<String>,
    pub image_description: Option<Value>,
    pub created_at: DateTime<Utc>,
}

/// What the user tells the stylist about today.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DailyContext {
    pub mood_today: String,
    pub occasion: String,
    pub weather: String,
    pub item_focus: String,
}
