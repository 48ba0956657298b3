use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SuggestionRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub mood: Option<String>,
    pub occasion: Option<String>,
    pub weather: Option<String>,
    pub context: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct FeedbackRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub suggestion_id: Uuid,
    pub rating: String,
    pub comment: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Loved,
    Meh,
    Dislike,
}

impl Rating {
    pub fn as_str(&self) -> &'static str {
        match self {
            Rating::Loved => "loved",
            Rating::Meh => "meh",
            Rating::Dislike => "dislike",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::Loved => "Loved it",
            Rating::Meh => "Neutral",
            Rating::Dislike => "Not for me",
        }
    }

    pub fn parse(value: &str) -> Option<Rating> {
        match value.trim() {
            "loved" => Some(Rating::Loved),
            "meh" => Some(Rating::Meh),
            "dislike" => Some(Rating::Dislike),
            _ => None,
        }
    }
}
