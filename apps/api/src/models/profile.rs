use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, FromRow)]
pub struct StyleProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub raw_text: String,
    pub embedding: Option<Vec<u8>>,
    pub appearance: Value,
    pub style_identity: Value,
    pub lifestyle: Value,
    pub style_archetype: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub skin_tone: String,
    pub undertone: String,
    pub contrast_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleIdentity {
    pub face_detail_preference: String,
    pub texture_notes: String,
    pub color_pref: String,
    pub style_constraints: String,
    pub archetypes: Vec<String>,
    pub aspirational_style: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lifestyle {
    pub mobility: String,
    pub climate: String,
    pub life_event: String,
    pub dress_formality: String,
    pub wardrobe_phase: String,
    pub shopping_behavior: String,
    pub budget_preference: String,
}

/// Questionnaire answers grouped the way they are stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StyleProfile {
    pub appearance: Appearance,
    pub style_identity: StyleIdentity,
    pub lifestyle: Lifestyle,
}

impl StyleProfileRow {
    /// Rebuilds the grouped answers from the JSONB columns. Missing keys
    /// fall back to empty values.
    pub fn profile(&self) -> StyleProfile {
        StyleProfile {
            appearance: serde_json::from_value(self.appearance.clone()).unwrap_or_default(),
            style_identity: serde_json::from_value(self.style_identity.clone())
                .unwrap_or_default(),
            lifestyle: serde_json::from_value(self.lifestyle.clone()).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_from_partial_json() {
        let row = StyleProfileRow {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            raw_text: String::new(),
            embedding: None,
            appearance: json!({"skin_tone": "Deep or dark"}),
            style_identity: json!({}),
            lifestyle: json!({"climate": "Mostly cold", "unknown_key": 3}),
            style_archetype: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let profile = row.profile();
        assert_eq!(profile.appearance.skin_tone, "Deep or dark");
        assert_eq!(profile.appearance.undertone, "");
        assert!(profile.style_identity.archetypes.is_empty());
        assert_eq!(profile.lifestyle.climate, "Mostly cold");
    }
}
