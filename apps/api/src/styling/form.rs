//! Daily styling request: choice sets and validation.

use uuid::Uuid;

use crate::errors::AppError;
use crate::forms::MultipartForm;
use crate::models::daily::DailyContext;

pub const OCCASIONS: &[&str] = &[
    "Work day",
    "Date or social event",
    "Creative time",
    "Errands or casual day",
    "Travel",
    "Relaxing / staying in",
    "Other",
];

/// Stored value and display label.
pub const WEATHER: &[(&str, &str)] = &[
    ("Cold and damp", "Cold and damp"),
    ("Cold and dry", "Cold and dry"),
    ("Warm and sunny", "Warm and sunny"),
    ("Hot and humid", "Hot and humid"),
    ("Transitional / layered weather", "Transitional / layered"),
    ("Unpredictable", "Unpredictable"),
    ("Not sure", "Not sure"),
];

pub const NEW_ITEM_RULE: &str =
    "If you are styling a new item, both a description and image are required.";

/// A validated daily styling request.
#[derive(Debug, Clone)]
pub struct DailyRequest {
    pub context: DailyContext,
    pub add_new_item: bool,
    pub name_hint: Option<String>,
    pub wardrobe_item: Option<Uuid>,
    pub image: Option<Vec<u8>>,
}

impl DailyRequest {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        let mut errors = Vec::new();

        let mood = form.text("mood_today").unwrap_or_default();
        if mood.is_empty() {
            errors.push("Mood: this field is required.".to_string());
        }

        let occasion = form.text("occasion").unwrap_or_default();
        if !OCCASIONS.contains(&occasion) {
            errors.push(choice_error("Occasion", occasion));
        }

        let weather = form.text("weather").unwrap_or_default();
        if !WEATHER.iter().any(|(v, _)| *v == weather) {
            errors.push(choice_error("Weather", weather));
        }

        let add_new_item = match form.text("add_new_item").unwrap_or("no") {
            "yes" => true,
            "no" => false,
            other => {
                errors.push(choice_error("New item", other));
                false
            }
        };

        let wardrobe_item = match form.text("wardrobe_item") {
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push("Select a valid wardrobe item.".to_string());
                    None
                }
            },
            None => None,
        };

        let item_focus = form.text("item_focus").unwrap_or_default();
        let image = form.file("image").map(|f| f.to_vec());
        if add_new_item && (item_focus.is_empty() || image.is_none()) {
            errors.push(NEW_ITEM_RULE.to_string());
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors.join(" ")));
        }

        Ok(DailyRequest {
            context: DailyContext {
                mood_today: mood.to_string(),
                occasion: occasion.to_string(),
                weather: weather.to_string(),
                item_focus: item_focus.to_string(),
            },
            add_new_item,
            name_hint: form.text("image_name_hint").map(str::to_string),
            wardrobe_item,
            image,
        })
    }
}

fn choice_error(label: &str, value: &str) -> String {
    if value.is_empty() {
        format!("{label}: this field is required.")
    } else {
        format!("{label}: '{value}' is not one of the available choices.")
    }
}
