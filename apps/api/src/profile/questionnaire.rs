//! The style questionnaire: choice sets, labels and answer validation.

use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::profile::{Appearance, Lifestyle, StyleIdentity, StyleProfile};

/// A fixed answer: the stored value and the label shown next to it.
pub type Choice = (&'static str, &'static str);

pub const SKIN_TONES: &[Choice] = &[
    ("Fair or light", "Fair or light"),
    ("Medium or olive", "Medium or olive"),
    ("Deep or dark", "Deep or dark"),
    ("I'm not sure", "I'm not sure"),
];

pub const CONTRAST_LEVELS: &[Choice] = &[
    ("Low contrast", "Low contrast: light hair + fair skin"),
    ("Medium contrast", "Medium contrast: some difference, not sharp"),
    ("High contrast", "High contrast: dark hair + pale skin"),
    ("I'm not sure", "I'm not sure"),
];

pub const UNDERTONES: &[Choice] = &[
    ("Warm", "Warm: golden, peachy"),
    ("Cool", "Cool: pink, bluish"),
    ("Neutral", "Neutral: a bit of both"),
    ("I'm not sure", "I'm not sure"),
];

pub const FACE_DETAILS: &[Choice] = &[
    ("Soft", "Soft, round, or organic shapes"),
    ("Structured", "Structured, angular, or graphic lines"),
    ("Mix", "A mix: I go by outfit"),
    ("I'm not sure", "I'm not sure"),
];

pub const ARCHETYPES: &[Choice] = &[
    ("Quiet Minimalism", "Quiet Minimalism"),
    ("Romantic Tailored", "Romantic Tailored"),
    ("Soft Sculptural", "Soft Sculptural"),
    ("90s Sharpness", "90s Sharpness"),
    ("Boyish Luxe", "Boyish Luxe"),
    ("Earthy Artisanal", "Earthy Artisanal"),
    ("Sleek + Functional", "Sleek + Functional"),
    ("I'm not sure", "I'm not sure"),
];

pub const MOBILITY: &[Choice] = &[
    ("I bike often", "I bike often"),
    ("I walk a lot", "I walk a lot"),
    ("I drive or use rideshare", "I drive or use rideshare"),
    (
        "I mostly stay home or work remotely",
        "I mostly stay home or work remotely",
    ),
    (
        "I use mobility aids or need accessible styles",
        "I use mobility aids or need accessible styles",
    ),
    (
        "My energy levels vary a lot day to day",
        "My energy levels vary a lot day to day",
    ),
];

pub const CLIMATES: &[Choice] = &[
    ("Warm year-round", "Warm year-round"),
    ("Mostly cold", "Mostly cold"),
    ("Transitional/layered seasons", "Transitional / layered seasons"),
    ("I travel between climates often", "I travel between climates often"),
];

pub const DRESS_FORMALITY: &[Choice] = &[
    ("Very casual", "Very casual"),
    ("Elevated casual", "Elevated casual"),
    ("Creative professional", "Creative professional"),
    ("Tailored / business", "Tailored / business"),
];

pub const WARDROBE_PHASES: &[Choice] = &[
    ("Overflowing", "Overflowing: I need to refine"),
    ("Small but scattered", "Small but scattered: I need direction"),
    ("Building", "Building a new look from scratch"),
    ("Minimal", "Minimal: I love owning less"),
];

pub const SHOPPING_BEHAVIORS: &[Choice] = &[
    ("Mostly secondhand or vintage", "Mostly secondhand or vintage"),
    ("Investment pieces", "A few investment pieces each year"),
    ("Seasonal refresh", "I refresh seasonally"),
    ("Not buying", "Not buying: just want styling support"),
];

pub const BUDGETS: &[Choice] = &[
    ("Under $50", "Under $50: thrift or affordable"),
    ("$50-$150", "$50-$150: mid-range and secondhand"),
    ("$150-$500", "$150-$500: quality staples"),
    ("$500+", "$500+: designer or archival"),
    ("Not buying", "Not buying right now"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    Appearance,
    StyleIdentity,
    Lifestyle,
}

/// One questionnaire entry. `choices` is empty for free-text questions.
#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub key: &'static str,
    pub section: Section,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    pub choices: Vec<ChoiceView>,
    pub required: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub value: &'static str,
    pub label: &'static str,
}

fn choice(
    key: &'static str,
    section: Section,
    label: &'static str,
    choices: &'static [Choice],
) -> Question {
    Question {
        key,
        section,
        label,
        placeholder: None,
        choices: choices
            .iter()
            .map(|&(value, label)| ChoiceView { value, label })
            .collect(),
        required: true,
    }
}

fn text(
    key: &'static str,
    section: Section,
    label: &'static str,
    placeholder: &'static str,
) -> Question {
    Question {
        key,
        section,
        label,
        placeholder: Some(placeholder),
        choices: Vec::new(),
        required: false,
    }
}

/// Questions in display order.
pub fn questions() -> Vec<Question> {
    vec![
        choice("skin_tone", Section::Appearance, "How would you describe your skin tone?", SKIN_TONES),
        choice(
            "contrast_level",
            Section::Appearance,
            "How would you describe the contrast between your features?",
            CONTRAST_LEVELS,
        ),
        choice("undertone", Section::Appearance, "Do you lean warmer or cooler in tone?", UNDERTONES),
        choice(
            "face_detail_preference",
            Section::StyleIdentity,
            "Do you prefer softer or more structured details near your face?",
            FACE_DETAILS,
        ),
        text(
            "texture_notes",
            Section::StyleIdentity,
            "What silhouettes or fabrics make you feel most like yourself?",
            "e.g., Structured shoulders but soft drape, knits that skim but don't cling...",
        ),
        text(
            "color_pref",
            Section::StyleIdentity,
            "What are your favorite colors to wear?",
            "e.g., Jewel tones, muted blue, baby pink...",
        ),
        text(
            "style_constraints",
            Section::StyleIdentity,
            "Anything you never wear?",
            "e.g., Bodycon, loud prints, synthetics...",
        ),
        choice(
            "archetypes",
            Section::StyleIdentity,
            "Which style archetypes feel most like you?",
            ARCHETYPES,
        ),
        text(
            "aspirational_style",
            Section::StyleIdentity,
            "Describe your style vision in your own words",
            "e.g., A mix of sharp tailoring and soft romance...",
        ),
        text(
            "life_event",
            Section::Lifestyle,
            "Are you in a life transition?",
            "e.g., Just moved, started a new role, navigating a breakup...",
        ),
        choice("mobility", Section::Lifestyle, "How do you usually move through your day?", MOBILITY),
        choice(
            "climate_wear",
            Section::Lifestyle,
            "What's the climate you usually dress for?",
            CLIMATES,
        ),
        choice(
            "dress_formality",
            Section::Lifestyle,
            "How formal is your day-to-day style?",
            DRESS_FORMALITY,
        ),
        choice(
            "wardrobe_phase",
            Section::Lifestyle,
            "How would you describe your wardrobe right now?",
            WARDROBE_PHASES,
        ),
        choice(
            "shopping_behavior",
            Section::Lifestyle,
            "How do you usually shop?",
            SHOPPING_BEHAVIORS,
        ),
        choice(
            "budget_preference",
            Section::Lifestyle,
            "What's your comfort zone for spending on a single item?",
            BUDGETS,
        ),
    ]
}

/// Archetypes arrive as one value from the HTML form or a list from the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ArchetypeAnswer {
    One(String),
    Many(Vec<String>),
}

impl Default for ArchetypeAnswer {
    fn default() -> Self {
        ArchetypeAnswer::Many(Vec::new())
    }
}

impl ArchetypeAnswer {
    fn values(&self) -> Vec<String> {
        let raw: Vec<&String> = match self {
            ArchetypeAnswer::One(v) => vec![v],
            ArchetypeAnswer::Many(vs) => vs.iter().collect(),
        };
        raw.into_iter()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .collect()
    }
}

/// Flat questionnaire submission, as posted by the form or the API.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileAnswers {
    pub skin_tone: String,
    pub contrast_level: String,
    pub undertone: String,
    pub face_detail_preference: String,
    pub texture_notes: String,
    pub color_pref: String,
    pub style_constraints: String,
    pub archetypes: ArchetypeAnswer,
    pub aspirational_style: String,
    pub life_event: String,
    pub mobility: String,
    #[serde(alias = "climate")]
    pub climate_wear: String,
    pub dress_formality: String,
    pub wardrobe_phase: String,
    pub shopping_behavior: String,
    pub budget_preference: String,
}

impl ProfileAnswers {
    /// Checks every fixed-choice answer and groups the result for storage.
    /// All problems are reported together.
    pub fn validate(&self) -> Result<StyleProfile, AppError> {
        let mut errors = Vec::new();
        let mut pick = |value: &str, choices: &[Choice], label: &str| -> String {
            let value = value.trim();
            if value.is_empty() {
                errors.push(format!("{label}: this field is required."));
            } else if !choices.iter().any(|(v, _)| *v == value) {
                errors.push(format!("{label}: '{value}' is not one of the available choices."));
            }
            value.to_string()
        };

        let appearance = Appearance {
            skin_tone: pick(&self.skin_tone, SKIN_TONES, "Skin tone"),
            undertone: pick(&self.undertone, UNDERTONES, "Undertone"),
            contrast_level: pick(&self.contrast_level, CONTRAST_LEVELS, "Contrast level"),
        };
        let face_detail_preference =
            pick(&self.face_detail_preference, FACE_DETAILS, "Face detail preference");
        let lifestyle = Lifestyle {
            mobility: pick(&self.mobility, MOBILITY, "Mobility"),
            climate: pick(&self.climate_wear, CLIMATES, "Climate"),
            life_event: self.life_event.trim().to_string(),
            dress_formality: pick(&self.dress_formality, DRESS_FORMALITY, "Dress formality"),
            wardrobe_phase: pick(&self.wardrobe_phase, WARDROBE_PHASES, "Wardrobe phase"),
            shopping_behavior: pick(&self.shopping_behavior, SHOPPING_BEHAVIORS, "Shopping behavior"),
            budget_preference: pick(&self.budget_preference, BUDGETS, "Budget"),
        };

        let archetypes = self.archetypes.values();
        if archetypes.is_empty() {
            errors.push("Archetypes: this field is required.".to_string());
        }
        for value in &archetypes {
            if !ARCHETYPES.iter().any(|(v, _)| *v == value.as_str()) {
                errors.push(format!(
                    "Archetypes: '{value}' is not one of the available choices."
                ));
            }
        }

        if !errors.is_empty() {
            return Err(AppError::Validation(errors.join(" ")));
        }

        Ok(StyleProfile {
            appearance,
            style_identity: StyleIdentity {
                face_detail_preference,
                texture_notes: self.texture_notes.trim().to_string(),
                color_pref: self.color_pref.trim().to_string(),
                style_constraints: self.style_constraints.trim().to_string(),
                archetypes,
                aspirational_style: self.aspirational_style.trim().to_string(),
            },
            lifestyle,
        })
    }
}

impl From<&StyleProfile> for ProfileAnswers {
    fn from(profile: &StyleProfile) -> Self {
        let a = &profile.appearance;
        let s = &profile.style_identity;
        let l = &profile.lifestyle;
        ProfileAnswers {
            skin_tone: a.skin_tone.clone(),
            contrast_level: a.contrast_level.clone(),
            undertone: a.undertone.clone(),
            face_detail_preference: s.face_detail_preference.clone(),
            texture_notes: s.texture_notes.clone(),
            color_pref: s.color_pref.clone(),
            style_constraints: s.style_constraints.clone(),
            archetypes: ArchetypeAnswer::Many(s.archetypes.clone()),
            aspirational_style: s.aspirational_style.clone(),
            life_event: l.life_event.clone(),
            mobility: l.mobility.clone(),
            climate_wear: l.climate.clone(),
            dress_formality: l.dress_formality.clone(),
            wardrobe_phase: l.wardrobe_phase.clone(),
            shopping_behavior: l.shopping_behavior.clone(),
            budget_preference: l.budget_preference.clone(),
        }
    }
}

impl ProfileAnswers {
    /// Current answer for a question key. Archetypes yield the first pick.
    pub fn field(&self, key: &str) -> String {
        match key {
            "skin_tone" => self.skin_tone.clone(),
            "contrast_level" => self.contrast_level.clone(),
            "undertone" => self.undertone.clone(),
            "face_detail_preference" => self.face_detail_preference.clone(),
            "texture_notes" => self.texture_notes.clone(),
            "color_pref" => self.color_pref.clone(),
            "style_constraints" => self.style_constraints.clone(),
            "archetypes" => self.archetypes.values().into_iter().next().unwrap_or_default(),
            "aspirational_style" => self.aspirational_style.clone(),
            "life_event" => self.life_event.clone(),
            "mobility" => self.mobility.clone(),
            "climate_wear" => self.climate_wear.clone(),
            "dress_formality" => self.dress_formality.clone(),
            "wardrobe_phase" => self.wardrobe_phase.clone(),
            "shopping_behavior" => self.shopping_behavior.clone(),
            "budget_preference" => self.budget_preference.clone(),
            _ => String::new(),
        }
    }
}

/// Label shown for a stored value, falling back to the value itself.
pub fn choice_label(choices: &[Choice], value: &str) -> String {
    choices
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
pub(crate) fn sample_answers() -> ProfileAnswers {
    ProfileAnswers {
        skin_tone: "Medium or olive".to_string(),
        contrast_level: "High contrast".to_string(),
        undertone: "Warm".to_string(),
        face_detail_preference: "Structured".to_string(),
        texture_notes: "Soft drape".to_string(),
        color_pref: "Muted blue".to_string(),
        style_constraints: "Bodycon".to_string(),
        archetypes: ArchetypeAnswer::One("Boyish Luxe".to_string()),
        aspirational_style: String::new(),
        life_event: String::new(),
        mobility: "I walk a lot".to_string(),
        climate_wear: "Mostly cold".to_string(),
        dress_formality: "Elevated casual".to_string(),
        wardrobe_phase: "Minimal".to_string(),
        shopping_behavior: "Investment pieces".to_string(),
        budget_preference: "$150-$500".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_answers_are_grouped() {
        let profile = sample_answers().validate().unwrap();
        assert_eq!(profile.appearance.contrast_level, "High contrast");
        assert_eq!(profile.style_identity.archetypes, vec!["Boyish Luxe"]);
        assert_eq!(profile.lifestyle.climate, "Mostly cold");
        assert_eq!(profile.lifestyle.life_event, "");
    }

    #[test]
    fn test_unknown_choice_and_missing_field_are_reported_together() {
        let mut answers = sample_answers();
        answers.skin_tone = "Green".to_string();
        answers.mobility = String::new();
        let err = answers.validate().unwrap_err();
        let message = err.public_message();
        assert!(message.contains("Skin tone: 'Green'"));
        assert!(message.contains("Mobility: this field is required."));
    }

    #[test]
    fn test_archetypes_accept_single_value_or_list() {
        let one: ProfileAnswers = serde_json::from_str(r#"{"archetypes": "Soft Sculptural"}"#).unwrap();
        assert_eq!(one.archetypes.values(), vec!["Soft Sculptural"]);

        let mut answers = sample_answers();
        answers.archetypes =
            serde_json::from_str(r#"["Quiet Minimalism", "90s Sharpness"]"#).unwrap();
        let profile = answers.validate().unwrap();
        assert_eq!(
            profile.style_identity.archetypes,
            vec!["Quiet Minimalism", "90s Sharpness"]
        );
    }

    #[test]
    fn test_climate_alias() {
        let answers: ProfileAnswers = serde_json::from_str(r#"{"climate": "Warm year-round"}"#).unwrap();
        assert_eq!(answers.climate_wear, "Warm year-round");
    }

    #[test]
    fn test_questions_cover_every_answer_field() {
        let keys: Vec<&str> = questions().iter().map(|q| q.key).collect();
        assert_eq!(keys.len(), 16);
        assert!(keys.contains(&"climate_wear"));
        assert!(questions()
            .iter()
            .filter(|q| q.required)
            .all(|q| !q.choices.is_empty()));
    }

    #[test]
    fn test_answers_round_trip_through_profile() {
        let profile = sample_answers().validate().unwrap();
        let answers = ProfileAnswers::from(&profile);
        assert_eq!(answers.field("climate_wear"), "Mostly cold");
        assert_eq!(answers.field("archetypes"), "Boyish Luxe");
        assert_eq!(answers.field("nonsense"), "");
        assert_eq!(answers.validate().unwrap(), profile);
    }

    #[test]
    fn test_choice_label() {
        assert_eq!(choice_label(UNDERTONES, "Cool"), "Cool: pink, bluish");
        assert_eq!(choice_label(UNDERTONES, "Olive"), "Olive");
    }
}
