use crate::models::daily::DailyContext;
use crate::models::profile::StyleProfile;

/// Flattens a profile into the prose summary that is embedded and fed to
/// every prompt. Optional sentences are left out when their answer is blank.
pub fn combine_style_summary(profile: &StyleProfile) -> String {
    let a = &profile.appearance;
    let s = &profile.style_identity;
    let l = &profile.lifestyle;

    let mut parts = vec![
        format!(
            "Skin tone: {}, undertone: {}, contrast level: {}.",
            a.skin_tone, a.undertone, a.contrast_level
        ),
        format!("Prefers: {} details near the face.", s.face_detail_preference),
        format!("Texture and silhouettes: {}.", s.texture_notes),
        format!("Color preferences: {}.", s.color_pref),
        format!("Style constraints or dislikes: {}.", s.style_constraints),
        format!("Archetype keywords: {}.", s.archetypes.join(", ")),
    ];
    if !s.aspirational_style.trim().is_empty() {
        parts.push(format!("Aspirational style: {}.", s.aspirational_style));
    }
    parts.push(format!("Mobility: {}. Climate: {}.", l.mobility, l.climate));
    parts.push(format!("Day-to-day style: {}.", l.dress_formality));
    parts.push(format!("Wardrobe status: {}.", l.wardrobe_phase));
    parts.push(format!(
        "Shopping style: {}, budget comfort: {}.",
        l.shopping_behavior, l.budget_preference
    ));
    if !l.life_event.trim().is_empty() {
        parts.push(format!(
            "Life transition or emotional context: {}.",
            l.life_event
        ));
    }

    parts.join(" ")
}

pub fn combine_daily_context(ctx: &DailyContext) -> String {
    format!(
        "Today the user wants to feel: {}. Occasion: {}. Weather: {}. Item in focus: {}",
        ctx.mood_today, ctx.occasion, ctx.weather, ctx.item_focus
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::questionnaire::sample_answers;

    #[test]
    fn test_summary_sentence_order() {
        let profile = sample_answers().validate().unwrap();
        assert_eq!(
            combine_style_summary(&profile),
            "Skin tone: Medium or olive, undertone: Warm, contrast level: High contrast. \
             Prefers: Structured details near the face. \
             Texture and silhouettes: Soft drape. \
             Color preferences: Muted blue. \
             Style constraints or dislikes: Bodycon. \
             Archetype keywords: Boyish Luxe. \
             Mobility: I walk a lot. Climate: Mostly cold. \
             Day-to-day style: Elevated casual. \
             Wardrobe status: Minimal. \
             Shopping style: Investment pieces, budget comfort: $150-$500."
        );
    }

    #[test]
    fn test_optional_sentences_appear_in_place() {
        let mut profile = sample_answers().validate().unwrap();
        profile.style_identity.aspirational_style = "Sharp tailoring, soft romance".to_string();
        profile.lifestyle.life_event = "Just moved".to_string();
        profile.style_identity.archetypes = vec!["Soft Sculptural".into(), "Boyish Luxe".into()];

        let summary = combine_style_summary(&profile);
        assert!(summary.contains(
            "Archetype keywords: Soft Sculptural, Boyish Luxe. Aspirational style: Sharp tailoring, soft romance. Mobility:"
        ));
        assert!(summary.ends_with("Life transition or emotional context: Just moved."));
    }

    #[test]
    fn test_daily_context_line() {
        let ctx = DailyContext {
            mood_today: "Confident".to_string(),
            occasion: "Work day".to_string(),
            weather: "Cold and dry".to_string(),
            item_focus: String::new(),
        };
        assert_eq!(
            combine_daily_context(&ctx),
            "Today the user wants to feel: Confident. Occasion: Work day. Weather: Cold and dry. Item in focus: "
        );
    }
}
