use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::{embedding_to_bytes, normalize};
use crate::models::profile::{StyleProfile, StyleProfileRow};
use crate::profile::archetype::generate_style_archetype;
use crate::profile::store;
use crate::profile::summary::combine_style_summary;
use crate::state::AppState;
use crate::wardrobe::store::list_items;

/// Summarises, embeds and reads the profile, then stores all of it.
pub async fn save_style_profile(
    state: &AppState,
    user_id: Uuid,
    profile: &StyleProfile,
) -> Result<StyleProfileRow, AppError> {
    let summary = combine_style_summary(profile);

    let embedding = state
        .llm
        .embed(&state.config.models.embedding, &summary)
        .await
        .map_err(|e| AppError::Llm(format!("Profile embedding failed: {e}")))?;
    let embedding = embedding_to_bytes(&normalize(embedding));

    let wardrobe = list_items(&state.db, user_id).await?;
    let archetype = generate_style_archetype(
        &state.llm,
        &state.config.models.archetype,
        &summary,
        &wardrobe,
    )
    .await?;

    let row = store::upsert_profile(
        &state.db,
        user_id,
        &summary,
        &embedding,
        profile,
        &archetype,
    )
    .await?;
    info!(
        "Style profile for user {} updated ({} wardrobe items considered)",
        user_id,
        wardrobe.len()
    );
    Ok(row)
}
