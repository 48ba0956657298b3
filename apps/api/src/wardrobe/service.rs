//! Wardrobe operations shared by the JSON API and the dashboard pages.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms::{split_tags, MultipartForm};
use crate::models::wardrobe::{normalize_category, Season, WardrobeItemRow, DEFAULT_CATEGORY};
use crate::state::AppState;
use crate::styling::vision::describe_image;
use crate::wardrobe::compress::{compress_image_to_limit, CompressedImage, CompressionLimits};
use crate::wardrobe::storage::image_key;
use crate::wardrobe::store::{self, NewItem};

/// Validated wardrobe upload.
#[derive(Debug, Clone)]
pub struct UploadRequest {
    pub name: String,
    pub category: String,
    pub color: Option<String>,
    pub season: Season,
    pub style_tags: Vec<String>,
    pub image: Option<Vec<u8>>,
}

impl UploadRequest {
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        let name = form
            .text("name")
            .ok_or_else(|| AppError::Validation("Item name is required.".to_string()))?;
        let raw_category = form
            .text("category")
            .ok_or_else(|| AppError::Validation("Category is required.".to_string()))?;
        let category = normalize_category(raw_category)
            .filter(|c| *c != DEFAULT_CATEGORY)
            .ok_or_else(|| {
                AppError::Validation(format!("Unknown category '{raw_category}'."))
            })?;
        let season = match form.text("season") {
            Some(raw) => Season::parse(raw)
                .ok_or_else(|| AppError::Validation(format!("Unknown season '{raw}'.")))?,
            None => Season::default(),
        };

        Ok(UploadRequest {
            name: name.to_string(),
            category: category.to_string(),
            color: form.text("color").map(str::to_string),
            season,
            style_tags: form.text("style_tags").map(split_tags).unwrap_or_default(),
            image: form.file("image").map(|f| f.to_vec()),
        })
    }
}

/// Item proposed from a daily styling session.
#[derive(Debug, Clone)]
pub struct FromDailyRequest {
    pub name: String,
    pub category: String,
    pub image: Vec<u8>,
}

impl FromDailyRequest {
    /// Accepts the photo either as a file part or as base64 text (a bare
    /// payload or a full `data:` URL).
    pub fn from_form(form: &MultipartForm) -> Result<Self, AppError> {
        let name = form
            .text("item_name")
            .or_else(|| form.text("name"))
            .ok_or_else(|| AppError::Validation("Missing item name.".to_string()))?;
        let category = form
            .text("category")
            .map(|c| normalize_category(c).unwrap_or(DEFAULT_CATEGORY))
            .unwrap_or(DEFAULT_CATEGORY);

        let image = if let Some(file) = form.file("image") {
            file.to_vec()
        } else if let Some(encoded) = form.text("image_b64") {
            decode_image_b64(encoded)?
        } else {
            return Err(AppError::Validation(
                "Missing image (upload a file or include image_b64).".to_string(),
            ));
        };

        Ok(FromDailyRequest {
            name: name.to_string(),
            category: category.to_string(),
            image,
        })
    }
}

/// Standard alphabet; padding optional.
const LENIENT_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decodes base64 image text, dropping a `data:...;base64,` prefix. Line
/// breaks and missing padding are accepted.
pub fn decode_image_b64(encoded: &str) -> Result<Vec<u8>, AppError> {
    let payload = match encoded.split_once(',') {
        Some((_, rest)) => rest,
        None => encoded,
    };
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    LENIENT_B64
        .decode(compact)
        .map_err(|_| AppError::Validation("Invalid image data.".to_string()))
}

/// Compresses on a blocking thread to the configured budget.
pub async fn compress(state: &AppState, raw: Vec<u8>) -> Result<CompressedImage, AppError> {
    let limits = CompressionLimits::new(state.config.image_budget_bytes());
    let original = raw.len();
    let compressed = tokio::task::spawn_blocking(move || compress_image_to_limit(&raw, &limits))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("image task failed: {e}")))??;
    info!(
        "Compressed image {} -> {} bytes ({}x{} {})",
        original,
        compressed.bytes.len(),
        compressed.width,
        compressed.height,
        compressed.format.ext()
    );
    Ok(compressed)
}

async fn store_image(
    state: &AppState,
    user_id: Uuid,
    item_id: Uuid,
    image: &CompressedImage,
) -> Result<String, AppError> {
    let key = image_key(user_id, item_id, image.format.ext());
    state
        .images
        .put(&key, image.bytes.clone(), image.format.content_type())
        .await?;
    Ok(key)
}

/// Saves a new wardrobe item. A photo without a colour is described by the
/// vision model to fill in colour and style tags; a failed description is
/// logged and the item is saved as given.
pub async fn add_item(
    state: &AppState,
    user_id: Uuid,
    mut req: UploadRequest,
) -> Result<WardrobeItemRow, AppError> {
    let item_id = Uuid::new_v4();
    let image = match req.image.take() {
        Some(raw) => Some(compress(state, raw).await?),
        None => None,
    };

    if let Some(image) = image.as_ref().filter(|_| req.color.is_none()) {
        match describe_image(
            &state.llm,
            &state.config.models.vision,
            &image.data_url(),
            Some(req.name.as_str()),
        )
        .await
        {
            Ok(description) => {
                req.color = description.color_text();
                for tag in description.style_tags() {
                    if !req.style_tags.contains(&tag) {
                        req.style_tags.push(tag);
                    }
                }
            }
            Err(e) => warn!("Could not describe upload for item {item_id}: {e}"),
        }
    }

    let key = match &image {
        Some(image) => Some(store_image(state, user_id, item_id, image).await?),
        None => None,
    };

    insert_or_discard_image(
        state,
        NewItem {
            id: item_id,
            user_id,
            name: &req.name,
            category: &req.category,
            color: req.color.as_deref(),
            style_tags: &req.style_tags,
            season: req.season,
            image_key: key.as_deref(),
            image_content_type: image.as_ref().map(|i| i.format.content_type()),
        },
    )
    .await
}

/// Inserts the row. When the insert fails, the photo already stored for it
/// is removed; a failed removal is only logged.
async fn insert_or_discard_image(
    state: &AppState,
    item: NewItem<'_>,
) -> Result<WardrobeItemRow, AppError> {
    let key = item.image_key.map(str::to_string);
    match store::insert_item(&state.db, item).await {
        Ok(row) => Ok(row),
        Err(e) => {
            if let Some(key) = key {
                if let Err(cleanup) = state.images.delete(&key).await {
                    warn!("Image {key} left behind after failed insert: {cleanup}");
                }
            }
            Err(e)
        }
    }
}

pub async fn add_from_daily(
    state: &AppState,
    user_id: Uuid,
    req: FromDailyRequest,
) -> Result<WardrobeItemRow, AppError> {
    let item_id = Uuid::new_v4();
    let image = compress(state, req.image).await?;
    let key = store_image(state, user_id, item_id, &image).await?;

    insert_or_discard_image(
        state,
        NewItem {
            id: item_id,
            user_id,
            name: &req.name,
            category: &req.category,
            color: None,
            style_tags: &[],
            season: Season::All,
            image_key: Some(&key),
            image_content_type: Some(image.format.content_type()),
        },
    )
    .await
}

/// Deletes the item, then its photo. A photo left behind is only logged.
pub async fn delete_item(state: &AppState, user_id: Uuid, item_id: Uuid) -> Result<(), AppError> {
    let row = store::delete_item(&state.db, user_id, item_id).await?;
    if let Some(key) = &row.image_key {
        if let Err(e) = state.images.delete(key).await {
            warn!("Wardrobe item {item_id} deleted but image {key} was not: {e}");
        }
    }
    info!("Deleted wardrobe item {item_id} for user {user_id}");
    Ok(())
}

/// Photo bytes and content type for an owned item.
pub async fn load_image(
    state: &AppState,
    user_id: Uuid,
    item_id: Uuid,
) -> Result<(Vec<u8>, String), AppError> {
    let row = store::get_item(&state.db, user_id, item_id).await?;
    let key = row
        .image_key
        .ok_or_else(|| AppError::NotFound(format!("Wardrobe item {item_id} has no image")))?;
    let bytes = state.images.get(&key).await?;
    let content_type = row
        .image_content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok((bytes, content_type))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wardrobe::storage::MemoryImageStore;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;
    use std::sync::Arc;

    #[test]
    fn test_upload_defaults() {
        let form = MultipartForm::default()
            .with_text("name", "White silk shirt")
            .with_text("category", "top");
        let req = UploadRequest::from_form(&form).unwrap();
        assert_eq!(req.category, "Top");
        assert_eq!(req.season, Season::All);
        assert!(req.color.is_none());
        assert!(req.image.is_none());
    }

    #[test]
    fn test_upload_rejects_unknown_category_and_season() {
        let form = MultipartForm::default()
            .with_text("name", "Hat")
            .with_text("category", "Headwear");
        assert!(matches!(
            UploadRequest::from_form(&form),
            Err(AppError::Validation(_))
        ));

        let form = MultipartForm::default()
            .with_text("name", "Coat")
            .with_text("category", "Outerwear")
            .with_text("season", "monsoon");
        assert!(matches!(
            UploadRequest::from_form(&form),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_upload_reads_tags_and_image() {
        let form = MultipartForm::default()
            .with_text("name", "Linen trousers")
            .with_text("category", "Bottom")
            .with_text("season", "Summer")
            .with_text("style_tags", "relaxed, linen")
            .with_file("image", vec![1, 2, 3]);
        let req = UploadRequest::from_form(&form).unwrap();
        assert_eq!(req.season, Season::Summer);
        assert_eq!(req.style_tags, vec!["relaxed", "linen"]);
        assert_eq!(req.image, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_from_daily_requires_name() {
        let form = MultipartForm::default().with_file("image", vec![1]);
        let err = FromDailyRequest::from_form(&form).unwrap_err();
        assert_eq!(err.public_message(), "Missing item name.");
    }

    #[test]
    fn test_from_daily_requires_an_image() {
        let form = MultipartForm::default().with_text("item_name", "Trench");
        let err = FromDailyRequest::from_form(&form).unwrap_err();
        assert_eq!(
            err.public_message(),
            "Missing image (upload a file or include image_b64)."
        );
    }

    #[test]
    fn test_from_daily_accepts_data_url() {
        let form = MultipartForm::default()
            .with_text("item_name", "Trench")
            .with_text("image_b64", "data:image/jpeg;base64,AQID");
        let req = FromDailyRequest::from_form(&form).unwrap();
        assert_eq!(req.image, vec![1, 2, 3]);
        assert_eq!(req.category, DEFAULT_CATEGORY);
    }

    #[test]
    fn test_from_daily_file_wins_over_base64() {
        let form = MultipartForm::default()
            .with_text("item_name", "Trench")
            .with_text("image_b64", "not base64 at all!")
            .with_file("image", vec![9]);
        assert_eq!(FromDailyRequest::from_form(&form).unwrap().image, vec![9]);
    }

    #[test]
    fn test_invalid_base64_is_rejected() {
        let err = decode_image_b64("data:image/png;base64,@@@").unwrap_err();
        assert_eq!(err.public_message(), "Invalid image data.");
        assert_eq!(decode_image_b64("AQID").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_base64_tolerates_missing_padding_and_line_breaks() {
        assert_eq!(decode_image_b64("AQI").unwrap(), vec![1, 2]);
        assert_eq!(decode_image_b64("AQI=").unwrap(), vec![1, 2]);
        assert_eq!(decode_image_b64("data:image/png;base64,AQ\r\nID\n").unwrap(), vec![1, 2, 3]);
    }

    fn tiny_png() -> Vec<u8> {
        let mut buf = Vec::new();
        DynamicImage::ImageRgb8(RgbImage::new(8, 8))
            .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
            .unwrap();
        buf
    }

    fn state_with_store() -> (AppState, Arc<MemoryImageStore>) {
        let store = Arc::new(MemoryImageStore::default());
        let mut state = AppState::for_tests();
        state.images = store.clone();
        (state, store)
    }

    #[tokio::test]
    async fn test_failed_insert_removes_daily_item_image() {
        let (state, store) = state_with_store();
        let req = FromDailyRequest {
            name: "Chocolate trench".to_string(),
            category: DEFAULT_CATEGORY.to_string(),
            image: tiny_png(),
        };
        let err = add_from_daily(&state, Uuid::new_v4(), req).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_failed_insert_removes_upload_image() {
        let (state, store) = state_with_store();
        let req = UploadRequest {
            name: "Camel coat".to_string(),
            category: "Outerwear".to_string(),
            color: Some("camel".to_string()),
            season: Season::Fall,
            style_tags: vec![],
            image: Some(tiny_png()),
        };
        let err = add_item(&state, Uuid::new_v4(), req).await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
        assert!(store.is_empty());
    }
}
