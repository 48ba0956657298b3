//! Form bodies shared by the JSON API and the HTML pages.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// A fully read `multipart/form-data` body. Parts with a filename are files,
/// everything else is text. Repeated text fields keep the last value.
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, Bytes>,
}

impl MultipartForm {
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::default();
        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Malformed form data: {e}")))?
        {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            let is_file = field.file_name().is_some();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Could not read field '{name}': {e}")))?;

            if is_file {
                // Browsers send an empty part when no file was chosen.
                if !data.is_empty() {
                    form.files.insert(name, data);
                }
            } else {
                form.fields
                    .insert(name, String::from_utf8_lossy(&data).into_owned());
            }
        }
        Ok(form)
    }

    /// Trimmed text value; blank values count as missing.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    /// Bytes of a non-empty file part.
    pub fn file(&self, name: &str) -> Option<&Bytes> {
        self.files.get(name)
    }

    #[cfg(test)]
    pub fn with_text(mut self, name: &str, value: &str) -> Self {
        self.fields.insert(name.to_string(), value.to_string());
        self
    }

    #[cfg(test)]
    pub fn with_file(mut self, name: &str, data: Vec<u8>) -> Self {
        self.files.insert(name.to_string(), Bytes::from(data));
        self
    }
}

/// Splits a comma-separated tag list, dropping blanks.
pub fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_treats_blank_as_missing() {
        let form = MultipartForm::default()
            .with_text("name", "  Silk shirt ")
            .with_text("color", "   ");
        assert_eq!(form.text("name"), Some("Silk shirt"));
        assert_eq!(form.text("color"), None);
        assert_eq!(form.text("absent"), None);
    }

    #[test]
    fn test_file_parts_are_kept_apart_from_text() {
        let form = MultipartForm::default()
            .with_text("name", "Trench")
            .with_file("image", vec![7, 8]);
        assert_eq!(form.file("image").map(|b| b.to_vec()), Some(vec![7, 8]));
        assert!(form.file("name").is_none());
        assert_eq!(form.text("image"), None);
    }

    #[test]
    fn test_split_tags() {
        assert_eq!(
            split_tags("minimal, , tailored ,linen"),
            vec!["minimal", "tailored", "linen"]
        );
        assert!(split_tags("").is_empty());
    }
}
