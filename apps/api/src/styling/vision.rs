use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, VISION_SYSTEM};
use crate::llm_client::{extract_json_object, ChatMessage, LlmClient};
use crate::styling::prompts::{DESCRIBE_PROMPT_TEMPLATE, VISION_TEMPERATURE};

/// What the vision model saw in an uploaded photo.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageDescription {
    pub name_hint: String,
    pub category_guess: String,
    pub colors: Vec<String>,
    pub patterns: Vec<String>,
    pub silhouette: String,
}

impl ImageDescription {
    /// Colours as a single display string, `None` when the model saw none.
    pub fn color_text(&self) -> Option<String> {
        let colors: Vec<&str> = self
            .colors
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .collect();
        (!colors.is_empty()).then(|| colors.join(", "))
    }

    /// Patterns followed by the silhouette, blanks removed.
    pub fn style_tags(&self) -> Vec<String> {
        self.patterns
            .iter()
            .chain(std::iter::once(&self.silhouette))
            .map(|t| t.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect()
    }
}

pub fn build_describe_prompt(name_hint: Option<&str>) -> String {
    let hint = name_hint.map(str::trim).filter(|h| !h.is_empty());
    let hint_text = hint
        .map(|h| format!("\nThe user says this item is: {h}.\n"))
        .unwrap_or_default();
    fill_template(
        DESCRIBE_PROMPT_TEMPLATE,
        &[("hint_text", hint_text.as_str()), ("name_hint", hint.unwrap_or(""))],
    )
}

/// Parses the model reply, tolerating prose or code fences around the object.
pub fn parse_description(reply: &str) -> Result<ImageDescription, AppError> {
    let json = extract_json_object(reply)
        .ok_or_else(|| AppError::Llm("Image description contained no JSON object".to_string()))?;
    serde_json::from_str(json)
        .map_err(|e| AppError::Llm(format!("Image description was not valid JSON: {e}")))
}

/// Describes a photo given as a `data:` URL.
pub async fn describe_image(
    llm: &LlmClient,
    model: &str,
    data_url: &str,
    name_hint: Option<&str>,
) -> Result<ImageDescription, AppError> {
    let messages = [
        ChatMessage::system(VISION_SYSTEM),
        ChatMessage::user_with_image(build_describe_prompt(name_hint), data_url),
    ];
    let response = llm.chat(model, &messages, VISION_TEMPERATURE).await?;
    let reply = response
        .text()
        .ok_or_else(|| AppError::Llm("Vision model returned no content".to_string()))?;
    let description = parse_description(reply)?;
    debug!(
        "Image described: category={}, colors={:?}",
        description.category_guess, description.colors
    );
    Ok(description)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_includes_hint_when_given() {
        let prompt = build_describe_prompt(Some("Lemaire trench"));
        assert!(prompt.contains("The user says this item is: Lemaire trench."));
        assert!(prompt.contains(r#""name_hint": "Lemaire trench""#));
    }

    #[test]
    fn test_prompt_without_hint() {
        let prompt = build_describe_prompt(Some("   "));
        assert!(!prompt.contains("The user says"));
        assert!(prompt.contains(r#""name_hint": """#));
        assert!(!prompt.contains("{hint_text}"));
    }

    #[test]
    fn test_parse_fenced_reply() {
        let reply = "```json\n{\"name_hint\": \"\", \"category_guess\": \"coat\", \
                     \"colors\": [\"camel\", \"brown\"], \"patterns\": [\"plain\"], \
                     \"silhouette\": \"draped\"}\n```";
        let d = parse_description(reply).unwrap();
        assert_eq!(d.category_guess, "coat");
        assert_eq!(d.color_text().as_deref(), Some("camel, brown"));
        assert_eq!(d.style_tags(), vec!["plain", "draped"]);
    }

    #[test]
    fn test_parse_partial_object_uses_defaults() {
        let d = parse_description(r#"{"colors": ["navy"]}"#).unwrap();
        assert_eq!(d.silhouette, "");
        assert_eq!(d.style_tags(), Vec::<String>::new());
    }

    #[test]
    fn test_parse_rejects_reply_without_json() {
        assert!(matches!(
            parse_description("I cannot see the image."),
            Err(AppError::Llm(_))
        ));
    }

    #[test]
    fn test_color_text_none_when_empty() {
        let d = ImageDescription {
            colors: vec![" ".to_string()],
            ..Default::default()
        };
        assert_eq!(d.color_text(), None);
    }
}
