use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use log::info;
use reqwest::Client;
use serde_json::json;

use crate::configs::settings::Settings;
use crate::cores::image_models::image_controller::ImageProcessor;
use crate::cores::schemas::{CompletionResponse, RelayOutput, ReplyImage};

pub struct OpenAICompatible {
    settings: Settings,
}

impl OpenAICompatible {
    pub fn new(settings: Settings) -> Self {
        OpenAICompatible { settings }
    }
}

// Wrap raw image bytes as the inline data URL form the downstream API expects.
pub fn encode_image(image_bytes: &[u8], content_type: &str) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(image_bytes))
}

// Reduce a completion reply to the text and image payloads the caller needs.
// An empty content string collapses to None so the wire never carries "".
pub fn normalize_reply(completion: CompletionResponse) -> Result<RelayOutput, String> {
    let choice = completion
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "Response contained no choices".to_string())?;
    let message = choice.message;
    let text_response = message.content.filter(|content| !content.is_empty());
    let images = message
        .images
        .into_iter()
        .filter_map(ReplyImage::into_payload)
        .collect();
    Ok(RelayOutput { text_response, images })
}

#[async_trait]
impl ImageProcessor for OpenAICompatible {
    async fn process_image(
        &self,
        image_bytes: &[u8],
        content_type: &str,
        prompt: &str,
    ) -> Result<RelayOutput, String> {
        // 1. Encode the image as an inline data URL
        let image_data_url = encode_image(image_bytes, content_type);

        // 2. Build the multimodal request body, text part first
        let request_body = json!({
            "model": self.settings.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": prompt
                        },
                        {
                            "type": "image_url",
                            "image_url": {
                                "url": image_data_url
                            }
                        }
                    ]
                }
            ]
        });

        // 3. Use reqwest to initiate a POST request
        let client = Client::builder()
            .timeout(Duration::from_secs(self.settings.request_timeout_secs))
            .build()
            .map_err(|err| format!("Failed to build HTTP client: {}", err))?;

        let url = format!(
            "{}/chat/completions",
            self.settings.api_base_url.trim_end_matches('/')
        );
        info!("Relaying {} byte image ({}) to {}", image_bytes.len(), content_type, url);
        let response = match client
            .post(&url)
            .bearer_auth(&self.settings.api_key)
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(err) => return Err(format!("Request failed: {}", err)),
        };

        // 4. Parse the response content into CompletionResponse
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(format!("API returned non-success status: {}: {}", status, body));
        }
        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|err| format!("Failed to parse response: {}", err))?;

        normalize_reply(completion)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_encode_image_round_trip() {
        let bytes: Vec<u8> = (0u8..=255).cycle().take(1000).collect();
        let data_url = encode_image(&bytes, "image/png");
        let payload = data_url
            .strip_prefix("data:image/png;base64,")
            .expect("data URL prefix");
        assert_eq!(STANDARD.decode(payload).unwrap(), bytes);
    }

    fn reply_with_images(images: serde_json::Value) -> CompletionResponse {
        serde_json::from_value(json!({
            "choices": [
                {
                    "message": {
                        "role": "assistant",
                        "content": "done",
                        "images": images
                    }
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_b64_json_takes_precedence_over_image_url() {
        let completion = reply_with_images(json!([
            { "b64_json": "X", "image_url": { "url": "Y" } }
        ]));
        let output = normalize_reply(completion).unwrap();
        assert_eq!(output.images, vec!["X".to_string()]);
    }

    #[test]
    fn test_image_entry_shapes() {
        let completion = reply_with_images(json!([
            "bare-base64",
            { "image_url": { "url": "https://example.com/a.png" } },
            { "data": "generic-payload" },
            { "unrelated": true },
            42
        ]));
        let output = normalize_reply(completion).unwrap();
        // unmatched shapes are dropped silently
        assert_eq!(
            output.images,
            vec![
                "bare-base64".to_string(),
                "https://example.com/a.png".to_string(),
                "generic-payload".to_string(),
            ]
        );
    }

    #[test]
    fn test_image_url_without_url_falls_through_to_data() {
        let completion = reply_with_images(json!([
            { "image_url": {}, "data": "fallback" }
        ]));
        let output = normalize_reply(completion).unwrap();
        assert_eq!(output.images, vec!["fallback".to_string()]);
    }

    #[test]
    fn test_missing_and_empty_content_collapse_to_none() {
        let completion: CompletionResponse = serde_json::from_value(json!({
            "choices": [ { "message": { "role": "assistant", "content": "" } } ]
        }))
        .unwrap();
        let output = normalize_reply(completion).unwrap();
        assert_eq!(output.text_response, None);
        assert!(output.images.is_empty());

        let completion: CompletionResponse = serde_json::from_value(json!({
            "choices": [ { "message": { "role": "assistant" } } ]
        }))
        .unwrap();
        let output = normalize_reply(completion).unwrap();
        assert_eq!(output.text_response, None);
    }

    #[test]
    fn test_empty_choices_is_an_error() {
        let completion: CompletionResponse =
            serde_json::from_value(json!({ "choices": [] })).unwrap();
        assert!(normalize_reply(completion).is_err());
    }
}
