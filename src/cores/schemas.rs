use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------------------------ OpenAI ------------------------------------------
// Completion reply, reduced to the fields the relay reads.
#[derive(Deserialize, Serialize, Debug)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,    // List of generated options returned.
}

#[derive(Deserialize, Serialize, Debug)]
pub struct CompletionChoice {
    pub message: ReplyMessage,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ReplyMessage {
    #[allow(dead_code)]
    pub role: Option<String>,
    pub content: Option<String>,
    // Capability-dependent extension field, absent on plain chat models.
    #[serde(default)]
    pub images: Vec<ReplyImage>,
}

// Providers return generated images in several shapes: a bare base64 string,
// an OpenAI-style b64_json object, a nested image_url object, or a generic
// data field. Anything else is dropped during normalization.
#[derive(Deserialize, Serialize, Debug)]
#[serde(untagged)]
pub enum ReplyImage {
    Text(String),
    Object(ReplyImageObject),
    Other(Value),
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ReplyImageObject {
    pub b64_json: Option<String>,
    pub image_url: Option<ReplyImageUrl>,
    pub data: Option<String>,
}

#[derive(Deserialize, Serialize, Debug)]
pub struct ReplyImageUrl {
    pub url: Option<String>,
}

impl ReplyImage {
    // First-match precedence: bare string, b64_json, image_url.url, data.
    pub fn into_payload(self) -> Option<String> {
        match self {
            ReplyImage::Text(payload) => Some(payload),
            ReplyImage::Object(ReplyImageObject { b64_json, image_url, data }) => {
                b64_json.or_else(|| image_url.and_then(|nested| nested.url)).or(data)
            }
            ReplyImage::Other(_) => None,
        }
    }
}

// Normalized relay result handed back to the ingress layer.
#[derive(Debug)]
pub struct RelayOutput {
    pub text_response: Option<String>,
    pub images: Vec<String>,
}
