use actix_multipart::form::{bytes::Bytes, text::Text, MultipartForm};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cores::schemas::RelayOutput;

pub const ALLOWED_IMAGE_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/gif", "image/webp"];
pub const MAX_IMAGE_BYTES: usize = 20 * 1024 * 1024;
pub const DEFAULT_PROMPT: &str = "把这个弄成北条司漫画风格的";

// Multipart form accepted by the /process-image/ interface.
#[derive(Debug, MultipartForm)]
pub struct ProcessImageForm {
    pub file: Bytes,
    pub prompt: Option<Text<String>>,
}

// Define the response struct, corresponding to the response data format of the /process-image/ interface.
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct ImageProcessResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_response: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    pub processed_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ImageProcessResponse {
    pub fn success(output: RelayOutput) -> Self {
        ImageProcessResponse {
            status: "success".to_string(),
            text_response: output.text_response,
            images: Some(output.images),
            processed_at: Utc::now().to_rfc3339(),
            error: None,
        }
    }

    pub fn failure(message: String) -> Self {
        ImageProcessResponse {
            status: "error".to_string(),
            text_response: None,
            images: None,
            processed_at: Utc::now().to_rfc3339(),
            error: Some(message),
        }
    }
}
