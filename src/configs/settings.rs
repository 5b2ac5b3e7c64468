use std::env;

// ---------------------------------------------- Config ----------------------------------------------
// Built once in main after dotenv and handed to the app as shared data.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_key: String,
    pub api_base_url: String,
    pub model: String,
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_key: String::new(),
            api_base_url: "https://openrouter.ai/api/v1".to_string(),
            model: "google/gemini-2.5-flash-image-preview:free".to_string(),
            host: "0.0.0.0".to_string(),
            port: 8000,
            request_timeout_secs: 120,
        }
    }
}

impl Settings {
    pub fn from_env() -> Settings {
        let defaults = Settings::default();
        Settings {
            api_key: env::var("OPENAI_API_KEY").unwrap_or(defaults.api_key),
            api_base_url: env::var("OPENAI_API_URL").unwrap_or(defaults.api_base_url),
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.model),
            host: env::var("IMAGIG_HOST").unwrap_or(defaults.host),
            port: env::var("IMAGIG_PORT")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout_secs: env::var("IMAGIG_REQUEST_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }
}
