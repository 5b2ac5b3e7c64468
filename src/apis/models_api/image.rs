use actix_multipart::form::MultipartForm;
use actix_web::http::header::ContentType;
use actix_web::{get, post, web, Error, HttpRequest, HttpResponse, Responder};
use chrono::Utc;
use log::info;
use serde_json::json;

use crate::apis::models_api::schemas::{
    ImageProcessResponse, ProcessImageForm, ALLOWED_IMAGE_TYPES, DEFAULT_PROMPT, MAX_IMAGE_BYTES,
};
use crate::apis::schemas::ErrorResponse;
use crate::configs::settings::Settings;
use crate::cores::image_models::image_controller::ImageProcessor;
use crate::cores::image_models::openai::OpenAICompatible;
use crate::cores::schemas::RelayOutput;
use crate::utils::log_request;

// Configure the actix_web service routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(api_info)
        .service(health)
        .service(process_image);
}

// define an interface layer that calls the image processing method of the large model
struct IMG {
    model: Box<dyn ImageProcessor>,
}

impl IMG {
    fn new(model: Box<dyn ImageProcessor>) -> Self {
        IMG { model }
    }

    async fn process_image(
        &self,
        image_bytes: &[u8],
        content_type: &str,
        prompt: &str,
    ) -> Result<RelayOutput, String> {
        self.model.process_image(image_bytes, content_type, prompt).await
    }
}

// Landing page bundled at compile time.
#[get("/")]
pub async fn index() -> impl Responder {
    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/static/index.html")))
}

#[utoipa::path(
    get,  // 请求方法
    path = "/api",  // 路径
    responses(
        (status = 200, body = String),
    )  // 响应内容
)]
#[get("/api")]
pub async fn api_info() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "service": "图片处理 API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "POST /process-image/": "上传图片并处理",
            "GET /swagger-ui/": "API 文档"
        }
    }))
}

#[utoipa::path(
    get,  // 请求方法
    path = "/health",  // 路径
    responses(
        (status = 200, body = String),
    )  // 响应内容
)]
#[get("/health")]
pub async fn health() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

#[utoipa::path(
    post,  // 请求方法
    path = "/process-image/",  // 路径
    responses(
        (status = 200, body = ImageProcessResponse),
        (status = 400, body = ErrorResponse),
    )  // 响应内容
)]
// Handle the POST request for /process-image/.
#[post("/process-image/")]
pub async fn process_image(
    req: HttpRequest,
    settings: web::Data<Settings>,
    MultipartForm(form): MultipartForm<ProcessImageForm>,
) -> Result<impl Responder, Error> {
    // 1. Validate the file type, defaulting to jpeg when the part carries none
    let content_type = form
        .file
        .content_type
        .as_ref()
        .map(|mime| mime.essence_str().to_string())
        .unwrap_or_else(|| "image/jpeg".to_string());
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        let error_response = ErrorResponse {
            error: format!(
                "Unsupported file type: {}. Allowed types: {}",
                content_type,
                ALLOWED_IMAGE_TYPES.join(", ")
            ),
        };
        log_request(&req, 400, Some(&error_response.error));
        return Ok(HttpResponse::BadRequest().json(error_response));
    }

    // 2. Validate the file size before any outbound call
    let contents = form.file.data;
    if contents.len() > MAX_IMAGE_BYTES {
        let error_response = ErrorResponse {
            error: format!(
                "File too large. Maximum allowed size: {} MB",
                MAX_IMAGE_BYTES / 1024 / 1024
            ),
        };
        log_request(&req, 400, Some(&error_response.error));
        return Ok(HttpResponse::BadRequest().json(error_response));
    }
    if contents.is_empty() {
        let error_response = ErrorResponse {
            error: "Uploaded file is empty".to_string(),
        };
        log_request(&req, 400, Some(&error_response.error));
        return Ok(HttpResponse::BadRequest().json(error_response));
    }

    let prompt = form
        .prompt
        .map(|text| text.into_inner())
        .unwrap_or_else(|| DEFAULT_PROMPT.to_string());
    info!("Processing image ({} bytes, {}) with prompt: {}", contents.len(), content_type, prompt);

    // 3. Send the request to the model service
    let model = IMG::new(Box::new(OpenAICompatible::new(settings.get_ref().clone())));
    let response = model.process_image(&contents, &content_type, &prompt).await;
    match response {
        Ok(output) => {
            log_request(&req, 200, None);
            Ok(HttpResponse::Ok().json(ImageProcessResponse::success(output)))
        }
        Err(err) => {
            // Downstream failures degrade to a structured error body, not a transport fault
            let message = format!(
                "Failed to get response from {} image processing: {}",
                settings.model, err
            );
            log_request(&req, 200, Some(&message));
            Ok(HttpResponse::Ok().json(ImageProcessResponse::failure(message)))
        }
    }
}
