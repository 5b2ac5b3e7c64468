use actix_cors::Cors;
use actix_multipart::form::MultipartFormConfig;
use actix_web::{web, App, HttpServer};
use log4rs::init_file;
use std::fs::metadata;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use imagig::apis;
use imagig::apis::api_doc::ApiDoc;
use imagig::configs::settings::Settings;

// The form config must admit bodies above the 20 MB validation limit so the
// handler's own size check produces the rejection message.
const MULTIPART_LIMIT: usize = 32 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    let log_config_path = if metadata("/etc/imagig/log4rs.yaml").is_ok() {
        "/etc/imagig/log4rs.yaml".to_string()
    } else {
        format!("{}/src/configs/log4rs.yaml", env!("CARGO_MANIFEST_DIR"))
    };
    init_file(&log_config_path, Default::default())
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, format!("Logger setup failed: {}", e)))?;

    let settings = Settings::from_env();
    let host = settings.host.clone();
    let port = settings.port;
    println!("Starting server on {}:{}", host, port);

    // Start the HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin() // cors
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec!["Content-Type", "Authorization", "User-Agent"])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(web::Data::new(settings.clone()))
            .app_data(
                MultipartFormConfig::default()
                    .total_limit(MULTIPART_LIMIT)
                    .memory_limit(MULTIPART_LIMIT),
            )
            .configure(apis::models_api::image::configure)
            .service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
