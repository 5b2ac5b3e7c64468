use utoipa::OpenApi;

use crate::apis::models_api;
use crate::apis::models_api::schemas::ImageProcessResponse;
use crate::apis::schemas::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        models_api::image::api_info,
        models_api::image::health,
        models_api::image::process_image,
    ),
    components(
        schemas(ImageProcessResponse, ErrorResponse)
    )
)]
pub struct ApiDoc;
