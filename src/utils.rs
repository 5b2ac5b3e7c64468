use actix_web::HttpRequest;
use chrono::Local;
use log::{error, info};

// Function for access log and error log
pub fn log_request(req: &HttpRequest, status_code: u16, error_message: Option<&str>) {
    let referer = req
        .headers()
        .get("Referer")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-")
        .to_string();
    let user_agent = req
        .headers()
        .get("User-Agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();
    let client_ip = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let request_method = req.method().as_str();
    let request_uri = req.uri().to_string();
    let http_version = format!("{:?}", req.version());
    let time = Local::now().format("%d/%b/%Y:%H:%M:%S %z");

    match error_message {
        Some(msg) => error!(
            "{client_ip} - - [{time}] \"{request_method} {request_uri} {http_version}\" {status_code} \"{referer}\" \"{user_agent}\" \"{msg}\""
        ),
        None => info!(
            "{client_ip} - - [{time}] \"{request_method} {request_uri} {http_version}\" {status_code} \"{referer}\" \"{user_agent}\""
        ),
    }
}
