// Standalone debug client: sends one local image through the relay and saves
// any returned images under generated_images/.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::Local;

use imagig::apis::models_api::schemas::DEFAULT_PROMPT;
use imagig::configs::settings::Settings;
use imagig::cores::image_models::image_controller::ImageProcessor;
use imagig::cores::image_models::openai::OpenAICompatible;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let mut args = env::args().skip(1);
    let image_path = args.next().ok_or("usage: relay_demo <image> [prompt]")?;
    let prompt = args.next().unwrap_or_else(|| DEFAULT_PROMPT.to_string());

    let settings = Settings::from_env();
    let image_bytes = fs::read(&image_path)?;
    let content_type = guess_content_type(&image_path);
    println!(
        "Sending {} ({} bytes, {}) to {}",
        image_path,
        image_bytes.len(),
        content_type,
        settings.model
    );

    let relay = OpenAICompatible::new(settings);
    let output = relay.process_image(&image_bytes, content_type, &prompt).await?;

    if let Some(text) = &output.text_response {
        println!("Text reply: {}", text);
    }
    if output.images.is_empty() {
        println!("No images returned");
        return Ok(());
    }

    let output_dir = Path::new("generated_images");
    fs::create_dir_all(output_dir)?;
    for (index, payload) in output.images.iter().enumerate() {
        match save_base64_image(payload, output_dir, index) {
            Ok(path) => println!("Saved {}", path.display()),
            Err(err) => eprintln!("Failed to save image {}: {}", index, err),
        }
    }

    Ok(())
}

fn guess_content_type(path: &str) -> &'static str {
    let extension = Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

fn save_base64_image(
    payload: &str,
    output_dir: &Path,
    index: usize,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let (base64_data, img_format) = split_data_url(payload);
    let file_path = output_dir.join(format!("image_{}_{}.{}", timestamp, index, img_format));
    let image_data = STANDARD.decode(base64_data)?;
    fs::write(&file_path, image_data)?;
    Ok(file_path)
}

// data:image/png;base64,xxx -> (xxx, "png"); headerless payloads default to png.
fn split_data_url(payload: &str) -> (&str, &str) {
    match payload.split_once(',') {
        Some((header, data)) => {
            let format = header
                .split_once('/')
                .and_then(|(_, rest)| rest.split_once(';'))
                .map(|(subtype, _)| subtype)
                .unwrap_or("png");
            (data, format)
        }
        None => (payload, "png"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_data_url_with_header() {
        let (data, format) = split_data_url("data:image/jpeg;base64,AAAA");
        assert_eq!(data, "AAAA");
        assert_eq!(format, "jpeg");
    }

    #[test]
    fn test_split_data_url_headerless_defaults_to_png() {
        let (data, format) = split_data_url("AAAA");
        assert_eq!(data, "AAAA");
        assert_eq!(format, "png");
    }

    #[test]
    fn test_split_data_url_malformed_header_defaults_to_png() {
        let (data, format) = split_data_url("base64,AAAA");
        assert_eq!(data, "AAAA");
        assert_eq!(format, "png");
    }

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type("a/b/photo.PNG"), "image/png");
        assert_eq!(guess_content_type("photo.webp"), "image/webp");
        assert_eq!(guess_content_type("photo"), "image/jpeg");
    }
}
