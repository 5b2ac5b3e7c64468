use async_trait::async_trait;

use crate::cores::schemas::RelayOutput;

#[async_trait]
pub trait ImageProcessor: Send + Sync {
    async fn process_image(
        &self,
        image_bytes: &[u8],
        content_type: &str,
        prompt: &str,
    ) -> Result<RelayOutput, String>;
}
