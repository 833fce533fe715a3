// Bilibili image upload
//
// Everything needed to turn bytes, a stream, or a locator into a public image URL

pub mod bilibili_client;
pub mod input;
pub mod method;
pub mod response;

use async_trait::async_trait;

use crate::errors::AppResult;

pub use bilibili_client::{Uploader, DEFAULT_BASE_URL};
pub use input::UploadInput;
pub use method::UploadMethod;
pub use response::{RemoteData, RemoteResponse, UploadResult};

/// Name under which a host registers the temporary image hosting capability.
pub const SERVICE_NAME: &str = "server.temp";

/// Temporary image hosting as seen by a host application.
#[async_trait]
pub trait TempService: Send + Sync {
    async fn create(&self, input: UploadInput) -> AppResult<UploadResult>;
}

#[async_trait]
impl TempService for Uploader {
    async fn create(&self, input: UploadInput) -> AppResult<UploadResult> {
        Uploader::create(self, input).await
    }
}
