use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// Public location of an uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    pub url: String,
}

/// Envelope returned by every Bilibili web API endpoint.
#[derive(Debug, Deserialize)]
pub struct RemoteResponse {
    pub code: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<RemoteData>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RemoteData {
    /// Set by the article cover endpoint
    #[serde(default)]
    pub url: Option<String>,
    /// Set by the dynamic feed endpoint
    #[serde(default)]
    pub image_url: Option<String>,
}

impl RemoteResponse {
    pub fn parse(body: &str) -> AppResult<Self> {
        serde_json::from_str(body).map_err(|e| {
            log::debug!(
                "Unparseable upload response (first 200 chars): {}",
                &body[..floor_char_boundary(body, 200)]
            );
            AppError::UpstreamProtocol(format!("invalid response body: {}", e))
        })
    }

    /// `data.url` wins over `data.image_url`; empty strings count as absent.
    pub fn into_result(self) -> AppResult<UploadResult> {
        if self.code != 0 {
            let message = self.message.as_deref().unwrap_or("");
            return Err(AppError::upstream(self.code, message));
        }

        let data = self.data.unwrap_or_default();
        data.url
            .filter(|url| !url.is_empty())
            .or_else(|| data.image_url.filter(|url| !url.is_empty()))
            .map(|url| UploadResult { url })
            .ok_or_else(|| {
                AppError::UpstreamProtocol(
                    "upload succeeded but the response carries no url or image_url".to_string(),
                )
            })
    }
}

fn floor_char_boundary(s: &str, max: usize) -> usize {
    if s.len() <= max {
        return s.len();
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    end
}
