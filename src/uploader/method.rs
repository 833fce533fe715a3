use std::fmt;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

/// Which Bilibili upload surface receives the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMethod {
    /// Feed picture upload, served from i0.hdslb.com
    #[default]
    Dynamic,
    /// Article cover upload, served from article.biliimg.com
    Article,
}

impl UploadMethod {
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            UploadMethod::Dynamic => "/x/dynamic/feed/draw/upload_bfs",
            UploadMethod::Article => "/x/article/creative/article/upcover",
        }
    }

    /// Multipart field carrying the image bytes.
    pub fn field_name(&self) -> &'static str {
        match self {
            UploadMethod::Dynamic => "file_up",
            UploadMethod::Article => "binary",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadMethod::Dynamic => "dynamic",
            UploadMethod::Article => "article",
        }
    }
}

impl FromStr for UploadMethod {
    type Err = AppError;

    fn from_str(s: &str) -> AppResult<Self> {
        match s {
            "dynamic" => Ok(UploadMethod::Dynamic),
            "article" => Ok(UploadMethod::Article),
            other => Err(AppError::unknown_method(other)),
        }
    }
}

impl fmt::Display for UploadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
