use bytes::Bytes;
use futures_util::stream::TryStream;
use reqwest::{multipart, Body, Client};
use std::fmt;
use std::path::{Path, PathBuf};
use url::Url;

use crate::errors::{AppError, AppResult};

/// Image content handed to [`Uploader::create`](super::Uploader::create).
pub enum UploadInput {
    /// Bytes already in memory
    Bytes(Vec<u8>),
    /// A streaming body, sent as-is
    Stream(Body),
    /// `file:` URL for a local file, any other URL is downloaded first
    Locator(String),
}

impl UploadInput {
    pub fn from_bytes(data: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(data.into())
    }

    pub fn from_stream<S>(stream: S) -> Self
    where
        S: TryStream + Send + Sync + 'static,
        S::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
        Bytes: From<S::Ok>,
    {
        Self::Stream(Body::wrap_stream(stream))
    }

    pub fn from_locator(locator: impl Into<String>) -> Self {
        Self::Locator(locator.into())
    }

    /// Turns a filesystem path into a `file:` locator. Relative paths are
    /// resolved against the current directory.
    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };

        let url = Url::from_file_path(&absolute).map_err(|_| {
            AppError::invalid_locator(&absolute.to_string_lossy(), "not an absolute file path")
        })?;

        Ok(Self::Locator(url.into()))
    }

    /// Resolves the input into a payload. Reads the file for `file:` locators
    /// and issues a single GET for any other scheme.
    pub(crate) async fn resolve(self, client: &Client) -> AppResult<Payload> {
        match self {
            UploadInput::Bytes(data) => Ok(Payload::Bytes(data)),
            UploadInput::Stream(body) => Ok(Payload::Stream(body)),
            UploadInput::Locator(locator) => {
                let url =
                    Url::parse(&locator).map_err(|e| AppError::invalid_locator(&locator, e))?;

                if url.scheme() == "file" {
                    let path = local_path(&url, &locator)?;
                    log::debug!("Reading local image {}", path.display());
                    let data = tokio::fs::read(&path).await?;
                    Ok(Payload::Bytes(data))
                } else {
                    log::debug!("Fetching remote image {}", url);
                    let response = client.get(url).send().await?.error_for_status()?;
                    Ok(Payload::Stream(Body::from(response)))
                }
            }
        }
    }
}

fn local_path(url: &Url, locator: &str) -> AppResult<PathBuf> {
    url.to_file_path()
        .map_err(|_| AppError::invalid_locator(locator, "not a local file path"))
}

impl From<Vec<u8>> for UploadInput {
    fn from(data: Vec<u8>) -> Self {
        Self::Bytes(data)
    }
}

impl From<&[u8]> for UploadInput {
    fn from(data: &[u8]) -> Self {
        Self::Bytes(data.to_vec())
    }
}

impl From<String> for UploadInput {
    fn from(locator: String) -> Self {
        Self::Locator(locator)
    }
}

impl From<&str> for UploadInput {
    fn from(locator: &str) -> Self {
        Self::Locator(locator.to_string())
    }
}

impl TryFrom<PathBuf> for UploadInput {
    type Error = AppError;

    fn try_from(path: PathBuf) -> AppResult<Self> {
        Self::from_path(path)
    }
}

impl TryFrom<&Path> for UploadInput {
    type Error = AppError;

    fn try_from(path: &Path) -> AppResult<Self> {
        Self::from_path(path)
    }
}

impl From<Body> for UploadInput {
    fn from(body: Body) -> Self {
        Self::Stream(body)
    }
}

impl fmt::Debug for UploadInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadInput::Bytes(data) => f.debug_tuple("Bytes").field(&data.len()).finish(),
            UploadInput::Stream(_) => f.write_str("Stream"),
            UploadInput::Locator(locator) => f.debug_tuple("Locator").field(locator).finish(),
        }
    }
}

/// Normalized binary content, consumed by exactly one multipart part.
pub(crate) enum Payload {
    Bytes(Vec<u8>),
    Stream(Body),
}

impl Payload {
    pub(crate) fn kind(&self) -> &'static str {
        match self {
            Payload::Bytes(_) => "in-memory",
            Payload::Stream(_) => "streamed",
        }
    }

    pub(crate) fn into_part(self) -> multipart::Part {
        match self {
            Payload::Bytes(data) => multipart::Part::bytes(data),
            Payload::Stream(body) => multipart::Part::stream(body),
        }
    }
}
