use reqwest::header::COOKIE;
use reqwest::{multipart, Client};
use secrecy::{ExposeSecret, SecretString};

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::security::InputValidator;

use super::input::{Payload, UploadInput};
use super::method::UploadMethod;
use super::response::{RemoteResponse, UploadResult};

pub const DEFAULT_BASE_URL: &str = "https://api.bilibili.com";

/// File name announced for the image part, whatever the actual format.
const UPLOAD_FILE_NAME: &str = "image.jpg";
const UPLOAD_MIME_TYPE: &str = "image/jpeg";

/// Uploads images to Bilibili using a logged-in session.
///
/// Configuration is fixed at construction. The uploader holds no per-call
/// state, so one instance can serve concurrent `create` calls.
#[derive(Debug)]
pub struct Uploader {
    client: Client,
    base_url: String,
    method: Option<String>,
    csrf: SecretString,
    sessdata: SecretString,
}

impl Uploader {
    /// Builds an uploader with a default HTTP client.
    pub fn new(config: &Config) -> AppResult<Self> {
        let client = Client::builder().build()?;
        Self::with_client(config, client)
    }

    /// Builds an uploader on top of a client supplied by the host.
    ///
    /// Credentials are validated here. The method is not: an unknown method
    /// is reported by [`create`](Self::create) before any I/O happens.
    pub fn with_client(config: &Config, client: Client) -> AppResult<Self> {
        InputValidator::validate_credential("cookie.bili_jct", &config.cookie.bili_jct)?;
        InputValidator::validate_credential("cookie.SESSDATA", &config.cookie.sessdata)?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            method: config.method.clone(),
            csrf: SecretString::new(config.cookie.bili_jct.clone().into_boxed_str()),
            sessdata: SecretString::new(config.cookie.sessdata.clone().into_boxed_str()),
        })
    }

    /// Points the uploader at another API host (a proxy or a test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolves the configured method, defaulting to `dynamic` when unset or empty.
    pub fn method(&self) -> AppResult<UploadMethod> {
        match self.method.as_deref() {
            None | Some("") => Ok(UploadMethod::default()),
            Some(name) => name.parse(),
        }
    }

    /// Uploads one image and returns its public URL.
    ///
    /// Runs strictly in order: method check, input resolution, one POST,
    /// response interpretation. Nothing is retried.
    pub async fn create(&self, input: UploadInput) -> AppResult<UploadResult> {
        let method = self.method()?;
        let payload = input.resolve(&self.client).await?;

        let url = format!("{}{}", self.base_url, method.endpoint_path());
        log::debug!(
            "Uploading {} payload via {} method to {}",
            payload.kind(),
            method,
            url
        );

        let form = self.build_form(method, payload)?;
        let response = self
            .client
            .post(&url)
            .header(COOKIE, format!("SESSDATA={}", self.sessdata.expose_secret()))
            .multipart(form)
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let result = RemoteResponse::parse(&body)?.into_result();

        match &result {
            Ok(uploaded) => log::info!("Image uploaded: {}", uploaded.url),
            Err(AppError::Upstream { code, message }) => {
                log::warn!("Upload rejected by Bilibili (code {}): {}", code, message)
            }
            Err(e) => log::warn!("Upload response unusable: {}", e),
        }

        result
    }

    fn build_form(&self, method: UploadMethod, payload: Payload) -> AppResult<multipart::Form> {
        let part = payload
            .into_part()
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME_TYPE)?;

        Ok(multipart::Form::new()
            .part(method.field_name(), part)
            .text("csrf", self.csrf.expose_secret().to_string()))
    }
}
