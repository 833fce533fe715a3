//! Upload images to Bilibili's image hosting and get back a public URL.
//!
//! ```rust,no_run
//! use bili_temp::{Config, UploadInput, Uploader};
//!
//! # async fn run() -> bili_temp::AppResult<()> {
//! let config = Config::new(Some("dynamic"), "<bili_jct>", "<SESSDATA>");
//! let uploader = Uploader::new(&config)?;
//!
//! let result = uploader.create(UploadInput::from_path("cat.jpg")?).await?;
//! println!("{}", result.url);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod errors;
pub mod security;
pub mod uploader;

pub use config::{Config, Cookie};
pub use errors::{AppError, AppResult};
pub use uploader::{
    TempService, UploadInput, UploadMethod, UploadResult, Uploader, SERVICE_NAME,
};
