use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use url::Url;

use bili_temp::config::{self, Config};
use bili_temp::{AppResult, UploadInput, Uploader};

fn resolve_config_path(explicit: Option<&Path>) -> AppResult<PathBuf> {
    match explicit {
        Some(path) => Ok(path.to_path_buf()),
        None => config::get_config_path(),
    }
}

/// Reads the config file when present, then layers environment variables and
/// the command line method on top.
fn effective_config(explicit: Option<&Path>, method: Option<String>) -> Result<Config> {
    let path = resolve_config_path(explicit)?;

    let mut config = if path.exists() {
        config::load_config_from(&path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?
    } else {
        log::debug!("No config file at {}, relying on environment", path.display());
        Config::default()
    };

    config.apply_env_overrides();
    if let Some(method) = method {
        config.method = Some(method);
    }

    config::validate_config(&config).with_context(|| {
        format!(
            "Missing or invalid credentials. Run `bili-temp config init` or set {} and {}",
            config::ENV_CSRF,
            config::ENV_SESSDATA
        )
    })?;

    Ok(config)
}

/// URLs with a scheme are locators; anything else is treated as a local path.
/// Single-letter schemes are Windows drive letters, not URLs.
pub fn parse_input(arg: &str) -> AppResult<UploadInput> {
    match Url::parse(arg) {
        Ok(url) if url.scheme().len() > 1 => Ok(UploadInput::from_locator(arg)),
        _ => UploadInput::from_path(arg),
    }
}

pub async fn upload(
    config_path: Option<&Path>,
    inputs: Vec<String>,
    method: Option<String>,
    json: bool,
) -> Result<()> {
    let config = effective_config(config_path, method)?;
    let uploader = Uploader::new(&config)?;

    log::debug!(
        "Uploading {} input(s) via {} method",
        inputs.len(),
        config.method_name()
    );

    let mut failures = 0;
    for arg in &inputs {
        let outcome = match parse_input(arg) {
            Ok(input) => uploader.create(input).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) if json => println!(
                "{}",
                serde_json::json!({ "input": arg, "url": result.url })
            ),
            Ok(result) => println!("{}", result.url),
            Err(e) => {
                failures += 1;
                log::error!("Failed to upload {}: {}", arg, e);
                if json {
                    println!(
                        "{}",
                        serde_json::json!({ "input": arg, "error": e.to_string() })
                    );
                }
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} upload(s) failed", failures, inputs.len());
    }
    Ok(())
}

pub fn config_path(explicit: Option<&Path>) -> Result<()> {
    println!("{}", resolve_config_path(explicit)?.display());
    Ok(())
}

pub fn config_show(explicit: Option<&Path>) -> Result<()> {
    let config = effective_config(explicit, None)?;
    println!("method: {}", config.method_name());
    println!("cookie: {:?}", config.cookie);
    Ok(())
}

pub fn config_init(
    explicit: Option<&Path>,
    csrf: &str,
    sessdata: &str,
    method: Option<String>,
) -> Result<()> {
    let path = resolve_config_path(explicit)?;
    let config = Config::new(method.as_deref(), csrf, sessdata);

    config::save_config_to(&path, &config)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_input_urls_are_locators() {
        for arg in ["https://example.com/a.jpg", "file:///tmp/a.jpg"] {
            match parse_input(arg).unwrap() {
                UploadInput::Locator(locator) => assert_eq!(locator, arg),
                other => panic!("unexpected input {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_input_paths_become_file_locators() {
        match parse_input("relative/cat.jpg").unwrap() {
            UploadInput::Locator(locator) => {
                assert!(locator.starts_with("file://"));
                assert!(locator.ends_with("relative/cat.jpg"));
            }
            other => panic!("unexpected input {:?}", other),
        }
    }

    #[test]
    fn test_config_init_then_show() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        config_init(Some(&path), "csrf-value", "sess-value", Some("article".to_string()))
            .unwrap();

        let loaded = config::load_config_from(&path).unwrap();
        assert_eq!(loaded.method_name(), "article");
        assert_eq!(loaded.cookie.sessdata, "sess-value");
    }

    #[test]
    fn test_config_init_rejects_unknown_method() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let result = config_init(Some(&path), "csrf", "sess", Some("bogus".to_string()));
        assert!(result.is_err());
        assert!(!path.exists());
    }
}
