use std::{path::PathBuf, str::FromStr, time::Duration};

use chrono::FixedOffset;

use crate::error::ConfigError;

pub const DEFAULT_TEXT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.5-flash";

/// OAuth 1.0a user-context credentials for the posting backend.
#[derive(Clone, Debug)]
pub struct XCredentials {
    pub consumer_key: String,
    pub consumer_secret: String,
    pub access_token: String,
    pub access_secret: String,
}

/// Everything the run needs from its environment, read once at process start.
#[derive(Clone, Debug)]
pub struct Config {
    pub text_api_key: Option<String>,
    pub text_api_base: String,
    pub text_model: String,
    pub unsplash_access_key: Option<String>,
    pub x_consumer_key: Option<String>,
    pub x_consumer_secret: Option<String>,
    pub x_access_token: Option<String>,
    pub x_access_secret: Option<String>,
    pub image_path: PathBuf,
    pub image_timeout: Duration,
    pub image_width: u32,
    pub image_height: u32,
    pub image_model: String,
    pub utc_offset: FixedOffset,
    pub http_retries: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Builds the config from any variable source. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
        };

        let offset_minutes: i32 = parse_or(&get, "UTC_OFFSET_MINUTES", 0)?;
        let utc_offset = offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ConfigError::Invalid {
                var: "UTC_OFFSET_MINUTES",
                value: offset_minutes.to_string(),
            })?;

        Ok(Config {
            text_api_key: get("GEMINI_API_KEY"),
            text_api_base: get("TEXT_API_BASE").unwrap_or_else(|| DEFAULT_TEXT_API_BASE.into()),
            text_model: get("TEXT_MODEL").unwrap_or_else(|| DEFAULT_TEXT_MODEL.into()),
            unsplash_access_key: get("UNSPLASH_ACCESS_KEY"),
            x_consumer_key: get("X_API_KEY"),
            x_consumer_secret: get("X_API_SECRET"),
            x_access_token: get("X_ACCESS_TOKEN"),
            x_access_secret: get("X_ACCESS_SECRET"),
            image_path: get("IMAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("temp_image.jpg")),
            image_timeout: Duration::from_secs(parse_or(&get, "IMAGE_TIMEOUT_SECS", 30)?),
            image_width: parse_or(&get, "IMAGE_WIDTH", 1280)?,
            image_height: parse_or(&get, "IMAGE_HEIGHT", 720)?,
            image_model: get("IMAGE_MODEL").unwrap_or_else(|| "flux".into()),
            utc_offset,
            http_retries: parse_or(&get, "HTTP_MAX_RETRIES", 0)?,
        })
    }

    pub fn x_credentials(&self) -> Result<XCredentials, ConfigError> {
        fn required(value: &Option<String>, var: &'static str) -> Result<String, ConfigError> {
            value.clone().ok_or(ConfigError::Missing(var))
        }

        Ok(XCredentials {
            consumer_key: required(&self.x_consumer_key, "X_API_KEY")?,
            consumer_secret: required(&self.x_consumer_secret, "X_API_SECRET")?,
            access_token: required(&self.x_access_token, "X_ACCESS_TOKEN")?,
            access_secret: required(&self.x_access_secret, "X_ACCESS_SECRET")?,
        })
    }
}

fn parse_or<T: FromStr>(
    get: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match get(var) {
        None => Ok(default),
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Config::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = config(&[]).unwrap();

        assert_eq!(config.text_api_key, None);
        assert_eq!(config.text_model, DEFAULT_TEXT_MODEL);
        assert_eq!(config.image_path, PathBuf::from("temp_image.jpg"));
        assert_eq!(config.image_timeout, Duration::from_secs(30));
        assert_eq!((config.image_width, config.image_height), (1280, 720));
        assert_eq!(config.utc_offset.local_minus_utc(), 0);
        assert_eq!(config.http_retries, 0);
    }

    #[test]
    fn reads_keys_and_numbers() {
        let config = config(&[
            ("GEMINI_API_KEY", "g-key"),
            ("UNSPLASH_ACCESS_KEY", " u-key "),
            ("IMAGE_TIMEOUT_SECS", "45"),
            ("UTC_OFFSET_MINUTES", "330"),
        ])
        .unwrap();

        assert_eq!(config.text_api_key.as_deref(), Some("g-key"));
        assert_eq!(config.unsplash_access_key.as_deref(), Some("u-key"));
        assert_eq!(config.image_timeout, Duration::from_secs(45));
        assert_eq!(config.utc_offset.local_minus_utc(), 330 * 60);
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = config(&[("GEMINI_API_KEY", "   ")]).unwrap();
        assert_eq!(config.text_api_key, None);
    }

    #[test]
    fn malformed_numbers_are_rejected() {
        let err = config(&[("IMAGE_WIDTH", "wide")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "IMAGE_WIDTH", .. }));

        let err = config(&[("UTC_OFFSET_MINUTES", "100000")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "UTC_OFFSET_MINUTES", .. }));
    }

    #[test]
    fn x_credentials_name_the_first_missing_variable() {
        let err = config(&[("X_API_KEY", "k"), ("X_API_SECRET", "s")])
            .unwrap()
            .x_credentials()
            .unwrap_err();

        assert!(matches!(err, ConfigError::Missing("X_ACCESS_TOKEN")));
    }
}
