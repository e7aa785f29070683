//! Environment-driven model settings.

use crate::model::{ModelDescriptor, ModelFamily};
use crate::{Error, Result};
use std::str::FromStr;
use std::time::Duration;

/// Raw settings for one model, read from `{PREFIX}_*` variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSettings {
    pub family: Option<ModelFamily>,
    pub endpoint: String,
    pub api_key: String,
    pub api_version: Option<String>,
    pub deployment: Option<String>,
    pub model_name: Option<String>,
    pub default_size: Option<String>,
    pub default_quality: Option<String>,
    pub default_style: Option<String>,
    pub default_format: Option<String>,
    pub default_compression: Option<u8>,
    pub default_language: Option<String>,
    pub timeout: Option<Duration>,
    pub max_retries: Option<u32>,
    pub retry_delay: Option<Duration>,
}

impl ModelSettings {
    /// Reads settings from the process environment, loading `.env` first.
    pub fn from_env(family: ModelFamily) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(family, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(family: ModelFamily, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let prefix = family.env_prefix();
        let var = |suffix: &str| {
            lookup(&format!("{}_{}", prefix, suffix))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |suffix: &str| {
            var(suffix).ok_or_else(|| {
                Error::Configuration(format!("{}_{} not set", prefix, suffix))
            })
        };
        let number = |suffix: &str| -> Result<Option<u64>> {
            var(suffix)
                .map(|raw| parse_number(prefix, suffix, &raw))
                .transpose()
        };

        let default_compression = number("DEFAULT_COMPRESSION")?
            .map(|value| {
                u8::try_from(value).map_err(|_| {
                    Error::Configuration(format!(
                        "{}_DEFAULT_COMPRESSION out of range: {}",
                        prefix, value
                    ))
                })
            })
            .transpose()?;
        let max_retries = number("MAX_RETRIES")?
            .map(|value| {
                u32::try_from(value).map_err(|_| {
                    Error::Configuration(format!("{}_MAX_RETRIES out of range: {}", prefix, value))
                })
            })
            .transpose()?;

        Ok(Self {
            family: Some(family),
            endpoint: required("ENDPOINT")?,
            api_key: required("API_KEY")?,
            api_version: var("API_VERSION"),
            deployment: var("DEPLOYMENT"),
            model_name: var("MODEL"),
            default_size: var("DEFAULT_SIZE"),
            default_quality: var("DEFAULT_QUALITY"),
            default_style: var("DEFAULT_STYLE"),
            default_format: var("DEFAULT_FORMAT"),
            default_compression,
            default_language: var("DEFAULT_LANGUAGE"),
            timeout: number("TIMEOUT_SECS")?.map(Duration::from_secs),
            max_retries,
            retry_delay: number("RETRY_DELAY_MS")?.map(Duration::from_millis),
        })
    }

    /// Builds a validated descriptor from these settings.
    pub fn into_descriptor(self) -> Result<ModelDescriptor> {
        let family = self
            .family
            .ok_or_else(|| Error::Configuration("Model family not set".to_string()))?;

        let mut builder = ModelDescriptor::builder(family)
            .endpoint(self.endpoint)
            .credential(self.api_key);

        if let Some(version) = self.api_version {
            builder = builder.api_version(version);
        }
        if let Some(deployment) = self.deployment {
            builder = builder.deployment(deployment);
        }
        if let Some(name) = self.model_name {
            builder = builder.model_name(name);
        }
        if let Some(size) = self.default_size {
            builder = builder.default_size(size);
        }
        if let Some(quality) = self.default_quality {
            builder = builder.default_quality(quality);
        }
        if let Some(style) = self.default_style {
            builder = builder.default_style(style);
        }
        if let Some(format) = self.default_format {
            builder = match family {
                ModelFamily::DallE3 => builder.default_response_format(format),
                _ => builder.default_output_format(format),
            };
        }
        if let Some(compression) = self.default_compression {
            builder = builder.default_compression(compression);
        }
        if let Some(language) = self.default_language {
            builder = builder.default_language(language);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(retries) = self.max_retries {
            builder = builder.max_retries(retries);
        }
        if let Some(delay) = self.retry_delay {
            builder = builder.retry_base_delay(delay);
        }

        builder.build()
    }
}

fn parse_number(prefix: &str, suffix: &str, raw: &str) -> Result<u64> {
    u64::from_str(raw).map_err(|_| {
        Error::Configuration(format!(
            "{}_{} must be a non-negative integer, got '{}'",
            prefix, suffix, raw
        ))
    })
}
