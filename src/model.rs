//! Model descriptors and capability handles.
//!
//! A [`ModelDescriptor`] is the immutable, validated configuration of one
//! remote model. Which operations it supports is decided by its
//! [`ModelFamily`] tag; callers obtain a typed handle per capability
//! ([`GenerationModel`], [`EditingModel`], [`CaptioningModel`]) and the
//! client only accepts the handle matching the operation.

use crate::http::{FormField, RequestBody, RetryPolicy};
use crate::request::{CaptionRequest, EditRequest, GenerationRequest};
use crate::validation::{
    CaptionConstraints, EditConstraints, GenerationConstraints, MAX_COMPRESSION,
};
use crate::variants::vision::CaptionFeature;
use crate::variants::{dalle, gpt_image, stable_diffusion, vision};
use crate::{Error, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    Generation,
    Editing,
    Captioning,
}

/// Remote model variants known to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ModelFamily {
    #[serde(rename = "gpt-image-1")]
    GptImage1,
    #[serde(rename = "dall-e-3")]
    DallE3,
    #[serde(rename = "stable-diffusion-3.5")]
    StableDiffusion35,
    #[serde(rename = "florence")]
    Florence,
}

impl ModelFamily {
    pub const ALL: [ModelFamily; 4] = [
        ModelFamily::GptImage1,
        ModelFamily::DallE3,
        ModelFamily::StableDiffusion35,
        ModelFamily::Florence,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ModelFamily::GptImage1 => "gpt-image-1",
            ModelFamily::DallE3 => "dall-e-3",
            ModelFamily::StableDiffusion35 => "stable-diffusion-3.5",
            ModelFamily::Florence => "florence",
        }
    }

    pub fn capabilities(self) -> &'static [Capability] {
        match self {
            ModelFamily::GptImage1 => &[Capability::Generation, Capability::Editing],
            ModelFamily::DallE3 | ModelFamily::StableDiffusion35 => &[Capability::Generation],
            ModelFamily::Florence => &[Capability::Captioning],
        }
    }

    pub fn supports(self, capability: Capability) -> bool {
        self.capabilities().contains(&capability)
    }

    /// Model name sent on the wire when the caller does not override it.
    pub fn default_model_name(self) -> &'static str {
        match self {
            ModelFamily::GptImage1 => "gpt-image-1",
            ModelFamily::DallE3 => "dall-e-3",
            ModelFamily::StableDiffusion35 => "Stable-Diffusion-3.5-Large",
            ModelFamily::Florence => "florence",
        }
    }

    pub fn default_api_version(self) -> &'static str {
        match self {
            ModelFamily::GptImage1 => "2025-04-01-preview",
            ModelFamily::DallE3 => "2024-02-01",
            ModelFamily::StableDiffusion35 => "2024-05-01-preview",
            ModelFamily::Florence => "2024-02-01",
        }
    }

    /// Prefix of the environment variables holding this family's settings.
    pub fn env_prefix(self) -> &'static str {
        match self {
            ModelFamily::GptImage1 => "GPT_IMAGE",
            ModelFamily::DallE3 => "DALLE",
            ModelFamily::StableDiffusion35 => "STABLE_DIFFUSION",
            ModelFamily::Florence => "FLORENCE",
        }
    }

    pub(crate) fn auth_header(self) -> &'static str {
        match self {
            ModelFamily::Florence => "Ocp-Apim-Subscription-Key",
            _ => "api-key",
        }
    }

    fn requires_deployment(self) -> bool {
        matches!(self, ModelFamily::GptImage1 | ModelFamily::DallE3)
    }

    fn generation_variant(self) -> Option<GenerationVariant> {
        match self {
            ModelFamily::GptImage1 => Some(GenerationVariant::GptImage),
            ModelFamily::DallE3 => Some(GenerationVariant::DallE),
            ModelFamily::StableDiffusion35 => Some(GenerationVariant::StableDiffusion),
            ModelFamily::Florence => None,
        }
    }

    pub fn default_params(self) -> ModelDefaults {
        match self {
            ModelFamily::GptImage1 => ModelDefaults {
                size: Some("1024x1024".to_string()),
                quality: Some("medium".to_string()),
                output_format: Some("png".to_string()),
                ..Default::default()
            },
            ModelFamily::DallE3 => ModelDefaults {
                size: Some("1024x1024".to_string()),
                quality: Some("standard".to_string()),
                style: Some("vivid".to_string()),
                response_format: Some("url".to_string()),
                ..Default::default()
            },
            ModelFamily::StableDiffusion35 => ModelDefaults {
                size: Some("1024x1024".to_string()),
                output_format: Some("png".to_string()),
                ..Default::default()
            },
            ModelFamily::Florence => ModelDefaults {
                language: Some("en".to_string()),
                ..Default::default()
            },
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for ModelFamily {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gpt-image-1" | "gpt-image" => Ok(ModelFamily::GptImage1),
            "dall-e-3" | "dalle-3" | "dalle" => Ok(ModelFamily::DallE3),
            "stable-diffusion-3.5" | "sd3.5" | "stable-diffusion" => {
                Ok(ModelFamily::StableDiffusion35)
            }
            "florence" => Ok(ModelFamily::Florence),
            other => Err(Error::Configuration(format!(
                "Unknown model family '{}'",
                other
            ))),
        }
    }
}

/// Opaque API key. Never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Parameters applied when a request leaves a field unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelDefaults {
    pub size: Option<String>,
    pub quality: Option<String>,
    pub style: Option<String>,
    pub output_format: Option<String>,
    pub response_format: Option<String>,
    pub compression: Option<u8>,
    pub language: Option<String>,
}

impl ModelDefaults {
    fn merged_over(self, base: ModelDefaults) -> ModelDefaults {
        ModelDefaults {
            size: self.size.or(base.size),
            quality: self.quality.or(base.quality),
            style: self.style.or(base.style),
            output_format: self.output_format.or(base.output_format),
            response_format: self.response_format.or(base.response_format),
            compression: self.compression.or(base.compression),
            language: self.language.or(base.language),
        }
    }
}

/// Immutable configuration of one remote model.
#[derive(Debug, Clone)]
pub struct ModelDescriptor {
    family: ModelFamily,
    model_name: String,
    endpoint: Url,
    credential: Credential,
    api_version: String,
    deployment: Option<String>,
    defaults: ModelDefaults,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ModelDescriptor {
    pub fn builder(family: ModelFamily) -> ModelDescriptorBuilder {
        ModelDescriptorBuilder::new(family)
    }

    pub fn family(&self) -> ModelFamily {
        self.family
    }

    pub fn name(&self) -> &str {
        &self.model_name
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn deployment(&self) -> Option<&str> {
        self.deployment.as_deref()
    }

    pub fn defaults(&self) -> &ModelDefaults {
        &self.defaults
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Generation handle, if the family can generate images.
    pub fn generation(&self) -> Result<GenerationModel<'_>> {
        let variant = self
            .family
            .generation_variant()
            .ok_or_else(|| self.unsupported(Capability::Generation))?;
        Ok(GenerationModel {
            descriptor: self,
            variant,
        })
    }

    /// Editing handle, if the family can edit images.
    pub fn editing(&self) -> Result<EditingModel<'_>> {
        if !self.family.supports(Capability::Editing) {
            return Err(self.unsupported(Capability::Editing));
        }
        Ok(EditingModel { descriptor: self })
    }

    /// Captioning handle, if the family can caption images.
    pub fn captioning(&self) -> Result<CaptioningModel<'_>> {
        if !self.family.supports(Capability::Captioning) {
            return Err(self.unsupported(Capability::Captioning));
        }
        Ok(CaptioningModel { descriptor: self })
    }

    fn unsupported(&self, capability: Capability) -> Error {
        Error::Configuration(format!(
            "Model {} ({}) does not support {:?}",
            self.model_name, self.family, capability
        ))
    }
}

/// Collects caller-supplied values and validates them into a [`ModelDescriptor`].
#[derive(Debug, Clone)]
pub struct ModelDescriptorBuilder {
    family: ModelFamily,
    model_name: Option<String>,
    endpoint: Option<String>,
    credential: Option<String>,
    api_version: Option<String>,
    deployment: Option<String>,
    defaults: ModelDefaults,
    timeout: Duration,
    max_retries: u32,
    retry_base_delay: Duration,
}

impl ModelDescriptorBuilder {
    fn new(family: ModelFamily) -> Self {
        Self {
            family,
            model_name: None,
            endpoint: None,
            credential: None,
            api_version: None,
            deployment: None,
            defaults: ModelDefaults::default(),
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            retry_base_delay: DEFAULT_RETRY_DELAY,
        }
    }

    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.model_name = Some(name.into());
        self
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn credential(mut self, credential: impl Into<String>) -> Self {
        self.credential = Some(credential.into());
        self
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = Some(version.into());
        self
    }

    pub fn deployment(mut self, deployment: impl Into<String>) -> Self {
        self.deployment = Some(deployment.into());
        self
    }

    pub fn default_size(mut self, size: impl Into<String>) -> Self {
        self.defaults.size = Some(size.into());
        self
    }

    pub fn default_quality(mut self, quality: impl Into<String>) -> Self {
        self.defaults.quality = Some(quality.into());
        self
    }

    pub fn default_style(mut self, style: impl Into<String>) -> Self {
        self.defaults.style = Some(style.into());
        self
    }

    pub fn default_output_format(mut self, format: impl Into<String>) -> Self {
        self.defaults.output_format = Some(format.into());
        self
    }

    pub fn default_response_format(mut self, format: impl Into<String>) -> Self {
        self.defaults.response_format = Some(format.into());
        self
    }

    pub fn default_compression(mut self, compression: u8) -> Self {
        self.defaults.compression = Some(compression);
        self
    }

    pub fn default_language(mut self, language: impl Into<String>) -> Self {
        self.defaults.language = Some(language.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn build(self) -> Result<ModelDescriptor> {
        let family = self.family;

        let endpoint = match self.endpoint.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_endpoint(raw)?,
            _ => return Err(Error::Configuration("Endpoint must not be empty".to_string())),
        };

        let credential = match self.credential {
            Some(secret) if !secret.trim().is_empty() => Credential::new(secret),
            _ => return Err(Error::Configuration("Credential must not be empty".to_string())),
        };

        let api_version = self
            .api_version
            .unwrap_or_else(|| family.default_api_version().to_string());
        if api_version.trim().is_empty() {
            return Err(Error::Configuration(
                "API version must not be empty".to_string(),
            ));
        }

        let deployment = self.deployment.filter(|d| !d.trim().is_empty());
        if deployment.is_none() && family.requires_deployment() {
            return Err(Error::Configuration(format!(
                "{} requires a deployment name",
                family
            )));
        }

        let model_name = self
            .model_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| family.default_model_name().to_string());

        if self.timeout.is_zero() {
            return Err(Error::Configuration(
                "Timeout must be greater than zero".to_string(),
            ));
        }

        let defaults = self.defaults.merged_over(family.default_params());
        validate_defaults(family, &model_name, &defaults)?;

        Ok(ModelDescriptor {
            family,
            model_name,
            endpoint,
            credential,
            api_version,
            deployment,
            defaults,
            timeout: self.timeout,
            retry: RetryPolicy::new(self.max_retries, self.retry_base_delay),
        })
    }
}

fn parse_endpoint(raw: &str) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| Error::Configuration(format!("Invalid endpoint '{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(Error::Configuration(format!(
            "Endpoint must use http or https, got '{}'",
            raw
        )));
    }
    if url.host_str().is_none() {
        return Err(Error::Configuration(format!(
            "Endpoint '{}' has no host",
            raw
        )));
    }
    Ok(url)
}

fn validate_defaults(family: ModelFamily, model: &str, defaults: &ModelDefaults) -> Result<()> {
    let as_config = |e: Error| match e {
        Error::Validation(message) => Error::Configuration(format!("Default {}", message)),
        other => other,
    };

    if let Some(constraints) = family.generation_variant().map(GenerationVariant::constraints) {
        constraints
            .sizes
            .check(model, "size", defaults.size.as_deref())
            .and_then(|_| {
                constraints
                    .qualities
                    .check(model, "quality", defaults.quality.as_deref())
            })
            .and_then(|_| {
                constraints
                    .styles
                    .check(model, "style", defaults.style.as_deref())
            })
            .and_then(|_| {
                constraints
                    .output_formats
                    .check(model, "output format", defaults.output_format.as_deref())
            })
            .and_then(|_| {
                constraints.response_formats.check(
                    model,
                    "response format",
                    defaults.response_format.as_deref(),
                )
            })
            .map_err(as_config)?;

        if let Some(compression) = defaults.compression {
            if !constraints.compression || compression > MAX_COMPRESSION {
                return Err(Error::Configuration(format!(
                    "Default compression {} is not valid for {}",
                    compression, model
                )));
            }
        }
    }

    if family.supports(Capability::Captioning) {
        vision::CAPTION
            .languages
            .check(model, "language", defaults.language.as_deref())
            .map_err(as_config)?;
    }

    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenerationVariant {
    GptImage,
    DallE,
    StableDiffusion,
}

impl GenerationVariant {
    fn constraints(self) -> GenerationConstraints {
        match self {
            GenerationVariant::GptImage => gpt_image::GENERATION,
            GenerationVariant::DallE => dalle::GENERATION,
            GenerationVariant::StableDiffusion => stable_diffusion::GENERATION,
        }
    }
}

/// A model that can generate images from text.
#[derive(Debug, Clone, Copy)]
pub struct GenerationModel<'a> {
    descriptor: &'a ModelDescriptor,
    variant: GenerationVariant,
}

impl<'a> GenerationModel<'a> {
    pub fn descriptor(&self) -> &'a ModelDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'a str {
        self.descriptor.name()
    }

    pub fn constraints(&self) -> GenerationConstraints {
        self.variant.constraints()
    }

    /// Endpoint path relative to the descriptor's base URL.
    pub fn path(&self) -> String {
        match self.variant {
            GenerationVariant::GptImage => gpt_image::generation_path(self.descriptor),
            GenerationVariant::DallE => dalle::generation_path(self.descriptor),
            GenerationVariant::StableDiffusion => stable_diffusion::GENERATION_PATH.to_string(),
        }
    }

    pub fn validate(&self, request: &GenerationRequest) -> Result<()> {
        self.constraints().validate(self.name(), request)
    }

    pub(crate) fn body(&self, request: &GenerationRequest) -> Result<serde_json::Value> {
        match self.variant {
            GenerationVariant::GptImage => gpt_image::generation_body(self.descriptor, request),
            GenerationVariant::DallE => dalle::generation_body(self.descriptor, request),
            GenerationVariant::StableDiffusion => {
                stable_diffusion::generation_body(self.descriptor, request)
            }
        }
    }
}

/// A model that can edit an uploaded image.
#[derive(Debug, Clone, Copy)]
pub struct EditingModel<'a> {
    descriptor: &'a ModelDescriptor,
}

impl<'a> EditingModel<'a> {
    pub fn descriptor(&self) -> &'a ModelDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'a str {
        self.descriptor.name()
    }

    pub fn constraints(&self) -> EditConstraints {
        gpt_image::EDIT
    }

    pub fn path(&self) -> String {
        gpt_image::edit_path(self.descriptor)
    }

    pub fn validate(&self, request: &EditRequest) -> Result<()> {
        self.constraints().validate(self.name(), request)
    }

    pub(crate) fn form(&self, request: &EditRequest) -> Vec<FormField> {
        gpt_image::edit_form(self.descriptor, request)
    }
}

/// A model that can caption images.
#[derive(Debug, Clone, Copy)]
pub struct CaptioningModel<'a> {
    descriptor: &'a ModelDescriptor,
}

impl<'a> CaptioningModel<'a> {
    pub fn descriptor(&self) -> &'a ModelDescriptor {
        self.descriptor
    }

    pub fn name(&self) -> &'a str {
        self.descriptor.name()
    }

    pub fn constraints(&self) -> CaptionConstraints {
        vision::CAPTION
    }

    pub fn path(&self) -> &'static str {
        vision::ANALYZE_PATH
    }

    pub fn validate(&self, request: &CaptionRequest) -> Result<()> {
        self.constraints().validate(self.name(), request)
    }

    pub(crate) fn query(
        &self,
        request: &CaptionRequest,
        feature: CaptionFeature,
    ) -> Vec<(&'static str, String)> {
        vision::query(self.descriptor, request, feature)
    }

    pub(crate) fn body(&self, request: &CaptionRequest) -> RequestBody {
        vision::body(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gpt_image() -> ModelDescriptorBuilder {
        ModelDescriptor::builder(ModelFamily::GptImage1)
            .endpoint("https://example.openai.azure.com")
            .credential("secret")
            .deployment("gpt-image-1")
    }

    fn assert_config_error(result: Result<ModelDescriptor>) {
        match result {
            Err(Error::Configuration(_)) => {}
            other => panic!("expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_descriptor_merges_family_defaults() {
        let descriptor = gpt_image().default_quality("high").build().unwrap();
        assert_eq!(descriptor.name(), "gpt-image-1");
        assert_eq!(descriptor.api_version(), "2025-04-01-preview");
        assert_eq!(descriptor.defaults().size.as_deref(), Some("1024x1024"));
        assert_eq!(descriptor.defaults().quality.as_deref(), Some("high"));
        assert_eq!(descriptor.timeout(), DEFAULT_TIMEOUT);
        assert_eq!(descriptor.retry_policy().max_retries(), DEFAULT_MAX_RETRIES);
    }

    #[test]
    fn test_every_family_builds_with_minimal_settings() {
        for family in ModelFamily::ALL {
            let descriptor = ModelDescriptor::builder(family)
                .endpoint("http://localhost:8080/")
                .credential("k")
                .deployment("d")
                .max_retries(0)
                .retry_base_delay(Duration::ZERO)
                .build()
                .unwrap();
            assert_eq!(descriptor.family(), family);
        }
    }

    #[test]
    fn test_each_violated_invariant_fails() {
        assert_config_error(gpt_image().endpoint("").build());
        assert_config_error(gpt_image().endpoint("not a url").build());
        assert_config_error(gpt_image().endpoint("ftp://example.com").build());
        assert_config_error(gpt_image().credential("  ").build());
        assert_config_error(gpt_image().api_version("").build());
        assert_config_error(gpt_image().timeout(Duration::ZERO).build());
        assert_config_error(gpt_image().default_size("512x512").build());
        assert_config_error(gpt_image().default_compression(101).build());
        assert_config_error(
            ModelDescriptor::builder(ModelFamily::DallE3)
                .endpoint("https://example.com")
                .credential("k")
                .build(),
        );
        assert_config_error(
            ModelDescriptor::builder(ModelFamily::Florence)
                .endpoint("https://example.com")
                .credential("k")
                .default_language("de")
                .build(),
        );
    }

    #[test]
    fn test_missing_credential_fails() {
        let result = ModelDescriptor::builder(ModelFamily::StableDiffusion35)
            .endpoint("https://example.com")
            .build();
        assert_config_error(result);
    }

    #[test]
    fn test_capability_handles() {
        let descriptor = gpt_image().build().unwrap();
        assert!(descriptor.generation().is_ok());
        assert!(descriptor.editing().is_ok());
        assert!(matches!(
            descriptor.captioning(),
            Err(Error::Configuration(_))
        ));

        let florence = ModelDescriptor::builder(ModelFamily::Florence)
            .endpoint("https://vision.example.com")
            .credential("k")
            .build()
            .unwrap();
        assert!(florence.captioning().is_ok());
        assert!(florence.generation().is_err());
        assert!(florence.editing().is_err());
    }

    #[test]
    fn test_generation_constraints_differ_per_family() {
        let gpt = gpt_image().build().unwrap();
        let dalle = ModelDescriptor::builder(ModelFamily::DallE3)
            .endpoint("https://example.com")
            .credential("k")
            .deployment("dalle3")
            .build()
            .unwrap();

        let gpt_sizes = gpt.generation().unwrap().constraints().sizes;
        let dalle_sizes = dalle.generation().unwrap().constraints().sizes;
        assert!(gpt_sizes.canonical("1536x1024").is_some());
        assert!(gpt_sizes.canonical("1792x1024").is_none());
        assert!(dalle_sizes.canonical("1792x1024").is_some());
        assert_eq!(dalle.generation().unwrap().constraints().max_count, 1);
    }

    #[test]
    fn test_defaults_checked_against_the_handle_constraints() {
        assert!(gpt_image().default_size("1536x1024").build().is_ok());

        let dalle = || {
            ModelDescriptor::builder(ModelFamily::DallE3)
                .endpoint("https://example.com")
                .credential("k")
                .deployment("dalle3")
        };
        assert_config_error(dalle().default_size("1536x1024").build());
        let descriptor = dalle().default_size("1792X1024").build().unwrap();
        let sizes = descriptor.generation().unwrap().constraints().sizes;
        assert!(sizes.canonical(descriptor.defaults().size.as_deref().unwrap()).is_some());
    }

    #[test]
    fn test_credential_is_redacted() {
        let descriptor = gpt_image().build().unwrap();
        let debug = format!("{:?}", descriptor);
        assert!(!debug.contains("secret"));
        assert!(debug.contains("***"));
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!(
            "DALL-E-3".parse::<ModelFamily>().unwrap(),
            ModelFamily::DallE3
        );
        assert_eq!(
            "sd3.5".parse::<ModelFamily>().unwrap(),
            ModelFamily::StableDiffusion35
        );
        assert!("midjourney".parse::<ModelFamily>().is_err());
    }
}
