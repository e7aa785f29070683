//! Pure request validation against a model variant's legal values.
//!
//! Checks run in a fixed order and stop at the first violation so error
//! messages stay stable. Nothing here mutates the request.

use crate::request::{CaptionRequest, EditRequest, GenerationRequest, ImagePart, ImageSource};
use crate::{Error, Result};
use reqwest::Url;

/// Upper bound for `compression` percentages.
pub const MAX_COMPRESSION: u8 = 100;

/// Case-insensitive set of legal tokens for one request field.
///
/// An empty list means the variant does not accept the field at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowList(&'static [&'static str]);

impl AllowList {
    pub const NONE: AllowList = AllowList(&[]);

    pub const fn new(values: &'static [&'static str]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &'static [&'static str] {
        self.0
    }

    pub fn is_supported(&self) -> bool {
        !self.0.is_empty()
    }

    /// The allow-list spelling of `token`, if it is legal.
    pub fn canonical(&self, token: &str) -> Option<&'static str> {
        self.0.iter().copied().find(|v| v.eq_ignore_ascii_case(token))
    }

    pub(crate) fn check(&self, model: &str, field: &str, token: Option<&str>) -> Result<()> {
        let Some(token) = token else {
            return Ok(());
        };
        if !self.is_supported() {
            return Err(Error::Validation(format!(
                "{} does not accept a {}",
                model, field
            )));
        }
        match self.canonical(token) {
            Some(_) => Ok(()),
            None => Err(Error::Validation(format!(
                "Unsupported {} '{}' for {}; expected one of: {}",
                field,
                token,
                model,
                self.0.join(", ")
            ))),
        }
    }
}

/// What a generation-capable variant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationConstraints {
    pub sizes: AllowList,
    pub qualities: AllowList,
    pub styles: AllowList,
    pub output_formats: AllowList,
    pub response_formats: AllowList,
    pub max_count: u32,
    pub compression: bool,
    pub seed: bool,
    pub negative_prompt: bool,
}

impl GenerationConstraints {
    pub fn validate(&self, model: &str, request: &GenerationRequest) -> Result<()> {
        check_prompt(&request.prompt)?;
        check_count(model, request.count, self.max_count)?;
        self.sizes.check(model, "size", request.size.as_deref())?;
        self.qualities
            .check(model, "quality", request.quality.as_deref())?;
        self.styles.check(model, "style", request.style.as_deref())?;
        self.output_formats
            .check(model, "output format", request.output_format.as_deref())?;
        self.response_formats
            .check(model, "response format", request.response_format.as_deref())?;
        check_compression(model, request.compression, self.compression)?;

        if request.seed.is_some() && !self.seed {
            return Err(Error::Validation(format!("{} does not accept a seed", model)));
        }
        if request.negative_prompt.is_some() && !self.negative_prompt {
            return Err(Error::Validation(format!(
                "{} does not accept a negative prompt",
                model
            )));
        }
        Ok(())
    }
}

/// What an editing-capable variant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditConstraints {
    pub sizes: AllowList,
    pub qualities: AllowList,
    pub output_formats: AllowList,
    pub max_count: u32,
    pub compression: bool,
    pub mask: bool,
}

impl EditConstraints {
    pub fn validate(&self, model: &str, request: &EditRequest) -> Result<()> {
        check_prompt(&request.prompt)?;
        check_part("image", &request.image)?;
        if let Some(mask) = &request.mask {
            if !self.mask {
                return Err(Error::Validation(format!("{} does not accept a mask", model)));
            }
            check_part("mask", mask)?;
        }
        check_count(model, request.count, self.max_count)?;
        self.sizes.check(model, "size", request.size.as_deref())?;
        self.qualities
            .check(model, "quality", request.quality.as_deref())?;
        self.output_formats
            .check(model, "output format", request.output_format.as_deref())?;
        check_compression(model, request.compression, self.compression)
    }
}

/// What a captioning-capable variant accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptionConstraints {
    pub languages: AllowList,
}

impl CaptionConstraints {
    pub fn validate(&self, model: &str, request: &CaptionRequest) -> Result<()> {
        match &request.source {
            ImageSource::Url(url) => check_source_url(url)?,
            ImageSource::Bytes(data) if data.is_empty() => {
                return Err(Error::Validation("Image data must not be empty".to_string()));
            }
            ImageSource::Bytes(_) => {}
        }
        self.languages
            .check(model, "language", request.language.as_deref())
    }
}

fn check_prompt(prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        return Err(Error::Validation("Prompt must not be blank".to_string()));
    }
    Ok(())
}

fn check_count(model: &str, count: u32, max: u32) -> Result<()> {
    if count == 0 || count > max {
        return Err(Error::Validation(format!(
            "Image count must be between 1 and {} for {}, got {}",
            max, model, count
        )));
    }
    Ok(())
}

fn check_compression(model: &str, compression: Option<u8>, supported: bool) -> Result<()> {
    match compression {
        None => Ok(()),
        Some(_) if !supported => Err(Error::Validation(format!(
            "{} does not accept a compression level",
            model
        ))),
        Some(value) if value > MAX_COMPRESSION => Err(Error::Validation(format!(
            "Compression must be between 0 and {}, got {}",
            MAX_COMPRESSION, value
        ))),
        Some(_) => Ok(()),
    }
}

fn check_part(field: &str, part: &ImagePart) -> Result<()> {
    if part.data.is_empty() {
        return Err(Error::Validation(format!("{} data must not be empty", field)));
    }
    match part.filename.as_deref() {
        Some(name) if !name.trim().is_empty() => Ok(()),
        _ => Err(Error::Validation(format!("{} requires a filename", field))),
    }
}

fn check_source_url(url: &str) -> Result<()> {
    let parsed = Url::parse(url)
        .map_err(|e| Error::Validation(format!("Invalid image URL '{}': {}", url, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(Error::Validation(format!(
            "Image URL must be http(s), got '{}'",
            url
        )));
    }
    Ok(())
}
