//! Typed results and the parsers that build them from raw response bodies.
//!
//! Wire shapes are private; absent optional fields stay `None` rather than
//! being defaulted, and a missing required field is a parse error that
//! carries the original payload.

use crate::error::RemoteErrorDetail;
use crate::http::HttpEngine;
use crate::{Error, Result};
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Error codes that mean the service's content filter rejected the call.
const CONTENT_FILTER_CODES: &[&str] = &[
    "content_policy_violation",
    "content_filter",
    "contentfilter",
    "responsibleaipolicyviolation",
];

// Wire types

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default, deserialize_with = "code_string")]
    code: Option<String>,
    message: Option<String>,
    #[serde(rename = "inner_error", alias = "innererror")]
    inner: Option<WireInnerError>,
}

#[derive(Debug, Deserialize)]
struct WireInnerError {
    #[serde(default, deserialize_with = "code_string")]
    code: Option<String>,
}

impl WireError {
    fn into_detail(self) -> RemoteErrorDetail {
        let is_filter = |code: &Option<String>| {
            code.as_deref()
                .map(|c| CONTENT_FILTER_CODES.contains(&c.to_ascii_lowercase().as_str()))
                .unwrap_or(false)
        };
        let content_filtered =
            is_filter(&self.code) || self.inner.as_ref().is_some_and(|i| is_filter(&i.code));

        RemoteErrorDetail {
            code: self.code,
            message: self.message,
            content_filtered,
        }
    }
}

/// Accepts string or numeric error codes.
fn code_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> std::result::Result<Option<String>, D::Error> {
    Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(code)) => Some(code),
        Some(other) => Some(other.to_string()),
    })
}

#[derive(Debug, Deserialize)]
struct WireImageResponse {
    created: Option<i64>,
    data: Option<Vec<WireImage>>,
    error: Option<WireError>,
}

#[derive(Debug, Deserialize)]
struct WireImage {
    url: Option<String>,
    b64_json: Option<String>,
    revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireAnalyzeResponse {
    error: Option<WireError>,
    model_version: Option<String>,
    metadata: Option<ImageMetadata>,
    caption_result: Option<WireCaption>,
    dense_captions_result: Option<WireDenseCaptions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCaption {
    text: String,
    confidence: f64,
    bounding_box: Option<WireBoundingBox>,
}

#[derive(Debug, Deserialize)]
struct WireDenseCaptions {
    values: Vec<WireCaption>,
}

#[derive(Debug, Deserialize)]
struct WireBoundingBox {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

// Typed results

/// How a generated image was delivered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePayload {
    /// Time-limited download URL.
    Url(String),
    /// Inline base64 data.
    Base64(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedImage {
    #[serde(skip)]
    model: String,
    #[serde(skip)]
    download_timeout: Option<Duration>,
    pub payload: ImagePayload,
    pub revised_prompt: Option<String>,
}

impl GeneratedImage {
    pub fn url(&self) -> Option<&str> {
        match &self.payload {
            ImagePayload::Url(url) => Some(url),
            ImagePayload::Base64(_) => None,
        }
    }

    pub fn base64(&self) -> Option<&str> {
        match &self.payload {
            ImagePayload::Base64(data) => Some(data),
            ImagePayload::Url(_) => None,
        }
    }

    /// Name of the model that produced this image.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Image bytes, decoded from inline data or downloaded from the URL.
    pub async fn bytes(&self, engine: &HttpEngine) -> Result<Vec<u8>> {
        self.bytes_with_cancellation(engine, &CancellationToken::new())
            .await
    }

    /// Like [`GeneratedImage::bytes`], but a download stops as soon as
    /// `cancel` fires. Downloads use the producing model's timeout.
    pub async fn bytes_with_cancellation(
        &self,
        engine: &HttpEngine,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        match &self.payload {
            ImagePayload::Base64(data) => base64::engine::general_purpose::STANDARD
                .decode(data)
                .map_err(|e| {
                    Error::parse(
                        &self.model,
                        format!("Failed to decode base64 image: {}", e),
                        data.as_bytes(),
                    )
                }),
            ImagePayload::Url(url) => {
                engine
                    .download(&self.model, url, self.download_timeout, cancel)
                    .await
            }
        }
    }
}

/// Result of a generation or edit call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageResponse {
    pub model: String,
    pub created: Option<DateTime<Utc>>,
    pub images: Vec<GeneratedImage>,
}

impl ImageResponse {
    pub(crate) fn with_download_timeout(mut self, timeout: Duration) -> Self {
        for image in &mut self.images {
            image.download_timeout = Some(timeout);
        }
        self
    }
}

/// Source image dimensions; either side may be unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl ImageMetadata {
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptionResult {
    pub model_version: String,
    pub text: String,
    pub confidence: f64,
    pub metadata: Option<ImageMetadata>,
}

/// A caption scoped to one region of the image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionCaption {
    pub text: String,
    pub confidence: f64,
    pub region: Option<BoundingBox>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenseCaptionResult {
    pub model_version: String,
    pub metadata: Option<ImageMetadata>,
    pub captions: Vec<RegionCaption>,
}

// Parsers

/// Parses an error body best-effort; `None` when it has no `error` object.
pub fn parse_error_detail(body: &[u8]) -> Option<RemoteErrorDetail> {
    serde_json::from_slice::<ErrorEnvelope>(body)
        .ok()?
        .error
        .map(WireError::into_detail)
}

pub(crate) fn remote_error(model: &str, status: u16, body: &[u8]) -> Error {
    Error::RemoteService {
        model: model.to_string(),
        status,
        detail: parse_error_detail(body),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

fn embedded_error(model: &str, status: u16, error: WireError, body: &[u8]) -> Error {
    Error::RemoteService {
        model: model.to_string(),
        status,
        detail: Some(error.into_detail()),
        body: String::from_utf8_lossy(body).into_owned(),
    }
}

fn decode<'a, T: Deserialize<'a>>(model: &str, body: &'a [u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| Error::parse(model, e.to_string(), body))
}

fn check_confidence(model: &str, confidence: f64, body: &[u8]) -> Result<f64> {
    if !(0.0..=1.0).contains(&confidence) {
        return Err(Error::parse(
            model,
            format!("Confidence {} is outside [0, 1]", confidence),
            body,
        ));
    }
    Ok(confidence)
}

pub fn parse_image_response(model: &str, status: u16, body: &[u8]) -> Result<ImageResponse> {
    let wire: WireImageResponse = decode(model, body)?;
    if let Some(error) = wire.error {
        return Err(embedded_error(model, status, error, body));
    }

    let data = wire
        .data
        .ok_or_else(|| Error::parse(model, "missing field `data`", body))?;
    if data.is_empty() {
        return Err(Error::parse(model, "Response contained no images", body));
    }

    let images = data
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            let payload = match (item.url, item.b64_json) {
                (Some(url), None) => ImagePayload::Url(url),
                (None, Some(data)) => ImagePayload::Base64(data),
                (Some(_), Some(_)) => {
                    return Err(Error::parse(
                        model,
                        format!("Image {} has both `url` and `b64_json`", index),
                        body,
                    ))
                }
                (None, None) => {
                    return Err(Error::parse(
                        model,
                        format!("Image {} has neither `url` nor `b64_json`", index),
                        body,
                    ))
                }
            };
            Ok(GeneratedImage {
                model: model.to_string(),
                download_timeout: None,
                payload,
                revised_prompt: item.revised_prompt,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let created = wire
        .created
        .map(|secs| {
            DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
                Error::parse(model, format!("Invalid `created` timestamp {}", secs), body)
            })
        })
        .transpose()?;

    Ok(ImageResponse {
        model: model.to_string(),
        created,
        images,
    })
}

fn parse_analysis(
    model: &str,
    status: u16,
    body: &[u8],
) -> Result<(String, Option<ImageMetadata>, WireAnalyzeResponse)> {
    let mut wire: WireAnalyzeResponse = decode(model, body)?;
    if let Some(error) = wire.error.take() {
        return Err(embedded_error(model, status, error, body));
    }
    let model_version = wire
        .model_version
        .take()
        .ok_or_else(|| Error::parse(model, "missing field `modelVersion`", body))?;
    let metadata = wire.metadata.take();
    Ok((model_version, metadata, wire))
}

pub fn parse_caption(model: &str, status: u16, body: &[u8]) -> Result<CaptionResult> {
    let (model_version, metadata, wire) = parse_analysis(model, status, body)?;
    let caption = wire
        .caption_result
        .ok_or_else(|| Error::parse(model, "missing field `captionResult`", body))?;

    Ok(CaptionResult {
        model_version,
        text: caption.text,
        confidence: check_confidence(model, caption.confidence, body)?,
        metadata,
    })
}

pub fn parse_dense_captions(model: &str, status: u16, body: &[u8]) -> Result<DenseCaptionResult> {
    let (model_version, metadata, wire) = parse_analysis(model, status, body)?;
    let dense = wire
        .dense_captions_result
        .ok_or_else(|| Error::parse(model, "missing field `denseCaptionsResult`", body))?;

    let captions = dense
        .values
        .into_iter()
        .map(|value| {
            let region = match value.bounding_box {
                Some(b) if b.w == 0 || b.h == 0 => {
                    return Err(Error::parse(
                        model,
                        format!("Bounding box for '{}' has zero width or height", value.text),
                        body,
                    ))
                }
                Some(b) => Some(BoundingBox {
                    x: b.x,
                    y: b.y,
                    width: b.w,
                    height: b.h,
                }),
                None => None,
            };
            Ok(RegionCaption {
                confidence: check_confidence(model, value.confidence, body)?,
                text: value.text,
                region,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(DenseCaptionResult {
        model_version,
        metadata,
        captions,
    })
}
