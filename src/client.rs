//! Single entry point: validate, invoke, parse.

use crate::http::{HttpEngine, OutboundRequest, RequestBody};
use crate::model::{CaptioningModel, EditingModel, GenerationModel};
use crate::request::{CaptionRequest, EditRequest, GenerationRequest};
use crate::response::{self, CaptionResult, DenseCaptionResult, GeneratedImage, ImageResponse};
use crate::variants::vision::CaptionFeature;
use crate::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Runs generation, editing, and captioning calls against any configured model.
///
/// Every call is independent; nothing is cached between calls. Clone freely,
/// clones share the same connection pool.
#[derive(Debug, Clone)]
pub struct ImageClient {
    engine: HttpEngine,
}

impl ImageClient {
    pub fn new() -> Result<Self> {
        Ok(Self {
            engine: HttpEngine::new()?,
        })
    }

    pub fn with_http_client(client: reqwest::Client) -> Self {
        Self {
            engine: HttpEngine::with_client(client),
        }
    }

    pub fn engine(&self) -> &HttpEngine {
        &self.engine
    }

    pub async fn generate(
        &self,
        model: GenerationModel<'_>,
        request: &GenerationRequest,
    ) -> Result<ImageResponse> {
        self.generate_with_cancellation(model, request, &CancellationToken::new())
            .await
    }

    pub async fn generate_with_cancellation(
        &self,
        model: GenerationModel<'_>,
        request: &GenerationRequest,
        cancel: &CancellationToken,
    ) -> Result<ImageResponse> {
        model.validate(request)?;
        let outbound = OutboundRequest::new(
            model.descriptor(),
            &model.path(),
            &[],
            RequestBody::Json(model.body(request)?),
        );

        info!("Generating {} image(s) with {}", request.count, model.name());
        let raw = self
            .engine
            .execute(model.descriptor(), &outbound, cancel)
            .await?;
        response::parse_image_response(model.name(), raw.status, &raw.body)
            .map(|parsed| parsed.with_download_timeout(model.descriptor().timeout()))
    }

    pub async fn edit(
        &self,
        model: EditingModel<'_>,
        request: &EditRequest,
    ) -> Result<ImageResponse> {
        self.edit_with_cancellation(model, request, &CancellationToken::new())
            .await
    }

    pub async fn edit_with_cancellation(
        &self,
        model: EditingModel<'_>,
        request: &EditRequest,
        cancel: &CancellationToken,
    ) -> Result<ImageResponse> {
        model.validate(request)?;
        let outbound = OutboundRequest::new(
            model.descriptor(),
            &model.path(),
            &[],
            RequestBody::Multipart(model.form(request)),
        );

        info!(
            "Editing image ({} bytes, mask: {}) with {}",
            request.image.data.len(),
            request.mask.is_some(),
            model.name()
        );
        let raw = self
            .engine
            .execute(model.descriptor(), &outbound, cancel)
            .await?;
        response::parse_image_response(model.name(), raw.status, &raw.body)
            .map(|parsed| parsed.with_download_timeout(model.descriptor().timeout()))
    }

    pub async fn caption(
        &self,
        model: CaptioningModel<'_>,
        request: &CaptionRequest,
    ) -> Result<CaptionResult> {
        self.caption_with_cancellation(model, request, &CancellationToken::new())
            .await
    }

    pub async fn caption_with_cancellation(
        &self,
        model: CaptioningModel<'_>,
        request: &CaptionRequest,
        cancel: &CancellationToken,
    ) -> Result<CaptionResult> {
        let raw = self
            .analyze(model, request, CaptionFeature::Caption, cancel)
            .await?;
        response::parse_caption(model.name(), raw.status, &raw.body)
    }

    pub async fn dense_captions(
        &self,
        model: CaptioningModel<'_>,
        request: &CaptionRequest,
    ) -> Result<DenseCaptionResult> {
        self.dense_captions_with_cancellation(model, request, &CancellationToken::new())
            .await
    }

    pub async fn dense_captions_with_cancellation(
        &self,
        model: CaptioningModel<'_>,
        request: &CaptionRequest,
        cancel: &CancellationToken,
    ) -> Result<DenseCaptionResult> {
        let raw = self
            .analyze(model, request, CaptionFeature::DenseCaptions, cancel)
            .await?;
        response::parse_dense_captions(model.name(), raw.status, &raw.body)
    }

    async fn analyze(
        &self,
        model: CaptioningModel<'_>,
        request: &CaptionRequest,
        feature: CaptionFeature,
        cancel: &CancellationToken,
    ) -> Result<crate::http::RawResponse> {
        model.validate(request)?;
        let outbound = OutboundRequest::new(
            model.descriptor(),
            model.path(),
            &model.query(request, feature),
            model.body(request),
        );

        info!("Requesting {} from {}", feature.as_str(), model.name());
        self.engine
            .execute(model.descriptor(), &outbound, cancel)
            .await
    }

    /// Bytes of one generated image, whichever way the service delivered it.
    pub async fn image_bytes(&self, image: &GeneratedImage) -> Result<Vec<u8>> {
        image.bytes(&self.engine).await
    }

    pub async fn image_bytes_with_cancellation(
        &self,
        image: &GeneratedImage,
        cancel: &CancellationToken,
    ) -> Result<Vec<u8>> {
        image.bytes_with_cancellation(&self.engine, cancel).await
    }
}
