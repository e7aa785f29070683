//! Multi-model image client for hosted generation, editing and captioning services.
//!
//! Configure a [`ModelDescriptor`] per remote model, take the capability
//! handle you need from it, and pass that handle with a request to
//! [`ImageClient`]. Requests are validated against the model's constraints
//! before anything is sent; transient failures are retried with exponential
//! backoff; responses come back as typed results.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod mime;
pub mod model;
pub mod request;
pub mod response;
pub mod validation;
pub mod variants;

pub use client::ImageClient;
pub use config::ModelSettings;
pub use error::{Error, RemoteErrorDetail, Result};
pub use model::{
    Capability, CaptioningModel, EditingModel, GenerationModel, ModelDescriptor, ModelFamily,
};
pub use request::{CaptionRequest, EditRequest, GenerationRequest, ImagePart, ImageSource};
pub use response::{
    BoundingBox, CaptionResult, DenseCaptionResult, GeneratedImage, ImageMetadata, ImagePayload,
    ImageResponse, RegionCaption,
};
pub use tokio_util::sync::CancellationToken;
