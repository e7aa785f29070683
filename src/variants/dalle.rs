//! DALL-E 3 on Azure OpenAI: single-image generation.

use super::{resolve, to_json};
use crate::model::ModelDescriptor;
use crate::request::GenerationRequest;
use crate::validation::{AllowList, GenerationConstraints};
use crate::Result;
use serde::Serialize;

pub const SIZES: AllowList = AllowList::new(&["1024x1024", "1792x1024", "1024x1792"]);
pub const QUALITIES: AllowList = AllowList::new(&["standard", "hd"]);
pub const STYLES: AllowList = AllowList::new(&["vivid", "natural"]);
pub const RESPONSE_FORMATS: AllowList = AllowList::new(&["url", "b64_json"]);

pub const GENERATION: GenerationConstraints = GenerationConstraints {
    sizes: SIZES,
    qualities: QUALITIES,
    styles: STYLES,
    output_formats: AllowList::NONE,
    response_formats: RESPONSE_FORMATS,
    max_count: 1,
    compression: false,
    seed: false,
    negative_prompt: false,
};

#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<String>,
}

pub(crate) fn generation_path(descriptor: &ModelDescriptor) -> String {
    let deployment = descriptor.deployment().unwrap_or_else(|| descriptor.name());
    format!("openai/deployments/{}/images/generations", deployment)
}

pub(crate) fn generation_body(
    descriptor: &ModelDescriptor,
    request: &GenerationRequest,
) -> Result<serde_json::Value> {
    let defaults = descriptor.defaults();
    let body = GenerationBody {
        model: descriptor.name(),
        prompt: &request.prompt,
        n: request.count,
        size: resolve(SIZES, request.size.as_deref(), defaults.size.as_deref()),
        quality: resolve(QUALITIES, request.quality.as_deref(), defaults.quality.as_deref()),
        style: resolve(STYLES, request.style.as_deref(), defaults.style.as_deref()),
        response_format: resolve(
            RESPONSE_FORMATS,
            request.response_format.as_deref(),
            defaults.response_format.as_deref(),
        ),
    };
    to_json(descriptor.name(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelFamily;

    #[test]
    fn test_generation_body_uses_request_over_defaults() {
        let descriptor = ModelDescriptor::builder(ModelFamily::DallE3)
            .endpoint("https://example.openai.azure.com")
            .credential("k")
            .deployment("dalle3")
            .build()
            .unwrap();
        let request = GenerationRequest::new("a castle")
            .with_style("Natural")
            .with_quality("hd")
            .with_response_format("b64_json");

        let body = generation_body(&descriptor, &request).unwrap();
        assert_eq!(body["style"], "natural");
        assert_eq!(body["quality"], "hd");
        assert_eq!(body["size"], "1024x1024");
        assert_eq!(body["response_format"], "b64_json");
        assert_eq!(body["n"], 1);
        assert_eq!(
            generation_path(&descriptor),
            "openai/deployments/dalle3/images/generations"
        );
    }
}
