//! Stable Diffusion 3.5 served from a model-inference endpoint.
//!
//! No deployment segment; the model is selected by the `model` body field.
//! The only family that honours a seed and a negative prompt.

use super::{resolve, to_json};
use crate::model::ModelDescriptor;
use crate::request::GenerationRequest;
use crate::validation::{AllowList, GenerationConstraints};
use crate::Result;
use serde::Serialize;

pub const GENERATION_PATH: &str = "images/generations";

pub const SIZES: AllowList = AllowList::new(&[
    "1024x1024",
    "672x1566",
    "768x1366",
    "836x1254",
    "916x1145",
    "1145x916",
    "1254x836",
    "1366x768",
    "1566x672",
]);
pub const OUTPUT_FORMATS: AllowList = AllowList::new(&["png", "jpg"]);

pub const GENERATION: GenerationConstraints = GenerationConstraints {
    sizes: SIZES,
    qualities: AllowList::NONE,
    styles: AllowList::NONE,
    output_formats: OUTPUT_FORMATS,
    response_formats: AllowList::NONE,
    max_count: 1,
    compression: false,
    seed: true,
    negative_prompt: true,
};

#[derive(Debug, Serialize)]
struct GenerationBody<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    negative_prompt: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    seed: Option<u64>,
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
        negative_prompt: request.negative_prompt.as_deref(),
        size: resolve(SIZES, request.size.as_deref(), defaults.size.as_deref()),
        output_format: resolve(
            OUTPUT_FORMATS,
            request.output_format.as_deref(),
            defaults.output_format.as_deref(),
        ),
        seed: request.seed,
    };
    to_json(descriptor.name(), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelFamily;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generation_body_carries_seed_and_negative_prompt() {
        let descriptor = ModelDescriptor::builder(ModelFamily::StableDiffusion35)
            .endpoint("https://models.example.com")
            .credential("k")
            .build()
            .unwrap();
        let request = GenerationRequest::new("a misty forest")
            .with_negative_prompt("people")
            .with_seed(42)
            .with_size("1366X768");

        let body = generation_body(&descriptor, &request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "Stable-Diffusion-3.5-Large",
                "prompt": "a misty forest",
                "n": 1,
                "negative_prompt": "people",
                "size": "1366x768",
                "output_format": "png",
                "seed": 42
            })
        );
    }
}
