//! gpt-image-1 on Azure OpenAI: generation and masked editing.

use super::{resolve, to_json};
use crate::http::FormField;
use crate::mime::{mime_for_filename, resolve_image_mime};
use crate::model::ModelDescriptor;
use crate::request::{EditRequest, GenerationRequest, ImagePart};
use crate::validation::{AllowList, EditConstraints, GenerationConstraints};
use crate::Result;
use serde::Serialize;

pub const SIZES: AllowList = AllowList::new(&["1024x1024", "1024x1536", "1536x1024"]);
pub const QUALITIES: AllowList = AllowList::new(&["low", "medium", "high", "auto"]);
pub const OUTPUT_FORMATS: AllowList = AllowList::new(&["png", "jpeg", "webp"]);
pub const MAX_IMAGES: u32 = 10;

pub const GENERATION: GenerationConstraints = GenerationConstraints {
    sizes: SIZES,
    qualities: QUALITIES,
    styles: AllowList::NONE,
    output_formats: OUTPUT_FORMATS,
    response_formats: AllowList::NONE,
    max_count: MAX_IMAGES,
    compression: true,
    seed: false,
    negative_prompt: false,
};

pub const EDIT: EditConstraints = EditConstraints {
    sizes: SIZES,
    qualities: QUALITIES,
    output_formats: OUTPUT_FORMATS,
    max_count: MAX_IMAGES,
    compression: true,
    mask: true,
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
    output_format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output_compression: Option<u8>,
}

fn deployment(descriptor: &ModelDescriptor) -> &str {
    descriptor.deployment().unwrap_or_else(|| descriptor.name())
}

pub(crate) fn generation_path(descriptor: &ModelDescriptor) -> String {
    format!("openai/deployments/{}/images/generations", deployment(descriptor))
}

pub(crate) fn edit_path(descriptor: &ModelDescriptor) -> String {
    format!("openai/deployments/{}/images/edits", deployment(descriptor))
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
        output_format: resolve(
            OUTPUT_FORMATS,
            request.output_format.as_deref(),
            defaults.output_format.as_deref(),
        ),
        output_compression: request.compression.or(defaults.compression),
    };
    to_json(descriptor.name(), &body)
}

fn file_field(name: &'static str, part: &ImagePart) -> FormField {
    FormField::File {
        name,
        data: part.data.clone(),
        filename: part.filename.clone().unwrap_or_else(|| name.to_string()),
        content_type: part
            .filename
            .as_deref()
            .and_then(mime_for_filename)
            .unwrap_or_else(|| resolve_image_mime(&part.data, None)),
    }
}

pub(crate) fn edit_form(descriptor: &ModelDescriptor, request: &EditRequest) -> Vec<FormField> {
    let defaults = descriptor.defaults();
    let mut fields = vec![
        file_field("image", &request.image),
        FormField::text("model", descriptor.name()),
        FormField::text("prompt", &request.prompt),
        FormField::text("n", request.count.to_string()),
    ];

    if let Some(mask) = &request.mask {
        fields.push(file_field("mask", mask));
    }
    if let Some(size) = resolve(SIZES, request.size.as_deref(), defaults.size.as_deref()) {
        fields.push(FormField::text("size", size));
    }
    let quality = resolve(QUALITIES, request.quality.as_deref(), defaults.quality.as_deref());
    if let Some(quality) = quality {
        fields.push(FormField::text("quality", quality));
    }
    if let Some(format) = resolve(
        OUTPUT_FORMATS,
        request.output_format.as_deref(),
        defaults.output_format.as_deref(),
    ) {
        fields.push(FormField::text("output_format", format));
    }
    if let Some(compression) = request.compression.or(defaults.compression) {
        fields.push(FormField::text("output_compression", compression.to_string()));
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelFamily;
    use pretty_assertions::assert_eq;

    fn descriptor() -> ModelDescriptor {
        ModelDescriptor::builder(ModelFamily::GptImage1)
            .endpoint("https://example.openai.azure.com")
            .credential("k")
            .deployment("my-gpt-image")
            .build()
            .unwrap()
    }

    #[test]
    fn test_paths_use_deployment() {
        let d = descriptor();
        assert_eq!(
            generation_path(&d),
            "openai/deployments/my-gpt-image/images/generations"
        );
        assert_eq!(edit_path(&d), "openai/deployments/my-gpt-image/images/edits");
    }

    #[test]
    fn test_generation_body_fills_defaults_and_canonicalizes() {
        let request = GenerationRequest::new("a red fox")
            .with_size("1536X1024")
            .with_count(2)
            .with_compression(80);
        let body = generation_body(&descriptor(), &request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "gpt-image-1",
                "prompt": "a red fox",
                "n": 2,
                "size": "1536x1024",
                "quality": "medium",
                "output_format": "png",
                "output_compression": 80
            })
        );
    }

    #[test]
    fn test_edit_form_includes_mask_and_detected_mime() {
        let request = EditRequest::new(
            "add a hat",
            ImagePart::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "cat.jpg"),
        )
        .with_mask(ImagePart::new(vec![0x89, 0x50, 0x4E, 0x47], "mask.png"));
        let fields = edit_form(&descriptor(), &request);

        let image = fields
            .iter()
            .find(|f| f.name() == "image")
            .expect("image field");
        assert!(matches!(
            image,
            FormField::File { filename, content_type: "image/jpeg", .. } if filename == "cat.jpg"
        ));
        assert!(fields.iter().any(|f| f.name() == "mask"));
        assert!(fields
            .iter()
            .any(|f| matches!(f, FormField::Text { name: "size", value } if value == "1024x1024")));
    }

    #[test]
    fn test_upload_content_type_follows_file_name() {
        let request = EditRequest::new(
            "add a hat",
            ImagePart::new(vec![0x89, 0x50, 0x4E, 0x47], "cat.webp"),
        )
        .with_mask(ImagePart::new(vec![0xFF, 0xD8, 0xFF, 0xE0], "mask"));
        let fields = edit_form(&descriptor(), &request);

        let content_type = |wanted: &str| {
            fields.iter().find_map(|f| match f {
                FormField::File {
                    name, content_type, ..
                } if *name == wanted => Some(*content_type),
                _ => None,
            })
        };
        assert_eq!(content_type("image"), Some("image/webp"));
        assert_eq!(content_type("mask"), Some("image/jpeg"));
    }
}
