//! Caller-facing request types for each capability.
//!
//! Requests are plain data: they are built per call, validated against the
//! owning model's constraints, then serialized by the variant modules.

/// Parameters for a text-to-image call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub negative_prompt: Option<String>,
    pub size: Option<String>,
    pub quality: Option<String>,
    pub style: Option<String>,
    pub output_format: Option<String>,
    pub response_format: Option<String>,
    pub compression: Option<u8>,
    pub count: u32,
    pub seed: Option<u64>,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            count: 1,
            ..Default::default()
        }
    }

    pub fn with_negative_prompt(mut self, negative_prompt: impl Into<String>) -> Self {
        self.negative_prompt = Some(negative_prompt.into());
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    pub fn with_response_format(mut self, format: impl Into<String>) -> Self {
        self.response_format = Some(format.into());
        self
    }

    pub fn with_compression(mut self, compression: u8) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// One binary upload in an edit request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImagePart {
    pub data: Vec<u8>,
    pub filename: Option<String>,
}

impl ImagePart {
    pub fn new(data: Vec<u8>, filename: impl Into<String>) -> Self {
        Self {
            data,
            filename: Some(filename.into()),
        }
    }
}

/// Parameters for an image-to-image edit with an optional mask.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditRequest {
    pub prompt: String,
    pub image: ImagePart,
    pub mask: Option<ImagePart>,
    pub size: Option<String>,
    pub quality: Option<String>,
    pub output_format: Option<String>,
    pub compression: Option<u8>,
    pub count: u32,
}

impl EditRequest {
    pub fn new(prompt: impl Into<String>, image: ImagePart) -> Self {
        Self {
            prompt: prompt.into(),
            image,
            count: 1,
            ..Default::default()
        }
    }

    pub fn with_mask(mut self, mask: ImagePart) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    pub fn with_output_format(mut self, format: impl Into<String>) -> Self {
        self.output_format = Some(format.into());
        self
    }

    pub fn with_compression(mut self, compression: u8) -> Self {
        self.compression = Some(compression);
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// Where the image to caption comes from.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    /// Publicly reachable URL, sent as `{"url": ...}`.
    Url(String),
    /// Raw bytes, streamed as the request body.
    Bytes(Vec<u8>),
}

/// Parameters for a caption or dense-caption call.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptionRequest {
    pub source: ImageSource,
    pub language: Option<String>,
    pub gender_neutral: bool,
}

impl CaptionRequest {
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            source: ImageSource::Url(url.into()),
            language: None,
            gender_neutral: false,
        }
    }

    pub fn from_bytes(data: Vec<u8>) -> Self {
        Self {
            source: ImageSource::Bytes(data),
            language: None,
            gender_neutral: false,
        }
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_gender_neutral(mut self, gender_neutral: bool) -> Self {
        self.gender_neutral = gender_neutral;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_request_defaults_to_one_image() {
        let request = GenerationRequest::new("a lighthouse");
        assert_eq!(request.count, 1);
        assert!(request.size.is_none());
        assert!(request.seed.is_none());
    }

    #[test]
    fn test_edit_request_builder() {
        let request = EditRequest::new("add a hat", ImagePart::new(vec![1, 2], "cat.png"))
            .with_mask(ImagePart::new(vec![3], "mask.png"))
            .with_count(2);
        assert_eq!(request.count, 2);
        assert_eq!(
            request.mask.and_then(|m| m.filename),
            Some("mask.png".to_string())
        );
    }

    #[test]
    fn test_caption_request_builder() {
        let request = CaptionRequest::from_url("https://example.com/cat.jpg")
            .with_language("en")
            .with_gender_neutral(true);
        assert!(request.gender_neutral);
        assert_eq!(request.language.as_deref(), Some("en"));
    }
}
