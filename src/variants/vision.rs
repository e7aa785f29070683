//! Image Analysis 4.0 captioning (`caption` and `denseCaptions` features).

use crate::http::RequestBody;
use crate::model::ModelDescriptor;
use crate::request::{CaptionRequest, ImageSource};
use crate::validation::{AllowList, CaptionConstraints};
use serde_json::json;

pub const ANALYZE_PATH: &str = "computervision/imageanalysis:analyze";

pub const LANGUAGES: AllowList = AllowList::new(&["en"]);

pub const CAPTION: CaptionConstraints = CaptionConstraints {
    languages: LANGUAGES,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptionFeature {
    Caption,
    DenseCaptions,
}

impl CaptionFeature {
    pub fn as_str(self) -> &'static str {
        match self {
            CaptionFeature::Caption => "caption",
            CaptionFeature::DenseCaptions => "denseCaptions",
        }
    }
}

pub(crate) fn query(
    descriptor: &ModelDescriptor,
    request: &CaptionRequest,
    feature: CaptionFeature,
) -> Vec<(&'static str, String)> {
    let language = super::resolve(
        LANGUAGES,
        request.language.as_deref(),
        descriptor.defaults().language.as_deref(),
    )
    .unwrap_or_else(|| "en".to_string());

    let mut query = vec![
        ("features", feature.as_str().to_string()),
        ("language", language),
    ];
    if request.gender_neutral {
        query.push(("gender-neutral-caption", "true".to_string()));
    }
    query
}

pub(crate) fn body(request: &CaptionRequest) -> RequestBody {
    match &request.source {
        ImageSource::Url(url) => RequestBody::Json(json!({ "url": url })),
        ImageSource::Bytes(data) => RequestBody::Binary {
            data: data.clone(),
            content_type: "application/octet-stream",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelFamily;

    fn descriptor() -> ModelDescriptor {
        ModelDescriptor::builder(ModelFamily::Florence)
            .endpoint("https://vision.example.com")
            .credential("k")
            .build()
            .unwrap()
    }

    #[test]
    fn test_query_only_adds_gender_neutral_when_requested() {
        let plain = query(
            &descriptor(),
            &CaptionRequest::from_url("https://example.com/a.jpg"),
            CaptionFeature::Caption,
        );
        assert_eq!(
            plain,
            vec![
                ("features", "caption".to_string()),
                ("language", "en".to_string())
            ]
        );

        let neutral = query(
            &descriptor(),
            &CaptionRequest::from_bytes(vec![1]).with_gender_neutral(true),
            CaptionFeature::DenseCaptions,
        );
        assert!(neutral.contains(&("features", "denseCaptions".to_string())));
        assert!(neutral.contains(&("gender-neutral-caption", "true".to_string())));
    }

    #[test]
    fn test_body_matches_source() {
        let url = body(&CaptionRequest::from_url("https://example.com/a.jpg"));
        assert_eq!(
            url,
            RequestBody::Json(json!({ "url": "https://example.com/a.jpg" }))
        );

        let bytes = body(&CaptionRequest::from_bytes(vec![1, 2, 3]));
        assert!(matches!(bytes, RequestBody::Binary { ref data, .. } if data == &vec![1, 2, 3]));
    }
}
