//! Outbound request description.
//!
//! Built once per logical call and turned into a fresh `reqwest` request on
//! every attempt, because multipart forms are consumed when sent.

use crate::model::{Credential, ModelDescriptor};
use crate::{Error, Result};
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use std::time::Duration;

/// One field of a multipart form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormField {
    Text {
        name: &'static str,
        value: String,
    },
    File {
        name: &'static str,
        data: Vec<u8>,
        filename: String,
        content_type: &'static str,
    },
}

impl FormField {
    pub fn text(name: &'static str, value: impl Into<String>) -> Self {
        FormField::Text {
            name,
            value: value.into(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FormField::Text { name, .. } | FormField::File { name, .. } => *name,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    Json(serde_json::Value),
    Binary {
        data: Vec<u8>,
        content_type: &'static str,
    },
    Multipart(Vec<FormField>),
}

/// Fully resolved target, auth header and body for one logical call.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    url: Url,
    auth_header: &'static str,
    credential: Credential,
    body: RequestBody,
}

impl OutboundRequest {
    /// Joins `path` onto the descriptor endpoint and appends `api-version`
    /// followed by `query`.
    pub fn new(
        descriptor: &ModelDescriptor,
        path: &str,
        query: &[(&str, String)],
        body: RequestBody,
    ) -> Self {
        let mut url = descriptor.endpoint().clone();
        let joined = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        url.set_path(&joined);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("api-version", descriptor.api_version());
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Self {
            url,
            auth_header: descriptor.family().auth_header(),
            credential: descriptor.credential().clone(),
            body,
        }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn auth_header(&self) -> &'static str {
        self.auth_header
    }

    pub fn body(&self) -> &RequestBody {
        &self.body
    }

    pub(crate) fn to_reqwest(&self, client: &Client, timeout: Duration) -> Result<RequestBuilder> {
        let builder = client
            .post(self.url.clone())
            .timeout(timeout)
            .header(self.auth_header, self.credential.expose());

        let builder = match &self.body {
            RequestBody::Json(value) => builder.json(value),
            RequestBody::Binary { data, content_type } => builder
                .header(CONTENT_TYPE, *content_type)
                .body(data.clone()),
            RequestBody::Multipart(fields) => builder.multipart(build_form(fields)?),
        };
        Ok(builder)
    }
}

fn build_form(fields: &[FormField]) -> Result<Form> {
    let mut form = Form::new();
    for field in fields {
        form = match field {
            FormField::Text { name, value } => form.text(*name, value.clone()),
            FormField::File {
                name,
                data,
                filename,
                content_type,
            } => {
                let part = Part::bytes(data.clone())
                    .file_name(filename.clone())
                    .mime_str(content_type)
                    .map_err(|e| {
                        Error::Validation(format!(
                            "Invalid content type '{}' for {}: {}",
                            content_type, name, e
                        ))
                    })?;
                form.part(*name, part)
            }
        };
    }
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelFamily;

    fn descriptor(endpoint: &str) -> ModelDescriptor {
        ModelDescriptor::builder(ModelFamily::Florence)
            .endpoint(endpoint)
            .credential("vision-key")
            .api_version("2024-02-01")
            .build()
            .unwrap()
    }

    #[test]
    fn test_url_joins_path_and_query() {
        let request = OutboundRequest::new(
            &descriptor("https://vision.example.com/"),
            "computervision/imageanalysis:analyze",
            &[("features", "caption".to_string())],
            RequestBody::Json(serde_json::json!({})),
        );

        assert_eq!(
            request.url().path(),
            "/computervision/imageanalysis:analyze"
        );
        assert_eq!(
            request.url().query(),
            Some("api-version=2024-02-01&features=caption")
        );
        assert_eq!(request.auth_header(), "Ocp-Apim-Subscription-Key");
    }

    #[test]
    fn test_url_keeps_endpoint_base_path() {
        let request = OutboundRequest::new(
            &descriptor("https://gateway.example.com/vision"),
            "/computervision/imageanalysis:analyze",
            &[],
            RequestBody::Json(serde_json::json!({})),
        );
        assert_eq!(
            request.url().path(),
            "/vision/computervision/imageanalysis:analyze"
        );
    }

    #[test]
    fn test_debug_does_not_leak_credential() {
        let request = OutboundRequest::new(
            &descriptor("https://vision.example.com"),
            "x",
            &[],
            RequestBody::Json(serde_json::json!({})),
        );
        assert!(!format!("{:?}", request).contains("vision-key"));
    }

    #[test]
    fn test_multipart_form_builds_for_each_attempt() {
        let fields = vec![
            FormField::text("prompt", "add a hat"),
            FormField::File {
                name: "image",
                data: vec![1, 2, 3],
                filename: "cat.png".to_string(),
                content_type: "image/png",
            },
        ];
        assert!(build_form(&fields).is_ok());
        assert!(build_form(&fields).is_ok());
    }
}
