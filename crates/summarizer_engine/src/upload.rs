use std::sync::Arc;

use engine_logging::{engine_debug, engine_info};
use reqwest::multipart::{Form, Part};
use serde_json::Value;
use thiserror::Error;

use crate::{EngineEvent, RequestId, Stage, UploadProgress};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_UPLOAD_PATH: &str = "/upload";
/// Multipart field name the service reads the document from.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSettings {
    pub base_url: String,
    pub upload_path: String,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            upload_path: DEFAULT_UPLOAD_PATH.to_string(),
        }
    }
}

impl UploadSettings {
    pub fn endpoint(&self) -> Result<reqwest::Url, UploadError> {
        let base = reqwest::Url::parse(self.base_url.trim())
            .map_err(|err| UploadError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        base.join(&self.upload_path)
            .map_err(|err| UploadError::InvalidUrl(format!("{}: {err}", self.upload_path)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("invalid upload url {0}")]
    InvalidUrl(String),
    #[error("Server responded {0}")]
    HttpStatus(u16),
    #[error("{0}")]
    Network(String),
    #[error("{0}")]
    Decode(String),
}

impl UploadError {
    /// Underlying message for non-status failures, if it carries any text.
    pub fn message(&self) -> Option<String> {
        let text = match self {
            UploadError::HttpStatus(_) => return None,
            UploadError::InvalidUrl(_) => self.to_string(),
            UploadError::Network(text) | UploadError::Decode(text) => text.clone(),
        };
        let trimmed = text.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Receives engine events as they happen.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Sends one document and returns the `summary` field of the reply.
    async fn upload(
        &self,
        request_id: RequestId,
        file_name: &str,
        content: Arc<[u8]>,
        sink: &dyn EventSink,
    ) -> Result<Option<String>, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    endpoint: reqwest::Url,
    client: reqwest::Client,
}

impl ReqwestUploader {
    /// No request timeout is configured; the transport's own behaviour applies.
    pub fn new(settings: &UploadSettings) -> Result<Self, UploadError> {
        let endpoint = settings.endpoint()?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|err| UploadError::Network(err.to_string()))?;
        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &reqwest::Url {
        &self.endpoint
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        request_id: RequestId,
        file_name: &str,
        content: Arc<[u8]>,
        sink: &dyn EventSink,
    ) -> Result<Option<String>, UploadError> {
        let byte_len = content.len();
        let part = Part::bytes(content.to_vec())
            .file_name(file_name.to_string())
            .mime_str(content_type_for(file_name))
            .map_err(map_reqwest_error)?;
        let form = Form::new().part(FILE_FIELD, part);

        sink.emit(EngineEvent::Progress(UploadProgress {
            request_id,
            stage: Stage::Sending,
        }));
        engine_info!(
            "POST {} request_id={} file={} bytes={}",
            self.endpoint,
            request_id,
            file_name,
            byte_len
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        sink.emit(EngineEvent::Progress(UploadProgress {
            request_id,
            stage: Stage::ResponseReceived,
        }));

        let status = response.status();
        if !status.is_success() {
            return Err(UploadError::HttpStatus(status.as_u16()));
        }

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        engine_debug!("request_id={} response body {} bytes", request_id, body.len());
        extract_summary(&body)
    }
}

/// Parses a JSON reply and pulls out its `summary` field.
///
/// Absent, `null`, `false`, `0` and `""` all count as "no summary". Other
/// non-string values are rendered as JSON text. A bare `null` body has no
/// fields to read and is a decode failure.
pub fn extract_summary(body: &[u8]) -> Result<Option<String>, UploadError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| UploadError::Decode(err.to_string()))?;
    if value.is_null() {
        return Err(UploadError::Decode(
            "Cannot read properties of null (reading 'summary')".to_string(),
        ));
    }
    let summary = match value.get("summary") {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(text)) if text.is_empty() => None,
        Some(Value::String(text)) => Some(text.clone()),
        Some(Value::Number(number)) if number.as_f64() == Some(0.0) => None,
        Some(other) => Some(other.to_string()),
    };
    Ok(summary)
}

pub fn content_type_for(file_name: &str) -> &'static str {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".pdf") {
        "application/pdf"
    } else if lower.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_decode() {
        return UploadError::Decode(err.to_string());
    }
    UploadError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_field_is_extracted_verbatim() {
        let body = br#"{"summary": "{\"summary\": \"x\", \"folder\": \"y\"}"}"#;
        assert_eq!(
            extract_summary(body).unwrap().as_deref(),
            Some(r#"{"summary": "x", "folder": "y"}"#)
        );
    }

    #[test]
    fn falsy_or_missing_summary_is_none() {
        let bodies: [&[u8]; 6] = [
            br#"{}"#,
            br#"{"summary": null}"#,
            br#"{"summary": ""}"#,
            br#"{"summary": false}"#,
            br#"{"summary": 0}"#,
            br#"[1, 2]"#,
        ];
        for body in bodies {
            assert_eq!(extract_summary(body).unwrap(), None, "{body:?}");
        }
    }

    #[test]
    fn null_body_is_a_decode_error() {
        let err = extract_summary(b"null").unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
        assert_eq!(
            err.message().as_deref(),
            Some("Cannot read properties of null (reading 'summary')")
        );
        assert_eq!(extract_summary(br#""text""#).unwrap(), None);
    }

    #[test]
    fn non_string_summary_is_rendered_as_json() {
        assert_eq!(
            extract_summary(br#"{"summary": {"a": 1}}"#).unwrap().as_deref(),
            Some(r#"{"a":1}"#)
        );
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = extract_summary(b"<html>").unwrap_err();
        assert!(matches!(err, UploadError::Decode(_)));
        assert!(err.message().is_some());
    }

    #[test]
    fn endpoint_joins_base_and_path() {
        let settings = UploadSettings::default();
        assert_eq!(
            settings.endpoint().unwrap().as_str(),
            "http://127.0.0.1:8000/upload"
        );

        let settings = UploadSettings {
            base_url: "not a url".to_string(),
            ..UploadSettings::default()
        };
        assert!(matches!(
            settings.endpoint(),
            Err(UploadError::InvalidUrl(_))
        ));
    }

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("A.PDF"), "application/pdf");
        assert_eq!(content_type_for("notes.txt"), "text/plain");
        assert_eq!(content_type_for("scan.png"), "application/octet-stream");
    }

    #[test]
    fn status_errors_carry_no_message() {
        assert_eq!(UploadError::HttpStatus(500).message(), None);
        assert_eq!(UploadError::HttpStatus(500).to_string(), "Server responded 500");
        assert_eq!(UploadError::Network("  ".to_string()).message(), None);
    }
}
