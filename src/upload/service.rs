//! Upload service
//!
//! One linear async procedure per call: validate the size locally, POST the
//! file as a multipart form, interpret the endpoint's answer. Each call is
//! independent; the service keeps no state between invocations and applies
//! no retry, deduplication, or cancellation.

use super::{FileHandle, UploadError, UploadResult, Uploaded};
use crate::config::UploadConfig;
use crate::notify::{Notifier, NotifyKind};
use serde::Deserialize;
use std::sync::Arc;

/// Form field carrying the file content
const FILE_FIELD: &str = "upload";

/// Form field carrying the bearer token, duplicated from the header for
/// servers that expect form-encoded auth
const TOKEN_FIELD: &str = "token";

/// Message the endpoint returns for an accepted upload
const ACCEPT_MESSAGE: &str = "OK";

/// Wire shape of the endpoint's response body
#[derive(Debug, Deserialize)]
struct EndpointResponse {
    message: String,
    #[serde(default)]
    url: Option<String>,
}

/// Upload service
///
/// Holds an HTTP client and the injected [`Notifier`]. Configuration is
/// passed per call so the caller can re-read its settings store before each
/// attempt.
pub struct UploadService {
    http: reqwest::Client,
    notifier: Arc<dyn Notifier>,
}

impl UploadService {
    /// Create a service with a default HTTP client.
    ///
    /// The client carries no request timeout: a call against a
    /// non-responding endpoint waits until the transport gives up on its
    /// own. Hosts that want a deadline inject one via [`with_client`].
    ///
    /// [`with_client`]: UploadService::with_client
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        Self::with_client(reqwest::Client::new(), notifier)
    }

    /// Create a service with a caller-supplied HTTP client
    pub fn with_client(http: reqwest::Client, notifier: Arc<dyn Notifier>) -> Self {
        Self { http, notifier }
    }

    /// Upload one file to the configured endpoint.
    ///
    /// Returns the hosted URL on acceptance, or a classified
    /// [`UploadError`]. Never panics and never leaks a transport error
    /// past its boundary. Notifier calls along the way are best-effort and
    /// do not affect the returned result.
    #[tracing::instrument(
        name = "upload.send",
        skip(self, file, config),
        fields(
            file.name = %file.name(),
            file.bytes = file.size(),
            endpoint = %config.endpoint_url
        )
    )]
    pub async fn upload(&self, file: &FileHandle, config: &UploadConfig) -> UploadResult {
        let max_bytes = config.max_upload_bytes();
        // Strict comparison: a file exactly at the limit is accepted
        if file.size() > max_bytes {
            let err = UploadError::TooLarge {
                size: file.size(),
                limit_mib: config.max_upload_size_mib,
            };
            tracing::warn!(size = file.size(), max_bytes, "Rejected oversized file");
            self.notifier
                .notify(NotifyKind::Failed, &err.to_string())
                .await;
            return Err(err);
        }

        self.notifier
            .notify(NotifyKind::Started, "File is being uploaded")
            .await;

        match self.transfer(file, config).await {
            Ok(uploaded) => {
                tracing::info!(url = %uploaded.url, "File uploaded");
                self.notifier
                    .notify(NotifyKind::Succeeded, "File uploaded successfully")
                    .await;
                Ok(uploaded)
            }
            Err(err) => {
                self.notifier
                    .notify(NotifyKind::Failed, "Error uploading file")
                    .await;
                Err(err)
            }
        }
    }

    /// Perform the POST and interpret the response
    async fn transfer(&self, file: &FileHandle, config: &UploadConfig) -> UploadResult {
        let part = reqwest::multipart::Part::bytes(file.content().to_vec())
            .file_name(file.name().to_string());
        let form = reqwest::multipart::Form::new()
            .part(FILE_FIELD, part)
            .text(TOKEN_FIELD, config.bearer_token.clone());

        let response = self
            .http
            .post(&config.endpoint_url)
            .bearer_auth(&config.bearer_token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| UploadError::Transport(e.to_string()))?;

        if !status.is_success() {
            tracing::error!(status = %status, body = %body, "Endpoint rejected upload");
            return Err(UploadError::ServerRejected);
        }

        match serde_json::from_str::<EndpointResponse>(&body) {
            Ok(parsed) if parsed.message == ACCEPT_MESSAGE => match parsed.url {
                Some(url) => Ok(Uploaded { url }),
                None => {
                    tracing::error!(body = %body, "Accepted response carried no url");
                    Err(UploadError::ServerRejected)
                }
            },
            Ok(parsed) => {
                tracing::error!(status = %status, message = %parsed.message, "Unexpected endpoint message");
                Err(UploadError::ServerRejected)
            }
            Err(e) => {
                tracing::error!(status = %status, error = %e, body = %body, "Unparseable endpoint response");
                Err(UploadError::ServerRejected)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MockNotifier;
    use mockall::Sequence;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(server: &MockServer) -> UploadConfig {
        UploadConfig {
            endpoint_url: format!("{}/upload", server.uri()),
            bearer_token: "test-token".into(),
            max_upload_size_mib: 1,
        }
    }

    #[tokio::test]
    async fn test_notifies_started_then_succeeded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "message": "OK",
                "url": "https://files.example.net/abc"
            })))
            .mount(&server)
            .await;

        let mut seq = Sequence::new();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|kind, _| *kind == NotifyKind::Started)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        notifier
            .expect_notify()
            .withf(|kind, _| *kind == NotifyKind::Succeeded)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());

        let service = UploadService::new(Arc::new(notifier));
        let file = FileHandle::new("cat.png", vec![0u8; 16]);
        let uploaded = service.upload(&file, &test_config(&server)).await.unwrap();
        assert_eq!(uploaded.url, "https://files.example.net/abc");
    }

    #[tokio::test]
    async fn test_notifies_started_then_failed_on_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let mut seq = Sequence::new();
        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|kind, _| *kind == NotifyKind::Started)
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());
        notifier
            .expect_notify()
            .withf(|kind, message| *kind == NotifyKind::Failed && message == "Error uploading file")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| ());

        let service = UploadService::new(Arc::new(notifier));
        let file = FileHandle::new("cat.png", vec![0u8; 16]);
        let result = service.upload(&file, &test_config(&server)).await;
        assert!(matches!(result, Err(UploadError::ServerRejected)));
    }

    #[tokio::test]
    async fn test_oversized_file_notifies_failed_without_started() {
        let server = MockServer::start().await;
        let config = test_config(&server);

        let mut notifier = MockNotifier::new();
        notifier
            .expect_notify()
            .withf(|kind, message| {
                *kind == NotifyKind::Failed && message.starts_with("File too large")
            })
            .times(1)
            .returning(|_, _| ());

        let service = UploadService::new(Arc::new(notifier));
        let file = FileHandle::new("big.bin", vec![0u8; 1024 * 1024 + 1]);
        let result = service.upload(&file, &config).await;
        assert!(matches!(result, Err(UploadError::TooLarge { .. })));
    }
}
