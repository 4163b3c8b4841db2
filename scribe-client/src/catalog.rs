//! Service metadata endpoints
//!
//! None of these require a session.

use scribe_core::domain::catalog::{ApiDocs, LanguageList, ModelList, UploadLimits};

use crate::TranscriptionClient;
use crate::error::Result;

impl TranscriptionClient {
    /// Models the backend can transcribe with
    pub async fn models(&self) -> Result<ModelList> {
        let response = self.send(self.client.get(self.url("/models"))).await?;
        self.handle_response(response).await
    }

    /// Languages accepted for the `language` upload field
    pub async fn languages(&self) -> Result<LanguageList> {
        let response = self.send(self.client.get(self.url("/languages"))).await?;
        self.handle_response(response).await
    }

    /// Size and format limits for uploads
    pub async fn upload_limits(&self) -> Result<UploadLimits> {
        let response = self.send(self.client.get(self.url("/upload-limits"))).await?;
        self.handle_response(response).await
    }

    /// Self-description of the backend API
    pub async fn api_docs(&self) -> Result<ApiDocs> {
        let response = self.send(self.client.get(self.url("/api-docs"))).await?;
        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_models() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/models")
            .with_status(200)
            .with_body(r#"{"models": [{"value": "tiny", "label": "Fast", "loaded": true}]}"#)
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let models = client.models().await.unwrap();

        assert!(models.contains("tiny"));
    }

    #[tokio::test]
    async fn test_languages() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/languages")
            .with_status(200)
            .with_body(r#"{"languages": [{"code": "auto", "name": "Detect automatically", "flag": "🌐"}, {"code": "de", "name": "German"}]}"#)
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let list = client.languages().await.unwrap();

        assert_eq!(list.languages.len(), 2);
        assert_eq!(list.languages[1].flag, None);
    }

    #[tokio::test]
    async fn test_upload_limits() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/upload-limits")
            .with_status(200)
            .with_body(
                r#"{"max_size_mb": 500, "max_size_bytes": 524288000,
                    "supported_formats": ["MP3", "WAV"], "max_concurrent_jobs": 3}"#,
            )
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let limits = client.upload_limits().await.unwrap();

        assert_eq!(limits.max_size_bytes, 524_288_000);
        assert_eq!(limits.max_concurrent_jobs, Some(3));
    }

    #[tokio::test]
    async fn test_api_docs() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/api-docs")
            .with_status(200)
            .with_body(
                r#"{"title": "Transcription API", "version": "1.0.0",
                    "limits": {"max_upload_size_mb": 500},
                    "endpoints": [{"id": "get_jobs", "title": "List jobs", "method": "GET",
                                   "path": "/jobs", "requires_auth": true, "parameters": []}]}"#,
            )
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let docs = client.api_docs().await.unwrap();

        assert_eq!(docs.endpoints.len(), 1);
        assert!(docs.endpoints[0].requires_auth);
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/models")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let err = client.models().await.unwrap_err();

        assert!(matches!(err, crate::ClientError::ParseError(_)));
    }
}
