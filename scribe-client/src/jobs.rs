//! Job-related API endpoints

use std::path::Path;

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use scribe_core::domain::job::{Job, JobId};
use scribe_core::dto::job::{CreateJob, JobCreated, Transcript};
use tracing::info;

use crate::error::Result;
use crate::{Session, TranscriptionClient};

impl TranscriptionClient {
    // =============================================================================
    // Job Queries
    // =============================================================================

    /// List every job owned by the session's user
    pub async fn list_jobs(&self, session: &Session) -> Result<Vec<Job>> {
        let request = self.authed(self.client.get(self.url("/jobs")), session);
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Get one job, including its transcript once completed
    pub async fn get_job(&self, session: &Session, job_id: &JobId) -> Result<Job> {
        let url = self.job_url(job_id, None)?;
        let response = self.send(self.authed(self.client.get(url), session)).await?;

        self.handle_response(response).await
    }

    /// Download the transcript as plain text
    ///
    /// The backend answers 400 while the job is not completed.
    pub async fn download_transcript(
        &self,
        session: &Session,
        job_id: &JobId,
    ) -> Result<Transcript> {
        let url = self.job_url(job_id, Some("download"))?;
        let response = self.send(self.authed(self.client.get(url), session)).await?;
        let response = Self::check_status(response).await?;

        let filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(disposition_filename);
        let text = response.text().await?;

        Ok(Transcript { filename, text })
    }

    // =============================================================================
    // Job Lifecycle
    // =============================================================================

    /// Upload an audio file and start a transcription job
    ///
    /// Sent as multipart with the fields `file`, `model`, `alias` and
    /// `language`.
    pub async fn submit_job(
        &self,
        session: &Session,
        path: &Path,
        req: &CreateJob,
    ) -> Result<JobCreated> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let mime = mime_guess::from_path(path).first_or_octet_stream();

        let part = Part::bytes(bytes)
            .file_name(file_name.clone())
            .mime_str(mime.as_ref())?;
        let form = Form::new()
            .part("file", part)
            .text("model", req.model.clone())
            .text("alias", req.alias.clone())
            .text("language", req.language.clone());

        let request = self.authed(self.client.post(self.url("/jobs")), session).multipart(form);
        let response = self.send(request).await?;
        let created: JobCreated = self.handle_response(response).await?;

        info!(job_id = %created.job_id, file = %file_name, model = %req.model, "job submitted");
        Ok(created)
    }

    /// Delete a job and its data
    pub async fn delete_job(&self, session: &Session, job_id: &JobId) -> Result<()> {
        let url = self.job_url(job_id, None)?;
        let response = self.send(self.authed(self.client.delete(url), session)).await?;

        self.handle_empty_response(response).await?;
        info!(job_id = %job_id, "job deleted");
        Ok(())
    }
}

/// Extract `filename` from a `Content-Disposition` header value
fn disposition_filename(value: &str) -> Option<String> {
    value
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use scribe_core::domain::job::JobStatus;
    use std::io::Write;

    fn session() -> Session {
        Session::new("ada", "key-123")
    }

    #[test]
    fn test_disposition_filename() {
        assert_eq!(
            disposition_filename("attachment; filename=standup.txt").as_deref(),
            Some("standup.txt")
        );
        assert_eq!(
            disposition_filename(r#"attachment; filename="a b.txt""#).as_deref(),
            Some("a b.txt")
        );
        assert_eq!(disposition_filename("inline"), None);
    }

    #[tokio::test]
    async fn test_list_jobs() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/jobs")
            .match_header("x-api-key", "key-123")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"id": 2, "alias": "b", "status": "processing", "progress": 0.42, "duration": null},
                    {"id": 1, "alias": "a", "status": "completed", "progress": 1.0, "duration": 125.0}
                ]"#,
            )
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let jobs = client.list_jobs(&session()).await.unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].status, JobStatus::Processing);
        assert_eq!(jobs[1].duration, Some(125.0));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_job_not_found() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/jobs/99")
            .with_status(404)
            .with_body(r#"{"detail": "Job not found"}"#)
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let err = client
            .get_job(&session(), &JobId::Numeric(99))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_download_transcript() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/jobs/5/download")
            .match_header("x-api-key", "key-123")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_header("content-disposition", "attachment; filename=weekly.txt")
            .with_body("hello world")
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let transcript = client
            .download_transcript(&session(), &JobId::Numeric(5))
            .await
            .unwrap();

        assert_eq!(transcript.text, "hello world");
        assert_eq!(transcript.filename.as_deref(), Some("weekly.txt"));
    }

    #[tokio::test]
    async fn test_download_not_ready() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/jobs/5/download")
            .with_status(400)
            .with_body(r#"{"detail": "Transcript not available yet"}"#)
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let err = client
            .download_transcript(&session(), &JobId::Numeric(5))
            .await
            .unwrap_err();

        assert!(err.is_client_error());
        assert!(err.to_string().contains("not available"));
    }

    #[tokio::test]
    async fn test_submit_job_multipart() {
        let mut file = tempfile::Builder::new().suffix(".mp3").tempfile().unwrap();
        file.write_all(b"ID3 fake audio").unwrap();

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/jobs")
            .match_header("x-api-key", "key-123")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="model"\r\n\r\nsmall"#.to_string()),
                Matcher::Regex(r#"name="alias"\r\n\r\nweekly"#.to_string()),
                Matcher::Regex(r#"name="language"\r\n\r\nde"#.to_string()),
                Matcher::Regex("ID3 fake audio".to_string()),
            ]))
            .with_status(200)
            .with_body(r#"{"message": "created", "job_id": 12, "filename": "x.mp3", "model": "small"}"#)
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        let req = CreateJob::new("small").with_alias("weekly").with_language("de");
        let created = client
            .submit_job(&session(), file.path(), &req)
            .await
            .unwrap();

        assert_eq!(created.job_id, JobId::Numeric(12));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_missing_file() {
        let client = TranscriptionClient::new("http://127.0.0.1:9");
        let err = client
            .submit_job(
                &session(),
                Path::new("/definitely/not/here.mp3"),
                &CreateJob::new("tiny"),
            )
            .await
            .unwrap_err();

        assert!(matches!(err, crate::ClientError::Io(_)));
    }

    #[tokio::test]
    async fn test_delete_job() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("DELETE", "/jobs/3")
            .match_header("x-api-key", "key-123")
            .with_status(200)
            .with_body(r#"{"message": "deleted"}"#)
            .create_async()
            .await;

        let client = TranscriptionClient::new(server.url());
        client
            .delete_job(&session(), &JobId::Numeric(3))
            .await
            .unwrap();

        mock.assert_async().await;
    }
}
