//! HTTP adapter for the analysis endpoint. Implements `AnalyzePort` with a
//! multipart POST (`email_text` and/or `file`).

use crate::domain::{DomainError, HttpReply, SelectedInput};
use crate::ports::AnalyzePort;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

/// reqwest-backed client for `POST /analyze`.
///
/// No client-side timeout is set; the transport's own limits apply.
pub struct AnalyzeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl AnalyzeClient {
    /// # Arguments
    /// * `endpoint` - Full URL of the analysis route (e.g. "http://127.0.0.1:5000/analyze")
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn build_form(input: &SelectedInput) -> Result<Form, DomainError> {
        let mut form = Form::new();
        if let Some(text) = &input.text {
            form = form.text("email_text", text.clone());
        }
        if let Some(file) = &input.file {
            let bytes = file.read_bytes().await?;
            let part = Part::bytes(bytes)
                .file_name(file.name.clone())
                .mime_str(file.mime())
                .map_err(|e| DomainError::Transport(format!("invalid mime type: {}", e)))?;
            form = form.part("file", part);
        }
        Ok(form)
    }
}

#[async_trait::async_trait]
impl AnalyzePort for AnalyzeClient {
    async fn analyze(&self, input: &SelectedInput) -> Result<HttpReply, DomainError> {
        info!(
            url = %self.endpoint,
            text_len = input.text.as_ref().map(|t| t.len()).unwrap_or(0),
            file = input.file.as_ref().map(|f| f.name.as_str()).unwrap_or("-"),
            "sending email for analysis"
        );

        let form = Self::build_form(input).await?;
        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "analysis request failed");
                DomainError::Transport(format!("HTTP request failed: {}", e))
            })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transport(format!("Failed to read response: {}", e)))?;

        debug!(status, body_len = body.len(), "analysis endpoint replied");
        Ok(HttpReply { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CandidateFile;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// One-shot server: captures the raw request and answers with `status` / `body`.
    async fn serve_once(status: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/analyze", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut raw = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                raw.extend_from_slice(&buf[..n]);
                if raw.ends_with(b"--\r\n") || raw.ends_with(b"0\r\n\r\n") {
                    break;
                }
            }
            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            String::from_utf8_lossy(&raw).into_owned()
        });
        (url, handle)
    }

    #[tokio::test]
    async fn posts_text_and_file_as_multipart() {
        let (url, server) = serve_once("200 OK", r#"{"is_useful": true}"#).await;
        let client = AnalyzeClient::new(url);
        let input = SelectedInput::new(
            "  Reunião amanhã  ",
            Some(CandidateFile::from_bytes("ata.txt", b"pauta".to_vec())),
        );

        let reply = client.analyze(&input).await.unwrap();
        let request = server.await.unwrap();

        assert_eq!(reply.status, 200);
        assert_eq!(reply.body, r#"{"is_useful": true}"#);
        assert!(request.starts_with("POST /analyze"));
        assert!(request.contains("multipart/form-data; boundary="));
        assert!(request.contains(r#"name="email_text""#));
        assert!(request.contains("Reunião amanhã"));
        assert!(request.contains(r#"name="file"; filename="ata.txt""#));
        assert!(request.contains("text/plain"));
        assert!(request.contains("pauta"));
    }

    #[tokio::test]
    async fn omits_absent_parts() {
        let (url, server) = serve_once("200 OK", "{}").await;
        let client = AnalyzeClient::new(url);
        let input = SelectedInput::new("only text", None);

        client.analyze(&input).await.unwrap();
        let request = server.await.unwrap();

        assert!(request.contains(r#"name="email_text""#));
        assert!(!request.contains(r#"name="file""#));
    }

    #[tokio::test]
    async fn server_error_is_returned_as_reply() {
        let (url, server) =
            serve_once("500 Internal Server Error", r#"{"error": "db down"}"#).await;
        let client = AnalyzeClient::new(url);

        let reply = client
            .analyze(&SelectedInput::new("hello", None))
            .await
            .unwrap();
        server.await.unwrap();

        assert_eq!(reply.status, 500);
        assert!(!reply.is_success());
        assert!(reply.body.contains("db down"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/analyze", listener.local_addr().unwrap());
        drop(listener);

        let err = AnalyzeClient::new(url)
            .analyze(&SelectedInput::new("hello", None))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Transport(_)));
    }
}
