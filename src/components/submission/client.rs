use super::models::{EmployeeId, ErrorBody, SubmissionRequest, SubmissionResponse, VacationEntry};
use super::{SubmissionService, SubmitError};
use crate::error::PlannerResult;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Path of the vacation request collection, relative to the API base URL
pub const VACATION_REQUESTS_PATH: &str = "vacation-requests";

/// Submission service reached over HTTP
#[derive(Debug, Clone)]
pub struct HttpSubmissionService {
    client: Client,
    endpoint: Url,
}

impl HttpSubmissionService {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &Url, timeout: Duration) -> PlannerResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, base_url)
    }

    /// Use an already configured HTTP client
    pub fn with_client(client: Client, base_url: &Url) -> PlannerResult<Self> {
        Ok(Self {
            client,
            endpoint: vacation_requests_url(base_url)?,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

/// `{base}/vacation-requests`, keeping any path prefix of the base URL
pub fn vacation_requests_url(base_url: &Url) -> PlannerResult<Url> {
    let mut base = base_url.clone();
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base.join(VACATION_REQUESTS_PATH)?)
}

/// Pull the `"error"` message out of a rejection body, empty when absent
pub fn extract_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|body| body.error)
        .unwrap_or_default()
}

#[async_trait]
impl SubmissionService for HttpSubmissionService {
    async fn submit(
        &self,
        employee_id: EmployeeId,
        entries: &[VacationEntry],
    ) -> Result<SubmissionResponse, SubmitError> {
        let request = SubmissionRequest {
            employee_id,
            dates: entries.to_vec(),
        };

        debug!("POST {} with {} entries", self.endpoint, entries.len());

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!("Vacation request rejected: HTTP {} - {}", status, body);
            return Err(SubmitError::Service {
                status: Some(status.as_u16()),
                message: extract_error_message(&body),
            });
        }

        let parsed: SubmissionResponse = response.json().await?;
        info!(
            "Vacation request accepted for employee {}: {} days",
            employee_id,
            parsed.requests.len()
        );
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Answer exactly one request with a canned response
    async fn serve_once(
        status_line: &'static str,
        content_type: &'static str,
        body: &'static str,
    ) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                content_type,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    /// Consume the request head and its body
    async fn read_request(socket: &mut TcpStream) {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                return;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
                let length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|value| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + length {
                    return;
                }
            }
        }
    }

    fn service(base: &Url) -> HttpSubmissionService {
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        HttpSubmissionService::with_client(client, base).unwrap()
    }

    fn entries() -> Vec<VacationEntry> {
        vec![VacationEntry {
            date: "2024-07-01".to_string(),
            start_time: "09:00".to_string(),
            end_time: "18:00".to_string(),
        }]
    }

    #[tokio::test]
    async fn test_submit_accepted() {
        let base = serve_once(
            "201 Created",
            "application/json",
            r#"{"requests": [{"employee_id": 3, "employee_name": "Charlie", "vacation_date": "2024-07-01", "start_time": "09:00", "end_time": "18:00", "submitted_at": "2024-06-10T01:00:00+00:00"}]}"#,
        )
        .await;

        let response = service(&base)
            .submit(EmployeeId::new(3), &entries())
            .await
            .unwrap();
        assert_eq!(response.requests.len(), 1);
        assert_eq!(response.requests[0].employee_name.as_deref(), Some("Charlie"));
    }

    #[tokio::test]
    async fn test_submit_rejected_with_error_body() {
        let base = serve_once(
            "404 Not Found",
            "application/json",
            r#"{"error": "Employee 42 not found"}"#,
        )
        .await;

        let err = service(&base)
            .submit(EmployeeId::new(42), &entries())
            .await
            .unwrap_err();
        match &err {
            SubmitError::Service { status, message } => {
                assert_eq!(*status, Some(404));
                assert_eq!(message, "Employee 42 not found");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.user_message(), "Employee 42 not found");
    }

    #[tokio::test]
    async fn test_submit_rejected_without_error_body() {
        let base = serve_once(
            "500 Internal Server Error",
            "text/html",
            "<html><body>Internal Server Error</body></html>",
        )
        .await;

        let err = service(&base)
            .submit(EmployeeId::new(3), &entries())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SubmitError::Service {
                status: Some(500),
                ..
            }
        ));
        assert_eq!(err.user_message(), t!("submit_unknown_error"));
    }

    #[tokio::test]
    async fn test_submit_undecodable_success_body() {
        let base = serve_once("201 Created", "application/json", "not-json").await;

        let err = service(&base)
            .submit(EmployeeId::new(3), &entries())
            .await
            .unwrap_err();
        assert!(matches!(err, SubmitError::Transport(_)));
        assert!(!err.user_message().is_empty());
    }

    #[test]
    fn test_vacation_requests_url() {
        let base = Url::parse("http://127.0.0.1:5000").unwrap();
        assert_eq!(
            vacation_requests_url(&base).unwrap().as_str(),
            "http://127.0.0.1:5000/vacation-requests"
        );

        let prefixed = Url::parse("https://example.com/api").unwrap();
        assert_eq!(
            vacation_requests_url(&prefixed).unwrap().as_str(),
            "https://example.com/api/vacation-requests"
        );

        let trailing = Url::parse("https://example.com/api/").unwrap();
        assert_eq!(
            vacation_requests_url(&trailing).unwrap().as_str(),
            "https://example.com/api/vacation-requests"
        );
    }

    #[test]
    fn test_extract_error_message() {
        assert_eq!(
            extract_error_message(r#"{"error": "Employee 42 not found"}"#),
            "Employee 42 not found"
        );
        assert_eq!(extract_error_message(r#"{"detail": "nope"}"#), "");
        assert_eq!(extract_error_message("<html>Bad Gateway</html>"), "");
        assert_eq!(extract_error_message(""), "");
    }

    #[test]
    fn test_client_creation() {
        let base = Url::parse("http://localhost:5000/").unwrap();
        let service = HttpSubmissionService::new(&base, Duration::from_secs(5)).unwrap();
        assert_eq!(service.endpoint().path(), "/vacation-requests");
    }
}
