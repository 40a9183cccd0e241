use anyhow::Result;
use reqwest::multipart;
use reqwest::Client;

use crate::models::{
    AskRequest, AskResponse, ErrorResponse, HealthResponse, SelectedFile, UploadResponse,
};

/// The two backend operations the session depends on. Kept behind a trait
/// so tests can substitute a scripted fake for the HTTP client.
#[allow(async_fn_in_trait)]
pub trait QaApi {
    async fn upload_pdf(&self, file: &SelectedFile) -> Result<UploadResponse>;
    async fn ask_question(&self, file_id: &str, question: &str) -> Result<AskResponse>;
}

/// HTTP implementation of [`QaApi`] against a running backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Backend liveness probe.
    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Health check failed with status {}",
                response.status()
            ));
        }

        Ok(response.json().await?)
    }
}

impl QaApi for ApiClient {
    async fn upload_pdf(&self, file: &SelectedFile) -> Result<UploadResponse> {
        let part = multipart::Part::bytes(file.data.clone())
            .file_name(file.name.clone())
            .mime_str(&file.media_type)?;
        let form = multipart::Form::new().part("pdf", part);

        let response = self
            .client
            .post(format!("{}/api/upload-pdf", self.base_url))
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow::anyhow!(
                "Upload endpoint error ({}): {}",
                status,
                error_detail(response).await
            ));
        }

        let upload_response: UploadResponse = response.json().await?;
        Ok(upload_response)
    }

    async fn ask_question(&self, file_id: &str, question: &str) -> Result<AskResponse> {
        let request = AskRequest {
            file_id: file_id.to_string(),
            question: question.to_string(),
        };

        let response = self
            .client
            .post(format!("{}/api/ask-question", self.base_url))
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(anyhow::anyhow!(
                "Question endpoint error ({}): {}",
                status,
                error_detail(response).await
            ));
        }

        let ask_response: AskResponse = response.json().await?;
        Ok(ask_response)
    }
}

// Pulls the server's error message out of a non-2xx body, falling back to
// the raw text when it is not the usual {"error": ...} shape.
async fn error_detail(response: reqwest::Response) -> String {
    let body = response.text().await.unwrap_or_default();
    match serde_json::from_str::<ErrorResponse>(&body) {
        Ok(parsed) => parsed.error,
        Err(_) => body,
    }
}
