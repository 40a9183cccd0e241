use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::format;

/// A file the user has picked, before the backend has seen it.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    /// Reads a file from disk, deriving the declared media type from its
    /// extension.
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let data = fs::read(path)?;

        Ok(Self {
            name,
            media_type: format::media_type_for_path(path),
            data,
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// The document the backend currently holds for this session. The `id` is
/// the opaque handle issued by the upload endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub id: String,
}

/// One question/answer round. Immutable once appended to the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEntry {
    pub id: u64,
    pub question: String,
    pub answer: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(rename = "fileId")]
    pub file_id: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub chunks_count: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskRequest {
    #[serde(rename = "fileId")]
    pub file_id: String,
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default)]
    pub relevant_chunks_used: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub files_processed: Option<usize>,
}

/// Body the backend sends alongside any non-2xx status.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
