use crate::api_client::QaApi;
use crate::format;
use crate::models::{AnswerEntry, SelectedFile, UploadedFile};

/// Shown when the picked file does not declare itself as a PDF.
pub const NOT_PDF_MESSAGE: &str = "Please upload a PDF file only.";
/// Shown when the upload request fails, whatever the cause.
pub const UPLOAD_FAILED_MESSAGE: &str = "Failed to upload PDF. Please try again.";
/// Shown when the question request fails, whatever the cause.
pub const QUESTION_FAILED_MESSAGE: &str = "Failed to get answer. Please try again.";

/// State machine for the upload/ask/display workflow.
///
/// Owns the uploaded-file handle, the question input, the answer log, the
/// busy flags, and the single error slot. All network effects go through
/// the injected [`QaApi`] collaborator; everything else is local state.
pub struct QaSession<A: QaApi> {
    api: A,
    uploaded_file: Option<UploadedFile>,
    question: String,
    answers: Vec<AnswerEntry>,
    next_answer_id: u64,
    is_uploading: bool,
    is_asking: bool,
    error: Option<String>,
}

impl<A: QaApi> QaSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            uploaded_file: None,
            question: String::new(),
            answers: Vec::new(),
            next_answer_id: 1,
            is_uploading: false,
            is_asking: false,
            error: None,
        }
    }

    pub fn uploaded_file(&self) -> Option<&UploadedFile> {
        self.uploaded_file.as_ref()
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answers(&self) -> &[AnswerEntry] {
        &self.answers
    }

    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn is_asking(&self) -> bool {
        self.is_asking
    }

    /// The current error banner, if any. Holds only the latest message.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Trigger condition for the upload control.
    pub fn can_upload(&self) -> bool {
        !self.is_uploading
    }

    /// Trigger condition for the ask control: a file is present, the
    /// trimmed question is non-empty, and no question is already in flight.
    pub fn can_ask(&self) -> bool {
        self.uploaded_file.is_some() && !self.question.trim().is_empty() && !self.is_asking
    }

    pub fn set_question(&mut self, text: &str) {
        self.question = text.to_string();
    }

    /// Uploads a picked file. Anything that does not declare itself as a
    /// PDF is rejected without contacting the backend. A failed upload
    /// leaves any previously uploaded file untouched.
    pub async fn upload_file(&mut self, file: SelectedFile) {
        if file.media_type != "application/pdf" {
            self.error = Some(NOT_PDF_MESSAGE.to_string());
            return;
        }

        self.is_uploading = true;
        self.error = None;

        let result = self.api.upload_pdf(&file).await;
        self.is_uploading = false;

        match result {
            Ok(response) => {
                if let Some(count) = response.chunks_count {
                    log::info!("Backend split {} into {} chunks", file.name, count);
                }
                self.uploaded_file = Some(UploadedFile {
                    size: file.size(),
                    name: file.name,
                    id: response.file_id,
                });
            }
            Err(err) => {
                log::warn!("Upload error: {}", err);
                self.error = Some(UPLOAD_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Submits the current question. A no-op while the trimmed question is
    /// empty or no file is uploaded. On success the answer is appended to
    /// the log and the input is cleared; on failure the input survives so
    /// the user can retry.
    pub async fn submit_question(&mut self) {
        let question = self.question.trim().to_string();
        let file_id = match &self.uploaded_file {
            Some(file) if !question.is_empty() => file.id.clone(),
            _ => return,
        };

        self.is_asking = true;
        self.error = None;

        let result = self.api.ask_question(&file_id, &question).await;
        self.is_asking = false;

        match result {
            Ok(response) => {
                if let Some(used) = response.relevant_chunks_used {
                    log::info!("Answer drew on {} chunks", used);
                }
                self.answers.push(AnswerEntry {
                    id: self.next_answer_id,
                    question,
                    answer: response.answer,
                    timestamp: format::local_time_string(),
                });
                self.next_answer_id += 1;
                self.question.clear();
            }
            Err(err) => {
                log::warn!("Question error: {}", err);
                self.error = Some(QUESTION_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Forgets the uploaded file. Local only; the backend is not contacted.
    pub fn remove_file(&mut self) {
        self.uploaded_file = None;
    }

    /// Empties the answer log. Local only and irreversible.
    pub fn clear_answers(&mut self) {
        self.answers.clear();
    }
}
