//! Client-side session for a PDF question-answering backend: the data
//! model, the upload/ask/display state machine, and the HTTP boundary to
//! the two backend endpoints.

pub mod api_client;
pub mod format;
pub mod models;
pub mod session;

pub use api_client::{ApiClient, QaApi};
pub use models::*;
pub use session::{QaSession, NOT_PDF_MESSAGE, QUESTION_FAILED_MESSAGE, UPLOAD_FAILED_MESSAGE};
