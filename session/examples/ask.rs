use std::path::Path;

use qa_session::{ApiClient, QaApi, SelectedFile};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let base_url =
        std::env::var("PDFQA_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());
    let path = std::env::args().nth(1).unwrap_or_else(|| "sample.pdf".to_string());

    let client = ApiClient::new(&base_url);

    println!("📋 Health Check:");
    let health = client.health().await?;
    println!(
        "Status: {} ({} files processed)",
        health.status,
        health.files_processed.unwrap_or(0)
    );

    println!("\n📄 Uploading {}...", path);
    let file = SelectedFile::from_path(Path::new(&path))?;
    let uploaded = client.upload_pdf(&file).await?;
    println!("File id: {}", uploaded.file_id);

    println!("\n🔍 Asking a question...");
    let answer = client
        .ask_question(&uploaded.file_id, "What is this document about?")
        .await?;
    println!("Answer: {}", answer.answer);

    println!("\n✅ Done!");
    Ok(())
}
