use std::io::Write;
use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use qa_session::format::format_file_size;
use qa_session::{AnswerEntry, ApiClient, QaSession, SelectedFile};

/// Terminal front end for the PDF question-answering backend.
#[derive(Parser)]
#[command(name = "pdf-qa", version, about = "Upload a PDF and ask questions about its content")]
struct Args {
    /// Base URL of the question-answering backend
    #[arg(long, env = "PDFQA_BASE_URL", default_value = "http://127.0.0.1:5000")]
    base_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let args = Args::parse();
    let api = ApiClient::new(&args.base_url);
    let mut session = QaSession::new(api.clone());

    println!("PDF Q&A Assistant");
    println!("Upload a PDF and ask questions about its content.\n");
    print_usage();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "upload" => handle_upload(&mut session, rest).await,
            "ask" => handle_ask(&mut session, rest).await,
            "file" => print_file(&session),
            "remove" => {
                session.remove_file();
                println!("File removed.");
            }
            "answers" => print_answers(&session),
            "clear" => {
                session.clear_answers();
                println!("Answer log cleared.");
            }
            "status" => handle_status(&api).await,
            "help" => print_usage(),
            "quit" | "exit" => break,
            other => println!("Unknown command '{}'. Type 'help' for the command list.", other),
        }
    }

    Ok(())
}

async fn handle_upload(session: &mut QaSession<ApiClient>, path: &str) {
    if path.is_empty() {
        println!("Usage: upload <path-to-pdf>");
        return;
    }
    if !session.can_upload() {
        println!("An upload is already in progress.");
        return;
    }

    // a missing or unreadable path never reaches the session
    let file = match SelectedFile::from_path(Path::new(path)) {
        Ok(file) => file,
        Err(err) => {
            println!("Could not read {}: {}", path, err);
            return;
        }
    };

    println!("Uploading {}...", file.name);
    session.upload_file(file).await;

    if let Some(message) = session.error() {
        print_banner(message);
    } else {
        print_file(session);
    }
}

async fn handle_ask(session: &mut QaSession<ApiClient>, text: &str) {
    if !text.is_empty() {
        session.set_question(text);
    }
    if session.uploaded_file().is_none() {
        println!("Upload a PDF before asking questions.");
        return;
    }
    if !session.can_ask() {
        println!("Type a question first: ask <question>");
        return;
    }

    println!("Getting answer...");
    session.submit_question().await;

    match session.error() {
        Some(message) => {
            print_banner(message);
            println!("Your question is kept; plain 'ask' retries it.");
        }
        None => {
            if let Some(entry) = session.answers().last() {
                print_entry(entry);
            }
        }
    }
}

async fn handle_status(api: &ApiClient) {
    match api.health().await {
        Ok(health) => println!(
            "Backend is {} ({} files processed).",
            health.status,
            health.files_processed.unwrap_or(0)
        ),
        Err(err) => {
            log::warn!("Health check error: {}", err);
            println!("Backend is unreachable.");
        }
    }
}

fn print_banner(message: &str) {
    println!("⚠ {}", message);
}

fn print_file(session: &QaSession<ApiClient>) {
    match session.uploaded_file() {
        Some(file) => println!("Current file: {} ({})", file.name, format_file_size(file.size)),
        None => println!("No file uploaded."),
    }
}

fn print_entry(entry: &AnswerEntry) {
    println!("Q: {} [{}]", entry.question, entry.timestamp);
    println!("A: {}", entry.answer);
}

fn print_answers(session: &QaSession<ApiClient>) {
    if session.answers().is_empty() {
        println!("No answers yet.");
        return;
    }
    for entry in session.answers() {
        print_entry(entry);
        println!();
    }
}

fn print_usage() {
    println!("Commands:");
    println!("  upload <path>   upload a PDF file");
    println!("  ask <question>  ask about the uploaded PDF");
    println!("  file            show the uploaded file");
    println!("  remove          forget the uploaded file");
    println!("  answers         show all questions and answers");
    println!("  clear           clear the answer log");
    println!("  status          check the backend");
    println!("  help            show this list");
    println!("  quit            exit");
}
