// Fixtures and test doubles shared by extraction, pipeline, bot and router tests.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use docx_rs::{Docx, Paragraph, Run};

use crate::bot::activity::Activity;
use crate::bot::connector::{ActivitySender, BotError};
use crate::config::{Config, UploadRetention};
use crate::llm_client::{CompletionClient, LlmError};
use crate::matching::uploads::UploadStore;
use crate::state::AppState;

pub const BOUNDARY: &str = "cv-matcher-test-boundary";

/// Builds a one-page PDF showing `text` in Helvetica, with a byte-accurate xref table.
/// `text` must not contain parentheses or backslashes.
pub fn minimal_pdf(text: &str) -> Vec<u8> {
    let content = format!("BT /F1 12 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}\nendstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }

    let xref_offset = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.extend_from_slice(xref.as_bytes());
    pdf.extend_from_slice(
        format!(
            "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_offset}\n%%EOF\n",
            objects.len() + 1
        )
        .as_bytes(),
    );
    pdf
}

/// Builds a DOCX with one paragraph per entry.
pub fn docx_bytes(paragraphs: &[&str]) -> Vec<u8> {
    let docx = paragraphs.iter().fold(Docx::new(), |docx, text| {
        docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)))
    });
    let mut cursor = Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// One part of a multipart/form-data body.
pub struct Part<'a> {
    name: &'a str,
    file_name: Option<&'a str>,
    data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, file_name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            data: value.as_bytes(),
        }
    }
}

/// Encodes `parts` as a multipart/form-data body delimited by `BOUNDARY`.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part.file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{file_name}\"\r\n\
                     Content-Type: application/octet-stream\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"\r\n\r\n",
                    part.name
                )
                .as_bytes(),
            ),
        }
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Completion backend that answers every prompt with the same text and counts calls.
pub struct CountingLlm {
    reply: String,
    calls: AtomicUsize,
}

impl CountingLlm {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for CountingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

/// Bot sender that records delivered texts; the first `failures` sends fail.
#[derive(Default)]
pub struct RecordingSender {
    sent: Mutex<Vec<String>>,
    failures: AtomicUsize,
}

impl RecordingSender {
    pub fn failing_first(failures: usize) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failures: AtomicUsize::new(failures),
        }
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActivitySender for RecordingSender {
    async fn send_reply(&self, _incoming: &Activity, text: &str) -> Result<(), BotError> {
        let remaining = self.failures.load(Ordering::SeqCst);
        if remaining > 0 {
            self.failures.store(remaining - 1, Ordering::SeqCst);
            return Err(BotError::Api {
                status: 502,
                message: "connector unavailable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub fn test_config(upload_dir: &Path) -> Config {
    Config {
        openai_api_key: "sk-test".to_string(),
        openai_base_url: "http://127.0.0.1:9/v1".to_string(),
        llm_timeout_secs: 5,
        port: 0,
        upload_dir: PathBuf::from(upload_dir),
        upload_retention: UploadRetention::Retain,
        max_upload_bytes: 5 * 1024 * 1024,
        microsoft_app_id: None,
        microsoft_app_password: None,
        rust_log: "debug".to_string(),
    }
}

pub fn test_state(llm: Arc<CountingLlm>, upload_dir: &Path) -> AppState {
    test_state_with_sender(llm, Arc::new(RecordingSender::default()), upload_dir)
}

pub fn test_state_with_sender(
    llm: Arc<CountingLlm>,
    sender: Arc<RecordingSender>,
    upload_dir: &Path,
) -> AppState {
    let config = test_config(upload_dir);
    let uploads = UploadStore::open(&config.upload_dir, config.upload_retention).unwrap();
    AppState {
        config,
        llm,
        uploads,
        bot: sender,
    }
}
