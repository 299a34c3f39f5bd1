//! Stored record rendering.
//!
//! A submission becomes one markdown file under `data/`, named after the
//! submission's unix-millisecond timestamp.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};

use crate::types::submission::{StoredRecord, SubmissionPayload};

/// Repository directory holding submitted records.
pub const RECORD_DIR: &str = "data";

/// Repository path for a submission made at `timestamp_millis`.
pub fn record_path(timestamp_millis: u128) -> String {
    format!("{}/{}.md", RECORD_DIR, timestamp_millis)
}

/// Renders the markdown body: user-agent heading, declared-OS subheading
/// (empty when absent), a blank line, then one ` 1. <full name>` line per
/// font. No trailing newline.
pub fn render_document(payload: &SubmissionPayload) -> String {
    let mut doc = format!(
        "# {}\n## {}\n\n",
        payload.user_agent(),
        payload.declared_os().unwrap_or("")
    );
    let lines: Vec<String> = payload
        .fonts()
        .iter()
        .map(|font| format!(" 1. {}", font.full_name))
        .collect();
    doc.push_str(&lines.join("\n"));
    doc
}

/// Base64 (standard alphabet, padded) as the contents API expects.
pub fn encode_content(document: &str) -> String {
    BASE64.encode(document.as_bytes())
}

/// Builds the record for `payload` submitted at `timestamp_millis`.
pub fn build_record(payload: &SubmissionPayload, timestamp_millis: u128) -> StoredRecord {
    StoredRecord {
        path: record_path(timestamp_millis),
        content: render_document(payload),
    }
}
