//! Gzip + base64 packaging of bootstrap scripts for inline embedding.

use std::io::Write;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::Compression;
use flate2::write::GzEncoder;

use crate::domain::AppError;

/// Normalize line endings, gzip, then base64-encode a script.
///
/// The gzip header carries no timestamp, so identical input always yields
/// identical output.
pub fn base64_custom_script_from_bytes(script: &[u8]) -> Result<String, AppError> {
    let normalized = normalize_line_endings(script);
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&normalized)?;
    let compressed = encoder.finish()?;
    Ok(STANDARD.encode(compressed))
}

pub fn base64_custom_script_from_str(script: &str) -> Result<String, AppError> {
    base64_custom_script_from_bytes(script.as_bytes())
}

/// `\r\n` becomes `\n`; lone `\r` bytes are kept.
fn normalize_line_endings(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();
    while let Some(byte) = iter.next() {
        if byte == b'\r' && iter.peek() == Some(&b'\n') {
            continue;
        }
        out.push(byte);
    }
    out
}

/// Cloud-init `write_files` entry for a packaged file.
pub fn write_files_entry(packaged: &str, destination_path: &str, destination_file: &str) -> String {
    [
        format!("- path: {}/{}", destination_path, destination_file),
        "  permissions: \"0644\"".to_string(),
        "  encoding: gzip".to_string(),
        "  owner: \"root\"".to_string(),
        "  content: !!binary |".to_string(),
        format!("    {}\n\n", packaged),
    ]
    .join("\n")
}
