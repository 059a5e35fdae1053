use std::fs;
use std::path::Path;

use crate::domain::AppError;
use crate::domain::custom_script::base64_custom_script_from_bytes;

/// Package a script file for inline embedding.
///
/// The file is read as raw bytes; only `\r\n` line endings are rewritten.
pub fn execute(path: &Path) -> Result<String, AppError> {
    let script = fs::read(path)?;
    base64_custom_script_from_bytes(&script)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use flate2::read::GzDecoder;
    use std::io::Read;
    use tempfile::TempDir;

    #[test]
    fn latin1_script_file_is_packaged() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("legacy.sh");
        fs::write(&path, b"echo caf\xe9\r\n").unwrap();

        let packaged = execute(&path).unwrap();
        let mut out = Vec::new();
        GzDecoder::new(STANDARD.decode(packaged).unwrap().as_slice()).read_to_end(&mut out).unwrap();
        assert_eq!(out, b"echo caf\xe9\n");
    }
}
