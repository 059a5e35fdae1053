//! Template asset store port definition.

use std::io;

use crate::domain::AppError;

/// Read-only lookup of raw template assets by logical name.
///
/// `Ok(None)` means the asset does not exist; any other read failure is an
/// error so it is never mistaken for a missing asset.
pub trait AssetStore: Send + Sync {
    /// Raw bytes of the named asset.
    fn get_bytes(&self, name: &str) -> Result<Option<Vec<u8>>, AppError>;

    /// Asset text; non-UTF-8 content is an `InvalidData` error.
    fn get(&self, name: &str) -> Result<Option<String>, AppError> {
        match self.get_bytes(name)? {
            None => Ok(None),
            Some(bytes) => String::from_utf8(bytes).map(Some).map_err(|e| {
                AppError::Io(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("asset '{}' is not valid UTF-8: {}", name, e),
                ))
            }),
        }
    }
}
