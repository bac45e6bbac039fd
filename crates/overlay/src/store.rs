//! Template document store

use crate::{OverlayError, Result};
use pdf_core::PdfDocument;
use std::path::Path;

/// Immutable template bytes, loaded once per process
///
/// Each render call opens its own mutable document from the shared bytes;
/// document instances are never shared across calls.
pub struct TemplateStore {
    bytes: Vec<u8>,
}

impl TemplateStore {
    /// Load the template from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|e| {
            OverlayError::TemplateUnavailable(format!("{}: {e}", path.display()))
        })?;
        Ok(Self { bytes })
    }

    /// Wrap already-loaded template bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Open a fresh mutable document instance from the template bytes
    pub fn fresh_document(&self) -> Result<PdfDocument> {
        PdfDocument::open_from_bytes(&self.bytes)
            .map_err(|e| OverlayError::TemplateUnavailable(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_file_is_fatal() {
        let result = TemplateStore::load("/definitely/not/here/template.pdf");
        assert!(matches!(result, Err(OverlayError::TemplateUnavailable(_))));
    }

    #[test]
    fn test_corrupt_bytes_fail_on_open() {
        let store = TemplateStore::from_bytes(b"not a pdf".to_vec());
        assert!(matches!(
            store.fresh_document(),
            Err(OverlayError::TemplateUnavailable(_))
        ));
    }
}
