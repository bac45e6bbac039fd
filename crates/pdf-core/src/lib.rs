//! PDF Core - Low-level PDF overlay primitives
//!
//! This crate provides functionality for:
//! - Opening a template document from bytes and saving the mutated result
//! - Drawing text with the PDF standard-14 Helvetica faces
//! - Stroking calibration lines and translating the page origin
//! - Measuring text via built-in AFM width tables
//!
//! # Example
//!
//! ```ignore
//! use pdf_core::{PdfDocument, StdFont};
//!
//! let mut doc = PdfDocument::open_from_bytes(&template_bytes)?;
//! doc.draw_text(1, StdFont::Helvetica, 10.0, 60.0, 740.0, "Hello")?;
//! let out = doc.to_bytes()?;
//! ```

mod content;
mod document;
mod font;

pub use content::{line_ops, text_ops, translate_ops, Color};
pub use document::{PdfDocument, Rect};
pub use font::{win_ansi_byte, StdFont};

use thiserror::Error;

/// Errors that can occur during PDF operations
#[derive(Debug, Error)]
pub enum PdfError {
    #[error("Failed to open PDF: {0}")]
    OpenError(String),

    #[error("Failed to save PDF: {0}")]
    SaveError(String),

    #[error("Invalid page number: {0} (document has {1} pages)")]
    InvalidPage(usize, usize),

    #[error("PDF parsing error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Lopdf error: {0}")]
    LopdfError(#[from] lopdf::Error),
}

/// Result type for PDF operations
pub type Result<T> = std::result::Result<T, PdfError>;
