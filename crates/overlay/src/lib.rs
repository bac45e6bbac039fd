//! Overlay Engine - coordinate-driven budget template rendering
//!
//! This crate fills a fixed-layout budget template PDF with structured
//! data. It provides:
//! - The budget payload model (company, project, line items, totals)
//! - Coordinate configuration with dotted-path lookup and hot reload
//! - Text layout (single lines, wrapped paragraphs, tabular rows)
//! - An optional calibration overlay (grid + probes) for coordinate work
//! - The render pipeline producing download-ready PDF bytes
//!
//! # Example
//!
//! ```ignore
//! use overlay::{RenderEngine, TemplateStore};
//!
//! let store = TemplateStore::load("templates/budget.pdf")?;
//! let engine = RenderEngine::with_coords_file(store, "templates/coords.json");
//! let pdf_bytes = engine.render(&budget)?;
//! ```

pub mod budget;
pub mod calibration;
pub mod coords;
pub mod layout;

mod engine;
mod renderer;
mod store;

pub use budget::{Budget, Company, LineItem, Totals};
pub use calibration::DebugOverlay;
pub use coords::{load_coordinate_config, CoordinateConfig, Probe};
pub use engine::RenderEngine;
pub use renderer::OverlayRenderer;
pub use store::TemplateStore;

use thiserror::Error;

/// Errors that can occur while rendering a budget document
///
/// A missing or corrupt coordinate file is not represented here: the config
/// loader falls back to built-in defaults so rendering never fails for that
/// reason alone.
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("Template unavailable: {0}")]
    TemplateUnavailable(String),

    #[error("Configured page index {index} out of range (template has {page_count} pages)")]
    PageIndexOutOfRange { index: usize, page_count: usize },

    #[error("Failed to serialize output document: {0}")]
    Serialization(String),

    #[error("PDF error: {0}")]
    Pdf(#[from] pdf_core::PdfError),
}

/// Result type for overlay operations
pub type Result<T> = std::result::Result<T, OverlayError>;
