//! Calibration overlay
//!
//! A coordinate grid and configured probe markers, drawn only when the
//! debug overlay is enabled. Used to discover template coordinates
//! visually; never affects the data layer's positions.

use crate::coords::Probe;
use crate::Result;
use pdf_core::{Color, PdfDocument, Rect, StdFont};

/// Debug overlay settings, passed explicitly into each render call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugOverlay {
    /// Draw the calibration grid and probes
    pub grid_enabled: bool,
    /// Minor grid line spacing in points
    pub grid_step: f64,
    /// Major (labeled) grid line spacing in points
    pub grid_major: f64,
}

impl Default for DebugOverlay {
    fn default() -> Self {
        Self {
            grid_enabled: false,
            grid_step: 10.0,
            grid_major: 100.0,
        }
    }
}

impl DebugOverlay {
    /// Read the overlay settings from the process environment
    ///
    /// `PDF_GRID=1` enables the grid; `PDF_GRID_STEP` and `PDF_GRID_MAJOR`
    /// override the spacings.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            grid_enabled: std::env::var("PDF_GRID").map(|v| v == "1").unwrap_or(false),
            grid_step: env_f64("PDF_GRID_STEP", defaults.grid_step),
            grid_major: env_f64("PDF_GRID_MAJOR", defaults.grid_major),
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .filter(|v| *v > 0.0)
        .unwrap_or(default)
}

const LABEL_SIZE: f32 = 7.0;
const PROBE_LABEL_SIZE: f32 = 8.0;

/// Draw the calibration grid over a page's crop area
///
/// Minor lines every `step`, major lines every `major` with integer
/// coordinate labels along both axes, then the axes themselves redrawn
/// heavier.
pub fn draw_grid(
    doc: &mut PdfDocument,
    page: usize,
    crop: &Rect,
    step: f64,
    major: f64,
) -> Result<()> {
    if step <= 0.0 {
        return Ok(());
    }

    let w = crop.width;
    let h = crop.height;
    let minor_color = Color::from_rgb(200, 200, 200);
    let major_color = Color::from_rgb(128, 128, 128);

    let mut x = 0.0;
    while x <= w + 0.1 {
        let is_major = on_major_line(x, major);
        let color = if is_major { major_color } else { minor_color };
        doc.stroke_line(page, (x, 0.0), (x, h), 0.25, color)?;
        if is_major {
            let label = format!("{}", x.round() as i64);
            doc.draw_text(page, StdFont::Helvetica, LABEL_SIZE, x + 2.0, 3.0, &label)?;
        }
        x += step;
    }

    let mut y = 0.0;
    while y <= h + 0.1 {
        let is_major = on_major_line(y, major);
        let color = if is_major { major_color } else { minor_color };
        doc.stroke_line(page, (0.0, y), (w, y), 0.25, color)?;
        if is_major {
            let label = format!("{}", y.round() as i64);
            doc.draw_text(page, StdFont::Helvetica, LABEL_SIZE, 2.0, y + 2.0, &label)?;
        }
        y += step;
    }

    // Axes emphasized
    let axis_color = Color::from_rgb(64, 64, 64);
    doc.stroke_line(page, (0.0, 0.0), (w, 0.0), 0.6, axis_color)?;
    doc.stroke_line(page, (0.0, 0.0), (0.0, h), 0.6, axis_color)?;

    Ok(())
}

/// Draw probe cross-hairs with their labels
pub fn draw_probes(doc: &mut PdfDocument, page: usize, probes: &[Probe]) -> Result<()> {
    let probe_color = Color::from_rgb(180, 0, 0);

    for probe in probes {
        doc.stroke_line(
            page,
            (probe.x - 4.0, probe.y),
            (probe.x + 4.0, probe.y),
            0.8,
            probe_color,
        )?;
        doc.stroke_line(
            page,
            (probe.x, probe.y - 4.0),
            (probe.x, probe.y + 4.0),
            0.8,
            probe_color,
        )?;
        doc.draw_text(
            page,
            StdFont::Helvetica,
            PROBE_LABEL_SIZE,
            probe.x + 6.0,
            probe.y + 2.0,
            &probe.label_or_coords(),
        )?;
    }

    Ok(())
}

fn on_major_line(v: f64, major: f64) -> bool {
    let major = major.round() as i64;
    major != 0 && (v.round() as i64) % major == 0
}
