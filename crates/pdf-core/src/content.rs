//! Content stream operator builders

use crate::font::win_ansi_byte;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// Uniform gray (0.0 = black, 1.0 = white)
    pub fn gray(level: f32) -> Self {
        Self::rgb(level, level, level)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// Generate PDF operators for a single line of text
///
/// Creates the text operators (BT, rg, Tf, Td, Tj, ET) to render text at a
/// baseline position. Coordinates are in the page's current user space.
///
/// # Arguments
/// * `resource` - Font resource name (e.g., "F1")
/// * `size` - Font size in points
/// * `x` - X coordinate of the baseline start
/// * `y` - Y coordinate of the baseline
/// * `text` - Text to show, WinAnsi-encoded into a literal string
pub fn text_ops(resource: &str, size: f32, x: f64, y: f64, text: &str) -> Vec<u8> {
    let mut ops = Vec::new();

    ops.extend_from_slice(b"BT\n");
    ops.extend_from_slice(b"0 0 0 rg\n");
    ops.extend_from_slice(format!("/{resource} {size} Tf\n").as_bytes());
    ops.extend_from_slice(format!("{x} {y} Td\n").as_bytes());
    ops.push(b'(');
    ops.extend_from_slice(&escape_literal(text));
    ops.extend_from_slice(b") Tj\n");
    ops.extend_from_slice(b"ET\n");

    ops
}

/// Generate PDF operators for a stroked line segment
pub fn line_ops(from: (f64, f64), to: (f64, f64), width: f64, color: Color) -> Vec<u8> {
    let mut ops = String::new();
    ops.push_str(&format!("{} {} {} RG\n", color.r, color.g, color.b));
    ops.push_str(&format!("{width} w\n"));
    ops.push_str(&format!("{} {} m\n", from.0, from.1));
    ops.push_str(&format!("{} {} l\n", to.0, to.1));
    ops.push_str("S\n");
    ops.into_bytes()
}

/// Generate a translation of the current transformation matrix
///
/// Emitted once at the start of a page's appended content to move the
/// drawing origin (crop-box normalization).
pub fn translate_ops(dx: f64, dy: f64) -> Vec<u8> {
    format!("1 0 0 1 {dx} {dy} cm\n").into_bytes()
}

/// Encode text as a WinAnsi PDF literal string body
///
/// Delimiters and the backslash are escaped; bytes outside printable ASCII
/// are written as octal escapes. Characters WinAnsi cannot represent become
/// `?`.
fn escape_literal(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(text.len());
    for c in text.chars() {
        let byte = win_ansi_byte(c).unwrap_or(b'?');
        match byte {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(byte);
            }
            0x20..=0x7E => out.push(byte),
            _ => out.extend_from_slice(format!("\\{byte:03o}").as_bytes()),
        }
    }
    out
}
