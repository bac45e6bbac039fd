//! Text layout
//!
//! Single-line placement, paragraph word-wrap under a maximum rendered
//! width, and tabular row emission with a vertical cutoff. All widths are
//! measured with the font's advance tables scaled by size, so wrap points
//! match what the page actually shows.

use crate::Result;
use br_format::PLACEHOLDER;
use pdf_core::{PdfDocument, StdFont};

/// Draw a single line of text with its baseline at (x, y)
///
/// Placeholder substitution for absent values is the caller's job.
pub fn draw_line(
    doc: &mut PdfDocument,
    page: usize,
    font: StdFont,
    size: f32,
    x: f64,
    y: f64,
    text: &str,
) -> Result<()> {
    doc.draw_text(page, font, size, x, y, text)?;
    Ok(())
}

/// Greedy word wrap under a maximum rendered width
///
/// Words accumulate into a line while the candidate line's width stays
/// within `max_width`; an overflowing word starts the next line. A single
/// word wider than `max_width` is placed on its own line unmodified —
/// words are never split. Blank text yields one placeholder line.
pub fn wrap_words(font: StdFont, size: f32, max_width: f64, text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };

        if font.text_width(&candidate, size) <= max_width {
            line = candidate;
        } else {
            if !line.is_empty() {
                lines.push(line);
            }
            line = word.to_string();
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    if lines.is_empty() {
        lines.push(PLACEHOLDER.to_string());
    }

    lines
}

/// Draw a wrapped paragraph
///
/// Each flushed line steps the baseline down by `line_step`.
#[allow(clippy::too_many_arguments)]
pub fn draw_paragraph(
    doc: &mut PdfDocument,
    page: usize,
    font: StdFont,
    size: f32,
    x: f64,
    y: f64,
    max_width: f64,
    text: &str,
    line_step: f64,
) -> Result<()> {
    let mut cursor_y = y;
    for line in wrap_words(font, size, max_width, text) {
        doc.draw_text(page, font, size, x, cursor_y, &line)?;
        cursor_y -= line_step;
    }
    Ok(())
}

/// A table column: an x position plus the cell-value mapping for a row
pub struct Column<T> {
    pub x: f64,
    map: Box<dyn Fn(&T) -> String>,
}

impl<T> Column<T> {
    pub fn new(x: f64, map: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            x,
            map: Box::new(map),
        }
    }

    /// Produce the formatted cell value for a row
    pub fn value(&self, row: &T) -> String {
        (self.map)(row)
    }
}

/// Draw table rows, stopping before any row would cross the cutoff
///
/// For each row in order: if the row's baseline would fall below
/// `y_cutoff`, stop — overflow rows are silently dropped, never moved to
/// another page. Otherwise draw one cell per column at that column's x and
/// step the baseline down by `row_step`.
///
/// Returns the number of rows drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw_table_rows<T>(
    doc: &mut PdfDocument,
    page: usize,
    font: StdFont,
    size: f32,
    columns: &[Column<T>],
    rows: &[T],
    start_y: f64,
    row_step: f64,
    y_cutoff: f64,
) -> Result<usize> {
    let mut y = start_y;
    let mut drawn = 0;

    for row in rows {
        if y < y_cutoff {
            break;
        }
        for column in columns {
            doc.draw_text(page, font, size, column.x, y, &column.value(row))?;
        }
        y -= row_step;
        drawn += 1;
    }

    Ok(drawn)
}

/// Truncate to a maximum character count, no ellipsis
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FONT: StdFont = StdFont::Helvetica;
    const SIZE: f32 = 10.0;

    #[test]
    fn test_wrap_single_short_line() {
        let lines = wrap_words(FONT, SIZE, 460.0, "Reforma do telhado");
        assert_eq!(lines, vec!["Reforma do telhado"]);
    }

    #[test]
    fn test_wrap_lines_stay_within_max_width() {
        let text = "Fornecimento e montagem de estrutura metálica para cobertura \
                    incluindo tratamento anticorrosivo e pintura de acabamento";
        let max_width = 180.0;
        let lines = wrap_words(FONT, SIZE, max_width, text);

        assert!(lines.len() > 1);
        for line in &lines {
            assert!(
                FONT.text_width(line, SIZE) <= max_width,
                "line too wide: {line}"
            );
        }
    }

    #[test]
    fn test_wrap_preserves_all_words() {
        let text = "um dois tres quatro cinco seis sete oito nove dez";
        let lines = wrap_words(FONT, SIZE, 80.0, text);
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_wrap_oversized_word_on_own_line() {
        let text = "antes Pneumoultramicroscopicossilicovulcanoconiótico depois";
        let lines = wrap_words(FONT, SIZE, 60.0, text);

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "antes");
        assert_eq!(lines[1], "Pneumoultramicroscopicossilicovulcanoconiótico");
        assert_eq!(lines[2], "depois");
        // The wide word is the only line allowed to exceed the max
        assert!(FONT.text_width(&lines[1], SIZE) > 60.0);
    }

    #[test]
    fn test_wrap_blank_yields_placeholder() {
        assert_eq!(wrap_words(FONT, SIZE, 460.0, ""), vec!["-"]);
        assert_eq!(wrap_words(FONT, SIZE, 460.0, "   "), vec!["-"]);
    }

    #[test]
    fn test_wrap_collapses_whitespace_runs() {
        let lines = wrap_words(FONT, SIZE, 460.0, "a   b\t c");
        assert_eq!(lines, vec!["a b c"]);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 5), "");
    }

    #[test]
    fn test_truncate_chars_multibyte_boundary() {
        assert_eq!(truncate_chars("çãéíõ", 3), "çãé");
    }

    #[test]
    fn test_column_value() {
        let column: Column<&str> = Column::new(60.0, |row: &&str| row.to_uppercase());
        assert_eq!(column.x, 60.0);
        assert_eq!(column.value(&"abc"), "ABC");
    }
}
