//! PDF Document wrapper

use crate::content::{line_ops, text_ops, translate_ops, Color};
use crate::font::StdFont;
use crate::{PdfError, Result};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;

/// A page rectangle (crop box or media box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Lower-left x
    pub llx: f64,
    /// Lower-left y
    pub lly: f64,
    pub width: f64,
    pub height: f64,
}

/// PDF Document wrapper providing high-level overlay operations
///
/// Drawing calls buffer content operators per page; the buffers are flushed
/// into the document when it is serialized. Existing page content is wrapped
/// in `q`/`Q` at that point so template graphics state never leaks into the
/// overlay. Coordinates are PDF-native (origin bottom-left); callers that
/// want crop-box-relative coordinates emit a translation first via
/// [`PdfDocument::translate_origin`].
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// Buffered content operators per page (page number -> operators)
    page_ops: BTreeMap<usize, Vec<u8>>,
    /// Font resources used per page (page number -> font -> resource name)
    page_fonts: BTreeMap<usize, BTreeMap<StdFont, String>>,
    /// Next font resource number
    next_font_resource: u32,
}

impl PdfDocument {
    /// Open a PDF document from bytes
    ///
    /// # Arguments
    /// * `data` - PDF file bytes
    pub fn open_from_bytes(data: &[u8]) -> Result<Self> {
        let inner = Document::load_mem(data).map_err(|e| PdfError::OpenError(e.to_string()))?;

        Ok(Self {
            inner,
            page_ops: BTreeMap::new(),
            page_fonts: BTreeMap::new(),
            next_font_resource: 1,
        })
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.inner.get_pages().len()
    }

    /// Resolve a 1-indexed page number to its object id
    fn page_id(&self, page: usize) -> Result<ObjectId> {
        let pages = self.inner.get_pages();
        pages
            .get(&(page as u32))
            .copied()
            .ok_or(PdfError::InvalidPage(page, pages.len()))
    }

    /// Get the page's crop box, falling back to the media box
    ///
    /// Follows the Parent inheritance chain; defaults to A4 when neither
    /// box is present anywhere in the chain.
    pub fn crop_box(&self, page: usize) -> Result<Rect> {
        let page_id = self.page_id(page)?;
        let mut current_id = page_id;

        // Follow parent chain up to 10 levels (safety limit)
        for _ in 0..10 {
            let obj = self.inner.get_object(current_id)?;
            let dict = obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Object is not a dictionary".to_string()))?;

            if let Ok(rect) = dict.get(b"CropBox").or_else(|_| dict.get(b"MediaBox")) {
                let array = match rect {
                    Object::Array(arr) => arr.clone(),
                    Object::Reference(ref_id) => {
                        let referred = self.inner.get_object(*ref_id)?;
                        referred
                            .as_array()
                            .map_err(|_| {
                                PdfError::ParseError(
                                    "Page box reference is not an array".to_string(),
                                )
                            })?
                            .clone()
                    }
                    _ => {
                        return Err(PdfError::ParseError(
                            "Page box is not an array".to_string(),
                        ))
                    }
                };
                return rect_from_array(&array);
            }

            if let Ok(Object::Reference(parent_id)) = dict.get(b"Parent") {
                current_id = *parent_id;
                continue;
            }

            break;
        }

        // Fallback: assume A4 page size
        Ok(Rect {
            llx: 0.0,
            lly: 0.0,
            width: 595.28,
            height: 841.89,
        })
    }

    /// Translate the page's drawing origin
    ///
    /// Buffered ahead of subsequent drawing calls for the same page, so it
    /// must be the first call made against a page.
    pub fn translate_origin(&mut self, page: usize, dx: f64, dy: f64) -> Result<()> {
        self.page_id(page)?;
        self.buffer(page, &translate_ops(dx, dy));
        Ok(())
    }

    /// Draw a single line of text with its baseline at (x, y)
    ///
    /// # Arguments
    /// * `page` - Page number (1-indexed)
    /// * `font` - Standard-14 face
    /// * `size` - Font size in points
    /// * `x` - Baseline start x
    /// * `y` - Baseline y
    /// * `text` - Text to draw; empty text is a no-op
    pub fn draw_text(
        &mut self,
        page: usize,
        font: StdFont,
        size: f32,
        x: f64,
        y: f64,
        text: &str,
    ) -> Result<()> {
        self.page_id(page)?;

        if text.is_empty() {
            return Ok(());
        }

        let resource = self.font_resource(page, font);
        let ops = text_ops(&resource, size, x, y, text);
        self.buffer(page, &ops);
        Ok(())
    }

    /// Stroke a line segment
    pub fn stroke_line(
        &mut self,
        page: usize,
        from: (f64, f64),
        to: (f64, f64),
        width: f64,
        color: Color,
    ) -> Result<()> {
        self.page_id(page)?;
        self.buffer(page, &line_ops(from, to, width, color));
        Ok(())
    }

    /// Serialize the document, flushing all buffered overlay content
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.flush_pages()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    /// Get or create the font resource name for a page
    fn font_resource(&mut self, page: usize, font: StdFont) -> String {
        let fonts = self.page_fonts.entry(page).or_default();
        if let Some(name) = fonts.get(&font) {
            return name.clone();
        }

        let name = format!("F{}", self.next_font_resource);
        self.next_font_resource += 1;
        fonts.insert(font, name.clone());
        name
    }

    /// Flush buffered operators and font resources into the document
    fn flush_pages(&mut self) -> Result<()> {
        let buffers: Vec<(usize, Vec<u8>)> = std::mem::take(&mut self.page_ops).into_iter().collect();
        for (page, ops) in buffers {
            if !ops.is_empty() {
                self.append_to_content_stream(page, &ops)?;
            }
        }

        let page_fonts = std::mem::take(&mut self.page_fonts);
        let mut font_ids: BTreeMap<StdFont, ObjectId> = BTreeMap::new();
        for (page, fonts) in page_fonts {
            let mut entries = Vec::new();
            for (font, resource) in fonts {
                let font_id = *font_ids.entry(font).or_insert_with(|| {
                    self.inner.add_object(dictionary! {
                        "Type" => "Font",
                        "Subtype" => "Type1",
                        "BaseFont" => font.base_font(),
                        "Encoding" => "WinAnsiEncoding",
                    })
                });
                entries.push((resource, font_id));
            }
            self.add_fonts_to_page_resources(page, &entries)?;
        }

        Ok(())
    }

    /// Append overlay content to a page's content stream
    ///
    /// The page's existing content is wrapped in `q`/`Q` so its graphics
    /// state does not leak into the appended operators.
    fn append_to_content_stream(&mut self, page: usize, content: &[u8]) -> Result<()> {
        let page_id = self.page_id(page)?;

        let (existing_content, page_dict_clone) = {
            let page_obj = self.inner.get_object(page_id)?;
            let page_dict = page_obj
                .as_dict()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;

            let page_dict_clone = page_dict.clone();

            let existing_content = match page_dict.get(b"Contents") {
                Ok(contents) => match contents {
                    Object::Stream(stream) => stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone()),
                    Object::Reference(ref_id) => {
                        if let Ok(Object::Stream(stream)) = self.inner.get_object(*ref_id) {
                            stream
                                .decompressed_content()
                                .unwrap_or_else(|_| stream.content.clone())
                        } else {
                            Vec::new()
                        }
                    }
                    Object::Array(arr) => {
                        let mut combined = Vec::new();
                        for obj in arr {
                            match obj {
                                Object::Reference(ref_id) => {
                                    if let Ok(Object::Stream(stream)) =
                                        self.inner.get_object(*ref_id)
                                    {
                                        let data = stream
                                            .decompressed_content()
                                            .unwrap_or_else(|_| stream.content.clone());
                                        combined.extend_from_slice(&data);
                                    }
                                }
                                Object::Stream(stream) => {
                                    let data = stream
                                        .decompressed_content()
                                        .unwrap_or_else(|_| stream.content.clone());
                                    combined.extend_from_slice(&data);
                                }
                                _ => {}
                            }
                        }
                        combined
                    }
                    _ => Vec::new(),
                },
                Err(_) => Vec::new(),
            };

            (existing_content, page_dict_clone)
        };

        let mut new_content = Vec::with_capacity(existing_content.len() + content.len() + 6);
        if existing_content.is_empty() {
            new_content.extend_from_slice(content);
        } else {
            new_content.extend_from_slice(b"q\n");
            new_content.extend_from_slice(&existing_content);
            new_content.extend_from_slice(b"\nQ\n");
            new_content.extend_from_slice(content);
        }

        let new_stream = Stream::new(Dictionary::new(), new_content);
        let stream_id = self.inner.add_object(new_stream);

        let mut new_page_dict = page_dict_clone;
        new_page_dict.set(b"Contents", Object::Reference(stream_id));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Add font references to a page's Resources dictionary
    fn add_fonts_to_page_resources(
        &mut self,
        page: usize,
        fonts: &[(String, ObjectId)],
    ) -> Result<()> {
        let page_id = self.page_id(page)?;

        let page_obj = self.inner.get_object(page_id)?;
        let page_dict = page_obj
            .as_dict()
            .map_err(|_| PdfError::SaveError("Page object is not a dictionary".to_string()))?;

        let mut resources_dict = match page_dict.get(b"Resources") {
            Ok(resources) => match resources.as_dict() {
                Ok(dict) => dict.clone(),
                Err(_) => Dictionary::new(),
            },
            Err(_) => Dictionary::new(),
        };

        let mut font_dict = match resources_dict.get(b"Font") {
            Ok(font) => match font.as_dict() {
                Ok(dict) => dict.clone(),
                Err(_) => Dictionary::new(),
            },
            Err(_) => Dictionary::new(),
        };

        for (resource, font_id) in fonts {
            font_dict.set(resource.as_bytes(), Object::Reference(*font_id));
        }

        resources_dict.set(b"Font", Object::Dictionary(font_dict));

        let mut new_page_dict = page_dict.clone();
        new_page_dict.set(b"Resources", Object::Dictionary(resources_dict));
        self.inner.objects.insert(page_id, new_page_dict.into());

        Ok(())
    }

    /// Buffer content operators for a page (written at serialization time)
    fn buffer(&mut self, page: usize, content: &[u8]) {
        self.page_ops
            .entry(page)
            .or_default()
            .extend_from_slice(content);
    }

    /// Get a reference to the underlying lopdf document
    pub fn inner(&self) -> &Document {
        &self.inner
    }
}

/// Build a [`Rect`] from a PDF rectangle array
fn rect_from_array(array: &[Object]) -> Result<Rect> {
    if array.len() < 4 {
        return Err(PdfError::ParseError("Invalid page box format".to_string()));
    }

    let mut nums = [0.0f64; 4];
    for (i, num) in nums.iter_mut().enumerate() {
        *num = object_number(&array[i])
            .ok_or_else(|| PdfError::ParseError("Invalid page box entry".to_string()))?;
    }

    // Rectangle corners may be given in any order
    let llx = nums[0].min(nums[2]);
    let lly = nums[1].min(nums[3]);
    Ok(Rect {
        llx,
        lly,
        width: (nums[2] - nums[0]).abs(),
        height: (nums[3] - nums[1]).abs(),
    })
}

/// Extract a numeric value from a PDF object
fn object_number(obj: &Object) -> Option<f64> {
    obj.as_f32()
        .map(|v| v as f64)
        .ok()
        .or_else(|| obj.as_i64().ok().map(|v| v as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_array() {
        let array = vec![
            Object::Integer(10),
            Object::Real(5.0),
            Object::Real(605.0),
            Object::Integer(847),
        ];
        let rect = rect_from_array(&array).unwrap();
        assert_eq!(rect.llx, 10.0);
        assert_eq!(rect.lly, 5.0);
        assert_eq!(rect.width, 595.0);
        assert_eq!(rect.height, 842.0);
    }

    #[test]
    fn test_rect_from_array_short() {
        let array = vec![Object::Integer(0)];
        assert!(rect_from_array(&array).is_err());
    }
}
