//! Overlay rendering
//!
//! One linear pipeline per call: open a fresh document from the template,
//! normalize each target page's origin to its crop box, draw the header
//! page (company, project, totals) and the tables page (materials and
//! services), then serialize. Any fatal condition aborts before bytes are
//! produced — there is no partial output.

use crate::budget::{Budget, LineItem, Totals};
use crate::calibration::{self, DebugOverlay};
use crate::coords::CoordinateConfig;
use crate::layout::{self, Column};
use crate::store::TemplateStore;
use crate::{OverlayError, Result};
use br_format::{format_currency, format_number, format_percent, format_text};
use pdf_core::{PdfDocument, PdfError, StdFont};

/// Body text size used for data fields and table rows
const BODY_SIZE: f32 = 10.0;
/// Size of the company legal name
const TITLE_SIZE: f32 = 12.0;
/// Baseline step between wrapped project-description lines
const PARAGRAPH_STEP: f64 = 12.0;

/// Renders one budget against one coordinate configuration
pub struct OverlayRenderer<'a> {
    coords: &'a CoordinateConfig,
    debug: &'a DebugOverlay,
}

impl<'a> OverlayRenderer<'a> {
    pub fn new(coords: &'a CoordinateConfig, debug: &'a DebugOverlay) -> Self {
        Self { coords, debug }
    }

    /// Render the budget onto a fresh template instance
    ///
    /// Fails fatally on an unreadable template, an out-of-range page index,
    /// or a serialization error. Missing payload fields are not errors:
    /// each drawing step substitutes a placeholder or skips its block.
    pub fn render(&self, store: &TemplateStore, budget: &Budget) -> Result<Vec<u8>> {
        let mut doc = store.fresh_document()?;
        let page_count = doc.page_count();

        let header_index = self.coords.get_usize("pageIndexes.headerTotais", 0);
        let tables_index = self.coords.get_usize("pageIndexes.tables", 6);
        let header_page = page_number(header_index, page_count)?;
        let tables_page = page_number(tables_index, page_count)?;

        self.render_header_page(&mut doc, header_page, budget)?;
        self.render_tables_page(&mut doc, tables_page, budget)?;

        doc.to_bytes().map_err(|e| match e {
            PdfError::SaveError(msg) => OverlayError::Serialization(msg),
            other => OverlayError::Pdf(other),
        })
    }

    /// Company block, project description, and totals
    fn render_header_page(
        &self,
        doc: &mut PdfDocument,
        page: usize,
        budget: &Budget,
    ) -> Result<()> {
        let crop = doc.crop_box(page)?;
        doc.translate_origin(page, -crop.llx, -crop.lly)?;

        if self.debug.grid_enabled {
            calibration::draw_grid(doc, page, &crop, self.debug.grid_step, self.debug.grid_major)?;
            calibration::draw_probes(doc, page, &self.coords.probes("probes.page1"))?;
        }

        let c = self.coords;
        let company = budget.company.as_ref();
        let x = c.get_f64("empresa.x", 60.0);

        layout::draw_line(
            doc,
            page,
            StdFont::HelveticaBold,
            TITLE_SIZE,
            x,
            c.get_f64("empresa.yRazao", 740.0),
            &format_text(company.and_then(|e| e.legal_name.as_deref())),
        )?;
        layout::draw_line(
            doc,
            page,
            StdFont::Helvetica,
            BODY_SIZE,
            x,
            c.get_f64("empresa.yCnpj", 725.0),
            &format_text(company.and_then(|e| e.tax_id.as_deref())),
        )?;
        layout::draw_line(
            doc,
            page,
            StdFont::Helvetica,
            BODY_SIZE,
            x,
            c.get_f64("empresa.yTel", 710.0),
            &format_text(company.and_then(|e| e.phone.as_deref())),
        )?;
        layout::draw_line(
            doc,
            page,
            StdFont::Helvetica,
            BODY_SIZE,
            x,
            c.get_f64("empresa.yEmail", 695.0),
            &format_text(company.and_then(|e| e.email.as_deref())),
        )?;

        let y_project = c.get_f64("obra.y", 665.0);
        layout::draw_line(
            doc,
            page,
            StdFont::HelveticaBold,
            BODY_SIZE,
            c.get_f64("obra.xLabel", 60.0),
            y_project,
            "Obra:",
        )?;
        layout::draw_paragraph(
            doc,
            page,
            StdFont::Helvetica,
            BODY_SIZE,
            c.get_f64("obra.xVal", 100.0),
            y_project,
            c.get_f64("obra.maxW", 460.0),
            budget.project_description.as_deref().unwrap_or(""),
            PARAGRAPH_STEP,
        )?;

        if let Some(totals) = &budget.totals {
            self.draw_totals(doc, page, totals)?;
        }

        Ok(())
    }

    /// Totals block: four regular lines plus the bold grand total
    fn draw_totals(&self, doc: &mut PdfDocument, page: usize, totals: &Totals) -> Result<()> {
        let c = self.coords;
        let x_label = c.get_f64("totais.xLabel", 420.0);
        let x_value = c.get_f64("totais.xVal", 560.0);
        let step = c.get_f64("totais.step", 16.0);
        let mut y = c.get_f64("totais.yTop", 200.0);

        let lines = [
            ("Subtotal", totals.subtotal.as_ref()),
            ("Desconto", totals.discount.as_ref()),
            ("Total Materiais", totals.materials_total.as_ref()),
            ("Total Serviços", totals.services_total.as_ref()),
        ];
        for (label, value) in lines {
            layout::draw_line(doc, page, StdFont::Helvetica, BODY_SIZE, x_label, y, label)?;
            layout::draw_line(
                doc,
                page,
                StdFont::HelveticaBold,
                BODY_SIZE,
                x_value,
                y,
                &format_currency(value),
            )?;
            y -= step;
        }

        layout::draw_line(
            doc,
            page,
            StdFont::HelveticaBold,
            BODY_SIZE,
            x_label,
            y,
            "TOTAL GERAL",
        )?;
        layout::draw_line(
            doc,
            page,
            StdFont::HelveticaBold,
            BODY_SIZE,
            x_value,
            y,
            &format_currency(totals.grand_total.as_ref()),
        )?;

        Ok(())
    }

    /// Material and service rows, each section with its own start and cutoff
    fn render_tables_page(
        &self,
        doc: &mut PdfDocument,
        page: usize,
        budget: &Budget,
    ) -> Result<()> {
        let crop = doc.crop_box(page)?;
        doc.translate_origin(page, -crop.llx, -crop.lly)?;

        if self.debug.grid_enabled {
            calibration::draw_grid(doc, page, &crop, self.debug.grid_step, self.debug.grid_major)?;
            calibration::draw_probes(doc, page, &self.coords.probes("probes.pageTables"))?;
        }

        let c = self.coords;
        let columns = self.item_columns();
        let row_step = c.get_f64("tabelas.materiais.rowStep", 16.0);

        if !budget.materials.is_empty() {
            let y_first = c.get_f64("tabelas.materiais.yFirst", 598.0);
            let y_min = c.get_f64("tabelas.materiais.yMin", 380.0);
            layout::draw_table_rows(
                doc,
                page,
                StdFont::Helvetica,
                BODY_SIZE,
                &columns,
                &budget.materials,
                y_first - row_step,
                row_step,
                y_min,
            )?;
        }

        if !budget.services.is_empty() {
            let y_first = c.get_f64("tabelas.servicos.yFirst", 328.0);
            let y_min = c.get_f64("tabelas.servicos.yMin", 190.0);
            layout::draw_table_rows(
                doc,
                page,
                StdFont::Helvetica,
                BODY_SIZE,
                &columns,
                &budget.services,
                y_first - row_step,
                row_step,
                y_min,
            )?;
        }

        Ok(())
    }

    /// Column layout shared by both table sections
    fn item_columns(&self) -> Vec<Column<LineItem>> {
        let c = self.coords;
        let desc_max = c.get_usize("tabelas.cols.descMaxChars", 40);

        vec![
            Column::new(c.get_f64("tabelas.cols.desc", 60.0), move |it: &LineItem| {
                layout::truncate_chars(&format_text(it.description.as_deref()), desc_max)
            }),
            Column::new(c.get_f64("tabelas.cols.comp", 300.0), |it: &LineItem| {
                format_text(it.composition.as_deref())
            }),
            Column::new(c.get_f64("tabelas.cols.un", 340.0), |it: &LineItem| {
                format_text(it.unit.as_deref())
            }),
            Column::new(c.get_f64("tabelas.cols.qtd", 380.0), |it: &LineItem| {
                format_number(it.quantity.as_ref())
            }),
            Column::new(c.get_f64("tabelas.cols.custo", 420.0), |it: &LineItem| {
                format_currency(it.unit_cost.as_ref())
            }),
            Column::new(c.get_f64("tabelas.cols.preco", 470.0), |it: &LineItem| {
                format_currency(it.sale_price.as_ref())
            }),
            Column::new(c.get_f64("tabelas.cols.descLim", 530.0), |it: &LineItem| {
                format_percent(it.discount_limit.as_ref())
            }),
            Column::new(c.get_f64("tabelas.cols.precoKg", 585.0), |it: &LineItem| {
                format_currency(it.price_per_kg.as_ref())
            }),
        ]
    }
}

/// Map a configured 0-based page index to a 1-indexed page number
fn page_number(index: usize, page_count: usize) -> Result<usize> {
    if index >= page_count {
        return Err(OverlayError::PageIndexOutOfRange { index, page_count });
    }
    Ok(index + 1)
}
