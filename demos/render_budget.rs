//! End-to-end render demo using a synthetic template
//! Run with: cargo run --example render_budget
//!
//! Builds a blank 7-page A4 template in memory, renders a sample budget
//! onto it, and writes the result (plus a grid-calibrated variant) to
//! output/. Set PDF_GRID=1 to enable the calibration overlay on the
//! first render too.

use lopdf::dictionary;
use overlay::{Budget, CoordinateConfig, DebugOverlay, RenderEngine, TemplateStore};
use std::fs;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Budget Render Demo ===\n");

    fs::create_dir_all("output")?;

    // Step 1: Synthetic 7-page template (header page 0, tables page 6)
    let template = blank_template(7);
    println!("1. Template: {} bytes, 7 pages", template.len());

    // Step 2: Sample payload, Portuguese field names
    let budget: Budget = serde_json::from_str(
        r#"{
            "empresa": {
                "razaoSocial": "Stongel Esquadrias Ltda",
                "cnpj": "12.345.678/0001-90",
                "telefone": "(51) 99999-0000",
                "email": "contato@stongel.com.br"
            },
            "obra": "Residência unifamiliar, Rua das Flores 123 - fornecimento e montagem de esquadrias de alumínio",
            "materiais": [
                { "descricao": "Perfil de alumínio anodizado", "comp": "A", "unidade": "kg",
                  "quantidade": "12.5", "custo": "38.90", "precoVenda": "55.00",
                  "limiteDesconto": "5", "precoKg": "55.00" },
                { "descricao": "Vidro temperado 8mm", "comp": "A+B", "unidade": "m2",
                  "quantidade": "6", "custo": "120.00", "precoVenda": "180.00" }
            ],
            "servicos": [
                { "descricao": "Instalação e vedação", "unidade": "vb",
                  "quantidade": "1", "precoVenda": "850.00" }
            ],
            "totais": {
                "totalMateriais": "1767.50", "totalServicos": "850.00",
                "subtotal": "2617.50", "desconto": "0", "totalGeral": "2617.50"
            }
        }"#,
    )?;
    println!("2. Payload: {} materiais, {} servicos", budget.materials.len(), budget.services.len());

    // Step 3: Coordinates with a couple of probes for calibration
    let coords = CoordinateConfig::from_json_str(
        r#"{
            "pageIndexes": { "headerTotais": 0, "tables": 6 },
            "probes": {
                "page1": [ { "x": 60, "y": 740, "label": "razao" },
                           { "x": 420, "y": 200, "label": "totais" } ],
                "pageTables": [ { "x": 60, "y": 598, "label": "mat.yFirst" } ]
            }
        }"#,
    )?;

    // Step 4: Plain render (grid only if PDF_GRID=1)
    let engine = RenderEngine::new(TemplateStore::from_bytes(template.clone()), coords.clone())
        .with_debug(DebugOverlay::from_env());
    let pdf = engine.render(&budget)?;
    fs::write("output/orcamento.pdf", &pdf)?;
    println!("3. Rendered: {} bytes -> output/orcamento.pdf", pdf.len());

    // Step 5: Grid-calibrated render for coordinate work
    let debug = DebugOverlay {
        grid_enabled: true,
        grid_step: 10.0,
        grid_major: 100.0,
    };
    let engine = RenderEngine::new(TemplateStore::from_bytes(template), coords).with_debug(debug);
    let pdf = engine.render(&budget)?;
    fs::write("output/orcamento-grid.pdf", &pdf)?;
    println!("4. Calibration: {} bytes -> output/orcamento-grid.pdf", pdf.len());

    println!("\n=== Done! ===");
    println!("open output/orcamento.pdf");
    println!("open output/orcamento-grid.pdf");

    Ok(())
}

/// Blank multi-page A4 document standing in for the real template
fn blank_template(page_count: usize) -> Vec<u8> {
    let mut doc = lopdf::Document::new();

    let pages_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Pages",
        "Count" => page_count as i32,
        "Kids" => vec![],
    }));

    let mut page_ids = Vec::new();
    for _ in 0..page_count {
        let contents_id = doc.add_object(lopdf::Object::Stream(lopdf::Stream::new(
            lopdf::dictionary! {},
            vec![],
        )));
        let page_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.28.into(), 841.89.into()],
            "Resources" => lopdf::dictionary! {},
            "Contents" => contents_id,
        }));
        page_ids.push(page_id);
    }

    let mut pages_dict = doc.get_object(pages_id).unwrap().as_dict().unwrap().clone();
    pages_dict.set(
        "Kids",
        lopdf::Object::Array(page_ids.into_iter().map(|id| id.into()).collect()),
    );
    doc.objects.insert(pages_id, pages_dict.into());

    let catalog_id = doc.add_object(lopdf::Object::Dictionary(lopdf::dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    }));
    doc.trailer.set("Root", catalog_id);

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).unwrap();
    buffer
}
