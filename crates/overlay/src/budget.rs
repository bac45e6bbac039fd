//! Budget payload model
//!
//! Deserialized from the JSON body the upstream service posts. Every field
//! is optional: rendering substitutes placeholders, it never rejects a
//! payload for missing data. The aliases keep the historical Portuguese
//! field names (and their variants) deserializing unchanged.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budget document to overlay onto the template
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Budget {
    /// Issuing company block
    #[serde(default, alias = "empresa", alias = "dadosEmpresa")]
    pub company: Option<Company>,

    /// Free-text project ("obra") description
    #[serde(
        default,
        alias = "obra",
        alias = "enderecoObra",
        alias = "localObra"
    )]
    pub project_description: Option<String>,

    /// Material line items, in render order
    #[serde(
        default,
        alias = "materiais",
        alias = "itensMateriais",
        alias = "produtos"
    )]
    pub materials: Vec<LineItem>,

    /// Service line items, in render order
    #[serde(default, alias = "servicos", alias = "itensServicos")]
    pub services: Vec<LineItem>,

    /// Computed totals block
    #[serde(default, alias = "totais", alias = "resumoTotais")]
    pub totals: Option<Totals>,
}

/// Company identification drawn on the header page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Company {
    #[serde(
        default,
        alias = "razaoSocial",
        alias = "razao_social",
        alias = "nomeEmpresa",
        alias = "nome"
    )]
    pub legal_name: Option<String>,

    #[serde(default, alias = "cnpj", alias = "CNPJ")]
    pub tax_id: Option<String>,

    /// Contact person; accepted for payload compatibility, not drawn
    #[serde(default, alias = "contato", alias = "Contato")]
    pub contact: Option<String>,

    #[serde(default, alias = "telefone", alias = "fone", alias = "tel")]
    pub phone: Option<String>,

    #[serde(default, alias = "email", alias = "eMail")]
    pub email: Option<String>,
}

/// One material or service row
///
/// Monetary and quantity fields are exact decimals; rounding must match the
/// formatted output, so binary floats are never used here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(
        default,
        alias = "descricao",
        alias = "descricaoProduto",
        alias = "produto"
    )]
    pub description: Option<String>,

    /// Cost composition tag, e.g. "A" or "A+B"
    #[serde(default, alias = "comp", alias = "composicao")]
    pub composition: Option<String>,

    #[serde(default, alias = "unidade", alias = "un", alias = "unidadeMedida")]
    pub unit: Option<String>,

    #[serde(default, alias = "quantidade", alias = "qtd")]
    pub quantity: Option<Decimal>,

    #[serde(default, alias = "custo", alias = "valorCusto")]
    pub unit_cost: Option<Decimal>,

    #[serde(default, alias = "precoVenda", alias = "preco", alias = "valorVenda")]
    pub sale_price: Option<Decimal>,

    /// Maximum discount percentage the seller may grant
    #[serde(
        default,
        alias = "limiteDesconto",
        alias = "descontoLimite",
        alias = "limite_desc"
    )]
    pub discount_limit: Option<Decimal>,

    #[serde(default, alias = "precoKg", alias = "preco_por_kg")]
    pub price_per_kg: Option<Decimal>,
}

/// Totals block drawn on the header page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Totals {
    #[serde(
        default,
        alias = "totalMateriais",
        alias = "materiaisTotal",
        alias = "valorMateriais"
    )]
    pub materials_total: Option<Decimal>,

    #[serde(
        default,
        alias = "totalServicos",
        alias = "servicosTotal",
        alias = "valorServicos"
    )]
    pub services_total: Option<Decimal>,

    #[serde(default, alias = "subtotal", alias = "subTotal")]
    pub subtotal: Option<Decimal>,

    #[serde(default, alias = "desconto", alias = "valorDesconto")]
    pub discount: Option<Decimal>,

    #[serde(
        default,
        alias = "totalGeral",
        alias = "valorTotal",
        alias = "valorTotalGeral"
    )]
    pub grand_total: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_portuguese_payload() {
        let json = r#"{
            "empresa": {
                "razaoSocial": "Stongel Esquadrias Ltda",
                "cnpj": "12.345.678/0001-90",
                "telefone": "(51) 99999-0000",
                "email": "contato@stongel.com.br"
            },
            "obra": "Residência unifamiliar, Rua das Flores 123",
            "materiais": [
                {
                    "descricao": "Perfil de alumínio",
                    "comp": "A",
                    "unidade": "kg",
                    "quantidade": "12.5",
                    "custo": "38.90",
                    "precoVenda": "55.00",
                    "limiteDesconto": "5",
                    "precoKg": "55.00"
                }
            ],
            "servicos": [],
            "totais": {
                "subtotal": "687.50",
                "desconto": "0",
                "totalGeral": "687.50"
            }
        }"#;

        let budget: Budget = serde_json::from_str(json).unwrap();

        let company = budget.company.unwrap();
        assert_eq!(company.legal_name.as_deref(), Some("Stongel Esquadrias Ltda"));
        assert_eq!(company.tax_id.as_deref(), Some("12.345.678/0001-90"));

        assert_eq!(budget.materials.len(), 1);
        let item = &budget.materials[0];
        assert_eq!(item.composition.as_deref(), Some("A"));
        assert_eq!(item.quantity, Some("12.5".parse().unwrap()));

        let totals = budget.totals.unwrap();
        assert_eq!(totals.grand_total, Some("687.50".parse().unwrap()));
        assert_eq!(totals.materials_total, None);
    }

    #[test]
    fn test_deserialize_alias_variants() {
        let json = r#"{
            "dadosEmpresa": { "nomeEmpresa": "ACME" },
            "enderecoObra": "Galpão industrial",
            "produtos": [ { "produto": "Chapa", "qtd": 3 } ],
            "itensServicos": [ { "descricaoProduto": "Instalação" } ],
            "resumoTotais": { "valorTotalGeral": 100 }
        }"#;

        let budget: Budget = serde_json::from_str(json).unwrap();

        assert_eq!(
            budget.company.unwrap().legal_name.as_deref(),
            Some("ACME")
        );
        assert_eq!(budget.project_description.as_deref(), Some("Galpão industrial"));
        assert_eq!(budget.materials[0].description.as_deref(), Some("Chapa"));
        assert_eq!(budget.materials[0].quantity, Some(3.into()));
        assert_eq!(budget.services.len(), 1);
        assert_eq!(
            budget.totals.unwrap().grand_total,
            Some(100.into())
        );
    }

    #[test]
    fn test_deserialize_empty_object() {
        let budget: Budget = serde_json::from_str("{}").unwrap();
        assert!(budget.company.is_none());
        assert!(budget.materials.is_empty());
        assert!(budget.services.is_empty());
        assert!(budget.totals.is_none());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{ "obra": "x", "algoNovo": { "a": 1 } }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        assert_eq!(budget.project_description.as_deref(), Some("x"));
    }

    #[test]
    fn test_decimal_values_exact() {
        let json = r#"{ "materiais": [ { "custo": "0.10" } ] }"#;
        let budget: Budget = serde_json::from_str(json).unwrap();
        let cost = budget.materials[0].unit_cost.unwrap();
        // 0.1 is not representable in binary floating point; Decimal keeps it
        assert_eq!(cost.to_string(), "0.10");
    }
}
