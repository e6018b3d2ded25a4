//! Catalog Item Model

use serde::{Deserialize, Serialize};

/// Inventory item: an aluminum profile or part, priced by weight.
///
/// `code` is the lookup key on the order screen; it is expected unique by
/// convention but not enforced. `weight` is kilograms per unit/bar, ≥ 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "peso", default)]
    pub weight: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_item_shape() {
        let json = r#"{"codigo": "A1", "nome": "Trilho Superior", "peso": 2.5}"#;
        let item: CatalogItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.code, "A1");
        assert_eq!(item.weight, 2.5);
        assert_eq!(item.id, None);
    }
}
