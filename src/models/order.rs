//! Order Model

use crate::models::Customer;
use serde::{Deserialize, Serialize};

/// One line of an order, frozen at add time.
///
/// The line copies the item's weight and the price-per-kg in effect when it
/// was added; neither is re-read afterwards. Two lines of the same item added
/// at different times may legitimately carry different unit prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "nome", default)]
    pub name: String,
    /// Kilograms per unit at add time.
    #[serde(rename = "peso_unit", default)]
    pub unit_weight: f64,
    #[serde(rename = "qtd", default)]
    pub quantity: f64,
    /// unit_weight × quantity
    #[serde(rename = "peso_total", default)]
    pub total_weight: f64,
    /// total_weight × price_per_kg at add time
    #[serde(default)]
    pub subtotal: f64,
    /// Price-per-kg snapshot taken when the line was added.
    #[serde(rename = "preco_kg_na_epoca", default)]
    pub price_per_kg: f64,
}

/// A sales order / commercial proposal.
///
/// `number` is the display number shown on the quote, assigned as
/// `1001 + order count` at creation. It is not reused after deletions, so it
/// is not guaranteed unique forever; `id` is the stable identity.
/// `customer` is a denormalized copy taken at finalize time; later edits to
/// the registry do not touch saved orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "numero", default)]
    pub number: u32,
    /// Creation date, `dd/mm/yyyy`. Preserved when the order is edited.
    #[serde(rename = "data", default)]
    pub date: String,
    #[serde(rename = "cliente", default)]
    pub customer: Customer,
    #[serde(rename = "itens", default)]
    pub items: Vec<OrderLine>,
    #[serde(default)]
    pub total: f64,
}

impl Order {
    /// Sum of the line subtotals.
    pub fn compute_total(items: &[OrderLine]) -> f64 {
        items.iter().map(|line| line.subtotal).sum()
    }

    /// Customer display name, for search and listings.
    pub fn customer_name(&self) -> &str {
        &self.customer.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(subtotal: f64) -> OrderLine {
        OrderLine {
            code: "A1".into(),
            name: "Perfil".into(),
            unit_weight: 1.0,
            quantity: 1.0,
            total_weight: 1.0,
            subtotal,
            price_per_kg: subtotal,
        }
    }

    #[test]
    fn test_compute_total() {
        let items = vec![line(10.0), line(32.5)];
        assert_eq!(Order::compute_total(&items), 42.5);
    }

    #[test]
    fn test_order_wire_format() {
        let order = Order {
            id: Some("x".into()),
            number: 1001,
            date: "30/08/2026".into(),
            customer: Customer { name: "Jane".into(), ..Default::default() },
            items: vec![line(5.0)],
            total: 5.0,
        };
        let json = serde_json::to_string(&order).unwrap();
        assert!(json.contains("\"numero\":1001"));
        assert!(json.contains("\"cliente\""));
        assert!(json.contains("\"itens\""));
        assert!(json.contains("\"preco_kg_na_epoca\""));
    }

    #[test]
    fn test_legacy_order_loads() {
        let json = r#"{
            "numero": 1002,
            "data": "01/02/2025",
            "cliente": {"nome": "Acme"},
            "itens": [{"codigo": "B2", "nome": "Trilho", "peso_unit": 1.2,
                       "qtd": 3, "peso_total": 3.6, "subtotal": 36.0,
                       "preco_kg_na_epoca": 10.0}],
            "total": 36.0
        }"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, None);
        assert_eq!(order.items[0].price_per_kg, 10.0);
        assert_eq!(Order::compute_total(&order.items), order.total);
    }
}
