//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
///
/// All descriptive fields are free-form text filled from the entry form.
/// `name` and `tax_id` are required non-empty on add; neither is enforced
/// unique. `id` is a stable uuid assigned on add (legacy records without one
/// are backfilled in memory when the registry loads).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "nome", default)]
    pub name: String,
    /// CPF/CNPJ
    #[serde(rename = "cpf_cnpj", default)]
    pub tax_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    #[serde(rename = "endereco", default)]
    pub address: String,
    #[serde(rename = "numero", default)]
    pub number: String,
    #[serde(rename = "bairro", default)]
    pub neighborhood: String,
    #[serde(rename = "cidade", default)]
    pub city: String,
    #[serde(rename = "estado", default)]
    pub state: String,
    /// State registration (Inscrição Estadual)
    #[serde(rename = "ie", default)]
    pub state_registration: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_record_without_id_or_new_fields() {
        // Shape written by the old entry screens: no id, partial fields.
        let json = r#"{"nome": "Jane Doe", "cpf_cnpj": "123", "cidade": "Curitiba"}"#;
        let c: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, None);
        assert_eq!(c.name, "Jane Doe");
        assert_eq!(c.city, "Curitiba");
        assert_eq!(c.email, "");
        assert_eq!(c.state_registration, "");
    }

    #[test]
    fn test_wire_keys_are_portuguese() {
        let c = Customer {
            name: "Jane".into(),
            tax_id: "9".into(),
            ..Default::default()
        };
        let json = serde_json::to_string(&c).unwrap();
        assert!(json.contains("\"nome\""));
        assert!(json.contains("\"cpf_cnpj\""));
        assert!(!json.contains("\"id\""));
    }
}
