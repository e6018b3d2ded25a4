//! Item catalog and price-per-kg store
//!
//! The catalog is CRUD over `acessorios.json`, same shape as the customer
//! registry. The price of aluminum is a single process-wide scalar persisted
//! in its own file (`preco_aluminio.json`); it is read from disk on every
//! call so order lines always freeze the value in effect at that moment.

use crate::models::CatalogItem;
use crate::store;
use crate::utils::validation::{parse_decimal_input, validate_required_text};
use crate::utils::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Source of the current price-per-kg.
///
/// The order engine takes this as an injected capability instead of reading
/// ambient global state, which makes the freeze-at-add-time behavior explicit
/// and testable.
pub trait PriceSource {
    /// Current price per kilogram; 0.0 when unset.
    fn price_per_kg(&self) -> f64;
}

/// Wire shape of `preco_aluminio.json`.
#[derive(Debug, Serialize, Deserialize)]
struct PriceFile {
    preco_kg: f64,
}

/// Price-per-kg scalar persisted in its own file.
pub struct PriceStore {
    path: PathBuf,
}

impl PriceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the current price. Missing or corrupt file reads as 0.0.
    pub fn get(&self) -> f64 {
        store::load_value_or(&self.path, PriceFile { preco_kg: 0.0 }).preco_kg
    }

    /// Persist a new price. Rejects negative or non-finite values.
    pub fn set(&self, value: f64) -> AppResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(AppError::validation("preco_kg must be a non-negative number"));
        }
        store::save_value(&self.path, &PriceFile { preco_kg: value })?;
        tracing::info!(preco_kg = value, "Price per kg updated");
        Ok(())
    }

    /// Parse and persist a price typed by the user (comma tolerated).
    pub fn set_from_input(&self, input: &str) -> AppResult<f64> {
        let value = parse_decimal_input(input)
            .ok_or_else(|| AppError::validation("preco_kg must be a number"))?;
        self.set(value)?;
        Ok(value)
    }
}

impl PriceSource for PriceStore {
    fn price_per_kg(&self) -> f64 {
        self.get()
    }
}

/// Item catalog backed by one JSON file.
pub struct ItemCatalog {
    path: PathBuf,
    items: Vec<CatalogItem>,
}

impl ItemCatalog {
    /// Open the catalog, loading existing records fail-open.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut items: Vec<CatalogItem> = store::load_or_default(&path);
        for item in &mut items {
            if item.id.is_none() {
                item.id = Some(uuid::Uuid::new_v4().to_string());
            }
        }
        tracing::debug!(count = items.len(), path = %path.display(), "Item catalog loaded");
        Self { path, items }
    }

    /// Add an item. Code, name and a non-negative weight are required.
    pub fn add(&mut self, mut item: CatalogItem) -> AppResult<String> {
        Self::validate(&item)?;
        let id = uuid::Uuid::new_v4().to_string();
        item.id = Some(id.clone());
        self.items.push(item);
        self.persist()?;
        Ok(id)
    }

    /// Add an item from raw form fields, parsing the weight input.
    pub fn add_from_input(&mut self, code: &str, name: &str, weight: &str) -> AppResult<String> {
        let weight = parse_decimal_input(weight)
            .ok_or_else(|| AppError::validation("peso must be a number"))?;
        self.add(CatalogItem {
            id: None,
            code: code.trim().to_string(),
            name: name.trim().to_string(),
            weight,
        })
    }

    /// Overwrite the item with the given id.
    pub fn update(&mut self, id: &str, mut item: CatalogItem) -> AppResult<()> {
        Self::validate(&item)?;
        let slot = self
            .items
            .iter_mut()
            .find(|i| i.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found("Item"))?;
        item.id = Some(id.to_string());
        *slot = item;
        self.persist()
    }

    /// Remove the item with the given id.
    pub fn remove(&mut self, id: &str) -> AppResult<()> {
        let pos = self
            .items
            .iter()
            .position(|i| i.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found("Item"))?;
        self.items.remove(pos);
        self.persist()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.id.as_deref() == Some(id))
    }

    pub fn list(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Exact code lookup, the way the order screen resolves items.
    pub fn find_by_code(&self, code: &str) -> Option<&CatalogItem> {
        self.items.iter().find(|i| i.code == code)
    }

    /// Item codes, for UI completers.
    pub fn codes(&self) -> Vec<String> {
        self.items.iter().map(|i| i.code.clone()).collect()
    }

    fn validate(item: &CatalogItem) -> AppResult<()> {
        validate_required_text(&item.code, "codigo")?;
        validate_required_text(&item.name, "nome")?;
        if !item.weight.is_finite() || item.weight < 0.0 {
            return Err(AppError::validation("peso must be a non-negative number"));
        }
        Ok(())
    }

    fn persist(&self) -> AppResult<()> {
        store::save(&self.path, &self.items).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to save catalog");
            e.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_temp() -> (tempfile::TempDir, ItemCatalog) {
        let dir = tempfile::tempdir().unwrap();
        let catalog = ItemCatalog::open(dir.path().join("acessorios.json"));
        (dir, catalog)
    }

    #[test]
    fn test_add_from_input_parses_comma_weight() {
        let (_dir, mut catalog) = open_temp();
        catalog.add_from_input("A1", "Trilho Superior", "2,5").unwrap();
        assert_eq!(catalog.find_by_code("A1").unwrap().weight, 2.5);
    }

    #[test]
    fn test_add_rejects_bad_fields() {
        let (_dir, mut catalog) = open_temp();
        assert!(catalog.add_from_input("", "x", "1").is_err());
        assert!(catalog.add_from_input("A1", "", "1").is_err());
        assert!(catalog.add_from_input("A1", "x", "peso").is_err());
        assert!(catalog.add_from_input("A1", "x", "-2").is_err());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_catalog_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("acessorios.json");

        let mut catalog = ItemCatalog::open(&path);
        let id = catalog.add_from_input("A1", "Trilho", "2.5").unwrap();
        catalog.add_from_input("B2", "Guia", "1.2").unwrap();
        catalog.remove(&id).unwrap();

        let reopened = ItemCatalog::open(&path);
        assert_eq!(reopened.list(), catalog.list());
        assert!(reopened.find_by_code("A1").is_none());
        assert!(reopened.find_by_code("B2").is_some());
    }

    #[test]
    fn test_price_store_defaults_to_zero() {
        let dir = tempfile::tempdir().unwrap();
        let price = PriceStore::new(dir.path().join("preco_aluminio.json"));
        assert_eq!(price.get(), 0.0);
    }

    #[test]
    fn test_price_store_set_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let price = PriceStore::new(dir.path().join("preco_aluminio.json"));
        price.set_from_input("12,40").unwrap();
        assert_eq!(price.get(), 12.4);
        assert!(price.set_from_input("abc").is_err());
        assert!(price.set(-1.0).is_err());
        // Failed sets leave the stored value untouched.
        assert_eq!(price.get(), 12.4);
    }

    #[test]
    fn test_price_file_wire_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preco_aluminio.json");
        PriceStore::new(&path).set(10.0).unwrap();
        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["preco_kg"], 10.0);
    }
}
