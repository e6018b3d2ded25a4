//! Customer registry
//!
//! CRUD over the in-memory customer list backed by `clientes.json`. Every
//! mutation re-serializes the full collection synchronously, so the file
//! always mirrors memory after a successful call.

use crate::models::Customer;
use crate::store;
use crate::utils::validation::validate_required_text;
use crate::utils::{AppError, AppResult};
use std::path::PathBuf;

/// Customer registry backed by one JSON file.
pub struct CustomerRegistry {
    path: PathBuf,
    customers: Vec<Customer>,
}

impl CustomerRegistry {
    /// Open the registry, loading existing records fail-open.
    ///
    /// Legacy records without a stable id get one backfilled in memory; it is
    /// persisted on the next save.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut customers: Vec<Customer> = store::load_or_default(&path);
        for customer in &mut customers {
            if customer.id.is_none() {
                customer.id = Some(uuid::Uuid::new_v4().to_string());
            }
        }
        tracing::debug!(count = customers.len(), path = %path.display(), "Customer registry loaded");
        Self { path, customers }
    }

    /// Add a customer. Name and CPF/CNPJ are required.
    ///
    /// Returns the assigned id.
    pub fn add(&mut self, mut customer: Customer) -> AppResult<String> {
        validate_required_text(&customer.name, "nome")?;
        validate_required_text(&customer.tax_id, "cpf_cnpj")?;

        let id = uuid::Uuid::new_v4().to_string();
        customer.id = Some(id.clone());
        self.customers.push(customer);
        self.persist()?;
        Ok(id)
    }

    /// Overwrite the customer with the given id.
    pub fn update(&mut self, id: &str, mut customer: Customer) -> AppResult<()> {
        validate_required_text(&customer.name, "nome")?;
        validate_required_text(&customer.tax_id, "cpf_cnpj")?;

        let slot = self
            .customers
            .iter_mut()
            .find(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found("Customer"))?;
        customer.id = Some(id.to_string());
        *slot = customer;
        self.persist()
    }

    /// Remove the customer with the given id.
    pub fn remove(&mut self, id: &str) -> AppResult<()> {
        let pos = self
            .customers
            .iter()
            .position(|c| c.id.as_deref() == Some(id))
            .ok_or_else(|| AppError::not_found("Customer"))?;
        self.customers.remove(pos);
        self.persist()
    }

    pub fn get(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id.as_deref() == Some(id))
    }

    pub fn list(&self) -> &[Customer] {
        &self.customers
    }

    pub fn len(&self) -> usize {
        self.customers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty()
    }

    /// Resolve a customer by exact display name. First match wins when two
    /// customers share a name (known weakness, kept for compatibility).
    pub fn find_by_name(&self, name: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.name == name)
    }

    /// Display names, for UI completers.
    pub fn names(&self) -> Vec<String> {
        self.customers.iter().map(|c| c.name.clone()).collect()
    }

    fn persist(&self) -> AppResult<()> {
        store::save(&self.path, &self.customers).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to save customers");
            e.into()
        })
    }
}
