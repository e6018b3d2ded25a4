//! OrderEngine - working session state machine and order persistence
//!
//! One engine owns the persisted order collection and a single working
//! session. The session moves through an explicit state enum instead of the
//! legacy "edit tab exists" convention:
//!
//! ```text
//! Idle ──start_new()──> Composing ──finalize()──> Idle
//!   │                                              ▲
//!   └──begin_edit(id)──> Editing { order_id } ─────┘
//! ```
//!
//! Each working line freezes the catalog weight and the price-per-kg in
//! effect when it was added; neither is re-resolved later. The price comes
//! from an injected [`PriceSource`] so the snapshot behavior is explicit and
//! testable rather than read from ambient global state.

use crate::catalog::{ItemCatalog, PriceSource};
use crate::customers::CustomerRegistry;
use crate::models::{Order, OrderLine};
use crate::store::{self, StoreError};
use crate::utils::validation::parse_quantity;
use chrono::Local;
use std::path::PathBuf;
use thiserror::Error;

/// Display numbers start here; the first order ever saved is nº 1001.
const FIRST_ORDER_NUMBER: u32 = 1001;

/// Engine errors
#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Order not found: {0}")]
    OrderNotFound(String),

    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    #[error("Price per kg is not set")]
    PriceNotSet,

    #[error("Order has no items")]
    EmptyOrder,

    #[error("No working line at index {0}")]
    LineOutOfRange(usize),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

pub type OrderResult<T> = Result<T, OrderError>;

/// Working session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Idle,
    Composing,
    Editing { order_id: String },
}

/// Order engine backed by `pedidos.json`.
pub struct OrderEngine {
    path: PathBuf,
    orders: Vec<Order>,
    session: Session,
    working_items: Vec<OrderLine>,
    working_customer: String,
}

impl OrderEngine {
    /// Open the engine, loading persisted orders fail-open.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut orders: Vec<Order> = store::load_or_default(&path);
        for order in &mut orders {
            if order.id.is_none() {
                order.id = Some(uuid::Uuid::new_v4().to_string());
            }
        }
        tracing::debug!(count = orders.len(), path = %path.display(), "Orders loaded");
        Self {
            path,
            orders,
            session: Session::Idle,
            working_items: Vec::new(),
            working_customer: String::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Begin a fresh composition, discarding any working state.
    pub fn start_new(&mut self) {
        self.working_items.clear();
        self.working_customer.clear();
        self.session = Session::Composing;
    }

    /// Abandon the working session without persisting anything.
    pub fn cancel(&mut self) {
        self.working_items.clear();
        self.working_customer.clear();
        self.session = Session::Idle;
    }

    pub fn working_items(&self) -> &[OrderLine] {
        &self.working_items
    }

    /// Running total of the working lines.
    pub fn working_total(&self) -> f64 {
        Order::compute_total(&self.working_items)
    }

    /// Customer name prefilled by `begin_edit`, for the UI to display.
    pub fn working_customer_name(&self) -> &str {
        &self.working_customer
    }

    /// Add a line to the working session.
    ///
    /// Resolves the item by exact code and freezes the CURRENT catalog weight
    /// and the CURRENT price-per-kg into the line. A zero/unset price is a
    /// hard precondition failure: it would otherwise silently produce a
    /// zero-value line.
    pub fn add_line(
        &mut self,
        code: &str,
        quantity_input: &str,
        catalog: &ItemCatalog,
        price: &dyn PriceSource,
    ) -> OrderResult<&OrderLine> {
        let price_per_kg = price.price_per_kg();
        if price_per_kg <= 0.0 {
            return Err(OrderError::PriceNotSet);
        }

        let code = code.trim();
        let item = catalog
            .find_by_code(code)
            .ok_or_else(|| OrderError::ItemNotFound(code.to_string()))?;
        let quantity = parse_quantity(quantity_input)
            .ok_or_else(|| OrderError::InvalidQuantity(quantity_input.to_string()))?;

        let total_weight = item.weight * quantity;
        let line = OrderLine {
            code: item.code.clone(),
            name: item.name.clone(),
            unit_weight: item.weight,
            quantity,
            total_weight,
            subtotal: total_weight * price_per_kg,
            price_per_kg,
        };

        if self.session == Session::Idle {
            self.session = Session::Composing;
        }
        self.working_items.push(line);
        let last = self.working_items.len() - 1;
        Ok(&self.working_items[last])
    }

    /// Remove a working line by position.
    pub fn remove_line(&mut self, index: usize) -> OrderResult<()> {
        if index >= self.working_items.len() {
            return Err(OrderError::LineOutOfRange(index));
        }
        self.working_items.remove(index);
        Ok(())
    }

    /// Finalize the working session into a persisted order.
    ///
    /// The customer is resolved by exact display name against the registry;
    /// when two customers share a name the first match wins (kept for
    /// compatibility with the legacy data). A denormalized copy of the
    /// record is stored in the order.
    ///
    /// While editing, the target order's customer/items/total are overwritten
    /// in place and its original number and date are preserved. Otherwise a
    /// new order is appended with `number = 1001 + current count` and today's
    /// date. Returns a clone of the saved order, ready for PDF export.
    pub fn finalize(
        &mut self,
        customer_name: &str,
        registry: &CustomerRegistry,
    ) -> OrderResult<Order> {
        if self.working_items.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        let customer = registry
            .find_by_name(customer_name)
            .ok_or_else(|| OrderError::CustomerNotFound(customer_name.to_string()))?
            .clone();

        let items = std::mem::take(&mut self.working_items);
        let total = Order::compute_total(&items);

        let saved = match std::mem::replace(&mut self.session, Session::Idle) {
            Session::Editing { order_id } => {
                let order = match self.orders.iter_mut().find(|o| o.id.as_deref() == Some(&order_id)) {
                    Some(order) => order,
                    None => {
                        // Target vanished (deleted in another window). Put the
                        // working state back so nothing is lost.
                        self.working_items = items;
                        self.session = Session::Editing { order_id: order_id.clone() };
                        return Err(OrderError::OrderNotFound(order_id));
                    }
                };
                order.customer = customer;
                order.items = items;
                order.total = total;
                order.clone()
            }
            _ => {
                let order = Order {
                    id: Some(uuid::Uuid::new_v4().to_string()),
                    number: FIRST_ORDER_NUMBER + self.orders.len() as u32,
                    date: Local::now().format("%d/%m/%Y").to_string(),
                    customer,
                    items,
                    total,
                };
                self.orders.push(order.clone());
                order
            }
        };

        self.working_customer.clear();
        self.persist()?;
        tracing::info!(numero = saved.number, total = saved.total, "Order saved");
        Ok(saved)
    }

    /// Load an existing order into the working session for editing.
    pub fn begin_edit(&mut self, order_id: &str) -> OrderResult<()> {
        let order = self
            .orders
            .iter()
            .find(|o| o.id.as_deref() == Some(order_id))
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
        self.working_items = order.items.clone();
        self.working_customer = order.customer.name.clone();
        self.session = Session::Editing { order_id: order_id.to_string() };
        Ok(())
    }

    /// Delete an order. Remaining orders are never renumbered.
    ///
    /// Confirmation is the caller's concern: the UI asks before invoking.
    pub fn delete_order(&mut self, order_id: &str) -> OrderResult<Order> {
        let pos = self
            .orders
            .iter()
            .position(|o| o.id.as_deref() == Some(order_id))
            .ok_or_else(|| OrderError::OrderNotFound(order_id.to_string()))?;
        let removed = self.orders.remove(pos);

        // Editing the order that was just deleted: drop the stale session.
        if matches!(&self.session, Session::Editing { order_id: editing } if editing == order_id) {
            self.cancel();
        }

        self.persist()?;
        tracing::info!(numero = removed.number, "Order deleted");
        Ok(removed)
    }

    pub fn get(&self, order_id: &str) -> Option<&Order> {
        self.orders.iter().find(|o| o.id.as_deref() == Some(order_id))
    }

    pub fn list(&self) -> &[Order] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    /// Lazily filter orders whose customer name contains `text`,
    /// case-insensitively. Empty text yields every order, in insertion order.
    pub fn search<'a>(&'a self, text: &str) -> impl Iterator<Item = &'a Order> + 'a {
        let needle = text.to_lowercase();
        self.orders
            .iter()
            .filter(move |o| o.customer_name().to_lowercase().contains(&needle))
    }

    fn persist(&self) -> OrderResult<()> {
        store::save(&self.path, &self.orders).map_err(|e| {
            tracing::error!(path = %self.path.display(), error = %e, "Failed to save orders");
            OrderError::from(e)
        })
    }
}
