//! In-memory storage adapters
//!
//! Mutex-protected maps standing in for PostgreSQL in tests. Each adapter
//! implements the same port contract as its database counterpart; listing
//! reuses the domain's own `matches` and `sort_newest_first` so the two
//! renditions of the filter semantics cannot drift apart in tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use core_kernel::{
    InvoiceId, Page, ProductId, SettingsStore, StoreError, StoreSettings, UserRecord, UserStore,
};
use domain_catalog::{Product, ProductStore};
use domain_invoicing::{
    sort_newest_first, Invoice, InvoiceFilter, InvoiceStore, LineItem, SequenceStore,
};

/// In-memory per-day counters
#[derive(Default)]
pub struct InMemorySequenceStore {
    counters: Mutex<HashMap<String, i64>>,
}

impl InMemorySequenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-positions a counter, as if earlier invoices had been issued
    pub fn seed(&self, day_key: &str, value: i64) {
        self.counters
            .lock()
            .unwrap()
            .insert(day_key.to_string(), value);
    }
}

#[async_trait]
impl SequenceStore for InMemorySequenceStore {
    async fn increment_and_get(&self, day_key: &str) -> Result<i64, StoreError> {
        let mut counters = self.counters.lock().unwrap();
        let seq = counters.entry(day_key.to_string()).or_insert(0);
        *seq += 1;
        Ok(*seq)
    }
}

/// In-memory invoice storage
#[derive(Default)]
pub struct InMemoryInvoiceStore {
    invoices: Mutex<HashMap<InvoiceId, Invoice>>,
}

impl InMemoryInvoiceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.invoices.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InvoiceStore for InMemoryInvoiceStore {
    async fn insert(&self, invoice: &Invoice) -> Result<(), StoreError> {
        self.invoices
            .lock()
            .unwrap()
            .insert(invoice.id, invoice.clone());
        Ok(())
    }

    async fn get(&self, id: InvoiceId) -> Result<Option<Invoice>, StoreError> {
        Ok(self.invoices.lock().unwrap().get(&id).cloned())
    }

    async fn replace_contents(
        &self,
        id: InvoiceId,
        items: &[LineItem],
        note: Option<&str>,
    ) -> Result<(), StoreError> {
        let mut invoices = self.invoices.lock().unwrap();
        let invoice = invoices
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(format!("invoice {id}")))?;
        invoice.items = items.to_vec();
        invoice.note = note.map(str::to_string);
        Ok(())
    }

    async fn delete_many(&self, ids: &[InvoiceId]) -> Result<u64, StoreError> {
        let mut invoices = self.invoices.lock().unwrap();
        let mut removed = 0;
        for id in ids {
            if invoices.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn list(
        &self,
        filter: &InvoiceFilter,
        page: Page,
    ) -> Result<(Vec<Invoice>, u64), StoreError> {
        let invoices = self.invoices.lock().unwrap();
        let mut matching: Vec<Invoice> = invoices
            .values()
            .filter(|invoice| filter.matches(invoice))
            .cloned()
            .collect();
        sort_newest_first(&mut matching);
        let total = matching.len() as u64;
        Ok((page.slice(&matching).to_vec(), total))
    }
}

/// In-memory product catalog
#[derive(Default)]
pub struct InMemoryProductStore {
    products: Mutex<HashMap<ProductId, Product>>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn insert(&self, product: &Product) -> Result<(), StoreError> {
        self.products
            .lock()
            .unwrap()
            .insert(product.id, product.clone());
        Ok(())
    }

    async fn update(&self, product: &Product) -> Result<(), StoreError> {
        let mut products = self.products.lock().unwrap();
        let existing = products
            .get_mut(&product.id)
            .ok_or_else(|| StoreError::not_found(format!("product {}", product.id)))?;
        *existing = product.clone();
        Ok(())
    }

    async fn delete_many(&self, ids: &[ProductId]) -> Result<u64, StoreError> {
        let mut products = self.products.lock().unwrap();
        let mut removed = 0;
        for id in ids {
            if products.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn list(
        &self,
        search: Option<&str>,
        page: Page,
    ) -> Result<(Vec<Product>, u64), StoreError> {
        let products = self.products.lock().unwrap();
        let needle = search.map(str::to_lowercase);
        let mut matching: Vec<Product> = products
            .values()
            .filter(|product| match &needle {
                Some(needle) => product.name.to_lowercase().contains(needle),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        let total = matching.len() as u64;
        Ok((page.slice(&matching).to_vec(), total))
    }
}

/// In-memory user accounts
#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<Vec<UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|user| user.username == username)
            .cloned())
    }

    async fn insert(&self, user: &UserRecord) -> Result<(), StoreError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }

    async fn count(&self) -> Result<u64, StoreError> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

/// In-memory settings singleton
#[derive(Default)]
pub struct InMemorySettingsStore {
    settings: Mutex<Option<StoreSettings>>,
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsStore for InMemorySettingsStore {
    async fn get(&self) -> Result<Option<StoreSettings>, StoreError> {
        Ok(self.settings.lock().unwrap().clone())
    }

    async fn upsert(&self, settings: &StoreSettings) -> Result<(), StoreError> {
        *self.settings.lock().unwrap() = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::{InvoiceBuilder, ProductBuilder};
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_sequence_store_increments_per_key() {
        let store = InMemorySequenceStore::new();
        assert_eq!(store.increment_and_get("20250610").await.unwrap(), 1);
        assert_eq!(store.increment_and_get("20250610").await.unwrap(), 2);
        assert_eq!(store.increment_and_get("20250611").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_invoice_delete_is_idempotent() {
        let store = InMemoryInvoiceStore::new();
        let invoice = InvoiceBuilder::new().build();
        store.insert(&invoice).await.unwrap();

        assert_eq!(store.delete_many(&[invoice.id]).await.unwrap(), 1);
        assert_eq!(store.delete_many(&[invoice.id]).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_invoice_listing_is_paginated_with_stable_total() {
        let store = InMemoryInvoiceStore::new();
        for hour in 0..5 {
            let invoice = InvoiceBuilder::new()
                .with_created_at(Utc.with_ymd_and_hms(2025, 6, 10, hour, 0, 0).unwrap())
                .build();
            store.insert(&invoice).await.unwrap();
        }

        let (window, total) = store
            .list(&InvoiceFilter::all(), Page::new(1, 2))
            .await
            .unwrap();
        assert_eq!(window.len(), 2);
        assert_eq!(total, 5);

        let (everything, total) = store
            .list(&InvoiceFilter::all(), Page::all())
            .await
            .unwrap();
        assert_eq!(everything.len(), 5);
        assert_eq!(total, 5);
    }

    #[tokio::test]
    async fn test_product_update_requires_existing_record() {
        let store = InMemoryProductStore::new();
        let product = ProductBuilder::new().build();
        let missing = store.update(&product).await;
        assert!(missing.is_err());

        store.insert(&product).await.unwrap();
        let mut renamed = product.clone();
        renamed.name = "Renamed".to_string();
        store.update(&renamed).await.unwrap();

        let (listed, _) = store.list(None, Page::all()).await.unwrap();
        assert_eq!(listed[0].name, "Renamed");
    }

    #[tokio::test]
    async fn test_product_search_is_case_insensitive() {
        let store = InMemoryProductStore::new();
        store
            .insert(&ProductBuilder::new().with_name("Blue Shirt").build())
            .await
            .unwrap();
        store
            .insert(&ProductBuilder::new().with_name("Jeans").build())
            .await
            .unwrap();

        let (found, total) = store.list(Some("shirt"), Page::all()).await.unwrap();
        assert_eq!(total, 1);
        assert_eq!(found[0].name, "Blue Shirt");
    }
}
