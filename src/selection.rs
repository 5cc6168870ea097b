use crate::catalog::{Product, ProductId};
use std::sync::Arc;

/// Products the user picked for the routine, in the order they were added.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    products: Vec<Arc<Product>>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `product` unless a product with the same id is already
    /// selected. Returns whether the selection changed.
    pub fn add(&mut self, product: Arc<Product>) -> bool {
        if self.contains(&product.id) {
            return false;
        }
        self.products.push(product);
        true
    }

    /// Returns whether an entry was removed.
    pub fn remove(&mut self, id: &ProductId) -> bool {
        let before = self.products.len();
        self.products.retain(|product| &product.id != id);
        self.products.len() != before
    }

    pub fn list(&self) -> &[Arc<Product>] {
        &self.products
    }

    pub fn contains(&self, id: &ProductId) -> bool {
        self.products.iter().any(|product| &product.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
